//! Incremental parsing over input that arrives in chunks.

use crate::error::{Error, Result};
use crate::ops::{Operation, Scope};
use crate::pattern::Pattern;
use crate::rule::RuleSet;
use crate::status::Status;
use crate::value::{FromValue, Value};
use source_framework::{ChunkSource, Position, Source};
use tracing::{debug, trace};

/// Drives a pattern over input delivered one chunk at a time.
///
/// Each [`StreamParser::feed`] resumes the match where the previous one
/// stopped. Once no more input will come, [`StreamParser::finish`] resolves
/// a lingering `Partial` into a value or [`Error::NoMatch`].
///
/// ```
/// use pattern_framework::{int, Status, StreamParser, Value};
///
/// let mut parser = StreamParser::new(&int()).unwrap();
/// assert_eq!(parser.feed("12"), Status::Partial);
/// assert_eq!(parser.feed("34 "), Status::Success);
/// assert_eq!(parser.finish().unwrap(), Value::Int(1234));
/// ```
pub struct StreamParser {
    source: ChunkSource,
    root: Operation,
    status: Status,
    _rules: RuleSet,
}

impl StreamParser {
    /// Creates a parser for `pattern`, failing if it uses an undefined rule.
    pub fn new(pattern: &Pattern) -> Result<Self> {
        let rules = RuleSet::collect(pattern)?;
        debug!(rules = rules.len(), "stream parser created");
        Ok(Self {
            source: ChunkSource::new(),
            root: Operation::new(pattern, &Scope::default()),
            status: Status::Partial,
            _rules: rules,
        })
    }

    /// Appends `chunk` to the input and advances the match.
    ///
    /// After the match has succeeded or failed, further chunks are ignored
    /// and the final status is returned again.
    pub fn feed(&mut self, chunk: &str) -> Status {
        if self.status.is_done() {
            trace!(len = chunk.len(), "chunk ignored after completion");
            return self.status;
        }
        self.source.push(chunk);
        self.status = self.root.feed(&mut self.source);
        trace!(
            len = chunk.len(),
            status = ?self.status,
            retained = self.source.retained_bytes(),
            "chunk fed"
        );
        self.status
    }

    /// Status after the latest feed.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Position of the cursor in the input seen so far.
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// Bytes still buffered for possible rollback.
    pub fn retained_bytes(&self) -> usize {
        self.source.retained_bytes()
    }

    /// Signals the end of input and returns the match result.
    pub fn finish(mut self) -> Result<Value> {
        if self.status == Status::Partial {
            self.source.finish();
            self.status = self.root.feed(&mut self.source);
        }
        debug!(status = ?self.status, consumed = self.source.offset(), "stream finished");
        match self.status {
            Status::Success => Ok(self.root.take_value()),
            Status::Failure => Err(Error::NoMatch),
            Status::Partial => panic!("operation reported Partial after end of input"),
        }
    }

    /// Like [`StreamParser::finish`], converting the value into `T`.
    pub fn finish_into<T: FromValue>(self) -> Result<T> {
        T::from_value(self.finish()?)
    }
}
