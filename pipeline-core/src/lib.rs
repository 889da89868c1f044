//! Pipeline Core
//!
//! Pumps input from a reader or an iterator of chunks into a
//! [`StreamParser`], stopping as soon as the parser has decided.

use pattern_framework::{Pattern, Status, StreamParser, Value};
use std::io::{self, Read};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors surfaced while running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid UTF-8.
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error(transparent)]
    Parse(#[from] pattern_framework::Error),
}

/// Tunables of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Bytes requested per read.
    pub chunk_size: usize,
}

impl PipelineConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_chunk_size(Self::DEFAULT_CHUNK_SIZE)
    }
}

/// Drives a pattern over input pulled from a reader or a chunk iterator.
///
/// ```
/// use pattern_framework::int;
/// use pipeline_core::{Pipeline, PipelineConfig};
///
/// let pipeline = Pipeline::new(int().list(','), PipelineConfig::with_chunk_size(2));
/// let value = pipeline.run_reader("10,20,30".as_bytes()).unwrap();
/// assert_eq!(value.into_items().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    pattern: Pattern,
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline running `pattern` with `config`.
    pub fn new(pattern: Pattern, config: PipelineConfig) -> Self {
        Self { pattern, config }
    }

    /// Returns the configuration the pipeline runs with.
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Reads `reader` to the end, or until the parser decides, and returns
    /// the match result.
    pub fn run_reader<R: Read>(&self, mut reader: R) -> Result<Value, PipelineError> {
        let mut parser = StreamParser::new(&self.pattern)?;
        let mut decoder = Utf8Decoder::default();
        let mut buf = vec![0u8; self.config.chunk_size.max(1)];
        loop {
            let read = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            trace!(read, "pipeline read");
            let text = decoder.decode(&buf[..read])?;
            if parser.feed(&text).is_done() {
                return Self::complete(parser);
            }
        }
        decoder.finish()?;
        Self::complete(parser)
    }

    /// Feeds every chunk of `chunks`, or stops early once the parser decides.
    pub fn run_chunks<I>(&self, chunks: I) -> Result<Value, PipelineError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut parser = StreamParser::new(&self.pattern)?;
        for chunk in chunks {
            let chunk = chunk.as_ref();
            trace!(len = chunk.len(), "pipeline chunk");
            if parser.feed(chunk).is_done() {
                break;
            }
        }
        Self::complete(parser)
    }

    fn complete(parser: StreamParser) -> Result<Value, PipelineError> {
        let decided = parser.status() != Status::Partial;
        debug!(decided, "pipeline finishing");
        Ok(parser.finish()?)
    }
}

/// Splits a byte stream into UTF-8 text, carrying a sequence cut by a read
/// boundary over to the next read.
#[derive(Debug, Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
    /// Absolute offset of the first pending byte.
    offset: usize,
}

impl Utf8Decoder {
    fn decode(&mut self, bytes: &[u8]) -> Result<String, PipelineError> {
        self.pending.extend_from_slice(bytes);
        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(err) => {
                return Err(PipelineError::InvalidUtf8 {
                    offset: self.offset + err.valid_up_to(),
                })
            }
        };
        let rest = self.pending.split_off(valid);
        let text = String::from_utf8(std::mem::replace(&mut self.pending, rest)).map_err(|err| {
            PipelineError::InvalidUtf8 {
                offset: self.offset + err.utf8_error().valid_up_to(),
            }
        })?;
        self.offset += valid;
        Ok(text)
    }

    /// Fails if the stream ended inside a multi-byte sequence.
    fn finish(self) -> Result<(), PipelineError> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::InvalidUtf8 {
                offset: self.offset,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_carries_split_sequence() {
        let mut decoder = Utf8Decoder::default();
        let bytes = "é".as_bytes();
        assert_eq!(decoder.decode(&bytes[..1]).unwrap(), "");
        assert_eq!(decoder.decode(&bytes[1..]).unwrap(), "é");
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn test_decoder_reports_offset_of_invalid_byte() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(b"ab").unwrap(), "ab");
        match decoder.decode(b"c\xffd") {
            Err(PipelineError::InvalidUtf8 { offset }) => assert_eq!(offset, 3),
            other => panic!("expected invalid UTF-8, got {:?}", other),
        }
    }

    #[test]
    fn test_decoder_truncated_sequence_at_end() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(&"€".as_bytes()[..2]).unwrap(), "");
        assert!(matches!(
            decoder.finish(),
            Err(PipelineError::InvalidUtf8 { offset: 0 })
        ));
    }

    #[test]
    fn test_config_minimum_chunk_size() {
        assert_eq!(PipelineConfig::with_chunk_size(0).chunk_size, 1);
        assert_eq!(PipelineConfig::default().chunk_size, 8 * 1024);
    }
}
