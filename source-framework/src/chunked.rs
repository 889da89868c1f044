use crate::{Checkpoint, Position, Source};
use std::collections::VecDeque;
use tracing::trace;

/// A chunk of input held by a [`ChunkSource`].
#[derive(Debug)]
struct Chunk {
    data: String,
    /// Offset of this chunk in the overall input stream.
    start: usize,
}

impl Chunk {
    fn end(&self) -> usize {
        self.start + self.data.len()
    }

    fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

/// Multi-chunk source fed incrementally.
///
/// Chunks are kept in arrival order. A chunk is released once the cursor has
/// moved past it and no open checkpoint still points into it, so memory use
/// is bounded by the oldest outstanding checkpoint rather than by the total
/// input size.
#[derive(Debug, Default)]
pub struct ChunkSource {
    chunks: VecDeque<Chunk>,
    /// Index in `chunks` of the chunk holding the cursor; equals
    /// `chunks.len()` when every buffered byte has been consumed.
    current: usize,
    /// Absolute byte offset of the cursor.
    cursor: usize,
    position: Position,
    /// Total bytes received so far.
    received: usize,
    marks: Vec<Checkpoint>,
    finished: bool,
}

impl ChunkSource {
    /// Creates a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk of input.
    ///
    /// # Panics
    ///
    /// Panics if the source was already finished.
    pub fn push<S: Into<String>>(&mut self, chunk: S) {
        assert!(!self.finished, "ChunkSource: push after finish");
        let data = chunk.into();
        if data.is_empty() {
            return;
        }
        let start = self.received;
        self.received += data.len();
        // A cursor sitting at the end of the buffered data now points at
        // the start of the new chunk, whose index is the old length.
        self.chunks.push_back(Chunk { data, start });
    }

    /// Marks the stream as complete: no more chunks will arrive.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Returns the number of chunks still held in memory.
    pub fn retained_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the number of bytes still held in memory.
    pub fn retained_bytes(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.data.len()).sum()
    }

    /// Returns the total number of bytes received so far.
    pub fn received(&self) -> usize {
        self.received
    }

    /// Releases front chunks that neither the cursor nor any open checkpoint
    /// can reach any more.
    fn release(&mut self) {
        let floor = self
            .marks
            .first()
            .map(Checkpoint::index)
            .unwrap_or(self.cursor);
        let mut released = 0;
        while let Some(front) = self.chunks.front() {
            if front.end() > floor {
                break;
            }
            self.chunks.pop_front();
            self.current -= 1;
            released += 1;
        }
        if released > 0 {
            trace!(released, retained = self.chunks.len(), "released chunks");
        }
    }

    fn locate(&self, offset: usize) -> usize {
        self.chunks
            .iter()
            .position(|chunk| chunk.contains(offset))
            .unwrap_or(self.chunks.len())
    }

    fn check_top(&self, checkpoint: &Checkpoint, op: &str) {
        debug_assert_eq!(
            checkpoint.depth() + 1,
            self.marks.len(),
            "ChunkSource: {} out of stack order",
            op
        );
    }
}

impl Source for ChunkSource {
    fn peek(&self) -> Option<char> {
        let chunk = self.chunks.get(self.current)?;
        chunk.data[self.cursor - chunk.start..].chars().next()
    }

    fn advance(&mut self) {
        let ch = match self.peek() {
            Some(ch) => ch,
            None => panic!("ChunkSource: advance past end of buffered input"),
        };
        self.cursor += ch.len_utf8();
        self.position.advance(ch);
        if self.cursor == self.chunks[self.current].end() {
            self.current += 1;
            self.release();
        }
    }

    fn is_final(&self) -> bool {
        self.finished
    }

    fn offset(&self) -> usize {
        self.cursor
    }

    fn position(&self) -> Position {
        self.position
    }

    fn mark(&mut self) -> Checkpoint {
        let checkpoint = Checkpoint::new(self.cursor, self.position, self.marks.len());
        self.marks.push(checkpoint);
        checkpoint
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.check_top(&checkpoint, "rollback");
        self.marks.truncate(checkpoint.depth());
        self.cursor = checkpoint.index();
        self.position = checkpoint.position();
        self.current = self.locate(self.cursor);
        self.release();
    }

    fn commit(&mut self, checkpoint: Checkpoint) {
        self.check_top(&checkpoint, "commit");
        self.marks.truncate(checkpoint.depth());
        self.release();
    }

    fn open_marks(&self) -> usize {
        self.marks.len()
    }
}
