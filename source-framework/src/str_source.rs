use crate::{Checkpoint, Position, Source};

/// Single-buffer source over a fully known input.
///
/// The whole input is present up front, so the source is always final and
/// checkpoints never hold anything alive beyond the borrowed buffer.
#[derive(Debug, Clone)]
pub struct StrSource<'input> {
    input: &'input str,
    current: usize,
    position: Position,
    marks: usize,
}

impl<'input> StrSource<'input> {
    /// Creates a new source over `input`.
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            current: 0,
            position: Position::new(),
            marks: 0,
        }
    }

    /// Returns the input that has not been consumed yet.
    pub fn remaining(&self) -> &'input str {
        &self.input[self.current..]
    }

    /// Returns the consumed prefix of the input.
    pub fn consumed(&self) -> &'input str {
        &self.input[..self.current]
    }
}

impl Source for StrSource<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.current..].chars().next()
    }

    fn advance(&mut self) {
        let ch = match self.peek() {
            Some(ch) => ch,
            None => panic!("StrSource: advance past end of input"),
        };
        self.current += ch.len_utf8();
        self.position.advance(ch);
    }

    fn is_final(&self) -> bool {
        true
    }

    fn offset(&self) -> usize {
        self.current
    }

    fn position(&self) -> Position {
        self.position
    }

    fn mark(&mut self) -> Checkpoint {
        let checkpoint = Checkpoint::new(self.current, self.position, self.marks);
        self.marks += 1;
        checkpoint
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        debug_assert!(
            checkpoint.depth() < self.marks,
            "StrSource: rollback of a closed checkpoint"
        );
        debug_assert_eq!(
            checkpoint.depth() + 1,
            self.marks,
            "StrSource: rollback out of stack order"
        );
        self.current = checkpoint.index();
        self.position = checkpoint.position();
        self.marks = checkpoint.depth();
    }

    fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert_eq!(
            checkpoint.depth() + 1,
            self.marks,
            "StrSource: commit out of stack order"
        );
        self.marks = checkpoint.depth();
    }

    fn open_marks(&self) -> usize {
        self.marks
    }
}
