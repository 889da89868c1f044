use crate::{Checkpoint, Position};

/// Token source consumed by pattern operations.
///
/// Tokens are `char`s read strictly left to right. Speculative reads are
/// bracketed by [`Source::mark`] and resolved by exactly one of
/// [`Source::commit`] or [`Source::rollback`]; checkpoints follow a stack
/// discipline.
pub trait Source {
    /// Returns the next token without advancing, or `None` when no buffered
    /// data is left.
    fn peek(&self) -> Option<char>;

    /// Consumes the next token.
    ///
    /// # Panics
    ///
    /// Panics if the source is empty. Callers check [`Source::peek`] first.
    fn advance(&mut self);

    /// Returns true if no buffered token is available right now.
    fn is_empty(&self) -> bool {
        self.peek().is_none()
    }

    /// Returns true once no more data will ever arrive.
    fn is_final(&self) -> bool;

    /// Returns the absolute byte offset of the cursor.
    fn offset(&self) -> usize;

    /// Returns the current position.
    fn position(&self) -> Position;

    /// Opens a checkpoint at the cursor.
    fn mark(&mut self) -> Checkpoint;

    /// Moves the cursor back to `checkpoint` and closes it, along with any
    /// checkpoint opened after it.
    fn rollback(&mut self, checkpoint: Checkpoint);

    /// Closes `checkpoint` without moving the cursor.
    fn commit(&mut self, checkpoint: Checkpoint);

    /// Returns the number of checkpoints still open.
    fn open_marks(&self) -> usize;
}
