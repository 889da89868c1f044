use crate::Position;

/// A saved cursor position that a source can roll back to.
///
/// Checkpoints nest: the one opened last must be committed or rolled back
/// before any earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Absolute byte offset of the cursor when the checkpoint was taken.
    index: usize,
    /// The position in the source at this checkpoint.
    position: Position,
    /// Slot of this checkpoint in the source's mark stack.
    depth: usize,
}

impl Checkpoint {
    /// Creates a new checkpoint with the given index, position and stack depth.
    pub fn new(index: usize, position: Position, depth: usize) -> Self {
        Self {
            index,
            position,
            depth,
        }
    }

    /// Returns the absolute byte offset stored in this checkpoint.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the position stored in this checkpoint.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the depth of this checkpoint in the mark stack.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
