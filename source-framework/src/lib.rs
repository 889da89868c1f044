//! Source Framework
//!
//! Data sources for the pattern engine: a single-buffer source over a known
//! `&str`, and a multi-chunk source that receives input over time and only
//! retains the chunks an open checkpoint can still roll back into.

pub mod checkpoint;
pub mod chunked;
pub mod position;
pub mod source;
pub mod str_source;

pub use checkpoint::Checkpoint;
pub use chunked::ChunkSource;
pub use position::Position;
pub use source::Source;
pub use str_source::StrSource;
