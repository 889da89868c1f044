//! Pattern Framework
//!
//! Composable grammar patterns executed by resumable operations.
//!
//! A grammar is an immutable [`Pattern`] tree built from leaves ([`lit`],
//! [`any`], [`int`], [`symbol`], ...) and combinators (`>>` for sequence,
//! `|` for alternative, [`Pattern::repeat`], [`Pattern::list`], ...).
//! Recursive grammars go through a [`Rule`].
//!
//! Patterns run either in one shot over a complete input ([`parse`],
//! [`check`], [`parse_into`]) or incrementally with a [`StreamParser`] that
//! accepts input in arbitrary chunks and reports [`Status::Partial`] until it
//! can decide.
//!
//! ```
//! use pattern_framework::{int, parse, Value};
//!
//! let date = int() >> '-' >> int() >> '-' >> int();
//! let value = parse(&date, "2024-05-17").unwrap();
//! assert_eq!(
//!     value,
//!     Value::Tuple(vec![Value::Int(2024), Value::Int(5), Value::Int(17)])
//! );
//! ```

pub mod builder;
pub mod char_set;
pub mod error;
mod ops;
pub mod parser;
pub mod pattern;
pub mod rule;
pub mod status;
#[cfg(feature = "streaming")]
pub mod streaming;
pub mod symbol;
pub mod value;

pub use builder::{
    alpha, alt, any, char_, class, digit, eoi, fail, int, int_with, lexeme, lit, none_of, not,
    one_of, pass, range, satisfy, seq, space, symbol, symbol_table, uint,
};
pub use char_set::CharSet;
pub use error::{Error, Result};
pub use parser::{check, parse, parse_into, parse_prefix};
pub use pattern::{Action, IntSpec, Pattern};
pub use rule::Rule;
pub use status::Status;
#[cfg(feature = "streaming")]
pub use streaming::StreamParser;
pub use symbol::SymbolTable;
pub use value::{FromValue, Value};

pub use source_framework::Position;
#[cfg(feature = "streaming")]
pub use source_framework::ChunkSource;
