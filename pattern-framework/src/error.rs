use thiserror::Error;

/// Errors surfaced by the pattern framework.
///
/// `NoMatch` is the ordinary outcome of a grammar that does not accept its
/// input. Every other variant reports a grammar or destination that was
/// put together incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input does not match the pattern.
    #[error("input does not match the pattern")]
    NoMatch,

    /// A recursive rule was used before being defined.
    #[error("rule `{name}` is used but was never defined")]
    UnboundRule { name: String },

    /// A recursive rule was defined twice.
    #[error("rule `{name}` is already defined")]
    RuleAlreadyBound { name: String },

    /// A symbol table contained the empty key.
    #[error("symbol tables cannot contain the empty key")]
    EmptySymbol,

    /// A matched value does not fit the requested destination.
    #[error("cannot store {found} value into {expected}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
