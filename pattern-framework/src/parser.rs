//! One-shot parsing over a fully known input.

use crate::error::{Error, Result};
use crate::ops::{Operation, Scope};
use crate::pattern::Pattern;
use crate::rule::RuleSet;
use crate::status::Status;
use crate::value::{FromValue, Value};
use source_framework::{Source, StrSource};
use tracing::debug;

/// Matches `pattern` against a prefix of `input`, returning the value and
/// the unconsumed rest.
pub fn parse_prefix<'input>(
    pattern: &Pattern,
    input: &'input str,
) -> Result<(Value, &'input str)> {
    let rules = RuleSet::collect(pattern)?;
    let mut source = StrSource::new(input);
    let mut root = Operation::new(pattern, &Scope::default());
    let status = root.feed(&mut source);
    debug_assert_eq!(source.open_marks(), 0, "checkpoint left open after parse");
    debug!(
        ?status,
        rules = rules.len(),
        consumed = source.offset(),
        "parse finished"
    );
    match status {
        Status::Success => Ok((root.take_value(), source.remaining())),
        Status::Failure => Err(Error::NoMatch),
        Status::Partial => panic!("operation reported Partial on a final source"),
    }
}

/// Matches `pattern` against a prefix of `input`.
///
/// Trailing input is allowed; append [`crate::eoi`] to the pattern to
/// require that everything is consumed.
pub fn parse(pattern: &Pattern, input: &str) -> Result<Value> {
    parse_prefix(pattern, input).map(|(value, _)| value)
}

/// Like [`parse`], converting the value into `T`.
pub fn parse_into<T: FromValue>(pattern: &Pattern, input: &str) -> Result<T> {
    T::from_value(parse(pattern, input)?)
}

/// Returns true if `pattern` matches a prefix of `input`.
///
/// # Panics
///
/// Panics if the grammar references a rule that was never defined.
pub fn check(pattern: &Pattern, input: &str) -> bool {
    match parse(pattern, input) {
        Ok(_) => true,
        Err(Error::NoMatch) => false,
        Err(err) => panic!("invalid grammar: {}", err),
    }
}
