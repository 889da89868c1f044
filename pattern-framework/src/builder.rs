//! Factory functions for building patterns.

use crate::char_set::CharSet;
use crate::error::Result;
use crate::pattern::{IntSpec, Node, Pattern};
use crate::symbol::SymbolTable;
use crate::value::Value;
use std::rc::Rc;

/// Text that can be matched literally.
pub trait LiteralText {
    fn into_literal(self) -> Rc<str>;
}

impl LiteralText for char {
    fn into_literal(self) -> Rc<str> {
        self.to_string().into()
    }
}

impl LiteralText for &str {
    fn into_literal(self) -> Rc<str> {
        self.into()
    }
}

impl LiteralText for String {
    fn into_literal(self) -> Rc<str> {
        self.into()
    }
}

/// Matches `text` exactly. Literals produce no value.
pub fn lit<T: LiteralText>(text: T) -> Pattern {
    Pattern::from_node(Node::Literal(text.into_literal()))
}

/// Matches one character from `set`, producing it.
pub fn class(set: CharSet) -> Pattern {
    Pattern::from(set)
}

/// Matches any single character.
pub fn any() -> Pattern {
    class(CharSet::Any)
}

/// Matches the character `c`, producing it.
pub fn char_(c: char) -> Pattern {
    class(CharSet::Single(c))
}

/// Matches one character in `lo..=hi`.
pub fn range(lo: char, hi: char) -> Pattern {
    class(CharSet::Range(lo, hi))
}

/// Matches one character contained in `chars`.
pub fn one_of(chars: &str) -> Pattern {
    class(CharSet::of(chars))
}

/// Matches one character not contained in `chars`.
pub fn none_of(chars: &str) -> Pattern {
    class(!CharSet::of(chars))
}

/// Matches one character accepted by `f`.
pub fn satisfy<F>(f: F) -> Pattern
where
    F: Fn(char) -> bool + 'static,
{
    class(CharSet::predicate(f))
}

/// Matches an ASCII decimal digit.
pub fn digit() -> Pattern {
    range('0', '9')
}

/// Matches an alphabetic character.
pub fn alpha() -> Pattern {
    satisfy(char::is_alphabetic)
}

/// Matches a whitespace character.
pub fn space() -> Pattern {
    satisfy(char::is_whitespace)
}

/// Signed decimal integer.
pub fn int() -> Pattern {
    int_with(IntSpec::decimal(true))
}

/// Unsigned decimal integer.
pub fn uint() -> Pattern {
    int_with(IntSpec::decimal(false))
}

/// Integer scanner with explicit parameters.
///
/// # Panics
///
/// Panics if `spec.base` is outside `2..=36`, or if `spec.max_digits` is
/// nonzero and smaller than `spec.min_digits`.
pub fn int_with(spec: IntSpec) -> Pattern {
    assert!(
        (2..=36).contains(&spec.base),
        "integer base must be between 2 and 36, got {}",
        spec.base
    );
    assert!(
        spec.max_digits == 0 || spec.max_digits >= spec.min_digits,
        "integer digit bounds are inverted: min {} > max {}",
        spec.min_digits,
        spec.max_digits
    );
    Pattern::from_node(Node::Int(spec))
}

/// Longest-match lookup in a table of string keys.
pub fn symbol<I, K, V>(entries: I) -> Result<Pattern>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Value>,
{
    let table = SymbolTable::new(entries)?;
    Ok(symbol_table(Rc::new(table)))
}

/// Longest-match lookup in an existing table.
pub fn symbol_table(table: Rc<SymbolTable>) -> Pattern {
    Pattern::from_node(Node::Symbol(table))
}

/// Matches only at the end of input.
pub fn eoi() -> Pattern {
    Pattern::from_node(Node::Eoi)
}

/// Always matches, consuming nothing.
pub fn pass() -> Pattern {
    Pattern::from_node(Node::Pass)
}

/// Never matches.
pub fn fail() -> Pattern {
    Pattern::from_node(Node::Fail)
}

/// Matches every pattern of `parts` in order.
pub fn seq<I>(parts: I) -> Pattern
where
    I: IntoIterator,
    I::Item: Into<Pattern>,
{
    Pattern::from_node(Node::Sequence(parts.into_iter().map(Into::into).collect()))
}

/// Matches the first pattern of `branches` that succeeds.
pub fn alt<I>(branches: I) -> Pattern
where
    I: IntoIterator,
    I::Item: Into<Pattern>,
{
    Pattern::from_node(Node::Alternative(
        branches.into_iter().map(Into::into).collect(),
    ))
}

/// Negative lookahead, see [`std::ops::Not`] on [`Pattern`].
pub fn not<P: Into<Pattern>>(pattern: P) -> Pattern {
    let pattern: Pattern = pattern.into();
    !pattern
}

/// Matches `pattern` with the ambient skipper disabled inside.
pub fn lexeme<P: Into<Pattern>>(pattern: P) -> Pattern {
    let pattern: Pattern = pattern.into();
    pattern.lexeme()
}
