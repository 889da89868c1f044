use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitOr, Not};
use std::rc::Rc;

/// A set of characters accepted by a character-class pattern.
///
/// Sets compose: `a | b` accepts what either accepts, `!a` accepts what `a`
/// rejects.
#[derive(Clone)]
pub enum CharSet {
    /// Accepts every character.
    Any,
    Single(char),
    /// Inclusive range.
    Range(char, char),
    Set(Rc<BTreeSet<char>>),
    Not(Rc<CharSet>),
    Or(Rc<CharSet>, Rc<CharSet>),
    Predicate(Rc<dyn Fn(char) -> bool>),
}

impl CharSet {
    /// Builds a set from every character of `chars`.
    pub fn of(chars: &str) -> Self {
        CharSet::Set(Rc::new(chars.chars().collect()))
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(char) -> bool + 'static,
    {
        CharSet::Predicate(Rc::new(f))
    }

    /// Returns true if `c` belongs to the set.
    pub fn contains(&self, c: char) -> bool {
        match self {
            CharSet::Any => true,
            CharSet::Single(expected) => *expected == c,
            CharSet::Range(lo, hi) => *lo <= c && c <= *hi,
            CharSet::Set(chars) => chars.contains(&c),
            CharSet::Not(inner) => !inner.contains(c),
            CharSet::Or(lhs, rhs) => lhs.contains(c) || rhs.contains(c),
            CharSet::Predicate(f) => f(c),
        }
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharSet::Any => write!(f, "Any"),
            CharSet::Single(c) => write!(f, "Single({:?})", c),
            CharSet::Range(lo, hi) => write!(f, "Range({:?}, {:?})", lo, hi),
            CharSet::Set(chars) => f.debug_set().entries(chars.iter()).finish(),
            CharSet::Not(inner) => write!(f, "Not({:?})", inner),
            CharSet::Or(lhs, rhs) => write!(f, "Or({:?}, {:?})", lhs, rhs),
            CharSet::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl From<char> for CharSet {
    fn from(value: char) -> Self {
        CharSet::Single(value)
    }
}

impl From<&str> for CharSet {
    fn from(value: &str) -> Self {
        CharSet::of(value)
    }
}

impl BitOr for CharSet {
    type Output = CharSet;

    fn bitor(self, rhs: CharSet) -> CharSet {
        CharSet::Or(Rc::new(self), Rc::new(rhs))
    }
}

impl Not for CharSet {
    type Output = CharSet;

    fn not(self) -> CharSet {
        match self {
            CharSet::Not(inner) => (*inner).clone(),
            other => CharSet::Not(Rc::new(other)),
        }
    }
}
