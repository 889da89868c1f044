use crate::char_set::CharSet;
use crate::rule::{Rule, RuleRef};
use crate::symbol::SymbolTable;
use crate::value::Value;
use std::fmt;
use std::ops::{BitOr, Not, Shr};
use std::rc::Rc;

/// Parameters of an integer scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntSpec {
    /// Radix, between 2 and 36.
    pub base: u32,
    /// Minimum number of digits for a match.
    pub min_digits: usize,
    /// Number of digits after which the scanner stops; 0 means unbounded.
    pub max_digits: usize,
    /// Whether a leading `+` or `-` is recognized.
    pub signed: bool,
}

impl IntSpec {
    /// Base 10, at least one digit, no upper bound.
    pub const fn decimal(signed: bool) -> Self {
        Self {
            base: 10,
            min_digits: 1,
            max_digits: 0,
            signed,
        }
    }
}

/// Callback attached to a pattern by [`Pattern::map`] or [`Pattern::tap`].
#[derive(Clone)]
pub enum Action {
    /// Replaces the operand's value with the callback's result.
    Map(Rc<dyn Fn(Value) -> Value>),
    /// Observes the operand's value; the pattern produces nothing.
    Tap(Rc<dyn Fn(&Value)>),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Map(_) => write!(f, "Map(..)"),
            Action::Tap(_) => write!(f, "Tap(..)"),
        }
    }
}

/// Node kinds of the pattern tree.
#[derive(Debug)]
pub(crate) enum Node {
    Char(CharSet),
    Literal(Rc<str>),
    Eoi,
    Pass,
    Fail,
    Int(IntSpec),
    Symbol(Rc<SymbolTable>),
    Sequence(Rc<[Pattern]>),
    Alternative(Rc<[Pattern]>),
    Repeat {
        operand: Pattern,
        min: usize,
        max: usize,
    },
    Optional(Pattern),
    List {
        operand: Pattern,
        separator: Pattern,
    },
    Except {
        operand: Pattern,
        excluded: Pattern,
    },
    Not(Pattern),
    Discard(Pattern),
    Action {
        operand: Pattern,
        action: Action,
    },
    Lexeme(Pattern),
    WithSkipper {
        operand: Pattern,
        skipper: Pattern,
    },
    Rule(RuleRef),
}

#[derive(Debug)]
struct PatternNode {
    node: Node,
    /// The pattern never produces a value and takes no destination slot.
    silent: bool,
    /// The pattern's value is text (a char or a string).
    text: bool,
}

/// An immutable grammar node.
///
/// Patterns are cheap to clone and hold no parse state, so a single tree can
/// back any number of concurrent parses.
#[derive(Clone)]
pub struct Pattern(Rc<PatternNode>);

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.node.fmt(f)
    }
}

impl Pattern {
    pub(crate) fn from_node(node: Node) -> Self {
        let (silent, text) = match &node {
            Node::Char(_) => (false, true),
            Node::Literal(_) | Node::Eoi | Node::Pass | Node::Fail => (true, false),
            Node::Not(_) | Node::Discard(_) => (true, false),
            Node::Int(_) | Node::Symbol(_) | Node::Rule(_) => (false, false),
            Node::Sequence(children) => {
                let mut valued = children.iter().filter(|child| !child.is_silent());
                match (valued.next(), valued.next()) {
                    (None, _) => (true, false),
                    (Some(only), None) => (false, only.is_text()),
                    _ => (false, false),
                }
            }
            Node::Alternative(children) => {
                let silent = children.iter().all(Pattern::is_silent);
                let text = !silent
                    && children
                        .iter()
                        .filter(|child| !child.is_silent())
                        .all(Pattern::is_text);
                (silent, text)
            }
            Node::Repeat { operand, .. }
            | Node::Optional(operand)
            | Node::List { operand, .. }
            | Node::Except { operand, .. }
            | Node::Lexeme(operand)
            | Node::WithSkipper { operand, .. } => (operand.is_silent(), operand.is_text()),
            Node::Action { action, .. } => match action {
                Action::Map(_) => (false, false),
                Action::Tap(_) => (true, false),
            },
        };
        Pattern(Rc::new(PatternNode { node, silent, text }))
    }

    pub(crate) fn node(&self) -> &Node {
        &self.0.node
    }

    /// Returns true if the pattern produces no value.
    pub fn is_silent(&self) -> bool {
        self.0.silent
    }

    /// Returns true if the pattern's value is text-shaped.
    pub fn is_text(&self) -> bool {
        self.0.text
    }

    /// Repeats the pattern between `min` and `max` times; `max == 0` means
    /// unbounded.
    ///
    /// # Panics
    ///
    /// Panics if `max` is nonzero and smaller than `min`.
    pub fn repeat(self, min: usize, max: usize) -> Pattern {
        assert!(
            max == 0 || max >= min,
            "repeat bounds are inverted: min {} > max {}",
            min,
            max
        );
        Pattern::from_node(Node::Repeat {
            operand: self,
            min,
            max,
        })
    }

    /// Zero or more repetitions.
    pub fn many(self) -> Pattern {
        self.repeat(0, 0)
    }

    /// One or more repetitions.
    pub fn many1(self) -> Pattern {
        self.repeat(1, 0)
    }

    /// Matches the pattern or nothing.
    pub fn opt(self) -> Pattern {
        Pattern::from_node(Node::Optional(self))
    }

    /// Matches the pattern repeatedly, separated by `separator`.
    pub fn list<P: Into<Pattern>>(self, separator: P) -> Pattern {
        Pattern::from_node(Node::List {
            operand: self,
            separator: separator.into(),
        })
    }

    /// Matches the pattern unless `excluded` matches at the same position.
    pub fn except<P: Into<Pattern>>(self, excluded: P) -> Pattern {
        Pattern::from_node(Node::Except {
            operand: self,
            excluded: excluded.into(),
        })
    }

    /// Matches the pattern but drops its value.
    pub fn discard(self) -> Pattern {
        Pattern::from_node(Node::Discard(self))
    }

    /// Replaces the matched value with `f(value)`.
    pub fn map<F>(self, f: F) -> Pattern
    where
        F: Fn(Value) -> Value + 'static,
    {
        Pattern::from_node(Node::Action {
            operand: self,
            action: Action::Map(Rc::new(f)),
        })
    }

    /// Calls `f` with the matched value; the resulting pattern is silent.
    pub fn tap<F>(self, f: F) -> Pattern
    where
        F: Fn(&Value) + 'static,
    {
        Pattern::from_node(Node::Action {
            operand: self,
            action: Action::Tap(Rc::new(f)),
        })
    }

    /// Disables the ambient skipper inside the pattern.
    pub fn lexeme(self) -> Pattern {
        Pattern::from_node(Node::Lexeme(self))
    }

    /// Skips `skipper` before every token consumed inside the pattern.
    pub fn skipping<P: Into<Pattern>>(self, skipper: P) -> Pattern {
        Pattern::from_node(Node::WithSkipper {
            operand: self,
            skipper: skipper.into(),
        })
    }

    /// Visits every direct child pattern.
    pub(crate) fn for_each_child(&self, mut f: impl FnMut(&Pattern)) {
        match self.node() {
            Node::Char(_)
            | Node::Literal(_)
            | Node::Eoi
            | Node::Pass
            | Node::Fail
            | Node::Int(_)
            | Node::Symbol(_)
            | Node::Rule(_) => {}
            Node::Sequence(children) | Node::Alternative(children) => {
                children.iter().for_each(f)
            }
            Node::Repeat { operand, .. }
            | Node::Optional(operand)
            | Node::Not(operand)
            | Node::Discard(operand)
            | Node::Action { operand, .. }
            | Node::Lexeme(operand) => f(operand),
            Node::List { operand, separator } => {
                f(operand);
                f(separator);
            }
            Node::Except { operand, excluded } => {
                f(operand);
                f(excluded);
            }
            Node::WithSkipper { operand, skipper } => {
                f(operand);
                f(skipper);
            }
        }
    }
}

impl From<char> for Pattern {
    fn from(value: char) -> Self {
        crate::builder::lit(value)
    }
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        crate::builder::lit(value)
    }
}

impl From<CharSet> for Pattern {
    fn from(value: CharSet) -> Self {
        Pattern::from_node(Node::Char(value))
    }
}

impl From<&Rule> for Pattern {
    fn from(value: &Rule) -> Self {
        value.pattern()
    }
}

fn flatten(pattern: Pattern, into: &mut Vec<Pattern>, sequence: bool) {
    match pattern.node() {
        Node::Sequence(children) if sequence => into.extend(children.iter().cloned()),
        Node::Alternative(children) if !sequence => into.extend(children.iter().cloned()),
        _ => into.push(pattern),
    }
}

impl<P: Into<Pattern>> Shr<P> for Pattern {
    type Output = Pattern;

    /// `a >> b` matches `a` then `b`.
    fn shr(self, rhs: P) -> Pattern {
        let mut children = Vec::new();
        flatten(self, &mut children, true);
        flatten(rhs.into(), &mut children, true);
        Pattern::from_node(Node::Sequence(children.into()))
    }
}

impl<P: Into<Pattern>> BitOr<P> for Pattern {
    type Output = Pattern;

    /// `a | b` matches `a`, or `b` if `a` fails.
    fn bitor(self, rhs: P) -> Pattern {
        let mut children = Vec::new();
        flatten(self, &mut children, false);
        flatten(rhs.into(), &mut children, false);
        Pattern::from_node(Node::Alternative(children.into()))
    }
}

impl Not for Pattern {
    type Output = Pattern;

    /// `!a` succeeds, consuming nothing, where `a` fails.
    fn not(self) -> Pattern {
        Pattern::from_node(Node::Not(self))
    }
}
