//! Operations: the resumable state machines that execute patterns.
//!
//! An operation is built from a pattern node and fed a [`Source`] until it
//! reports [`Status::Success`] or [`Status::Failure`]. A [`Status::Partial`]
//! leaves the operation and the source's open checkpoints in place so the
//! next feed resumes where this one stopped. Every checkpoint an operation
//! opens is committed or rolled back before it reports a final status.

mod alternative;
mod int;
mod leaf;
mod repeat;
mod rule;
mod sequence;
mod skip;
mod symbol;
mod unary;

use crate::pattern::{Node, Pattern};
use crate::status::Status;
use crate::value::Value;
use source_framework::Source;

use alternative::AlternativeOp;
use int::IntOp;
use leaf::{CharOp, EoiOp, LiteralOp};
use repeat::{ListOp, RepeatOp};
use rule::RuleOp;
use sequence::SequenceOp;
use symbol::SymbolOp;
use unary::{ActionOp, ExceptOp, LexemeOp, NotOp, OptionalOp};

pub(crate) use skip::Skip;

/// Context inherited by an operation from its ancestors.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    skipper: Option<Pattern>,
}

impl Scope {
    pub(crate) fn new(skipper: Option<Pattern>) -> Self {
        Self { skipper }
    }

    pub(crate) fn skipper(&self) -> Option<&Pattern> {
        self.skipper.as_ref()
    }
}

pub(crate) enum Operation {
    Char(CharOp),
    Literal(LiteralOp),
    Eoi(EoiOp),
    Pass,
    Fail,
    Int(IntOp),
    Symbol(SymbolOp),
    Sequence(SequenceOp),
    Alternative(AlternativeOp),
    Repeat(RepeatOp),
    List(ListOp),
    Optional(OptionalOp),
    Except(ExceptOp),
    Not(NotOp),
    Discard(Box<Operation>),
    Action(ActionOp),
    Lexeme(LexemeOp),
    Scoped(Box<Operation>),
    Rule(RuleOp),
}

impl Operation {
    /// Builds the operation for `pattern`. Construction never touches the
    /// source; children are built eagerly where cheap and lazily otherwise.
    pub(crate) fn new(pattern: &Pattern, scope: &Scope) -> Self {
        match pattern.node() {
            Node::Char(set) => Operation::Char(CharOp::new(set.clone(), scope)),
            Node::Literal(text) => Operation::Literal(LiteralOp::new(text.clone(), scope)),
            Node::Eoi => Operation::Eoi(EoiOp::new(scope)),
            Node::Pass => Operation::Pass,
            Node::Fail => Operation::Fail,
            Node::Int(spec) => Operation::Int(IntOp::new(*spec, scope)),
            Node::Symbol(table) => Operation::Symbol(SymbolOp::new(table.clone(), scope)),
            Node::Sequence(children) => {
                Operation::Sequence(SequenceOp::new(children.clone(), scope))
            }
            Node::Alternative(branches) => {
                Operation::Alternative(AlternativeOp::new(branches.clone(), scope))
            }
            Node::Repeat { operand, min, max } => {
                Operation::Repeat(RepeatOp::new(operand.clone(), *min, *max, scope))
            }
            Node::List { operand, separator } => {
                Operation::List(ListOp::new(operand.clone(), separator.clone(), scope))
            }
            Node::Optional(operand) => Operation::Optional(OptionalOp::new(operand, scope)),
            Node::Except { operand, excluded } => {
                Operation::Except(ExceptOp::new(operand, excluded, scope))
            }
            Node::Not(operand) => Operation::Not(NotOp::new(operand, scope)),
            Node::Discard(operand) => Operation::Discard(Box::new(Operation::new(operand, scope))),
            Node::Action { operand, action } => {
                Operation::Action(ActionOp::new(operand, action.clone(), scope))
            }
            Node::Lexeme(operand) => Operation::Lexeme(LexemeOp::new(operand, scope)),
            Node::WithSkipper { operand, skipper } => Operation::Scoped(Box::new(
                Operation::new(operand, &Scope::new(Some(skipper.clone()))),
            )),
            Node::Rule(rule) => Operation::Rule(RuleOp::new(rule.clone(), scope)),
        }
    }

    /// Consumes as much of `src` as the pattern needs.
    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        match self {
            Operation::Char(op) => op.feed(src),
            Operation::Literal(op) => op.feed(src),
            Operation::Eoi(op) => op.feed(src),
            Operation::Pass => Status::Success,
            Operation::Fail => Status::Failure,
            Operation::Int(op) => op.feed(src),
            Operation::Symbol(op) => op.feed(src),
            Operation::Sequence(op) => op.feed(src),
            Operation::Alternative(op) => op.feed(src),
            Operation::Repeat(op) => op.feed(src),
            Operation::List(op) => op.feed(src),
            Operation::Optional(op) => op.feed(src),
            Operation::Except(op) => op.feed(src),
            Operation::Not(op) => op.feed(src),
            Operation::Discard(op) | Operation::Scoped(op) => op.feed(src),
            Operation::Action(op) => op.feed(src),
            Operation::Lexeme(op) => op.feed(src),
            Operation::Rule(op) => op.feed(src),
        }
    }

    /// Moves the produced value out. Only meaningful after `Success`;
    /// silent operations yield `Nil`.
    pub(crate) fn take_value(&mut self) -> Value {
        match self {
            Operation::Char(op) => op.take_value(),
            Operation::Int(op) => op.take_value(),
            Operation::Symbol(op) => op.take_value(),
            Operation::Sequence(op) => op.take_value(),
            Operation::Alternative(op) => op.take_value(),
            Operation::Repeat(op) => op.take_value(),
            Operation::List(op) => op.take_value(),
            Operation::Optional(op) => op.take_value(),
            Operation::Except(op) => op.take_value(),
            Operation::Action(op) => op.take_value(),
            Operation::Lexeme(op) => op.take_value(),
            Operation::Scoped(op) => op.take_value(),
            Operation::Rule(op) => op.take_value(),
            Operation::Literal(_)
            | Operation::Eoi(_)
            | Operation::Pass
            | Operation::Fail
            | Operation::Not(_)
            | Operation::Discard(_) => Value::Nil,
        }
    }
}

/// Accumulates the values of repeated matches.
#[derive(Debug)]
pub(crate) enum Collector {
    Silent,
    Text(String),
    Items(Vec<Value>),
}

impl Collector {
    pub(crate) fn for_operand(operand: &Pattern) -> Self {
        if operand.is_silent() {
            Collector::Silent
        } else if operand.is_text() {
            Collector::Text(String::new())
        } else {
            Collector::Items(Vec::new())
        }
    }

    pub(crate) fn push(&mut self, value: Value) {
        match self {
            Collector::Silent => {}
            Collector::Text(text) => {
                let is_text = value.push_text(text);
                debug_assert!(is_text, "text operand produced a {} value", value.kind());
            }
            Collector::Items(items) => items.push(value),
        }
    }

    pub(crate) fn finish(&mut self) -> Value {
        match self {
            Collector::Silent => Value::Nil,
            Collector::Text(text) => Value::Str(std::mem::take(text)),
            Collector::Items(items) => Value::List(std::mem::take(items)),
        }
    }
}
