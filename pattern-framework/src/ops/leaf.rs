use super::{Scope, Skip};
use crate::char_set::CharSet;
use crate::status::Status;
use crate::value::Value;
use source_framework::Source;
use std::rc::Rc;

/// Matches one character from a set.
pub(crate) struct CharOp {
    set: CharSet,
    skip: Skip,
    value: Option<char>,
}

impl CharOp {
    pub(crate) fn new(set: CharSet, scope: &Scope) -> Self {
        Self {
            set,
            skip: Skip::new(scope),
            value: None,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if let status @ Status::Partial = self.skip.run(src) {
            return status;
        }
        match src.peek() {
            Some(c) if self.set.contains(c) => {
                src.advance();
                self.value = Some(c);
                Status::Success
            }
            Some(_) => Status::Failure,
            None if src.is_final() => Status::Failure,
            None => Status::Partial,
        }
    }

    pub(crate) fn take_value(&mut self) -> Value {
        self.value.take().map_or(Value::Nil, Value::Char)
    }
}

/// Matches a fixed string, one character per step.
pub(crate) struct LiteralOp {
    text: Rc<str>,
    /// Byte offset into `text` of the next expected character.
    matched: usize,
    skip: Skip,
}

impl LiteralOp {
    pub(crate) fn new(text: Rc<str>, scope: &Scope) -> Self {
        Self {
            text,
            matched: 0,
            skip: Skip::new(scope),
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if let status @ Status::Partial = self.skip.run(src) {
            return status;
        }
        while let Some(expected) = self.text[self.matched..].chars().next() {
            match src.peek() {
                Some(c) if c == expected => {
                    src.advance();
                    self.matched += c.len_utf8();
                }
                Some(_) => return Status::Failure,
                None if src.is_final() => return Status::Failure,
                None => return Status::Partial,
            }
        }
        Status::Success
    }
}

/// Matches the end of input.
pub(crate) struct EoiOp {
    skip: Skip,
}

impl EoiOp {
    pub(crate) fn new(scope: &Scope) -> Self {
        Self {
            skip: Skip::new(scope),
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if let status @ Status::Partial = self.skip.run(src) {
            return status;
        }
        if !src.is_empty() {
            Status::Failure
        } else if src.is_final() {
            Status::Success
        } else {
            Status::Partial
        }
    }
}
