use super::{Operation, Scope, Skip};
use crate::pattern::{Action, Pattern};
use crate::status::Status;
use crate::value::Value;
use source_framework::{Checkpoint, Source};

/// Matches the operand or nothing.
pub(crate) struct OptionalOp {
    child: Box<Operation>,
    silent: bool,
    mark: Option<Checkpoint>,
    value: Value,
}

impl OptionalOp {
    pub(crate) fn new(operand: &Pattern, scope: &Scope) -> Self {
        Self {
            child: Box::new(Operation::new(operand, scope)),
            silent: operand.is_silent(),
            mark: None,
            value: Value::Nil,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        let mark = *self.mark.get_or_insert_with(|| src.mark());
        match self.child.feed(src) {
            Status::Partial => Status::Partial,
            Status::Success => {
                src.commit(mark);
                if !self.silent {
                    self.value = self.child.take_value();
                }
                Status::Success
            }
            Status::Failure => {
                src.rollback(mark);
                Status::Success
            }
        }
    }

    pub(crate) fn take_value(&mut self) -> Value {
        std::mem::take(&mut self.value)
    }
}

/// Runs the excluded pattern first; the operand only gets a turn if the
/// excluded one fails at the same position.
pub(crate) struct ExceptOp {
    operand: Box<Operation>,
    excluded: Box<Operation>,
    mark: Option<Checkpoint>,
    cleared: bool,
}

impl ExceptOp {
    pub(crate) fn new(operand: &Pattern, excluded: &Pattern, scope: &Scope) -> Self {
        Self {
            operand: Box::new(Operation::new(operand, scope)),
            excluded: Box::new(Operation::new(excluded, scope)),
            mark: None,
            cleared: false,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if !self.cleared {
            let mark = *self.mark.get_or_insert_with(|| src.mark());
            match self.excluded.feed(src) {
                Status::Partial => return Status::Partial,
                Status::Success => {
                    src.rollback(mark);
                    return Status::Failure;
                }
                Status::Failure => {
                    src.rollback(mark);
                    self.cleared = true;
                }
            }
        }
        self.operand.feed(src)
    }

    pub(crate) fn take_value(&mut self) -> Value {
        self.operand.take_value()
    }
}

/// Negative lookahead: succeeds where the operand fails, never consuming.
pub(crate) struct NotOp {
    child: Box<Operation>,
    mark: Option<Checkpoint>,
}

impl NotOp {
    pub(crate) fn new(operand: &Pattern, scope: &Scope) -> Self {
        Self {
            child: Box::new(Operation::new(operand, scope)),
            mark: None,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        let mark = *self.mark.get_or_insert_with(|| src.mark());
        let status = match self.child.feed(src) {
            Status::Partial => return Status::Partial,
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        };
        src.rollback(mark);
        status
    }
}

/// Hands the operand's value to a callback.
pub(crate) struct ActionOp {
    child: Box<Operation>,
    action: Action,
    value: Value,
}

impl ActionOp {
    pub(crate) fn new(operand: &Pattern, action: Action, scope: &Scope) -> Self {
        Self {
            child: Box::new(Operation::new(operand, scope)),
            action,
            value: Value::Nil,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        let status = self.child.feed(src);
        if status == Status::Success {
            let value = self.child.take_value();
            match &self.action {
                Action::Map(f) => self.value = f(value),
                Action::Tap(f) => f(&value),
            }
        }
        status
    }

    pub(crate) fn take_value(&mut self) -> Value {
        std::mem::take(&mut self.value)
    }
}

/// Skips once up front, then runs the operand with skipping disabled.
pub(crate) struct LexemeOp {
    skip: Skip,
    child: Box<Operation>,
}

impl LexemeOp {
    pub(crate) fn new(operand: &Pattern, scope: &Scope) -> Self {
        Self {
            skip: Skip::new(scope),
            child: Box::new(Operation::new(operand, &Scope::default())),
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if let status @ Status::Partial = self.skip.run(src) {
            return status;
        }
        self.child.feed(src)
    }

    pub(crate) fn take_value(&mut self) -> Value {
        self.child.take_value()
    }
}
