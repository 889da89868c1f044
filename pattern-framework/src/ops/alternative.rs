use super::{Operation, Scope};
use crate::pattern::Pattern;
use crate::status::Status;
use crate::value::Value;
use source_framework::{Checkpoint, Source};
use std::rc::Rc;

/// Tries branches in order, each under its own checkpoint.
///
/// A failed branch is rolled back before the next one starts; a `Partial`
/// keeps the active branch and its checkpoint for the next feed.
pub(crate) struct AlternativeOp {
    branches: Rc<[Pattern]>,
    scope: Scope,
    index: usize,
    current: Option<(Box<Operation>, Checkpoint)>,
    value: Value,
}

impl AlternativeOp {
    pub(crate) fn new(branches: Rc<[Pattern]>, scope: &Scope) -> Self {
        Self {
            branches,
            scope: scope.clone(),
            index: 0,
            current: None,
            value: Value::Nil,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        while let Some(branch) = self.branches.get(self.index) {
            let (op, mark) = match &mut self.current {
                Some((op, mark)) => (op, *mark),
                None => {
                    let mark = src.mark();
                    let op = Box::new(Operation::new(branch, &self.scope));
                    let (op, _) = self.current.insert((op, mark));
                    (op, mark)
                }
            };
            match op.feed(src) {
                Status::Partial => return Status::Partial,
                Status::Success => {
                    if !branch.is_silent() {
                        self.value = op.take_value();
                    }
                    self.current = None;
                    src.commit(mark);
                    return Status::Success;
                }
                Status::Failure => {
                    self.current = None;
                    src.rollback(mark);
                    self.index += 1;
                }
            }
        }
        Status::Failure
    }

    pub(crate) fn take_value(&mut self) -> Value {
        std::mem::take(&mut self.value)
    }
}
