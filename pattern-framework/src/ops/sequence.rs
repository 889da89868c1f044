use super::{Operation, Scope};
use crate::pattern::Pattern;
use crate::status::Status;
use crate::value::Value;
use source_framework::Source;
use std::rc::Rc;

/// Drives children in order against the same cursor.
///
/// A failing child fails the whole sequence without undoing what earlier
/// children consumed; rollback belongs to whichever ancestor asked for it.
pub(crate) struct SequenceOp {
    children: Rc<[Pattern]>,
    scope: Scope,
    index: usize,
    current: Option<Box<Operation>>,
    values: Vec<Value>,
}

impl SequenceOp {
    pub(crate) fn new(children: Rc<[Pattern]>, scope: &Scope) -> Self {
        Self {
            children,
            scope: scope.clone(),
            index: 0,
            current: None,
            values: Vec::new(),
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        while let Some(child) = self.children.get(self.index) {
            let op = self
                .current
                .get_or_insert_with(|| Box::new(Operation::new(child, &self.scope)));
            match op.feed(src) {
                Status::Success => {
                    if !child.is_silent() {
                        self.values.push(op.take_value());
                    }
                    self.current = None;
                    self.index += 1;
                }
                status => return status,
            }
        }
        Status::Success
    }

    pub(crate) fn take_value(&mut self) -> Value {
        match self.values.len() {
            0 => Value::Nil,
            1 => self.values.pop().unwrap_or_default(),
            _ => Value::Tuple(std::mem::take(&mut self.values)),
        }
    }
}
