use super::{Operation, Scope};
use crate::rule::RuleRef;
use crate::status::Status;
use crate::value::Value;
use source_framework::Source;
use tracing::trace;

/// Delegates to the operation of a rule's definition, built on first feed.
///
/// Building lazily is what keeps a self-referential grammar from expanding
/// forever: only the branches the input actually reaches get operations.
pub(crate) struct RuleOp {
    rule: RuleRef,
    scope: Scope,
    child: Option<Box<Operation>>,
}

impl RuleOp {
    pub(crate) fn new(rule: RuleRef, scope: &Scope) -> Self {
        Self {
            rule,
            scope: scope.clone(),
            child: None,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        let child = match &mut self.child {
            Some(child) => child,
            None => {
                let cell = match self.rule.upgrade() {
                    Some(cell) => cell,
                    None => panic!("rule `{}` was dropped while in use", self.rule.name()),
                };
                let definition = match cell.definition() {
                    Some(definition) => definition,
                    None => panic!("rule `{}` is used before being defined", self.rule.name()),
                };
                trace!(rule = self.rule.name(), offset = src.offset(), "instantiating rule");
                self.child
                    .insert(Box::new(Operation::new(definition, &self.scope)))
            }
        };
        child.feed(src)
    }

    pub(crate) fn take_value(&mut self) -> Value {
        match &mut self.child {
            Some(child) => child.take_value(),
            None => Value::Nil,
        }
    }
}
