use super::{Scope, Skip};
use crate::status::Status;
use crate::symbol::SymbolTable;
use crate::value::Value;
use source_framework::{Checkpoint, Source};
use std::rc::Rc;

/// Longest-match walk through a symbol trie.
///
/// The deepest node carrying a value is remembered together with a
/// checkpoint taken right after it; when the walk dead-ends the cursor is
/// rolled back to that checkpoint.
pub(crate) struct SymbolOp {
    table: Rc<SymbolTable>,
    skip: Skip,
    node: usize,
    best: Option<(usize, Checkpoint)>,
    value: Option<Value>,
}

impl SymbolOp {
    pub(crate) fn new(table: Rc<SymbolTable>, scope: &Scope) -> Self {
        Self {
            table,
            skip: Skip::new(scope),
            node: SymbolTable::ROOT,
            best: None,
            value: None,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if let status @ Status::Partial = self.skip.run(src) {
            return status;
        }
        loop {
            let next = match src.peek() {
                Some(c) => self.table.step(self.node, c),
                None if src.is_final() => None,
                None => return Status::Partial,
            };
            let next = match next {
                Some(next) => next,
                None => return self.resolve(src),
            };
            src.advance();
            self.node = next;
            let node = self.table.node(next);
            if node.value.is_none() {
                continue;
            }
            if let Some((_, previous)) = self.best.take() {
                src.commit(previous);
            }
            if node.children.is_empty() {
                self.value = node.value.clone();
                return Status::Success;
            }
            self.best = Some((next, src.mark()));
        }
    }

    fn resolve<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        match self.best.take() {
            Some((node, checkpoint)) => {
                src.rollback(checkpoint);
                self.value = self.table.node(node).value.clone();
                Status::Success
            }
            None => Status::Failure,
        }
    }

    pub(crate) fn take_value(&mut self) -> Value {
        self.value.take().unwrap_or_default()
    }
}
