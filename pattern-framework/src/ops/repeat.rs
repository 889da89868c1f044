use super::{Collector, Operation, Scope};
use crate::pattern::Pattern;
use crate::status::Status;
use crate::value::Value;
use source_framework::{Checkpoint, Source};

/// Drives a fresh operand operation per repetition.
///
/// Each repetition runs under its own checkpoint so a failed attempt undoes
/// only itself. While fewer than `min` repetitions have matched, an entry
/// checkpoint allows undoing the whole repeat.
pub(crate) struct RepeatOp {
    operand: Pattern,
    min: usize,
    max: usize,
    scope: Scope,
    started: bool,
    entry: Option<Checkpoint>,
    current: Option<(Box<Operation>, Checkpoint)>,
    count: usize,
    collector: Collector,
}

impl RepeatOp {
    pub(crate) fn new(operand: Pattern, min: usize, max: usize, scope: &Scope) -> Self {
        Self {
            collector: Collector::for_operand(&operand),
            operand,
            min,
            max,
            scope: scope.clone(),
            started: false,
            entry: None,
            current: None,
            count: 0,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if !self.started {
            self.started = true;
            if self.min > 0 {
                self.entry = Some(src.mark());
            }
        }
        loop {
            if self.max != 0 && self.count == self.max {
                return self.succeed(src);
            }
            let (op, mark) = match &mut self.current {
                Some((op, mark)) => (op, *mark),
                None => {
                    let mark = src.mark();
                    let op = Box::new(Operation::new(&self.operand, &self.scope));
                    let (op, _) = self.current.insert((op, mark));
                    (op, mark)
                }
            };
            match op.feed(src) {
                Status::Partial => return Status::Partial,
                Status::Success => {
                    self.collector.push(op.take_value());
                    self.current = None;
                    self.count += 1;
                    let progressed = src.offset() > mark.index();
                    src.commit(mark);
                    if !progressed {
                        return self.succeed(src);
                    }
                }
                Status::Failure => {
                    self.current = None;
                    src.rollback(mark);
                    if self.count >= self.min {
                        return self.succeed(src);
                    }
                    if let Some(entry) = self.entry.take() {
                        src.rollback(entry);
                    }
                    return Status::Failure;
                }
            }
        }
    }

    fn succeed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if let Some(entry) = self.entry.take() {
            src.commit(entry);
        }
        Status::Success
    }

    pub(crate) fn take_value(&mut self) -> Value {
        self.collector.finish()
    }
}

/// Alternates between operand and separator, starting and ending on the
/// operand.
///
/// One checkpoint is held at a time: before the first operand, then before
/// each separator until the operand after it has matched. Whichever step
/// fails rolls back to it and the list ends with what it has.
pub(crate) struct ListOp {
    operand: Pattern,
    separator: Pattern,
    scope: Scope,
    mark: Option<Checkpoint>,
    current: Option<Box<Operation>>,
    on_separator: bool,
    count: usize,
    collector: Collector,
}

impl ListOp {
    pub(crate) fn new(operand: Pattern, separator: Pattern, scope: &Scope) -> Self {
        Self {
            collector: Collector::for_operand(&operand),
            operand,
            separator,
            scope: scope.clone(),
            mark: None,
            current: None,
            on_separator: false,
            count: 0,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        loop {
            let mark = *self.mark.get_or_insert_with(|| src.mark());
            let op = match &mut self.current {
                Some(op) => op,
                None => {
                    let pattern = if self.on_separator {
                        &self.separator
                    } else {
                        &self.operand
                    };
                    self.current.insert(Box::new(Operation::new(pattern, &self.scope)))
                }
            };
            match op.feed(src) {
                Status::Partial => return Status::Partial,
                Status::Failure => {
                    self.current = None;
                    self.mark = None;
                    src.rollback(mark);
                    return Status::Success;
                }
                Status::Success if self.on_separator => {
                    self.current = None;
                    self.on_separator = false;
                }
                Status::Success => {
                    self.collector.push(op.take_value());
                    self.current = None;
                    self.mark = None;
                    self.count += 1;
                    let progressed = src.offset() > mark.index();
                    src.commit(mark);
                    if self.count > 1 && !progressed {
                        return Status::Success;
                    }
                    self.on_separator = true;
                }
            }
        }
    }

    pub(crate) fn take_value(&mut self) -> Value {
        self.collector.finish()
    }
}
