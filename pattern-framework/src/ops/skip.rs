use super::{Operation, Scope};
use crate::pattern::Pattern;
use crate::status::Status;
use source_framework::{Checkpoint, Source};

/// Drains the ambient skipper ahead of a token read.
///
/// The skip pattern is matched repeatedly, each match committed, until it
/// fails (rolled back) or matches without consuming anything. Skipping never
/// fails; it reports `Partial` while it cannot yet tell whether more noise
/// follows.
pub(crate) struct Skip {
    skipper: Option<Pattern>,
    active: Option<(Box<Operation>, Checkpoint)>,
    done: bool,
}

impl Skip {
    pub(crate) fn new(scope: &Scope) -> Self {
        Self {
            skipper: scope.skipper().cloned(),
            active: None,
            done: false,
        }
    }

    pub(crate) fn run<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if self.done {
            return Status::Success;
        }
        let skipper = match &self.skipper {
            Some(skipper) => skipper,
            None => {
                self.done = true;
                return Status::Success;
            }
        };
        loop {
            let (op, mark) = match &mut self.active {
                Some((op, mark)) => (op, *mark),
                None => {
                    let mark = src.mark();
                    // The skipper itself runs without a skipper.
                    let op = Box::new(Operation::new(skipper, &Scope::default()));
                    let (op, _) = self.active.insert((op, mark));
                    (op, mark)
                }
            };
            match op.feed(src) {
                Status::Partial => return Status::Partial,
                Status::Success => {
                    self.active = None;
                    let progressed = src.offset() > mark.index();
                    src.commit(mark);
                    if !progressed {
                        self.done = true;
                        return Status::Success;
                    }
                }
                Status::Failure => {
                    self.active = None;
                    src.rollback(mark);
                    self.done = true;
                    return Status::Success;
                }
            }
        }
    }
}
