/// Outcome of one consume step of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The pattern matched; its value is ready.
    Success,
    /// The pattern definitively does not match at the current position.
    Failure,
    /// Not enough data yet; feed more input and retry.
    Partial,
}

impl Status {
    /// Returns true for `Success` and `Failure`.
    pub fn is_done(self) -> bool {
        !matches!(self, Status::Partial)
    }

    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}
