use super::{Scope, Skip};
use crate::pattern::IntSpec;
use crate::status::Status;
use crate::value::Value;
use source_framework::Source;

const MAGNITUDE_LIMIT: i128 = i64::MAX as i128 + 1;

/// Scans an integer digit by digit.
pub(crate) struct IntOp {
    spec: IntSpec,
    skip: Skip,
    negative: bool,
    sign_seen: bool,
    digits: usize,
    magnitude: i128,
    value: Option<i64>,
}

impl IntOp {
    pub(crate) fn new(spec: IntSpec, scope: &Scope) -> Self {
        Self {
            spec,
            skip: Skip::new(scope),
            negative: false,
            sign_seen: false,
            digits: 0,
            magnitude: 0,
            value: None,
        }
    }

    pub(crate) fn feed<S: Source + ?Sized>(&mut self, src: &mut S) -> Status {
        if let status @ Status::Partial = self.skip.run(src) {
            return status;
        }
        loop {
            if self.spec.max_digits != 0 && self.digits == self.spec.max_digits {
                return self.finish();
            }
            let c = match src.peek() {
                Some(c) => c,
                None if src.is_final() => return self.finish(),
                None => return Status::Partial,
            };
            if self.spec.signed && !self.sign_seen && self.digits == 0 && (c == '+' || c == '-')
            {
                self.sign_seen = true;
                self.negative = c == '-';
                src.advance();
                continue;
            }
            let digit = match c.to_digit(self.spec.base) {
                Some(digit) => digit,
                None => return self.finish(),
            };
            let magnitude = self.magnitude * i128::from(self.spec.base) + i128::from(digit);
            if magnitude > MAGNITUDE_LIMIT {
                return Status::Failure;
            }
            self.magnitude = magnitude;
            self.digits += 1;
            src.advance();
        }
    }

    fn finish(&mut self) -> Status {
        if self.digits < self.spec.min_digits || (self.digits == 0 && self.sign_seen) {
            return Status::Failure;
        }
        let signed = if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        };
        match i64::try_from(signed) {
            Ok(value) => {
                self.value = Some(value);
                Status::Success
            }
            Err(_) => Status::Failure,
        }
    }

    pub(crate) fn take_value(&mut self) -> Value {
        self.value.take().map_or(Value::Nil, Value::Int)
    }
}
