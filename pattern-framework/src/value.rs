use crate::error::{Error, Result};

/// A value produced by a successful match.
///
/// Sequences produce `Tuple`s of the values of their non-silent children,
/// repetitions produce a `List` (or a `Str` for text-shaped operands).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// No value: an absent optional, or a pattern that produces nothing.
    #[default]
    Nil,
    Char(char),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Name of the variant, used in shape errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of a list or tuple.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Flattens the value into its elements: lists and tuples yield their
    /// items, `Nil` yields nothing, anything else yields itself.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Value::List(items) | Value::Tuple(items) => items,
            Value::Nil => Vec::new(),
            other => vec![other],
        }
    }

    /// Appends the textual content of a text-shaped value to `out`.
    /// Returns false if the value is not text-shaped.
    pub(crate) fn push_text(&self, out: &mut String) -> bool {
        match self {
            Value::Nil => true,
            Value::Char(c) => {
                out.push(*c);
                true
            }
            Value::Str(s) => {
                out.push_str(s);
                true
            }
            Value::List(items) | Value::Tuple(items) => items.iter().all(|item| item.push_text(out)),
            Value::Int(_) => false,
        }
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

/// Typed destination for a matched [`Value`].
///
/// This is the projection callers use to land a parse result into a
/// concrete Rust type: a single slot (`i64`, `char`), a collection
/// (`Vec<T>`, `String`) or a tuple matching a sequence's shape.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(expected: &'static str, found: &Value) -> Result<T> {
    Err(Error::ShapeMismatch {
        expected,
        found: found.kind(),
    })
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

/// The discarding destination: accepts anything.
impl FromValue for () {
    fn from_value(_: Value) -> Result<Self> {
        Ok(())
    }
}

macro_rules! int_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match &value {
                        Value::Int(v) => {
                            <$ty>::try_from(*v).or_else(|_| mismatch(stringify!($ty), &value))
                        }
                        other => mismatch(stringify!($ty), other),
                    }
                }
            }
        )*
    };
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Char(c) => Ok(c),
            other => mismatch("char", &other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        if let Value::Str(s) = value {
            return Ok(s);
        }
        let mut out = String::new();
        if value.push_text(&mut out) {
            Ok(out)
        } else {
            mismatch("String", &value)
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) | Value::Tuple(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            Value::Str(s) => s.chars().map(|c| T::from_value(Value::Char(c))).collect(),
            Value::Nil => Ok(Vec::new()),
            other => mismatch("Vec", &other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

macro_rules! tuple_from_value {
    ($len:expr; $($name:ident),+) => {
        impl<$($name: FromValue),+> FromValue for ($($name,)+) {
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Tuple(items) if items.len() == $len => {
                        let mut items = items.into_iter();
                        Ok(($(
                            match items.next() {
                                Some(item) => $name::from_value(item)?,
                                None => return Err(Error::ShapeMismatch {
                                    expected: concat!("tuple of ", stringify!($len)),
                                    found: "tuple",
                                }),
                            },
                        )+))
                    }
                    other => mismatch(concat!("tuple of ", stringify!($len)), &other),
                }
            }
        }
    };
}

tuple_from_value!(2; A, B);
tuple_from_value!(3; A, B, C);
tuple_from_value!(4; A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_text_shapes() {
        let value = Value::Tuple(vec![Value::Str("aaa".into()), Value::Char('-'), Value::Nil]);
        assert_eq!(String::from_value(value).unwrap(), "aaa-");
    }

    #[test]
    fn test_string_rejects_ints() {
        let err = String::from_value(Value::List(vec![Value::Int(1)])).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: "String",
                found: "list"
            }
        );
    }

    #[test]
    fn test_vec_from_str_splits_chars() {
        let chars: Vec<char> = FromValue::from_value(Value::Str("ab".into())).unwrap();
        assert_eq!(chars, vec!['a', 'b']);
    }

    #[test]
    fn test_tuple_arity_must_match() {
        let value = Value::Tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert!(<(i64, i64)>::from_value(value.clone()).is_err());
        assert_eq!(<(i64, i64, i64)>::from_value(value).unwrap(), (1, 2, 3));
    }

    #[test]
    fn test_int_range_checked() {
        assert!(u8::from_value(Value::Int(300)).is_err());
        assert_eq!(i32::from_value(Value::Int(-7)).unwrap(), -7);
        assert_eq!(Option::<i32>::from_value(Value::Nil).unwrap(), None);
    }
}
