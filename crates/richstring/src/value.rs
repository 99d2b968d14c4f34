//! Runtime values produced by member accessors.
//!
//! The [`Value`] enum is what a [`Reflect`] implementation hands back for a
//! member. It borrows from the object it was read from, so a value can never
//! outlive the object graph it came from.

use std::borrow::Cow;
use std::fmt;

use crate::access::{Reflect, RichFormat, Sequence};

/// Runtime value of a member, borrowed from its declaring object.
///
/// # Example
///
/// ```
/// use richstring::{Number, Value};
///
/// let name = Value::from("Sword");
/// assert_eq!(name.as_str(), Some("Sword"));
///
/// let damage = Value::Number(Number::I64(10));
/// assert_eq!(damage.as_number(), Some(Number::I64(10)));
/// ```
#[derive(Clone)]
pub enum Value<'a> {
    /// Text, borrowed when possible.
    Text(Cow<'a, str>),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// An object with members of its own.
    Object(&'a dyn Reflect),
    /// A sequence that can be indexed with a linear scan.
    Sequence(&'a dyn Sequence),
    /// A leaf value with its own normal and alternate forms.
    Custom(&'a dyn RichFormat),
    /// Absent or null.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this value can be indexed.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Extracts the text, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the object, if present.
    pub fn as_object(&self) -> Option<&'a dyn Reflect> {
        match self {
            Value::Object(o) => Some(*o),
            _ => None,
        }
    }

    /// Extracts the sequence, if present.
    pub fn as_sequence(&self) -> Option<&'a dyn Sequence> {
        match self {
            Value::Sequence(s) => Some(*s),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Number(_) => "a number",
            Value::Bool(_) => "a boolean",
            Value::Object(_) => "an object",
            Value::Sequence(_) => "a sequence",
            Value::Custom(_) => "a custom value",
            Value::None => "nothing",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Object(o) => f.debug_tuple("Object").field(&o.type_name()).finish(),
            Value::Sequence(s) => f.debug_tuple("Sequence").field(&s.display_text()).finish(),
            Value::Custom(c) => f.debug_tuple("Custom").field(&c.normal_form()).finish(),
            Value::None => f.write_str("None"),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Integers keep their signedness and floats keep their width, so an `f32`
/// prints with its own shortest representation (`0.1`, not the widened
/// `0.10000000149011612`). The [`Display`](fmt::Display) implementation
/// prints integral floats without a fractional part (`10.0` prints as `10`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 32-bit floating point.
    F32(f32),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F32(n) => n as f64,
            Number::F64(n) => n,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F32(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F32 as f32: f32);
number_from!(F64 as f64: f64);
