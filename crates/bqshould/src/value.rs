//! Expected-value representation and its string coercion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar expected value.
///
/// Result cells are compared as strings, so every variant has a fixed
/// textual form (see the `Display` impl). The conversion to text happens
/// once, when the value is attached to a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL `NULL`, rendered as `NULL`.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Textual form used for comparison against result cells.
    pub fn to_cell_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // f64's Display drops the fractional part of integral values,
            // so 8399417.0 renders as "8399417".
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    match i64::try_from(v) {
                        Ok(i) => Value::Int(i),
                        Err(_) => Value::String(v.to_string()),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize, i128, u128);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        // Go through the f32 text so 0.1f32 stays "0.1" rather than
        // picking up widening noise.
        match v.to_string().parse::<f64>() {
            Ok(x) => Value::Float(x),
            Err(_) => Value::Float(f64::from(v)),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
