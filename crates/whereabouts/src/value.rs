//! Literal values carried by equality predicates.
//!
//! An equality predicate compares against either a string or a number.
//! [`Literal`] owns that value and knows whether it counts as "truthy",
//! which drives the default omission rule of the assembler.

use serde::{Serialize, Serializer};

/// Owned value of an `equals` predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
}

impl Literal {
    /// Returns `true` if the value is non-empty and non-zero.
    ///
    /// Empty strings, zero and NaN are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Literal::String(s) => !s.is_empty(),
            Literal::Number(n) => n.is_truthy(),
        }
    }

    /// Converts the value to JSON. Non-finite floats become `null`.
    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Literal::String(s) => serde_json::Value::from(s.as_str()),
            Literal::Number(Number::I64(n)) => serde_json::Value::from(*n),
            Literal::Number(Number::U64(n)) => serde_json::Value::from(*n),
            Literal::Number(Number::F64(n)) => serde_json::Value::from(*n),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Literal::String(s) => serializer.serialize_str(s),
            Literal::Number(n) => n.serialize(serializer),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Returns `true` unless the number is zero or NaN.
    pub fn is_truthy(self) -> bool {
        match self {
            Number::I64(n) => n != 0,
            Number::U64(n) => n != 0,
            Number::F64(n) => n != 0.0 && !n.is_nan(),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Number::I64(n) => serializer.serialize_i64(n),
            Number::U64(n) => serializer.serialize_u64(n),
            Number::F64(n) => serializer.serialize_f64(n),
        }
    }
}

// Conversions from primitive types
impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

// Conversions into Literal

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<&String> for Literal {
    fn from(s: &String) -> Self {
        Literal::String(s.clone())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<u32> for Literal {
    fn from(n: u32) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<u64> for Literal {
    fn from(n: u64) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<usize> for Literal {
    fn from(n: usize) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(Number::from(n))
    }
}
