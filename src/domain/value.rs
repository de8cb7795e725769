//! Dynamically-typed context values with explicit numeric subtypes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Runtime numeric subtype of a context value.
///
/// Arithmetic actions compute in `f64` and write the result back in the
/// field's original kind, so downstream consumers keep seeing the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Int32,
    Int64,
    Float32,
    Float64,
}

impl NumericKind {
    /// Cast a double-precision result back into this kind.
    ///
    /// Integer kinds truncate toward zero and saturate at their bounds (NaN becomes 0).
    pub fn cast(self, value: f64) -> Value {
        match self {
            NumericKind::Int32 => Value::Int(value as i32),
            NumericKind::Int64 => Value::Long(value as i64),
            NumericKind::Float32 => Value::Float(value as f32),
            NumericKind::Float64 => Value::Double(value),
        }
    }
}

/// A single context value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("unsupported context value: {0}")]
    Unsupported(&'static str),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric subtype, or `None` for non-numeric values.
    pub fn numeric_kind(&self) -> Option<NumericKind> {
        match self {
            Value::Int(_) => Some(NumericKind::Int32),
            Value::Long(_) => Some(NumericKind::Int64),
            Value::Float(_) => Some(NumericKind::Float32),
            Value::Double(_) => Some(NumericKind::Float64),
            _ => None,
        }
    }

    /// Widen a numeric value to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(f64::from(v)),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(f64::from(v)),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Render the value as text, the form conditions compare against.
    ///
    /// Floating values always carry a fractional part (`100.0`) and switch to
    /// `1.0E7` notation outside `[1e-3, 1e7)`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Float(v) => format_floating(*v),
            Value::Double(v) => format_floating(*v),
            Value::String(s) => s.clone(),
        }
    }
}

/// Parse numeric rule text (condition values, action operands).
///
/// Accepts signed decimal and exponent notation with surrounding whitespace, plus the
/// exact spellings `NaN`, `Infinity`, `+Infinity` and `-Infinity`. Other words such as
/// `inf` or `nan` are not numbers.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    match text {
        "NaN" => Some(f64::NAN),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ if text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            text.parse::<f64>().ok()
        }
        _ => None,
    }
}

/// Parse boolean rule text: `true` in any letter case, everything else is `false`.
pub fn parse_bool(text: &str) -> bool {
    text.eq_ignore_ascii_case("true")
}

/// Whether `text` is one of the two boolean spellings [`parse_bool`] distinguishes.
pub fn is_bool_text(text: &str) -> bool {
    text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false")
}

fn format_floating<T>(value: T) -> String
where
    T: Copy + fmt::Display + fmt::LowerExp + Into<f64>,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        return "NaN".to_string();
    }
    if wide.is_infinite() {
        return if wide > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = wide.abs();
    if abs == 0.0 || (1e-3..1e7).contains(&abs) {
        let plain = format!("{}", value);
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let scientific = format!("{:e}", value);
        match scientific.split_once('e') {
            Some((mantissa, exp)) if mantissa.contains('.') => format!("{}E{}", mantissa, exp),
            Some((mantissa, exp)) => format!("{}.0E{}", mantissa, exp),
            None => scientific,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i32::try_from(i).map(Value::Int).unwrap_or(Value::Long(i)))
                } else {
                    n.as_f64()
                        .map(Value::Double)
                        .ok_or(ValueError::Unsupported("number"))
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(_) => Err(ValueError::Unsupported("array")),
            serde_json::Value::Object(_) => Err(ValueError::Unsupported("object")),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(v) => serde_json::Value::from(v),
            Value::Long(v) => serde_json::Value::from(v),
            // Go through the shortest f32 text so 1.1f32 stays 1.1 rather than 1.100000023841858.
            Value::Float(v) => v
                .to_string()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Double(v) => serde_json::Number::from_f64(v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
