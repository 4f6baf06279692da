//! The dynamic row-value type.

use std::fmt;

/// A SQL value held in a row. Replaces the source's untyped scalar with a
/// closed tagged variant, coerced against a column's declared [`super::SqlType`]
/// at the single coercion entry point, [`Value::coerce_to`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Best-effort numeric view, used for arithmetic and ordering
    /// comparisons. `Null` has no numeric view.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.parse::<f64>().ok(),
            Value::Null => None,
        }
    }

    /// String view used by `LIKE` and string-coercible contexts.
    pub fn as_str_lossy(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Null => None,
        }
    }

    /// Coerce this value to the target SQL type, per spec: `INT` columns
    /// coerce integer-like values, everything else is treated as string.
    /// Returns `None` when the value cannot be coerced.
    pub fn coerce_to(&self, target: &super::SqlType) -> Option<Value> {
        match target {
            super::SqlType::Int => match self {
                Value::Int(n) => Some(Value::Int(*n)),
                Value::Float(f) if f.fract() == 0.0 => Some(Value::Int(*f as i64)),
                Value::Str(s) => s.trim().parse::<i64>().ok().map(Value::Int),
                Value::Null => Some(Value::Null),
                _ => None,
            },
            super::SqlType::Varchar(_) => match self {
                Value::Str(s) => Some(Value::Str(s.clone())),
                Value::Int(n) => Some(Value::Str(n.to_string())),
                Value::Float(f) => Some(Value::Str(f.to_string())),
                Value::Null => Some(Value::Null),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SqlType;

    #[test]
    fn coerces_numeric_string_to_int() {
        assert_eq!(
            Value::from("42").coerce_to(&SqlType::Int),
            Some(Value::Int(42))
        );
    }

    #[test]
    fn rejects_non_numeric_string_as_int() {
        assert_eq!(Value::from("abc").coerce_to(&SqlType::Int), None);
    }

    #[test]
    fn coerces_int_to_varchar() {
        assert_eq!(
            Value::Int(7).coerce_to(&SqlType::Varchar(None)),
            Some(Value::Str("7".into()))
        );
    }

    #[test]
    fn null_coerces_to_null_under_any_type() {
        assert_eq!(Value::Null.coerce_to(&SqlType::Int), Some(Value::Null));
        assert_eq!(
            Value::Null.coerce_to(&SqlType::Varchar(None)),
            Some(Value::Null)
        );
    }
}
