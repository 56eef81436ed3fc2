//! Row identity keys

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;

/// The identity of a row, used by the selection ledger.
///
/// Keys of different kinds never compare equal: the integer `1` and the
/// string `"1"` identify different rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    /// Integer identity.
    Int(i64),
    /// GUID identity.
    Guid(Uuid),
    /// Textual identity.
    Text(String),
}

impl RowKey {
    /// Derives a key from a field value.
    ///
    /// Integral numbers become [`RowKey::Int`]; other scalars use their string
    /// coercion. Null, lists and records cannot identify a row.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::List(_) | Value::Record(_) => None,
            Value::Int(n) => Some(RowKey::Int(i64::from(*n))),
            Value::Long(n) => Some(RowKey::Int(*n)),
            Value::Float(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                Some(RowKey::Int(*n as i64))
            }
            Value::Decimal(d) if d.fract().is_zero() => Some(
                i64::try_from(*d).map_or_else(|_| RowKey::Text(d.to_string()), RowKey::Int),
            ),
            Value::Guid(g) => Some(RowKey::Guid(*g)),
            Value::String(s) => Some(RowKey::Text(s.clone())),
            other => Some(RowKey::Text(other.to_string())),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(n) => write!(f, "{}", n),
            RowKey::Guid(g) => write!(f, "{}", g),
            RowKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}

impl From<i32> for RowKey {
    fn from(v: i32) -> Self {
        RowKey::Int(i64::from(v))
    }
}

impl From<u32> for RowKey {
    fn from(v: u32) -> Self {
        RowKey::Int(i64::from(v))
    }
}

impl From<Uuid> for RowKey {
    fn from(v: Uuid) -> Self {
        RowKey::Guid(v)
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Text(v)
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_numeric_keys_collapse_to_int() {
        assert_eq!(RowKey::from_value(&Value::Int(3)), Some(RowKey::Int(3)));
        assert_eq!(RowKey::from_value(&Value::Long(3)), Some(RowKey::Int(3)));
        assert_eq!(RowKey::from_value(&Value::Float(3.0)), Some(RowKey::Int(3)));
        assert_eq!(
            RowKey::from_value(&Value::Decimal(Decimal::new(300, 2))),
            Some(RowKey::Int(3))
        );
        assert_eq!(
            RowKey::from_value(&Value::Float(2.5)),
            Some(RowKey::Text("2.5".into()))
        );
    }

    #[test]
    fn test_text_and_int_keys_differ() {
        assert_ne!(
            RowKey::from_value(&Value::from("1")),
            RowKey::from_value(&Value::Long(1))
        );
    }

    #[test]
    fn test_structured_values_are_not_keys() {
        assert_eq!(RowKey::from_value(&Value::Null), None);
        assert_eq!(RowKey::from_value(&Value::List(vec![])), None);
        assert_eq!(RowKey::from_value(&Value::from(crate::model::Record::new())), None);
    }
}
