//! Dynamic table record

use std::collections::HashMap;

use super::Value;
use super::path;
use crate::error::FieldError;

/// A dynamic row of tabular data.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any field. Nested records and lists can be reached with dotted
/// paths through [`Record::resolve`].
///
/// # Example
///
/// ```
/// use tabview::model::Record;
///
/// let record = Record::new()
///     .set("id", 7i64)
///     .set("name", "Contoso");
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Resolves a dotted path such as `"user.name"` or `"tags.0"`.
    ///
    /// Returns `None` as soon as a segment is missing. An explicit null at
    /// the end of the path is returned as `Some(&Value::Null)`.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        path::resolve_in_record(self, path)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    // =========================================================================
    // Typed getters
    //
    // Err when the field is missing or holds another type; Ok(None) only for
    // an explicit null.
    // =========================================================================

    fn typed<'r, V>(
        &'r self,
        field: &str,
        expected: &'static str,
        pick: impl FnOnce(&'r Value) -> Option<V>,
    ) -> Result<Option<V>, FieldError> {
        let value = self.fields.get(field).ok_or_else(|| FieldError::missing(field))?;
        if value.is_null() {
            return Ok(None);
        }
        pick(value)
            .map(Some)
            .ok_or_else(|| FieldError::type_mismatch(field, expected, value.type_name()))
    }

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        self.typed(field, "string", Value::as_str)
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        self.typed(field, "bool", |v| match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Gets an integer field value, widening `Int`.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        self.typed(field, "long", |v| match v {
            Value::Long(n) => Some(*n),
            Value::Int(n) => Some(i64::from(*n)),
            _ => None,
        })
    }

    /// Gets a float field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        self.typed(field, "float", |v| match v {
            Value::Float(n) => Some(*n),
            _ => None,
        })
    }

    /// Gets a nested record.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        self.typed(field, "record", |v| match v {
            Value::Record(r) => Some(r.as_ref()),
            _ => None,
        })
    }

    /// Gets a list field value.
    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        self.typed(field, "list", |v| match v {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = Record::new()
            .set("id", 3i32)
            .set("name", "Ada")
            .set("note", Option::<&str>::None);

        assert_eq!(record.get_long("id"), Ok(Some(3)));
        assert_eq!(record.get_string("name"), Ok(Some("Ada")));
        assert_eq!(record.get_string("note"), Ok(None));
        assert_eq!(record.get_bool("note"), Ok(None));
    }

    #[test]
    fn test_missing_and_mismatch() {
        let record = Record::new().set("name", "Ada");

        let err = record.get_string("email").unwrap_err();
        assert_eq!(err, FieldError::missing("email"));
        assert_eq!(err.field(), "email");

        let err = record.get_long("name").unwrap_err();
        assert_eq!(err, FieldError::type_mismatch("name", "long", "string"));
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = [("a", 1i64), ("b", 2i64)].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert!(record.contains("b"));
        assert!(!record.is_empty());
        assert!(Record::new().is_empty());
        assert_eq!(record.get_long("a"), Ok(Some(1)));
    }
}
