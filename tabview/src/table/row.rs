//! TableRow trait and implementations for the dynamic row types.

use crate::model::Record;
use crate::model::Value;
use crate::model::resolve_json_path;
use crate::model::resolve_path;

/// Trait for items that can be displayed as rows in a table.
///
/// The engine reads fields only through this trait: column keys, sort keys
/// and the default row identity are all resolved with [`TableRow::value`].
/// `Record`, `Value` and `serde_json::Value` resolve dotted paths. Typed rows
/// implement it by matching on the key, or return `None` and give every
/// column an accessor.
///
/// # Example
///
/// ```
/// use tabview::model::Value;
/// use tabview::table::TableRow;
///
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     fn value(&self, key: &str) -> Option<Value> {
///         match key {
///             "id" => Some(Value::from(self.id)),
///             "name" => Some(Value::from(self.name.as_str())),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Resolve a column key to a value. `None` means missing.
    fn value(&self, key: &str) -> Option<Value>;
}

impl TableRow for Record {
    fn value(&self, key: &str) -> Option<Value> {
        self.resolve(key).cloned()
    }
}

impl TableRow for Value {
    fn value(&self, key: &str) -> Option<Value> {
        resolve_path(self, key).cloned()
    }
}

impl TableRow for serde_json::Value {
    fn value(&self, key: &str) -> Option<Value> {
        resolve_json_path(self, key).map(Value::from)
    }
}

impl<R: TableRow + ?Sized> TableRow for Box<R> {
    fn value(&self, key: &str) -> Option<Value> {
        (**self).value(key)
    }
}
