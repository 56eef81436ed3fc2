//! Dotted-path resolution over dynamic values.
//!
//! A path is a `.`-separated list of segments. Each segment selects a field
//! of a record or, when it parses as an index, an item of a list. Resolution
//! stops with `None` at the first segment that cannot be followed, including
//! stepping into a null.

use super::Record;
use super::Value;

/// Resolves `path` against a value.
///
/// An empty path segment never matches, so `""` and `"a..b"` resolve to
/// `None`.
///
/// # Example
///
/// ```
/// use tabview::model::{Record, Value, resolve_path};
///
/// let row = Value::from(Record::new().set("user", Record::new().set("name", "Ada")));
/// assert_eq!(resolve_path(&row, "user.name"), Some(&Value::from("Ada")));
/// assert_eq!(resolve_path(&row, "user.email"), None);
/// ```
pub fn resolve_path<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(root, step)
}

/// Resolves `path` against a record's fields.
pub fn resolve_in_record<'v>(record: &'v Record, path: &str) -> Option<&'v Value> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let first = field(record, head)?;
    match rest {
        Some(rest) => rest.split('.').try_fold(first, step),
        None => Some(first),
    }
}

/// Resolves `path` against a JSON document without converting it first.
pub fn resolve_json_path<'v>(
    root: &'v serde_json::Value,
    path: &str,
) -> Option<&'v serde_json::Value> {
    path.split('.').try_fold(root, |current, segment| match current {
        serde_json::Value::Object(map) if !segment.is_empty() => map.get(segment),
        serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    })
}

fn step<'v>(current: &'v Value, segment: &str) -> Option<&'v Value> {
    match current {
        Value::Record(record) => field(record, segment),
        Value::List(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

fn field<'v>(record: &'v Record, segment: &str) -> Option<&'v Value> {
    if segment.is_empty() {
        return None;
    }
    record.get(segment)
}
