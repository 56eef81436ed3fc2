//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

use super::row::TableRow;

/// Horizontal alignment hint for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

/// Extracts a column value from a typed row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> Option<Value>>;

/// Column configuration.
///
/// A column is identified by its `key`, a dotted path into the row
/// (`"user.name"`). Rows whose fields are not reachable by path can attach an
/// accessor instead; the key then only names the column.
///
/// Width and alignment are display hints and never affect sorting or
/// pagination.
///
/// # Examples
///
/// ```
/// use tabview::table::{Alignment, Column};
/// use tabview::model::Record;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("id", "ID").width("80px"),
///     Column::new("user.name", "Name").sortable(),
///     Column::new("status", "Status").align(Alignment::Center),
/// ];
/// ```
pub struct Column<T> {
    /// Field path and column identity. Expected to be unique per table.
    pub key: String,
    /// Header label.
    pub header: String,
    /// Whether header interaction changes the sort.
    pub sortable: bool,
    /// Opaque width hint for the host.
    pub width: Option<String>,
    /// Alignment hint for the host.
    pub align: Alignment,
    accessor: Option<Accessor<T>>,
}

impl<T> Column<T> {
    /// Create a new, non-sortable column.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            width: None,
            align: Alignment::Start,
            accessor: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set the alignment hint.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Read the column value with a function instead of the key path.
    pub fn accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<Value> + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }
}

impl<T: TableRow> Column<T> {
    /// Extract this column's value from a row.
    ///
    /// Missing fields and explicit nulls both come back as `None`.
    pub fn extract(&self, row: &T) -> Option<Value> {
        let value = match &self.accessor {
            Some(accessor) => accessor(row),
            None => row.value(&self.key),
        };
        value.filter(|v| !v.is_null())
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            width: self.width.clone(),
            align: self.align,
            accessor: self.accessor.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("accessor", &self.accessor.is_some())
            .finish()
    }
}

/// Find a column by key. With duplicate keys the first column wins.
pub(crate) fn find_column<'c, T>(columns: &'c [Column<T>], key: &str) -> Option<&'c Column<T>> {
    columns.iter().find(|c| c.key == key)
}
