//! Cell resolution: per-column renderer registry and default cell text.

use std::collections::HashMap;
use std::fmt;

use crate::model::Value;

/// Everything a renderer gets to see about one cell.
#[derive(Debug)]
pub struct CellContext<'r, T> {
    /// The row being drawn.
    pub row: &'r T,
    /// Column key.
    pub key: &'r str,
    /// Extracted column value; `None` for missing or null.
    pub value: Option<&'r Value>,
    /// Whether the row is in the selection ledger.
    pub selected: bool,
}

impl<T> CellContext<'_, T> {
    /// The default text for this cell.
    pub fn text(&self) -> String {
        default_text(self.value)
    }
}

/// A caller-supplied rendering strategy for one column.
///
/// `O` is whatever the host draws with: a string, a widget tree, markup.
/// Any `Fn(&CellContext<T>) -> O` closure is a renderer.
pub trait CellRenderer<T, O> {
    /// Render one cell.
    fn render(&self, cx: &CellContext<'_, T>) -> O;
}

impl<T, O, F> CellRenderer<T, O> for F
where
    F: Fn(&CellContext<'_, T>) -> O,
{
    fn render(&self, cx: &CellContext<'_, T>) -> O {
        self(cx)
    }
}

/// A resolved cell: either custom output or the default text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell<O> {
    /// Output of a registered renderer.
    Custom(O),
    /// Default string coercion of the value.
    Text(String),
}

impl<O> Cell<O> {
    /// Returns `true` if a registered renderer produced this cell.
    pub fn is_custom(&self) -> bool {
        matches!(self, Cell::Custom(_))
    }

    /// The default text, if no renderer was registered.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Custom(_) => None,
        }
    }

    /// The custom output, if a renderer was registered.
    pub fn into_custom(self) -> Option<O> {
        match self {
            Cell::Custom(output) => Some(output),
            Cell::Text(_) => None,
        }
    }
}

impl<O: From<String>> Cell<O> {
    /// Collapse both cases into `O`.
    pub fn into_output(self) -> O {
        match self {
            Cell::Custom(output) => output,
            Cell::Text(text) => O::from(text),
        }
    }
}

/// Default cell text: the value's string coercion, empty for null/missing.
pub fn default_text(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}

/// Registry mapping column keys to renderers.
pub struct CellRegistry<T, O> {
    renderers: HashMap<String, Box<dyn CellRenderer<T, O>>>,
}

impl<T, O> CellRegistry<T, O> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Register a renderer for `key`, replacing any previous one.
    /// Returns `true` if a renderer was replaced.
    pub fn register<R>(&mut self, key: impl Into<String>, renderer: R) -> bool
    where
        R: CellRenderer<T, O> + 'static,
    {
        self.renderers
            .insert(key.into(), Box::new(renderer))
            .is_some()
    }

    /// Register a closure renderer for `key`.
    pub fn register_fn<F>(&mut self, key: impl Into<String>, render: F) -> bool
    where
        F: Fn(&CellContext<'_, T>) -> O + 'static,
    {
        self.register(key, render)
    }

    /// Remove the renderer for `key`. Returns `true` if one was registered.
    pub fn unregister(&mut self, key: &str) -> bool {
        self.renderers.remove(key).is_some()
    }

    /// Look up the renderer for `key`.
    pub fn get(&self, key: &str) -> Option<&dyn CellRenderer<T, O>> {
        self.renderers.get(key).map(|r| r.as_ref())
    }

    /// Returns `true` if a renderer is registered for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.renderers.contains_key(key)
    }

    /// Number of registered renderers.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Returns `true` if no renderer is registered.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Resolve a cell: the registered renderer's output, or default text.
    pub fn resolve(&self, cx: &CellContext<'_, T>) -> Cell<O> {
        match self.get(cx.key) {
            Some(renderer) => Cell::Custom(renderer.render(cx)),
            None => Cell::Text(cx.text()),
        }
    }
}

impl<T, O> Default for CellRegistry<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> fmt::Debug for CellRegistry<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.renderers.keys().collect();
        keys.sort();
        f.debug_struct("CellRegistry").field("keys", &keys).finish()
    }
}
