//! Table view state.

use std::fmt;

use log::debug;
use log::trace;

use crate::model::RowKey;
use crate::model::Value;

use super::column::Column;
use super::column::find_column;
use super::config::TableConfig;
use super::events::TableEvent;
use super::page::PageState;
use super::render::Cell;
use super::render::CellContext;
use super::render::CellRegistry;
use super::render::CellRenderer;
use super::row::TableRow;
use super::selection::Selection;
use super::sort::SortDirection;
use super::sort::SortState;
use super::sort::sorted_indices;

/// Extracts the identity of a row.
pub type IdentityFn<T> = Box<dyn Fn(&T) -> Option<RowKey>>;

/// How a table reads row identity.
enum Identity<T> {
    /// Resolve a field path and convert the value.
    Key(String),
    /// A caller-supplied extractor.
    Custom(IdentityFn<T>),
}

impl<T: TableRow> Identity<T> {
    fn key_of(&self, row: &T) -> Option<RowKey> {
        match self {
            Identity::Key(path) => row.value(path).and_then(|v| RowKey::from_value(&v)),
            Identity::Custom(extract) => extract(row),
        }
    }
}

/// Where a row click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Plain row content.
    Row,
    /// An interactive control inside the row (button, link, input, label).
    Control,
}

/// One row of the current page, as a host draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a, T> {
    /// 0-based position in the sorted collection.
    pub index: usize,
    /// The row.
    pub row: &'a T,
    /// The row identity, if it has one.
    pub key: Option<RowKey>,
    /// Whether the row is in the selection ledger.
    pub selected: bool,
}

/// A sorted, paginated, selectable view over a borrowed collection.
///
/// `TableView` owns the sort state, page state and selection ledger; the rows
/// are borrowed and never reordered in place. Operations that change state
/// queue [`TableEvent`]s which the host drains after each interaction.
///
/// `O` is the output type of custom cell renderers.
///
/// # Example
///
/// ```
/// use tabview::model::Record;
/// use tabview::table::{Column, TableView};
///
/// let rows = vec![
///     Record::new().set("id", 1i64).set("name", "B"),
///     Record::new().set("id", 2i64).set("name", "A"),
/// ];
/// let mut table: TableView<'_, Record> =
///     TableView::new(&rows, vec![Column::new("name", "Name").sortable()]);
///
/// table.toggle_sort("name");
/// let names: Vec<_> = table.page_rows().iter().map(|r| r.get_string("name").unwrap()).collect();
/// assert_eq!(names, vec![Some("A"), Some("B")]);
/// ```
pub struct TableView<'a, T, O = String> {
    data: &'a [T],
    columns: Vec<Column<T>>,
    renderers: CellRegistry<T, O>,
    config: TableConfig,
    identity: Identity<T>,
    sort: SortState,
    page: PageState,
    page_size_options: Vec<usize>,
    selection: Selection,
    /// Sorted permutation of `data`, rebuilt on data or sort changes.
    order: Vec<usize>,
    events: Vec<TableEvent<'a, T>>,
}

impl<'a, T: TableRow, O> TableView<'a, T, O> {
    /// Create a table with the default configuration.
    pub fn new(data: &'a [T], columns: Vec<Column<T>>) -> Self {
        Self::with_config(data, columns, TableConfig::default())
    }

    /// Create a table with an explicit configuration.
    ///
    /// The page size is clamped to at least one row, and identity is read
    /// from `config.row_id_key` until [`with_identity`](Self::with_identity)
    /// replaces it.
    pub fn with_config(data: &'a [T], columns: Vec<Column<T>>, config: TableConfig) -> Self {
        let page = PageState::new(config.page_size);
        let page_size_options = config.normalized_page_size_options(page.page_size());
        let identity = Identity::Key(config.row_id_key.clone());
        Self {
            data,
            columns,
            renderers: CellRegistry::new(),
            config,
            identity,
            sort: SortState::none(),
            page,
            page_size_options,
            selection: Selection::new(),
            order: (0..data.len()).collect(),
            events: Vec::new(),
        }
    }

    /// Replace the identity extractor.
    pub fn with_identity<F>(mut self, identity: F) -> Self
    where
        F: Fn(&T) -> Option<RowKey> + 'static,
    {
        self.identity = Identity::Custom(Box::new(identity));
        self
    }

    /// Register a cell renderer for a column (builder form).
    pub fn with_renderer<F>(mut self, key: impl Into<String>, render: F) -> Self
    where
        F: Fn(&CellContext<'_, T>) -> O + 'static,
    {
        self.renderers.register_fn(key, render);
        self
    }

    // -------------------------------------------------------------------------
    // Data and columns
    // -------------------------------------------------------------------------

    /// The borrowed collection, in input order.
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Replace the collection.
    ///
    /// The selection ledger is kept: identities missing from the new data
    /// stay selected but are no longer reported. The current page is
    /// re-clamped to the new page count.
    pub fn set_data(&mut self, data: &'a [T]) {
        self.data = data;
        self.resort();
        let page = self.page.clamp(data.len());
        debug!("Table data replaced: {} rows, page {}", data.len(), page);
    }

    /// The column definitions.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Find a column by key (first match on duplicate keys).
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        find_column(&self.columns, key)
    }

    /// The active configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Whether rows are selectable.
    pub fn is_selectable(&self) -> bool {
        self.config.selectable
    }

    /// Read the value displayed in column `key` for `row`.
    ///
    /// Uses the column's accessor when it has one, otherwise resolves `key`
    /// as a path. Nulls come back as `None`.
    pub fn value_of(&self, row: &T, key: &str) -> Option<Value> {
        match self.column(key) {
            Some(column) => column.extract(row),
            None => row.value(key).filter(|v| !v.is_null()),
        }
    }

    // -------------------------------------------------------------------------
    // Cell rendering
    // -------------------------------------------------------------------------

    /// Register a renderer for a column. Returns `true` if one was replaced.
    pub fn register_renderer<R>(&mut self, key: impl Into<String>, renderer: R) -> bool
    where
        R: CellRenderer<T, O> + 'static,
    {
        self.renderers.register(key, renderer)
    }

    /// Remove the renderer for a column.
    pub fn unregister_renderer(&mut self, key: &str) -> bool {
        self.renderers.unregister(key)
    }

    /// Look up the renderer registered for a column.
    pub fn renderer(&self, key: &str) -> Option<&dyn CellRenderer<T, O>> {
        self.renderers.get(key)
    }

    /// The renderer registry.
    pub fn renderers(&self) -> &CellRegistry<T, O> {
        &self.renderers
    }

    /// Resolve the cell for `row` in column `key`.
    pub fn render_cell(&self, row: &T, key: &str) -> Cell<O> {
        let value = self.value_of(row, key);
        let cx = CellContext {
            row,
            key,
            value: value.as_ref(),
            selected: self.is_selected(row),
        };
        self.renderers.resolve(&cx)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Direction shown on the header of column `key`.
    pub fn sort_direction_for(&self, key: &str) -> SortDirection {
        self.sort.direction_for(key)
    }

    /// Activate the header of column `key`.
    ///
    /// Sortable columns cycle none → ascending → descending → none; a
    /// different column starts ascending. The page resets to 1. Unknown and
    /// non-sortable columns are ignored and `None` is returned.
    pub fn toggle_sort(&mut self, key: &str) -> Option<SortState> {
        if !self.column(key).is_some_and(|c| c.sortable) {
            trace!("Ignoring sort on non-sortable column '{}'", key);
            return None;
        }
        let next = self.sort.cycled(key);
        Some(self.apply_sort(next))
    }

    /// Set the sort directly. Unknown and non-sortable columns are ignored,
    /// except that `SortDirection::None` always clears the sort.
    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> Option<SortState> {
        if direction != SortDirection::None && !self.column(key).is_some_and(|c| c.sortable) {
            return None;
        }
        Some(self.apply_sort(SortState::new(key, direction)))
    }

    /// Clear the sort, restoring input order.
    pub fn clear_sort(&mut self) -> SortState {
        self.apply_sort(SortState::none())
    }

    fn apply_sort(&mut self, state: SortState) -> SortState {
        self.sort = state;
        self.page.reset();
        self.resort();
        debug!(
            "Table sort changed: key={:?} direction={:?}",
            self.sort.key(),
            self.sort.direction()
        );
        self.events.push(TableEvent::SortChanged(self.sort.clone()));
        self.sort.clone()
    }

    fn resort(&mut self) {
        let direction = self.sort.direction();
        self.order = match self.sort.key() {
            Some(key) => {
                let column = find_column(&self.columns, key);
                sorted_indices(
                    self.data,
                    |row| match column {
                        Some(column) => column.extract(row),
                        None => row.value(key),
                    },
                    direction,
                )
            }
            None => (0..self.data.len()).collect(),
        };
        trace!("Table order rebuilt for {} rows", self.order.len());
    }

    /// All rows in sorted order.
    pub fn sorted(&self) -> Vec<&'a T> {
        let data = self.data;
        self.order.iter().map(|&i| &data[i]).collect()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Rows on the current page, in sorted order.
    pub fn page_rows(&self) -> Vec<&'a T> {
        let data = self.data;
        self.order[self.page.range(self.order.len())]
            .iter()
            .map(|&i| &data[i])
            .collect()
    }

    /// Rows on the current page with their position, identity and
    /// selection state.
    pub fn visible_rows(&self) -> Vec<RowView<'a, T>> {
        let data = self.data;
        let range = self.page.range(self.order.len());
        let start = range.start;
        self.order[range]
            .iter()
            .enumerate()
            .map(|(offset, &i)| {
                let row = &data[i];
                let key = self.identity.key_of(row);
                let selected = key.as_ref().is_some_and(|k| self.selection.is_selected(k));
                RowView {
                    index: start + offset,
                    row,
                    key,
                    selected,
                }
            })
            .collect()
    }

    /// Total row count. The table does not filter, so this is the
    /// collection length.
    pub fn total(&self) -> usize {
        self.data.len()
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.total())
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    /// Page size choices for a picker, always including the active size.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// The page state.
    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    /// 1-based position of the first row shown, 0 when there are no rows.
    pub fn from_index(&self) -> usize {
        self.page.from_index(self.total())
    }

    /// 1-based position of the last row shown.
    pub fn to_index(&self) -> usize {
        self.page.to_index(self.total())
    }

    /// Go to `page`, clamped into `[1, total_pages]`. Returns the page shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        let total = self.total();
        let current = self.page.set_page(page, total);
        if current != page {
            debug!("Page {} clamped to {}", page, current);
        }
        self.events.push(TableEvent::PageChanged(self.page.change()));
        current
    }

    /// Change the page size (at least 1) and return to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
        self.page_size_options = self
            .config
            .normalized_page_size_options(self.page.page_size());
        debug!("Table page size set to {}", self.page.page_size());
        self.events.push(TableEvent::PageChanged(self.page.change()));
    }

    /// Go to the next page, staying on the last one.
    pub fn next_page(&mut self) -> usize {
        self.set_page(self.current_page().saturating_add(1))
    }

    /// Go to the previous page, staying on the first one.
    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.current_page().saturating_sub(1))
    }

    /// Go to the first page.
    pub fn first_page(&mut self) -> usize {
        self.set_page(1)
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> usize {
        self.set_page(self.total_pages())
    }

    /// Whether a page follows the current one.
    pub fn has_next_page(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// Whether a page precedes the current one.
    pub fn has_prev_page(&self) -> bool {
        self.current_page() > 1
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The identity of a row.
    pub fn row_key(&self, row: &T) -> Option<RowKey> {
        self.identity.key_of(row)
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, row: &T) -> bool {
        self.row_key(row)
            .is_some_and(|key| self.selection.is_selected(&key))
    }

    /// Select or deselect a row.
    ///
    /// Rows without an identity are ignored and `false` is returned.
    /// Otherwise the full selected subset is reported.
    pub fn toggle_row(&mut self, row: &T, checked: bool) -> bool {
        let Some(key) = self.row_key(row) else {
            trace!("Ignoring selection toggle on row without identity");
            return false;
        };
        if self.selection.set(key.clone(), checked) {
            debug!("Row {} {}", key, if checked { "selected" } else { "deselected" });
        }
        self.push_selection_event();
        true
    }

    /// Whether every row on the current page is selected. True for an
    /// empty page.
    pub fn all_visible_selected(&self) -> bool {
        self.page_rows().into_iter().all(|row| self.is_selected(row))
    }

    /// Select or deselect every row on the current page. Other pages are
    /// untouched.
    pub fn toggle_all_visible(&mut self, checked: bool) {
        let keys: Vec<RowKey> = self
            .page_rows()
            .into_iter()
            .filter_map(|row| self.row_key(row))
            .collect();
        let changed = self.selection.set_all(keys, checked);
        debug!(
            "Page {} {}: {} rows changed",
            self.current_page(),
            if checked { "selected" } else { "deselected" },
            changed
        );
        self.push_selection_event();
    }

    /// Handle a click on a row.
    ///
    /// Toggles the row when the table is selectable, row clicks toggle
    /// selection, and the click did not land on an interactive control.
    /// Returns `true` if the row was toggled.
    pub fn on_row_click(&mut self, row: &T, target: ClickTarget) -> bool {
        if !self.config.selectable
            || !self.config.row_click_toggles_selection
            || target == ClickTarget::Control
        {
            return false;
        }
        let checked = !self.is_selected(row);
        self.toggle_row(row, checked)
    }

    /// Clear the selection ledger, including identities no longer present
    /// in the data. Returns the keys that were deselected.
    pub fn clear_selection(&mut self) -> Vec<RowKey> {
        let mut removed = self.selection.clear();
        removed.sort();
        if !removed.is_empty() {
            debug!("Selection cleared: {} rows", removed.len());
            self.push_selection_event();
        }
        removed
    }

    /// The selected rows of the current collection, in collection order.
    pub fn selected_rows(&self) -> Vec<&'a T> {
        let data = self.data;
        data.iter().filter(|row| self.is_selected(row)).collect()
    }

    /// Every key in the ledger, sorted. May include identities that are
    /// not in the current collection.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.selection.keys()
    }

    /// The selection ledger.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn push_selection_event(&mut self) {
        let rows = self.selected_rows();
        self.events.push(TableEvent::SelectionChanged(rows));
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<TableEvent<'a, T>> {
        std::mem::take(&mut self.events)
    }

    /// Queued events not yet drained.
    pub fn pending_events(&self) -> &[TableEvent<'a, T>] {
        &self.events
    }
}

impl<T, O> fmt::Debug for TableView<'_, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("renderers", &self.renderers)
            .field("config", &self.config)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("selection", &self.selection)
            .field("pending_events", &self.events.len())
            .finish()
    }
}
