//! Notifications raised by a table to its host.
//!
//! Operations push events onto the table's queue; the host drains the queue
//! after each interaction with [`TableView::drain_events`](super::TableView::drain_events).

use super::page::PageChange;
use super::sort::SortState;

/// Identifies which kind of notification an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEventKind {
    /// Selection changed
    SelectionChange,
    /// Sort key or direction changed
    Sort,
    /// Page or page size changed
    Page,
}

/// A table notification.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<'a, T> {
    /// The full selected subset of the current collection, in collection
    /// order.
    SelectionChanged(Vec<&'a T>),
    /// The new sort state.
    SortChanged(SortState),
    /// The new page and page size.
    PageChanged(PageChange),
}

impl<T> TableEvent<'_, T> {
    /// Which kind of event this is.
    pub fn kind(&self) -> TableEventKind {
        match self {
            TableEvent::SelectionChanged(_) => TableEventKind::SelectionChange,
            TableEvent::SortChanged(_) => TableEventKind::Sort,
            TableEvent::PageChanged(_) => TableEventKind::Page,
        }
    }
}
