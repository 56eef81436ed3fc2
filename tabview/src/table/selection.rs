//! Selection ledger.
//!
//! Selection is tracked by row identity, not by position, so it survives
//! re-sorting, paging and replacement of the underlying collection.

use std::collections::HashSet;

use crate::model::RowKey;

/// Identity-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Currently selected keys
    selected: HashSet<RowKey>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    /// Select or deselect a key. Returns true if the ledger changed.
    pub fn set(&mut self, key: RowKey, checked: bool) -> bool {
        if checked {
            self.selected.insert(key)
        } else {
            self.selected.remove(&key)
        }
    }

    /// Apply `checked` to every key. Returns the number of keys that changed.
    pub fn set_all<I>(&mut self, keys: I, checked: bool) -> usize
    where
        I: IntoIterator<Item = RowKey>,
    {
        keys.into_iter()
            .filter(|key| self.set(key.clone(), checked))
            .count()
    }

    /// Get all selected keys (sorted for deterministic ordering).
    pub fn keys(&self) -> Vec<RowKey> {
        let mut keys: Vec<_> = self.selected.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<RowKey> {
        self.selected.drain().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_changes() {
        let mut selection = Selection::new();
        assert!(selection.set(RowKey::from(1), true));
        assert!(!selection.set(RowKey::from(1), true));
        assert!(selection.set(RowKey::from(1), false));
        assert!(!selection.set(RowKey::from(1), false));
    }

    #[test]
    fn test_set_all_counts_changes() {
        let mut selection = Selection::new();
        selection.set(RowKey::from(2), true);
        let changed = selection.set_all([1, 2, 3].map(RowKey::from), true);
        assert_eq!(changed, 2);
        assert_eq!(selection.keys(), [1, 2, 3].map(RowKey::from).to_vec());
    }

    #[test]
    fn test_clear_returns_removed() {
        let mut selection = Selection::new();
        selection.set(RowKey::from("a"), true);
        let mut removed = selection.clear();
        removed.sort();
        assert_eq!(removed, vec![RowKey::from("a")]);
        assert!(selection.is_empty());
    }
}
