//! Sort stage: sort state, value comparison and the stable row ordering.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::model::Value;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Unsorted, rows keep input order.
    #[default]
    None,
    /// Ascending order (A-Z, 0-9, oldest first).
    Ascending,
    /// Descending order (Z-A, 9-0, newest first).
    Descending,
}

impl SortDirection {
    /// The next direction when the same column header is activated again.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }

    /// Apply the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Descending => ordering.reverse(),
            SortDirection::Ascending => ordering,
            SortDirection::None => Ordering::Equal,
        }
    }
}

/// Current sort of a table.
///
/// The key is present exactly when the direction is not
/// [`SortDirection::None`]; the constructors and deserialization keep that
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SortStateRepr")]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

/// Wire form of [`SortState`], normalized through [`SortState::new`].
#[derive(Default, Deserialize)]
#[serde(default)]
struct SortStateRepr {
    key: Option<String>,
    direction: SortDirection,
}

impl From<SortStateRepr> for SortState {
    fn from(repr: SortStateRepr) -> Self {
        match repr.key {
            Some(key) => SortState::new(key, repr.direction),
            None => SortState::none(),
        }
    }
}

impl SortState {
    /// No sort.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sort by `key` ascending.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Sort by `key` descending.
    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Sort by `key` in `direction`. A `None` direction drops the key.
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        match direction {
            SortDirection::None => Self::none(),
            _ => Self {
                key: Some(key.into()),
                direction,
            },
        }
    }

    /// The sorted column key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Returns `true` when a column is sorted.
    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Direction applied to `key`: the current direction if `key` is the
    /// sorted column, otherwise `None`.
    pub fn direction_for(&self, key: &str) -> SortDirection {
        if self.key.as_deref() == Some(key) {
            self.direction
        } else {
            SortDirection::None
        }
    }

    /// The state after activating the header of column `key`.
    ///
    /// A different column starts ascending; the same column cycles
    /// ascending → descending → none.
    pub fn cycled(&self, key: &str) -> Self {
        if self.key.as_deref() == Some(key) {
            Self::new(key, self.direction.next())
        } else {
            Self::ascending(key)
        }
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Pre-computed comparison key for one row.
///
/// Extracting numbers, instants and string coercions once per row keeps the
/// comparator cheap and free of repeated date parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    number: Option<f64>,
    instant: Option<f64>,
    text: String,
}

impl SortKey {
    /// Build the key for a value. Nulls have no key.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        Some(Self {
            number: value.as_f64(),
            instant: value.as_instant_millis(),
            text: value.to_string(),
        })
    }

    /// Ascending comparison of two present keys.
    ///
    /// Numbers compare numerically, then calendar instants, then strings by
    /// [`collate`].
    pub fn compare(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.number, other.number) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        if let (Some(a), Some(b)) = (self.instant, other.instant) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        collate(&self.text, &other.text)
    }
}

/// Compare two optional keys in `direction`.
///
/// Absent values are the low end: first when ascending, last when
/// descending.
pub fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, direction: SortDirection) -> Ordering {
    let ascending = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    };
    direction.apply(ascending)
}

/// Compare two optional values in `direction` with the table's rules.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = a.and_then(SortKey::from_value);
    let b = b.and_then(SortKey::from_value);
    compare_keys(a.as_ref(), b.as_ref(), direction)
}

/// Locale-style string collation.
///
/// Strings compare on base letters first, ignoring case and accents, so
/// `"Ángel" < "Bruno" < "élan"`. Ties are broken by accents (unaccented
/// first), then by case: lowercase sorts before uppercase at the first
/// differing position, so `"apple" < "Apple" < "banana"`.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = base_letters(a).cmp(base_letters(b));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a
        .nfd()
        .flat_map(char::to_lowercase)
        .cmp(b.nfd().flat_map(char::to_lowercase));
    if secondary != Ordering::Equal {
        return secondary;
    }

    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }
    a.len().cmp(&b.len())
}

/// Lowercased letters with combining marks stripped.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
}

// =============================================================================
// Ordering rows
// =============================================================================

/// Compute the sorted permutation of `rows`.
///
/// Returns indices into `rows`. With [`SortDirection::None`], or when no row
/// has a value, the identity permutation is returned. The ordering is stable.
pub fn sorted_indices<T, F>(rows: &[T], extract: F, direction: SortDirection) -> Vec<usize>
where
    F: Fn(&T) -> Option<Value>,
{
    let identity = || (0..rows.len()).collect::<Vec<_>>();
    if direction == SortDirection::None {
        return identity();
    }

    let mut keyed: Vec<(usize, Option<SortKey>)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (i, extract(row).as_ref().and_then(SortKey::from_value)))
        .collect();

    if keyed.iter().all(|(_, key)| key.is_none()) {
        return identity();
    }

    merge_sort_by(&mut keyed, |a, b| {
        compare_keys(a.1.as_ref(), b.1.as_ref(), direction)
    });
    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Runs shorter than this are sorted by insertion.
const INSERTION_RUN: usize = 16;

/// Stable merge sort.
///
/// The mixed number/date/string comparator is not a total order across
/// value kinds, and `slice::sort_by` may panic on such comparators. This
/// sort never panics, whatever the comparator returns.
fn merge_sort_by<T, F>(items: &mut Vec<T>, compare: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    for start in (0..len).step_by(INSERTION_RUN) {
        let end = (start + INSERTION_RUN).min(len);
        insertion_sort(&mut items[start..end], &compare);
    }

    let mut width = INSERTION_RUN;
    let mut buffer: Vec<T> = Vec::with_capacity(len);
    while width < len {
        let mut source: Vec<Option<T>> = items.drain(..).map(Some).collect();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                let take_right = match (&source[i], &source[j]) {
                    (Some(left), Some(right)) => compare(right, left) == Ordering::Less,
                    _ => false,
                };
                let slot = if take_right { &mut source[j] } else { &mut source[i] };
                if let Some(item) = slot.take() {
                    buffer.push(item);
                }
                if take_right {
                    j += 1;
                } else {
                    i += 1;
                }
            }
            buffer.extend(source[i..mid].iter_mut().filter_map(Option::take));
            buffer.extend(source[j..end].iter_mut().filter_map(Option::take));
            start = end;
        }
        items.append(&mut buffer);
        width *= 2;
    }
}

fn insertion_sort<T, F>(items: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j], &items[j - 1]) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: impl Into<Value>) -> Option<SortKey> {
        SortKey::from_value(&value.into())
    }

    #[test]
    fn test_direction_cycle() {
        assert_eq!(SortDirection::None.next(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.next(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.next(), SortDirection::None);
    }

    #[test]
    fn test_state_cycle_on_same_and_other_column() {
        let state = SortState::none().cycled("name");
        assert_eq!(state, SortState::ascending("name"));
        let state = state.cycled("name");
        assert_eq!(state, SortState::descending("name"));
        assert_eq!(state.cycled("age"), SortState::ascending("age"));
        let state = state.cycled("name");
        assert_eq!(state, SortState::none());
        assert_eq!(state.key(), None);
    }

    #[test]
    fn test_none_direction_drops_key() {
        let state = SortState::new("name", SortDirection::None);
        assert!(!state.is_active());
        assert_eq!(state.key(), None);
    }

    #[test]
    fn test_nulls_are_low() {
        let b = key("B");
        assert_eq!(
            compare_keys(None, b.as_ref(), SortDirection::Ascending),
            Ordering::Less
        );
        assert_eq!(
            compare_keys(None, b.as_ref(), SortDirection::Descending),
            Ordering::Greater
        );
        assert_eq!(
            compare_keys(None, None, SortDirection::Descending),
            Ordering::Equal
        );
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(
            compare_values(
                Some(&Value::Long(9)),
                Some(&Value::Float(10.5)),
                SortDirection::Ascending
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_dates_compare_as_instants() {
        let a = key("2024-02-01");
        let b = key("2023-12-31T23:00:00Z");
        assert_eq!(a.unwrap().compare(&b.unwrap()), Ordering::Greater);
    }

    #[test]
    fn test_numeric_strings_compare_as_text() {
        let a = key("10");
        let b = key("9");
        assert_eq!(a.unwrap().compare(&b.unwrap()), Ordering::Less);
    }

    #[test]
    fn test_booleans_compare_as_text() {
        assert_eq!(Value::Bool(true).as_instant_millis(), None);
        assert_eq!(
            compare_values(
                Some(&Value::Bool(true)),
                Some(&Value::Long(5)),
                SortDirection::Ascending
            ),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(
                Some(&Value::Bool(false)),
                Some(&Value::from("2024-01-01")),
                SortDirection::Ascending
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn test_collation() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("Apple", "apple"), Ordering::Greater);
        assert_eq!(collate("Apple", "Apples"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_collation_folds_accents() {
        let mut names = vec!["Zoe", "Ángel", "Bruno", "ñandú", "oso", "élan", "faro"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(
            names,
            vec!["Ángel", "Bruno", "élan", "faro", "ñandú", "oso", "Zoe"]
        );
        assert_eq!(collate("Ángel", "Bruno"), Ordering::Less);
    }

    #[test]
    fn test_collation_accent_breaks_ties() {
        assert_eq!(collate("cote", "côte"), Ordering::Less);
        assert_eq!(collate("élan", "Élan"), Ordering::Less);
        assert_eq!(collate("ñ", "n"), Ordering::Greater);
    }

    #[test]
    fn test_deserialize_normalizes_state() {
        let state: SortState =
            serde_json::from_str(r#"{"key":"x","direction":"none"}"#).unwrap();
        assert_eq!(state, SortState::none());
        assert!(!state.is_active());

        let state: SortState = serde_json::from_str(r#"{"direction":"ascending"}"#).unwrap();
        assert_eq!(state, SortState::none());

        let state: SortState =
            serde_json::from_str(r#"{"key":"name","direction":"descending"}"#).unwrap();
        assert_eq!(state, SortState::descending("name"));
    }

    #[test]
    fn test_merge_sort_is_stable_past_insertion_runs() {
        let mut items: Vec<(u8, usize)> = (0..100).map(|i| ((i % 3) as u8, i)).collect();
        merge_sort_by(&mut items, |a, b| a.0.cmp(&b.0));
        for pair in items.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.0 < b.0 || (a.0 == b.0 && a.1 < b.1));
        }
    }

    #[test]
    fn test_merge_sort_tolerates_inconsistent_comparator() {
        let mut items: Vec<usize> = (0..50).collect();
        merge_sort_by(&mut items, |a, b| {
            if (a + b) % 2 == 0 {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });
        let mut seen = items.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_sorted_indices_none_direction_is_identity() {
        let rows = vec![Value::from(3i64), Value::from(1i64)];
        let order = sorted_indices(&rows, |v| Some(v.clone()), SortDirection::None);
        assert_eq!(order, vec![0, 1]);
    }
}
