//! Single-column sorting with a three-state toggle.
//!
//! Each [`SortEngine::request_sort`] call on the same key walks the cycle
//! `None -> Ascending -> Descending -> None`. Requesting a different key
//! always starts that key at `Ascending`.
//!
//! Sorting is stable in both directions. Descending uses the reversed
//! comparator rather than reversing the ascending output, so records with
//! equal keys keep their input order either way. Missing values sort last
//! when ascending and first when descending.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tablekit_model::{FieldValue, Record, compare_values};

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Arrow shown next to a sorted column header.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The active sort: one key and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ascending sort on `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Sort state machine plus the derived sorted view.
///
/// The engine never owns or mutates the collection; the derived view is a
/// vector of references into the caller's slice.
///
/// # Example
///
/// ```
/// use tablekit_model::{Record, Row};
/// use tablekit_table::SortEngine;
///
/// let rows = vec![
///     Row::new().with("name", "Bob"),
///     Row::new().with("name", "Alice"),
/// ];
/// let mut engine = SortEngine::new();
/// engine.request_sort("name");
///
/// let names: Vec<String> = engine
///     .sorted(&rows)
///     .iter()
///     .map(|row| row.field("name").display_string())
///     .collect();
/// assert_eq!(names, ["Alice", "Bob"]);
/// ```
#[derive(Debug, Clone)]
pub struct SortEngine {
    config: Option<SortConfig>,
    sortable: bool,
}

impl Default for SortEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SortEngine {
    /// A sortable engine with no active sort.
    pub fn new() -> Self {
        Self {
            config: None,
            sortable: true,
        }
    }

    /// Builder-style sortable flag. A non-sortable engine ignores
    /// [`request_sort`](Self::request_sort).
    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.set_sortable(sortable);
        self
    }

    /// Enable or disable sorting. Disabling clears any active sort.
    pub fn set_sortable(&mut self, sortable: bool) {
        self.sortable = sortable;
        if !sortable {
            self.config = None;
        }
    }

    /// Whether `request_sort` has any effect.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The active sort, if any.
    pub fn sort_config(&self) -> Option<&SortConfig> {
        self.config.as_ref()
    }

    /// Direction applied to `key`, if it is the active key.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        self.config
            .as_ref()
            .filter(|config| config.key == key)
            .map(|config| config.direction)
    }

    /// Advance the sort cycle for `key`.
    ///
    /// Returns the new state. When the engine is not sortable this is a
    /// no-op and returns the (empty) current state.
    pub fn request_sort(&mut self, key: &str) -> Option<&SortConfig> {
        if !self.sortable {
            tracing::debug!(key, "sort requested on non-sortable table");
            return self.config.as_ref();
        }
        self.config = next_state(self.config.take(), key);
        match &self.config {
            Some(config) => {
                tracing::debug!(key, direction = %config.direction, "sort changed");
            }
            None => tracing::debug!(key, "sort cleared"),
        }
        self.config.as_ref()
    }

    /// Drop the active sort, restoring natural order.
    pub fn clear(&mut self) {
        self.config = None;
    }

    /// The collection in sorted order.
    ///
    /// With no active sort the result holds every element in input order.
    pub fn sorted<'a, R: Record>(&self, data: &'a [R]) -> Vec<&'a R> {
        self.sort_view(data.iter().collect())
    }

    /// Sort an already-derived view, such as the output of a filter.
    pub fn sort_view<'a, R: Record>(&self, view: Vec<&'a R>) -> Vec<&'a R> {
        match &self.config {
            Some(config) => sort_records(view, config),
            None => view,
        }
    }
}

fn next_state(current: Option<SortConfig>, key: &str) -> Option<SortConfig> {
    match current {
        Some(config) if config.key == key => match config.direction {
            SortDirection::Ascending => Some(SortConfig {
                direction: config.direction.toggled(),
                ..config
            }),
            SortDirection::Descending => None,
        },
        _ => Some(SortConfig::ascending(key)),
    }
}

/// Stable sort of `records` by the configured key and direction.
pub fn sort_records<'a, R: Record>(records: Vec<&'a R>, config: &SortConfig) -> Vec<&'a R> {
    let mut keyed: Vec<(FieldValue, &'a R)> = records
        .into_iter()
        .map(|record| (record.field(&config.key), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| config.direction.apply(compare_values(a, b)));
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablekit_model::Row;

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("id", 1).with("name", "Alice").with("age", 25),
            Row::new().with("id", 2).with("name", "Bob").with("age", 30),
            Row::new().with("id", 3).with("name", "Charlie").with("age", 20),
        ]
    }

    fn column(view: &[&Row], key: &str) -> Vec<String> {
        view.iter().map(|r| r.field(key).display_string()).collect()
    }

    #[test]
    fn test_cycle_ascending_descending_none() {
        let rows = people();
        let mut engine = SortEngine::new();

        engine.request_sort("name");
        assert_eq!(engine.sort_config(), Some(&SortConfig::ascending("name")));
        assert_eq!(column(&engine.sorted(&rows), "name"), ["Alice", "Bob", "Charlie"]);

        engine.request_sort("name");
        assert_eq!(engine.direction_for("name"), Some(SortDirection::Descending));
        assert_eq!(column(&engine.sorted(&rows), "name"), ["Charlie", "Bob", "Alice"]);

        engine.request_sort("name");
        assert!(engine.sort_config().is_none());
        assert_eq!(column(&engine.sorted(&rows), "name"), ["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_switching_key_restarts_at_ascending() {
        let mut engine = SortEngine::new();
        engine.request_sort("name");
        engine.request_sort("name");
        engine.request_sort("age");
        assert_eq!(engine.sort_config(), Some(&SortConfig::ascending("age")));
        // Returning to the old key does not remember its descending state.
        engine.request_sort("name");
        assert_eq!(engine.sort_config(), Some(&SortConfig::ascending("name")));
    }

    #[test]
    fn test_numeric_sort() {
        let rows = people();
        let mut engine = SortEngine::new();
        engine.request_sort("age");
        assert_eq!(column(&engine.sorted(&rows), "age"), ["20", "25", "30"]);
    }

    #[test]
    fn test_no_sort_is_identity() {
        let rows = people();
        let engine = SortEngine::new();
        let view = engine.sorted(&rows);
        assert_eq!(view.len(), rows.len());
        for (derived, original) in view.iter().zip(&rows) {
            assert!(std::ptr::eq(*derived, original));
        }
    }

    #[test]
    fn test_not_sortable_ignores_requests() {
        let rows = people();
        let mut engine = SortEngine::new().with_sortable(false);
        assert!(engine.request_sort("name").is_none());
        assert!(engine.sort_config().is_none());
        assert_eq!(column(&engine.sorted(&rows), "id"), ["1", "2", "3"]);
    }

    #[test]
    fn test_disabling_clears_active_sort() {
        let mut engine = SortEngine::new();
        engine.request_sort("name");
        engine.set_sortable(false);
        assert!(engine.sort_config().is_none());
        assert!(!engine.is_sortable());
    }

    #[test]
    fn test_missing_values_last_ascending_first_descending() {
        let rows = vec![
            Row::new().with("id", 1).with("score", 5),
            Row::new().with("id", 2),
            Row::new().with("id", 3).with("score", 1),
        ];
        let mut engine = SortEngine::new();
        engine.request_sort("score");
        assert_eq!(column(&engine.sorted(&rows), "id"), ["3", "1", "2"]);
        engine.request_sort("score");
        assert_eq!(column(&engine.sorted(&rows), "id"), ["2", "1", "3"]);
    }

    #[test]
    fn test_unknown_key_keeps_input_order() {
        let rows = people();
        let mut engine = SortEngine::new();
        engine.request_sort("nope");
        assert_eq!(column(&engine.sorted(&rows), "id"), ["1", "2", "3"]);
        engine.request_sort("nope");
        assert_eq!(column(&engine.sorted(&rows), "id"), ["1", "2", "3"]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let rows = vec![
            Row::new().with("id", 1).with("team", "b"),
            Row::new().with("id", 2).with("team", "a"),
            Row::new().with("id", 3).with("team", "b"),
            Row::new().with("id", 4).with("team", "a"),
        ];
        let mut engine = SortEngine::new();
        engine.request_sort("team");
        assert_eq!(column(&engine.sorted(&rows), "id"), ["2", "4", "1", "3"]);
        engine.request_sort("team");
        assert_eq!(column(&engine.sorted(&rows), "id"), ["1", "3", "2", "4"]);
    }

    #[test]
    fn test_toggled_flips_direction() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
        assert_eq!(
            SortDirection::Descending.apply(Ordering::Less),
            SortDirection::Ascending.toggled().apply(Ordering::Less)
        );
    }

    #[test]
    fn test_direction_indicator() {
        assert_eq!(SortDirection::Ascending.indicator(), "▲");
        assert_eq!(SortDirection::Descending.indicator(), "▼");
    }
}
