//! Filter table — in-memory rows with inclusive per-column filters
//!
//! Filters behave like spreadsheet column filters: a column with filter
//! values keeps only rows whose cell is one of those values, and a row is
//! returned only if it passes every filtered column. Columns without
//! filters impose no constraint.
//!
//! Invalid filter operations are not errors. They are logged with
//! `tracing::warn!` and reported through a `false` return value.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{Error, Result};

/// Rows of equal length plus the active filter values per column
///
/// Serialize-only: tables are always built through `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTable {
    rows: Vec<Vec<String>>,
    column_count: usize,
    /// Ordered map for deterministic iteration
    filters: BTreeMap<usize, BTreeSet<String>>,
}

impl FilterTable {
    /// Build a table, rejecting rows of inconsistent length
    ///
    /// The first row fixes the column count. An empty row set is valid and
    /// has zero columns.
    ///
    /// # Errors
    /// Returns `InconsistentRows` naming the first row whose length differs.
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self> {
        let column_count = rows.first().map_or(0, Vec::len);

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != column_count)
        {
            return Err(Error::InconsistentRows {
                row,
                expected: column_count,
                found,
            });
        }

        Ok(FilterTable {
            rows,
            column_count,
            filters: BTreeMap::new(),
        })
    }

    /// Convenience constructor from borrowed cells
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows in insertion order, ignoring filters
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Filter values registered for a column, if any
    pub fn filter_values(&self, column: usize) -> Option<&BTreeSet<String>> {
        self.filters.get(&column)
    }

    /// Register an inclusive filter value for a column
    ///
    /// Returns `false` (and logs a warning) when the column is out of range.
    pub fn add_filter(&mut self, column: usize, value: impl Into<String>) -> bool {
        if column >= self.column_count {
            tracing::warn!(
                column,
                column_count = self.column_count,
                "column index is out of bounds, filter ignored"
            );
            return false;
        }

        let value = value.into();
        tracing::debug!(column, value = %value, "adding filter");
        self.filters.entry(column).or_default().insert(value);
        true
    }

    /// Remove a filter value from a column
    ///
    /// Removing the column's last value drops its constraint entirely.
    /// Returns `false` (and logs a warning) when the column has no filters
    /// or the value was not registered.
    pub fn remove_filter(&mut self, column: usize, value: &str) -> bool {
        let Some(values) = self.filters.get_mut(&column) else {
            tracing::warn!(column, "there is no filter for column");
            return false;
        };

        if !values.remove(value) {
            tracing::warn!(column, value, "filter value not registered for column");
            return false;
        }

        if values.is_empty() {
            self.filters.remove(&column);
        }
        true
    }

    /// Drop every filter
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Rows passing every column filter, in insertion order
    pub fn filtered_rows(&self) -> Vec<&[String]> {
        self.rows
            .iter()
            .filter(|row| self.matches(row))
            .map(Vec::as_slice)
            .collect()
    }

    fn matches(&self, row: &[String]) -> bool {
        self.filters
            .iter()
            .all(|(column, values)| values.contains(&row[*column]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> FilterTable {
        FilterTable::from_rows([
            ["green", "lion", "1"],
            ["blue", "dog", "2"],
            ["yellow", "cat", "3"],
            ["yellow", "tiger", "4"],
            ["red", "lion", "5"],
            ["red", "tiger", "6"],
            ["blue", "tiger", "7"],
            ["yellow", "tiger", "8"],
            ["red", "lion", "9"],
            ["blue", "cat", "10"],
        ])
        .unwrap()
    }

    fn ids(rows: &[&[String]]) -> Vec<String> {
        rows.iter().map(|r| r[2].clone()).collect()
    }

    #[test]
    fn test_new_counts_columns() {
        let table = animals();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 10);
    }

    #[test]
    fn test_new_rejects_inconsistent_rows() {
        let err = FilterTable::new(vec![
            vec!["a".into(), "b".into()],
            vec!["c".into(), "d".into()],
            vec!["e".into()],
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::InconsistentRows {
                row: 2,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_new_empty_table() {
        let mut table = FilterTable::new(Vec::new()).unwrap();
        assert_eq!(table.column_count(), 0);
        assert!(!table.add_filter(0, "x"));
        assert!(table.filtered_rows().is_empty());
    }

    #[test]
    fn test_no_filters_returns_all_rows() {
        let table = animals();
        assert_eq!(table.filtered_rows().len(), 10);
    }

    #[test]
    fn test_or_within_column_and_across_columns() {
        let mut table = animals();
        assert!(table.add_filter(0, "yellow"));
        assert!(table.add_filter(0, "red"));
        assert!(table.add_filter(1, "lion"));

        let rows = table.filtered_rows();
        assert_eq!(ids(&rows), vec!["5", "9"]);
        for row in rows {
            assert!(row[0] == "yellow" || row[0] == "red");
            assert_eq!(row[1], "lion");
        }
    }

    #[test]
    fn test_remove_then_add() {
        let mut table = animals();
        table.add_filter(0, "yellow");
        table.add_filter(0, "red");
        table.add_filter(1, "lion");

        assert!(table.remove_filter(0, "red"));
        assert!(table.add_filter(1, "tiger"));

        let rows = table.filtered_rows();
        assert_eq!(ids(&rows), vec!["4", "8"]);
        for row in rows {
            assert_eq!(row[0], "yellow");
            assert!(row[1] == "tiger" || row[1] == "lion");
        }
    }

    #[test]
    fn test_removing_last_value_restores_no_constraint() {
        let mut table = animals();
        table.add_filter(1, "cat");
        assert_eq!(table.filtered_rows().len(), 2);

        assert!(table.remove_filter(1, "cat"));
        assert!(table.filter_values(1).is_none());
        assert_eq!(table.filtered_rows().len(), 10);
    }

    #[test]
    fn test_add_filter_out_of_range_is_ignored() {
        let mut table = animals();
        assert!(!table.add_filter(3, "x"));
        assert!(table.filter_values(3).is_none());
        assert_eq!(table.filtered_rows().len(), 10);
    }

    #[test]
    fn test_remove_filter_without_filters_is_ignored() {
        let mut table = animals();
        assert!(!table.remove_filter(0, "red"));
        table.add_filter(0, "blue");
        assert!(!table.remove_filter(0, "red"));
        assert_eq!(ids(&table.filtered_rows()), vec!["2", "7", "10"]);
    }

    #[test]
    fn test_filter_value_absent_from_data() {
        let mut table = animals();
        table.add_filter(0, "purple");
        assert!(table.filtered_rows().is_empty());
    }

    #[test]
    fn test_duplicate_filter_value() {
        let mut table = animals();
        assert!(table.add_filter(1, "dog"));
        assert!(table.add_filter(1, "dog"));
        assert!(table.remove_filter(1, "dog"));
        assert_eq!(table.filtered_rows().len(), 10);
    }

    #[test]
    fn test_clear_filters() {
        let mut table = animals();
        table.add_filter(0, "red");
        table.add_filter(1, "lion");
        table.clear_filters();
        assert_eq!(table.filtered_rows().len(), 10);
    }

    #[test]
    fn test_table_serialization() {
        let mut table = animals();
        table.add_filter(0, "red");
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["column_count"], 3);
        assert_eq!(json["filters"]["0"], serde_json::json!(["red"]));
        assert_eq!(json["rows"][9], serde_json::json!(["blue", "cat", "10"]));
    }
}
