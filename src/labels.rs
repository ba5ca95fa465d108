//! Per-column level labels.
//!
//! A [`ColumnLabelMap`] maps each column to a mapping from level code to
//! display label. Its keys always mirror the current [`DesignMatrix`]: every
//! distinct code of every column has an entry, and nothing else does.
//!
//! Labels are kept per column so the same code can carry different names in
//! different factors (level `1` may be "low" for temperature and "steel" for
//! material).
//!
//! # Example
//!
//! ```
//! use factorial_design::construct::generate;
//! use factorial_design::labels::ColumnLabelMap;
//!
//! let m = generate(2, &[1, 2], false).unwrap();
//! let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new());
//! let labels = labels.set_label(0, 1, "low").unwrap();
//!
//! assert_eq!(labels.display(0, 1), "low");
//! assert_eq!(labels.display(1, 1), "1");
//!
//! // A regenerated matrix keeps labels for codes that still exist.
//! let m = generate(3, &[1, 2], false).unwrap();
//! let labels = ColumnLabelMap::reconcile(&m, &labels);
//! assert_eq!(labels.display(0, 1), "low");
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::design::DesignMatrix;
use crate::error::{Error, Result};

/// Level labels for every column of a design matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnLabelMap {
    columns: BTreeMap<usize, BTreeMap<i64, String>>,
}

impl ColumnLabelMap {
    /// An empty map, matching a design with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the label map for `matrix`, carrying labels over from `previous`.
    ///
    /// For each column, every distinct code gets the previous label for the
    /// same column and code, or its decimal form if there is none. An empty
    /// previous label counts as unset. Entries for columns or codes that no
    /// longer exist are dropped. Reconciling twice against the same matrix
    /// returns the same map.
    #[must_use]
    pub fn reconcile(matrix: &DesignMatrix, previous: &ColumnLabelMap) -> Self {
        let mut columns = BTreeMap::new();
        let mut carried = 0usize;

        for col in 0..matrix.columns() {
            let prev = previous.columns.get(&col);
            let mut entries = BTreeMap::new();
            for code in matrix.distinct_codes(col) {
                let label = match prev.and_then(|p| p.get(&code)) {
                    Some(label) if !label.is_empty() => {
                        carried += 1;
                        label.clone()
                    }
                    _ => code.to_string(),
                };
                entries.insert(code, label);
            }
            columns.insert(col, entries);
        }

        let dropped = previous.len().saturating_sub(carried);
        if dropped > 0 {
            tracing::debug!(dropped, carried, "dropped stale level labels");
        }

        Self { columns }
    }

    /// Return a copy with one label changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnOutOfRange`] if the column does not exist and
    /// [`Error::InvalidLevelReference`] if `code` does not appear in it. The
    /// original map is unchanged either way.
    pub fn set_label(&self, column: usize, code: i64, label: impl Into<String>) -> Result<Self> {
        let Some(entries) = self.columns.get(&column) else {
            return Err(Error::ColumnOutOfRange {
                column,
                columns: self.column_count(),
            });
        };
        if !entries.contains_key(&code) {
            return Err(Error::InvalidLevelReference { column, code });
        }

        let mut next = self.clone();
        if let Some(slot) = next
            .columns
            .get_mut(&column)
            .and_then(|entries| entries.get_mut(&code))
        {
            *slot = label.into();
        }
        Ok(next)
    }

    /// The stored label, if the column and code exist.
    #[must_use]
    pub fn label(&self, column: usize, code: i64) -> Option<&str> {
        self.columns
            .get(&column)
            .and_then(|entries| entries.get(&code))
            .map(String::as_str)
    }

    /// The text shown for a cell: the label, or the code when the label is
    /// missing or empty.
    #[must_use]
    pub fn display(&self, column: usize, code: i64) -> String {
        match self.label(column, code) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => code.to_string(),
        }
    }

    /// `(code, label)` pairs of a column in ascending code order.
    #[must_use]
    pub fn levels(&self, column: usize) -> Vec<(i64, &str)> {
        self.columns
            .get(&column)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(&code, label)| (code, label.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a label differs from the default decimal form.
    #[must_use]
    pub fn is_customized(&self, column: usize, code: i64) -> bool {
        self.label(column, code)
            .is_some_and(|label| label != code.to_string())
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of labels across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(BTreeMap::len).sum()
    }

    /// Whether there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::generate;

    fn matrix(rows: &[Vec<i64>]) -> DesignMatrix {
        DesignMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_reconcile_defaults() {
        let m = generate(3, &[1, 2], true).unwrap();
        let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new());

        assert_eq!(labels.column_count(), 3);
        assert_eq!(labels.levels(0), vec![(1, "1"), (2, "2")]);
        assert_eq!(labels.levels(2), vec![(1, "1"), (2, "2"), (4, "4")]);
        assert!(!labels.is_customized(2, 4));
    }

    #[test]
    fn test_reconcile_preserves_and_drops() {
        let m = matrix(&[vec![1, 1], vec![2, 3]]);
        let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new())
            .set_label(0, 2, "hot")
            .unwrap()
            .set_label(1, 3, "gone")
            .unwrap();

        let next = matrix(&[vec![1, 1], vec![2, 2]]);
        let labels = ColumnLabelMap::reconcile(&next, &labels);

        assert_eq!(labels.label(0, 2), Some("hot"));
        assert_eq!(labels.label(1, 3), None);
        assert_eq!(labels.label(1, 2), Some("2"));
    }

    #[test]
    fn test_reconcile_drops_columns() {
        let wide = matrix(&[vec![1, 1, 1]]);
        let labels = ColumnLabelMap::reconcile(&wide, &ColumnLabelMap::new())
            .set_label(2, 1, "third")
            .unwrap();

        let narrow = matrix(&[vec![1, 1]]);
        let labels = ColumnLabelMap::reconcile(&narrow, &labels);
        assert_eq!(labels.column_count(), 2);
        assert_eq!(labels.label(2, 1), None);
    }

    #[test]
    fn test_reconcile_idempotent() {
        let m = generate(3, &[1, 2, 3], false).unwrap();
        let once = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new())
            .set_label(1, 3, "high")
            .unwrap();
        let twice = ColumnLabelMap::reconcile(&m, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_label_reverts_to_default() {
        let m = matrix(&[vec![1], vec![2]]);
        let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new())
            .set_label(0, 1, "")
            .unwrap();

        assert_eq!(labels.label(0, 1), Some(""));
        assert_eq!(labels.display(0, 1), "1");

        let labels = ColumnLabelMap::reconcile(&m, &labels);
        assert_eq!(labels.label(0, 1), Some("1"));
    }

    #[test]
    fn test_same_code_different_columns() {
        let m = generate(2, &[1, 2], false).unwrap();
        let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new())
            .set_label(0, 1, "low temp")
            .unwrap()
            .set_label(1, 1, "steel")
            .unwrap();
        assert_eq!(labels.display(0, 1), "low temp");
        assert_eq!(labels.display(1, 1), "steel");
    }

    #[test]
    fn test_set_label_rejects_unknown_code() {
        let m = generate(2, &[1, 2], false).unwrap();
        let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new());

        let err = labels.set_label(0, 9, "nine").unwrap_err();
        assert_eq!(err, Error::InvalidLevelReference { column: 0, code: 9 });

        let err = labels.set_label(5, 1, "x").unwrap_err();
        assert_eq!(
            err,
            Error::ColumnOutOfRange {
                column: 5,
                columns: 2
            }
        );
        assert_eq!(labels.label(0, 1), Some("1"));
    }

    #[test]
    fn test_empty_matrix_keeps_columns() {
        let m = DesignMatrix::empty(3);
        let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new());
        assert_eq!(labels.column_count(), 3);
        assert!(labels.is_empty());
        assert!(labels.levels(0).is_empty());
    }

    #[test]
    fn test_display_missing() {
        let labels = ColumnLabelMap::new();
        assert_eq!(labels.display(0, 42), "42");
    }
}
