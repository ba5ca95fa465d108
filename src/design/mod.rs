//! Design configuration and matrix types.
//!
//! ## Overview
//!
//! - [`DesignConfig`]: the inputs of one generation request
//! - [`DesignMatrix`]: the generated runs, one row per experiment
//! - [`GenerationLimits`]: the bounds checked before generation
//!
//! A matrix stores raw level codes. Labels, headers and row order live in
//! separate stores ([`crate::labels`], [`crate::headers`], [`crate::order`])
//! and are reconciled against each new matrix.

mod limits;

pub use limits::{
    GenerationLimits, DEFAULT_MAX_FACTORS, DEFAULT_MAX_LEVELS, DEFAULT_MAX_RUN_PRODUCT,
};

use ndarray::{Array2, ArrayView1};
use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inputs for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignConfig {
    /// Number of factors. Values `<= 0` describe an empty design.
    pub factor_count: i64,
    /// Candidate level codes, in iteration order.
    pub levels: Vec<i64>,
    /// Replace the last factor with the product of the others.
    pub half_factorial: bool,
}

impl DesignConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(factor_count: i64, levels: Vec<i64>, half_factorial: bool) -> Self {
        Self {
            factor_count,
            levels,
            half_factorial,
        }
    }

    /// Number of factors that are enumerated rather than computed.
    #[must_use]
    pub fn effective_factors(&self) -> i64 {
        if self.half_factorial {
            self.factor_count.saturating_sub(1)
        } else {
            self.factor_count
        }
    }

    /// Number of columns in the generated matrix.
    ///
    /// Half-factorial designs replace one enumerated column with the
    /// confounding column, so the count is `factor_count` in both modes.
    #[must_use]
    pub fn column_count(&self) -> usize {
        usize::try_from(self.factor_count).unwrap_or(0)
    }

    /// Whether this configuration produces no runs.
    #[must_use]
    pub fn is_empty_domain(&self) -> bool {
        self.effective_factors() <= 0 || self.levels.is_empty()
    }

    /// Number of runs the configuration produces, or `None` on overflow.
    #[must_use]
    pub fn expected_runs(&self) -> Option<usize> {
        if self.is_empty_domain() {
            return Some(0);
        }
        let exp = u32::try_from(self.effective_factors()).ok()?;
        self.levels.len().checked_pow(exp)
    }
}

impl fmt::Display for DesignConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.half_factorial { "half" } else { "full" };
        write!(
            f,
            "{} factorial, {} factors, levels {:?}",
            kind, self.factor_count, self.levels
        )
    }
}

/// A design matrix of level codes.
///
/// Rows are runs in generation order; columns are factors. Every row has the
/// same length because the data is stored as a dense 2D array.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignMatrix {
    /// The matrix data, shape (runs, columns).
    data: Array2<i64>,
}

impl DesignMatrix {
    /// Wrap existing data.
    #[must_use]
    pub fn new(data: Array2<i64>) -> Self {
        Self { data }
    }

    /// A matrix with no rows and the given number of columns.
    #[must_use]
    pub fn empty(columns: usize) -> Self {
        Self {
            data: Array2::zeros((0, columns)),
        }
    }

    /// Build a matrix from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the rows differ in length.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(Error::DimensionMismatch {
                    expected: format!("{columns} columns"),
                    actual: format!("{} columns in row {i}", row.len()),
                });
            }
            flat.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((rows.len(), columns), flat).map_err(|e| {
            Error::DimensionMismatch {
                expected: format!("{} x {columns}", rows.len()),
                actual: e.to_string(),
            }
        })?;
        Ok(Self { data })
    }

    /// Number of runs (rows).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// Whether the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs() == 0
    }

    /// Get the code at a specific position.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[[row, col]]
    }

    /// Get a row as a view.
    #[must_use]
    pub fn row(&self, idx: usize) -> ArrayView1<'_, i64> {
        self.data.row(idx)
    }

    /// Get a column as a view.
    #[must_use]
    pub fn column(&self, idx: usize) -> ArrayView1<'_, i64> {
        self.data.column(idx)
    }

    /// Iterate over rows in generation order.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, i64>> {
        self.data.rows().into_iter()
    }

    /// Distinct codes appearing in a column, ascending.
    ///
    /// Out-of-range columns yield an empty set.
    #[must_use]
    pub fn distinct_codes(&self, col: usize) -> BTreeSet<i64> {
        if col >= self.columns() {
            return BTreeSet::new();
        }
        self.data.column(col).iter().copied().collect()
    }

    /// Whether `code` appears in column `col`.
    #[must_use]
    pub fn contains_code(&self, col: usize, code: i64) -> bool {
        col < self.columns() && self.data.column(col).iter().any(|&v| v == code)
    }

    /// Get a reference to the underlying data.
    #[must_use]
    pub fn data(&self) -> &Array2<i64> {
        &self.data
    }

    /// Consume the matrix and return the underlying data.
    #[must_use]
    pub fn into_data(self) -> Array2<i64> {
        self.data
    }

    /// Copy the matrix into nested row vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

impl fmt::Debug for DesignMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DesignMatrix({} x {}) {:?}",
            self.runs(),
            self.columns(),
            self.data
        )
    }
}

impl fmt::Display for DesignMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.rows() {
            let row_str: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", row_str.join(" "))?;
        }
        Ok(())
    }
}
