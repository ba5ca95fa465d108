//! Full factorial construction.
//!
//! Produces every combination of `k` factors over a level sequence, one row
//! per combination. The level sequence keeps its given order and the last
//! factor varies fastest, so rows come out in lexicographic order over the
//! sequence positions.
//!
//! ## Algorithm
//!
//! Run `r` is the base-`s` representation of `r` with `k` digits, most
//! significant digit first, where `s` is the number of levels. Digit `d` of
//! column `c` selects `levels[d]`.
//!
//! ## Example
//!
//! ```
//! use factorial_design::construct::{Construction, FullFactorial};
//!
//! let full = FullFactorial::new(vec![1, 2], 2);
//! let m = full.construct().unwrap();
//!
//! assert_eq!(m.to_rows(), vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
//! ```

use ndarray::Array2;

use super::Construction;
use crate::design::DesignMatrix;
use crate::error::{Error, Result};

/// Cartesian product of `factors` copies of a level sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullFactorial {
    /// Level codes in iteration order.
    levels: Vec<i64>,
    /// Number of enumerated factors.
    factors: usize,
}

impl FullFactorial {
    /// Create a full factorial over `levels` with `factors` columns.
    #[must_use]
    pub fn new(levels: Vec<i64>, factors: usize) -> Self {
        Self { levels, factors }
    }

    /// The level sequence.
    #[must_use]
    pub fn levels(&self) -> &[i64] {
        &self.levels
    }

    /// Number of runs, or `None` if it does not fit in a `usize`.
    ///
    /// An empty level set or zero factors is an empty domain with no runs.
    #[must_use]
    pub fn checked_runs(&self) -> Option<usize> {
        if self.factors == 0 || self.levels.is_empty() {
            return Some(0);
        }
        let exp = u32::try_from(self.factors).ok()?;
        self.levels.len().checked_pow(exp)
    }
}

impl Construction for FullFactorial {
    fn name(&self) -> &'static str {
        "FullFactorial"
    }

    fn runs(&self) -> usize {
        self.checked_runs().unwrap_or(usize::MAX)
    }

    fn columns(&self) -> usize {
        self.factors
    }

    fn construct(&self) -> Result<DesignMatrix> {
        let runs = self.checked_runs().ok_or_else(|| Error::DimensionMismatch {
            expected: "run count that fits in usize".to_string(),
            actual: format!("{}^{}", self.levels.len(), self.factors),
        })?;
        if runs == 0 {
            return Ok(DesignMatrix::empty(self.factors));
        }

        let s = self.levels.len();
        let k = self.factors;
        let mut data = Array2::zeros((runs, k));

        for r in 0..runs {
            // Peel digits off the least significant end, which is the last column.
            let mut rem = r;
            for c in (0..k).rev() {
                data[[r, c]] = self.levels[rem % s];
                rem /= s;
            }
        }

        Ok(DesignMatrix::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two() {
        let m = FullFactorial::new(vec![1, 2], 2).construct().unwrap();
        assert_eq!(
            m.to_rows(),
            vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]
        );
    }

    #[test]
    fn test_preserves_level_order() {
        let m = FullFactorial::new(vec![5, -1, 3], 2).construct().unwrap();
        assert_eq!(m.runs(), 9);
        assert_eq!(m.to_rows()[0], vec![5, 5]);
        assert_eq!(m.to_rows()[1], vec![5, -1]);
        assert_eq!(m.to_rows()[2], vec![5, 3]);
        assert_eq!(m.to_rows()[3], vec![-1, 5]);
        assert_eq!(m.to_rows()[8], vec![3, 3]);
    }

    #[test]
    fn test_three_levels_five_factors() {
        let full = FullFactorial::new(vec![0, 1, 2], 5);
        assert_eq!(full.runs(), 243);
        let m = full.construct().unwrap();
        assert_eq!(m.runs(), 243);
        assert_eq!(m.columns(), 5);
        assert!(m.data().iter().all(|v| (0..3).contains(v)));
    }

    #[test]
    fn test_rows_are_distinct() {
        let m = FullFactorial::new(vec![1, 2, 3], 3).construct().unwrap();
        let mut rows = m.to_rows();
        rows.sort();
        rows.dedup();
        assert_eq!(rows.len(), 27);
    }

    #[test]
    fn test_empty_domain() {
        let m = FullFactorial::new(vec![], 3).construct().unwrap();
        assert!(m.is_empty());
        assert_eq!(m.columns(), 3);

        let m = FullFactorial::new(vec![1, 2], 0).construct().unwrap();
        assert!(m.is_empty());
        assert_eq!(m.columns(), 0);
    }

    #[test]
    fn test_single_level() {
        let m = FullFactorial::new(vec![7], 3).construct().unwrap();
        assert_eq!(m.to_rows(), vec![vec![7, 7, 7]]);
    }
}
