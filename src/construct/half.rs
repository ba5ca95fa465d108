//! Half factorial construction.
//!
//! Enumerates `k - 1` factors as a full factorial and appends a confounding
//! column holding the arithmetic product of each row's level codes.
//!
//! The product uses the raw codes, so levels `[1, 2]` give confounding values
//! `1, 2, 2, 4`. Classical half fractions multiply ±1 codes instead; map the
//! levels to `[-1, 1]` before generating to get that design.
//!
//! ## Example
//!
//! ```
//! use factorial_design::construct::{Construction, HalfFactorial};
//!
//! let half = HalfFactorial::new(vec![1, 2], 3);
//! let m = half.construct().unwrap();
//!
//! assert_eq!(
//!     m.to_rows(),
//!     vec![vec![1, 1, 1], vec![1, 2, 2], vec![2, 1, 2], vec![2, 2, 4]]
//! );
//! ```

use ndarray::{s, Array2};

use super::{Construction, FullFactorial};
use crate::design::DesignMatrix;
use crate::error::{Error, Result};

/// A full factorial over `factors - 1` columns plus one product column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfFactorial {
    /// The enumerated part of the design.
    base: FullFactorial,
    /// Total number of columns including the confounding column.
    factors: usize,
}

impl HalfFactorial {
    /// Create a half factorial with `factors` columns in total.
    #[must_use]
    pub fn new(levels: Vec<i64>, factors: usize) -> Self {
        let base = FullFactorial::new(levels, factors.saturating_sub(1));
        Self { base, factors }
    }

    /// The enumerated part of the design.
    #[must_use]
    pub fn base(&self) -> &FullFactorial {
        &self.base
    }
}

impl Construction for HalfFactorial {
    fn name(&self) -> &'static str {
        "HalfFactorial"
    }

    fn runs(&self) -> usize {
        self.base.runs()
    }

    fn columns(&self) -> usize {
        self.factors
    }

    fn construct(&self) -> Result<DesignMatrix> {
        let base = self.base.construct()?;
        if base.is_empty() {
            return Ok(DesignMatrix::empty(self.factors));
        }

        let runs = base.runs();
        let enumerated = base.columns();
        let mut data = Array2::zeros((runs, enumerated + 1));
        data.slice_mut(s![.., ..enumerated]).assign(base.data());

        for (r, row) in base.rows().enumerate() {
            let product = row
                .iter()
                .try_fold(1i64, |acc, &v| acc.checked_mul(v))
                .ok_or(Error::CodeOverflow { row: r })?;
            data[[r, enumerated]] = product;
        }

        Ok(DesignMatrix::new(data))
    }
}
