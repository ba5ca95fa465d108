//! Design matrix construction.
//!
//! ## Available Constructions
//!
//! | Construction | Runs | Columns |
//! |-------------|------|---------|
//! | [`FullFactorial`] | s^k | k |
//! | [`HalfFactorial`] | s^(k-1) | k, last column is the product of the others |
//!
//! ## Usage
//!
//! [`generate`] checks the default [`GenerationLimits`] and picks the
//! construction from the half-factorial flag:
//!
//! ```
//! use factorial_design::construct::generate;
//!
//! let m = generate(2, &[1, 2], false).unwrap();
//! assert_eq!(m.to_rows(), vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
//!
//! let m = generate(3, &[1, 2], true).unwrap();
//! assert_eq!(m.runs(), 4);
//! assert_eq!(m.columns(), 3);
//! ```

mod full;
mod half;

pub use full::FullFactorial;
pub use half::HalfFactorial;

use crate::design::{DesignConfig, DesignMatrix, GenerationLimits};
use crate::error::Result;

/// Trait for design matrix construction algorithms.
pub trait Construction: Send + Sync {
    /// Get the name of this construction method.
    fn name(&self) -> &'static str;

    /// Number of runs the construction produces.
    fn runs(&self) -> usize;

    /// Number of columns the construction produces.
    fn columns(&self) -> usize;

    /// Build the matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if a computed column overflows.
    fn construct(&self) -> Result<DesignMatrix>;
}

/// Pick the construction for a configuration.
///
/// Returns `None` for empty domains: non-positive factor counts, a half
/// factorial without any enumerated factor, or no levels.
#[must_use]
pub fn select(config: &DesignConfig) -> Option<Box<dyn Construction>> {
    if config.is_empty_domain() {
        return None;
    }
    let factors = config.column_count();
    let levels = config.levels.clone();
    if config.half_factorial {
        Some(Box::new(HalfFactorial::new(levels, factors)))
    } else {
        Some(Box::new(FullFactorial::new(levels, factors)))
    }
}

/// Generate a design matrix under the default limits.
///
/// # Errors
///
/// Returns [`crate::Error::ConstraintViolation`] if more than 3 levels, more
/// than 6 factors, or more than 15 for `factors * levels` are requested.
pub fn generate(factor_count: i64, levels: &[i64], half_factorial: bool) -> Result<DesignMatrix> {
    let config = DesignConfig::new(factor_count, levels.to_vec(), half_factorial);
    generate_with_limits(&config, &GenerationLimits::default())
}

/// Generate a design matrix for a configuration under explicit limits.
///
/// Limits are checked before any row is produced. Empty domains produce a
/// matrix with zero rows and `config.column_count()` columns.
///
/// # Errors
///
/// Returns [`crate::Error::ConstraintViolation`] if a limit is exceeded, or
/// [`crate::Error::CodeOverflow`] if a confounding product overflows.
pub fn generate_with_limits(
    config: &DesignConfig,
    limits: &GenerationLimits,
) -> Result<DesignMatrix> {
    limits.check(config)?;

    let Some(construction) = select(config) else {
        tracing::warn!(
            factor_count = config.factor_count,
            levels = config.levels.len(),
            half_factorial = config.half_factorial,
            "empty design domain, generating zero runs"
        );
        return Ok(DesignMatrix::empty(config.column_count()));
    };

    let matrix = construction.construct()?;
    tracing::debug!(
        construction = construction.name(),
        factors = config.factor_count,
        levels = ?config.levels,
        runs = matrix.runs(),
        columns = matrix.columns(),
        "generated design matrix"
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Bound, Error};

    #[test]
    fn test_generate_full() {
        let m = generate(2, &[1, 2], false).unwrap();
        assert_eq!(
            m.to_rows(),
            vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]
        );
    }

    #[test]
    fn test_generate_half() {
        let m = generate(3, &[1, 2], true).unwrap();
        assert_eq!(
            m.to_rows(),
            vec![vec![1, 1, 1], vec![1, 2, 2], vec![2, 1, 2], vec![2, 2, 4]]
        );
    }

    #[test]
    fn test_generate_boundary() {
        let m = generate(5, &[1, 2, 3], false).unwrap();
        assert_eq!(m.runs(), 243);
        assert_eq!(m.columns(), 5);

        let err = generate(6, &[1, 2, 3], false).unwrap_err();
        assert!(matches!(
            err,
            Error::ConstraintViolation {
                bound: Bound::RunProduct,
                ..
            }
        ));
    }

    #[test]
    fn test_generate_checks_before_empty_domain() {
        // Too many levels is rejected even though zero factors is an empty domain.
        let err = generate(0, &[1, 2, 3, 4], false).unwrap_err();
        assert!(matches!(
            err,
            Error::ConstraintViolation {
                bound: Bound::Levels,
                ..
            }
        ));
    }

    #[test]
    fn test_generate_empty_domains() {
        assert!(generate(0, &[1, 2], false).unwrap().is_empty());
        assert!(generate(-3, &[1, 2], false).unwrap().is_empty());
        assert!(generate(4, &[], false).unwrap().is_empty());
        assert!(generate(1, &[1, 2], true).unwrap().is_empty());
        assert_eq!(generate(4, &[], false).unwrap().columns(), 4);
    }

    #[test]
    fn test_select() {
        let full = select(&DesignConfig::new(3, vec![1, 2], false)).unwrap();
        assert_eq!(full.name(), "FullFactorial");
        assert_eq!(full.runs(), 8);

        let half = select(&DesignConfig::new(3, vec![1, 2], true)).unwrap();
        assert_eq!(half.name(), "HalfFactorial");
        assert_eq!(half.runs(), 4);
        assert_eq!(half.columns(), 3);

        assert!(select(&DesignConfig::new(0, vec![1, 2], false)).is_none());
    }
}
