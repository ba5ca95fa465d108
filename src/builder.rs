//! Builder pattern for generating design matrices.
//!
//! # Example
//!
//! ```
//! use factorial_design::DesignBuilder;
//!
//! let m = DesignBuilder::new()
//!     .factors(3)
//!     .levels(vec![1, 2])
//!     .half_factorial(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(m.runs(), 4);
//! assert_eq!(m.columns(), 3);
//! ```

use crate::construct::generate_with_limits;
use crate::design::{DesignConfig, DesignMatrix, GenerationLimits};
use crate::error::Result;

/// Builder for design matrices.
///
/// Unset factors and levels describe an empty design. Limits default to
/// [`GenerationLimits::default`].
#[derive(Debug, Clone, Default)]
pub struct DesignBuilder {
    factors: Option<i64>,
    levels: Option<Vec<i64>>,
    half_factorial: bool,
    limits: Option<GenerationLimits>,
}

impl DesignBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of factors.
    #[must_use]
    pub fn factors(mut self, factors: i64) -> Self {
        self.factors = Some(factors);
        self
    }

    /// Set the candidate level codes.
    #[must_use]
    pub fn levels(mut self, levels: Vec<i64>) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Select a half factorial design.
    #[must_use]
    pub fn half_factorial(mut self, half: bool) -> Self {
        self.half_factorial = half;
        self
    }

    /// Override the generation limits.
    #[must_use]
    pub fn limits(mut self, limits: GenerationLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// The configuration this builder describes.
    #[must_use]
    pub fn config(&self) -> DesignConfig {
        DesignConfig::new(
            self.factors.unwrap_or(0),
            self.levels.clone().unwrap_or_default(),
            self.half_factorial,
        )
    }

    /// Generate the design matrix.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ConstraintViolation`] if the configuration
    /// exceeds the limits.
    pub fn build(self) -> Result<DesignMatrix> {
        let limits = self.limits.unwrap_or_default();
        generate_with_limits(&self.config(), &limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Bound, Error};

    #[test]
    fn test_builder_full() {
        let m = DesignBuilder::new()
            .factors(2)
            .levels(vec![1, 2])
            .build()
            .unwrap();
        assert_eq!(
            m.to_rows(),
            vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]
        );
    }

    #[test]
    fn test_builder_half() {
        let m = DesignBuilder::new()
            .factors(4)
            .levels(vec![1, 2, 3])
            .half_factorial(true)
            .build()
            .unwrap();
        assert_eq!(m.runs(), 27);
        assert_eq!(m.columns(), 4);
    }

    #[test]
    fn test_builder_defaults_empty() {
        let m = DesignBuilder::new().build().unwrap();
        assert!(m.is_empty());
        assert_eq!(m.columns(), 0);
    }

    #[test]
    fn test_builder_custom_limits() {
        let limits = GenerationLimits {
            max_levels: 4,
            max_factors: 8,
            max_run_product: 32,
        };
        let m = DesignBuilder::new()
            .factors(7)
            .levels(vec![0, 1, 2, 3])
            .limits(limits)
            .build()
            .unwrap();
        assert_eq!(m.runs(), 4usize.pow(7));
    }

    #[test]
    fn test_builder_rejects() {
        let err = DesignBuilder::new()
            .factors(7)
            .levels(vec![1, 2])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ConstraintViolation {
                bound: Bound::Factors,
                ..
            }
        ));
    }

    #[test]
    fn test_builder_config() {
        let config = DesignBuilder::new()
            .factors(3)
            .levels(vec![1, 2])
            .half_factorial(true)
            .config();
        assert_eq!(config, DesignConfig::new(3, vec![1, 2], true));
    }
}
