//! Generation bounds.
//!
//! The size of a full factorial grows as `levels^factors`, so requests are
//! checked against fixed bounds before any row is produced.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::DesignConfig;
use crate::error::{Bound, Error, Result};

/// Default maximum number of candidate levels.
pub const DEFAULT_MAX_LEVELS: usize = 3;
/// Default maximum number of factors.
pub const DEFAULT_MAX_FACTORS: usize = 6;
/// Default maximum of `factors * levels`.
pub const DEFAULT_MAX_RUN_PRODUCT: usize = 15;

/// Upper bounds applied to a [`DesignConfig`] before generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationLimits {
    /// Maximum length of the level sequence.
    pub max_levels: usize,
    /// Maximum number of factors.
    pub max_factors: usize,
    /// Maximum of `factor_count * levels.len()`.
    pub max_run_product: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            max_factors: DEFAULT_MAX_FACTORS,
            max_run_product: DEFAULT_MAX_RUN_PRODUCT,
        }
    }
}

impl GenerationLimits {
    /// Check a configuration against these limits.
    ///
    /// Bounds are checked in a fixed order (levels, factors, product) and the
    /// first one exceeded is reported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] naming the exceeded bound.
    pub fn check(&self, config: &DesignConfig) -> Result<()> {
        let levels = config.levels.len();
        if levels > self.max_levels {
            return Err(Error::ConstraintViolation {
                bound: Bound::Levels,
                actual: levels,
                max: self.max_levels,
            });
        }

        // Non-positive factor counts describe an empty design and cannot
        // exceed any upper bound.
        let Ok(factors) = usize::try_from(config.factor_count) else {
            return Ok(());
        };

        if factors > self.max_factors {
            return Err(Error::ConstraintViolation {
                bound: Bound::Factors,
                actual: factors,
                max: self.max_factors,
            });
        }

        let product = factors.saturating_mul(levels);
        if product > self.max_run_product {
            return Err(Error::ConstraintViolation {
                bound: Bound::RunProduct,
                actual: product,
                max: self.max_run_product,
            });
        }

        Ok(())
    }
}
