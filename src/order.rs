//! Display order of design runs.
//!
//! A [`RowOrder`] is a permutation of row indices into the current
//! [`crate::DesignMatrix`]. Experiment numbers are positions in this order
//! (`1..=runs`), never the generation index.
//!
//! ```text
//!  Original --shuffle--> Randomized --shuffle--> Randomized
//!     ^                      |
//!     +------ restore -------+
//! ```
//!
//! Replacing the matrix resets to `Original` from either state.
//!
//! # Example
//!
//! ```
//! use factorial_design::order::{OrderState, RowOrder};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let order = RowOrder::identity(4).shuffle(&mut rng);
//! assert_eq!(order.state(), OrderState::Randomized);
//!
//! let order = order.restore();
//! assert_eq!(order.indices(), &[0, 1, 2, 3]);
//! ```

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether the display order has been shuffled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderState {
    /// Rows in generation order.
    #[default]
    Original,
    /// Rows in a shuffled order.
    Randomized,
}

/// The order in which design rows are shown and exported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowOrder {
    indices: Vec<usize>,
    state: OrderState,
}

impl RowOrder {
    /// Generation order for `runs` rows.
    #[must_use]
    pub fn identity(runs: usize) -> Self {
        Self {
            indices: (0..runs).collect(),
            state: OrderState::Original,
        }
    }

    /// Use an explicit permutation as a randomized order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] if `indices` is not a permutation of
    /// `0..indices.len()`.
    pub fn from_permutation(indices: Vec<usize>) -> Result<Self> {
        let n = indices.len();
        let mut seen = vec![false; n];
        for &i in &indices {
            if i >= n {
                return Err(Error::invalid_order(format!(
                    "index {i} out of range for {n} rows"
                )));
            }
            if std::mem::replace(&mut seen[i], true) {
                return Err(Error::invalid_order(format!("index {i} appears twice")));
            }
        }
        let state = if indices.iter().enumerate().all(|(p, &i)| p == i) {
            OrderState::Original
        } else {
            OrderState::Randomized
        };
        Ok(Self { indices, state })
    }

    /// Shuffle the current order with Fisher-Yates.
    ///
    /// Shuffling an already randomized order permutes it again rather than
    /// starting from generation order.
    #[must_use]
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Self {
        let mut indices = self.indices.clone();
        for i in (1..indices.len()).rev() {
            let j = rng.gen_range(0..=i);
            indices.swap(i, j);
        }
        tracing::debug!(runs = indices.len(), "shuffled run order");
        Self {
            indices,
            state: OrderState::Randomized,
        }
    }

    /// Back to generation order. A no-op in the `Original` state.
    #[must_use]
    pub fn restore(&self) -> Self {
        if self.state == OrderState::Original {
            return self.clone();
        }
        tracing::debug!(runs = self.indices.len(), "restored run order");
        Self::identity(self.indices.len())
    }

    /// Order for a freshly generated matrix with `runs` rows.
    #[must_use]
    pub fn matrix_replaced(runs: usize) -> Self {
        Self::identity(runs)
    }

    /// Row indices in display order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Whether the order has been shuffled since the last restore.
    #[must_use]
    pub fn is_randomized(&self) -> bool {
        self.state == OrderState::Randomized
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the order covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `(experiment number, row index)` pairs in display order.
    pub fn experiments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices.iter().enumerate().map(|(p, &row)| (p + 1, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_permutation(order: &RowOrder) -> bool {
        let mut sorted = order.indices().to_vec();
        sorted.sort_unstable();
        sorted == (0..order.len()).collect::<Vec<_>>()
    }

    #[test]
    fn test_identity() {
        let order = RowOrder::identity(4);
        assert_eq!(order.indices(), &[0, 1, 2, 3]);
        assert_eq!(order.state(), OrderState::Original);
        assert!(!order.is_randomized());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let order = RowOrder::identity(27).shuffle(&mut rng);
        assert!(order.is_randomized());
        assert!(is_permutation(&order));

        let again = order.shuffle(&mut rng);
        assert!(again.is_randomized());
        assert!(is_permutation(&again));
    }

    #[test]
    fn test_shuffle_layers_on_current_order() {
        // Same seed applied to two different starting orders gives the same
        // position swaps, so the results differ exactly as the inputs do.
        let base = RowOrder::from_permutation(vec![3, 2, 1, 0]).unwrap();
        let a = base.shuffle(&mut StdRng::seed_from_u64(9));
        let b = RowOrder::identity(4).shuffle(&mut StdRng::seed_from_u64(9));
        let mapped: Vec<usize> = b.indices().iter().map(|&i| base.indices()[i]).collect();
        assert_eq!(a.indices(), mapped.as_slice());
    }

    #[test]
    fn test_restore() {
        let mut rng = StdRng::seed_from_u64(1);
        let order = RowOrder::identity(8).shuffle(&mut rng).shuffle(&mut rng);
        let restored = order.restore();
        assert_eq!(restored, RowOrder::identity(8));
    }

    #[test]
    fn test_restore_original_is_noop() {
        let order = RowOrder::identity(3);
        assert_eq!(order.restore(), order);
    }

    #[test]
    fn test_matrix_replaced() {
        let mut rng = StdRng::seed_from_u64(5);
        let _old = RowOrder::identity(4).shuffle(&mut rng);
        let order = RowOrder::matrix_replaced(9);
        assert_eq!(order, RowOrder::identity(9));
    }

    #[test]
    fn test_small_orders() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(RowOrder::identity(0).shuffle(&mut rng).is_empty());
        assert_eq!(RowOrder::identity(1).shuffle(&mut rng).indices(), &[0]);
    }

    #[test]
    fn test_from_permutation() {
        assert!(RowOrder::from_permutation(vec![0, 2, 1]).unwrap().is_randomized());
        assert!(!RowOrder::from_permutation(vec![0, 1]).unwrap().is_randomized());
        assert!(matches!(
            RowOrder::from_permutation(vec![0, 0]),
            Err(Error::InvalidOrder { .. })
        ));
        assert!(matches!(
            RowOrder::from_permutation(vec![0, 3]),
            Err(Error::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_experiments() {
        let order = RowOrder::from_permutation(vec![2, 0, 1]).unwrap();
        assert_eq!(
            order.experiments().collect::<Vec<_>>(),
            vec![(1, 2), (2, 0), (3, 1)]
        );
    }
}
