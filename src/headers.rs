//! Column header names.

use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One editable header per column, independent of the level labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderNames {
    names: Vec<String>,
}

impl HeaderNames {
    /// Default headers `Factor 1`, `Factor 2`, ...
    #[must_use]
    pub fn defaults(columns: usize) -> Self {
        Self {
            names: (0..columns).map(default_name).collect(),
        }
    }

    /// Headers for a matrix with `columns` columns.
    ///
    /// Custom names survive when the column count is unchanged; any change
    /// in column count resets every header to its default.
    #[must_use]
    pub fn reconcile(columns: usize, previous: &HeaderNames) -> Self {
        if previous.len() == columns {
            previous.clone()
        } else {
            Self::defaults(columns)
        }
    }

    /// Return a copy with one header renamed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnOutOfRange`] if `column` does not exist.
    pub fn set_header(&self, column: usize, name: impl Into<String>) -> Result<Self> {
        if column >= self.names.len() {
            return Err(Error::ColumnOutOfRange {
                column,
                columns: self.names.len(),
            });
        }
        let mut next = self.clone();
        next.names[column] = name.into();
        Ok(next)
    }

    /// Header of a column.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<&str> {
        self.names.get(column).map(String::as_str)
    }

    /// Iterate over the headers in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Index<usize> for HeaderNames {
    type Output = str;

    fn index(&self, column: usize) -> &str {
        &self.names[column]
    }
}

fn default_name(column: usize) -> String {
    format!("Factor {}", column + 1)
}
