//! One user's design session.
//!
//! A [`DesignSession`] owns the current matrix together with its labels,
//! headers and display order, and applies every user action as a state
//! transition. Failed actions leave the session exactly as it was.
//!
//! # Example
//!
//! ```
//! use factorial_design::{DesignConfig, DesignSession};
//! use rand::SeedableRng;
//!
//! let mut session = DesignSession::new();
//! session.regenerate(&DesignConfig::new(2, vec![1, 2], false)).unwrap();
//! session.set_header(0, "Temperature").unwrap();
//! session.set_label(0, 1, "low").unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(11);
//! session.shuffle(&mut rng);
//! assert!(session.is_randomized());
//!
//! session.restore();
//! let csv = session.to_csv().unwrap();
//! assert!(csv.starts_with("Experiment,Temperature,Factor 2\n1,low,1"));
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::construct::generate_with_limits;
use crate::design::{DesignConfig, DesignMatrix, GenerationLimits};
use crate::error::Result;
use crate::export::{to_csv_with, write_csv, ExportOptions};
use crate::headers::HeaderNames;
use crate::labels::ColumnLabelMap;
use crate::order::RowOrder;

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayRow {
    /// 1-based position in display order.
    pub experiment: usize,
    /// Row index in generation order.
    pub source_row: usize,
    /// Cell text with labels applied.
    pub cells: Vec<String>,
}

/// Matrix, labels, headers and display order of one user.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignSession {
    limits: GenerationLimits,
    config: Option<DesignConfig>,
    matrix: DesignMatrix,
    labels: ColumnLabelMap,
    headers: HeaderNames,
    order: RowOrder,
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::with_limits(GenerationLimits::default())
    }
}

impl DesignSession {
    /// An empty session with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty session with custom limits.
    #[must_use]
    pub fn with_limits(limits: GenerationLimits) -> Self {
        Self {
            limits,
            config: None,
            matrix: DesignMatrix::empty(0),
            labels: ColumnLabelMap::new(),
            headers: HeaderNames::default(),
            order: RowOrder::default(),
        }
    }

    /// Replace the matrix with a new design.
    ///
    /// Labels and headers are reconciled against the new matrix and the
    /// display order returns to generation order.
    ///
    /// # Errors
    ///
    /// Returns the generation error; the session keeps its previous matrix,
    /// labels, headers and order.
    pub fn regenerate(&mut self, config: &DesignConfig) -> Result<()> {
        let matrix = generate_with_limits(config, &self.limits)?;

        self.labels = ColumnLabelMap::reconcile(&matrix, &self.labels);
        self.headers = HeaderNames::reconcile(matrix.columns(), &self.headers);
        self.order = RowOrder::matrix_replaced(matrix.runs());
        self.matrix = matrix;
        self.config = Some(config.clone());
        Ok(())
    }

    /// Rename one level of one column.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ColumnOutOfRange`] or
    /// [`crate::Error::InvalidLevelReference`]; labels are unchanged.
    pub fn set_label(&mut self, column: usize, code: i64, label: impl Into<String>) -> Result<()> {
        self.labels = self.labels.set_label(column, code, label)?;
        Ok(())
    }

    /// Rename one column header.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ColumnOutOfRange`]; headers are unchanged.
    pub fn set_header(&mut self, column: usize, name: impl Into<String>) -> Result<()> {
        self.headers = self.headers.set_header(column, name)?;
        Ok(())
    }

    /// Shuffle the display order.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.order = self.order.shuffle(rng);
    }

    /// Return to generation order.
    pub fn restore(&mut self) {
        self.order = self.order.restore();
    }

    /// Whether the display order is shuffled.
    #[must_use]
    pub fn is_randomized(&self) -> bool {
        self.order.is_randomized()
    }

    /// Rows as currently displayed.
    #[must_use]
    pub fn rows(&self) -> Vec<DisplayRow> {
        self.order
            .experiments()
            .map(|(experiment, row)| DisplayRow {
                experiment,
                source_row: row,
                cells: self
                    .matrix
                    .row(row)
                    .iter()
                    .enumerate()
                    .map(|(col, &code)| self.labels.display(col, code))
                    .collect(),
            })
            .collect()
    }

    /// Export with the default options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Export`] if the CSV writer fails.
    pub fn to_csv(&self) -> Result<String> {
        self.to_csv_with(&ExportOptions::default())
    }

    /// Export with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Export`] if the CSV writer fails.
    pub fn to_csv_with(&self, options: &ExportOptions) -> Result<String> {
        to_csv_with(
            &self.matrix,
            &self.order,
            &self.headers,
            &self.labels,
            options,
        )
    }

    /// Write the export to a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Export`] if the file cannot be created or
    /// written.
    pub fn export_to_path(&self, path: impl AsRef<Path>, options: &ExportOptions) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        write_csv(
            BufWriter::new(file),
            &self.matrix,
            &self.order,
            &self.headers,
            &self.labels,
            options,
        )?;
        tracing::info!(path = %path.display(), "wrote design matrix");
        Ok(())
    }

    /// Configuration of the current matrix, if one has been generated.
    #[must_use]
    pub fn config(&self) -> Option<&DesignConfig> {
        self.config.as_ref()
    }

    /// Limits applied on regeneration.
    #[must_use]
    pub fn limits(&self) -> &GenerationLimits {
        &self.limits
    }

    /// The current matrix in generation order.
    #[must_use]
    pub fn matrix(&self) -> &DesignMatrix {
        &self.matrix
    }

    /// The current level labels.
    #[must_use]
    pub fn labels(&self) -> &ColumnLabelMap {
        &self.labels
    }

    /// The current headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderNames {
        &self.headers
    }

    /// The current display order.
    #[must_use]
    pub fn order(&self) -> &RowOrder {
        &self.order
    }
}
