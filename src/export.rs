//! CSV export of the visible design.
//!
//! The export reproduces what the table shows: runs in display order, the
//! current headers and the current level labels. The first line is
//! `Experiment` followed by the headers; each following line starts with the
//! 1-based experiment number. Lines are separated by `\n` with no trailing
//! newline.
//!
//! Two escaping policies are available through [`CsvEscaping`]:
//!
//! - [`CsvEscaping::Reference`] writes fields verbatim, byte for byte the
//!   format produced by the original design tool. A label containing a
//!   comma shifts the columns of that line.
//! - [`CsvEscaping::Rfc4180`] (the default) quotes fields that contain the
//!   delimiter, a quote or a line break, so any label round-trips through a
//!   CSV reader. Output without such characters is identical in both modes.
//!
//! # Example
//!
//! ```
//! use factorial_design::construct::generate;
//! use factorial_design::export::to_csv;
//! use factorial_design::headers::HeaderNames;
//! use factorial_design::labels::ColumnLabelMap;
//! use factorial_design::order::RowOrder;
//!
//! let m = generate(2, &[1, 2], false).unwrap();
//! let labels = ColumnLabelMap::reconcile(&m, &ColumnLabelMap::new());
//! let csv = to_csv(&m, &RowOrder::identity(4), &HeaderNames::defaults(2), &labels).unwrap();
//!
//! assert_eq!(csv, "Experiment,Factor 1,Factor 2\n1,1,1\n2,1,2\n3,2,1\n4,2,2");
//! ```

use std::io::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::design::DesignMatrix;
use crate::error::{Error, Result};
use crate::headers::HeaderNames;
use crate::labels::ColumnLabelMap;
use crate::order::RowOrder;

/// File name offered for the downloaded export.
pub const EXPORT_FILE_NAME: &str = "design_matrix.csv";

/// Content type of the export.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// Header of the experiment number column.
pub const EXPERIMENT_HEADER: &str = "Experiment";

/// Field escaping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CsvEscaping {
    /// Never quote; fields are written verbatim.
    Reference,
    /// Quote fields containing the delimiter, a quote or a line break.
    #[default]
    Rfc4180,
}

/// Options for CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportOptions {
    /// Escaping policy.
    pub escaping: CsvEscaping,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            escaping: CsvEscaping::default(),
            delimiter: b',',
        }
    }
}

impl ExportOptions {
    /// Unquoted comma-separated output.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            escaping: CsvEscaping::Reference,
            ..Self::default()
        }
    }

    fn writer<W: Write>(&self, inner: W) -> csv::Writer<W> {
        let quote_style = match self.escaping {
            CsvEscaping::Reference => csv::QuoteStyle::Never,
            CsvEscaping::Rfc4180 => csv::QuoteStyle::Necessary,
        };
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(quote_style)
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(inner)
    }
}

/// Render the visible design as CSV with the default options.
///
/// # Errors
///
/// See [`to_csv_with`].
pub fn to_csv(
    matrix: &DesignMatrix,
    order: &RowOrder,
    headers: &HeaderNames,
    labels: &ColumnLabelMap,
) -> Result<String> {
    to_csv_with(matrix, order, headers, labels, &ExportOptions::default())
}

/// Render the visible design as CSV.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the header count differs from the
/// column count or the order does not cover the matrix rows, and
/// [`Error::Export`] if the writer fails.
pub fn to_csv_with(
    matrix: &DesignMatrix,
    order: &RowOrder,
    headers: &HeaderNames,
    labels: &ColumnLabelMap,
    options: &ExportOptions,
) -> Result<String> {
    check_shapes(matrix, order, headers)?;

    let mut wtr = options.writer(Vec::new());
    wtr.write_record(std::iter::once(EXPERIMENT_HEADER).chain(headers.iter()))?;

    for (experiment, row) in order.experiments() {
        let mut record = Vec::with_capacity(matrix.columns() + 1);
        record.push(experiment.to_string());
        for (col, &code) in matrix.row(row).iter().enumerate() {
            record.push(labels.display(col, code));
        }
        wtr.write_record(&record)?;
    }

    let mut bytes = wtr
        .into_inner()
        .map_err(|e| Error::export(e.error().to_string()))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    let text = String::from_utf8(bytes).map_err(|e| Error::export(e.to_string()))?;

    tracing::debug!(
        runs = order.len(),
        columns = matrix.columns(),
        bytes = text.len(),
        "exported design to csv"
    );
    Ok(text)
}

/// Write the visible design as CSV to `writer`.
///
/// # Errors
///
/// See [`to_csv_with`]; I/O failures are reported as [`Error::Export`].
pub fn write_csv<W: Write>(
    mut writer: W,
    matrix: &DesignMatrix,
    order: &RowOrder,
    headers: &HeaderNames,
    labels: &ColumnLabelMap,
    options: &ExportOptions,
) -> Result<()> {
    let text = to_csv_with(matrix, order, headers, labels, options)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn check_shapes(matrix: &DesignMatrix, order: &RowOrder, headers: &HeaderNames) -> Result<()> {
    if headers.len() != matrix.columns() {
        return Err(Error::DimensionMismatch {
            expected: format!("{} headers", matrix.columns()),
            actual: format!("{} headers", headers.len()),
        });
    }
    if order.len() != matrix.runs() {
        return Err(Error::DimensionMismatch {
            expected: format!("order over {} runs", matrix.runs()),
            actual: format!("order over {} runs", order.len()),
        });
    }
    if let Some(&row) = order.indices().iter().find(|&&row| row >= matrix.runs()) {
        return Err(Error::invalid_order(format!(
            "row {row} out of range for {} runs",
            matrix.runs()
        )));
    }
    Ok(())
}
