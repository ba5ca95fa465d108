//! # Factorial Design
//!
//! Design matrices for full and half-factorial experiments, with per-column
//! level labels, run-order randomization and CSV export.
//!
//! ## Overview
//!
//! A design is described by a number of factors, a sequence of candidate
//! level codes, and a half-factorial flag. The library provides:
//! - Generation of the design matrix with input bounds checked up front
//! - Level labels per column that survive regeneration where still meaningful
//! - Editable column headers
//! - Fisher-Yates randomization of run order, with restore
//! - CSV export of exactly what is displayed
//!
//! ## Quick Start
//!
//! ```rust
//! use factorial_design::construct::generate;
//!
//! // 2 factors at levels 1 and 2
//! let m = generate(2, &[1, 2], false).unwrap();
//! assert_eq!(m.to_rows(), vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
//!
//! // Half factorial: the third column is the product of the first two
//! let m = generate(3, &[1, 2], true).unwrap();
//! assert_eq!(m.to_rows()[3], vec![2, 2, 4]);
//! ```
//!
//! Or drive a whole session:
//!
//! ```rust
//! use factorial_design::{DesignConfig, DesignSession};
//!
//! let mut session = DesignSession::new();
//! session.regenerate(&DesignConfig::new(2, vec![1, 2], false)).unwrap();
//! session.set_label(1, 2, "high").unwrap();
//!
//! assert_eq!(
//!     session.to_csv().unwrap(),
//!     "Experiment,Factor 1,Factor 2\n1,1,1\n2,1,high\n3,2,1\n4,2,high"
//! );
//! ```
//!
//! ## Bounds
//!
//! By default at most 3 levels, at most 6 factors, and at most 15 for
//! `factors * levels` are accepted; see [`GenerationLimits`].
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of design types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod construct;
pub mod design;
pub mod error;
pub mod export;
pub mod headers;
pub mod labels;
pub mod order;
pub mod session;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::DesignBuilder;
    pub use crate::construct::{
        generate, generate_with_limits, Construction, FullFactorial, HalfFactorial,
    };
    pub use crate::design::{DesignConfig, DesignMatrix, GenerationLimits};
    pub use crate::error::{Bound, Error, Result};
    pub use crate::export::{
        to_csv, to_csv_with, write_csv, CsvEscaping, ExportOptions, EXPORT_CONTENT_TYPE,
        EXPORT_FILE_NAME,
    };
    pub use crate::headers::HeaderNames;
    pub use crate::labels::ColumnLabelMap;
    pub use crate::order::{OrderState, RowOrder};
    pub use crate::session::{DesignSession, DisplayRow};
}

// Re-export commonly used items at crate root
pub use builder::DesignBuilder;
pub use construct::generate;
pub use design::{DesignConfig, DesignMatrix, GenerationLimits};
pub use error::{Error, Result};
pub use export::{to_csv, ExportOptions};
pub use session::DesignSession;
