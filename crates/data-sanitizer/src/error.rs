//! Sanitizer Error Types

use table_io::TableError;
use thiserror::Error;

/// Errors during dataset sanitization.
///
/// Only an absent required column is fatal; coercion failures, outliers
/// and unknown category labels are recovered locally and never surface
/// as errors.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// A required column is absent from the input table
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Underlying table operation failed
    #[error(transparent)]
    Table(#[from] TableError),
}
