//! Tabular Data Model and Delimited I/O
//!
//! Provides an in-memory table of named, mixed-type columns plus CSV
//! load/store for the housing dataset pipeline.

mod csv_io;
mod table;
mod value;

pub use csv_io::{read_csv, write_csv};
pub use table::Table;
pub use value::Value;

use thiserror::Error;

/// Errors from table construction and I/O
#[derive(Debug, Error)]
pub enum TableError {
    /// A required column is absent from the table
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A column was added or replaced with the wrong number of values
    #[error("column '{column}' has {actual} values, table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A column with the same name already exists
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// Underlying CSV parse/write failure
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
