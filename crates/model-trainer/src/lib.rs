//! Training Pipeline
//!
//! File-level glue between the tabular I/O, sanitizer, and regression
//! tree crates: clean a raw dataset to disk, and fit/evaluate/persist a
//! price model from a clean dataset.

mod pipeline;

pub use pipeline::{clean_dataset, features_and_target, train_model, TrainOptions};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Errors from the file-level pipeline steps
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Dataset load/store failure
    #[error(transparent)]
    Table(#[from] table_io::TableError),

    /// Sanitization failure (missing required column)
    #[error(transparent)]
    Sanitize(#[from] data_sanitizer::SanitizeError),

    /// Training or model persistence failure
    #[error(transparent)]
    Tree(#[from] regression_tree::TreeError),

    /// A clean dataset still contained a non-numeric cell
    #[error("non-numeric cell in column '{column}' at row {row}")]
    NonNumericCell { column: String, row: usize },

    /// The clean dataset has no rows to train on
    #[error("dataset has no rows after cleaning")]
    EmptyDataset,
}

/// Initialize logging for pipeline binaries.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
