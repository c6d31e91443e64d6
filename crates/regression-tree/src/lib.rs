//! Regression Tree
//!
//! A shallow CART regression tree for house price prediction: variance
//! reduction split search, seeded train/test splitting, MAE/R² metrics,
//! and versioned JSON model persistence.

mod dataset;
mod metrics;
mod node;
mod split;
mod tree;

pub use dataset::train_test_split;
pub use metrics::{mean_absolute_error, r2_score, Evaluation};
pub use node::Node;
pub use tree::{RegressionTree, TreeConfig};

use thiserror::Error;

/// Errors during tree training and persistence
#[derive(Debug, Error)]
pub enum TreeError {
    /// Training set is empty
    #[error("cannot fit a tree on an empty dataset")]
    EmptyDataset,

    /// Feature matrix and target lengths disagree
    #[error("feature matrix has {rows} rows but target has {targets} values")]
    LengthMismatch { rows: usize, targets: usize },

    /// A row has the wrong number of features
    #[error("row {row} has {actual} features, expected {expected}")]
    FeatureCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Persisted model failed structural validation
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Model file read/write failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Model (de)serialization failure
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
