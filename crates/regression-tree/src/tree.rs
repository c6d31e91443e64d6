//! Tree Fitting and Persistence

use crate::node::Node;
use crate::split::{find_best_split, sse};
use crate::TreeError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Current on-disk model format version.
const MODEL_VERSION: u32 = 1;

/// Hyperparameters for tree fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum number of split levels
    pub max_depth: usize,
    /// Minimum rows required to attempt a split
    pub min_samples_split: usize,
    /// Minimum rows required in each child
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        // Shallow by default to keep the price model from overfitting
        Self {
            max_depth: 4,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// A fitted regression tree plus the feature schema it was trained on.
///
/// The schema travels with the model so the prediction service can
/// reorder and zero-fill incoming records to match training order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    /// On-disk format version
    pub model_version: u32,
    /// Feature names in training column order
    pub feature_names: Vec<String>,
    /// Hyperparameters used for fitting
    pub config: TreeConfig,
    /// Root of the fitted tree
    pub root: Node,
}

impl RegressionTree {
    /// Fit a tree on a row-major feature matrix and target vector.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        feature_names: Vec<String>,
        config: TreeConfig,
    ) -> Result<Self, TreeError> {
        if x.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(TreeError::LengthMismatch {
                rows: x.len(),
                targets: y.len(),
            });
        }
        let n_features = feature_names.len();
        for (row, features) in x.iter().enumerate() {
            if features.len() != n_features {
                return Err(TreeError::FeatureCountMismatch {
                    row,
                    expected: n_features,
                    actual: features.len(),
                });
            }
        }

        let rows: Vec<usize> = (0..x.len()).collect();
        let root = build_node(x, y, &rows, 0, n_features, &config);
        info!(
            rows = x.len(),
            features = n_features,
            depth = root.depth(),
            leaves = root.n_leaves(),
            "fitted regression tree"
        );

        Ok(Self {
            model_version: MODEL_VERSION,
            feature_names,
            config,
            root,
        })
    }

    /// Predict the target for one feature vector in schema order.
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.root.predict(features)
    }

    /// Predict targets for a batch of rows.
    pub fn predict_batch(&self, x: &[Vec<f64>]) -> Vec<f64> {
        x.iter().map(|row| self.predict(row)).collect()
    }

    /// Structural validation of a loaded model.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.model_version != MODEL_VERSION {
            return Err(TreeError::InvalidModel(format!(
                "unsupported model version {}",
                self.model_version
            )));
        }
        if self.feature_names.is_empty() {
            return Err(TreeError::InvalidModel(
                "model has no feature schema".to_string(),
            ));
        }
        if self.root.depth() > self.config.max_depth {
            return Err(TreeError::InvalidModel(format!(
                "tree depth {} exceeds configured max depth {}",
                self.root.depth(),
                self.config.max_depth
            )));
        }
        validate_node(&self.root, self.feature_names.len())
    }

    /// Persist the model as JSON, creating the parent directory if
    /// needed.
    pub fn save(&self, path: &Path) -> Result<(), TreeError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "saved model");
        Ok(())
    }

    /// Load and validate a persisted model.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let bytes = std::fs::read(path)?;
        let model: Self = serde_json::from_slice(&bytes)?;
        model.validate()?;
        debug!(
            path = %path.display(),
            features = model.feature_names.len(),
            "loaded model"
        );
        Ok(model)
    }
}

fn validate_node(node: &Node, n_features: usize) -> Result<(), TreeError> {
    match node {
        Node::Leaf { value, .. } => {
            if !value.is_finite() {
                return Err(TreeError::InvalidModel(
                    "leaf value is not finite".to_string(),
                ));
            }
            Ok(())
        }
        Node::Split {
            feature_index,
            left,
            right,
            ..
        } => {
            if *feature_index >= n_features {
                return Err(TreeError::InvalidModel(format!(
                    "split references feature {feature_index} outside schema of {n_features}"
                )));
            }
            validate_node(left, n_features)?;
            validate_node(right, n_features)
        }
    }
}

fn leaf(y: &[f64], rows: &[usize]) -> Node {
    let value = rows.iter().map(|&i| y[i]).sum::<f64>() / rows.len() as f64;
    Node::Leaf {
        value,
        n_samples: rows.len(),
    }
}

fn build_node(
    x: &[Vec<f64>],
    y: &[f64],
    rows: &[usize],
    depth: usize,
    n_features: usize,
    config: &TreeConfig,
) -> Node {
    if depth >= config.max_depth
        || rows.len() < config.min_samples_split
        || sse(y, rows) == 0.0
    {
        return leaf(y, rows);
    }

    let Some(split) = find_best_split(x, y, rows, n_features, config.min_samples_leaf) else {
        return leaf(y, rows);
    };

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
        .iter()
        .copied()
        .partition(|&i| x[i][split.feature_index] <= split.threshold);

    Node::Split {
        feature_index: split.feature_index,
        threshold: split.threshold,
        left: Box::new(build_node(x, y, &left_rows, depth + 1, n_features, config)),
        right: Box::new(build_node(x, y, &right_rows, depth + 1, n_features, config)),
    }
}
