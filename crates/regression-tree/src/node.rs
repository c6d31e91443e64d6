//! Tree Node

use serde::{Deserialize, Serialize};

/// One node of a fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Terminal node predicting the mean of its training targets
    Leaf {
        /// Predicted value
        value: f64,
        /// Training samples that reached this leaf
        n_samples: usize,
    },
    /// Binary split on one feature
    Split {
        /// Index into the model's feature schema
        feature_index: usize,
        /// Rows with `feature <= threshold` go left
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Walk the tree for one feature vector. Features missing from the
    /// vector read as 0.
    pub fn predict(&self, features: &[f64]) -> f64 {
        match self {
            Node::Leaf { value, .. } => *value,
            Node::Split {
                feature_index,
                threshold,
                left,
                right,
            } => {
                let value = features.get(*feature_index).copied().unwrap_or(0.0);
                if value <= *threshold {
                    left.predict(features)
                } else {
                    right.predict(features)
                }
            }
        }
    }

    /// Depth of the subtree rooted here; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves in the subtree.
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}
