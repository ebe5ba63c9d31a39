//! Trained point-risk classifier
//!
//! The classifier is fit offline and shipped as a JSON artifact containing
//! an inference-only decision tree plus the feature column order it was
//! trained on. The artifact is loaded once at startup into an immutable
//! handle; a missing or incompatible artifact disables point predictions
//! rather than degrading them silently.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RiskMapError;
use crate::models::FeatureVector;

/// An opaque trained model queried with a single feature vector
pub trait PointClassifier: Send + Sync {
    /// Scalar risk value for one feature vector
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// Serialized decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: `feature <= threshold` goes left, otherwise right
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    /// Terminal prediction
    Leaf { value: f64 },
}

impl TreeNode {
    fn evaluate(&self, features: &[f64; 5]) -> f64 {
        match self {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features[*feature] <= *threshold {
                    left.evaluate(features)
                } else {
                    right.evaluate(features)
                }
            }
        }
    }

    fn max_feature_index(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => [Some(*feature), left.max_feature_index(), right.max_feature_index()]
                .into_iter()
                .flatten()
                .max(),
        }
    }
}

/// On-disk artifact layout
#[derive(Debug, Serialize, Deserialize)]
struct ClassifierArtifact {
    /// Feature columns in the order the tree was trained on
    feature_order: Vec<String>,
    tree: TreeNode,
}

/// Decision-tree classifier loaded from a JSON artifact
#[derive(Debug, Clone)]
pub struct DecisionTreeModel {
    root: TreeNode,
}

impl DecisionTreeModel {
    /// Load and validate a classifier artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RiskMapError> {
        let path = path.as_ref();
        info!("Loading classifier artifact from {}", path.display());

        let raw = fs::read_to_string(path).map_err(|e| {
            RiskMapError::model_unavailable(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a classifier artifact from its JSON text
    pub fn from_json(raw: &str) -> Result<Self, RiskMapError> {
        let artifact: ClassifierArtifact = serde_json::from_str(raw)
            .map_err(|e| RiskMapError::model_unavailable(format!("malformed artifact: {e}")))?;

        let order_matches = artifact.feature_order.len() == FeatureVector::COLUMNS.len()
            && artifact
                .feature_order
                .iter()
                .zip(FeatureVector::COLUMNS)
                .all(|(declared, expected)| declared.as_str() == expected);
        if !order_matches {
            return Err(RiskMapError::model_unavailable(format!(
                "artifact was trained on columns {:?}, expected {:?}",
                artifact.feature_order,
                FeatureVector::COLUMNS
            )));
        }

        if let Some(index) = artifact.tree.max_feature_index() {
            if index >= FeatureVector::COLUMNS.len() {
                return Err(RiskMapError::model_unavailable(format!(
                    "artifact references feature index {index}, only {} columns exist",
                    FeatureVector::COLUMNS.len()
                )));
            }
        }

        Ok(Self {
            root: artifact.tree,
        })
    }
}

impl PointClassifier for DecisionTreeModel {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.root.evaluate(&features.as_array())
    }
}
