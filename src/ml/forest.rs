//! Random forest regressor.
//!
//! Trees are stored as flat node arrays in the same layout scikit-learn uses
//! internally: split nodes send `x[feature] <= threshold` left, leaves carry
//! the predicted value. Children always sit after their parent, so traversal
//! terminates.

use serde::{Deserialize, Serialize};

use crate::domain::PropertyRecord;
use crate::error::{PredictorError, Result};
use crate::ml::artifact::Artifact;
use crate::ml::encoding::FeatureEncoder;
use crate::ml::PriceRegressor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature}, encoder width is {n_features}"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {idx} threshold is NaN"));
                    }
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} value is not finite"));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestData {
    pub encoder: FeatureEncoder,
    pub trees: Vec<RegressionTree>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct RandomForestModel {
    encoder: FeatureEncoder,
    trees: Vec<RegressionTree>,
}

impl RandomForestModel {
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Artifact for RandomForestModel {
    type Data = RandomForestData;
    const KIND: &'static str = "random_forest";

    fn from_data(data: Self::Data) -> Result<Self> {
        data.encoder
            .validate()
            .map_err(|e| PredictorError::invalid_artifact(Self::KIND, e))?;
        if data.trees.is_empty() {
            return Err(PredictorError::invalid_artifact(Self::KIND, "no trees"));
        }
        let width = data.encoder.width();
        for (idx, tree) in data.trees.iter().enumerate() {
            tree.validate(width)
                .map_err(|e| PredictorError::invalid_artifact(Self::KIND, format!("tree[{idx}]: {e}")))?;
        }

        Ok(Self {
            encoder: data.encoder,
            trees: data.trees,
        })
    }
}

impl PriceRegressor for RandomForestModel {
    fn predict(&self, record: &PropertyRecord) -> Result<f64> {
        let x = self.encoder.transform(record);
        let total: f64 = self.trees.iter().map(|tree| tree.predict(&x)).sum();
        Ok(total / self.trees.len() as f64)
    }
}
