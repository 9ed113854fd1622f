//! K-nearest-neighbors price category classifier.
//!
//! Inference-only implementation: training points and labels are loaded from
//! the exported artifact, neighbors are found with a linfa-nn ball tree and
//! the category is decided by (optionally distance weighted) voting.

use linfa_nn::{distance::L2Dist, BallTree, NearestNeighbour};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::PropertyRecord;
use crate::error::{PredictorError, Result};
use crate::ml::artifact::{validate_matrix, Artifact};
use crate::ml::encoding::FeatureEncoder;

/// Class label as exported by the trainer; integer classes are rendered as
/// their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassLabel::Integer(v) => write!(f, "{v}"),
            ClassLabel::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    #[default]
    Uniform,
    /// Votes weighted by inverse distance
    Distance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnData {
    pub encoder: FeatureEncoder,
    pub k: usize,
    #[serde(default)]
    pub weights: Weighting,
    pub points: Vec<Vec<f64>>,
    pub labels: Vec<ClassLabel>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct KnnClassifier {
    encoder: FeatureEncoder,
    k: usize,
    weights: Weighting,
    points: Array2<f64>,
    labels: Vec<ClassLabel>,
}

impl KnnClassifier {
    pub fn k(&self) -> usize {
        self.k
    }

    /// Distinct labels in sorted order
    pub fn classes(&self) -> Vec<&ClassLabel> {
        let mut classes: Vec<&ClassLabel> = self.labels.iter().collect();
        classes.sort();
        classes.dedup();
        classes
    }

    pub fn predict(&self, record: &PropertyRecord) -> Result<ClassLabel> {
        let x = self.encoder.transform(record);
        let query = ArrayView1::from(x.as_slice());

        let tree = BallTree::new()
            .from_batch(&self.points, L2Dist)
            .map_err(|e| PredictorError::Inference(format!("failed to build ball tree: {e}")))?;

        let neighbors = tree
            .k_nearest(query, self.k)
            .map_err(|e| PredictorError::Inference(format!("knn search failed: {e}")))?;

        let distances: Vec<(usize, f64)> = neighbors
            .iter()
            .map(|(point, idx)| {
                let d = point
                    .iter()
                    .zip(query.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                (*idx, d)
            })
            .collect();

        let exact_match = distances.iter().any(|(_, d)| *d == 0.0);

        // BTreeMap keeps labels in sorted order, so ties go to the smallest label.
        let mut votes: BTreeMap<&ClassLabel, f64> = BTreeMap::new();
        for (idx, d) in distances {
            let weight = match self.weights {
                Weighting::Uniform => 1.0,
                Weighting::Distance if exact_match => {
                    if d == 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                }
                Weighting::Distance => 1.0 / d,
            };
            *votes.entry(&self.labels[idx]).or_insert(0.0) += weight;
        }

        let mut best: Option<(&ClassLabel, f64)> = None;
        for (label, score) in votes {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((label, score));
            }
        }

        best.map(|(label, _)| label.clone())
            .ok_or_else(|| PredictorError::Inference("no neighbors voted".to_string()))
    }
}

impl Artifact for KnnClassifier {
    type Data = KnnData;
    const KIND: &'static str = "knn";

    fn from_data(data: Self::Data) -> Result<Self> {
        data.encoder
            .validate()
            .map_err(|e| PredictorError::invalid_artifact(Self::KIND, e))?;

        let n_samples = data.points.len();
        let width = data.encoder.width();
        if n_samples == 0 {
            return Err(PredictorError::invalid_artifact(Self::KIND, "no training points"));
        }
        if data.labels.len() != n_samples {
            return Err(PredictorError::invalid_artifact(
                Self::KIND,
                format!("labels len {} != points len {n_samples}", data.labels.len()),
            ));
        }
        if data.k == 0 || data.k > n_samples {
            return Err(PredictorError::invalid_artifact(
                Self::KIND,
                format!("k must be in 1..={n_samples}, got {}", data.k),
            ));
        }
        validate_matrix(Self::KIND, "points", &data.points, width)?;

        let flat: Vec<f64> = data.points.into_iter().flatten().collect();
        let points = Array2::from_shape_vec((n_samples, width), flat)
            .map_err(|e| PredictorError::invalid_artifact(Self::KIND, e.to_string()))?;

        Ok(Self {
            encoder: data.encoder,
            k: data.k,
            weights: data.weights,
            points,
            labels: data.labels,
        })
    }
}
