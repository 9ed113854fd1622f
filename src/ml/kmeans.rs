//! K-means cluster assignment.
//!
//! Inference only: centroids come from the exported artifact and a row is
//! assigned to its nearest centroid (L2) via linfa-nn.

use linfa_nn::{distance::L2Dist, LinearSearch, NearestNeighbour};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{PredictorError, Result};
use crate::ml::artifact::{validate_matrix, Artifact};
use crate::ml::encoding::FeatureEncoder;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansData {
    pub centroids: Vec<Vec<f64>>,
    /// Scaler/encoder statistics captured at training time
    #[serde(default)]
    pub preprocessing: Option<FeatureEncoder>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct KMeansModel {
    centroids: Array2<f64>,
    preprocessing: Option<FeatureEncoder>,
}

impl KMeansModel {
    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    /// Width of the rows the model accepts
    pub fn n_features(&self) -> usize {
        self.centroids.ncols()
    }

    pub fn preprocessing(&self) -> Option<&FeatureEncoder> {
        self.preprocessing.as_ref()
    }

    /// Index of the centroid nearest to `row`
    pub fn predict(&self, row: &[f64]) -> Result<usize> {
        if row.len() != self.n_features() {
            return Err(PredictorError::ShapeMismatch {
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        let index = LinearSearch::new()
            .from_batch(&self.centroids, L2Dist)
            .map_err(|e| PredictorError::Inference(format!("centroid index build failed: {e}")))?;

        let nearest = index
            .k_nearest(ArrayView1::from(row), 1)
            .map_err(|e| PredictorError::Inference(format!("nearest centroid search failed: {e}")))?;

        nearest
            .first()
            .map(|(_, idx)| *idx)
            .ok_or_else(|| PredictorError::Inference("no nearest centroid found".to_string()))
    }
}

impl Artifact for KMeansModel {
    type Data = KMeansData;
    const KIND: &'static str = "kmeans";

    fn from_data(data: Self::Data) -> Result<Self> {
        let n_clusters = data.centroids.len();
        let n_features = data.centroids.first().map(|c| c.len()).unwrap_or(0);
        if n_clusters == 0 || n_features == 0 {
            return Err(PredictorError::invalid_artifact(
                Self::KIND,
                "centroids must be a non-empty matrix",
            ));
        }
        validate_matrix(Self::KIND, "centroids", &data.centroids, n_features)?;

        if let Some(encoder) = &data.preprocessing {
            encoder
                .validate()
                .map_err(|e| PredictorError::invalid_artifact(Self::KIND, format!("preprocessing: {e}")))?;
        }

        let flat: Vec<f64> = data.centroids.into_iter().flatten().collect();
        let centroids = Array2::from_shape_vec((n_clusters, n_features), flat)
            .map_err(|e| PredictorError::invalid_artifact(Self::KIND, e.to_string()))?;

        Ok(Self {
            centroids,
            preprocessing: data.preprocessing,
        })
    }
}
