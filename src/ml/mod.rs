//! Inference for the four pre-trained property models.
//!
//! Everything here is read-only after load: models are built from JSON
//! artifacts once at startup and shared across requests.

pub mod artifact;
pub mod bundle;
pub mod clustering;
pub mod encoding;
pub mod forest;
pub mod kmeans;
pub mod knn;
pub mod linear;

use crate::domain::PropertyRecord;
use crate::error::Result;

pub use artifact::Artifact;
pub use bundle::{ModelBundle, ModelSlot, ModelStatus};
pub use clustering::{ClusteringFeatureBuilder, FitSource};
pub use encoding::{ColumnTransform, FeatureEncoder};
pub use forest::RandomForestModel;
pub use kmeans::KMeansModel;
pub use knn::{ClassLabel, KnnClassifier};
pub use linear::LinearRegressionModel;

/// Model mapping a property record to a price estimate in millions
pub trait PriceRegressor {
    fn predict(&self, record: &PropertyRecord) -> Result<f64>;
}
