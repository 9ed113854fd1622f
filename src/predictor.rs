use tracing::{debug, warn};

use crate::domain::{format_price, PredictionResult, PropertyRecord};
use crate::error::Result;
use crate::ml::{ClassLabel, ClusteringFeatureBuilder, FitSource, ModelBundle, PriceRegressor};

/// Raw outputs of the four models for one record
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    /// Linear regression estimate, in millions
    pub linear_regression: f64,
    /// Random forest estimate, in millions
    pub random_forest: f64,
    pub cluster: usize,
    pub price_category: ClassLabel,
}

impl PredictionOutcome {
    pub fn into_result(self) -> PredictionResult {
        PredictionResult {
            linear_regression_price: format_price(self.linear_regression),
            random_forest_price: format_price(self.random_forest),
            k_means_cluster: self.cluster,
            knn_price_category: self.price_category.to_string(),
        }
    }
}

/// Read-only prediction context built once at startup and shared by all
/// requests.
#[derive(Debug)]
pub struct Predictor {
    bundle: ModelBundle,
    feature_width: usize,
}

impl Predictor {
    pub fn new(bundle: ModelBundle, feature_width: usize) -> Self {
        if let Ok(kmeans) = bundle.kmeans.get() {
            if kmeans.n_features() != feature_width {
                warn!(
                    centroid_dim = kmeans.n_features(),
                    feature_width,
                    "K-means centroid dimension differs from the configured feature width; cluster predictions will fail"
                );
            }
            if kmeans.preprocessing().is_none() {
                warn!("K-means artifact has no training statistics; clustering features are fit on each request row");
            }
        }

        Self {
            bundle,
            feature_width,
        }
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    pub fn feature_width(&self) -> usize {
        self.feature_width
    }

    /// Run all four models. Any failure aborts the whole prediction.
    pub fn predict(&self, record: &PropertyRecord) -> Result<PredictionOutcome> {
        let linear_regression = self.bundle.linear_regression.get()?.predict(record)?;
        let random_forest = self.bundle.random_forest.get()?.predict(record)?;

        let kmeans = self.bundle.kmeans.get()?;
        let builder = ClusteringFeatureBuilder::new(self.feature_width, kmeans.preprocessing());
        let row = builder.build(record);
        if builder.fit_source() == FitSource::SingleRow {
            debug!(width = row.len(), "Built clustering features from single-row fit");
        }
        let cluster = kmeans.predict(&row)?;

        let price_category = self.bundle.knn.get()?.predict(record)?;

        Ok(PredictionOutcome {
            linear_regression,
            random_forest,
            cluster,
            price_category,
        })
    }

    pub fn predict_result(&self, record: &PropertyRecord) -> Result<PredictionResult> {
        self.predict(record).map(PredictionOutcome::into_result)
    }
}
