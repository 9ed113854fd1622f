use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

use crate::config::ModelsConfig;
use crate::error::{PredictorError, Result};
use crate::ml::artifact::Artifact;
use crate::ml::{KMeansModel, KnnClassifier, LinearRegressionModel, RandomForestModel};

/// A model that either loaded or failed to load at startup.
///
/// Load failures do not stop the service; they surface on first use and in
/// the readiness report.
#[derive(Debug, Clone)]
pub enum ModelSlot<T> {
    Loaded(T),
    Failed { path: String, reason: String },
}

impl<T: Artifact> ModelSlot<T> {
    pub fn load(path: &Path) -> Self {
        match T::from_file(path) {
            Ok(model) => {
                info!(kind = T::KIND, path = %path.display(), "Model loaded");
                ModelSlot::Loaded(model)
            }
            Err(e) => {
                error!(kind = T::KIND, path = %path.display(), error = ?e, "Error loading model: {}", e);
                ModelSlot::Failed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn get(&self) -> Result<&T> {
        match self {
            ModelSlot::Loaded(model) => Ok(model),
            ModelSlot::Failed { reason, .. } => Err(PredictorError::ModelNotLoaded {
                kind: T::KIND,
                reason: reason.clone(),
            }),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelSlot::Loaded(_))
    }

    pub fn status(&self) -> ModelStatus {
        match self {
            ModelSlot::Loaded(_) => ModelStatus {
                model: T::KIND.to_string(),
                loaded: true,
                error: None,
            },
            ModelSlot::Failed { reason, .. } => ModelStatus {
                model: T::KIND.to_string(),
                loaded: false,
                error: Some(reason.clone()),
            },
        }
    }
}

/// Load outcome of one model, as reported by readiness checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub model: String,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The four models served by the predictor
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub linear_regression: ModelSlot<LinearRegressionModel>,
    pub random_forest: ModelSlot<RandomForestModel>,
    pub kmeans: ModelSlot<KMeansModel>,
    pub knn: ModelSlot<KnnClassifier>,
}

impl ModelBundle {
    /// Load every artifact named in the config, recording failures instead of
    /// returning them.
    pub fn load(config: &ModelsConfig) -> Self {
        info!(dir = %config.dir.display(), "Loading model artifacts");
        let bundle = Self {
            linear_regression: ModelSlot::load(&config.linear_regression_path()),
            random_forest: ModelSlot::load(&config.random_forest_path()),
            kmeans: ModelSlot::load(&config.kmeans_path()),
            knn: ModelSlot::load(&config.knn_path()),
        };

        let loaded = bundle.statuses().iter().filter(|s| s.loaded).count();
        if bundle.is_ready() {
            info!("All {} models loaded", loaded);
        } else {
            error!(
                "Only {}/4 models loaded; predictions will fail until the service is restarted with valid artifacts",
                loaded
            );
        }
        bundle
    }

    pub fn from_models(
        linear_regression: LinearRegressionModel,
        random_forest: RandomForestModel,
        kmeans: KMeansModel,
        knn: KnnClassifier,
    ) -> Self {
        Self {
            linear_regression: ModelSlot::Loaded(linear_regression),
            random_forest: ModelSlot::Loaded(random_forest),
            kmeans: ModelSlot::Loaded(kmeans),
            knn: ModelSlot::Loaded(knn),
        }
    }

    pub fn statuses(&self) -> Vec<ModelStatus> {
        vec![
            self.linear_regression.status(),
            self.random_forest.status(),
            self.kmeans.status(),
            self.knn.status(),
        ]
    }

    pub fn is_ready(&self) -> bool {
        self.linear_regression.is_loaded()
            && self.random_forest.is_loaded()
            && self.kmeans.is_loaded()
            && self.knn.is_loaded()
    }
}
