use serde::{Deserialize, Serialize};

use crate::domain::PropertyRecord;
use crate::error::{PredictorError, Result};
use crate::ml::artifact::Artifact;
use crate::ml::encoding::FeatureEncoder;
use crate::ml::PriceRegressor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressionData {
    pub encoder: FeatureEncoder,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Ordinary least squares price model
#[derive(Debug, Clone)]
pub struct LinearRegressionModel {
    encoder: FeatureEncoder,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl Artifact for LinearRegressionModel {
    type Data = LinearRegressionData;
    const KIND: &'static str = "linear_regression";

    fn from_data(data: Self::Data) -> Result<Self> {
        data.encoder
            .validate()
            .map_err(|e| PredictorError::invalid_artifact(Self::KIND, e))?;
        if data.coefficients.len() != data.encoder.width() {
            return Err(PredictorError::invalid_artifact(
                Self::KIND,
                format!(
                    "coefficients len {} != encoder width {}",
                    data.coefficients.len(),
                    data.encoder.width()
                ),
            ));
        }
        if data.coefficients.iter().any(|v| !v.is_finite()) || !data.intercept.is_finite() {
            return Err(PredictorError::invalid_artifact(
                Self::KIND,
                "coefficients and intercept must be finite",
            ));
        }

        Ok(Self {
            encoder: data.encoder,
            coefficients: data.coefficients,
            intercept: data.intercept,
        })
    }
}

impl PriceRegressor for LinearRegressionModel {
    fn predict(&self, record: &PropertyRecord) -> Result<f64> {
        let x = self.encoder.transform(record);
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(x.iter())
            .map(|(w, v)| w * v)
            .sum();
        Ok(self.intercept + dot)
    }
}
