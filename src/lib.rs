pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ml;
pub mod predictor;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use config::AppConfig;
pub use domain::{PredictionResult, PropertyField, PropertyRecord};
pub use error::{PredictorError, Result};
pub use ml::ModelBundle;
pub use predictor::{PredictionOutcome, Predictor};
