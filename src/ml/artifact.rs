//! Model artifact loading.
//!
//! Artifacts are JSON documents exported next to the training code. Each model
//! kind has a serde `Data` shape and a validating conversion into the
//! in-memory model used for inference.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{PredictorError, Result};

pub trait Artifact: Sized {
    /// Serialized form as found on disk
    type Data: DeserializeOwned;

    /// Short name used in logs and errors
    const KIND: &'static str;

    /// Validate the raw artifact and build the inference model.
    fn from_data(data: Self::Data) -> Result<Self>;

    fn from_json(content: &str) -> Result<Self> {
        let data: Self::Data = serde_json::from_str(content)?;
        Self::from_data(data)
    }

    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |reason: String| PredictorError::ArtifactLoad {
            kind: Self::KIND,
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        Self::from_json(&content).map_err(|e| load_error(e.to_string()))
    }
}

/// Check that every row of a matrix has `width` finite values.
pub(crate) fn validate_matrix(
    kind: &'static str,
    name: &str,
    rows: &[Vec<f64>],
    width: usize,
) -> Result<()> {
    for (r, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(PredictorError::invalid_artifact(
                kind,
                format!("{name} row {r} len {} != expected {width}", row.len()),
            ));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(PredictorError::invalid_artifact(
                kind,
                format!("{name} row {r} contains non-finite values"),
            ));
        }
    }
    Ok(())
}
