use thiserror::Error;

/// Main error type for the prediction service
#[derive(Error, Debug)]
pub enum PredictorError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Artifact errors
    #[error("Failed to load {kind} artifact from {path}: {reason}")]
    ArtifactLoad {
        kind: &'static str,
        path: String,
        reason: String,
    },

    #[error("Invalid {kind} artifact: {reason}")]
    InvalidArtifact { kind: &'static str, reason: String },

    #[error("{kind} model is not loaded: {reason}")]
    ModelNotLoaded { kind: &'static str, reason: String },

    // Inference errors
    #[error("Feature shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {0}")]
    Inference(String),

    // Request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for PredictorError
pub type Result<T> = std::result::Result<T, PredictorError>;

impl PredictorError {
    pub fn invalid_artifact(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            kind,
            reason: reason.into(),
        }
    }
}
