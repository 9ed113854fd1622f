use serde::{Deserialize, Serialize};

use crate::ml::ModelStatus;

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// `ready` when every model loaded, `degraded` otherwise
    pub status: String,
    pub uptime_seconds: i64,
    pub feature_width: usize,
    pub models: Vec<ModelStatus>,
}
