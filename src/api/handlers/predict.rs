use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::api::{state::AppState, types::ErrorResponse};
use crate::domain::{PredictionResult, PropertyRecord};
use crate::error::{PredictorError, Result};
use crate::predictor::Predictor;

/// POST /predict (GET is routed here as well)
///
/// The body is parsed as JSON whatever the content type. Every failure,
/// including a missing body or key, answers 500 with `{"error": ...}`.
pub async fn predict_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);

    span.in_scope(|| match run_prediction(&state.predictor, &body) {
        Ok(result) => {
            info!(
                linear_regression = %result.linear_regression_price,
                random_forest = %result.random_forest_price,
                cluster = result.k_means_cluster,
                category = %result.knn_price_category,
                "Prediction served"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            error!(error = ?e, "Error making prediction: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    })
}

/// OPTIONS /predict
pub async fn predict_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn run_prediction(predictor: &Predictor, body: &[u8]) -> Result<PredictionResult> {
    let record = parse_record(body)?;
    predictor.predict_result(&record)
}

fn parse_record(body: &[u8]) -> Result<PropertyRecord> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PredictorError::InvalidRequest(
            "request body is empty, expected a JSON object".to_string(),
        ));
    }
    serde_json::from_slice(body).map_err(|e| PredictorError::InvalidRequest(e.to_string()))
}
