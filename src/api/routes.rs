use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Prediction endpoint
        .route(
            "/predict",
            post(handlers::predict_handler)
                .get(handlers::predict_handler)
                .options(handlers::predict_preflight),
        )
        // Probes
        .route("/health", get(handlers::health_handler))
        .route("/readyz", get(handlers::readiness_handler))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
}

/// CORS preflights are answered by the CORS layer with 200; report them as
/// 204 like the explicit OPTIONS handler does.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
