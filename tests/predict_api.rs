mod common;

use axum::{http::Method, Router};
use common::{richmond_payload, send, send_with_headers, TempModels, FEATURE_WIDTH};
use housing_predictor::{
    api::{create_router, AppState},
    ml::ModelBundle,
    predictor::Predictor,
};
use serde_json::{json, Value};

fn app_for(models: &TempModels) -> Router {
    let bundle = ModelBundle::load(&models.config());
    create_router(AppState::new(Predictor::new(bundle, FEATURE_WIDTH)))
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).expect("response body is not JSON")
}

#[tokio::test]
async fn predict_returns_all_four_outputs() {
    let models = TempModels::with_all_models();
    let app = app_for(&models);

    let (status, body) = send(&app, Method::POST, "/predict", Some(richmond_payload())).await;
    assert_eq!(status.as_u16(), 200, "body: {body}");

    let value = parse(&body);
    assert_eq!(value["Linear_Regression_Price_Prediction"], "$1,350,000.00");
    assert_eq!(value["Random_Forest_Price_Prediction"], "$1,500,000.00");
    assert_eq!(value["K_Means_Cluster"], 1);
    assert_eq!(value["KNN_Price_Category"], "High");
    assert_eq!(value.as_object().map(|o| o.len()), Some(4));
}

#[tokio::test]
async fn cluster_stays_within_trained_cluster_count() {
    let models = TempModels::with_all_models();
    let app = app_for(&models);

    for (suburb, region) in [
        ("Richmond", "Northern Metropolitan"),
        ("Nowhere", "Unknown Region"),
        ("Carlton", "Southern Metropolitan"),
    ] {
        let mut payload = richmond_payload();
        payload["Suburb"] = json!(suburb);
        payload["Regionname"] = json!(region);

        let (status, body) = send(&app, Method::POST, "/predict", Some(payload)).await;
        assert_eq!(status.as_u16(), 200, "body: {body}");
        let cluster = parse(&body)["K_Means_Cluster"]
            .as_u64()
            .expect("cluster is an integer");
        assert!(cluster < 3);
    }
}

#[tokio::test]
async fn missing_key_yields_error_without_partial_results() {
    let models = TempModels::with_all_models();
    let app = app_for(&models);

    let mut payload = richmond_payload();
    payload.as_object_mut().unwrap().remove("Distance");

    let (status, body) = send(&app, Method::POST, "/predict", Some(payload)).await;
    assert_eq!(status.as_u16(), 500);

    let value = parse(&body);
    assert!(value["error"].as_str().unwrap().contains("Distance"));
    assert!(value.get("Linear_Regression_Price_Prediction").is_none());
}

#[tokio::test]
async fn get_predict_without_body_fails() {
    let models = TempModels::with_all_models();
    let app = app_for(&models);

    let (status, body) = send(&app, Method::GET, "/predict", None).await;
    assert_eq!(status.as_u16(), 500);
    assert!(parse(&body)["error"].is_string());
}

#[tokio::test]
async fn options_predict_is_empty_204() {
    let models = TempModels::with_all_models();
    let app = app_for(&models);

    let (status, body) = send(&app, Method::OPTIONS, "/predict", None).await;
    assert_eq!(status.as_u16(), 204);
    assert!(body.is_empty());

    let (status, body) = send_with_headers(
        &app,
        Method::OPTIONS,
        "/predict",
        &[
            ("origin", "http://localhost:5173"),
            ("access-control-request-method", "POST"),
            ("access-control-request-headers", "content-type"),
        ],
        None,
    )
    .await;
    assert_eq!(status.as_u16(), 204);
    assert!(body.is_empty());
}

#[tokio::test]
async fn health_is_unconditional() {
    let empty = TempModels::new();
    let app = app_for(&empty);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status.as_u16(), 200);
    assert_eq!(parse(&body), json!({"status": "healthy"}));
}

#[tokio::test]
async fn missing_models_start_but_fail_predictions() {
    let models = TempModels::with_all_models();
    std::fs::remove_file(models.dir.join(models.config().kmeans)).unwrap();
    let app = app_for(&models);

    let (status, body) = send(&app, Method::POST, "/predict", Some(richmond_payload())).await;
    assert_eq!(status.as_u16(), 500);
    assert!(parse(&body)["error"]
        .as_str()
        .unwrap()
        .contains("kmeans model is not loaded"));

    let (status, body) = send(&app, Method::GET, "/readyz", None).await;
    assert_eq!(status.as_u16(), 503);
    let value = parse(&body);
    assert_eq!(value["status"], "degraded");
    let kmeans = value["models"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["model"] == "kmeans")
        .unwrap();
    assert_eq!(kmeans["loaded"], false);
}

#[tokio::test]
async fn corrupt_artifact_is_reported() {
    let models = TempModels::with_all_models();
    models.write_raw(&models.config().knn, "{ not json");
    let app = app_for(&models);

    let (status, body) = send(&app, Method::GET, "/readyz", None).await;
    assert_eq!(status.as_u16(), 503);
    let knn = parse(&body)["models"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["model"] == "knn")
        .cloned()
        .unwrap();
    assert!(knn["error"].as_str().unwrap().contains("knn"));
}

#[tokio::test]
async fn readiness_ok_when_all_models_loaded() {
    let models = TempModels::with_all_models();
    let app = app_for(&models);

    let (status, body) = send(&app, Method::GET, "/readyz", None).await;
    assert_eq!(status.as_u16(), 200);
    let value = parse(&body);
    assert_eq!(value["status"], "ready");
    assert_eq!(value["feature_width"], FEATURE_WIDTH);
    assert_eq!(value["models"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn oversized_clustering_width_fails_request() {
    let models = TempModels::with_all_models();
    // Centroids narrower than the padded row.
    models.write(&models.config().kmeans, common::kmeans_json(FEATURE_WIDTH - 1));
    let app = app_for(&models);

    let (status, body) = send(&app, Method::POST, "/predict", Some(richmond_payload())).await;
    assert_eq!(status.as_u16(), 500);
    assert!(parse(&body)["error"]
        .as_str()
        .unwrap()
        .contains("shape mismatch"));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let models = TempModels::with_all_models();
    let app = app_for(&models);

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header("origin", "http://example.com")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(richmond_payload().to_string()))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
