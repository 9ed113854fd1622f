#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use housing_predictor::config::ModelsConfig;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tower::ServiceExt;
use uuid::Uuid;

pub const FEATURE_WIDTH: usize = 383;

/// Model artifacts written to a throwaway directory, removed on drop
pub struct TempModels {
    pub dir: PathBuf,
}

impl TempModels {
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!(
            "housing-predictor-it-{}",
            Uuid::new_v4().simple()
        ));
        fs::create_dir_all(&dir).expect("failed to create temp model dir");
        Self { dir }
    }

    /// Write all four artifacts with the default file names
    pub fn with_all_models() -> Self {
        let models = Self::new();
        let config = models.config();
        models.write(&config.linear_regression, linear_regression_json());
        models.write(&config.random_forest, random_forest_json());
        models.write(&config.kmeans, kmeans_json(FEATURE_WIDTH));
        models.write(&config.knn, knn_json());
        models
    }

    pub fn write(&self, name: &str, artifact: Value) {
        fs::write(self.dir.join(name), artifact.to_string()).expect("failed to write artifact");
    }

    pub fn write_raw(&self, name: &str, content: &str) {
        fs::write(self.dir.join(name), content).expect("failed to write artifact");
    }

    pub fn config(&self) -> ModelsConfig {
        ModelsConfig {
            dir: self.dir.clone(),
            ..ModelsConfig::default()
        }
    }
}

impl Drop for TempModels {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

pub fn linear_regression_json() -> Value {
    json!({
        "encoder": {"columns": [
            {"transform": "scale", "field": "Rooms", "mean": 3.0, "scale": 1.0},
            {"transform": "scale", "field": "Distance", "mean": 10.0, "scale": 5.0},
            {"transform": "passthrough", "field": "Propertycount"},
            {"transform": "one_hot", "field": "Type", "categories": ["h", "t", "u"]},
            {"transform": "one_hot", "field": "Regionname", "categories": [
                "Eastern Metropolitan", "Northern Metropolitan", "Southern Metropolitan"
            ]}
        ]},
        "coefficients": [0.25, -0.2, 0.00001, 0.3, 0.0, -0.2, 0.05, 0.1, 0.4],
        "intercept": 0.6,
        "metadata": {"trained_on": "melbourne housing snapshot"}
    })
}

pub fn random_forest_json() -> Value {
    json!({
        "encoder": {"columns": [
            {"transform": "passthrough", "field": "Rooms"},
            {"transform": "passthrough", "field": "Distance"},
            {"transform": "one_hot", "field": "Type", "categories": ["h", "t", "u"]}
        ]},
        "trees": [
            {"nodes": [
                {"feature": 0, "threshold": 2.5, "left": 1, "right": 2},
                {"value": 0.7},
                {"feature": 1, "threshold": 8.0, "left": 3, "right": 4},
                {"value": 1.6},
                {"value": 1.1}
            ]},
            {"nodes": [
                {"feature": 2, "threshold": 0.5, "left": 1, "right": 2},
                {"value": 0.8},
                {"value": 1.4}
            ]}
        ]
    })
}

/// Three clusters; the single-row-fit feature row is nearest to cluster 1.
pub fn kmeans_json(width: usize) -> Value {
    let origin = vec![0.0; width];
    let mut legacy = vec![0.0; width];
    for v in legacy.iter_mut().skip(3).take(3) {
        *v = 0.9;
    }
    let far = vec![3.0; width];
    json!({ "centroids": [origin, legacy, far] })
}

pub fn knn_json() -> Value {
    json!({
        "encoder": {"columns": [
            {"transform": "scale", "field": "Rooms", "mean": 3.0, "scale": 1.0},
            {"transform": "scale", "field": "Distance", "mean": 10.0, "scale": 6.0}
        ]},
        "k": 3,
        "weights": "uniform",
        "points": [
            [0.0, -1.2],
            [1.0, -1.0],
            [0.0, -1.0],
            [-1.0, 1.5],
            [-1.0, 2.0],
            [2.0, 0.5]
        ],
        "labels": ["High", "High", "Medium", "Low", "Low", "High"]
    })
}

pub fn richmond_payload() -> Value {
    json!({
        "Suburb": "Richmond",
        "Rooms": 3,
        "Type": "h",
        "Propertycount": 5000,
        "Distance": 2.5,
        "Regionname": "Northern Metropolitan"
    })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    send_with_headers(app, method, uri, &[], body).await
}

pub async fn send_with_headers(
    app: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, String) {
    let mut request_builder = Request::builder().method(method).uri(uri);
    for (key, value) in headers {
        request_builder = request_builder.header(*key, *value);
    }

    let request = if let Some(payload) = body {
        request_builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("failed to build json request")
    } else {
        request_builder
            .body(Body::empty())
            .expect("failed to build empty request")
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = String::from_utf8_lossy(&bytes).to_string();

    (status, body)
}
