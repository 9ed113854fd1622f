//! Small in-memory models shared by unit tests.

use serde_json::json;

use crate::ml::{
    Artifact, KMeansModel, KnnClassifier, LinearRegressionModel, ModelBundle, RandomForestModel,
};

pub(crate) fn linear_regression() -> LinearRegressionModel {
    LinearRegressionModel::from_json(
        &json!({
            "encoder": {"columns": [
                {"transform": "passthrough", "field": "Rooms"},
                {"transform": "passthrough", "field": "Distance"},
                {"transform": "one_hot", "field": "Type", "categories": ["h", "u"]}
            ]},
            "coefficients": [0.2, -0.05, 0.3, 0.0],
            "intercept": 0.1
        })
        .to_string(),
    )
    .unwrap()
}

pub(crate) fn random_forest() -> RandomForestModel {
    RandomForestModel::from_json(
        &json!({
            "encoder": {"columns": [
                {"transform": "passthrough", "field": "Rooms"},
                {"transform": "passthrough", "field": "Distance"}
            ]},
            "trees": [
                {"nodes": [
                    {"feature": 0, "threshold": 2.5, "left": 1, "right": 2},
                    {"value": 0.6},
                    {"value": 1.2}
                ]},
                {"nodes": [
                    {"feature": 1, "threshold": 5.0, "left": 1, "right": 2},
                    {"value": 1.0},
                    {"value": 0.4}
                ]}
            ]
        })
        .to_string(),
    )
    .unwrap()
}

/// Two clusters of dimension `width`; the single-row-fit feature row lands in
/// cluster 0.
pub(crate) fn kmeans(width: usize) -> KMeansModel {
    let mut near = vec![0.0; width];
    for v in near.iter_mut().skip(3).take(3) {
        *v = 1.0;
    }
    let far = vec![5.0; width];
    KMeansModel::from_json(&json!({ "centroids": [near, far] }).to_string()).unwrap()
}

pub(crate) fn knn() -> KnnClassifier {
    KnnClassifier::from_json(
        &json!({
            "encoder": {"columns": [
                {"transform": "passthrough", "field": "Rooms"},
                {"transform": "passthrough", "field": "Distance"}
            ]},
            "k": 3,
            "points": [[3.0, 2.0], [3.0, 3.0], [2.0, 2.5], [5.0, 20.0], [6.0, 25.0]],
            "labels": ["Medium", "High", "Medium", "Low", "Low"]
        })
        .to_string(),
    )
    .unwrap()
}

pub(crate) fn sample_bundle(width: usize) -> ModelBundle {
    ModelBundle::from_models(linear_regression(), random_forest(), kmeans(width), knn())
}
