//! HTTP API tests driving the router directly.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use malaria_risk_gateway::config::{Config, InferenceConfig};
use malaria_risk_gateway::{create_router, AppState};

fn app_for(inference_url: String) -> Router {
    let config = Config {
        port: 0,
        environment: "test".to_string(),
        log_format: "pretty".to_string(),
        inference: InferenceConfig::new(inference_url),
    };
    create_router(AppState::new(config).expect("state builds"))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn dashboard_form() -> Value {
    json!({
        "state": "Lagos",
        "zone": "South-West",
        "urban_rural": "urban",
        "household_size": 5,
        "num_children_under5": 2,
        "has_mosquito_nets": 1,
        "net_usage_rate": 0.8,
        "stagnant_water_nearby": 0,
        "distance_to_health_facility_km": 5,
        "avg_annual_rainfall_mm": 1500,
        "avg_temperature_celsius": 28
    })
}

#[tokio::test]
async fn health_reports_endpoint() {
    let app = app_for("http://inference.local/predict".to_string());
    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["inference_endpoint"], "http://inference.local/predict");
}

#[tokio::test]
async fn predict_returns_classified_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_partial_json(json!({ "model": "xgboost", "has_mosquito_nets": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "riskScore": 0.62 })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(format!("{}/predict", server.uri()));
    let (status, body) = send(
        app,
        post_json("/api/v1/predict", json!({ "model": "gradient_boosting", "features": dashboard_form() })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "gradient_boosting");
    assert_eq!(body["backendModel"], "xgboost");
    assert_eq!(body["riskScore"], 0.62);
    assert_eq!(body["riskLevel"], "High");
    assert_eq!(body["confidence"], 0.9);
    assert_eq!(body["recommendations"], json!([]));
    assert_eq!(body["reviewFlags"], json!([]));
    assert!(body["requestId"].is_string());
}

#[tokio::test]
async fn predict_maps_service_failure_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app_for(format!("{}/predict", server.uri()));
    let (status, body) = send(
        app,
        post_json("/api/v1/predict", json!({ "model": "random_forest", "features": dashboard_form() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], 502);
}

#[tokio::test]
async fn predict_rejects_invalid_record_with_field_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "riskScore": 0.5 })))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = dashboard_form();
    form["num_children_under5"] = json!(9);
    form["net_usage_rate"] = json!(-0.1);

    let app = app_for(format!("{}/predict", server.uri()));
    let (status, body) = send(
        app,
        post_json("/api/v1/predict", json!({ "model": "random_forest", "features": form })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["net_usage_rate", "num_children_under5"]);
}

#[tokio::test]
async fn predict_reports_undecodable_fields_with_range_violations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "riskScore": 0.5 })))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = dashboard_form();
    form["urban_rural"] = json!("suburban");
    form["has_mosquito_nets"] = json!(2);
    form["net_usage_rate"] = json!(1.5);
    form["num_children_under5"] = json!(9);

    let app = app_for(format!("{}/predict", server.uri()));
    let (status, body) = send(
        app,
        post_json("/api/v1/predict", json!({ "model": "random_forest", "features": form })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert_eq!(body["error"], "Invalid feature record");
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["has_mosquito_nets", "net_usage_rate", "num_children_under5", "urban_rural"]
    );
}

#[tokio::test]
async fn predict_missing_feature_is_reported() {
    let mut form = dashboard_form();
    form.as_object_mut().unwrap().remove("state");

    let app = app_for("http://127.0.0.1:1/predict".to_string());
    let (status, body) = send(
        app,
        post_json("/api/v1/predict", json!({ "model": "random_forest", "features": form })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["violations"], json!([{ "field": "state", "message": "is required" }]));
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let app = app_for("http://127.0.0.1:1/predict".to_string());
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header("content-type", "application/json")
        .body(Body::from("{\"model\": \"random_forest\","))
        .unwrap();

    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());

    let (status, body) = send(app, post_json("/api/v1/predict", json!({ "features": dashboard_form() }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn predict_unknown_model_is_not_found() {
    let app = app_for("http://127.0.0.1:1/predict".to_string());
    let (status, body) = send(
        app,
        post_json("/api/v1/predict", json!({ "model": "svm", "features": dashboard_form() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Unknown model: svm");
}

#[tokio::test]
async fn validate_flags_without_rejecting() {
    let mut form = dashboard_form();
    form["avg_temperature_celsius"] = json!(51.5);

    let app = app_for("http://127.0.0.1:1/predict".to_string());
    let (status, body) = send(app, post_json("/api/v1/features/validate", form)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["violations"], json!([]));
    assert_eq!(body["reviewFlags"][0]["kind"], "temperature_out_of_range");
}

#[tokio::test]
async fn validate_lists_undecodable_fields() {
    let mut form = dashboard_form();
    form["stagnant_water_nearby"] = json!("yes");
    form["household_size"] = json!(-1);

    let app = app_for("http://127.0.0.1:1/predict".to_string());
    let (status, body) = send(app, post_json("/api/v1/features/validate", form)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["household_size", "num_children_under5", "stagnant_water_nearby"]);
}

#[tokio::test]
async fn models_leaderboard_and_lookup() {
    let app = app_for("http://127.0.0.1:1/predict".to_string());

    let (status, body) = send(app.clone(), get("/api/v1/models")).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["gradient_boosting", "random_forest", "neural_network"]);

    let (status, body) = send(app.clone(), get("/api/v1/models/neural_network")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend_id"], "neural_net");
    assert_eq!(body["metrics"]["auc_roc"], 0.93);

    let (status, _) = send(app, get("/api/v1/models/xgboost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_datasets() {
    let app = app_for("http://127.0.0.1:1/predict".to_string());

    let (status, body) = send(app.clone(), get("/api/v1/analytics/overview")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalHouseholds"], 2000);
    assert_eq!(body["bestModelAccuracy"], 0.91);

    let (_, body) = send(app.clone(), get("/api/v1/analytics/regional-risk")).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(body[0]["avgRisk"], 0.78);

    let (_, body) = send(app.clone(), get("/api/v1/analytics/feature-importance")).await;
    assert_eq!(body[0]["feature"], "Avg Rainfall");

    let (_, body) = send(app.clone(), get("/api/v1/analytics/risk-trends")).await;
    assert_eq!(body.as_array().unwrap().len(), 12);

    let (_, body) = send(app, get("/api/v1/analytics/risk-distribution")).await;
    assert_eq!(body[3]["category"], "Critical Risk");
}
