//! Integration tests for the splits HTTP API.
//!
//! These tests drive the full router (middleware included) in-process with
//! the embedded calibration dataset; no listener or network is needed.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use splits::{calibration::Calibration, create_router};
use tower::ServiceExt;

fn app() -> Router {
    let calibration = Calibration::embedded().expect("embedded calibration should load");
    create_router(Arc::new(calibration))
}

async fn send(request: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let response = app().oneshot(request).await.expect("router should respond");
    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, body, request_id)
}

async fn get(uri: &str) -> (StatusCode, Value, Option<String>) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body, _) = send(request).await;
    (status, body)
}

#[tokio::test]
async fn test_health_check_sets_request_id() {
    let (status, _, request_id) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(request_id.is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let request = Request::get("/health")
        .header("x-request-id", "race-day-42")
        .body(Body::empty())
        .unwrap();
    let (_, _, request_id) = send(request).await;
    assert_eq!(request_id.as_deref(), Some("race-day-42"));
}

#[tokio::test]
async fn test_handicap_lookup() {
    let (status, body, _) = get("/handicap?sex=F&age=45&section=INV").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handicap_minutes"], 13);
    assert_eq!(body["group"], "F41-45");
    assert_eq!(body["start_time"], "8:12");
    assert_eq!(body["section_label"], "Invitational");
}

#[tokio::test]
async fn test_handicap_defaults_to_invitational() {
    let (status, body, _) = get("/handicap?sex=M&age=25").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["section"], "INV");
    assert_eq!(body["start_time"], "8:25");
}

#[tokio::test]
async fn test_handicap_out_of_range_is_not_found() {
    let (status, body, _) = get("/handicap?sex=M&age=5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("handicap"));
}

#[tokio::test]
async fn test_checkpoints_in_course_order() {
    let (status, body, _) = get("/checkpoints").await;
    assert_eq!(status, StatusCode::OK);
    let shorts: Vec<&str> = body["checkpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["short"].as_str().unwrap())
        .collect();
    assert_eq!(shorts, ["WG", "MW", "DY", "BC", "CA", "SR", "ST", "FI"]);
    assert_eq!(body["segment_keys"].as_array().unwrap().len(), 12);
    assert_eq!(body["segment_keys"][0], "s_wg");
}

#[tokio::test]
async fn test_targets_for_invitational() {
    let (status, body) = post(
        "/targets",
        json!({ "sex": "M", "age": 50, "section": "INV", "bias": 0.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handicap"]["handicap_minutes"], 7);
    assert_eq!(body["bias"]["label"], "Neutral");

    let targets = body["targets"].as_array().unwrap();
    assert_eq!(targets.len(), 4);
    let winner = &targets[0];
    assert_eq!(winner["key"], "1");
    assert_eq!(winner["category"], "winner");
    assert_eq!(winner["achievable"], true);
    assert_eq!(winner["actual_seconds"], 2850.0 + 420.0);
    assert_eq!(winner["actual"], "54:30");

    let splits = winner["splits"].as_array().unwrap();
    assert_eq!(splits.len(), 8);
    assert!(splits.iter().all(|s| s["delta_kind"] == "neutral"));
    assert_eq!(splits[7]["short"], "FI");
    assert_eq!(splits[7]["elapsed"], "54:30");
}

#[tokio::test]
async fn test_targets_for_runner_section_with_bias() {
    let (status, body) = post(
        "/targets",
        json!({ "sex": "F", "age": 30, "section": "DR", "bias": -2.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bias"]["label"], "Strong uphill");

    let keys: Vec<&str> = body["targets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["dr_winner", "750"]);

    let climb = &body["targets"][0]["splits"][2];
    assert_eq!(climb["delta_kind"], "faster");
    assert!(climb["delta"].as_str().unwrap().starts_with('-'));
}

#[tokio::test]
async fn test_targets_reject_out_of_range_bias() {
    let (status, _) = post(
        "/targets",
        json!({ "sex": "M", "age": 30, "section": "INV", "bias": 7.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_targets_missing_handicap() {
    let (status, _) = post(
        "/targets",
        json!({ "sex": "M", "age": 101, "section": "INV" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_predict_placement_from_split() {
    let (status, body) = post(
        "/predict",
        json!({
            "sex": "M",
            "age": 25,
            "section": "INV",
            "bias": 0.0,
            "checkpoint": "seg_s_m",
            "minutes": 15,
            "seconds": 5
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["split_seconds"], 905.0);
    assert_eq!(body["checkpoint"], "seg_s_m");
    assert_eq!(body["field_size"], 1502);

    let place = body["place"].as_u64().unwrap();
    assert!((400..=500).contains(&place), "place {place}");
    assert_eq!(body["splits"].as_array().unwrap().len(), 8);
    assert_eq!(body["splits"][1]["elapsed"], "15:05");
}

#[tokio::test]
async fn test_predict_rejects_unknown_checkpoint() {
    let (status, body) = post(
        "/predict",
        json!({
            "sex": "M",
            "age": 25,
            "section": "INV",
            "checkpoint": "summit",
            "minutes": 10
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("summit"));
}

#[tokio::test]
async fn test_predict_rejects_empty_split() {
    let (status, body) = post(
        "/predict",
        json!({
            "sex": "F",
            "age": 40,
            "section": "DR",
            "checkpoint": "s_wg"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("positive"));
}

#[tokio::test]
async fn test_openapi_document_lists_paths() {
    let (status, body, _) = get("/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    for path in ["/health", "/handicap", "/targets", "/predict", "/checkpoints"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
}
