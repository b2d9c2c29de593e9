//! End-to-end tests driving the router in-process

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use heatwave::api::{create_router, AppState};
use heatwave::dataset::Dataset;
use heatwave::query::QueryLimits;
use heatwave::types::Record;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

fn record(year: i32, day: u32, max_temp: f64) -> Record {
    let date = NaiveDate::from_ymd_opt(year, 7, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    Record::new(date, max_temp)
}

fn test_app() -> Router {
    let dataset = Dataset::from_records(vec![
        record(2023, 1, 32.0),
        record(2023, 2, 35.5),
        record(2023, 3, 37.0),
        record(2024, 1, 36.0),
        record(2024, 2, 33.0),
        record(2025, 1, 38.5),
    ]);
    create_router(AppState::with_dataset(
        Arc::new(dataset),
        QueryLimits::default(),
    ))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        panic!(
            "non-JSON response: status={} body={}",
            status,
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, value)
}

#[tokio::test]
async fn health_reports_coverage() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "row_count": 6, "years": [2023, 2024, 2025] }));
}

#[tokio::test]
async fn summary_for_year_with_threshold() {
    let app = test_app();
    let (status, body) =
        send_json(&app, "GET", "/summary?year=2023&threshold=35.0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2023);
    assert_eq!(body["n_days"], 3);
    assert_eq!(body["heatwave_days"], 2);
    assert_eq!(body["threshold"], 35.0);
    assert_eq!(body["max"], 37.0);
    assert_eq!(body["min"], 32.0);
    let mean = body["mean"].as_f64().unwrap();
    assert!((mean - (32.0 + 35.5 + 37.0) / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn summary_defaults_cover_all_rows() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], Value::Null);
    assert_eq!(body["n_days"], 6);
    assert_eq!(body["threshold"], 33.0);
    assert_eq!(body["heatwave_days"], 5);
}

#[tokio::test]
async fn summary_unknown_year_is_404() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/summary?year=9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8_lossy(&body).contains("9999"));
}

#[tokio::test]
async fn malformed_year_is_400() {
    let app = test_app();
    let (status, _) = send(&app, "GET", "/summary?year=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/top-heat-days?year=20x3", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn top_heat_days_ranked_descending() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/top-heat-days?k=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["k"], 3);

    let data = body["data"].as_array().unwrap();
    let temps: Vec<f64> = data.iter().map(|r| r["max_temp"].as_f64().unwrap()).collect();
    assert_eq!(temps, vec![38.5, 37.0, 36.0]);
    assert_eq!(data[0]["date"], "2025-07-01T00:00:00");
    assert_eq!(data[0]["year"], 2025);
}

#[tokio::test]
async fn top_heat_days_for_year_caps_at_available() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/top-heat-days?year=2024&k=31", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2024);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn top_heat_days_rejects_out_of_range_k() {
    let app = test_app();
    for uri in ["/top-heat-days?k=0", "/top-heat-days?k=32", "/top-heat-days?k=-1"] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
    }

    let (status, _) = send(&app, "GET", "/top-heat-days?year=1999&k=3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hello_and_echo() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/hello", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "안녕, API!");

    let payload = json!({ "a": 1, "nested": { "b": [true, null] } });
    let (status, body) = send_json(&app, "POST", "/echo", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "you_sent": payload }));
}

#[tokio::test]
async fn item_crud_flow() {
    let app = test_app();

    let (status, body) = send_json(&app, "GET", "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["1"]["name"], "사과");
    assert_eq!(body["2"]["price"], 2000);

    let grape = json!({ "name": "포도", "price": 3000 });
    let (status, body) = send_json(&app, "POST", "/items/3", Some(grape.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"], grape);

    let (status, _) = send(&app, "POST", "/items/3", Some(grape)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let green = json!({ "name": "청포도", "price": 3500 });
    let (status, body) = send_json(&app, "PUT", "/items/3", Some(green.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"], green);

    let (status, body) = send_json(&app, "GET", "/items/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, green);

    let (status, _) = send_json(&app, "DELETE", "/items/3", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/items/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/items/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", "/items/3", Some(json!({ "name": "x", "price": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn item_bodies_are_validated() {
    let app = test_app();

    let (status, _) = send(&app, "POST", "/items/10", Some(json!({ "name": "", "price": 10 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/items/10", Some(json!({ "name": "귤", "price": -5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/items/10", Some(json!({ "title": "귤" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/items/10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
