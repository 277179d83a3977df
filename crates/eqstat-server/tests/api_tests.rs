//! Router-level tests: auth guard, envelopes, upload and error paths.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use eqstat_server::{app, config::Config, db, features::FeatureState, storage::LocalStorage};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "X-EQSTAT-TEST-BOUNDARY";
const CSV: &str = "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
                   P-101,Pump,10,2.5,80\n\
                   P-102,Pump,20,3.5,90\n\
                   V-201,Valve,30,4.5,100";

async fn test_app() -> (Router, TempDir) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    db::run_migrations(&pool).await.expect("migrations");

    let dir = TempDir::new().expect("temp dir");
    let state = FeatureState {
        db: pool,
        storage: LocalStorage::new(dir.path()),
    };

    let mut config = Config::default();
    config.auth.username = "operator".to_string();
    config.auth.password = "secret".to_string();

    (app::build_router(state, &config), dir)
}

fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{user}:{pass}")))
}

fn multipart_body(filename: &str, csv: &str) -> (String, String) {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}

fn upload_request(filename: &str, csv: &str) -> Request<Body> {
    let (content_type, body) = multipart_body(filename, csv);
    Request::builder()
        .method("POST")
        .uri("/api/v1/datasets")
        .header(header::AUTHORIZATION, auth_header("operator", "secret"))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .expect("request")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_health_is_open() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_api_requires_auth() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/datasets")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_api_rejects_wrong_credentials() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/datasets")
                .header(header::AUTHORIZATION, auth_header("operator", "wrong"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_history_empty_with_valid_credentials() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/datasets")
                .header(header::AUTHORIZATION, auth_header("operator", "secret"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_returns_summary_payload() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(upload_request("equipment.csv", CSV))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["summary"]["total_count"], 3);
    assert_eq!(json["data"]["summary"]["avg_flowrate"], 20.0);
    assert_eq!(json["data"]["type_distribution"]["Pump"], 2);
    assert_eq!(json["data"]["type_distribution"]["Valve"], 1);
    assert_eq!(json["data"]["preview"]["rows"].as_array().map(Vec::len), Some(3));

    // The record shows up in history, newest first.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/datasets")
                .header(header::AUTHORIZATION, auth_header("operator", "secret"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let json = response_json(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["data"][0]["filename"], "equipment.csv");
}

#[tokio::test]
async fn test_upload_missing_column_is_validation_error() {
    let (app, _dir) = test_app().await;

    let csv = "Equipment Name,Type,Flowrate,Temperature\nP-101,Pump,10,80";
    let response = app
        .clone()
        .oneshot(upload_request("bad.csv", csv))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(json["error"]["message"]
        .as_str()
        .map(|m| m.contains("Pressure"))
        .unwrap_or(false));

    // Nothing persisted.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/datasets")
                .header(header::AUTHORIZATION, auth_header("operator", "secret"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let json = response_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_report_unknown_dataset_is_not_found() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/datasets/999/report")
                .header(header::AUTHORIZATION, auth_header("operator", "secret"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_unknown_dataset_is_not_found() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/datasets/999")
                .header(header::AUTHORIZATION, auth_header("operator", "secret"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
