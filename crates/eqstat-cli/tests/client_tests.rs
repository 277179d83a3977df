//! Client tests against a mock server.

use eqstat_cli::api::ApiClient;
use eqstat_cli::error::CliError;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASIC_AUTH: &str = "Basic b3BlcmF0b3I6c2VjcmV0";

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(
        server.uri(),
        "operator".to_string(),
        "secret".to_string(),
    )
    .expect("client")
}

#[tokio::test]
async fn test_history_parses_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": 3,
                "filename": "equipment.csv",
                "stored_path": "abc_equipment.csv",
                "uploaded_at": "2026-08-06T12:30:00Z",
                "total_count": 3,
                "avg_flowrate": 20.0,
                "avg_pressure": 3.5,
                "avg_temperature": 90.0
            }]
        })))
        .mount(&server)
        .await;

    let datasets = client(&server).history().await.expect("history");
    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[0].id, 3);
    assert_eq!(datasets[0].filename, "equipment.csv");
    assert_eq!(datasets[0].avg_flowrate, 20.0);
}

#[tokio::test]
async fn test_upload_surfaces_validation_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/datasets"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": {
                "code": "VALIDATION_ERROR",
                "message": "Missing columns: Pressure"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .upload("bad.csv", b"Equipment Name,Type\nP-101,Pump".to_vec())
        .await
        .expect_err("upload must fail");

    match err {
        CliError::Api(message) => assert!(message.contains("Missing columns: Pressure")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_parses_receipt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/datasets"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "id": 1,
                "uploaded_at": "2026-08-06T12:30:00Z",
                "summary": {
                    "total_count": 3,
                    "avg_flowrate": 20.0,
                    "avg_pressure": 3.5,
                    "avg_temperature": 90.0
                },
                "type_distribution": {"Pump": 2, "Valve": 1},
                "preview": {
                    "columns": ["Equipment Name", "Type"],
                    "rows": [["P-101", "Pump"]]
                }
            }
        })))
        .mount(&server)
        .await;

    let receipt = client(&server)
        .upload("equipment.csv", b"...".to_vec())
        .await
        .expect("upload");

    assert_eq!(receipt.id, 1);
    assert_eq!(receipt.summary.total_count, 3);
    assert_eq!(receipt.type_distribution.get("Pump"), Some(&2));
    assert_eq!(receipt.preview.rows.len(), 1);
}

#[tokio::test]
async fn test_report_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/42/report"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": {"code": "NOT_FOUND", "message": "Dataset 42 not found"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).report(42).await.expect_err("must fail");
    assert!(matches!(err, CliError::DatasetNotFound(42)));
}

#[tokio::test]
async fn test_report_returns_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/3/report"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7 fake".to_vec()),
        )
        .mount(&server)
        .await;

    let bytes = client(&server).report(3).await.expect("report");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    assert!(client(&server).health_check().await.expect("health"));
}
