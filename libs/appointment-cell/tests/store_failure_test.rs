use std::sync::Arc;

use axum::{http::{Method, StatusCode}, Router};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::appointment_routes;
use shared_config::AppConfig;
use shared_database::{AppState, RestDocumentStore};
use shared_utils::test_utils::{send_json, MockStoreResponses};

async fn app_backed_by(server: &MockServer) -> Router {
    let config = AppConfig {
        database_url: server.uri(),
        ..AppConfig::in_memory()
    };
    let state = AppState::new(Arc::new(RestDocumentStore::new(&config)));
    Router::new().nest("/appointments", appointment_routes(Arc::new(state)))
}

#[tokio::test]
async fn store_outage_is_reported_as_500() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(503).set_body_string("connection pool exhausted"))
        .mount(&server)
        .await;

    let (status, body) = send_json(app_backed_by(&server).await, Method::GET, "/appointments", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch appointments");
    assert!(body["error"].as_str().unwrap().contains("connection pool exhausted"));
}

#[tokio::test]
async fn store_schema_rejection_is_reported_as_400() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "value too long for type character varying(120)"
        })))
        .mount(&server)
        .await;

    let (status, body) = send_json(
        app_backed_by(&server).await,
        Method::POST,
        "/appointments",
        Some(json!({
            "patientName": "Jane",
            "dentistName": "Dr. Lee",
            "dateTime": "2025-06-01T10:30"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "value too long for type character varying(120)");
}

#[tokio::test]
async fn rows_from_the_store_are_served_with_underscore_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::appointment_row("a1", "Jane", "Dr. Lee", "2025-06-01T10:30:00Z")
        ])))
        .mount(&server)
        .await;

    let (status, body) = send_json(app_backed_by(&server).await, Method::GET, "/appointments", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["_id"], "a1");
    assert_eq!(body[0]["patientName"], "Jane");
}

#[tokio::test]
async fn undecodable_rows_are_a_store_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a1", "patientName": "Jane" }
        ])))
        .mount(&server)
        .await;

    let (status, body) = send_json(app_backed_by(&server).await, Method::GET, "/appointments", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch appointments");
}
