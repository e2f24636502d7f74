use std::sync::Arc;

use axum::{http::{Method, StatusCode}, Router};
use serde_json::json;

use dentist_cell::dentist_routes;
use shared_database::AppState;
use shared_utils::test_utils::send_json;

fn app() -> Router {
    Router::new().nest("/dentists", dentist_routes(Arc::new(AppState::in_memory())))
}

#[tokio::test]
async fn post_dentist_stores_numeric_phone() {
    let (status, body) = send_json(
        app(),
        Method::POST,
        "/dentists",
        Some(json!({
            "name": "Dr. Lee",
            "specialization": "Ortho",
            "experience": 5,
            "phone": "555-000-1111"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phone"], json!(5550001111u64));
    assert_eq!(body["experience"], json!(5.0));
    assert!(body["_id"].is_string());
}

#[tokio::test]
async fn post_dentist_with_fractional_experience_is_201() {
    let (status, body) = send_json(
        app(),
        Method::POST,
        "/dentists",
        Some(json!({
            "name": "Dr. Lee",
            "specialization": "Ortho",
            "experience": 2.5,
            "phone": "555-000-1111"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["experience"], json!(2.5));
}

#[tokio::test]
async fn negative_experience_over_http_is_400() {
    let (status, body) = send_json(
        app(),
        Method::POST,
        "/dentists",
        Some(json!({
            "name": "Dr. Lee",
            "specialization": "Ortho",
            "experience": -2,
            "phone": "555-000-1111"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "experience cannot be negative");
    assert_eq!(body["fields"][0]["field"], "experience");
}

#[tokio::test]
async fn get_unknown_dentist_is_404() {
    let (status, body) = send_json(app(), Method::GET, "/dentists/unknown", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Dentist not found" }));
}

#[tokio::test]
async fn post_without_a_body_reports_every_missing_field() {
    let (status, body) = send_json(app(), Method::POST, "/dentists", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"].as_array().map(Vec::len), Some(4));
}
