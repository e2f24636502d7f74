use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use shared_database::{AppState, InMemoryStore};

/// An in-memory backed state plus a handle on the store for assertions.
pub struct TestStore {
    pub store: Arc<InMemoryStore>,
    pub state: Arc<AppState>,
}

impl Default for TestStore {
    fn default() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = Arc::new(AppState::new(store.clone()));
        Self { store, state }
    }
}

impl TestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn appointment_row(id: &str, patient_name: &str, dentist_name: &str, date_time: &str) -> Value {
        json!({
            "id": id,
            "patientName": patient_name,
            "dentistName": dentist_name,
            "dateTime": date_time,
            "reason": "",
            "status": "scheduled",
            "createdAt": Utc::now().to_rfc3339(),
            "updatedAt": Utc::now().to_rfc3339()
        })
    }

    pub fn patient_row(id: &str, name: &str, email: &str, phone: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": phone,
            "address": "",
            "createdAt": Utc::now().to_rfc3339(),
            "updatedAt": Utc::now().to_rfc3339()
        })
    }

    pub fn dentist_row(id: &str, name: &str, specialization: &str, phone: u64) -> Value {
        json!({
            "id": id,
            "name": name,
            "specialization": specialization,
            "experience": 5,
            "phone": phone,
            "createdAt": Utc::now().to_rfc3339(),
            "updatedAt": Utc::now().to_rfc3339()
        })
    }
}

/// Drives one request through a router and decodes the JSON response body.
pub async fn send_json(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("valid test request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable response body");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}
