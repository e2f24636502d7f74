use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    /// The store failed; `message` names the operation, `detail` the cause.
    #[error("Database error: {message}: {detail}")]
    Database { message: String, detail: String },

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => json!({ "message": msg }),
            AppError::ValidationError(errors) => json!({
                "message": errors.to_string(),
                "fields": errors,
            }),
            AppError::Database { message, detail } => json!({
                "message": message,
                "error": detail,
            }),
            AppError::Internal(msg) => json!({
                "message": "Internal server error",
                "error": msg,
            }),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Error: {}: {}", status, self);
        } else {
            tracing::warn!("Error: {}: {}", status, self);
        }

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_message() {
        let (status, body) = body_of(AppError::NotFound("Patient not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Patient not found" }));
    }

    #[tokio::test]
    async fn validation_errors_list_every_field() {
        let mut errors = ValidationErrors::new();
        errors.require("patientName", None);
        errors.require("dateTime", None);

        let (status, body) = body_of(errors.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "patientName is required; dateTime is required");
        assert_eq!(body["fields"][0]["field"], "patientName");
        assert_eq!(body["fields"][1]["field"], "dateTime");
    }

    #[tokio::test]
    async fn database_errors_carry_detail() {
        let (status, body) = body_of(AppError::Database {
            message: "Failed to fetch appointments".into(),
            detail: "connection refused".into(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to fetch appointments");
        assert_eq!(body["error"], "connection refused");
    }
}
