use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::JsonBody;

use crate::models::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentService::new(&state);

    let appointments = service
        .list_appointments()
        .await
        .map_err(|e| e.into_app_error("Failed to fetch appointments"))?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service
        .create_appointment(request)
        .await
        .map_err(|e| e.into_app_error("Failed to create appointment"))?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service
        .get_appointment(&appointment_id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch appointment"))?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
    JsonBody(request): JsonBody<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service
        .update_appointment(&appointment_id, request)
        .await
        .map_err(|e| e.into_app_error("Failed to update appointment"))?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    service
        .delete_appointment(&appointment_id)
        .await
        .map_err(|e| e.into_app_error("Failed to delete appointment"))?;

    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}
