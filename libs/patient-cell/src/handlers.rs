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

use crate::models::{CreatePatientRequest, Patient, UpdatePatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let service = PatientService::new(&state);

    let patients = service
        .list_patients()
        .await
        .map_err(|e| e.into_app_error("Failed to fetch patients"))?;

    Ok(Json(patients))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let service = PatientService::new(&state);

    let patient = service
        .create_patient(request)
        .await
        .map_err(|e| e.into_app_error("Failed to create patient"))?;

    Ok((StatusCode::CREATED, Json(patient)))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&state);

    let patient = service
        .get_patient(&patient_id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch patient"))?;

    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
    JsonBody(request): JsonBody<UpdatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&state);

    let patient = service
        .update_patient(&patient_id, request)
        .await
        .map_err(|e| e.into_app_error("Failed to update patient"))?;

    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    service
        .delete_patient(&patient_id)
        .await
        .map_err(|e| e.into_app_error("Failed to delete patient"))?;

    Ok(Json(json!({ "message": "Patient deleted successfully" })))
}
