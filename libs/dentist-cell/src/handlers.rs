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

use crate::models::{CreateDentistRequest, Dentist, UpdateDentistRequest};
use crate::services::dentist::DentistService;

#[axum::debug_handler]
pub async fn list_dentists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Dentist>>, AppError> {
    let dentist_service = DentistService::new(&state);

    let dentists = dentist_service.list_dentists().await
        .map_err(|e| e.into_app_error("Failed to fetch dentists"))?;

    Ok(Json(dentists))
}

#[axum::debug_handler]
pub async fn create_dentist(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateDentistRequest>,
) -> Result<(StatusCode, Json<Dentist>), AppError> {
    let dentist_service = DentistService::new(&state);

    let dentist = dentist_service.create_dentist(request).await
        .map_err(|e| e.into_app_error("Failed to create dentist"))?;

    Ok((StatusCode::CREATED, Json(dentist)))
}

#[axum::debug_handler]
pub async fn get_dentist(
    State(state): State<Arc<AppState>>,
    Path(dentist_id): Path<String>,
) -> Result<Json<Dentist>, AppError> {
    let dentist_service = DentistService::new(&state);

    let dentist = dentist_service.get_dentist(&dentist_id).await
        .map_err(|e| e.into_app_error("Failed to fetch dentist"))?;

    Ok(Json(dentist))
}

#[axum::debug_handler]
pub async fn update_dentist(
    State(state): State<Arc<AppState>>,
    Path(dentist_id): Path<String>,
    JsonBody(request): JsonBody<UpdateDentistRequest>,
) -> Result<Json<Dentist>, AppError> {
    let dentist_service = DentistService::new(&state);

    let dentist = dentist_service.update_dentist(&dentist_id, request).await
        .map_err(|e| e.into_app_error("Failed to update dentist"))?;

    Ok(Json(dentist))
}

#[axum::debug_handler]
pub async fn delete_dentist(
    State(state): State<Arc<AppState>>,
    Path(dentist_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let dentist_service = DentistService::new(&state);

    dentist_service.delete_dentist(&dentist_id).await
        .map_err(|e| e.into_app_error("Failed to delete dentist"))?;

    Ok(Json(json!({ "message": "Dentist deleted successfully" })))
}
