use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::appointment_routes;
use dentist_cell::dentist_routes;
use patient_cell::patient_routes;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let dental = Router::new()
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/dentists", dentist_routes(state));

    Router::new()
        .route("/", get(|| async { "Dental clinic API is running!" }))
        .nest("/dental", dental)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::json;
    use shared_utils::test_utils::send_json;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(AppState::in_memory()))
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn resources_are_mounted_under_dental() {
        for path in ["/dental/appointments", "/dental/patients", "/dental/dentists"] {
            let (status, body) = send_json(app(), Method::GET, path, None).await;
            assert_eq!(status, StatusCode::OK, "{}", path);
            assert_eq!(body, json!([]));
        }
    }

    #[tokio::test]
    async fn unknown_paths_are_404() {
        let (status, _) = send_json(app(), Method::GET, "/dental/nurses", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(app(), Method::GET, "/appointments", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn records_created_through_one_route_are_visible_through_another() {
        let app = app();

        let (status, created) = send_json(
            app.clone(),
            Method::POST,
            "/dental/appointments",
            Some(json!({
                "patientName": "Jane Doe",
                "dentistName": "Dr. Lee",
                "dateTime": "2025-03-01T09:30"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/dental/appointments/{}", created["_id"].as_str().unwrap());
        let (status, fetched) = send_json(app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["status"], "scheduled");
    }
}
