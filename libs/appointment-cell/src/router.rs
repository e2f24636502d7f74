use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/{appointment_id}",
            get(handlers::get_appointment)
                .put(handlers::update_appointment)
                .delete(handlers::delete_appointment),
        )
        .with_state(state)
}
