use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_database::AppState;

use crate::handlers;

pub fn dentist_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_dentists).post(handlers::create_dentist))
        .route(
            "/{dentist_id}",
            get(handlers::get_dentist)
                .put(handlers::update_dentist)
                .delete(handlers::delete_dentist),
        )
        .with_state(state)
}
