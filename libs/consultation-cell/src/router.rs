use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers;
use crate::services::ConsultationOrchestrator;

pub fn consultation_routes(state: Arc<ConsultationOrchestrator>) -> Router {
    Router::new()
        .route("/", post(handlers::open_consultation))
        .route(
            "/{consultation_id}",
            get(handlers::get_consultation).delete(handlers::close_consultation),
        )
        .route("/{consultation_id}/messages", post(handlers::send_message))
        .route("/{consultation_id}/doctors/{doctor_id}", post(handlers::select_doctor))
        .route("/{consultation_id}/draft", patch(handlers::update_draft))
        .route("/{consultation_id}/booking", post(handlers::submit_booking))
        .with_state(state)
}
