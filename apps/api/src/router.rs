use axum::{routing::get, Router};

use consultation_cell::router::consultation_routes;
use doctor_cell::router::doctor_routes;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic consultation API is running!" }))
        .nest("/doctors", doctor_routes(state.doctors))
        .nest("/consultations", consultation_routes(state.consultations))
}
