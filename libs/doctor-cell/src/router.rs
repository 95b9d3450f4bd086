use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, DoctorCellState};

pub fn doctor_routes(state: Arc<DoctorCellState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/dates", get(handlers::get_available_dates))
        .route("/slots", get(handlers::get_time_slots))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(state)
}
