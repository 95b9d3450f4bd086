use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::SpecialtyQuery;
use crate::services::{AvailabilityService, Roster};

/// Shared state for the doctor directory routes.
#[derive(Clone)]
pub struct DoctorCellState {
    pub roster: Roster,
    pub availability: AvailabilityService,
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<DoctorCellState>>,
    Query(query): Query<SpecialtyQuery>,
) -> Result<Json<Value>, AppError> {
    let specialty = query.parse()?;

    let doctors = match specialty {
        Some(specialty) => {
            AvailabilityService::annotate(&state.roster, state.roster.by_specialty(specialty))
        }
        None => AvailabilityService::annotate_roster(&state.roster),
    };
    debug!("Listing {} doctors (specialty filter: {:?})", doctors.len(), specialty);

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<DoctorCellState>>,
    Path(doctor_id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.roster.get(doctor_id)?;
    let position = state.roster.position_of(doctor_id).unwrap_or(0);

    Ok(Json(json!(AvailabilityService::with_availability(doctor, position))))
}

#[axum::debug_handler]
pub async fn get_available_dates(
    State(state): State<Arc<DoctorCellState>>,
    Query(query): Query<SpecialtyQuery>,
) -> Result<Json<Value>, AppError> {
    let specialty = query.parse()?;
    let dates = state.availability.available_dates(specialty);

    Ok(Json(json!({
        "specialty": specialty,
        "dates": dates
    })))
}

#[axum::debug_handler]
pub async fn get_time_slots(
    State(_state): State<Arc<DoctorCellState>>,
    Query(query): Query<SpecialtyQuery>,
) -> Result<Json<Value>, AppError> {
    let specialty = query.parse()?;
    let slots = AvailabilityService::time_slots(specialty);

    Ok(Json(json!({
        "specialty": specialty,
        "slots": slots
    })))
}
