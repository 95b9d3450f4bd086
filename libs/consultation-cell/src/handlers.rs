use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{SubmitMessageRequest, UpdateDraftRequest};
use crate::services::ConsultationOrchestrator;

#[axum::debug_handler]
pub async fn open_consultation(
    State(orchestrator): State<Arc<ConsultationOrchestrator>>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let snapshot = orchestrator.open_session().await;

    Ok((StatusCode::CREATED, Json(json!({ "consultation": snapshot }))))
}

#[axum::debug_handler]
pub async fn get_consultation(
    State(orchestrator): State<Arc<ConsultationOrchestrator>>,
    Path(consultation_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let snapshot = orchestrator.snapshot(consultation_id).await?;

    Ok(Json(json!({ "consultation": snapshot })))
}

#[axum::debug_handler]
pub async fn send_message(
    State(orchestrator): State<Arc<ConsultationOrchestrator>>,
    Path(consultation_id): Path<Uuid>,
    Json(request): Json<SubmitMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let snapshot = orchestrator.handle_turn(consultation_id, &request.text).await?;

    Ok(Json(json!({ "consultation": snapshot })))
}

#[axum::debug_handler]
pub async fn select_doctor(
    State(orchestrator): State<Arc<ConsultationOrchestrator>>,
    Path((consultation_id, doctor_id)): Path<(Uuid, u32)>,
) -> Result<Json<Value>, AppError> {
    let snapshot = orchestrator.select_doctor(consultation_id, doctor_id).await?;

    Ok(Json(json!({ "consultation": snapshot })))
}

#[axum::debug_handler]
pub async fn update_draft(
    State(orchestrator): State<Arc<ConsultationOrchestrator>>,
    Path(consultation_id): Path<Uuid>,
    Json(update): Json<UpdateDraftRequest>,
) -> Result<Json<Value>, AppError> {
    let snapshot = orchestrator.update_draft(consultation_id, update).await?;

    Ok(Json(json!({ "consultation": snapshot })))
}

#[axum::debug_handler]
pub async fn submit_booking(
    State(orchestrator): State<Arc<ConsultationOrchestrator>>,
    Path(consultation_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let (confirmation, snapshot) = orchestrator.submit_booking(consultation_id).await?;

    Ok(Json(json!({
        "confirmation": confirmation,
        "consultation": snapshot
    })))
}

#[axum::debug_handler]
pub async fn close_consultation(
    State(orchestrator): State<Arc<ConsultationOrchestrator>>,
    Path(consultation_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    orchestrator.close_session(consultation_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Consultation closed"
    })))
}
