// libs/doctor-cell/tests/handlers_test.rs

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::handlers::DoctorCellState;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::{AvailabilityService, DirectoryService};
use shared_utils::test_utils::{test_clock, TestConfig};

fn create_app() -> Router {
    let config = TestConfig::default().to_app_config();
    let state = DoctorCellState {
        roster: DirectoryService::from_config(&config),
        availability: AvailabilityService::from_config(&config, Arc::new(test_clock())),
    };
    doctor_routes(Arc::new(state))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_list_all_doctors() {
    let (status, body) = get_json(create_app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 20);
    assert_eq!(body["doctors"][0]["availability"], "Available today");
    assert_eq!(body["doctors"][1]["availability"], "Available tomorrow");
}

#[tokio::test]
async fn test_list_doctors_by_specialty() {
    let (status, body) = get_json(create_app(), "/?specialty=General%20Practice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["doctors"][0]["specialty"], "General Practice");
}

#[tokio::test]
async fn test_unknown_specialty_is_bad_request() {
    let (status, body) = get_json(create_app(), "/?specialty=astrology").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("astrology"));
}

#[tokio::test]
async fn test_get_doctor_by_id() {
    let (status, body) = get_json(create_app(), "/17").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Dr. Sarah Thompson");
    assert_eq!(body["specialty"], "Nephrology");
}

#[tokio::test]
async fn test_missing_doctor_is_not_found() {
    let (status, _) = get_json(create_app(), "/404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dates_endpoint_respects_specialty() {
    let (status, body) = get_json(create_app(), "/dates?specialty=cardiology").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["specialty"], "Cardiology");
    assert_eq!(body["dates"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_slots_endpoint_for_dentistry() {
    let (status, body) = get_json(create_app(), "/slots?specialty=Dentistry").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slots"][0]["label"], "8:00 AM");
}
