use std::sync::Arc;

use assert_matches::assert_matches;

use advice_cell::models::{AdviceResponse, MODEL_CONFIDENCE};
use consultation_cell::error::ConsultationError;
use consultation_cell::models::{AdviceRequest, BookingDraft, Role, TurnOutcome, UpdateDraftRequest};
use consultation_cell::services::conversation::{QUESTION_PLACEHOLDER, SEED_GREETING, SYMPTOM_PLACEHOLDER};
use consultation_cell::services::{ConsultationServices, ConsultationSession, ConversationPhase};
use doctor_cell::models::Specialty;
use doctor_cell::services::{AvailabilityService, DirectoryService};
use shared_utils::test_utils::{test_clock, TestConfig};

fn create_services() -> Arc<ConsultationServices> {
    let roster = DirectoryService::generate(20, Some(42));
    Arc::new(ConsultationServices::new(roster, Arc::new(test_clock()), 8).unwrap())
}

fn create_session() -> ConsultationSession {
    ConsultationSession::new(create_services())
}

fn advice(message: &str) -> AdviceResponse {
    AdviceResponse {
        message: message.to_string(),
        confidence: MODEL_CONFIDENCE,
        suggested_specialties: vec![],
    }
}

fn last_text(session: &ConsultationSession) -> &str {
    session.transcript().last().map(|m| m.text.as_str()).unwrap_or_default()
}

fn candidate_ids(session: &ConsultationSession) -> Vec<u32> {
    session.phase().candidates().iter().map(|v| v.doctor.id).collect()
}

fn expect_advice(outcome: TurnOutcome) -> AdviceRequest {
    match outcome {
        TurnOutcome::NeedsAdvice(request) => request,
        TurnOutcome::Replied => panic!("expected the turn to ask for advice"),
    }
}

#[test]
fn test_new_session_starts_with_seed_greeting() {
    let session = create_session();

    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript()[0].text, SEED_GREETING);
    assert_eq!(session.transcript()[0].role, Role::Assistant);
    assert_eq!(session.phase(), &ConversationPhase::Greeting);
    assert!(!session.is_awaiting_advice());
}

#[test]
fn test_specialty_request_shows_matching_doctors() {
    let mut session = create_session();

    let outcome = session.submit_text("Show me cardiologists").unwrap();

    assert_eq!(outcome, TurnOutcome::Replied);
    assert_eq!(session.phase().name(), "doctors_shown");
    assert_eq!(candidate_ids(&session), vec![1, 11]);
    assert!(session
        .phase()
        .candidates()
        .iter()
        .all(|v| v.doctor.specialty == Specialty::Cardiology));
    assert!(last_text(&session).starts_with("Here are the available Cardiology doctors"));

    let snapshot = session.snapshot();
    assert!(snapshot.show_doctors_list);
    assert!(!snapshot.show_booking_form);
}

#[test]
fn test_named_doctor_booking_prefills_draft() {
    let mut session = create_session();

    let outcome = session
        .submit_text("I want to book an appointment with Dr. Sarah Thomson on aug 12 at 9am")
        .unwrap();

    assert_eq!(outcome, TurnOutcome::Replied);
    assert_eq!(session.phase().name(), "booking_in_progress");
    assert_eq!(session.phase().selected_doctor().map(|v| v.doctor.id), Some(17));
    assert_eq!(session.draft().selected_date.as_deref(), Some("2025-08-12"));
    assert_eq!(session.draft().selected_time.as_deref(), Some("9:00"));
    assert!(last_text(&session).starts_with("Perfect! I found Dr. Sarah Thompson, a Nephrology specialist."));
    assert!(last_text(&session).ends_with("I've pre-filled your preferred date and time."));
}

#[test]
fn test_unknown_doctor_name_lists_everyone() {
    let mut session = create_session();

    session.submit_text("book an appointment with dr. zhivago").unwrap();

    assert_eq!(session.phase().name(), "doctors_shown");
    assert_eq!(session.phase().candidates().len(), 20);
    assert!(last_text(&session).starts_with("I couldn't find a doctor with that exact name"));
}

#[test]
fn test_implicit_booking_then_selection_prefills_time() {
    let mut session = create_session();

    session.submit_text("I'd like to book for tuesday at 10am").unwrap();
    assert_eq!(session.phase().candidates().len(), 20);

    session.select_doctor(3).unwrap();

    assert_eq!(session.phase().name(), "booking_in_progress");
    assert_eq!(session.draft().selected_date, None);
    assert_eq!(session.draft().selected_time.as_deref(), Some("10:00"));
    assert!(last_text(&session).starts_with("Great choice! Dr. David Williams is an excellent Neurology specialist."));
}

#[test]
fn test_symptom_turn_requests_advice_then_offers_doctors() {
    let mut session = create_session();

    let request = expect_advice(session.submit_text("I have a headache").unwrap());

    assert_eq!(request.token, 1);
    assert_eq!(request.query, "I have a headache");
    assert_eq!(request.context, "");
    assert_eq!(session.phase().name(), "awaiting_intent");
    assert_eq!(candidate_ids(&session), vec![3, 13]);
    assert!(!session.snapshot().show_doctors_list);
    assert_eq!(session.draft().symptoms, "I have a headache");
    assert_eq!(last_text(&session), SYMPTOM_PLACEHOLDER);
    assert!(session.is_awaiting_advice());

    assert!(session.complete_advice(request.token, advice("Rest and hydrate.")));

    assert!(!session.is_awaiting_advice());
    assert_eq!(session.transcript().len(), 3);
    assert!(last_text(&session).starts_with("Rest and hydrate."));
    assert!(last_text(&session).contains("I've found 2 specialist doctors"));

    let outcome = session.submit_text("show doctors").unwrap();

    assert_eq!(outcome, TurnOutcome::Replied);
    assert_eq!(session.phase().name(), "doctors_shown");
    assert_eq!(candidate_ids(&session), vec![3, 13]);
}

#[test]
fn test_superseded_advice_is_discarded() {
    let mut session = create_session();

    let first = expect_advice(session.submit_text("I have a headache").unwrap());
    let second = expect_advice(session.submit_text("my tooth hurts").unwrap());

    assert!(second.token > first.token);
    assert!(!session.complete_advice(first.token, advice("about the headache")));
    assert!(session.is_awaiting_advice());
    assert!(session.complete_advice(second.token, advice("about the tooth")));

    let texts: Vec<&str> = session.transcript().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[1], "I have a headache");
    assert_eq!(texts[2], "my tooth hurts");
    assert!(texts[3].starts_with("about the tooth"));
    assert!(!texts.iter().any(|t| t.contains("about the headache") || *t == SYMPTOM_PLACEHOLDER));
    assert_eq!(session.phase().candidates()[0].doctor.specialty, Specialty::Dentistry);
}

#[test]
fn test_advice_follow_up_uses_stored_symptoms_and_context() {
    let mut session = create_session();

    let request = expect_advice(session.submit_text("I have a headache").unwrap());
    session.complete_advice(request.token, advice("Rest and hydrate."));

    let follow_up = expect_advice(session.submit_text("option 2").unwrap());

    assert_eq!(follow_up.query, "I have a headache");
    assert_eq!(follow_up.context, "I have a headache | Rest and hydrate.");
    assert_eq!(last_text(&session), QUESTION_PLACEHOLDER);

    session.complete_advice(follow_up.token, advice("Keep a headache diary."));
    assert!(last_text(&session).starts_with("I'd be happy to provide you with health guidance!"));
    assert!(last_text(&session).contains("Keep a headache diary."));
    assert_eq!(session.phase().name(), "awaiting_intent");
}

#[test]
fn test_question_while_list_shown_keeps_list() {
    let mut session = create_session();
    session.submit_text("show me cardiologists").unwrap();

    let request = expect_advice(session.submit_text("what should I eat for my heart?").unwrap());
    session.complete_advice(request.token, advice("Less salt."));

    assert_eq!(session.phase().name(), "doctors_shown");
    assert_eq!(candidate_ids(&session), vec![1, 11]);
    assert!(last_text(&session).contains("Based on your question about \"what should I eat for my heart?\""));
}

#[test]
fn test_context_window_keeps_recent_exchanges() {
    let mut session = create_session();

    let turns = [
        ("I have a headache", "A1"),
        ("my tooth hurts", "A2"),
        ("chest pain again", "A3"),
        ("my back pain is worse", "A4"),
    ];
    for (text, reply) in turns {
        let request = expect_advice(session.submit_text(text).unwrap());
        session.complete_advice(request.token, advice(reply));
    }

    let request = expect_advice(session.submit_text("I feel dizzy and have a headache").unwrap());

    assert_eq!(request.context, "A3 | my back pain is worse | A4");
}

#[test]
fn test_unclear_input_asks_for_clarification() {
    let mut session = create_session();

    let outcome = session.submit_text("hi").unwrap();

    assert_eq!(outcome, TurnOutcome::Replied);
    assert_eq!(session.phase(), &ConversationPhase::Greeting);
    assert!(last_text(&session).starts_with("I'm sorry, I don't understand"));
    assert!(!session.is_awaiting_advice());
}

#[test]
fn test_empty_message_is_rejected() {
    let mut session = create_session();

    assert_matches!(session.submit_text("   "), Err(ConsultationError::EmptyMessage));
    assert_eq!(session.transcript().len(), 1);
}

#[test]
fn test_booking_end_to_end_resets_session() {
    let mut session = create_session();
    let config = TestConfig::default().to_app_config();
    let availability = AvailabilityService::from_config(&config, Arc::new(test_clock()));

    session.submit_text("show me cardiology doctors").unwrap();
    let doctor_id = candidate_ids(&session)[0];
    session.select_doctor(doctor_id).unwrap();

    let date = availability.available_dates(Some(Specialty::Cardiology))[0].value.clone();
    let time = AvailabilityService::time_slots(Some(Specialty::Cardiology))[0].value.clone();
    session.update_draft(UpdateDraftRequest {
        selected_date: Some(date.clone()),
        selected_time: Some(time.clone()),
        full_name: Some("Jane Patient".to_string()),
        ..Default::default()
    });

    let confirmation = session.submit_booking().unwrap();

    assert_eq!(confirmation.doctor.id, doctor_id);
    assert_eq!(confirmation.date, date);
    assert_eq!(confirmation.time, time);
    assert_eq!(
        confirmation.message,
        format!("Appointment booked with Dr. John Smith on {} at {} for consultation!", date, time)
    );

    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript()[0].text, SEED_GREETING);
    assert_eq!(session.transcript()[0].id, 1);
    assert_eq!(session.draft(), &BookingDraft::default());
    assert_eq!(session.phase(), &ConversationPhase::Greeting);
}

#[test]
fn test_incomplete_booking_keeps_draft() {
    let mut session = create_session();
    session.submit_text("show me cardiologists").unwrap();
    session.select_doctor(1).unwrap();
    session.update_draft(UpdateDraftRequest {
        selected_date: Some("2025-08-05".to_string()),
        ..Default::default()
    });

    let result = session.submit_booking();

    assert_matches!(result, Err(ConsultationError::IncompleteBooking));
    assert_eq!(session.phase().name(), "booking_in_progress");
    assert_eq!(session.draft().selected_date.as_deref(), Some("2025-08-05"));
}

#[test]
fn test_empty_date_clears_field() {
    let mut session = create_session();
    session.update_draft(UpdateDraftRequest {
        selected_date: Some("2025-08-05".to_string()),
        selected_time: Some("9:00".to_string()),
        ..Default::default()
    });

    session.update_draft(UpdateDraftRequest {
        selected_date: Some("  ".to_string()),
        ..Default::default()
    });

    assert_eq!(session.draft().selected_date, None);
    assert_eq!(session.draft().selected_time.as_deref(), Some("9:00"));
}

#[test]
fn test_booking_requires_selected_doctor() {
    let mut session = create_session();

    assert_matches!(session.submit_booking(), Err(ConsultationError::NoDoctorSelected));
}

#[test]
fn test_selecting_doctor_not_shown_is_rejected() {
    let mut session = create_session();

    assert_matches!(session.select_doctor(1), Err(ConsultationError::DoctorNotShown(1)));

    session.submit_text("show me cardiologists").unwrap();
    assert_matches!(session.select_doctor(3), Err(ConsultationError::DoctorNotShown(3)));
    assert_eq!(session.phase().name(), "doctors_shown");
}

#[test]
fn test_reset_drops_pending_advice() {
    let mut session = create_session();
    let request = expect_advice(session.submit_text("I have a headache").unwrap());

    session.reset();

    assert!(!session.complete_advice(request.token, advice("too late")));
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.phase(), &ConversationPhase::Greeting);
}
