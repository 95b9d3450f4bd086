use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use doctor_cell::models::{AvailabilityView, Doctor, Specialty};

// ==============================================================================
// CLASSIFICATION
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// A show/see/find/get verb together with a specialty keyword.
    SpecialtyRequest(Specialty),
    /// A booking verb together with a doctor reference ("dr." / "doctor").
    NamedDoctorBooking,
    /// A booking verb with a date or time but no doctor reference.
    ImplicitBooking,
    SymptomOrQuestion,
}

/// Answer to the "see doctors or keep chatting" offer made after a symptom turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpChoice {
    ShowDoctors,
    Advice,
}

// ==============================================================================
// TRANSCRIPT
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

// ==============================================================================
// BOOKING
// ==============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    #[default]
    Consultation,
    FollowUp,
    CheckUp,
    Urgent,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "consultation",
            AppointmentType::FollowUp => "follow-up",
            AppointmentType::CheckUp => "check-up",
            AppointmentType::Urgent => "urgent",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// ISO `YYYY-MM-DD`.
    pub selected_date: Option<String>,
    /// 24-hour `H:MM`.
    pub selected_time: Option<String>,
    pub appointment_type: AppointmentType,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub symptoms: String,
}

impl BookingDraft {
    pub fn has_date_and_time(&self) -> bool {
        let filled = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.selected_date) && filled(&self.selected_time)
    }
}

/// Partial draft update; absent fields are left untouched, empty date or
/// time strings clear the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDraftRequest {
    pub selected_date: Option<String>,
    pub selected_time: Option<String>,
    pub appointment_type: Option<AppointmentType>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitMessageRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub doctor: Doctor,
    pub date: String,
    pub time: String,
    pub appointment_type: AppointmentType,
    pub message: String,
}

// ==============================================================================
// TURN HANDLING
// ==============================================================================

/// Work handed to the advice collaborator. `token` identifies the user turn
/// that asked for it; a completion carrying an older token is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRequest {
    pub token: u64,
    pub query: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied,
    NeedsAdvice(AdviceRequest),
}

// ==============================================================================
// SNAPSHOTS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ConsultationSnapshot {
    pub id: Uuid,
    pub phase: &'static str,
    pub transcript: Vec<ChatMessage>,
    pub candidates: Vec<AvailabilityView>,
    pub selected_doctor: Option<AvailabilityView>,
    pub draft: BookingDraft,
    pub show_doctors_list: bool,
    pub show_booking_form: bool,
    pub awaiting_advice: bool,
}
