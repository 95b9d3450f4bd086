use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

// ==============================================================================
// SPECIALTIES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    Cardiology,
    Dermatology,
    Neurology,
    Pediatrics,
    Dentistry,
    Orthopedics,
    Nephrology,
    Pulmonology,
    Gynecology,
    #[serde(rename = "General Practice")]
    GeneralPractice,
}

impl Specialty {
    /// Roster assignment order: doctor `i` practises `ALL[i % 10]`.
    pub const ALL: [Specialty; 10] = [
        Specialty::Cardiology,
        Specialty::Dermatology,
        Specialty::Neurology,
        Specialty::Pediatrics,
        Specialty::Dentistry,
        Specialty::Orthopedics,
        Specialty::Nephrology,
        Specialty::Pulmonology,
        Specialty::Gynecology,
        Specialty::GeneralPractice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "Cardiology",
            Specialty::Dermatology => "Dermatology",
            Specialty::Neurology => "Neurology",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Dentistry => "Dentistry",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Nephrology => "Nephrology",
            Specialty::Pulmonology => "Pulmonology",
            Specialty::Gynecology => "Gynecology",
            Specialty::GeneralPractice => "General Practice",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], " ");
        Specialty::ALL
            .iter()
            .copied()
            .find(|specialty| specialty.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| DoctorError::UnknownSpecialty(s.to_string()))
    }
}

// ==============================================================================
// DOCTOR MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: Specialty,
    pub experience: u32,
    pub rating: f32,
    pub price: u32,
    pub image: String,
}

impl Doctor {
    /// Display name with a leading "Dr." / "Dr" removed, e.g. "Sarah Thompson".
    pub fn name_without_title(&self) -> &str {
        strip_leading_title(&self.name)
    }
}

impl AsRef<Doctor> for Doctor {
    fn as_ref(&self) -> &Doctor {
        self
    }
}

/// A doctor decorated with a human-readable availability label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityView {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub availability: String,
}

impl AsRef<Doctor> for AvailabilityView {
    fn as_ref(&self) -> &Doctor {
        &self.doctor
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOption {
    pub value: String,
    pub label: String,
    pub is_requested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialtyQuery {
    pub specialty: Option<String>,
}

impl SpecialtyQuery {
    pub fn parse(&self) -> Result<Option<Specialty>, DoctorError> {
        match self.specialty.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

pub(crate) fn strip_leading_title(name: &str) -> &str {
    let trimmed = name.trim_start();
    let rest = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("dr") => &trimmed[2..],
        _ => return trimmed,
    };
    match rest.strip_prefix('.') {
        Some(after_dot) => after_dot.trim_start(),
        None if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim_start(),
        None => trimmed,
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("Doctor {0} not found")]
    NotFound(u32),
    #[error("Unknown specialty: {0}")]
    UnknownSpecialty(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::UnknownSpecialty(_) => AppError::BadRequest(err.to_string()),
        }
    }
}
