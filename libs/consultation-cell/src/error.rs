use thiserror::Error;
use uuid::Uuid;

use doctor_cell::models::DoctorError;
use shared_models::error::AppError;

#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("Consultation {0} not found")]
    SessionNotFound(Uuid),

    #[error("Message text cannot be empty")]
    EmptyMessage,

    #[error("Doctor {0} is not in the list currently shown")]
    DoctorNotShown(u32),

    #[error("No doctor selected for this booking")]
    NoDoctorSelected,

    #[error("Please select both date and time for your appointment.")]
    IncompleteBooking,

    #[error("Invalid booking month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid extraction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Doctor(#[from] DoctorError),
}

impl From<ConsultationError> for AppError {
    fn from(err: ConsultationError) -> Self {
        match err {
            ConsultationError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            ConsultationError::EmptyMessage | ConsultationError::DoctorNotShown(_) => {
                AppError::BadRequest(err.to_string())
            }
            ConsultationError::NoDoctorSelected => AppError::Conflict(err.to_string()),
            ConsultationError::IncompleteBooking => AppError::ValidationError(err.to_string()),
            ConsultationError::InvalidMonth(_) | ConsultationError::InvalidPattern(_) => {
                AppError::Internal(err.to_string())
            }
            ConsultationError::Doctor(e) => e.into(),
        }
    }
}
