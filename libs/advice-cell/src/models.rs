use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::models::Specialty;

/// Confidence reported when the model produced the advice.
pub const MODEL_CONFIDENCE: f32 = 0.85;
/// Confidence reported for the static fallback message.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub message: String,
    pub confidence: f32,
    pub suggested_specialties: Vec<Specialty>,
}

impl AdviceResponse {
    pub fn is_fallback(&self) -> bool {
        self.confidence < MODEL_CONFIDENCE
    }
}

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("Advice service is not configured")]
    NotConfigured,

    #[error("Advice request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Advice service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid advice response format")]
    MalformedResponse,
}
