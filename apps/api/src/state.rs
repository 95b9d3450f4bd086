use std::sync::Arc;

use chrono::Duration;

use advice_cell::services::advisor_from_config;
use consultation_cell::{ConsultationError, ConsultationOrchestrator, ConsultationServices};
use doctor_cell::handlers::DoctorCellState;
use doctor_cell::services::{AvailabilityService, DirectoryService};
use shared_config::AppConfig;
use shared_utils::Clock;

pub struct AppState {
    pub doctors: Arc<DoctorCellState>,
    pub consultations: Arc<ConsultationOrchestrator>,
}

impl AppState {
    /// Generate the roster once and share it between the directory and
    /// consultation cells.
    pub fn build(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, ConsultationError> {
        let roster = DirectoryService::from_config(config);

        let doctors = DoctorCellState {
            roster: roster.clone(),
            availability: AvailabilityService::from_config(config, clock.clone()),
        };

        let services = ConsultationServices::from_config(config, roster, clock)?;
        let consultations = ConsultationOrchestrator::new(Arc::new(services), advisor_from_config(config))
            .with_idle_timeout(Duration::minutes(config.session_idle_minutes));

        Ok(Self {
            doctors: Arc::new(doctors),
            consultations: Arc::new(consultations),
        })
    }
}
