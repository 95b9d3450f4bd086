pub mod advisor;
pub mod guidance;
pub mod specialties;

pub use advisor::{
    advisor_from_config, fallback_response, FallbackAdvisor, FallbackReason, HealthAdvisor,
    OpenAiAdvisor,
};
pub use guidance::local_guidance;
pub use specialties::extract_specialties;
