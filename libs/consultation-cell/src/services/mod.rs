pub mod conversation;
pub mod extraction;
pub mod intent;
pub mod orchestrator;
pub mod symptoms;

pub use conversation::{ConsultationServices, ConsultationSession, ConversationPhase, PhaseEvent};
pub use extraction::{DateTimeExtractor, ExtractedSchedule};
pub use intent::IntentClassifier;
pub use orchestrator::ConsultationOrchestrator;
pub use symptoms::{SymptomMatch, SymptomResolver};
