pub mod availability;
pub mod directory;
pub mod matching;

pub use availability::AvailabilityService;
pub use directory::{DirectoryService, Roster};
pub use matching::DoctorNameMatcher;
