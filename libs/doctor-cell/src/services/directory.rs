use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{Doctor, DoctorError, Specialty};

const MALE_FIRST_NAMES: [&str; 20] = [
    "John", "Michael", "David", "James", "Robert", "William", "Christopher", "Joseph",
    "Thomas", "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Donald", "Steven",
    "Paul", "Andrew", "Joshua", "Kenneth",
];

const FEMALE_FIRST_NAMES: [&str; 20] = [
    "Emily", "Sophia", "Olivia", "Emma", "Sarah", "Jennifer", "Lisa", "Jessica",
    "Ashley", "Amanda", "Michelle", "Samantha", "Rachel", "Amy", "Angela", "Nicole",
    "Katherine", "Maria", "Rebecca", "Laura",
];

const LAST_NAMES: [&str; 24] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson",
    "Moore", "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin",
    "Thompson", "Garcia", "Martinez", "Robinson", "Clark", "Rodriguez", "Lewis", "Lee",
];

const MALE_IMAGES: [&str; 12] = [
    "/images/doctor1.webp",
    "/images/doctor2.webp",
    "/images/doctor3.webp",
    "/images/doctor4.webp",
    "/images/doctor5.webp",
    "/images/doctor6.webp",
    "/images/doctor7.webp",
    "/images/doctor8.webp",
    "/images/doctor9.webp",
    "/images/doctor10.webp",
    "/images/doctor19.webp",
    "/images/doctor20.webp",
];

const FEMALE_IMAGES: [&str; 8] = [
    "/images/doctor_female16.webp",
    "/images/doctor_female_black_mid20_with_tool.webp",
    "/images/doctor_female_mid20.webp",
    "/images/doctor_female_mid30_with_tool.webp",
    "/images/doctor_female_mid40.webp",
    "/images/doctor_female_mid40_india.webp",
    "/images/doctor_female_mid50.webp",
    "/images/doctor_white_female_mid30_with_tool_square.webp",
];

/// Immutable, shareable doctor roster. Order is significant: availability
/// labels and fallback selections are keyed by position.
#[derive(Debug, Clone)]
pub struct Roster {
    doctors: Arc<Vec<Doctor>>,
}

impl Roster {
    pub fn from_doctors(doctors: Vec<Doctor>) -> Self {
        Self { doctors: Arc::new(doctors) }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn get(&self, id: u32) -> Result<&Doctor, DoctorError> {
        self.doctors
            .iter()
            .find(|doctor| doctor.id == id)
            .ok_or(DoctorError::NotFound(id))
    }

    /// Roster position of a doctor, if present.
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.doctors.iter().position(|doctor| doctor.id == id)
    }

    pub fn by_specialty(&self, specialty: Specialty) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|doctor| doctor.specialty == specialty)
            .collect()
    }

    pub fn first_of(&self, specialty: Specialty) -> Option<&Doctor> {
        self.doctors.iter().find(|doctor| doctor.specialty == specialty)
    }
}

pub struct DirectoryService;

impl DirectoryService {
    pub fn from_config(config: &AppConfig) -> Roster {
        Self::generate(config.roster_size, config.roster_seed)
    }

    /// Build a roster of `size` doctors. A seed makes the random attributes
    /// (experience, rating, price) reproducible; names, images and
    /// specialties are always positional.
    pub fn generate(size: usize, seed: Option<u64>) -> Roster {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let doctors: Vec<Doctor> = (0..size)
            .map(|index| Self::build_doctor(index, &mut rng))
            .collect();

        info!("Generated doctor roster with {} entries (seeded: {})", doctors.len(), seed.is_some());
        Roster::from_doctors(doctors)
    }

    fn build_doctor(index: usize, rng: &mut StdRng) -> Doctor {
        let is_male = index < MALE_IMAGES.len();

        let (first_name, image) = if is_male {
            (
                MALE_FIRST_NAMES[index % MALE_FIRST_NAMES.len()],
                MALE_IMAGES[index % MALE_IMAGES.len()],
            )
        } else {
            let female_index = index - MALE_IMAGES.len();
            (
                FEMALE_FIRST_NAMES[female_index % FEMALE_FIRST_NAMES.len()],
                FEMALE_IMAGES[female_index % FEMALE_IMAGES.len()],
            )
        };
        let last_name = LAST_NAMES[index % LAST_NAMES.len()];
        let specialty = Specialty::ALL[index % Specialty::ALL.len()];

        let doctor = Doctor {
            id: index as u32 + 1,
            name: format!("Dr. {} {}", first_name, last_name),
            specialty,
            experience: rng.gen_range(5..20),
            rating: rng.gen_range(40..=50) as f32 / 10.0,
            price: rng.gen_range(100..200),
            image: image.to_string(),
        };

        debug!("Roster entry {}: {} ({})", doctor.id, doctor.name, doctor.specialty);
        doctor
    }
}
