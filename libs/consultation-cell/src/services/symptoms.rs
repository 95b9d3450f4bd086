use tracing::{debug, instrument};

use doctor_cell::models::{AvailabilityView, Specialty};
use doctor_cell::services::{AvailabilityService, Roster};

/// Keyword sets in evaluation order; the first set with any keyword
/// contained in the input decides the specialty.
const SYMPTOM_KEYWORDS: [(Specialty, &[&str]); 9] = [
    (
        Specialty::Cardiology,
        &[
            "chest pain", "heart", "cardiac", "cardio", "blood pressure", "hypertension",
            "palpitations", "arrhythmia", "cardiovascular", "cholesterol", "coronary", "angina",
            "cardiologist",
        ],
    ),
    (
        Specialty::Dermatology,
        &[
            "skin", "rash", "acne", "dermatology", "dermatologist", "eczema", "psoriasis", "mole",
            "pigmentation", "dermatitis", "allergy", "itching", "hives", "wrinkles", "aging",
            "spots",
        ],
    ),
    (
        Specialty::Neurology,
        &[
            "headache", "neurological", "migraine", "neurology", "neurologist", "seizure",
            "epilepsy", "stroke", "paralysis", "numbness", "tingling", "memory loss", "confusion",
            "dizziness", "vertigo", "tremor", "parkinson", "alzheimer",
        ],
    ),
    (
        Specialty::Pediatrics,
        &[
            "child", "kid", "pediatric", "pediatrics", "pediatrician", "baby", "infant", "toddler",
            "adolescent", "teenager", "vaccination", "vaccine", "growth", "development",
            "fever in child",
        ],
    ),
    (
        Specialty::Dentistry,
        &[
            "tooth", "dental", "teeth", "dentist", "dentistry", "cavity", "gum", "oral",
            "toothache", "tooth ache", "tooth pain", "bleeding gums", "gingivitis",
            "periodontitis", "crown", "filling", "extraction", "root canal", "braces",
            "orthodontic", "jaw pain", "bad breath", "mouth",
        ],
    ),
    (
        Specialty::Orthopedics,
        &[
            "bone", "joint", "fracture", "orthopedic", "orthopedics", "orthopedist", "arthritis",
            "back pain", "neck pain", "shoulder pain", "knee pain", "hip pain", "ankle pain",
            "spine", "spinal", "ligament", "tendon", "muscle strain", "sports injury",
            "broken bone",
        ],
    ),
    (
        Specialty::Nephrology,
        &[
            "kidney", "urine", "nephrology", "nephrologist", "urinary", "bladder", "dialysis",
            "kidney stones", "blood in urine", "frequent urination", "kidney disease", "renal",
            "proteinuria", "creatinine", "hypertension kidney",
        ],
    ),
    (
        Specialty::Pulmonology,
        &[
            "lung", "breathing", "cough", "pulmonology", "pulmonologist", "asthma", "bronchitis",
            "pneumonia", "shortness of breath", "wheezing", "chest congestion", "respiratory",
            "copd", "tuberculosis", "sleep apnea", "oxygen", "airways",
        ],
    ),
    (
        Specialty::Gynecology,
        &[
            "women", "pregnancy", "menstrual", "gynecology", "gynecologist", "period",
            "menstruation", "pcos", "endometriosis", "ovarian", "uterine", "cervical",
            "pap smear", "contraception", "fertility", "menopause", "vaginal", "breast",
            "prenatal", "postpartum",
        ],
    ),
];

/// One doctor from each of these, in order, when no keyword set matches.
const FALLBACK_SPECIALTIES: [Specialty; 6] = [
    Specialty::Cardiology,
    Specialty::Neurology,
    Specialty::Dermatology,
    Specialty::Dentistry,
    Specialty::Pulmonology,
    Specialty::Orthopedics,
];

const FALLBACK_ROSTER_PREFIX: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct SymptomMatch {
    /// `None` when the diverse fallback set was returned.
    pub specialty: Option<Specialty>,
    pub doctors: Vec<AvailabilityView>,
}

#[derive(Debug, Clone)]
pub struct SymptomResolver {
    roster: Roster,
}

impl SymptomResolver {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// First specialty whose keyword set hits the lowercased text.
    pub fn match_specialty(&self, text: &str) -> Option<Specialty> {
        let lower = text.to_lowercase();
        SYMPTOM_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
            .map(|(specialty, _)| *specialty)
    }

    #[instrument(skip(self))]
    pub fn resolve(&self, text: &str) -> SymptomMatch {
        if let Some(specialty) = self.match_specialty(text) {
            let doctors = AvailabilityService::annotate(&self.roster, self.roster.by_specialty(specialty));
            debug!("Symptoms matched {} ({} doctors)", specialty, doctors.len());
            return SymptomMatch {
                specialty: Some(specialty),
                doctors,
            };
        }

        let diverse: Vec<_> = FALLBACK_SPECIALTIES
            .iter()
            .filter_map(|specialty| self.roster.first_of(*specialty))
            .collect();

        let doctors = if diverse.is_empty() {
            AvailabilityService::annotate(
                &self.roster,
                self.roster.doctors().iter().take(FALLBACK_ROSTER_PREFIX),
            )
        } else {
            AvailabilityService::annotate(&self.roster, diverse)
        };

        debug!("No symptom keywords matched, offering {} diverse doctors", doctors.len());
        SymptomMatch {
            specialty: None,
            doctors,
        }
    }
}
