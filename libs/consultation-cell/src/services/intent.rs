use regex::Regex;
use tracing::{debug, instrument};

use doctor_cell::models::Specialty;

use crate::error::ConsultationError;
use crate::models::{FollowUpChoice, Intent};
use crate::services::extraction::month_names;

const SPECIALTY_REQUEST_VERBS: [&str; 4] = ["show", "see", "find", "get"];

/// Checked in order; the first pattern that matches names the specialty.
const SPECIALTY_PATTERNS: [(&str, Specialty); 10] = [
    (r"neurology|neurologist|neurologists|brain|nervous system", Specialty::Neurology),
    (r"cardiology|cardiologist|cardiologists|heart|cardiac", Specialty::Cardiology),
    (r"dermatology|dermatologist|dermatologists|skin", Specialty::Dermatology),
    (r"pediatrics?|pediatrician|pediatricians|children|child", Specialty::Pediatrics),
    (r"orthopedic|orthopedist|orthopedists|bone|joint|fracture", Specialty::Orthopedics),
    (r"general practice|general practitioner|family medicine|gp", Specialty::GeneralPractice),
    (r"dentist|dentists|dentistry|dental|tooth|teeth", Specialty::Dentistry),
    (r"pulmonology|pulmonologist|pulmonologists|lung|respiratory", Specialty::Pulmonology),
    (r"gynecology|gynecologist|gynecologists|women", Specialty::Gynecology),
    (r"nephrology|nephrologist|nephrologists|kidney", Specialty::Nephrology),
];

const BOOKING_VERBS: [&str; 2] = ["book", "appointment"];
const SCHEDULING_VERBS: [&str; 3] = ["book", "appointment", "schedule"];
const DOCTOR_MARKERS: [&str; 3] = ["dr.", "dr ", "doctor"];
const WEEKDAY_NAMES: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const SHOW_DOCTORS_PHRASES: [&str; 6] = [
    "see doctors",
    "show doctors",
    "available doctors",
    "book appointment",
    "option 1",
    "first option",
];
const ADVICE_PHRASES: [&str; 6] = [
    "health advice",
    "get advice",
    "guidance",
    "option 2",
    "second option",
    "advice first",
];

const GREETINGS: [&str; 4] = ["hi", "hello", "hey", "test"];

/// Single words accepted as a health message on their own.
const HEALTH_VOCABULARY: &[&str] = &[
    "help", "pain", "hurt", "sick", "fever", "cough", "tired", "dizzy", "nausea", "ache",
    "stress", "anxiety", "advice", "guidance", "question", "chat", "talk", "symptom",
    "symptoms", "headache", "cold", "flu", "doctor", "appointment", "book", "schedule",
    "chest", "back", "stomach", "throat", "breathing", "allergy", "rash", "skin", "tooth",
    "dental", "bone", "joint", "kidney", "heart", "lung", "brain", "eye", "ear", "nose",
    "mouth", "neck", "shoulder", "knee", "hip", "ankle", "wrist", "finger", "toe", "doctors",
    "insomnia", "sleep", "vomiting", "diarrhea", "fatigue", "injury",
];

type IntentRule = fn(&IntentClassifier, &str) -> Option<Intent>;

/// Ordered, first-match-wins classification of a user turn.
pub struct IntentClassifier {
    specialty_patterns: Vec<(Regex, Specialty)>,
    clock_time: Option<Regex>,
    month_full: String,
    month_abbr: String,
}

impl IntentClassifier {
    const RULES: [(&'static str, IntentRule); 3] = [
        ("specialty_request", IntentClassifier::specialty_request),
        ("named_doctor_booking", IntentClassifier::named_doctor_booking),
        ("implicit_booking", IntentClassifier::implicit_booking),
    ];

    pub fn new(booking_month: u32) -> Result<Self, ConsultationError> {
        let (month_full, month_abbr) = month_names(booking_month)?;

        let specialty_patterns = SPECIALTY_PATTERNS
            .iter()
            .filter_map(|(pattern, specialty)| Regex::new(pattern).ok().map(|re| (re, *specialty)))
            .collect();

        Ok(Self {
            specialty_patterns,
            clock_time: Regex::new(r"\d{1,2}:\d{2}").ok(),
            month_full,
            month_abbr,
        })
    }

    #[instrument(skip(self))]
    pub fn classify(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();

        Self::RULES
            .iter()
            .find_map(|(name, rule)| {
                rule(self, &lower).inspect(|intent| debug!("Rule {} matched: {:?}", name, intent))
            })
            .unwrap_or(Intent::SymptomOrQuestion)
    }

    fn specialty_request(&self, lower: &str) -> Option<Intent> {
        if !contains_any(lower, &SPECIALTY_REQUEST_VERBS) {
            return None;
        }
        self.specialty_patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(lower))
            .map(|(_, specialty)| Intent::SpecialtyRequest(*specialty))
    }

    fn named_doctor_booking(&self, lower: &str) -> Option<Intent> {
        (contains_any(lower, &BOOKING_VERBS) && contains_any(lower, &DOCTOR_MARKERS))
            .then_some(Intent::NamedDoctorBooking)
    }

    fn implicit_booking(&self, lower: &str) -> Option<Intent> {
        let wants_booking = contains_any(lower, &SCHEDULING_VERBS) && !contains_any(lower, &DOCTOR_MARKERS);
        (wants_booking && self.mentions_date_or_time(lower)).then_some(Intent::ImplicitBooking)
    }

    fn mentions_date_or_time(&self, lower: &str) -> bool {
        contains_any(lower, &WEEKDAY_NAMES)
            || has_word(lower, "am")
            || has_word(lower, "pm")
            || self.clock_time.as_ref().is_some_and(|re| re.is_match(lower))
            || lower.contains(self.month_full.as_str())
            || lower.contains(self.month_abbr.as_str())
            || lower.chars().any(|c| c.is_ascii_digit())
    }

    /// Reading of a turn that follows the "see doctors or keep chatting" offer.
    pub fn detect_follow_up(&self, text: &str) -> Option<FollowUpChoice> {
        let lower = text.trim().to_lowercase();

        if lower == "1" || contains_any(&lower, &SHOW_DOCTORS_PHRASES) {
            Some(FollowUpChoice::ShowDoctors)
        } else if lower == "2" || contains_any(&lower, &ADVICE_PHRASES) {
            Some(FollowUpChoice::Advice)
        } else {
            None
        }
    }

    /// Input that is plainly not a health message. `names_specialty` tells
    /// whether any symptom keyword set already matched the text.
    pub fn is_unclear(&self, text: &str, names_specialty: bool) -> bool {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        if trimmed.chars().count() <= 2 || !trimmed.chars().any(char::is_alphabetic) {
            return true;
        }
        if GREETINGS.contains(&lower.as_str()) {
            return true;
        }

        let single_word = !lower.contains(char::is_whitespace) && lower.chars().all(char::is_alphabetic);
        single_word && !names_specialty && !HEALTH_VOCABULARY.contains(&lower.as_str())
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric()).any(|token| token == word)
}
