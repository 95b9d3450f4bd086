use doctor_cell::models::Specialty;

const SPECIALTY_KEYWORDS: [(Specialty, &[&str]); 9] = [
    (Specialty::Cardiology, &["heart", "cardiac", "chest pain", "blood pressure", "cardio"]),
    (Specialty::Dermatology, &["skin", "rash", "acne", "dermat", "eczema"]),
    (Specialty::Neurology, &["head", "brain", "neuro", "migraine", "seizure", "headache"]),
    (Specialty::Orthopedics, &["bone", "joint", "ortho", "fracture", "spine"]),
    (Specialty::Pulmonology, &["lung", "breath", "cough", "respiratory", "asthma"]),
    (Specialty::Gynecology, &["women", "gynec", "pregnancy", "menstrual"]),
    (Specialty::Pediatrics, &["child", "pediatric", "baby", "infant", "kid"]),
    (Specialty::Dentistry, &["tooth", "dental", "teeth", "oral", "gum", "toothache"]),
    (Specialty::Nephrology, &["kidney", "urine", "renal", "bladder"]),
];

/// Every specialty whose keywords appear in the advice text, in table order.
pub fn extract_specialties(message: &str) -> Vec<Specialty> {
    let lower = message.to_lowercase();
    SPECIALTY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(specialty, _)| *specialty)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_multiple_specialties_in_table_order() {
        let found = extract_specialties("Persistent cough with chest pain may involve the heart or lungs.");
        assert_eq!(found, vec![Specialty::Cardiology, Specialty::Pulmonology]);
    }

    #[test]
    fn test_no_keywords_gives_empty_list() {
        assert!(extract_specialties("Drink water and rest.").is_empty());
    }
}
