use doctor_cell::models::Specialty;
use doctor_cell::services::DirectoryService;
use shared_utils::test_utils::TestConfig;

#[test]
fn test_default_roster_size_and_ids() {
    let roster = DirectoryService::from_config(&TestConfig::default().to_app_config());

    assert_eq!(roster.len(), 20);
    for (index, doctor) in roster.doctors().iter().enumerate() {
        assert_eq!(doctor.id as usize, index + 1);
        assert!(doctor.name.starts_with("Dr. "));
    }
}

#[test]
fn test_specialties_cycle_in_fixed_order() {
    let roster = DirectoryService::generate(20, Some(7));

    for (index, doctor) in roster.doctors().iter().enumerate() {
        assert_eq!(doctor.specialty, Specialty::ALL[index % 10]);
    }
    assert_eq!(roster.doctors()[9].specialty, Specialty::GeneralPractice);
}

#[test]
fn test_sarah_thompson_is_a_nephrologist() {
    let roster = DirectoryService::generate(20, Some(7));
    let doctor = &roster.doctors()[16];

    assert_eq!(doctor.name, "Dr. Sarah Thompson");
    assert_eq!(doctor.specialty, Specialty::Nephrology);
    assert_eq!(doctor.id, 17);
}

#[test]
fn test_random_attributes_stay_in_range() {
    let roster = DirectoryService::generate(60, None);

    for doctor in roster.doctors() {
        assert!((5..=19).contains(&doctor.experience), "experience {}", doctor.experience);
        assert!((4.0..=5.0).contains(&doctor.rating), "rating {}", doctor.rating);
        assert!((100..=199).contains(&doctor.price), "price {}", doctor.price);
        let scaled = doctor.rating * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-4, "rating {} has more than one decimal", doctor.rating);
    }
}

#[test]
fn test_same_seed_gives_same_roster() {
    let first = DirectoryService::generate(20, Some(99));
    let second = DirectoryService::generate(20, Some(99));

    assert_eq!(first.doctors(), second.doctors());
}

#[test]
fn test_lookup_by_id_and_specialty() {
    let roster = DirectoryService::generate(20, Some(3));

    assert_eq!(roster.get(3).unwrap().specialty, Specialty::Neurology);
    assert!(roster.get(21).is_err());

    let neurologists = roster.by_specialty(Specialty::Neurology);
    let ids: Vec<u32> = neurologists.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![3, 13]);
    assert_eq!(roster.first_of(Specialty::Neurology).map(|d| d.id), Some(3));
}
