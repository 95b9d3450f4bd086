use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

use doctor_cell::models::Specialty;
use doctor_cell::services::{AvailabilityService, DirectoryService};
use shared_utils::test_utils::{test_clock, TestConfig};

fn create_service() -> AvailabilityService {
    let config = TestConfig::default().to_app_config();
    AvailabilityService::from_config(&config, Arc::new(test_clock()))
}

fn parse(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn test_default_dates_cover_next_fourteen_days() {
    let dates = create_service().available_dates(None);

    assert_eq!(dates.len(), 14);
    assert_eq!(dates[0].value, "2025-08-05");
    assert_eq!(dates[0].label, "Tue, Aug 5");
    assert_eq!(dates[13].value, "2025-08-18");
}

#[test]
fn test_cardiology_never_offers_weekends() {
    let dates = create_service().available_dates(Some(Specialty::Cardiology));

    assert_eq!(dates.len(), 10);
    for date in &dates {
        let weekday = parse(&date.value).weekday();
        assert!(!matches!(weekday, Weekday::Sat | Weekday::Sun), "{} is a weekend", date.value);
    }
}

#[test]
fn test_neurology_skips_weekends_but_dermatology_does_not() {
    let service = create_service();

    assert_eq!(service.available_dates(Some(Specialty::Neurology)).len(), 10);
    assert_eq!(service.available_dates(Some(Specialty::Dermatology)).len(), 14);
}

#[test]
fn test_requested_days_are_flagged() {
    let dates = create_service().available_dates(None);

    let requested: Vec<&str> = dates
        .iter()
        .filter(|d| d.is_requested)
        .map(|d| d.value.as_str())
        .collect();
    assert_eq!(requested, vec!["2025-08-12", "2025-08-13"]);
}

#[test]
fn test_requested_days_ignore_other_months() {
    let service = AvailabilityService::new(Arc::new(test_clock()), 9, vec![12, 13]);

    assert!(service.available_dates(None).iter().all(|d| !d.is_requested));
}

#[test]
fn test_dentistry_opens_at_eight() {
    let slots = AvailabilityService::time_slots(Some(Specialty::Dentistry));

    assert_eq!(slots[0].value, "8:00");
    assert_eq!(slots[0].label, "8:00 AM");
    assert_eq!(slots.len(), 18);
}

#[test]
fn test_cardiology_runs_until_half_six() {
    let slots = AvailabilityService::time_slots(Some(Specialty::Cardiology));

    assert_eq!(slots[0].value, "9:00");
    let last = slots.last().unwrap();
    assert_eq!(last.value, "18:30");
    assert_eq!(last.label, "6:30 PM");
}

#[test]
fn test_no_slot_during_lunch_hour() {
    for specialty in Specialty::ALL.iter().copied().map(Some).chain([None]) {
        let slots = AvailabilityService::time_slots(specialty);
        assert!(slots.iter().all(|s| !s.value.starts_with("12:")), "{:?}", specialty);
    }
}

#[test]
fn test_default_slots() {
    let slots = AvailabilityService::time_slots(None);
    let values: Vec<&str> = slots.iter().map(|s| s.value.as_str()).collect();

    assert_eq!(values.len(), 16);
    assert_eq!(values.first(), Some(&"9:00"));
    assert_eq!(values.last(), Some(&"17:30"));
    assert!(values.contains(&"11:30"));
    assert!(values.contains(&"13:00"));
}

#[test]
fn test_annotate_uses_roster_position() {
    let roster = DirectoryService::generate(20, Some(1));
    let neurologists = roster.by_specialty(Specialty::Neurology);

    let views = AvailabilityService::annotate(&roster, neurologists);

    // positions 2 and 12
    assert_eq!(views[0].availability, "Available in 2 days");
    assert_eq!(views[1].availability, "Available today");
}
