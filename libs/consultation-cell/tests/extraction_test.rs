use std::sync::Arc;

use consultation_cell::services::DateTimeExtractor;
use shared_utils::test_utils::test_clock;

fn create_extractor(month: u32) -> DateTimeExtractor {
    DateTimeExtractor::new(month, Arc::new(test_clock())).unwrap()
}

#[test]
fn test_time_formats() {
    let extractor = create_extractor(8);

    assert_eq!(extractor.extract_time("9am").as_deref(), Some("9:00"));
    assert_eq!(extractor.extract_time("9:30pm").as_deref(), Some("21:30"));
    assert_eq!(extractor.extract_time("14:05").as_deref(), Some("14:05"));
    assert_eq!(extractor.extract_time("around 10 AM").as_deref(), Some("10:00"));
}

#[test]
fn test_noon_and_midnight() {
    let extractor = create_extractor(8);

    assert_eq!(extractor.extract_time("12am").as_deref(), Some("0:00"));
    assert_eq!(extractor.extract_time("12pm").as_deref(), Some("12:00"));
}

#[test]
fn test_out_of_range_times_are_misses() {
    let extractor = create_extractor(8);

    assert_eq!(extractor.extract_time("25:00"), None);
    assert_eq!(extractor.extract_time("13pm"), None);
    assert_eq!(extractor.extract_time("no time mentioned"), None);
}

#[test]
fn test_date_formats_in_booking_month() {
    let extractor = create_extractor(8);

    assert_eq!(extractor.extract_date("aug 12").as_deref(), Some("2025-08-12"));
    assert_eq!(extractor.extract_date("12/08").as_deref(), Some("2025-08-12"));
    assert_eq!(extractor.extract_date("Tuesday 12 August").as_deref(), Some("2025-08-12"));
    assert_eq!(extractor.extract_date("on 3-8 please").as_deref(), Some("2025-08-03"));
    assert_eq!(extractor.extract_date("August 31").as_deref(), Some("2025-08-31"));
}

#[test]
fn test_invalid_days_are_misses() {
    let extractor = create_extractor(8);

    assert_eq!(extractor.extract_date("aug 32"), None);
    assert_eq!(extractor.extract_date("see you on the 5th"), None);
}

#[test]
fn test_other_month_configuration() {
    let extractor = create_extractor(9);

    assert_eq!(extractor.extract_date("sep 3").as_deref(), Some("2025-09-03"));
    assert_eq!(extractor.extract_date("september 30").as_deref(), Some("2025-09-30"));
    assert_eq!(extractor.extract_date("sep 31"), None);
    assert_eq!(extractor.extract_date("aug 12"), None);
    assert_eq!(extractor.extract_date("12/08"), None);
}

#[test]
fn test_combined_extraction() {
    let extractor = create_extractor(8);

    let schedule = extractor.extract("book dr. sarah thompson on aug 12 at 9am");

    assert_eq!(schedule.date.as_deref(), Some("2025-08-12"));
    assert_eq!(schedule.time.as_deref(), Some("9:00"));
    assert!(extractor.extract("nothing useful").is_empty());
}

#[test]
fn test_iso_dates_are_read_whole() {
    let extractor = create_extractor(8);

    assert_eq!(extractor.extract_date("book me on 2025-08-12").as_deref(), Some("2025-08-12"));
    assert_eq!(extractor.extract_date("2026-8-03 works for me").as_deref(), Some("2026-08-03"));
    assert_eq!(extractor.extract_date("how about 2025-12-08"), None);
    assert_eq!(extractor.extract_date("2025-08-32"), None);
}
