use std::sync::Arc;

use chrono::{Datelike, Duration, Weekday};
use tracing::debug;

use shared_config::AppConfig;
use shared_utils::Clock;

use crate::models::{AvailabilityView, DateOption, Doctor, Specialty, TimeSlot};
use crate::services::directory::Roster;

const AVAILABILITY_LABELS: [&str; 4] = [
    "Available today",
    "Available tomorrow",
    "Available in 2 days",
    "Available next week",
];

/// Number of upcoming days offered for booking, starting tomorrow.
const BOOKING_WINDOW_DAYS: i64 = 14;

const WEEKDAYS_ONLY: [Specialty; 2] = [Specialty::Cardiology, Specialty::Neurology];

const LUNCH_HOUR: u32 = 12;
const DEFAULT_FIRST_HOUR: u32 = 9;
const DEFAULT_LAST_HOUR: u32 = 17;

#[derive(Clone)]
pub struct AvailabilityService {
    clock: Arc<dyn Clock>,
    booking_month: u32,
    requested_days: Vec<u32>,
}

impl AvailabilityService {
    pub fn new(clock: Arc<dyn Clock>, booking_month: u32, requested_days: Vec<u32>) -> Self {
        Self {
            clock,
            booking_month,
            requested_days,
        }
    }

    pub fn from_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, config.booking_month, config.requested_days.clone())
    }

    /// Decorate a doctor with the availability label for its roster position.
    pub fn with_availability(doctor: &Doctor, position: usize) -> AvailabilityView {
        AvailabilityView {
            doctor: doctor.clone(),
            availability: AVAILABILITY_LABELS[position % AVAILABILITY_LABELS.len()].to_string(),
        }
    }

    /// Decorate doctors, resolving each one's roster position for the label.
    pub fn annotate<'a, I>(roster: &Roster, doctors: I) -> Vec<AvailabilityView>
    where
        I: IntoIterator<Item = &'a Doctor>,
    {
        doctors
            .into_iter()
            .map(|doctor| {
                let position = roster.position_of(doctor.id).unwrap_or(0);
                Self::with_availability(doctor, position)
            })
            .collect()
    }

    pub fn annotate_roster(roster: &Roster) -> Vec<AvailabilityView> {
        roster
            .doctors()
            .iter()
            .enumerate()
            .map(|(position, doctor)| Self::with_availability(doctor, position))
            .collect()
    }

    /// Bookable dates for the next two weeks. Weekday-only specialties never
    /// get Saturday or Sunday.
    pub fn available_dates(&self, specialty: Option<Specialty>) -> Vec<DateOption> {
        let today = self.clock.today();
        let weekdays_only = specialty.is_some_and(|s| WEEKDAYS_ONLY.contains(&s));

        let dates: Vec<DateOption> = (1..=BOOKING_WINDOW_DAYS)
            .map(|offset| today + Duration::days(offset))
            .filter(|date| !(weekdays_only && matches!(date.weekday(), Weekday::Sat | Weekday::Sun)))
            .map(|date| DateOption {
                value: date.format("%Y-%m-%d").to_string(),
                label: date.format("%a, %b %-d").to_string(),
                is_requested: date.month() == self.booking_month
                    && self.requested_days.contains(&date.day()),
            })
            .collect();

        debug!("Computed {} available dates for {:?}", dates.len(), specialty);
        dates
    }

    /// Half-hourly slots with the noon hour skipped. Dentistry opens an hour
    /// early and Cardiology closes an hour late.
    pub fn time_slots(specialty: Option<Specialty>) -> Vec<TimeSlot> {
        let first_hour = match specialty {
            Some(Specialty::Dentistry) => DEFAULT_FIRST_HOUR - 1,
            _ => DEFAULT_FIRST_HOUR,
        };
        let last_hour = match specialty {
            Some(Specialty::Cardiology) => DEFAULT_LAST_HOUR + 1,
            _ => DEFAULT_LAST_HOUR,
        };

        (first_hour..=last_hour)
            .filter(|hour| *hour != LUNCH_HOUR)
            .flat_map(|hour| [0u32, 30].map(|minute| Self::slot(hour, minute)))
            .collect()
    }

    fn slot(hour: u32, minute: u32) -> TimeSlot {
        let (display_hour, meridiem) = match hour {
            0 => (12, "AM"),
            1..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour - 12, "PM"),
        };
        TimeSlot {
            value: format!("{}:{:02}", hour, minute),
            label: format!("{}:{:02} {}", display_hour, minute, meridiem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn afternoon_slots_use_twelve_hour_labels() {
        let slots = AvailabilityService::time_slots(None);
        let slot = slots.iter().find(|s| s.value == "13:30").unwrap();
        assert_eq!(slot.label, "1:30 PM");
    }

    #[test]
    fn availability_labels_rotate_every_four_positions() {
        let doctor = Doctor {
            id: 5,
            name: "Dr. Robert Jones".into(),
            specialty: Specialty::Dentistry,
            experience: 7,
            rating: 4.2,
            price: 120,
            image: "/images/doctor5.webp".into(),
        };
        assert_eq!(AvailabilityService::with_availability(&doctor, 3).availability, "Available next week");
        assert_eq!(AvailabilityService::with_availability(&doctor, 4).availability, "Available today");
    }
}
