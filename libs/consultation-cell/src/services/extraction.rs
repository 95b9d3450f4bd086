use std::sync::Arc;

use chrono::{Datelike, Month, NaiveDate};
use regex::Regex;
use tracing::debug;

use shared_utils::Clock;

use crate::error::ConsultationError;

const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
    TwentyFourHour,
}

/// Full and three-letter lowercase names for a month number (1-12).
pub fn month_names(month: u32) -> Result<(String, String), ConsultationError> {
    let month_enum = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(ConsultationError::InvalidMonth(month))?;

    let full = month_enum.name().to_lowercase();
    let abbr = full.chars().take(3).collect();
    Ok((full, abbr))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSchedule {
    pub date: Option<String>,
    pub time: Option<String>,
}

impl ExtractedSchedule {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }
}

/// Pulls a booking date (locked to one month) and a clock time out of free text.
#[derive(Clone)]
pub struct DateTimeExtractor {
    month: u32,
    clock: Arc<dyn Clock>,
    date_patterns: Vec<Regex>,
    time_patterns: Vec<(Regex, Meridiem)>,
}

impl DateTimeExtractor {
    pub fn new(month: u32, clock: Arc<dyn Clock>) -> Result<Self, ConsultationError> {
        let (full, abbr) = month_names(month)?;

        // ISO dates go first so their digits are never read as day/month.
        let date_patterns = vec![
            Regex::new(&format!(r"\b(?P<year>\d{{4}})-0?{month}-(?P<day>\d{{1,2}})\b"))?,
            Regex::new(&format!(r"(?:{WEEKDAYS})?\s*(?P<day>\d{{1,2}})\s*(?:{full}|{abbr})"))?,
            Regex::new(&format!(r"(?:{full}|{abbr})\s*(?P<day>\d{{1,2}})\b"))?,
            Regex::new(&format!(r"(?:^|[^\d-])(?P<day>\d{{1,2}})[/-]0?{month}\b"))?,
        ];

        let time_patterns = vec![
            (Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*am\b")?, Meridiem::Am),
            (Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*pm\b")?, Meridiem::Pm),
            (Regex::new(r"(\d{1,2}):(\d{2})")?, Meridiem::TwentyFourHour),
        ];

        Ok(Self {
            month,
            clock,
            date_patterns,
            time_patterns,
        })
    }

    pub fn extract(&self, text: &str) -> ExtractedSchedule {
        ExtractedSchedule {
            date: self.extract_date(text),
            time: self.extract_time(text),
        }
    }

    /// ISO date in the booking month, or `None` when no pattern yields a
    /// real calendar day. The year is the current one unless the text
    /// spells out an ISO date.
    pub fn extract_date(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        let current_year = self.clock.today().year();

        let date = self.date_patterns.iter().find_map(|pattern| {
            let captures = pattern.captures(&lower)?;
            let day: u32 = captures.name("day")?.as_str().parse().ok()?;
            let year = match captures.name("year") {
                Some(year) => year.as_str().parse().ok()?,
                None => current_year,
            };
            NaiveDate::from_ymd_opt(year, self.month, day)
        })?;

        debug!("Extracted date {} from free text", date);
        Some(date.format("%Y-%m-%d").to_string())
    }

    /// 24-hour `H:MM` without a leading zero on the hour.
    pub fn extract_time(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();

        let (hour, minute) = self.time_patterns.iter().find_map(|(pattern, meridiem)| {
            let captures = pattern.captures(&lower)?;
            let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
            let minute: u32 = match captures.get(2) {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            to_twenty_four_hour(hour, minute, *meridiem)
        })?;

        debug!("Extracted time {}:{:02} from free text", hour, minute);
        Some(format!("{}:{:02}", hour, minute))
    }
}

fn to_twenty_four_hour(hour: u32, minute: u32, meridiem: Meridiem) -> Option<(u32, u32)> {
    if minute > 59 {
        return None;
    }
    match meridiem {
        Meridiem::Am if (1..=12).contains(&hour) => Some((hour % 12, minute)),
        Meridiem::Pm if (1..=12).contains(&hour) => Some((hour % 12 + 12, minute)),
        Meridiem::TwentyFourHour if hour <= 23 => Some((hour, minute)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_names(8).unwrap(), ("august".to_string(), "aug".to_string()));
        assert_eq!(month_names(5).unwrap(), ("may".to_string(), "may".to_string()));
        assert!(month_names(13).is_err());
        assert!(month_names(0).is_err());
    }

    #[test]
    fn test_meridiem_conversion() {
        assert_eq!(to_twenty_four_hour(12, 0, Meridiem::Am), Some((0, 0)));
        assert_eq!(to_twenty_four_hour(12, 15, Meridiem::Pm), Some((12, 15)));
        assert_eq!(to_twenty_four_hour(13, 0, Meridiem::Pm), None);
        assert_eq!(to_twenty_four_hour(24, 0, Meridiem::TwentyFourHour), None);
        assert_eq!(to_twenty_four_hour(9, 60, Meridiem::TwentyFourHour), None);
    }
}
