//! Calendar date output of world-time conversion
//!
//! A `CalendarDate` carries indices only (month, weekday); names are looked up
//! on the [`crate::CalendarDefinition`] that produced it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// ClockTime
// ============================================================================

/// Time within a day, each field below the calendar's corresponding unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Midnight (00:00:00).
    pub fn midnight() -> Self {
        Self::default()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

// ============================================================================
// CalendarDate
// ============================================================================

/// A date and time in a calendar
///
/// For a regular day, `month` is the 1-indexed month and `day` the 1-indexed
/// day of that month. For an intercalary day, `intercalary` holds its name,
/// `month` is the month it follows and `day` is its 1-indexed position within
/// the block of intercalary days after that month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Displayed (epoch-shifted) year; can be negative
    pub year: i64,
    /// Month index (1-indexed)
    pub month: usize,
    /// Day of month, or position in the intercalary block (1-indexed)
    pub day: u32,
    /// Day of week index (0-indexed); `None` for days outside the weekly cycle
    pub weekday: Option<usize>,
    /// Time of day
    pub time: ClockTime,
    /// If this is an intercalary day, its name
    pub intercalary: Option<String>,
}

impl CalendarDate {
    /// A regular month day at midnight.
    ///
    /// The weekday is left unset; conversions fill it in.
    pub fn new(year: i64, month: usize, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            weekday: None,
            time: ClockTime::midnight(),
            intercalary: None,
        }
    }

    /// The `ordinal`th intercalary day after `after_month`, at midnight.
    pub fn intercalary(
        year: i64,
        after_month: usize,
        ordinal: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            intercalary: Some(name.into()),
            ..Self::new(year, after_month, ordinal)
        }
    }

    /// Replaces the time of day.
    pub fn with_time(mut self, time: ClockTime) -> Self {
        self.time = time;
        self
    }

    /// Returns whether this date is an intercalary day.
    pub fn is_intercalary(&self) -> bool {
        self.intercalary.is_some()
    }

    /// Key that orders dates chronologically within one calendar.
    ///
    /// Intercalary days sort after every day of the month they follow.
    fn chronological_key(&self) -> (i64, usize, bool, u32, ClockTime) {
        (
            self.year,
            self.month,
            self.is_intercalary(),
            self.day,
            self.time,
        )
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chronological_key()
            .cmp(&other.chronological_key())
            .then_with(|| self.intercalary.cmp(&other.intercalary))
            .then_with(|| self.weekday.cmp(&other.weekday))
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.intercalary {
            Some(name) => write!(f, "{} {}, {}", name, self.year, self.time),
            None => write!(
                f,
                "{}-{:02}-{:02} {}",
                self.year, self.month, self.day, self.time
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_display() {
        assert_eq!(ClockTime::new(9, 5, 0).to_string(), "09:05:00");
        assert_eq!(ClockTime::midnight(), ClockTime::new(0, 0, 0));
    }

    #[test]
    fn date_display() {
        let date = CalendarDate::new(4725, 2, 1).with_time(ClockTime::new(13, 30, 15));
        assert_eq!(date.to_string(), "4725-02-01 13:30:15");

        let festival = CalendarDate::intercalary(1492, 1, 1, "Midwinter");
        assert_eq!(festival.to_string(), "Midwinter 1492, 00:00:00");
    }

    #[test]
    fn intercalary_sorts_between_months() {
        let last_of_hammer = CalendarDate::new(1492, 1, 30).with_time(ClockTime::new(23, 59, 59));
        let midwinter = CalendarDate::intercalary(1492, 1, 1, "Midwinter");
        let first_of_alturiak = CalendarDate::new(1492, 2, 1);

        assert!(last_of_hammer < midwinter);
        assert!(midwinter < first_of_alturiak);
    }

    #[test]
    fn orders_by_year_then_month_then_day_then_time() {
        let mut dates = vec![
            CalendarDate::new(2, 1, 1),
            CalendarDate::new(1, 3, 1),
            CalendarDate::new(1, 1, 2),
            CalendarDate::new(1, 1, 2).with_time(ClockTime::new(0, 0, 1)),
            CalendarDate::new(-1, 12, 31),
        ];
        dates.sort();
        let keys: Vec<_> = dates.iter().map(|d| (d.year, d.month, d.day, d.time.second)).collect();
        assert_eq!(
            keys,
            vec![(-1, 12, 31, 0), (1, 1, 2, 0), (1, 1, 2, 1), (1, 3, 1, 0), (2, 1, 1, 0)]
        );
    }

    #[test]
    fn serializes_with_optional_fields() {
        let date = CalendarDate::new(4725, 1, 1);
        let json = serde_json::to_value(&date).unwrap();
        assert_eq!(json["year"], 4725);
        assert!(json["weekday"].is_null());
        assert!(json["intercalary"].is_null());
    }
}
