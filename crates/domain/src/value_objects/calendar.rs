//! Calendar definition value objects
//!
//! This module provides the immutable description of a calendar's shape, from
//! the real-world Gregorian calendar to fictional systems with custom month
//! lengths, custom weeks, custom leap rules and intercalary days that sit
//! outside the month/weekday cycle.
//!
//! Key types:
//! - `CalendarDefinition` - Validated calendar configuration (months, weeks, leap rule,
//!   intercalary days)
//! - `MonthDefinition` - A named month with base and leap-year lengths
//! - `IntercalaryDay` - A day inserted after a month, outside the month sequence
//! - `YearSettings` - Epoch offset and optional suffix for displayed year numbers
//! - `TimeUnits` - Hours per day, minutes per hour, seconds per minute
//!
//! A definition is validated once in [`CalendarDefinition::new`]; every query
//! on a validated definition is infallible for configuration reasons.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::leap_rule::{LeapRule, LeapTarget};
use super::schema::CalendarSchema;
use crate::error::CalendarError;

/// Month that conventionally absorbs the Gregorian leap day
const GREGORIAN_LEAP_MONTH: usize = 2;

// ============================================================================
// MonthDefinition
// ============================================================================

/// Configuration for a single month in a calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDefinition {
    /// Month name (e.g., "Hammer", "January")
    pub name: String,
    /// Number of days in a common year
    pub days: u32,
    /// Additional days during a leap year
    pub leap_days: u32,
}

impl MonthDefinition {
    /// Create a new month definition without leap days.
    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Self {
            name: name.into(),
            days,
            leap_days: 0,
        }
    }

    /// Create a new month definition that grows by `leap_days` in leap years.
    pub fn with_leap_days(name: impl Into<String>, days: u32, leap_days: u32) -> Self {
        Self {
            name: name.into(),
            days,
            leap_days,
        }
    }
}

// ============================================================================
// WeekdayDefinition
// ============================================================================

/// A named day of the week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayDefinition {
    pub name: String,
    pub abbreviation: String,
}

impl WeekdayDefinition {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
        }
    }
}

// ============================================================================
// IntercalaryDay
// ============================================================================

/// A special day that doesn't belong to any month (e.g., Midwinter, Shieldmeet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntercalaryDay {
    /// Day name (e.g., "Midwinter", "Shieldmeet")
    pub name: String,
    /// Inserted after which month (1-indexed)
    pub after_month: usize,
    /// Whether the day advances the weekly cycle
    pub counts_for_weekdays: bool,
    /// Whether the day exists only in leap years
    pub leap_only: bool,
}

impl IntercalaryDay {
    /// Create an intercalary day that sits outside the week and occurs every year.
    pub fn new(name: impl Into<String>, after_month: usize) -> Self {
        Self {
            name: name.into(),
            after_month,
            counts_for_weekdays: false,
            leap_only: false,
        }
    }

    /// Marks the day as advancing the weekly cycle.
    pub fn counting_for_weekdays(mut self) -> Self {
        self.counts_for_weekdays = true;
        self
    }

    /// Marks the day as present only in leap years.
    pub fn leap_only(mut self) -> Self {
        self.leap_only = true;
        self
    }
}

// ============================================================================
// YearSettings
// ============================================================================

/// Year numbering (e.g., "DR", "AD")
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearSettings {
    /// Offset added to the real-world anchor year to produce displayed years
    pub epoch: i64,
    /// Era suffix (e.g., "DR", "YK", "AD")
    pub suffix: Option<String>,
}

impl YearSettings {
    pub fn new(epoch: i64) -> Self {
        Self {
            epoch,
            suffix: None,
        }
    }

    pub fn with_suffix(epoch: i64, suffix: impl Into<String>) -> Self {
        Self {
            epoch,
            suffix: Some(suffix.into()),
        }
    }
}

// ============================================================================
// TimeUnits
// ============================================================================

/// Subdivision of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeUnits {
    pub hours_per_day: u32,
    pub minutes_per_hour: u32,
    pub seconds_per_minute: u32,
}

impl TimeUnits {
    pub fn new(hours_per_day: u32, minutes_per_hour: u32, seconds_per_minute: u32) -> Self {
        Self {
            hours_per_day,
            minutes_per_hour,
            seconds_per_minute,
        }
    }

    /// Number of seconds per hour.
    pub fn seconds_per_hour(&self) -> u64 {
        self.minutes_per_hour as u64 * self.seconds_per_minute as u64
    }

    /// Number of seconds per day.
    pub fn seconds_per_day(&self) -> u64 {
        self.hours_per_day as u64 * self.seconds_per_hour()
    }
}

impl Default for TimeUnits {
    fn default() -> Self {
        Self::new(24, 60, 60)
    }
}

// ============================================================================
// CalendarDefinition
// ============================================================================

/// Full calendar configuration defining months, weeks, and special days
///
/// Serializes to and from the external definition format (see
/// [`CalendarSchema`]); deserialization runs the same validation as
/// [`CalendarDefinition::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CalendarSchema", into = "CalendarSchema")]
pub struct CalendarDefinition {
    /// Month definitions in order
    months: Vec<MonthDefinition>,
    /// Days of the week in order
    weekdays: Vec<WeekdayDefinition>,
    /// Year numbering
    year: YearSettings,
    /// Leap year rule
    leap_rule: LeapRule,
    /// Day subdivision
    time: TimeUnits,
    /// Special days that don't belong to any month
    intercalary_days: Vec<IntercalaryDay>,
}

impl CalendarDefinition {
    /// Create a new validated calendar definition.
    ///
    /// Normalization applied before validation:
    /// - Under the Gregorian rule, if no month declares leap days, month 2
    ///   (or the only month) gains one leap day.
    /// - Under a custom rule targeting a month, that month's leap days become
    ///   the rule's extra days.
    /// - Under a custom rule targeting an intercalary day, that day becomes leap-only.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Configuration` if:
    /// - There are no months or no weekdays
    /// - A month has zero days
    /// - A custom leap interval is zero
    /// - Any time unit is zero, or a day holds more than `u32::MAX` seconds
    /// - A year would hold more than `u32::MAX` days
    ///
    /// Returns `CalendarError::UnknownMonth` if an intercalary day or the
    /// leap target refers to a month or intercalary day that does not exist.
    pub fn new(
        mut months: Vec<MonthDefinition>,
        weekdays: Vec<WeekdayDefinition>,
        year: YearSettings,
        leap_rule: LeapRule,
        time: TimeUnits,
        mut intercalary_days: Vec<IntercalaryDay>,
    ) -> Result<Self, CalendarError> {
        if months.is_empty() {
            return Err(CalendarError::configuration(
                "calendar needs at least one month",
            ));
        }
        if weekdays.is_empty() {
            return Err(CalendarError::configuration(
                "calendar needs at least one weekday",
            ));
        }
        if let Some(month) = months.iter().find(|m| m.days == 0) {
            return Err(CalendarError::configuration(format!(
                "month '{}' must have at least one day",
                month.name
            )));
        }
        if time.hours_per_day == 0 || time.minutes_per_hour == 0 || time.seconds_per_minute == 0 {
            return Err(CalendarError::configuration(
                "time units must all be positive",
            ));
        }
        if time.seconds_per_day() > u32::MAX as u64 {
            return Err(CalendarError::configuration(format!(
                "a day cannot exceed {} seconds",
                u32::MAX
            )));
        }
        if let Some(day) = intercalary_days
            .iter()
            .find(|d| d.after_month == 0 || d.after_month > months.len())
        {
            return Err(CalendarError::unknown_month(format!(
                "month {} (after which '{}' falls)",
                day.after_month, day.name
            )));
        }

        // Only the month the rule designates may grow in leap years.
        match leap_rule {
            LeapRule::None => months.iter_mut().for_each(|m| m.leap_days = 0),
            LeapRule::Gregorian => {
                let designated = GREGORIAN_LEAP_MONTH.min(months.len()) - 1;
                for (index, month) in months.iter_mut().enumerate() {
                    if index != designated {
                        month.leap_days = 0;
                    } else if month.leap_days == 0 {
                        month.leap_days = 1;
                    }
                }
            }
            LeapRule::Custom {
                interval,
                target,
                extra_days,
            } => {
                if interval == 0 {
                    return Err(CalendarError::configuration(
                        "custom leap interval must be positive",
                    ));
                }
                months.iter_mut().for_each(|m| m.leap_days = 0);
                match target {
                    LeapTarget::Month(month) => {
                        let Some(month) = month.checked_sub(1).and_then(|i| months.get_mut(i))
                        else {
                            return Err(CalendarError::unknown_month(format!(
                                "month {} (leap target)",
                                month
                            )));
                        };
                        month.leap_days = extra_days;
                    }
                    LeapTarget::Intercalary(index) => {
                        let Some(day) = intercalary_days.get_mut(index) else {
                            return Err(CalendarError::unknown_month(format!(
                                "intercalary day {} (leap target)",
                                index
                            )));
                        };
                        day.leap_only = true;
                    }
                }
            }
        }

        let leap_year_days: u64 = months
            .iter()
            .map(|m| m.days as u64 + m.leap_days as u64)
            .sum::<u64>()
            + intercalary_days.len() as u64;
        if leap_year_days > u32::MAX as u64 {
            return Err(CalendarError::configuration(format!(
                "a year cannot exceed {} days",
                u32::MAX
            )));
        }

        Ok(Self {
            months,
            weekdays,
            year,
            leap_rule,
            time,
            intercalary_days,
        })
    }

    // Accessors

    /// Returns the month definitions.
    pub fn months(&self) -> &[MonthDefinition] {
        &self.months
    }

    /// Returns the days of the week.
    pub fn weekdays(&self) -> &[WeekdayDefinition] {
        &self.weekdays
    }

    /// Returns the year numbering settings.
    pub fn year(&self) -> &YearSettings {
        &self.year
    }

    /// Returns the leap year rule.
    pub fn leap_rule(&self) -> &LeapRule {
        &self.leap_rule
    }

    /// Returns the day subdivision.
    pub fn time(&self) -> &TimeUnits {
        &self.time
    }

    /// Returns the intercalary (special) days in definition order.
    pub fn intercalary_days(&self) -> &[IntercalaryDay] {
        &self.intercalary_days
    }

    /// Returns the month definition for a 1-indexed month.
    pub fn month(&self, month: usize) -> Option<&MonthDefinition> {
        month.checked_sub(1).and_then(|i| self.months.get(i))
    }

    // Computed properties

    /// Returns the number of seconds per day.
    pub fn seconds_per_day(&self) -> u64 {
        self.time.seconds_per_day()
    }

    /// Formats a displayed year with the era suffix, if any (e.g., "1492 DR").
    pub fn display_year(&self, year: i64) -> String {
        match &self.year.suffix {
            Some(suffix) => format!("{} {}", year, suffix),
            None => year.to_string(),
        }
    }

    // Built-in calendars

    /// Creates the standard Gregorian calendar.
    ///
    /// - 12 months: January (31), February (28, 29 in leap years), March (31), etc.
    /// - 7-day week: Sunday through Saturday
    /// - 24 hours per day, 60 minutes per hour, 60 seconds per minute
    /// - Year epoch 0: displayed years equal real-world years
    pub fn gregorian() -> Self {
        let months = [
            ("January", 31),
            ("February", 28),
            ("March", 31),
            ("April", 30),
            ("May", 31),
            ("June", 30),
            ("July", 31),
            ("August", 31),
            ("September", 30),
            ("October", 31),
            ("November", 30),
            ("December", 31),
        ]
        .into_iter()
        .map(|(name, days)| MonthDefinition::new(name, days))
        .collect();
        let weekdays = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ]
        .into_iter()
        .map(|name| WeekdayDefinition::new(name, &name[..3]))
        .collect();

        Self {
            months,
            weekdays,
            year: YearSettings::with_suffix(0, "AD"),
            leap_rule: LeapRule::Gregorian,
            time: TimeUnits::default(),
            intercalary_days: vec![],
        }
        .with_gregorian_leap_day()
    }

    /// Creates the Calendar of Harptos (Forgotten Realms).
    ///
    /// - 12 months of 30 days each: Hammer, Alturiak, Ches, Tarsakh, Mirtul, Kythorn,
    ///   Flamerule, Eleasis, Eleint, Marpenoth, Uktar, Nightal
    /// - 5 festival days outside the tendays: Midwinter, Greengrass, Midsummer,
    ///   Highharvestide, Feast of the Moon
    /// - Shieldmeet after Midsummer every 4th year
    /// - 10-day "tendays" instead of 7-day weeks
    /// - Era: DR (Dalereckoning), epoch 0
    pub fn harptos() -> Self {
        let months = [
            "Hammer",
            "Alturiak",
            "Ches",
            "Tarsakh",
            "Mirtul",
            "Kythorn",
            "Flamerule",
            "Eleasis",
            "Eleint",
            "Marpenoth",
            "Uktar",
            "Nightal",
        ]
        .into_iter()
        .map(|name| MonthDefinition::new(name, 30))
        .collect();
        let weekdays = [
            ("First-day", "1st"),
            ("Second-day", "2nd"),
            ("Third-day", "3rd"),
            ("Fourth-day", "4th"),
            ("Fifth-day", "5th"),
            ("Sixth-day", "6th"),
            ("Seventh-day", "7th"),
            ("Eighth-day", "8th"),
            ("Ninth-day", "9th"),
            ("Tenth-day", "10th"),
        ]
        .into_iter()
        .map(|(name, abbreviation)| WeekdayDefinition::new(name, abbreviation))
        .collect();

        Self {
            months,
            weekdays,
            year: YearSettings::with_suffix(0, "DR"),
            leap_rule: LeapRule::Custom {
                interval: 4,
                target: LeapTarget::Intercalary(3),
                extra_days: 1,
            },
            time: TimeUnits::default(),
            intercalary_days: vec![
                IntercalaryDay::new("Midwinter", 1),              // After Hammer
                IntercalaryDay::new("Greengrass", 4),             // After Tarsakh
                IntercalaryDay::new("Midsummer", 7),              // After Flamerule
                IntercalaryDay::new("Shieldmeet", 7).leap_only(), // After Midsummer
                IntercalaryDay::new("Highharvestide", 9),         // After Eleint
                IntercalaryDay::new("Feast of the Moon", 11),     // After Uktar
            ],
        }
    }

    fn with_gregorian_leap_day(mut self) -> Self {
        self.months[GREGORIAN_LEAP_MONTH - 1].leap_days = 1;
        self
    }
}

impl TryFrom<CalendarSchema> for CalendarDefinition {
    type Error = CalendarError;

    fn try_from(schema: CalendarSchema) -> Result<Self, Self::Error> {
        schema.into_definition()
    }
}

impl fmt::Display for CalendarDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} months, {}-day week, {} leap rule, {} intercalary days",
            self.months.len(),
            self.weekdays.len(),
            self.leap_rule.kind(),
            self.intercalary_days.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
