//! External calendar definition format
//!
//! Mirrors the JSON document a host stores for a calendar:
//!
//! ```json
//! {
//!   "months": [{ "name": "Hammer", "days": 30, "leapDays": 0 }],
//!   "weekdays": [{ "name": "First-day", "abbreviation": "1st" }],
//!   "year": { "epoch": 0, "suffix": "DR" },
//!   "leapYear": { "rule": "custom", "interval": 4, "month": "Shieldmeet", "extraDays": 1 },
//!   "time": { "hoursInDay": 24, "minutesInHour": 60, "secondsInMinute": 60 },
//!   "intercalary": [{ "name": "Shieldmeet", "after": "Flamerule", "countsForWeekdays": false }]
//! }
//! ```
//!
//! Numeric fields are read as signed integers so that negative values surface
//! as configuration errors rather than parse errors.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::calendar::{
    CalendarDefinition, IntercalaryDay, MonthDefinition, TimeUnits, WeekdayDefinition,
    YearSettings,
};
use super::leap_rule::{LeapRule, LeapRuleKind, LeapTarget};
use crate::error::CalendarError;

/// A month referenced by name or by 1-based index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonthRef {
    Index(i64),
    Name(String),
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthRef::Index(i) => write!(f, "{}", i),
            MonthRef::Name(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSchema {
    pub name: String,
    pub days: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub leap_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSchema {
    #[serde(default)]
    pub epoch: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeapYearSchema {
    pub rule: LeapRuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_days: Option<i64>,
}

impl Default for LeapYearSchema {
    fn default() -> Self {
        Self {
            rule: LeapRuleKind::None,
            interval: None,
            month: None,
            extra_days: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSchema {
    pub hours_in_day: i64,
    pub minutes_in_hour: i64,
    pub seconds_in_minute: i64,
}

impl Default for TimeSchema {
    fn default() -> Self {
        Self {
            hours_in_day: 24,
            minutes_in_hour: 60,
            seconds_in_minute: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntercalarySchema {
    pub name: String,
    pub after: MonthRef,
    #[serde(default)]
    pub counts_for_weekdays: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub leap_only: bool,
}

/// Unvalidated calendar definition as stored by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSchema {
    pub months: Vec<MonthSchema>,
    pub weekdays: Vec<WeekdayDefinition>,
    #[serde(default = "default_year")]
    pub year: YearSchema,
    #[serde(default)]
    pub leap_year: LeapYearSchema,
    #[serde(default)]
    pub time: TimeSchema,
    #[serde(default)]
    pub intercalary: Vec<IntercalarySchema>,
}

fn default_year() -> YearSchema {
    YearSchema {
        epoch: 0,
        suffix: None,
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Converts a signed schema number to `u32`, rejecting negatives and overflow.
fn unsigned(value: i64, what: impl fmt::Display) -> Result<u32, CalendarError> {
    u32::try_from(value).map_err(|_| {
        CalendarError::configuration(format!(
            "{} must be a non-negative integer, got {}",
            what, value
        ))
    })
}

impl CalendarSchema {
    /// Validates the schema into a [`CalendarDefinition`].
    pub fn into_definition(self) -> Result<CalendarDefinition, CalendarError> {
        let months = self
            .months
            .iter()
            .map(|m| {
                Ok(MonthDefinition::with_leap_days(
                    m.name.clone(),
                    unsigned(m.days, format!("days of '{}'", m.name))?,
                    unsigned(m.leap_days, format!("leapDays of '{}'", m.name))?,
                ))
            })
            .collect::<Result<Vec<_>, CalendarError>>()?;

        let intercalary_days = self
            .intercalary
            .iter()
            .map(|d| {
                Ok(IntercalaryDay {
                    name: d.name.clone(),
                    after_month: resolve_month(&months, &d.after)?,
                    counts_for_weekdays: d.counts_for_weekdays,
                    leap_only: d.leap_only,
                })
            })
            .collect::<Result<Vec<_>, CalendarError>>()?;

        let leap_rule = match self.leap_year.rule {
            LeapRuleKind::None => LeapRule::None,
            LeapRuleKind::Gregorian => LeapRule::Gregorian,
            LeapRuleKind::Custom => {
                let interval = self.leap_year.interval.ok_or_else(|| {
                    CalendarError::configuration("custom leap rule requires an interval")
                })?;
                if interval <= 0 {
                    return Err(CalendarError::configuration(format!(
                        "custom leap interval must be positive, got {}",
                        interval
                    )));
                }
                let reference = self.leap_year.month.as_ref().ok_or_else(|| {
                    CalendarError::configuration("custom leap rule requires a target month")
                })?;
                LeapRule::Custom {
                    interval: unsigned(interval, "leap interval")?,
                    target: resolve_leap_target(&months, &intercalary_days, reference)?,
                    extra_days: unsigned(self.leap_year.extra_days.unwrap_or(1), "extraDays")?,
                }
            }
        };

        let time = TimeUnits::new(
            unsigned(self.time.hours_in_day, "hoursInDay")?,
            unsigned(self.time.minutes_in_hour, "minutesInHour")?,
            unsigned(self.time.seconds_in_minute, "secondsInMinute")?,
        );

        CalendarDefinition::new(
            months,
            self.weekdays,
            YearSettings {
                epoch: self.year.epoch,
                suffix: self.year.suffix,
            },
            leap_rule,
            time,
            intercalary_days,
        )
    }
}

fn resolve_month(months: &[MonthDefinition], reference: &MonthRef) -> Result<usize, CalendarError> {
    match reference {
        MonthRef::Index(i) if *i >= 1 && (*i as u64) <= months.len() as u64 => Ok(*i as usize),
        MonthRef::Name(name) => months
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name))
            .map(|i| i + 1)
            .ok_or_else(|| CalendarError::unknown_month(name.clone())),
        other => Err(CalendarError::unknown_month(other.to_string())),
    }
}

/// A leap target name may designate a month or an intercalary day; months win.
fn resolve_leap_target(
    months: &[MonthDefinition],
    intercalary: &[IntercalaryDay],
    reference: &MonthRef,
) -> Result<LeapTarget, CalendarError> {
    if let Ok(month) = resolve_month(months, reference) {
        return Ok(LeapTarget::Month(month));
    }
    if let MonthRef::Name(name) = reference {
        if let Some(index) = intercalary
            .iter()
            .position(|d| d.name.eq_ignore_ascii_case(name))
        {
            return Ok(LeapTarget::Intercalary(index));
        }
    }
    Err(CalendarError::unknown_month(reference.to_string()))
}

impl From<CalendarDefinition> for CalendarSchema {
    fn from(definition: CalendarDefinition) -> Self {
        let months = definition.months();
        let intercalary = definition.intercalary_days();

        let leap_year = match *definition.leap_rule() {
            LeapRule::None => LeapYearSchema::default(),
            LeapRule::Gregorian => LeapYearSchema {
                rule: LeapRuleKind::Gregorian,
                ..LeapYearSchema::default()
            },
            LeapRule::Custom {
                interval,
                target,
                extra_days,
            } => {
                let month = match target {
                    LeapTarget::Month(m) => months.get(m - 1).map(|m| m.name.clone()),
                    LeapTarget::Intercalary(i) => intercalary.get(i).map(|d| d.name.clone()),
                };
                LeapYearSchema {
                    rule: LeapRuleKind::Custom,
                    interval: Some(interval as i64),
                    month: month.map(MonthRef::Name),
                    extra_days: Some(extra_days as i64),
                }
            }
        };

        Self {
            months: months
                .iter()
                .map(|m| MonthSchema {
                    name: m.name.clone(),
                    days: m.days as i64,
                    leap_days: m.leap_days as i64,
                })
                .collect(),
            weekdays: definition.weekdays().to_vec(),
            year: YearSchema {
                epoch: definition.year().epoch,
                suffix: definition.year().suffix.clone(),
            },
            leap_year,
            time: TimeSchema {
                hours_in_day: definition.time().hours_per_day as i64,
                minutes_in_hour: definition.time().minutes_per_hour as i64,
                seconds_in_minute: definition.time().seconds_per_minute as i64,
            },
            intercalary: intercalary
                .iter()
                .map(|d| IntercalarySchema {
                    name: d.name.clone(),
                    after: months
                        .get(d.after_month - 1)
                        .map(|m| MonthRef::Name(m.name.clone()))
                        .unwrap_or(MonthRef::Index(d.after_month as i64)),
                    counts_for_weekdays: d.counts_for_weekdays,
                    leap_only: d.leap_only,
                })
                .collect(),
        }
    }
}
