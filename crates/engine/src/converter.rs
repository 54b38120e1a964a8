//! World time to calendar date conversion and its inverse.
//!
//! World time zero is day 1 of the starting year derived from the anchor
//! timestamp (see `anchor.rs`). Whole days are split off with floor division,
//! so negative world times walk backward with a non-negative time of day.
//! Year walking first skips whole leap cycles, then walks the remainder one
//! year at a time; the walk is therefore bounded by one cycle.

use almanac_domain::{CalendarDate, CalendarError, ClockTime, PlannedSlot, Slot};
use serde::Serialize;
use tracing::warn;

use crate::anchor::{self, InputWarning};
use crate::engine::CalendarEngine;

/// Largest world time magnitude (2^53 seconds) whose every integer is an exact `f64`.
pub const MAX_EXACT_WORLD_TIME: i64 = 1 << 53;

/// A converted date together with the fallbacks applied to reach it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub date: CalendarDate,
    pub warnings: Vec<InputWarning>,
}

impl CalendarEngine {
    /// Converts world time (seconds) to a calendar date.
    ///
    /// Never fails: non-finite inputs are replaced by fallbacks (see
    /// [`world_time_to_date_checked`](Self::world_time_to_date_checked)).
    pub fn world_time_to_date(&self, world_time: f64, anchor_timestamp: f64) -> CalendarDate {
        self.world_time_to_date_checked(world_time, anchor_timestamp)
            .date
    }

    /// Converts world time (seconds) to a calendar date, reporting every
    /// fallback substituted for a non-finite or out-of-range input.
    pub fn world_time_to_date_checked(&self, world_time: f64, anchor_timestamp: f64) -> Resolution {
        let (start_year, anchor_warning) = self.start_year(anchor_timestamp);
        let (total_seconds, time_warning) = anchor::world_seconds(world_time);
        if let Some(warning) = time_warning {
            warn!(world_time, "{}", warning);
        }

        let seconds_per_day = self.seconds_per_day();
        let days = total_seconds.div_euclid(seconds_per_day);
        let second_of_day = total_seconds.rem_euclid(seconds_per_day);

        let (year, day_of_year) = self.resolve_year(start_year, days);
        let date = self.date_at(year, day_of_year, second_of_day as u32);

        Resolution {
            date,
            warnings: anchor_warning.into_iter().chain(time_warning).collect(),
        }
    }

    /// Converts a calendar date back to world time (seconds).
    ///
    /// Exact inverse of [`world_time_to_date`](Self::world_time_to_date) for
    /// every valid date within [`MAX_EXACT_WORLD_TIME`] seconds of the anchor
    /// year's first day. The `weekday` field of `date` is ignored, and so is
    /// the name of an intercalary day: only its position counts.
    ///
    /// # Errors
    ///
    /// Out-of-range fields fail instead of rolling over:
    /// - [`CalendarError::InvalidMonth`] for a month outside `1..=months`
    /// - [`CalendarError::InvalidDay`] for a day outside the month, or an
    ///   intercalary position absent from that year
    /// - [`CalendarError::InvalidTime`] for a time field outside its unit
    /// - [`CalendarError::WorldTimeOutOfRange`] when the result has no exact
    ///   `f64` representation
    pub fn date_to_world_time(
        &self,
        date: &CalendarDate,
        anchor_timestamp: f64,
    ) -> Result<f64, CalendarError> {
        let (planned, offset) = self.locate_date(date)?;
        let second_of_day = self.second_of_day(&date.time)?;
        let (start_year, _) = self.start_year(anchor_timestamp);

        let days = self.plan.days_before_year(date.year) - self.plan.days_before_year(start_year)
            + planned.start as i128
            + offset as i128;
        let seconds = days * self.seconds_per_day() as i128 + second_of_day as i128;
        if seconds.abs() > MAX_EXACT_WORLD_TIME as i128 {
            return Err(CalendarError::WorldTimeOutOfRange {
                year: date.year,
                limit: MAX_EXACT_WORLD_TIME,
            });
        }
        Ok(seconds as f64)
    }

    fn start_year(&self, anchor_timestamp: f64) -> (i64, Option<InputWarning>) {
        let (year, warning) = anchor::starting_year(anchor_timestamp, self.calendar.year().epoch);
        if let Some(warning) = warning {
            warn!(anchor_timestamp, fallback_year = year, "{}", warning);
        }
        (year, warning)
    }

    /// Walks `days` from day 1 of `start_year` to a year and 0-indexed day of that year.
    fn resolve_year(&self, start_year: i64, days: i64) -> (i64, u32) {
        let cycle_years = self.plan.cycle_years();
        let cycle_days = self.plan.cycle_days();

        let mut year =
            start_year.saturating_add(days.div_euclid(cycle_days).saturating_mul(cycle_years));
        let mut remaining = days.rem_euclid(cycle_days);
        loop {
            let length = self.plan.year_length(year) as i64;
            if remaining < length {
                return (year, remaining as u32);
            }
            remaining -= length;
            year = year.saturating_add(1);
        }
    }

    /// Finds the slot and 0-indexed offset within it that `date` addresses.
    pub(crate) fn locate_date(
        &self,
        date: &CalendarDate,
    ) -> Result<(&PlannedSlot, u32), CalendarError> {
        let months = self.calendar.months().len();
        if date.month == 0 || date.month > months {
            return Err(CalendarError::InvalidMonth {
                month: date.month,
                months,
            });
        }

        let year_plan = self.plan.year(date.year);
        if date.is_intercalary() {
            return year_plan
                .intercalary_slot(date.month, date.day)
                .map(|slot| (slot, 0))
                .ok_or(CalendarError::InvalidDay {
                    day: date.day,
                    max_day: year_plan.intercalary_block_len(date.month),
                });
        }

        let slot = year_plan
            .month_slot(date.month)
            .ok_or(CalendarError::InvalidMonth {
                month: date.month,
                months,
            })?;
        let max_day = slot.slot.days();
        if date.day == 0 || date.day > max_day {
            return Err(CalendarError::InvalidDay {
                day: date.day,
                max_day,
            });
        }
        Ok((slot, date.day - 1))
    }

    fn date_at(&self, year: i64, day_of_year: u32, second_of_day: u32) -> CalendarDate {
        let (planned, offset) = self.plan.year(year).locate(day_of_year);
        let weekday = self.weekday_at(year, planned, offset);
        let time = self.clock_time(second_of_day);

        match planned.slot {
            Slot::Month { month, .. } => CalendarDate {
                year,
                month,
                day: offset + 1,
                weekday,
                time,
                intercalary: None,
            },
            Slot::Intercalary {
                entry,
                after_month,
                ordinal,
                ..
            } => CalendarDate {
                year,
                month: after_month,
                day: ordinal,
                weekday,
                time,
                intercalary: self
                    .calendar
                    .intercalary_days()
                    .get(entry)
                    .map(|day| day.name.clone()),
            },
        }
    }

    fn clock_time(&self, second_of_day: u32) -> ClockTime {
        let units = self.calendar.time();
        let seconds_per_hour = units.seconds_per_hour() as u32;
        let rest = second_of_day % seconds_per_hour;
        ClockTime::new(
            second_of_day / seconds_per_hour,
            rest / units.seconds_per_minute,
            rest % units.seconds_per_minute,
        )
    }

    fn second_of_day(&self, time: &ClockTime) -> Result<u32, CalendarError> {
        let units = self.calendar.time();
        for (field, value, limit) in [
            ("hour", time.hour, units.hours_per_day),
            ("minute", time.minute, units.minutes_per_hour),
            ("second", time.second, units.seconds_per_minute),
        ] {
            if value >= limit {
                return Err(CalendarError::InvalidTime {
                    field,
                    value,
                    limit,
                });
            }
        }
        Ok(time.hour * units.seconds_per_hour() as u32
            + time.minute * units.seconds_per_minute
            + time.second)
    }
}
