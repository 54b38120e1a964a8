//! Weekday calculation.
//!
//! The weekly cycle counts every day from day 1 of year 0 (weekday 0),
//! skipping intercalary days that do not count for weekdays. Those days keep
//! their place in the year's day offsets but report no weekday, so in a
//! calendar whose months are whole weeks every month starts on the same
//! weekday.

use almanac_domain::{CalendarDate, CalendarError, PlannedSlot};

use crate::engine::CalendarEngine;

impl CalendarEngine {
    /// 0-indexed weekday of a regular month day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] or [`CalendarError::InvalidDay`]
    /// for a date that does not exist in `year`.
    pub fn calculate_weekday(
        &self,
        year: i64,
        month: usize,
        day: u32,
    ) -> Result<usize, CalendarError> {
        let (planned, offset) = self.locate_date(&CalendarDate::new(year, month, day))?;
        Ok(self.counted_weekday(year, planned, offset))
    }

    /// Weekday of any date, `None` for intercalary days outside the weekly cycle.
    pub fn weekday_of(&self, date: &CalendarDate) -> Result<Option<usize>, CalendarError> {
        let (planned, offset) = self.locate_date(date)?;
        Ok(self.weekday_at(date.year, planned, offset))
    }

    pub(crate) fn weekday_at(
        &self,
        year: i64,
        planned: &PlannedSlot,
        offset: u32,
    ) -> Option<usize> {
        planned
            .slot
            .counts_for_weekdays()
            .then(|| self.counted_weekday(year, planned, offset))
    }

    fn counted_weekday(&self, year: i64, planned: &PlannedSlot, offset: u32) -> usize {
        let counted = self.plan.counted_days_before_year(year)
            + planned.counted_before as i128
            + offset as i128;
        counted.rem_euclid(self.calendar.weekdays().len() as i128) as usize
    }
}
