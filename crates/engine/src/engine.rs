//! Calendar engine facade.
//!
//! [`CalendarEngine`] owns one validated [`CalendarDefinition`] and the
//! [`CalendarPlan`] resolved from it. Every query is a pure function of that
//! immutable state and its arguments, so an engine can be shared across
//! threads without synchronization.
//!
//! Conversions live in `converter.rs`, weekday calculation in `weekday.rs`.

use std::path::Path;

use almanac_domain::{
    CalendarDefinition, CalendarError, CalendarPlan, CalendarSchema, IntercalaryPlacement,
};
use tracing::{debug, instrument};

use crate::error::EngineError;

/// Bidirectional world-time/date conversion over one calendar.
#[derive(Debug, Clone)]
pub struct CalendarEngine {
    pub(crate) calendar: CalendarDefinition,
    pub(crate) plan: CalendarPlan,
}

impl CalendarEngine {
    /// Creates an engine for a validated calendar.
    pub fn new(calendar: CalendarDefinition) -> Self {
        let plan = CalendarPlan::new(&calendar);
        debug!(
            calendar = %calendar,
            cycle_years = plan.cycle_years(),
            cycle_days = plan.cycle_days(),
            "Calendar engine created"
        );
        Self { calendar, plan }
    }

    /// Parses and validates a definition document (see [`CalendarSchema`]).
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let schema: CalendarSchema = serde_json::from_str(json)?;
        let calendar = CalendarDefinition::try_from(schema)?;
        Ok(Self::new(calendar))
    }

    /// Reads a definition document from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// The calendar this engine converts with.
    pub fn get_calendar(&self) -> &CalendarDefinition {
        &self.calendar
    }

    /// Whether `year` (displayed numbering) is a leap year.
    pub fn is_leap_year(&self, year: i64) -> bool {
        self.plan.is_leap_year(year)
    }

    /// Total days in `year`, intercalary days included.
    pub fn get_year_length(&self, year: i64) -> u32 {
        self.plan.year_length(year)
    }

    /// Days in a 1-indexed month of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in `1..=months`.
    pub fn month_length(&self, year: i64, month: usize) -> Result<u32, CalendarError> {
        self.plan
            .year(year)
            .month_length(month)
            .ok_or(CalendarError::InvalidMonth {
                month,
                months: self.calendar.months().len(),
            })
    }

    /// Intercalary days active in `year`, in chronological order.
    pub fn intercalary_days(&self, year: i64) -> Vec<IntercalaryPlacement> {
        self.plan.year(year).intercalary_placements().collect()
    }

    /// Name of a 1-indexed month.
    pub fn month_name(&self, month: usize) -> Option<&str> {
        self.calendar.month(month).map(|m| m.name.as_str())
    }

    /// Name of a 0-indexed weekday.
    pub fn weekday_name(&self, weekday: usize) -> Option<&str> {
        self.calendar.weekdays().get(weekday).map(|w| w.name.as_str())
    }

    /// Displayed year with its era suffix.
    pub fn display_year(&self, year: i64) -> String {
        self.calendar.display_year(year)
    }

    /// Number of seconds in a day.
    pub(crate) fn seconds_per_day(&self) -> i64 {
        // Validated to fit in u32
        self.calendar.seconds_per_day() as i64
    }
}
