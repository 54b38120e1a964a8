//! Almanac domain - calendar definitions, year layouts and dates
//!
//! Everything in this crate is a pure value: a validated
//! [`CalendarDefinition`], the [`CalendarPlan`] resolved from it, and the
//! [`CalendarDate`]s the engine produces. Conversions between world time and
//! dates live in `almanac-engine`.

pub mod error;
pub mod value_objects;
pub mod year_plan;

pub use error::CalendarError;

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    CalendarDate, CalendarDefinition, CalendarSchema, ClockTime, IntercalaryDay,
    IntercalarySchema, LeapRule, LeapRuleKind, LeapTarget, LeapYearSchema, MonthDefinition,
    MonthRef, MonthSchema, TimeSchema, TimeUnits, WeekdayDefinition, YearSchema, YearSettings,
};

pub use year_plan::{CalendarPlan, IntercalaryPlacement, PlannedSlot, Slot, YearPlan};
