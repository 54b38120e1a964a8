//! Value objects - Immutable objects defined by their attributes

mod calendar;
mod calendar_date;
mod leap_rule;
mod schema;

pub use calendar::{
    CalendarDefinition, IntercalaryDay, MonthDefinition, TimeUnits, WeekdayDefinition,
    YearSettings,
};
pub use calendar_date::{CalendarDate, ClockTime};
pub use leap_rule::{LeapRule, LeapRuleKind, LeapTarget};
pub use schema::{
    CalendarSchema, IntercalarySchema, LeapYearSchema, MonthRef, MonthSchema, TimeSchema,
    YearSchema,
};
