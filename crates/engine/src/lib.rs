//! Almanac calendar engine.
//!
//! Converts world time (seconds since a real-world anchor timestamp) to dates
//! in a data-driven calendar and back.
//!
//! ## Structure
//!
//! - `engine` - `CalendarEngine` construction, loading and calendar queries
//! - `converter` - world time to date conversion and its inverse
//! - `weekday` - weekday calculation
//! - `anchor` - anchor timestamp and world time sanitizing
//! - `config` - environment configuration for the `almanac` binary
//! - `clock` - time source for the default anchor

pub mod anchor;
pub mod clock;
pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod weekday;

/// Property and scenario tests over whole conversions.
#[cfg(test)]
mod e2e_tests;

pub use anchor::InputWarning;
pub use clock::{ClockPort, SystemClock};
pub use config::{load_dotenv_from_repo_root, EngineConfig};
pub use converter::{Resolution, MAX_EXACT_WORLD_TIME};
pub use engine::CalendarEngine;
pub use error::EngineError;

pub use almanac_domain::{
    CalendarDate, CalendarDefinition, CalendarError, ClockTime, IntercalaryDay,
    IntercalaryPlacement, LeapRule, LeapTarget, MonthDefinition, TimeUnits, WeekdayDefinition,
    YearSettings,
};
