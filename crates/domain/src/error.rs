//! Unified error types for the calendar domain
//!
//! Two families of failure exist: a malformed calendar definition, which is
//! rejected once at construction, and out-of-range input handed to a query on
//! an already validated calendar.

use thiserror::Error;

/// Unified error type for calendar operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The calendar definition is malformed
    #[error("Invalid calendar definition: {0}")]
    Configuration(String),

    /// A month or intercalary reference that names nothing in the definition
    #[error("Unknown month reference: {reference}")]
    UnknownMonth { reference: String },

    /// Month index outside `1..=months`
    #[error("Invalid month: {month} (calendar has {months} months)")]
    InvalidMonth { month: usize, months: usize },

    /// Day outside `1..=max_day` for the addressed month or intercalary block
    #[error("Invalid day: {day} (max {max_day})")]
    InvalidDay { day: u32, max_day: u32 },

    /// World time of a date too far from the anchor to be an exact `f64`
    #[error("World time of year {year} is beyond {limit} seconds from the anchor")]
    WorldTimeOutOfRange { year: i64, limit: i64 },

    /// Time-of-day field outside its unit range
    #[error("Invalid {field}: {value} (must be below {limit})")]
    InvalidTime {
        field: &'static str,
        value: u32,
        limit: u32,
    },
}

impl CalendarError {
    /// Creates a configuration error for a definition that violates an invariant.
    ///
    /// # Example
    /// ```ignore
    /// if months.is_empty() {
    ///     return Err(CalendarError::configuration("calendar needs at least one month"));
    /// }
    /// ```
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an unknown month reference error
    pub fn unknown_month(reference: impl Into<String>) -> Self {
        Self::UnknownMonth {
            reference: reference.into(),
        }
    }

    /// Returns true for errors raised while validating a definition.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::UnknownMonth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let err = CalendarError::configuration("calendar needs at least one month");
        assert!(matches!(err, CalendarError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Invalid calendar definition: calendar needs at least one month"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_month_error() {
        let err = CalendarError::unknown_month("Smarch");
        assert_eq!(err.to_string(), "Unknown month reference: Smarch");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_day_error() {
        let err = CalendarError::InvalidDay { day: 29, max_day: 28 };
        assert_eq!(err.to_string(), "Invalid day: 29 (max 28)");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_invalid_time_error() {
        let err = CalendarError::InvalidTime {
            field: "hour",
            value: 24,
            limit: 24,
        };
        assert_eq!(err.to_string(), "Invalid hour: 24 (must be below 24)");
    }

    #[test]
    fn test_world_time_out_of_range_error() {
        let err = CalendarError::WorldTimeOutOfRange {
            year: 300_000_000,
            limit: 1 << 53,
        };
        assert_eq!(
            err.to_string(),
            "World time of year 300000000 is beyond 9007199254740992 seconds from the anchor"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
