//! Engine error types.
//!
//! Wraps calendar validation failures together with the I/O and parse
//! failures of loading a definition document.

use almanac_domain::CalendarError;
use thiserror::Error;

/// Error returned while building an engine from external input.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The definition failed validation.
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// The definition document is not valid JSON for the schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
