//! Sanitizing of the two numeric inputs of a conversion.
//!
//! The anchor timestamp is the real-world instant (Unix seconds) that world
//! time zero corresponds to. Its UTC calendar year, shifted by the calendar's
//! year epoch, is the displayed year in which world time zero falls.
//! Non-finite inputs never reach the date arithmetic: they are replaced by
//! documented fallbacks and reported as [`InputWarning`]s.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::fmt;

/// A fallback substituted for an unusable numeric input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InputWarning {
    /// World time was NaN or infinite; zero was used
    NonFiniteWorldTime(f64),
    /// Anchor timestamp was NaN or infinite; the epoch year was used
    NonFiniteAnchor(f64),
    /// Anchor timestamp falls outside the representable UTC range; the epoch year was used
    AnchorOutOfRange(f64),
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputWarning::NonFiniteWorldTime(v) => {
                write!(f, "world time {} is not finite, using 0", v)
            }
            InputWarning::NonFiniteAnchor(v) => {
                write!(f, "anchor timestamp {} is not finite, using the year epoch", v)
            }
            InputWarning::AnchorOutOfRange(v) => {
                write!(f, "anchor timestamp {} is out of range, using the year epoch", v)
            }
        }
    }
}

/// UTC calendar year of a Unix timestamp in seconds.
pub fn real_world_year(anchor_timestamp: f64) -> Result<i32, InputWarning> {
    if !anchor_timestamp.is_finite() {
        return Err(InputWarning::NonFiniteAnchor(anchor_timestamp));
    }
    let seconds = anchor_timestamp.floor();
    if seconds < i64::MIN as f64 || seconds >= i64::MAX as f64 {
        return Err(InputWarning::AnchorOutOfRange(anchor_timestamp));
    }
    DateTime::<Utc>::from_timestamp(seconds as i64, 0)
        .map(|instant| instant.year())
        .ok_or(InputWarning::AnchorOutOfRange(anchor_timestamp))
}

/// Displayed year in which world time zero falls.
///
/// The epoch is added exactly once to the real-world year. Unusable anchors
/// resolve to real-world year offset 0, i.e. the epoch itself.
pub fn starting_year(anchor_timestamp: f64, epoch: i64) -> (i64, Option<InputWarning>) {
    match real_world_year(anchor_timestamp) {
        Ok(year) => ((year as i64).saturating_add(epoch), None),
        Err(warning) => (epoch, Some(warning)),
    }
}

/// Whole seconds of a world time, floored and saturated into `i64`.
pub fn world_seconds(world_time: f64) -> (i64, Option<InputWarning>) {
    if !world_time.is_finite() {
        return (0, Some(InputWarning::NonFiniteWorldTime(world_time)));
    }
    // `as` saturates at the i64 bounds
    (world_time.floor() as i64, None)
}
