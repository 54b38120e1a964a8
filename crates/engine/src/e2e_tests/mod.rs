//! Whole-conversion tests over several calendars.
//!
//! Each property is checked by sweeping world time across multiple leap
//! cycles on both sides of the anchor rather than by random sampling.
//!
//! ```bash
//! cargo test -p almanac-engine --lib e2e_tests
//! ```

mod fixtures;

pub use fixtures::*;
