//! Environment configuration for the `almanac` binary.
//!
//! Supported environment variables:
//! - ALMANAC_CALENDAR_PATH: calendar definition file (JSON); the built-in
//!   Gregorian calendar is used when unset
//! - ALMANAC_ANCHOR_TIMESTAMP: real-world Unix seconds of world time zero;
//!   the current time is used when unset or invalid

use std::path::PathBuf;

use almanac_domain::CalendarDefinition;

use crate::clock::ClockPort;
use crate::engine::CalendarEngine;
use crate::error::EngineError;

pub const CALENDAR_PATH_VAR: &str = "ALMANAC_CALENDAR_PATH";
pub const ANCHOR_TIMESTAMP_VAR: &str = "ALMANAC_ANCHOR_TIMESTAMP";

/// Resolved binary configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Definition file; `None` selects the built-in Gregorian calendar
    pub calendar_path: Option<PathBuf>,
    /// Real-world Unix seconds of world time zero
    pub anchor_timestamp: f64,
}

impl EngineConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env(clock: &dyn ClockPort) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), clock)
    }

    /// Reads the configuration through `lookup`, falling back to `clock` for the anchor.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, clock: &dyn ClockPort) -> Self {
        let calendar_path = lookup(CALENDAR_PATH_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let anchor_timestamp = match lookup(ANCHOR_TIMESTAMP_VAR) {
            Some(val) => match val.trim().parse::<f64>() {
                Ok(timestamp) if timestamp.is_finite() => {
                    tracing::info!(
                        timestamp,
                        "Applied ALMANAC_ANCHOR_TIMESTAMP environment variable"
                    );
                    Some(timestamp)
                }
                _ => {
                    tracing::warn!(
                        val = %val,
                        "ALMANAC_ANCHOR_TIMESTAMP is not a finite number, using current time"
                    );
                    None
                }
            },
            None => None,
        }
        .unwrap_or_else(|| clock.anchor_now());

        Self {
            calendar_path,
            anchor_timestamp,
        }
    }

    /// Builds the engine for the configured calendar.
    pub fn load_engine(&self) -> Result<CalendarEngine, EngineError> {
        match &self.calendar_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading calendar definition");
                CalendarEngine::from_path(path)
            }
            None => Ok(CalendarEngine::new(CalendarDefinition::gregorian())),
        }
    }
}

/// Loads `.env.local` then `.env` from the repository root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_gregorian_and_clock() {
        let config = EngineConfig::from_lookup(lookup(&[]), &clock());
        assert_eq!(config.calendar_path, None);
        assert_eq!(config.anchor_timestamp, 1_735_689_600.0);

        let engine = config.load_engine().unwrap();
        assert_eq!(engine.get_calendar(), &CalendarDefinition::gregorian());
    }

    #[test]
    fn reads_anchor_and_path() {
        let config = EngineConfig::from_lookup(
            lookup(&[
                (ANCHOR_TIMESTAMP_VAR, " 86400.5 "),
                (CALENDAR_PATH_VAR, "/tmp/harptos.json"),
            ]),
            &clock(),
        );
        assert_eq!(config.anchor_timestamp, 86_400.5);
        assert_eq!(config.calendar_path, Some(PathBuf::from("/tmp/harptos.json")));
    }

    #[test]
    fn invalid_anchor_falls_back_to_clock() {
        for bad in ["soon", "NaN", "inf"] {
            let config =
                EngineConfig::from_lookup(lookup(&[(ANCHOR_TIMESTAMP_VAR, bad)]), &clock());
            assert_eq!(config.anchor_timestamp, 1_735_689_600.0, "{}", bad);
        }
    }

    #[test]
    fn blank_path_is_ignored() {
        let config = EngineConfig::from_lookup(lookup(&[(CALENDAR_PATH_VAR, "  ")]), &clock());
        assert_eq!(config.calendar_path, None);
    }

    #[test]
    fn loads_definition_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harptos.json");
        std::fs::write(
            &path,
            serde_json::to_string(&CalendarDefinition::harptos()).unwrap(),
        )
        .unwrap();

        let config = EngineConfig {
            calendar_path: Some(path),
            anchor_timestamp: 0.0,
        };
        let engine = config.load_engine().unwrap();
        assert_eq!(engine.get_calendar(), &CalendarDefinition::harptos());
    }
}
