//! Calendars and constants shared by the e2e tests.

use almanac_domain::{
    CalendarDefinition, IntercalaryDay, LeapRule, LeapTarget, MonthDefinition, TimeUnits,
    WeekdayDefinition, YearSettings,
};

use crate::engine::CalendarEngine;

/// 2025-01-01T00:00:00Z
pub const ANCHOR_2025: f64 = 1_735_689_600.0;

/// 1999-07-15T12:00:00Z
pub const ANCHOR_MIDYEAR_1999: f64 = 932_040_000.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Gregorian month lengths, seven-day week, epoch 2700, a leap day added
/// to the second month every 4th displayed year.
pub fn scenario_calendar() -> CalendarEngine {
    CalendarEngine::from_json(
        r#"{
            "months": [
                { "name": "Deepfrost", "days": 31 },
                { "name": "Thaw", "days": 28 },
                { "name": "Rainfall", "days": 31 },
                { "name": "Seedtime", "days": 30 },
                { "name": "Bloom", "days": 31 },
                { "name": "Highsun", "days": 30 },
                { "name": "Blaze", "days": 31 },
                { "name": "Harvest", "days": 31 },
                { "name": "Reaping", "days": 30 },
                { "name": "Leaffall", "days": 31 },
                { "name": "Frostfall", "days": 30 },
                { "name": "Longnight", "days": 31 }
            ],
            "weekdays": [
                { "name": "Moonday", "abbreviation": "Mo" },
                { "name": "Tiwday", "abbreviation": "Ti" },
                { "name": "Wodday", "abbreviation": "Wo" },
                { "name": "Thunday", "abbreviation": "Th" },
                { "name": "Freyday", "abbreviation": "Fr" },
                { "name": "Starday", "abbreviation": "St" },
                { "name": "Sunday", "abbreviation": "Su" }
            ],
            "year": { "epoch": 2700, "suffix": "AE" },
            "leapYear": { "rule": "custom", "interval": 4, "month": 2, "extraDays": 1 }
        }"#,
    )
    .unwrap()
}

/// Four 28-day months, a counting and a non-counting festival, a leap-only
/// festival every 3rd year and a short 10-hour day.
pub fn festival_calendar() -> CalendarEngine {
    let week = ["Ember", "Frost", "Gale", "Hail", "Mist", "Rime", "Thaw"]
        .into_iter()
        .map(|name| WeekdayDefinition::new(name, &name[..2]))
        .collect();
    let calendar = CalendarDefinition::new(
        vec![
            MonthDefinition::new("Waking", 28),
            MonthDefinition::new("Growing", 28),
            MonthDefinition::new("Fading", 28),
            MonthDefinition::new("Sleeping", 28),
        ],
        week,
        YearSettings::with_suffix(-40, "OR"),
        LeapRule::Custom {
            interval: 3,
            target: LeapTarget::Intercalary(2),
            extra_days: 1,
        },
        TimeUnits::new(10, 100, 100),
        vec![
            IntercalaryDay::new("Bonfire", 2),
            IntercalaryDay::new("Market Day", 2).counting_for_weekdays(),
            IntercalaryDay::new("Long Night", 4),
        ],
    )
    .unwrap();
    CalendarEngine::new(calendar)
}

/// Leap days declared on a month the custom rule does not target.
pub fn stray_leap_days_calendar() -> CalendarEngine {
    CalendarEngine::from_json(
        r#"{
            "months": [
                { "name": "Early", "days": 10, "leapDays": 2 },
                { "name": "Late", "days": 10 }
            ],
            "weekdays": [
                { "name": "Odd", "abbreviation": "O" },
                { "name": "Even", "abbreviation": "E" }
            ],
            "leapYear": { "rule": "custom", "interval": 4, "month": "Late", "extraDays": 1 }
        }"#,
    )
    .unwrap()
}

/// Every calendar the properties are checked against, with a label.
pub fn all_calendars() -> Vec<(&'static str, CalendarEngine)> {
    vec![
        ("gregorian", CalendarEngine::new(CalendarDefinition::gregorian())),
        ("harptos", CalendarEngine::new(CalendarDefinition::harptos())),
        ("scenario", scenario_calendar()),
        ("festival", festival_calendar()),
        ("stray leap days", stray_leap_days_calendar()),
    ]
}
