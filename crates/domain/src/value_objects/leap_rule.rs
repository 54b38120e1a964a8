//! Leap year rules
//!
//! A leap rule decides, per displayed year number, whether the year is a leap
//! year. The month lengths and leap-only intercalary days that follow from it
//! are resolved by [`crate::CalendarPlan`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the extra days of a custom leap year go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeapTarget {
    /// A month (1-indexed) grows by the rule's extra days
    Month(usize),
    /// An intercalary day (0-indexed into the definition's list) exists only in leap years
    Intercalary(usize),
}

/// Leap year rule of a calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeapRule {
    /// Every year has the same length
    None,
    /// Every 4th year, except centuries not divisible by 400
    Gregorian,
    /// Every `interval`th year, adding `extra_days` to `target`
    Custom {
        interval: u32,
        target: LeapTarget,
        extra_days: u32,
    },
}

impl LeapRule {
    /// Returns whether `year` is a leap year under this rule.
    ///
    /// Negative years follow the same proleptic pattern (`rem_euclid`), so
    /// year 0 and year -4 are leap years under the Gregorian rule.
    pub fn is_leap_year(&self, year: i64) -> bool {
        match *self {
            LeapRule::None => false,
            LeapRule::Gregorian => {
                year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
            }
            LeapRule::Custom { interval, .. } => {
                interval > 0 && year.rem_euclid(interval as i64) == 0
            }
        }
    }

    /// Number of leap years in `[0, year)`, negated for negative `year`
    /// (so that `leap_years_before(b) - leap_years_before(a)` counts `[a, b)`).
    pub fn leap_years_before(&self, year: i64) -> i64 {
        match *self {
            LeapRule::None => 0,
            LeapRule::Gregorian => {
                multiples_before(year, 4) - multiples_before(year, 100)
                    + multiples_before(year, 400)
            }
            LeapRule::Custom { interval, .. } if interval > 0 => {
                multiples_before(year, interval as i64)
            }
            LeapRule::Custom { .. } => 0,
        }
    }

    /// Length in years of the repeating leap pattern.
    pub fn cycle_years(&self) -> i64 {
        match *self {
            LeapRule::None => 1,
            LeapRule::Gregorian => 400,
            LeapRule::Custom { interval, .. } => (interval as i64).max(1),
        }
    }

    /// Returns the schema keyword for this rule.
    pub fn kind(&self) -> LeapRuleKind {
        match self {
            LeapRule::None => LeapRuleKind::None,
            LeapRule::Gregorian => LeapRuleKind::Gregorian,
            LeapRule::Custom { .. } => LeapRuleKind::Custom,
        }
    }
}

/// Signed count of multiples of `k` in `[0, year)`.
fn multiples_before(year: i64, k: i64) -> i64 {
    // ceil(year / k), without overflow at i64::MIN
    year.div_euclid(k) + i64::from(year.rem_euclid(k) != 0)
}

/// Rule keyword used by the definition format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeapRuleKind {
    None,
    Gregorian,
    Custom,
}

impl fmt::Display for LeapRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeapRuleKind::None => "none",
            LeapRuleKind::Gregorian => "gregorian",
            LeapRuleKind::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(interval: u32) -> LeapRule {
        LeapRule::Custom {
            interval,
            target: LeapTarget::Month(2),
            extra_days: 1,
        }
    }

    #[test]
    fn gregorian_leap_years() {
        let rule = LeapRule::Gregorian;
        assert!(rule.is_leap_year(2024));
        assert!(rule.is_leap_year(2000));
        assert!(!rule.is_leap_year(1900));
        assert!(!rule.is_leap_year(2025));
        assert!(rule.is_leap_year(0));
        assert!(rule.is_leap_year(-4));
        assert!(!rule.is_leap_year(-100));
    }

    #[test]
    fn custom_leap_years() {
        let rule = custom(4);
        assert!(rule.is_leap_year(4728));
        assert!(!rule.is_leap_year(4725));
        assert!(rule.is_leap_year(-8));
    }

    #[test]
    fn none_is_never_leap() {
        assert!(!LeapRule::None.is_leap_year(2024));
        assert_eq!(LeapRule::None.leap_years_before(2024), 0);
    }

    #[test]
    fn leap_count_matches_enumeration() {
        for rule in [LeapRule::Gregorian, custom(4), custom(7)] {
            for (a, b) in [(0, 2025), (-450, 17), (-3, 0), (1601, 2401)] {
                let counted = (a..b).filter(|y| rule.is_leap_year(*y)).count() as i64;
                assert_eq!(
                    rule.leap_years_before(b) - rule.leap_years_before(a),
                    counted,
                    "{:?} over [{}, {})",
                    rule,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn leap_count_at_year_extremes() {
        for rule in [LeapRule::Gregorian, custom(4), custom(7)] {
            let below_min = rule.leap_years_before(i64::MIN);
            let below_max = rule.leap_years_before(i64::MAX);
            assert!(below_min < 0, "{:?}", rule);
            assert!(below_max > 0, "{:?}", rule);
            let leap = i64::from(rule.is_leap_year(i64::MIN));
            assert_eq!(rule.leap_years_before(i64::MIN + 1) - below_min, leap);
        }
        assert_eq!(custom(4).leap_years_before(i64::MIN), i64::MIN / 4);
    }

    #[test]
    fn cycle_years() {
        assert_eq!(LeapRule::None.cycle_years(), 1);
        assert_eq!(LeapRule::Gregorian.cycle_years(), 400);
        assert_eq!(custom(4).cycle_years(), 4);
    }

    #[test]
    fn kind_round_trips_through_serde() {
        let json = serde_json::to_string(&LeapRuleKind::Gregorian).unwrap();
        assert_eq!(json, "\"gregorian\"");
        let kind: LeapRuleKind = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(kind, LeapRuleKind::Custom);
        assert_eq!(custom(4).kind().to_string(), "custom");
    }
}
