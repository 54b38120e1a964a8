//! Normalized year layout shared by every query path
//!
//! A calendar's year only comes in two shapes: common and leap. Both are
//! resolved once from the [`CalendarDefinition`] into a [`YearPlan`]: the
//! ordered run of months and intercalary days, each with its day offset from
//! the start of the year and the number of weekday-counting days before it.
//!
//! Date conversion walks the offsets; weekday calculation reads the counting
//! totals. Both read the same plan, so they always agree on where intercalary
//! days fall and how long a year is.

use crate::value_objects::{CalendarDefinition, LeapRule};

/// One unit of a year: a whole month or a single intercalary day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Month {
        /// 1-indexed month
        month: usize,
        days: u32,
    },
    Intercalary {
        /// Index into the definition's intercalary days
        entry: usize,
        /// 1-indexed month this day follows
        after_month: usize,
        /// 1-indexed position within the block after `after_month`
        ordinal: u32,
        counts_for_weekdays: bool,
    },
}

impl Slot {
    /// Number of days covered by the slot.
    pub fn days(&self) -> u32 {
        match self {
            Slot::Month { days, .. } => *days,
            Slot::Intercalary { .. } => 1,
        }
    }

    /// Whether the slot's days advance the weekly cycle.
    pub fn counts_for_weekdays(&self) -> bool {
        match self {
            Slot::Month { .. } => true,
            Slot::Intercalary {
                counts_for_weekdays,
                ..
            } => *counts_for_weekdays,
        }
    }
}

/// A slot positioned within its year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedSlot {
    pub slot: Slot,
    /// Days from the start of the year to the first day of the slot
    pub start: u32,
    /// Weekday-counting days from the start of the year to the slot
    pub counted_before: u32,
}

/// An intercalary day active in a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntercalaryPlacement {
    /// Index into the definition's intercalary days
    pub entry: usize,
    /// 1-indexed month this day follows
    pub after_month: usize,
    /// 1-indexed position within the block after `after_month`
    pub ordinal: u32,
    /// 1-indexed day of the year
    pub day_of_year: u32,
    pub counts_for_weekdays: bool,
}

// ============================================================================
// YearPlan
// ============================================================================

/// Layout of a common or a leap year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPlan {
    slots: Vec<PlannedSlot>,
    length: u32,
    counting_length: u32,
}

impl YearPlan {
    /// Resolves the year layout of `calendar` for a common or a leap year.
    pub fn build(calendar: &CalendarDefinition, leap: bool) -> Self {
        let capacity = calendar.months().len() + calendar.intercalary_days().len();
        let mut slots = Vec::with_capacity(capacity);
        let mut start = 0u32;
        let mut counted = 0u32;

        let mut push = |slot: Slot, slots: &mut Vec<PlannedSlot>| {
            slots.push(PlannedSlot {
                slot,
                start,
                counted_before: counted,
            });
            start += slot.days();
            if slot.counts_for_weekdays() {
                counted += slot.days();
            }
        };

        for (index, month) in calendar.months().iter().enumerate() {
            let month_number = index + 1;
            let days = if leap {
                month.days + month.leap_days
            } else {
                month.days
            };
            push(
                Slot::Month {
                    month: month_number,
                    days,
                },
                &mut slots,
            );

            let block = calendar
                .intercalary_days()
                .iter()
                .enumerate()
                .filter(|(_, day)| day.after_month == month_number && (leap || !day.leap_only));
            for (ordinal, (entry, day)) in (1u32..).zip(block) {
                push(
                    Slot::Intercalary {
                        entry,
                        after_month: month_number,
                        ordinal,
                        counts_for_weekdays: day.counts_for_weekdays,
                    },
                    &mut slots,
                );
            }
        }

        let (length, counting_length) = slots
            .last()
            .map(|last| {
                let counted = if last.slot.counts_for_weekdays() {
                    last.slot.days()
                } else {
                    0
                };
                (last.start + last.slot.days(), last.counted_before + counted)
            })
            .unwrap_or((0, 0));

        Self {
            slots,
            length,
            counting_length,
        }
    }

    /// Total days in the year, intercalary days included.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Days in the year that advance the weekly cycle.
    pub fn counting_length(&self) -> u32 {
        self.counting_length
    }

    /// The slot of a 1-indexed month.
    pub fn month_slot(&self, month: usize) -> Option<&PlannedSlot> {
        self.slots
            .iter()
            .find(|s| matches!(s.slot, Slot::Month { month: m, .. } if m == month))
    }

    /// Days in a 1-indexed month.
    pub fn month_length(&self, month: usize) -> Option<u32> {
        self.month_slot(month).map(|s| s.slot.days())
    }

    /// The `ordinal`th intercalary day after `after_month`.
    pub fn intercalary_slot(&self, after_month: usize, ordinal: u32) -> Option<&PlannedSlot> {
        self.slots.iter().find(|s| {
            matches!(
                s.slot,
                Slot::Intercalary { after_month: a, ordinal: o, .. }
                    if a == after_month && o == ordinal
            )
        })
    }

    /// Number of intercalary days following `after_month`.
    pub fn intercalary_block_len(&self, after_month: usize) -> u32 {
        self.slots
            .iter()
            .filter(|s| {
                matches!(s.slot, Slot::Intercalary { after_month: a, .. } if a == after_month)
            })
            .count() as u32
    }

    /// Intercalary days active in this layout, in chronological order.
    pub fn intercalary_placements(&self) -> impl Iterator<Item = IntercalaryPlacement> + '_ {
        self.slots.iter().filter_map(|s| match s.slot {
            Slot::Intercalary {
                entry,
                after_month,
                ordinal,
                counts_for_weekdays,
            } => Some(IntercalaryPlacement {
                entry,
                after_month,
                ordinal,
                day_of_year: s.start + 1,
                counts_for_weekdays,
            }),
            Slot::Month { .. } => None,
        })
    }

    /// Finds the slot holding the 0-indexed `day_of_year`, with the day's
    /// 0-indexed offset inside that slot. Past-the-end days clamp to the last
    /// day of the year; a plan always holds at least one month.
    pub fn locate(&self, day_of_year: u32) -> (&PlannedSlot, u32) {
        let day = day_of_year.min(self.length.saturating_sub(1));
        let index = self
            .slots
            .partition_point(|s| s.start <= day)
            .saturating_sub(1);
        let slot = &self.slots[index];
        (slot, day - slot.start)
    }
}

// ============================================================================
// CalendarPlan
// ============================================================================

/// Both year layouts of a calendar plus its leap rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarPlan {
    rule: LeapRule,
    common: YearPlan,
    leap: YearPlan,
}

impl CalendarPlan {
    pub fn new(calendar: &CalendarDefinition) -> Self {
        Self {
            rule: *calendar.leap_rule(),
            common: YearPlan::build(calendar, false),
            leap: YearPlan::build(calendar, true),
        }
    }

    /// Layout of `year` (displayed numbering).
    pub fn year(&self, year: i64) -> &YearPlan {
        if self.rule.is_leap_year(year) {
            &self.leap
        } else {
            &self.common
        }
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        self.rule.is_leap_year(year)
    }

    /// Total days in `year`.
    pub fn year_length(&self, year: i64) -> u32 {
        self.year(year).length()
    }

    /// Years in one repetition of the leap pattern.
    pub fn cycle_years(&self) -> i64 {
        self.rule.cycle_years()
    }

    /// Days in one repetition of the leap pattern.
    pub fn cycle_days(&self) -> i64 {
        (self.days_before_year(self.cycle_years()) - self.days_before_year(0)) as i64
    }

    /// Signed days from the start of year 0 to the start of `year`.
    pub fn days_before_year(&self, year: i64) -> i128 {
        Self::span(
            year,
            self.rule.leap_years_before(year),
            self.common.length(),
            self.leap.length(),
        )
    }

    /// Signed weekday-counting days from the start of year 0 to the start of `year`.
    pub fn counted_days_before_year(&self, year: i64) -> i128 {
        Self::span(
            year,
            self.rule.leap_years_before(year),
            self.common.counting_length(),
            self.leap.counting_length(),
        )
    }

    fn span(year: i64, leap_years: i64, common: u32, leap: u32) -> i128 {
        year as i128 * common as i128 + leap_years as i128 * (leap as i128 - common as i128)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{
        IntercalaryDay, LeapTarget, MonthDefinition, TimeUnits, WeekdayDefinition, YearSettings,
    };

    /// Two 10-day months; a counting day after the first, a leap-only
    /// non-counting pair after the second.
    fn small_calendar() -> CalendarDefinition {
        CalendarDefinition::new(
            vec![MonthDefinition::new("Early", 10), MonthDefinition::new("Late", 10)],
            vec![WeekdayDefinition::new("Day", "D")],
            YearSettings::default(),
            LeapRule::Custom {
                interval: 3,
                target: LeapTarget::Month(1),
                extra_days: 2,
            },
            TimeUnits::default(),
            vec![
                IntercalaryDay::new("Counted", 1).counting_for_weekdays(),
                IntercalaryDay::new("EveA", 2).leap_only(),
                IntercalaryDay::new("EveB", 2).leap_only(),
            ],
        )
        .unwrap()
    }

    mod year_plan {
        use super::*;

        #[test]
        fn common_year_layout() {
            let plan = YearPlan::build(&small_calendar(), false);
            assert_eq!(plan.length(), 21);
            assert_eq!(plan.counting_length(), 21);
            assert_eq!(plan.intercalary_placements().count(), 1);
            assert_eq!(plan.month_length(1), Some(10));
            assert_eq!(plan.month_slot(2).map(|s| s.start), Some(11));
            assert_eq!(plan.intercalary_block_len(2), 0);
        }

        #[test]
        fn leap_year_layout() {
            let plan = YearPlan::build(&small_calendar(), true);
            assert_eq!(plan.month_length(1), Some(12));
            assert_eq!(plan.length(), 12 + 1 + 10 + 2);
            assert_eq!(plan.counting_length(), 12 + 1 + 10);
            assert_eq!(plan.intercalary_block_len(2), 2);

            let eve_b = plan.intercalary_slot(2, 2).unwrap();
            assert_eq!(eve_b.start, 24);
            assert_eq!(eve_b.counted_before, 23);
        }

        #[test]
        fn placements_in_order() {
            let plan = YearPlan::build(&small_calendar(), true);
            let placements: Vec<_> = plan.intercalary_placements().collect();
            assert_eq!(placements.len(), 3);
            assert_eq!(placements[0].entry, 0);
            assert_eq!(placements[0].day_of_year, 13);
            assert!(placements[0].counts_for_weekdays);
            assert_eq!((placements[2].after_month, placements[2].ordinal), (2, 2));
            assert_eq!(placements[2].day_of_year, 25);
        }

        #[test]
        fn locate_walks_boundaries() {
            let plan = YearPlan::build(&small_calendar(), false);

            let (slot, offset) = plan.locate(0);
            assert!(matches!(slot.slot, Slot::Month { month: 1, .. }));
            assert_eq!(offset, 0);

            let (slot, offset) = plan.locate(9);
            assert!(matches!(slot.slot, Slot::Month { month: 1, .. }));
            assert_eq!(offset, 9);

            let (slot, _) = plan.locate(10);
            assert!(matches!(slot.slot, Slot::Intercalary { entry: 0, .. }));

            let (slot, offset) = plan.locate(20);
            assert!(matches!(slot.slot, Slot::Month { month: 2, .. }));
            assert_eq!(offset, 9);
        }

        #[test]
        fn locate_clamps_past_end() {
            let plan = YearPlan::build(&small_calendar(), false);
            let (slot, offset) = plan.locate(500);
            assert!(matches!(slot.slot, Slot::Month { month: 2, .. }));
            assert_eq!(offset, 9);
        }

        #[test]
        fn unknown_month_has_no_length() {
            let plan = YearPlan::build(&small_calendar(), false);
            assert_eq!(plan.month_length(0), None);
            assert_eq!(plan.month_length(3), None);
        }
    }

    mod calendar_plan {
        use super::*;

        #[test]
        fn gregorian_year_lengths() {
            let plan = CalendarPlan::new(&CalendarDefinition::gregorian());
            assert_eq!(plan.year_length(2023), 365);
            assert_eq!(plan.year_length(2024), 366);
            assert_eq!(plan.year_length(1900), 365);
            assert_eq!(plan.year_length(2000), 366);
            assert_eq!(plan.cycle_days(), 146_097);
        }

        #[test]
        fn harptos_year_lengths() {
            let plan = CalendarPlan::new(&CalendarDefinition::harptos());
            assert_eq!(plan.year_length(1491), 365);
            assert_eq!(plan.year_length(1492), 366);
            assert_eq!(plan.year(1492).counting_length(), 360);
            assert_eq!(plan.year(1491).counting_length(), 360);
        }

        #[test]
        fn days_before_year_matches_summed_lengths() {
            let plan = CalendarPlan::new(&small_calendar());
            for (a, b) in [(0, 10), (-7, 5), (-12, -3)] {
                let summed: i128 = (a..b).map(|y| plan.year_length(y) as i128).sum();
                assert_eq!(plan.days_before_year(b) - plan.days_before_year(a), summed);

                let counted: i128 = (a..b)
                    .map(|y| plan.year(y).counting_length() as i128)
                    .sum();
                assert_eq!(
                    plan.counted_days_before_year(b) - plan.counted_days_before_year(a),
                    counted
                );
            }
        }

        #[test]
        fn year_zero_is_origin() {
            let plan = CalendarPlan::new(&CalendarDefinition::gregorian());
            assert_eq!(plan.days_before_year(0), 0);
            assert_eq!(plan.days_before_year(1), 366);
            assert_eq!(plan.days_before_year(-1), -365);
        }
    }
}
