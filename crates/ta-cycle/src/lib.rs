//! ta-cycle
//!
//! Taylor three-day cycle: a rolling weekday-counted classification of the
//! current day's role (buy / sell / sell-short) relative to a user-chosen
//! cycle start date. The state has no lifecycle of its own — it is
//! recomputed from the start date and the query instant on every call.
//!
//! Pure deterministic logic. No IO, no wall-clock.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ta_schemas::{CivilInstant, CycleDayType};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Where the query instant sits in the rolling 3-trading-day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDayCycleState {
    pub current_day: CycleDayType,
    /// 1..=3 position within the cycle.
    pub day_number: u32,
    pub cycle_start: NaiveDate,
    /// True once the count has run past a full cycle — the rally is
    /// extending beyond the standard three days.
    pub is_extended: bool,
}

/// Cycle position for an instant, counting weekdays from `cycle_start`.
///
/// The start day counts as day 1 when it is a weekday; Saturdays and
/// Sundays never advance the cycle. A count of zero (query at or before the
/// start's midnight, or a weekend-only span) clamps to day 1 so the
/// position is always well-defined.
pub fn cycle_state(cycle_start: NaiveDate, instant: &CivilInstant) -> ThreeDayCycleState {
    let trading_days = trading_days_elapsed(cycle_start, instant);
    let effective = trading_days.max(1);
    let day_number = (effective - 1) % 3 + 1;

    ThreeDayCycleState {
        current_day: CycleDayType::for_day_number(day_number),
        day_number,
        cycle_start,
        is_extended: trading_days > 3,
    }
}

/// Weekdays whose civil midnight lies strictly before the instant,
/// starting at `cycle_start`. Zero when the instant does not reach past
/// the start date's midnight.
fn trading_days_elapsed(cycle_start: NaiveDate, instant: &CivilInstant) -> u32 {
    let today = instant.date();
    let at_midnight = instant.minute_of_day() == 0 && instant.second == 0;

    let mut day = cycle_start;
    let mut count = 0u32;
    while day < today || (day == today && !at_midnight) {
        if !is_weekend(day) {
            count += 1;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
}

// ---------------------------------------------------------------------------
// Cycle-day metadata
// ---------------------------------------------------------------------------

/// Expected open position of a cycle day's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenPosition {
    Low,
    Mid,
    High,
}

/// Expected close position of a cycle day's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosePosition {
    UpperThird,
    Mid,
    LowerThird,
}

/// Directional lean for part of a cycle day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lean {
    Buy,
    Sell,
    Neutral,
}

/// Reference level the cycle day trades around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyLevel {
    MorningLow,
    MorningHigh,
    Midpoint,
}

/// Display metadata for a cycle day, consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleDayInfo {
    pub day: CycleDayType,
    pub name: &'static str,
    pub description: &'static str,
    pub expected_open: OpenPosition,
    pub expected_close: ClosePosition,
    pub action: &'static str,
    pub color: &'static str,
}

/// Intraday lean derived from the cycle day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleExpectation {
    pub morning_bias: Lean,
    pub afternoon_bias: Lean,
    pub key_level: KeyLevel,
}

pub fn cycle_day_info(day: CycleDayType) -> CycleDayInfo {
    match day {
        CycleDayType::Buy => CycleDayInfo {
            day,
            name: "Buy Day (Day 1)",
            description: "After 1-5 days of decline. Look for low in the morning, close in upper third of range.",
            expected_open: OpenPosition::Low,
            expected_close: ClosePosition::UpperThird,
            action: "Buy the morning low, hold for Day 2",
            color: "#10B981",
        },
        CycleDayType::Sell => CycleDayInfo {
            day,
            name: "Sell Day (Day 2)",
            description: "Usually rallies above Day 1. Cover longs, evaluate for continuation.",
            expected_open: OpenPosition::Mid,
            expected_close: ClosePosition::UpperThird,
            action: "Sell/cover longs on strength. Strong close = possible Day 3 continuation",
            color: "#F59E0B",
        },
        CycleDayType::SellShort => CycleDayInfo {
            day,
            name: "Sell Short Day (Day 3)",
            description: "High made in morning, close in lower third. End of up-cycle.",
            expected_open: OpenPosition::High,
            expected_close: ClosePosition::LowerThird,
            action: "Sell short morning highs, expect decline into close",
            color: "#EF4444",
        },
    }
}

// ---------------------------------------------------------------------------
// Cycle patterns
// ---------------------------------------------------------------------------

/// A named cycle shape: the day-role sequence a multi-day move is expected
/// to follow. Display metadata only; `cycle_state` always counts the
/// standard 3-day shape. Serialize-only: the catalog is compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CyclePattern {
    /// Stable identifier, e.g. `"extended_rally"`.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sequence: &'static [CycleDayType],
}

/// The immutable cycle-pattern catalog.
pub const CYCLE_PATTERNS: [CyclePattern; 3] = [
    CyclePattern {
        id: "standard",
        name: "Standard 3-Day Cycle",
        description: "Classic Buy → Sell → Sell Short pattern",
        sequence: &[CycleDayType::Buy, CycleDayType::Sell, CycleDayType::SellShort],
    },
    CyclePattern {
        id: "extended_rally",
        name: "Extended Rally (4-8 Days)",
        description: "Strong trend, larger structural pattern. Multiple Sell days before Sell Short.",
        sequence: &[
            CycleDayType::Buy,
            CycleDayType::Sell,
            CycleDayType::Sell,
            CycleDayType::Sell,
            CycleDayType::SellShort,
        ],
    },
    CyclePattern {
        id: "failed_buy",
        name: "Failed Buy Day",
        description: "Day 1 reverses, skip to Sell Short immediately",
        sequence: &[CycleDayType::Buy, CycleDayType::SellShort],
    },
];

/// Catalog entry for a stable id, or `None`.
pub fn cycle_pattern_by_id(id: &str) -> Option<&'static CyclePattern> {
    CYCLE_PATTERNS.iter().find(|p| p.id == id)
}

pub fn cycle_expectation(day: CycleDayType) -> CycleExpectation {
    match day {
        CycleDayType::Buy => CycleExpectation {
            morning_bias: Lean::Buy,
            afternoon_bias: Lean::Buy,
            key_level: KeyLevel::MorningLow,
        },
        CycleDayType::Sell => CycleExpectation {
            morning_bias: Lean::Buy,
            afternoon_bias: Lean::Neutral,
            key_level: KeyLevel::Midpoint,
        },
        CycleDayType::SellShort => CycleExpectation {
            morning_bias: Lean::Sell,
            afternoon_bias: Lean::Sell,
            key_level: KeyLevel::MorningHigh,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(date: NaiveDate, hour: u32) -> CivilInstant {
        CivilInstant::from_parts(date.year(), date.month(), date.day(), hour, 0, 0).unwrap()
    }

    // 2024-06-03 is a Monday.
    const Y: i32 = 2024;

    #[test]
    fn start_day_is_day_one() {
        let start = d(Y, 6, 3);
        let s = cycle_state(start, &at(start, 10));
        assert_eq!(s.day_number, 1);
        assert_eq!(s.current_day, CycleDayType::Buy);
        assert!(!s.is_extended);
    }

    #[test]
    fn start_midnight_clamps_to_day_one() {
        let start = d(Y, 6, 3);
        let s = cycle_state(start, &at(start, 0));
        assert_eq!(s.day_number, 1);
        assert!(!s.is_extended);
    }

    #[test]
    fn days_two_and_three_follow() {
        let start = d(Y, 6, 3);
        let tue = cycle_state(start, &at(d(Y, 6, 4), 10));
        let wed = cycle_state(start, &at(d(Y, 6, 5), 10));
        assert_eq!((tue.day_number, tue.current_day), (2, CycleDayType::Sell));
        assert_eq!((wed.day_number, wed.current_day), (3, CycleDayType::SellShort));
        assert!(!tue.is_extended && !wed.is_extended);
    }

    #[test]
    fn cycle_wraps_after_three_trading_days_and_flags_extension() {
        let start = d(Y, 6, 3);
        // Thursday is trading day 4: back to day 1, now extended.
        let thu = cycle_state(start, &at(d(Y, 6, 6), 10));
        assert_eq!(thu.day_number, 1);
        assert_eq!(thu.current_day, CycleDayType::Buy);
        assert!(thu.is_extended);
    }

    #[test]
    fn weekend_does_not_advance_the_cycle() {
        // Start Friday 2024-06-07; Monday 06-10 is trading day 2.
        let start = d(Y, 6, 7);
        let sat = cycle_state(start, &at(d(Y, 6, 8), 10));
        let sun = cycle_state(start, &at(d(Y, 6, 9), 10));
        let mon = cycle_state(start, &at(d(Y, 6, 10), 10));
        assert_eq!(sat.day_number, 1);
        assert_eq!(sun.day_number, 1);
        assert_eq!((mon.day_number, mon.current_day), (2, CycleDayType::Sell));
    }

    #[test]
    fn weekend_start_clamps_to_day_one() {
        // Start Saturday, query Sunday: zero weekdays elapsed.
        let start = d(Y, 6, 8);
        let s = cycle_state(start, &at(d(Y, 6, 9), 10));
        assert_eq!(s.day_number, 1);
        assert_eq!(s.current_day, CycleDayType::Buy);
        assert!(!s.is_extended);
    }

    #[test]
    fn long_extension_keeps_cycling() {
        let start = d(Y, 6, 3);
        // Friday 06-14 is trading day 10: ((10-1) % 3) + 1 = 1.
        let s = cycle_state(start, &at(d(Y, 6, 14), 10));
        assert_eq!(s.day_number, 1);
        assert!(s.is_extended);
    }

    #[test]
    fn pattern_catalog_starts_on_a_buy_day_and_resolves_by_id() {
        for p in &CYCLE_PATTERNS {
            assert_eq!(p.sequence.first(), Some(&CycleDayType::Buy), "{}", p.id);
            assert_eq!(p.sequence.last(), Some(&CycleDayType::SellShort), "{}", p.id);
            assert_eq!(cycle_pattern_by_id(p.id).map(|found| found.id), Some(p.id));
        }
        // The standard shape is exactly the day_number mapping in order.
        let standard = cycle_pattern_by_id("standard").unwrap();
        for (offset, day) in standard.sequence.iter().enumerate() {
            assert_eq!(*day, CycleDayType::for_day_number(offset as u32 + 1));
        }
        assert_eq!(cycle_pattern_by_id("no_such_pattern"), None);
    }

    #[test]
    fn metadata_tables_are_consistent() {
        for day in [CycleDayType::Buy, CycleDayType::Sell, CycleDayType::SellShort] {
            assert_eq!(cycle_day_info(day).day, day);
        }
        assert_eq!(cycle_expectation(CycleDayType::Buy).key_level, KeyLevel::MorningLow);
        assert_eq!(cycle_expectation(CycleDayType::SellShort).morning_bias, Lean::Sell);
    }
}
