//! ta-schemas
//!
//! Shared data types for the time-phase engine.
//!
//! Everything here is plain data: closed enums with exhaustive matches and
//! small value structs. No IO, no wall-clock, no catalog contents — catalogs
//! live in the crates that own them. Adding a variant (a fifth micro, a
//! fourth cycle day) is a compile-visible change everywhere it matters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u32 = 1440;

// ---------------------------------------------------------------------------
// CivilInstant
// ---------------------------------------------------------------------------

/// A single civil timestamp in the desk reference zone.
///
/// Produced once per query by `ta-clock`; every downstream classification of
/// the same query must consume the same `CivilInstant` so sub-computations
/// cannot skew across a minute boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilInstant {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilInstant {
    /// Builds an instant from already-validated civil fields.
    ///
    /// Returns `None` if the fields do not form a real calendar date/time;
    /// the clock crate constructs from `chrono` values and never hits this.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?;
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self { year, month, day, hour, minute, second })
    }

    /// Minutes since civil midnight, 0..1440.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// The civil calendar date of this instant.
    ///
    /// Both entry points (`from_parts`, the clock crate) only produce real
    /// dates, but the fields are public; a hand-built instant with
    /// out-of-range fields folds to [`NaiveDate::MIN`] rather than panicking.
    pub fn date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or(NaiveDate::MIN)
    }
}

// ---------------------------------------------------------------------------
// TimeWindow
// ---------------------------------------------------------------------------

/// A half-open `[start, end)` interval in minutes-of-day.
///
/// If `start > end` numerically the window wraps through midnight; the wrap
/// end is treated as minute 1440, so `20:00 → 00:00` covers `[1200, 1440)`.
/// A window whose start equals its end has zero duration and is rejected at
/// catalog load (see `ta-windows`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl TimeWindow {
    pub const fn new(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        Self { start_hour, start_minute, end_hour, end_minute }
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_hour * 60 + self.start_minute
    }

    /// Raw end in minutes-of-day; `0` for a window ending at midnight.
    pub fn end_minutes_raw(&self) -> u32 {
        self.end_hour * 60 + self.end_minute
    }

    /// End adjusted for the wrap convention: a wrapping window ends at 1440.
    pub fn end_minutes(&self) -> u32 {
        if self.wraps() {
            self.end_minutes_raw() + MINUTES_PER_DAY
        } else {
            self.end_minutes_raw()
        }
    }

    /// True when the interval crosses civil midnight.
    pub fn wraps(&self) -> bool {
        self.start_minutes() > self.end_minutes_raw()
    }

    /// Whole-window duration in minutes, wrap-adjusted. Zero only for the
    /// degenerate `start == end` window.
    pub fn duration_minutes(&self) -> u32 {
        // end_minutes() >= start_minutes() in both the plain and wrap cases.
        self.end_minutes() - self.start_minutes()
    }

    /// Half-open membership test under the wrap convention.
    pub fn contains(&self, minute_of_day: u32) -> bool {
        let start = self.start_minutes();
        if self.wraps() {
            // [start, 1440) ∪ [0, raw_end)
            minute_of_day >= start || minute_of_day < self.end_minutes_raw()
        } else {
            minute_of_day >= start && minute_of_day < self.end_minutes_raw()
        }
    }

    /// Minutes elapsed since the window start, for a minute inside it.
    /// Wrap-adjusted: for `20:00 → 00:00`, minute 30 yields 270.
    pub fn elapsed_minutes(&self, minute_of_day: u32) -> u32 {
        let start = self.start_minutes();
        if minute_of_day >= start {
            minute_of_day - start
        } else {
            MINUTES_PER_DAY - start + minute_of_day
        }
    }

    /// `"HH:MM"` rendering of the window start, for display descriptors.
    pub fn start_label(&self) -> String {
        format!("{:02}:{:02}", self.start_hour, self.start_minute)
    }
}

// ---------------------------------------------------------------------------
// Session / quarter identifiers
// ---------------------------------------------------------------------------

/// The four desk sessions, in catalog (chronological killzone) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionId {
    Asia,
    London,
    NyAm,
    NyPm,
}

impl SessionId {
    /// Stable persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionId::Asia => "asia",
            SessionId::London => "london",
            SessionId::NyAm => "ny_am",
            SessionId::NyPm => "ny_pm",
        }
    }

    /// Human display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionId::Asia => "Asia",
            SessionId::London => "London",
            SessionId::NyAm => "NY AM",
            SessionId::NyPm => "NY PM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuarterId {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl QuarterId {
    pub const ALL: [QuarterId; 4] = [QuarterId::Q1, QuarterId::Q2, QuarterId::Q3, QuarterId::Q4];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuarterId::Q1 => "Q1",
            QuarterId::Q2 => "Q2",
            QuarterId::Q3 => "Q3",
            QuarterId::Q4 => "Q4",
        }
    }

    /// 1-based index within the session.
    pub fn index(&self) -> u32 {
        match self {
            QuarterId::Q1 => 1,
            QuarterId::Q2 => 2,
            QuarterId::Q3 => 3,
            QuarterId::Q4 => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// AMD phase
// ---------------------------------------------------------------------------

/// Canonical market-phase labels. `X` reads "reversal or continuation".
///
/// The index→phase table is identical at quarter and micro granularity:
/// 1 accumulation, 2 manipulation, 3 distribution, 4 X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmdPhase {
    Accumulation,
    Manipulation,
    Distribution,
    X,
}

impl AmdPhase {
    /// The fixed subdivision mapping, shared by quarters and micros.
    pub fn for_index(index: u32) -> AmdPhase {
        match index {
            1 => AmdPhase::Accumulation,
            2 => AmdPhase::Manipulation,
            3 => AmdPhase::Distribution,
            _ => AmdPhase::X,
        }
    }

    pub fn for_quarter(quarter: QuarterId) -> AmdPhase {
        AmdPhase::for_index(quarter.index())
    }

    pub fn display_name(&self) -> &'static str {
        self.info().name
    }

    /// Display metadata for the phase.
    pub fn info(&self) -> AmdPhaseInfo {
        match self {
            AmdPhase::Accumulation => AmdPhaseInfo {
                phase: AmdPhase::Accumulation,
                name: "Accumulation",
                description: "Smart money building positions, low volatility range",
                color: "#3B82F6",
            },
            AmdPhase::Manipulation => AmdPhaseInfo {
                phase: AmdPhase::Manipulation,
                name: "Manipulation",
                description: "Judas swing to trap retail, liquidity hunt",
                color: "#F59E0B",
            },
            AmdPhase::Distribution => AmdPhaseInfo {
                phase: AmdPhase::Distribution,
                name: "Distribution",
                description: "Smart money distributing, expansion move",
                color: "#10B981",
            },
            AmdPhase::X => AmdPhaseInfo {
                phase: AmdPhase::X,
                name: "Reversal/Continuation",
                description: "Late session reversal or trend continuation",
                color: "#8B5CF6",
            },
        }
    }
}

/// Display metadata for an AMD phase. Serialize-only: compiled-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmdPhaseInfo {
    pub phase: AmdPhase,
    pub name: &'static str,
    pub description: &'static str,
    /// Hex color used by the presentation layer.
    pub color: &'static str,
}

// ---------------------------------------------------------------------------
// Trading weekday
// ---------------------------------------------------------------------------

/// Monday..Friday. Weekend instants fold to Monday at resolution time (a
/// preserved quirk of the desk workflow, see `ta-weekly`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }
}

// ---------------------------------------------------------------------------
// Bias / behavioral labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyBias {
    Bullish,
    Bearish,
    Neutral,
}

/// Directional bias carried by a weekly template. Unlike [`DailyBias`] there
/// is no neutral template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateBias {
    Bullish,
    Bearish,
}

/// Expected day-level price action in a weekday profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedAction {
    Range,
    ExpansionUp,
    ExpansionDown,
    ReversalUp,
    ReversalDown,
    SeekDestroy,
}

/// The four intraday day-model profiles, keyed by bias × delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    NormalBuy,
    DelayedBuy,
    NormalSell,
    DelayedSell,
}

/// Behavioral category of a macro window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroCategory {
    Manipulation,
    Expansion,
    Accumulation,
}

// ---------------------------------------------------------------------------
// Session-flow strategies
// ---------------------------------------------------------------------------

/// Coarse session axis used by the session-flow strategy catalog; both NY
/// sessions read as a single NY leg there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowSession {
    Asia,
    London,
    Ny,
}

/// What one session leg does within a session-flow strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    Range,
    Manipulation,
    Expansion,
    Consolidation,
    Reversal,
}

// ---------------------------------------------------------------------------
// Three-day cycle
// ---------------------------------------------------------------------------

/// Taylor cycle day roles: day 1 buy, day 2 sell, day 3 sell-short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDayType {
    Buy,
    Sell,
    SellShort,
}

impl CycleDayType {
    pub fn for_day_number(day_number: u32) -> CycleDayType {
        match day_number {
            1 => CycleDayType::Buy,
            2 => CycleDayType::Sell,
            _ => CycleDayType::SellShort,
        }
    }
}

// ---------------------------------------------------------------------------
// Weekly template identifiers
// ---------------------------------------------------------------------------

/// UI grouping for weekly templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Classic,
    Wednesday,
    Consolidation,
    SeekDestroy,
    MondayExpansion,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 5] = [
        TemplateCategory::MondayExpansion,
        TemplateCategory::Classic,
        TemplateCategory::Wednesday,
        TemplateCategory::Consolidation,
        TemplateCategory::SeekDestroy,
    ];
}

/// The closed catalog of weekly templates.
///
/// Selections persist as strings keyed by week-start date; a stored id that
/// no longer parses falls back to the default weekly profile, non-fatally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeeklyTemplateId {
    ClassicTuesdayLow,
    ClassicTuesdayHigh,
    WednesdayLow,
    WednesdayHigh,
    WednesdayReversalBull,
    WednesdayReversalBear,
    ConsolidationThursdayBull,
    ConsolidationThursdayBear,
    SeekDestroyFridayBull,
    SeekDestroyFridayBear,
    MondayExpansionBull,
    MondayExpansionBear,
    MondayGapContinuationBull,
    MondayGapContinuationBear,
}

impl WeeklyTemplateId {
    pub const ALL: [WeeklyTemplateId; 14] = [
        WeeklyTemplateId::ClassicTuesdayLow,
        WeeklyTemplateId::ClassicTuesdayHigh,
        WeeklyTemplateId::WednesdayLow,
        WeeklyTemplateId::WednesdayHigh,
        WeeklyTemplateId::WednesdayReversalBull,
        WeeklyTemplateId::WednesdayReversalBear,
        WeeklyTemplateId::ConsolidationThursdayBull,
        WeeklyTemplateId::ConsolidationThursdayBear,
        WeeklyTemplateId::SeekDestroyFridayBull,
        WeeklyTemplateId::SeekDestroyFridayBear,
        WeeklyTemplateId::MondayExpansionBull,
        WeeklyTemplateId::MondayExpansionBear,
        WeeklyTemplateId::MondayGapContinuationBull,
        WeeklyTemplateId::MondayGapContinuationBear,
    ];

    /// Stable persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeeklyTemplateId::ClassicTuesdayLow => "classic_tuesday_low",
            WeeklyTemplateId::ClassicTuesdayHigh => "classic_tuesday_high",
            WeeklyTemplateId::WednesdayLow => "wednesday_low",
            WeeklyTemplateId::WednesdayHigh => "wednesday_high",
            WeeklyTemplateId::WednesdayReversalBull => "wednesday_reversal_bull",
            WeeklyTemplateId::WednesdayReversalBear => "wednesday_reversal_bear",
            WeeklyTemplateId::ConsolidationThursdayBull => "consolidation_thursday_bull",
            WeeklyTemplateId::ConsolidationThursdayBear => "consolidation_thursday_bear",
            WeeklyTemplateId::SeekDestroyFridayBull => "seek_destroy_friday_bull",
            WeeklyTemplateId::SeekDestroyFridayBear => "seek_destroy_friday_bear",
            WeeklyTemplateId::MondayExpansionBull => "monday_expansion_bull",
            WeeklyTemplateId::MondayExpansionBear => "monday_expansion_bear",
            WeeklyTemplateId::MondayGapContinuationBull => "monday_gap_continuation_bull",
            WeeklyTemplateId::MondayGapContinuationBear => "monday_gap_continuation_bear",
        }
    }

    /// Parses a persisted identifier. Unknown input is `None`, not an error:
    /// stale rows written by older builds must degrade to the default profile.
    pub fn parse(s: &str) -> Option<WeeklyTemplateId> {
        WeeklyTemplateId::ALL.iter().copied().find(|id| id.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_of_day_spans_full_range() {
        let midnight = CivilInstant::from_parts(2024, 6, 3, 0, 0, 0).unwrap();
        let last = CivilInstant::from_parts(2024, 6, 3, 23, 59, 59).unwrap();
        assert_eq!(midnight.minute_of_day(), 0);
        assert_eq!(last.minute_of_day(), 1439);
    }

    #[test]
    fn from_parts_rejects_bad_fields() {
        assert!(CivilInstant::from_parts(2024, 2, 30, 0, 0, 0).is_none());
        assert!(CivilInstant::from_parts(2024, 6, 3, 24, 0, 0).is_none());
        assert!(CivilInstant::from_parts(2024, 6, 3, 12, 60, 0).is_none());
    }

    #[test]
    fn plain_window_membership_is_half_open() {
        let w = TimeWindow::new(9, 30, 12, 0);
        assert!(!w.wraps());
        assert!(w.contains(9 * 60 + 30));
        assert!(w.contains(12 * 60 - 1));
        assert!(!w.contains(12 * 60));
        assert_eq!(w.duration_minutes(), 150);
    }

    #[test]
    fn wrapping_window_ends_at_minute_1440() {
        let w = TimeWindow::new(20, 0, 0, 0);
        assert!(w.wraps());
        assert_eq!(w.duration_minutes(), 240);
        assert!(w.contains(23 * 60 + 59));
        assert!(!w.contains(0));
        assert_eq!(w.elapsed_minutes(21 * 60), 60);
    }

    #[test]
    fn wrapping_window_with_nonzero_end() {
        let w = TimeWindow::new(22, 0, 2, 0);
        assert!(w.contains(23 * 60));
        assert!(w.contains(0));
        assert!(w.contains(119));
        assert!(!w.contains(120));
        assert_eq!(w.duration_minutes(), 240);
        assert_eq!(w.elapsed_minutes(60), 180);
    }

    #[test]
    fn amd_table_is_identical_at_both_levels() {
        for q in QuarterId::ALL {
            assert_eq!(AmdPhase::for_quarter(q), AmdPhase::for_index(q.index()));
        }
        assert_eq!(AmdPhase::for_index(1), AmdPhase::Accumulation);
        assert_eq!(AmdPhase::for_index(4), AmdPhase::X);
    }

    #[test]
    fn hand_built_instant_with_bad_fields_folds_instead_of_panicking() {
        // The public fields allow states from_parts would reject.
        let bad = CivilInstant { year: 2024, month: 13, day: 40, hour: 0, minute: 0, second: 0 };
        assert_eq!(bad.date(), NaiveDate::MIN);
    }

    #[test]
    fn amd_phase_info_carries_name_description_and_color() {
        let phases = [
            AmdPhase::Accumulation,
            AmdPhase::Manipulation,
            AmdPhase::Distribution,
            AmdPhase::X,
        ];
        for phase in phases {
            let info = phase.info();
            assert_eq!(info.phase, phase);
            assert_eq!(info.name, phase.display_name());
            assert!(!info.description.is_empty());
            assert!(info.color.starts_with('#'));
        }
        assert_eq!(AmdPhase::Manipulation.info().color, "#F59E0B");
    }

    #[test]
    fn template_id_round_trips_and_rejects_unknown() {
        for id in WeeklyTemplateId::ALL {
            assert_eq!(WeeklyTemplateId::parse(id.as_str()), Some(id));
        }
        assert_eq!(WeeklyTemplateId::parse("not_a_template"), None);
        assert_eq!(WeeklyTemplateId::parse(""), None);
    }
}
