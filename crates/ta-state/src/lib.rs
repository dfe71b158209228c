//! ta-state
//!
//! The market-state aggregator: one immutable read model per query,
//! composed from the session hierarchy, the macro tracker, the weekly
//! resolver and the intraday-profile lookup — all evaluated against the
//! *same* [`CivilInstant`] so no field can skew across a minute boundary.
//!
//! Callers re-invoke [`MarketStateEngine::build_state`] on a timer; there
//! are no change events and no shared mutable state.

use serde::Serialize;
use ta_macros::{MacroCatalog, TimeMacro, UpcomingMacro};
use ta_schemas::{AmdPhase, CivilInstant, DailyBias, ProfileType, QuarterId, Weekday, WeeklyTemplateId};
use ta_sessions::{MicroState, SessionCatalog};
use ta_weekly::{current_weekday, resolve_profile, WeekdayProfile};
use ta_windows::CatalogError;

// ---------------------------------------------------------------------------
// Intraday profiles
// ---------------------------------------------------------------------------

/// Display metadata for an intraday day-model profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntradayProfileInfo {
    pub profile: ProfileType,
    pub name: &'static str,
    pub description: &'static str,
    pub entry_window: &'static str,
    pub characteristics: [&'static str; 4],
}

/// The day-model for a directional bias and delay flag.
///
/// Neutral bias has no day-model: the field is simply absent, regardless of
/// the delay flag.
pub fn intraday_profile(bias: DailyBias, is_delayed: bool) -> Option<ProfileType> {
    match (bias, is_delayed) {
        (DailyBias::Neutral, _) => None,
        (DailyBias::Bullish, false) => Some(ProfileType::NormalBuy),
        (DailyBias::Bullish, true) => Some(ProfileType::DelayedBuy),
        (DailyBias::Bearish, false) => Some(ProfileType::NormalSell),
        (DailyBias::Bearish, true) => Some(ProfileType::DelayedSell),
    }
}

pub fn intraday_profile_info(profile: ProfileType) -> IntradayProfileInfo {
    match profile {
        ProfileType::NormalBuy => IntradayProfileInfo {
            profile,
            name: "Classic Bullish Day",
            description: "Low forms in London/early NY, rallies into PM session",
            entry_window: "London Open or NY AM Open",
            characteristics: [
                "Asian range is small/contained",
                "London sweeps Asian low",
                "NY AM confirms bullish structure",
                "PM session makes high of day",
            ],
        },
        ProfileType::DelayedBuy => IntradayProfileInfo {
            profile,
            name: "Seek & Destroy Bullish",
            description: "Extended manipulation, late entry after false breakdown",
            entry_window: "After 10:00 AM NY",
            characteristics: [
                "London makes false high first",
                "NY AM sweeps London low",
                "Entry after manipulation complete",
                "Compressed move into close",
            ],
        },
        ProfileType::NormalSell => IntradayProfileInfo {
            profile,
            name: "Classic Bearish Day",
            description: "High forms in London/early NY, sells off into PM session",
            entry_window: "London Open or NY AM Open",
            characteristics: [
                "Asian range is small/contained",
                "London sweeps Asian high",
                "NY AM confirms bearish structure",
                "PM session makes low of day",
            ],
        },
        ProfileType::DelayedSell => IntradayProfileInfo {
            profile,
            name: "Seek & Destroy Bearish",
            description: "Extended manipulation, late entry after false breakout",
            entry_window: "After 10:00 AM NY",
            characteristics: [
                "London makes false low first",
                "NY AM sweeps London high",
                "Entry after manipulation complete",
                "Compressed move into close",
            ],
        },
    }
}

// ---------------------------------------------------------------------------
// Read model
// ---------------------------------------------------------------------------

/// Countdown descriptor for the next notable window on the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextKeyTime {
    pub label: &'static str,
    /// Start time as `"HH:MM"` desk civil time.
    pub time: String,
    pub hours_away: u32,
    pub minutes_away: u32,
}

impl NextKeyTime {
    fn from_upcoming(up: &UpcomingMacro) -> Self {
        NextKeyTime {
            label: up.time_macro.name,
            time: up.time_macro.window.start_label(),
            hours_away: up.minutes_away / 60,
            minutes_away: up.minutes_away % 60,
        }
    }
}

/// The aggregate snapshot consumed by the presentation layer.
///
/// Off-hours is a valid state, not an error: `session` reads `"Off Hours"`,
/// `session_quarter` falls back to `Q1` and the optional fields are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentMarketState {
    /// Display name of the active session, or `"Off Hours"`.
    pub session: &'static str,
    /// Active quarter; `Q1` when off-session (kept from the original
    /// dashboard contract).
    pub session_quarter: QuarterId,
    /// Quarter-level AMD phase; `X` off-session.
    pub amd_phase: AmdPhase,
    pub day_of_week: Weekday,
    /// Resolved weekday profile (template selection applied).
    pub day_profile: WeekdayProfile,
    /// Day-model from bias × delay; absent for neutral bias.
    pub intraday_profile: Option<ProfileType>,
    pub next_key_time: Option<NextKeyTime>,
    pub active_macro: Option<TimeMacro>,
    pub quarter_state: Option<MicroState>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Validated catalogs plus the snapshot composition. Cheap to build, safe
/// to share: every query method is `&self` and pure.
#[derive(Debug, Clone)]
pub struct MarketStateEngine {
    sessions: SessionCatalog,
    macros: MacroCatalog,
}

impl MarketStateEngine {
    /// Loads and validates the static catalogs. A `CatalogError` here is a
    /// data-contract violation; fail fast at process start.
    pub fn load() -> Result<Self, CatalogError> {
        Ok(Self { sessions: SessionCatalog::load()?, macros: MacroCatalog::load()? })
    }

    pub fn sessions(&self) -> &SessionCatalog {
        &self.sessions
    }

    pub fn macros(&self) -> &MacroCatalog {
        &self.macros
    }

    /// Composes the full snapshot for one instant.
    pub fn build_state(
        &self,
        instant: &CivilInstant,
        bias: DailyBias,
        is_delayed: bool,
        template_id: Option<WeeklyTemplateId>,
    ) -> CurrentMarketState {
        let quarter = self.sessions.current_quarter(instant);
        let day_of_week = current_weekday(instant);

        CurrentMarketState {
            session: self.sessions.session_name(instant),
            session_quarter: quarter.map(|q| q.quarter).unwrap_or(QuarterId::Q1),
            amd_phase: self.sessions.current_amd_phase(instant),
            day_of_week,
            day_profile: *resolve_profile(day_of_week, template_id),
            intraday_profile: intraday_profile(bias, is_delayed),
            next_key_time: self.macros.next_macro(instant).map(|up| NextKeyTime::from_upcoming(&up)),
            active_macro: self.macros.current_macro(instant).copied(),
            quarter_state: self.sessions.micro_state(instant),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
