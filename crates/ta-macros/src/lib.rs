//! ta-macros
//!
//! The flat catalog of short, named high-probability windows ("macros") and
//! its current/next/progress queries. Macros are not nested in sessions —
//! the session tag is display metadata only — and none of them wraps
//! midnight, though the *next-macro* scan wraps to tomorrow's first entry.
//!
//! Pure deterministic logic. No IO, no wall-clock.

use serde::Serialize;
use ta_schemas::{CivilInstant, MacroCategory, SessionId, TimeWindow, MINUTES_PER_DAY};
use ta_windows::{classify, progress_percent, validate_windows, CatalogError, Windowed};

// ---------------------------------------------------------------------------
// Catalog type
// ---------------------------------------------------------------------------

/// A named macro window. Serialize-only: the catalog is compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeMacro {
    /// Stable identifier, e.g. `"silver_bullet"`.
    pub id: &'static str,
    pub name: &'static str,
    pub window: TimeWindow,
    /// Parent session, for display grouping only.
    pub session: SessionId,
    pub category: MacroCategory,
    pub description: &'static str,
}

impl Windowed for TimeMacro {
    fn window(&self) -> TimeWindow {
        self.window
    }
}

/// The next macro on the clock plus the countdown to its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpcomingMacro {
    pub time_macro: TimeMacro,
    /// Whole minutes until the window opens; never negative, wraps past
    /// midnight to tomorrow's first entry.
    pub minutes_away: u32,
}

// ---------------------------------------------------------------------------
// Static macro table
// ---------------------------------------------------------------------------

/// The immutable macro catalog, in chronological order. The next-macro scan
/// relies on that ordering.
pub const TIME_MACROS: [TimeMacro; 8] = [
    TimeMacro {
        id: "london_preopen",
        name: "London Pre-Open",
        window: TimeWindow::new(2, 33, 3, 0),
        session: SessionId::London,
        category: MacroCategory::Manipulation,
        description: "Pre-London liquidity sweep",
    },
    TimeMacro {
        id: "london_open",
        name: "London Open",
        window: TimeWindow::new(4, 3, 4, 30),
        session: SessionId::London,
        category: MacroCategory::Expansion,
        description: "London open expansion",
    },
    TimeMacro {
        id: "ny_am",
        name: "NY AM Macro",
        window: TimeWindow::new(8, 50, 9, 10),
        session: SessionId::NyAm,
        category: MacroCategory::Manipulation,
        description: "Pre-market manipulation",
    },
    TimeMacro {
        id: "silver_bullet",
        name: "Silver Bullet",
        window: TimeWindow::new(9, 50, 10, 10),
        session: SessionId::NyAm,
        category: MacroCategory::Expansion,
        description: "ICT Silver Bullet setup window",
    },
    TimeMacro {
        id: "london_fix",
        name: "London Fix",
        window: TimeWindow::new(10, 50, 11, 10),
        session: SessionId::NyAm,
        category: MacroCategory::Expansion,
        description: "London fix settlement",
    },
    TimeMacro {
        id: "ny_am_close",
        name: "NY AM Close",
        window: TimeWindow::new(11, 50, 12, 10),
        session: SessionId::NyAm,
        category: MacroCategory::Accumulation,
        description: "AM session wind-down",
    },
    TimeMacro {
        id: "ny_lunch",
        name: "NY Lunch",
        window: TimeWindow::new(13, 10, 13, 40),
        session: SessionId::NyPm,
        category: MacroCategory::Accumulation,
        description: "Avoid - low volume chop",
    },
    TimeMacro {
        id: "ny_pm_close",
        name: "NY PM Close",
        window: TimeWindow::new(15, 15, 15, 45),
        session: SessionId::NyPm,
        category: MacroCategory::Expansion,
        description: "Final hour volatility",
    },
];

// ---------------------------------------------------------------------------
// MacroCatalog
// ---------------------------------------------------------------------------

/// The validated macro catalog and its tracker queries.
#[derive(Debug, Clone)]
pub struct MacroCatalog {
    macros: [TimeMacro; 8],
}

impl MacroCatalog {
    /// Builds and validates the catalog; fail fast on malformed windows.
    pub fn load() -> Result<Self, CatalogError> {
        let macros = TIME_MACROS;
        validate_windows(&macros)?;
        Ok(Self { macros })
    }

    pub fn macros(&self) -> &[TimeMacro] {
        &self.macros
    }

    /// The macro containing the instant, if one is active.
    pub fn current_macro(&self, instant: &CivilInstant) -> Option<&TimeMacro> {
        classify(&self.macros, instant.minute_of_day())
    }

    /// The first macro whose start is strictly after the instant, wrapping
    /// to tomorrow's first catalog entry when the day's list is exhausted.
    pub fn next_macro(&self, instant: &CivilInstant) -> Option<UpcomingMacro> {
        let now = instant.minute_of_day();

        for m in &self.macros {
            let start = m.window.start_minutes();
            if start > now {
                return Some(UpcomingMacro { time_macro: *m, minutes_away: start - now });
            }
        }

        // Wrap: tomorrow's first entry. now < 1440, so this never underflows.
        self.macros.first().map(|m| UpcomingMacro {
            time_macro: *m,
            minutes_away: MINUTES_PER_DAY - now + m.window.start_minutes(),
        })
    }

    /// Progress through the active macro, 0..=100; 0 when none is active.
    pub fn macro_progress(&self, instant: &CivilInstant) -> f64 {
        match self.current_macro(instant) {
            Some(m) => progress_percent(m.window, instant.minute_of_day()),
            None => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> CivilInstant {
        CivilInstant::from_parts(2024, 6, 5, hour, minute, 0).unwrap()
    }

    fn catalog() -> MacroCatalog {
        MacroCatalog::load().unwrap()
    }

    #[test]
    fn catalog_is_chronological_and_same_day() {
        let c = catalog();
        for pair in c.macros().windows(2) {
            assert!(!pair[0].window.wraps());
            assert!(pair[0].window.end_minutes() <= pair[1].window.start_minutes());
        }
    }

    #[test]
    fn current_macro_is_half_open() {
        let c = catalog();
        assert_eq!(c.current_macro(&at(9, 50)).map(|m| m.id), Some("silver_bullet"));
        assert_eq!(c.current_macro(&at(10, 9)).map(|m| m.id), Some("silver_bullet"));
        assert_eq!(c.current_macro(&at(10, 10)), None);
        assert_eq!(c.current_macro(&at(7, 0)), None);
    }

    #[test]
    fn next_macro_counts_down_within_the_day() {
        let c = catalog();
        let up = c.next_macro(&at(9, 40)).unwrap();
        assert_eq!(up.time_macro.id, "silver_bullet");
        assert_eq!(up.minutes_away, 10);
    }

    #[test]
    fn next_macro_skips_the_active_window() {
        // Inside silver_bullet, the next *start* strictly ahead is london_fix.
        let c = catalog();
        let up = c.next_macro(&at(10, 0)).unwrap();
        assert_eq!(up.time_macro.id, "london_fix");
        assert_eq!(up.minutes_away, 50);
    }

    #[test]
    fn next_macro_wraps_past_midnight() {
        let c = catalog();
        // 23:59 -> tomorrow's london_preopen at 02:33: 1 + 153 minutes.
        let up = c.next_macro(&at(23, 59)).unwrap();
        assert_eq!(up.time_macro.id, "london_preopen");
        assert_eq!(up.minutes_away, 154);

        // After the last start of the day (15:15) the scan also wraps.
        let up = c.next_macro(&at(16, 0)).unwrap();
        assert_eq!(up.time_macro.id, "london_preopen");
        assert_eq!(up.minutes_away, (24 - 16) * 60 + 2 * 60 + 33);
    }

    #[test]
    fn minutes_away_is_never_negative_across_the_day() {
        let c = catalog();
        for minute in 0..MINUTES_PER_DAY {
            let instant = at(minute / 60, minute % 60);
            let up = c.next_macro(&instant).unwrap();
            // u32 already rules out negatives; pin a sane upper bound too.
            assert!(up.minutes_away <= MINUTES_PER_DAY);
        }
    }

    #[test]
    fn macro_progress_is_zero_when_idle_and_clamped_inside() {
        let c = catalog();
        assert_eq!(c.macro_progress(&at(7, 0)), 0.0);
        assert_eq!(c.macro_progress(&at(9, 50)), 0.0);
        assert!((c.macro_progress(&at(10, 0)) - 50.0).abs() < 1e-9);
        assert!((c.macro_progress(&at(10, 9)) - 95.0).abs() < 1e-9);
    }
}
