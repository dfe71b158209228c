//! ta-sessions
//!
//! The session hierarchy: session → quarter (4 per session) → micro (4 per
//! quarter) → AMD phase, all classified from one minute-of-day. The
//! session-flow strategy catalog (display-only day scripts) lives in
//! `strategies`.
//!
//! Quarters are *generated* by evenly partitioning each session, not written
//! out by hand: the NY sessions are 150 minutes, so their quarters alternate
//! 37/38 minutes and their micros run 9.25–9.5 minutes. Micro arithmetic is
//! `f64` end to end for that reason.
//!
//! Pure deterministic logic. No IO, no wall-clock.

use serde::{Deserialize, Serialize};
use ta_schemas::{AmdPhase, CivilInstant, QuarterId, SessionId, TimeWindow, MINUTES_PER_DAY};
use ta_windows::{classify, progress_percent, validate_partition, validate_windows, CatalogError, Windowed};

mod strategies;

pub use strategies::{
    strategies_by_session_action, strategy_by_id, SessionStrategy, StrategyPhase,
    SESSION_STRATEGIES,
};

/// Display name used whenever no session contains the query instant.
pub const OFF_HOURS: &str = "Off Hours";

/// Micros per quarter; fixed alongside the 4-phase AMD table.
const MICROS_PER_QUARTER: u32 = 4;

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// A desk session: killzone window plus display color.
/// Serialize-only: the catalog is compiled in, never read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub window: TimeWindow,
    /// Hex color used by the presentation layer, e.g. `"#10B981"`.
    pub color: &'static str,
}

impl Windowed for Session {
    fn window(&self) -> TimeWindow {
        self.window
    }
}

/// One generated quarter of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionQuarter {
    pub session: SessionId,
    pub quarter: QuarterId,
    pub window: TimeWindow,
}

impl Windowed for SessionQuarter {
    fn window(&self) -> TimeWindow {
        self.window
    }
}

/// Position inside the micro subdivision of the current quarter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicroState {
    pub session: SessionId,
    pub quarter: QuarterId,
    /// Micro index 1..=4 within the quarter.
    pub micro: u32,
    /// Phase of the *micro* (index table, same table as quarters).
    pub phase: AmdPhase,
    /// Progress through the current micro, 0..=100.
    pub progress: f64,
}

// ---------------------------------------------------------------------------
// Static session table
// ---------------------------------------------------------------------------

/// The immutable desk session catalog, in chronological killzone order.
/// Asia wraps midnight; the contract is non-overlap (first match wins).
pub const SESSIONS: [Session; 4] = [
    Session { id: SessionId::Asia, window: TimeWindow::new(20, 0, 0, 0), color: "#8B5CF6" },
    Session { id: SessionId::London, window: TimeWindow::new(2, 0, 5, 0), color: "#3B82F6" },
    Session { id: SessionId::NyAm, window: TimeWindow::new(9, 30, 12, 0), color: "#10B981" },
    Session { id: SessionId::NyPm, window: TimeWindow::new(13, 30, 16, 0), color: "#EF4444" },
];

// ---------------------------------------------------------------------------
// SessionCatalog
// ---------------------------------------------------------------------------

/// Sessions plus their generated quarters, validated once at load.
#[derive(Debug, Clone)]
pub struct SessionCatalog {
    sessions: [Session; 4],
    quarters: Vec<SessionQuarter>,
}

impl SessionCatalog {
    /// Builds and validates the catalog. Fails fast on any data-contract
    /// violation rather than producing silently wrong percentages later.
    pub fn load() -> Result<Self, CatalogError> {
        let sessions = SESSIONS;
        validate_windows(&sessions)?;

        let mut quarters = Vec::with_capacity(sessions.len() * 4);
        for session in &sessions {
            let generated = generate_quarters(session);
            validate_partition(session.window, &generated)?;
            quarters.extend_from_slice(&generated);
        }

        Ok(Self { sessions, quarters })
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// All 16 generated quarters in declared session order, Q1..Q4 each.
    pub fn quarters(&self) -> &[SessionQuarter] {
        &self.quarters
    }

    pub fn session_by_id(&self, id: SessionId) -> &Session {
        // Catalog order is fixed by the SESSIONS table.
        let index = match id {
            SessionId::Asia => 0,
            SessionId::London => 1,
            SessionId::NyAm => 2,
            SessionId::NyPm => 3,
        };
        &self.sessions[index]
    }

    /// Which session contains the instant, if any.
    pub fn current_session(&self, instant: &CivilInstant) -> Option<&Session> {
        classify(&self.sessions, instant.minute_of_day())
    }

    /// Which quarter contains the instant, if any. Only meaningful inside a
    /// session; quarters tile sessions exactly, so the two always agree.
    pub fn current_quarter(&self, instant: &CivilInstant) -> Option<&SessionQuarter> {
        classify(&self.quarters, instant.minute_of_day())
    }

    /// Micro position within the current quarter.
    pub fn micro_state(&self, instant: &CivilInstant) -> Option<MicroState> {
        let sq = self.current_quarter(instant)?;
        let quarter_duration = sq.window.duration_minutes() as f64;
        let micro_duration = quarter_duration / MICROS_PER_QUARTER as f64;
        let elapsed = sq.window.elapsed_minutes(instant.minute_of_day()) as f64;

        let micro = ((elapsed / micro_duration) as u32 + 1).clamp(1, MICROS_PER_QUARTER);
        let micro_start = (micro - 1) as f64 * micro_duration;
        let progress = ((elapsed - micro_start) / micro_duration * 100.0).clamp(0.0, 100.0);

        Some(MicroState {
            session: sq.session,
            quarter: sq.quarter,
            micro,
            phase: AmdPhase::for_index(micro),
            progress,
        })
    }

    /// Elapsed-over-duration of the whole containing session, 0..=100.
    /// 0 when off-hours.
    pub fn session_progress(&self, instant: &CivilInstant) -> f64 {
        match self.current_session(instant) {
            Some(session) => progress_percent(session.window, instant.minute_of_day()),
            None => 0.0,
        }
    }

    /// Quarter-level AMD phase; `X` when off-hours.
    pub fn current_amd_phase(&self, instant: &CivilInstant) -> AmdPhase {
        match self.current_quarter(instant) {
            Some(sq) => AmdPhase::for_quarter(sq.quarter),
            None => AmdPhase::X,
        }
    }

    /// Display name of the current session, or [`OFF_HOURS`].
    pub fn session_name(&self, instant: &CivilInstant) -> &'static str {
        match self.current_session(instant) {
            Some(session) => session.id.display_name(),
            None => OFF_HOURS,
        }
    }
}

// ---------------------------------------------------------------------------
// Quarter generation
// ---------------------------------------------------------------------------

/// Evenly partitions a session into Q1..Q4 in wrapped minute space.
///
/// Boundary `i` sits at `start + floor(i * duration / 4)`; floor keeps the
/// boundaries on whole minutes while the durations still sum exactly (e.g.
/// a 150-minute NY session splits 37/38/37/38).
fn generate_quarters(session: &Session) -> [SessionQuarter; 4] {
    let start = session.window.start_minutes();
    let duration = session.window.duration_minutes();

    let boundary = |i: u32| -> u32 { (start + i * duration / 4) % MINUTES_PER_DAY };

    let mut out = [SessionQuarter {
        session: session.id,
        quarter: QuarterId::Q1,
        window: session.window,
    }; 4];

    for (slot, quarter) in out.iter_mut().zip(QuarterId::ALL) {
        let i = quarter.index();
        let (s, e) = (boundary(i - 1), boundary(i));
        slot.quarter = quarter;
        slot.window = TimeWindow::new(s / 60, s % 60, e / 60, e % 60);
    }
    out
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

    fn catalog() -> SessionCatalog {
        SessionCatalog::load().unwrap()
    }

    #[test]
    fn generated_quarters_match_the_canonical_desk_table() {
        let c = catalog();
        let expect = [
            // Asia 20:00 -> 00:00, even hours.
            ("asia", "Q1", (20, 0), (21, 0)),
            ("asia", "Q2", (21, 0), (22, 0)),
            ("asia", "Q3", (22, 0), (23, 0)),
            ("asia", "Q4", (23, 0), (0, 0)),
            // London 02:00 -> 05:00, 45-minute quarters.
            ("london", "Q1", (2, 0), (2, 45)),
            ("london", "Q2", (2, 45), (3, 30)),
            ("london", "Q3", (3, 30), (4, 15)),
            ("london", "Q4", (4, 15), (5, 0)),
            // NY AM 09:30 -> 12:00, 37/38 alternation.
            ("ny_am", "Q1", (9, 30), (10, 7)),
            ("ny_am", "Q2", (10, 7), (10, 45)),
            ("ny_am", "Q3", (10, 45), (11, 22)),
            ("ny_am", "Q4", (11, 22), (12, 0)),
            // NY PM 13:30 -> 16:00.
            ("ny_pm", "Q1", (13, 30), (14, 7)),
            ("ny_pm", "Q2", (14, 7), (14, 45)),
            ("ny_pm", "Q3", (14, 45), (15, 22)),
            ("ny_pm", "Q4", (15, 22), (16, 0)),
        ];

        assert_eq!(c.quarters().len(), expect.len());
        for (sq, (sid, qid, (sh, sm), (eh, em))) in c.quarters().iter().zip(expect) {
            assert_eq!(sq.session.as_str(), sid);
            assert_eq!(sq.quarter.as_str(), qid);
            assert_eq!(sq.window, TimeWindow::new(sh, sm, eh, em), "{sid} {qid}");
        }
    }

    #[test]
    fn quarter_durations_tile_every_session() {
        let c = catalog();
        for session in c.sessions() {
            let total: u32 = c
                .quarters()
                .iter()
                .filter(|q| q.session == session.id)
                .map(|q| q.window.duration_minutes())
                .sum();
            assert_eq!(total, session.window.duration_minutes(), "{:?}", session.id);
        }
    }

    #[test]
    fn session_classification_is_half_open() {
        let c = catalog();
        assert_eq!(c.current_session(&at(9, 30)).map(|s| s.id), Some(SessionId::NyAm));
        assert_eq!(c.current_session(&at(11, 59)).map(|s| s.id), Some(SessionId::NyAm));
        assert_eq!(c.current_session(&at(12, 0)), None);
        assert_eq!(c.session_name(&at(12, 30)), OFF_HOURS);
    }

    #[test]
    fn asia_wraps_midnight() {
        let c = catalog();
        assert_eq!(c.current_session(&at(23, 59)).map(|s| s.id), Some(SessionId::Asia));
        assert_eq!(c.current_session(&at(0, 0)), None);
        assert_eq!(c.current_quarter(&at(23, 30)).map(|q| q.quarter), Some(QuarterId::Q4));
    }

    #[test]
    fn worked_ny_am_q3_micro_scenario() {
        // Q3 spans 10:45-11:22 (37 min); at 10:50 elapsed is 5 of a
        // 9.25-minute micro 1 => accumulation at ~54.1%.
        let c = catalog();
        let state = c.micro_state(&at(10, 50)).unwrap();
        assert_eq!(state.session, SessionId::NyAm);
        assert_eq!(state.quarter, QuarterId::Q3);
        assert_eq!(state.micro, 1);
        assert_eq!(state.phase, AmdPhase::Accumulation);
        assert!((state.progress - 54.054).abs() < 0.01, "progress {}", state.progress);
    }

    #[test]
    fn micro_progress_is_monotone_then_resets() {
        let c = catalog();
        // Micro 1 of NY AM Q3 runs 10:45.0 - 10:54.25.
        let p1 = c.micro_state(&at(10, 46)).unwrap();
        let p2 = c.micro_state(&at(10, 50)).unwrap();
        let p3 = c.micro_state(&at(10, 54)).unwrap();
        assert_eq!((p1.micro, p2.micro, p3.micro), (1, 1, 1));
        assert!(p1.progress < p2.progress && p2.progress < p3.progress);

        // Next whole minute lands in micro 2 near its start.
        let p4 = c.micro_state(&at(10, 55)).unwrap();
        assert_eq!(p4.micro, 2);
        assert_eq!(p4.phase, AmdPhase::Manipulation);
        assert!(p4.progress < p3.progress);
        assert!(p4.progress < 15.0);
    }

    #[test]
    fn micro_index_clamps_at_four() {
        let c = catalog();
        // Final minute of NY AM Q4.
        let state = c.micro_state(&at(11, 59)).unwrap();
        assert_eq!(state.quarter, QuarterId::Q4);
        assert_eq!(state.micro, 4);
        assert_eq!(state.phase, AmdPhase::X);
    }

    #[test]
    fn micro_state_in_wrapped_asia_quarter() {
        let c = catalog();
        let state = c.micro_state(&at(23, 50)).unwrap();
        assert_eq!(state.session, SessionId::Asia);
        assert_eq!(state.quarter, QuarterId::Q4);
        assert_eq!(state.micro, 4);
        // 5 minutes into a 15-minute micro.
        assert!((state.progress - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn session_progress_measures_the_whole_session() {
        let c = catalog();
        // 10:45 is 75 of 150 minutes into NY AM, regardless of quarter.
        assert!((c.session_progress(&at(10, 45)) - 50.0).abs() < 1e-9);
        assert_eq!(c.session_progress(&at(12, 30)), 0.0);
    }

    #[test]
    fn amd_phase_follows_the_quarter_and_defaults_off_hours() {
        let c = catalog();
        assert_eq!(c.current_amd_phase(&at(9, 45)), AmdPhase::Accumulation); // Q1
        assert_eq!(c.current_amd_phase(&at(10, 50)), AmdPhase::Distribution); // Q3
        assert_eq!(c.current_amd_phase(&at(12, 30)), AmdPhase::X);
    }
}
