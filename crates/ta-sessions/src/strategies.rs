//! Session-flow strategy catalog.
//!
//! Narrative day scripts across the coarse Asia → London → NY axis: what
//! each leg is expected to do and where the entry lives. Static data plus
//! two lookup queries, no classification — the hierarchy in `lib.rs` does
//! not consume these.

use serde::Serialize;
use ta_schemas::{FlowSession, SessionAction};

/// One leg of a session-flow strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrategyPhase {
    pub session: FlowSession,
    pub action: SessionAction,
}

/// A three-leg day script. Serialize-only: the catalog is compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStrategy {
    /// Stable identifier, e.g. `"asia_range_london_manip_ny_reversal"`.
    pub id: &'static str,
    pub name: &'static str,
    pub phases: [StrategyPhase; 3],
    pub entry_guidance: &'static str,
}

const fn leg(session: FlowSession, action: SessionAction) -> StrategyPhase {
    StrategyPhase { session, action }
}

/// The immutable strategy catalog.
pub const SESSION_STRATEGIES: [SessionStrategy; 4] = [
    SessionStrategy {
        id: "asia_range_london_manip_ny_reversal",
        name: "Asia Range → London Manipulation → NY Reversal",
        phases: [
            leg(FlowSession::Asia, SessionAction::Range),
            leg(FlowSession::London, SessionAction::Manipulation),
            leg(FlowSession::Ny, SessionAction::Reversal),
        ],
        entry_guidance: "Wait for NY open after London fake-out. Look for displacement opposite to London direction.",
    },
    SessionStrategy {
        id: "asia_expansion_london_consol_ny_continuation",
        name: "Asia Expansion → London Consolidation → NY Continuation",
        phases: [
            leg(FlowSession::Asia, SessionAction::Expansion),
            leg(FlowSession::London, SessionAction::Consolidation),
            leg(FlowSession::Ny, SessionAction::Expansion),
        ],
        entry_guidance: "Enter NY continuation aligned with Asia direction. Look for London range break.",
    },
    SessionStrategy {
        id: "asia_range_london_expansion_ny_consolidation",
        name: "Asia Range → London Expansion → NY Consolidation",
        phases: [
            leg(FlowSession::Asia, SessionAction::Range),
            leg(FlowSession::London, SessionAction::Expansion),
            leg(FlowSession::Ny, SessionAction::Consolidation),
        ],
        entry_guidance: "Trade London breakout of Asia range. NY may continue or reverse late session.",
    },
    SessionStrategy {
        id: "asia_manip_london_reversal_ny_expansion",
        name: "Asia Manipulation → London Reversal → NY Expansion",
        phases: [
            leg(FlowSession::Asia, SessionAction::Manipulation),
            leg(FlowSession::London, SessionAction::Reversal),
            leg(FlowSession::Ny, SessionAction::Expansion),
        ],
        entry_guidance: "Asia creates false move. London reverses. NY provides main distribution leg.",
    },
];

/// Catalog entry for a stable id, or `None`.
pub fn strategy_by_id(id: &str) -> Option<&'static SessionStrategy> {
    SESSION_STRATEGIES.iter().find(|s| s.id == id)
}

/// All strategies whose script has `session` doing `action` in some leg.
pub fn strategies_by_session_action(
    session: FlowSession,
    action: SessionAction,
) -> Vec<&'static SessionStrategy> {
    SESSION_STRATEGIES
        .iter()
        .filter(|s| s.phases.iter().any(|p| p.session == session && p.action == action))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique_and_resolvable() {
        for s in &SESSION_STRATEGIES {
            assert_eq!(strategy_by_id(s.id).map(|found| found.id), Some(s.id));
        }
        let mut ids: Vec<_> = SESSION_STRATEGIES.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SESSION_STRATEGIES.len());
        assert_eq!(strategy_by_id("no_such_strategy"), None);
    }

    #[test]
    fn every_strategy_runs_asia_then_london_then_ny() {
        for s in &SESSION_STRATEGIES {
            let legs: Vec<_> = s.phases.iter().map(|p| p.session).collect();
            assert_eq!(legs, [FlowSession::Asia, FlowSession::London, FlowSession::Ny], "{}", s.id);
        }
    }

    #[test]
    fn session_action_query_filters_by_leg() {
        let manip_london =
            strategies_by_session_action(FlowSession::London, SessionAction::Manipulation);
        assert_eq!(manip_london.len(), 1);
        assert_eq!(manip_london[0].id, "asia_range_london_manip_ny_reversal");

        // Two scripts end with an NY expansion leg.
        let ny_expansion = strategies_by_session_action(FlowSession::Ny, SessionAction::Expansion);
        assert_eq!(ny_expansion.len(), 2);

        assert!(strategies_by_session_action(FlowSession::Asia, SessionAction::Reversal).is_empty());
    }
}
