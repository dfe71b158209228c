//! The weekly template catalog.
//!
//! Immutable data: the default 5-day profile, 14 named templates (exactly 5
//! weekday profiles each), and the category display metadata. Loaded into
//! the binary as consts, never mutated.

use serde::Serialize;
use ta_schemas::{
    AmdPhase, ExpectedAction, TemplateBias, TemplateCategory, Weekday, WeeklyTemplateId,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What one weekday is expected to do under a given template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayProfile {
    pub day: Weekday,
    pub expected_action: ExpectedAction,
    pub description: &'static str,
    pub amd_phase: AmdPhase,
}

/// A named 5-day behavioral script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyTemplate {
    pub id: WeeklyTemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub use_case: &'static str,
    pub category: TemplateCategory,
    pub bias: TemplateBias,
    /// Exactly one profile per weekday, Monday..Friday in order.
    pub profiles: [WeekdayProfile; 5],
}

/// Display metadata for a template category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub label: &'static str,
    pub description: &'static str,
}

const fn profile(
    day: Weekday,
    expected_action: ExpectedAction,
    description: &'static str,
    amd_phase: AmdPhase,
) -> WeekdayProfile {
    WeekdayProfile { day, expected_action, description, amd_phase }
}

// ---------------------------------------------------------------------------
// Default 5-day profile
// ---------------------------------------------------------------------------

/// The built-in weekly profile used whenever no template is selected.
pub const DEFAULT_WEEKLY_PROFILES: [WeekdayProfile; 5] = [
    profile(
        Weekday::Monday,
        ExpectedAction::Range,
        "Accumulation day. Range-bound, sets weekly bias. Look for Sunday gap fill.",
        AmdPhase::Accumulation,
    ),
    profile(
        Weekday::Tuesday,
        ExpectedAction::ReversalDown,
        "Judas day. Expect false move opposite to weekly direction. Classic manipulation.",
        AmdPhase::Manipulation,
    ),
    profile(
        Weekday::Wednesday,
        ExpectedAction::ExpansionUp,
        "Expansion day. True weekly direction reveals. Strongest trending day.",
        AmdPhase::Distribution,
    ),
    profile(
        Weekday::Thursday,
        ExpectedAction::ExpansionUp,
        "Continuation or reversal. May continue Wed move or start reversal.",
        AmdPhase::Distribution,
    ),
    profile(
        Weekday::Friday,
        ExpectedAction::ReversalUp,
        "Profit-taking day. Weekly high/low often made. Reduced size recommended.",
        AmdPhase::X,
    ),
];

// ---------------------------------------------------------------------------
// Template catalog
// ---------------------------------------------------------------------------

/// All 14 templates, grouped by family as the selector screen lists them.
pub const WEEKLY_TEMPLATES: [WeeklyTemplate; 14] = [
    WeeklyTemplate {
        id: WeeklyTemplateId::ClassicTuesdayLow,
        name: "Classic Tuesday Low",
        description: "Tuesday forms the weekly low, bullish expansion follows",
        use_case: "Bullish weeks where Tuesday manipulation creates the low of week",
        category: TemplateCategory::Classic,
        bias: TemplateBias::Bullish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Accumulation, sets weekly range", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::ReversalUp, "Judas swing down, forms weekly low", AmdPhase::Manipulation),
            profile(Weekday::Wednesday, ExpectedAction::ExpansionUp, "True move up begins", AmdPhase::Distribution),
            profile(Weekday::Thursday, ExpectedAction::ExpansionUp, "Continuation higher", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::Range, "Consolidation, reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::ClassicTuesdayHigh,
        name: "Classic Tuesday High",
        description: "Tuesday forms the weekly high, bearish expansion follows",
        use_case: "Bearish weeks where Tuesday manipulation creates the high of week",
        category: TemplateCategory::Classic,
        bias: TemplateBias::Bearish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Accumulation, sets weekly range", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::ReversalDown, "Judas swing up, forms weekly high", AmdPhase::Manipulation),
            profile(Weekday::Wednesday, ExpectedAction::ExpansionDown, "True move down begins", AmdPhase::Distribution),
            profile(Weekday::Thursday, ExpectedAction::ExpansionDown, "Continuation lower", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::Range, "Consolidation, reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::WednesdayLow,
        name: "Wednesday Low",
        description: "Delayed manipulation, Wednesday forms weekly low",
        use_case: "Mon-Tue accumulation, Wed manipulation creates low, Thu-Fri rally",
        category: TemplateCategory::Wednesday,
        bias: TemplateBias::Bullish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Accumulation begins", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Accumulation continues", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::ReversalUp, "Manipulation down then reversal", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::ExpansionUp, "Distribution begins", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::ExpansionUp, "Distribution continues", AmdPhase::Distribution),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::WednesdayHigh,
        name: "Wednesday High",
        description: "Delayed manipulation, Wednesday forms weekly high",
        use_case: "Mon-Tue accumulation, Wed manipulation creates high, Thu-Fri decline",
        category: TemplateCategory::Wednesday,
        bias: TemplateBias::Bearish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Accumulation begins", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Accumulation continues", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::ReversalDown, "Manipulation up then reversal", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::ExpansionDown, "Distribution begins", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::ExpansionDown, "Distribution continues", AmdPhase::Distribution),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::WednesdayReversalBull,
        name: "Wednesday Reversal Bull",
        description: "Wed intraday reversal from manipulation to distribution",
        use_case: "Wed provides manipulation then same-day reversal, bullish expansion",
        category: TemplateCategory::Wednesday,
        bias: TemplateBias::Bullish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Accumulation begins", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Accumulation continues", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::SeekDestroy, "Manipulation then distribution up", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::ExpansionUp, "Distribution continues", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::Range, "Profit-taking, reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::WednesdayReversalBear,
        name: "Wednesday Reversal Bear",
        description: "Wed intraday reversal from manipulation to distribution",
        use_case: "Wed provides manipulation then same-day reversal, bearish expansion",
        category: TemplateCategory::Wednesday,
        bias: TemplateBias::Bearish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Accumulation begins", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Accumulation continues", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::SeekDestroy, "Manipulation then distribution down", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::ExpansionDown, "Distribution continues", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::Range, "Profit-taking, reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::ConsolidationThursdayBull,
        name: "Consolidation Thursday Bull",
        description: "Extended Mon-Wed range, Thursday breakout bullish",
        use_case: "Compressed weeks with late breakout on Thursday, bullish",
        category: TemplateCategory::Consolidation,
        bias: TemplateBias::Bullish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Range building", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Range continues", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::Range, "Final accumulation", AmdPhase::Accumulation),
            profile(Weekday::Thursday, ExpectedAction::SeekDestroy, "Manipulation then breakout up", AmdPhase::Manipulation),
            profile(Weekday::Friday, ExpectedAction::Range, "Reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::ConsolidationThursdayBear,
        name: "Consolidation Thursday Bear",
        description: "Extended Mon-Wed range, Thursday breakout bearish",
        use_case: "Compressed weeks with late breakout on Thursday, bearish",
        category: TemplateCategory::Consolidation,
        bias: TemplateBias::Bearish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Range building", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Range continues", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::Range, "Final accumulation", AmdPhase::Accumulation),
            profile(Weekday::Thursday, ExpectedAction::SeekDestroy, "Manipulation then breakout down", AmdPhase::Manipulation),
            profile(Weekday::Friday, ExpectedAction::Range, "Reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::SeekDestroyFridayBull,
        name: "Seek & Destroy Friday Bull",
        description: "Choppy week with extended manipulation, Friday bullish resolution",
        use_case: "High manipulation weeks, avoid early entries, Friday rally",
        category: TemplateCategory::SeekDestroy,
        bias: TemplateBias::Bullish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Initial range set", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::SeekDestroy, "Both sides hunted", AmdPhase::Manipulation),
            profile(Weekday::Wednesday, ExpectedAction::SeekDestroy, "Continued manipulation", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::SeekDestroy, "More stop hunts", AmdPhase::Manipulation),
            profile(Weekday::Friday, ExpectedAction::ExpansionUp, "Finally resolves bullish", AmdPhase::Distribution),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::SeekDestroyFridayBear,
        name: "Seek & Destroy Friday Bear",
        description: "Choppy week with extended manipulation, Friday bearish resolution",
        use_case: "High manipulation weeks, avoid early entries, Friday decline",
        category: TemplateCategory::SeekDestroy,
        bias: TemplateBias::Bearish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::Range, "Initial range set", AmdPhase::Accumulation),
            profile(Weekday::Tuesday, ExpectedAction::SeekDestroy, "Both sides hunted", AmdPhase::Manipulation),
            profile(Weekday::Wednesday, ExpectedAction::SeekDestroy, "Continued manipulation", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::SeekDestroy, "More stop hunts", AmdPhase::Manipulation),
            profile(Weekday::Friday, ExpectedAction::ExpansionDown, "Finally resolves bearish", AmdPhase::Distribution),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::MondayExpansionBull,
        name: "Monday Expansion Bull",
        description: "Strong Monday sets bullish tone, week follows through",
        use_case: "Gap up Monday with continuation, early week strength",
        category: TemplateCategory::MondayExpansion,
        bias: TemplateBias::Bullish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::ExpansionUp, "Strong bullish expansion sets tone", AmdPhase::Distribution),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Consolidation after Monday move", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::ExpansionUp, "Continuation higher", AmdPhase::Distribution),
            profile(Weekday::Thursday, ExpectedAction::Range, "Profit-taking, consolidation", AmdPhase::X),
            profile(Weekday::Friday, ExpectedAction::Range, "Reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::MondayExpansionBear,
        name: "Monday Expansion Bear",
        description: "Strong Monday sets bearish tone, week follows through",
        use_case: "Gap down Monday with continuation, early week weakness",
        category: TemplateCategory::MondayExpansion,
        bias: TemplateBias::Bearish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::ExpansionDown, "Strong bearish expansion sets tone", AmdPhase::Distribution),
            profile(Weekday::Tuesday, ExpectedAction::Range, "Consolidation after Monday move", AmdPhase::Accumulation),
            profile(Weekday::Wednesday, ExpectedAction::ExpansionDown, "Continuation lower", AmdPhase::Distribution),
            profile(Weekday::Thursday, ExpectedAction::Range, "Profit-taking, consolidation", AmdPhase::X),
            profile(Weekday::Friday, ExpectedAction::Range, "Reduced activity", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::MondayGapContinuationBull,
        name: "Monday Gap Continuation Bull",
        description: "Sunday gap up holds, Monday confirms bullish week",
        use_case: "Weekend gap up with no fill, immediate bullish expansion",
        category: TemplateCategory::MondayExpansion,
        bias: TemplateBias::Bullish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::ExpansionUp, "Gap holds, expansion continues", AmdPhase::Distribution),
            profile(Weekday::Tuesday, ExpectedAction::ExpansionUp, "Strong follow-through", AmdPhase::Distribution),
            profile(Weekday::Wednesday, ExpectedAction::ReversalDown, "Midweek pullback", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::ExpansionUp, "Resumption of trend", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::Range, "Weekly high area", AmdPhase::X),
        ],
    },
    WeeklyTemplate {
        id: WeeklyTemplateId::MondayGapContinuationBear,
        name: "Monday Gap Continuation Bear",
        description: "Sunday gap down holds, Monday confirms bearish week",
        use_case: "Weekend gap down with no fill, immediate bearish expansion",
        category: TemplateCategory::MondayExpansion,
        bias: TemplateBias::Bearish,
        profiles: [
            profile(Weekday::Monday, ExpectedAction::ExpansionDown, "Gap holds, expansion continues", AmdPhase::Distribution),
            profile(Weekday::Tuesday, ExpectedAction::ExpansionDown, "Strong follow-through", AmdPhase::Distribution),
            profile(Weekday::Wednesday, ExpectedAction::ReversalUp, "Midweek pullback", AmdPhase::Manipulation),
            profile(Weekday::Thursday, ExpectedAction::ExpansionDown, "Resumption of trend", AmdPhase::Distribution),
            profile(Weekday::Friday, ExpectedAction::Range, "Weekly low area", AmdPhase::X),
        ],
    },
];

// ---------------------------------------------------------------------------
// Catalog queries
// ---------------------------------------------------------------------------

/// The catalog entry for a template id. Total: the id enum and the catalog
/// are maintained together (pinned by a test).
pub fn template(id: WeeklyTemplateId) -> &'static WeeklyTemplate {
    let index = WeeklyTemplateId::ALL
        .iter()
        .position(|t| *t == id)
        .unwrap_or(0);
    &WEEKLY_TEMPLATES[index]
}

/// Templates in a category, catalog order.
pub fn templates_by_category(category: TemplateCategory) -> Vec<&'static WeeklyTemplate> {
    WEEKLY_TEMPLATES.iter().filter(|t| t.category == category).collect()
}

/// Templates matching a directional bias, catalog order.
pub fn templates_by_bias(bias: TemplateBias) -> Vec<&'static WeeklyTemplate> {
    WEEKLY_TEMPLATES.iter().filter(|t| t.bias == bias).collect()
}

/// Selector-screen grouping metadata.
pub fn category_info(category: TemplateCategory) -> CategoryInfo {
    match category {
        TemplateCategory::MondayExpansion => CategoryInfo {
            label: "Monday Exp",
            description: "Monday expansion patterns",
        },
        TemplateCategory::Classic => CategoryInfo {
            label: "Classic",
            description: "Tuesday reversal patterns",
        },
        TemplateCategory::Wednesday => CategoryInfo {
            label: "Wednesday",
            description: "Delayed Wednesday patterns",
        },
        TemplateCategory::Consolidation => CategoryInfo {
            label: "Consolidation",
            description: "Extended range patterns",
        },
        TemplateCategory::SeekDestroy => CategoryInfo {
            label: "Seek & Destroy",
            description: "High manipulation patterns",
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_the_id_enum() {
        // `template()` indexes the catalog through WeeklyTemplateId::ALL.
        assert_eq!(WEEKLY_TEMPLATES.len(), WeeklyTemplateId::ALL.len());
        for (entry, id) in WEEKLY_TEMPLATES.iter().zip(WeeklyTemplateId::ALL) {
            assert_eq!(entry.id, id);
            assert_eq!(template(id).id, id);
        }
    }

    #[test]
    fn every_template_covers_monday_through_friday_in_order() {
        for t in &WEEKLY_TEMPLATES {
            for (p, day) in t.profiles.iter().zip(Weekday::ALL) {
                assert_eq!(p.day, day, "{}", t.name);
            }
        }
        for (p, day) in DEFAULT_WEEKLY_PROFILES.iter().zip(Weekday::ALL) {
            assert_eq!(p.day, day);
        }
    }

    #[test]
    fn category_and_bias_queries_partition_the_catalog() {
        let by_category: usize = TemplateCategory::ALL
            .iter()
            .map(|c| templates_by_category(*c).len())
            .sum();
        assert_eq!(by_category, WEEKLY_TEMPLATES.len());

        let bulls = templates_by_bias(TemplateBias::Bullish).len();
        let bears = templates_by_bias(TemplateBias::Bearish).len();
        assert_eq!(bulls + bears, WEEKLY_TEMPLATES.len());
        assert_eq!(bulls, bears);
    }
}
