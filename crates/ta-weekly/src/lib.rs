//! ta-weekly
//!
//! Weekly behavioral templates and their per-week selection.
//!
//! The catalog side (default 5-day profile, 14 named templates, category
//! metadata) is static, pure data. The selection side is the engine's single
//! write path: one row per calendar week in an external key-value store,
//! keyed by the ISO date of that week's Monday, last-write-wins.
//!
//! Stored ids that no longer parse degrade silently to the default profile —
//! a stale row must never break the dashboard.

mod resolver;
mod store;
mod templates;

pub use resolver::{
    current_weekday, load_selection, resolve_profile, save_selection, week_start_key,
};
pub use store::{MemoryTemplateStore, StoreError, WeekTemplateStore};
pub use templates::{
    category_info, template, templates_by_bias, templates_by_category, CategoryInfo,
    WeekdayProfile, WeeklyTemplate, DEFAULT_WEEKLY_PROFILES, WEEKLY_TEMPLATES,
};
