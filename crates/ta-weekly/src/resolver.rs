//! Weekday and template resolution.
//!
//! `current_weekday` folds weekend instants to Monday. That is the original
//! desk behavior, kept deliberately: the dashboard shows Monday's script
//! while the week is still closed rather than erroring on a Sunday glance.

use chrono::{Datelike, Days, NaiveDate};
use ta_schemas::{CivilInstant, Weekday, WeeklyTemplateId};

use crate::store::{StoreError, WeekTemplateStore};
use crate::templates::{template, WeekdayProfile, DEFAULT_WEEKLY_PROFILES};

// ---------------------------------------------------------------------------
// Weekday resolution
// ---------------------------------------------------------------------------

/// Trading weekday of the instant; Saturday and Sunday fold to Monday.
pub fn current_weekday(instant: &CivilInstant) -> Weekday {
    match instant.date().weekday() {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat | chrono::Weekday::Sun => Weekday::Monday,
    }
}

/// The weekday profile under a template, or under the default 5-day profile
/// when no template is given.
pub fn resolve_profile(
    day: Weekday,
    template_id: Option<WeeklyTemplateId>,
) -> &'static WeekdayProfile {
    let profiles = match template_id {
        Some(id) => &template(id).profiles,
        None => &DEFAULT_WEEKLY_PROFILES,
    };
    // Profiles are Monday..Friday in order; index by weekday position.
    let index = Weekday::ALL.iter().position(|d| *d == day).unwrap_or(0);
    &profiles[index]
}

// ---------------------------------------------------------------------------
// Week-start key
// ---------------------------------------------------------------------------

/// ISO date (`YYYY-MM-DD`) of the Monday beginning the date's week; the
/// persistence key for selections. A Sunday keys to the *previous* Monday.
pub fn week_start_key(date: NaiveDate) -> String {
    let back = date.weekday().num_days_from_monday() as u64;
    let monday = date.checked_sub_days(Days::new(back)).unwrap_or(date);
    monday.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Selection load/save
// ---------------------------------------------------------------------------

/// Reads the selection for the week containing `date`.
///
/// A missing row or an id that no longer parses both resolve to `None`
/// (default profile); only a backend failure is an error.
pub async fn load_selection(
    store: &dyn WeekTemplateStore,
    date: NaiveDate,
) -> Result<Option<WeeklyTemplateId>, StoreError> {
    let stored = store.get(&week_start_key(date)).await?;
    Ok(stored.and_then(|raw| WeeklyTemplateId::parse(&raw)))
}

/// Upserts the selection for the week containing `date`.
pub async fn save_selection(
    store: &dyn WeekTemplateStore,
    date: NaiveDate,
    template_id: WeeklyTemplateId,
) -> Result<(), StoreError> {
    store.put(&week_start_key(date), template_id.as_str()).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
