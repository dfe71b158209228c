//! ta-clock
//!
//! Canonical Clock: converts a real UTC instant into civil fields in the
//! fixed desk reference zone (`America/New_York`), using full tz-database
//! rules so daylight-saving transitions shift the civil hour correctly.
//!
//! Every other crate in the workspace is parameterized on the resulting
//! [`CivilInstant`]; this is the only place wall-clock time is read.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;
use ta_schemas::CivilInstant;

/// Canonical tz-database name of the desk reference zone.
pub const REFERENCE_ZONE: &str = "America/New_York";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Clock construction failures. Timezone resolution is load-bearing for every
/// downstream computation, so callers must treat this as fatal — never guess
/// a fixed offset instead.
#[derive(Debug)]
pub enum ClockError {
    /// The requested zone name is not in the bundled tz database.
    UnknownZone(String),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::UnknownZone(name) => {
                write!(f, "unknown timezone {name:?}: cannot resolve tz-database rules")
            }
        }
    }
}

impl std::error::Error for ClockError {}

// ---------------------------------------------------------------------------
// DeskClock
// ---------------------------------------------------------------------------

/// The desk clock: a reference zone plus the conversion into civil fields.
///
/// [`DeskClock::civil`] is the deterministic entry point; [`DeskClock::now`]
/// is the only wall-clock read in the workspace.
#[derive(Debug, Clone, Copy)]
pub struct DeskClock {
    zone: Tz,
}

impl DeskClock {
    /// The canonical desk clock in [`REFERENCE_ZONE`].
    pub fn new_york() -> Self {
        Self { zone: chrono_tz::America::New_York }
    }

    /// Builds a clock for an arbitrary tz-database zone name.
    ///
    /// Fails with [`ClockError::UnknownZone`] when the name does not resolve;
    /// propagate, do not fall back to an offset.
    pub fn from_zone_name(name: &str) -> Result<Self, ClockError> {
        let zone: Tz = name.parse().map_err(|_| ClockError::UnknownZone(name.to_string()))?;
        Ok(Self { zone })
    }

    pub fn zone_name(&self) -> &'static str {
        self.zone.name()
    }

    /// Civil fields for the current wall-clock instant.
    pub fn now(&self) -> CivilInstant {
        self.civil(Utc::now())
    }

    /// Civil fields for an explicit UTC instant. Honors DST: the same UTC
    /// hour lands on different civil hours either side of a transition.
    pub fn civil(&self, instant: DateTime<Utc>) -> CivilInstant {
        let local = instant.with_timezone(&self.zone);
        CivilInstant {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn winter_offset_is_minus_five() {
        // 2024-01-10 14:30Z = 09:30 EST.
        let c = DeskClock::new_york().civil(utc(2024, 1, 10, 14, 30));
        assert_eq!((c.hour, c.minute), (9, 30));
        assert_eq!((c.year, c.month, c.day), (2024, 1, 10));
    }

    #[test]
    fn summer_offset_is_minus_four() {
        // 2024-07-10 14:30Z = 10:30 EDT.
        let c = DeskClock::new_york().civil(utc(2024, 7, 10, 14, 30));
        assert_eq!((c.hour, c.minute), (10, 30));
    }

    #[test]
    fn spring_forward_skips_the_two_oclock_hour() {
        // US DST 2024 began 2024-03-10 02:00 EST -> 03:00 EDT.
        let before = DeskClock::new_york().civil(utc(2024, 3, 10, 6, 59));
        let after = DeskClock::new_york().civil(utc(2024, 3, 10, 7, 0));
        assert_eq!((before.hour, before.minute), (1, 59));
        assert_eq!((after.hour, after.minute), (3, 0));
    }

    #[test]
    fn fall_back_repeats_the_one_oclock_hour() {
        // US DST 2024 ended 2024-11-03 02:00 EDT -> 01:00 EST.
        let first = DeskClock::new_york().civil(utc(2024, 11, 3, 5, 30));
        let second = DeskClock::new_york().civil(utc(2024, 11, 3, 6, 30));
        assert_eq!((first.hour, first.minute), (1, 30));
        assert_eq!((second.hour, second.minute), (1, 30));
    }

    #[test]
    fn civil_date_rolls_at_local_midnight_not_utc() {
        // 2024-06-04 03:59Z is still 2024-06-03 23:59 in New York.
        let c = DeskClock::new_york().civil(utc(2024, 6, 4, 3, 59));
        assert_eq!((c.year, c.month, c.day), (2024, 6, 3));
        assert_eq!(c.minute_of_day(), 1439);
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let err = DeskClock::from_zone_name("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, ClockError::UnknownZone(_)));
    }

    #[test]
    fn named_zone_matches_canonical_constructor() {
        let byname = DeskClock::from_zone_name(REFERENCE_ZONE).unwrap();
        let canonical = DeskClock::new_york();
        let t = utc(2024, 3, 10, 7, 0);
        assert_eq!(byname.civil(t), canonical.civil(t));
    }
}
