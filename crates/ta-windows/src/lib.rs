//! ta-windows
//!
//! The one interval-classification primitive behind every time partition in
//! the engine: sessions, quarters and macro windows are all "first declared
//! window containing this minute-of-day", with midnight wrap handled in one
//! place instead of three hand-written copies.
//!
//! Pure deterministic logic. No IO, no wall-clock.

use std::fmt;
use ta_schemas::TimeWindow;

// ---------------------------------------------------------------------------
// Windowed + classify
// ---------------------------------------------------------------------------

/// Anything that occupies a [`TimeWindow`] on the civil day.
pub trait Windowed {
    fn window(&self) -> TimeWindow;
}

impl Windowed for TimeWindow {
    fn window(&self) -> TimeWindow {
        *self
    }
}

/// Returns the first item whose window contains `minute_of_day` under the
/// half-open wrap convention, or `None`.
///
/// Catalogs are declared non-overlapping by contract; under a violation the
/// tie-break is simply first-in-list, not an error.
pub fn classify<T: Windowed>(items: &[T], minute_of_day: u32) -> Option<&T> {
    items.iter().find(|item| item.window().contains(minute_of_day))
}

/// Elapsed-over-duration of a window as a percentage, clamped to 0..=100.
///
/// Durations in this engine subdivide fractionally (a 37-minute quarter has
/// 9.25-minute micros), so progress math stays in `f64` throughout.
pub fn progress_percent(window: TimeWindow, minute_of_day: u32) -> f64 {
    let duration = window.duration_minutes();
    if duration == 0 {
        return 0.0;
    }
    let elapsed = window.elapsed_minutes(minute_of_day) as f64;
    (elapsed / duration as f64 * 100.0).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Catalog validation
// ---------------------------------------------------------------------------

/// Data-contract violations in a static window catalog.
///
/// Catalogs load once at process start; a violation here means the tables
/// would produce silently wrong progress percentages, so loading fails fast
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// `start == end`: a zero-duration window can never classify anything.
    ZeroDuration { index: usize, window: TimeWindow },
    /// A subdivision does not begin where the parent (or prior part) ends.
    NotContiguous { index: usize, expected_start: u32, actual_start: u32 },
    /// Subdivision durations do not sum to the parent duration.
    PartitionMismatch { parent_duration: u32, parts_duration: u32 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::ZeroDuration { index, window } => write!(
                f,
                "window {index} has zero duration ({:02}:{:02} -> {:02}:{:02})",
                window.start_hour, window.start_minute, window.end_hour, window.end_minute
            ),
            CatalogError::NotContiguous { index, expected_start, actual_start } => write!(
                f,
                "part {index} starts at minute {actual_start}, expected {expected_start}"
            ),
            CatalogError::PartitionMismatch { parent_duration, parts_duration } => write!(
                f,
                "parts cover {parts_duration} minutes of a {parent_duration}-minute parent"
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Rejects zero-duration windows anywhere in a catalog.
pub fn validate_windows<T: Windowed>(items: &[T]) -> Result<(), CatalogError> {
    for (index, item) in items.iter().enumerate() {
        let window = item.window();
        if window.duration_minutes() == 0 {
            return Err(CatalogError::ZeroDuration { index, window });
        }
    }
    Ok(())
}

/// Checks that `parts` tile `parent` exactly: contiguous, in order, starting
/// at the parent start and ending at the parent end (no gap, no overlap).
///
/// All arithmetic runs in wrap-adjusted minute space, so a parent spanning
/// midnight validates the same way as a same-day one.
pub fn validate_partition<T: Windowed>(parent: TimeWindow, parts: &[T]) -> Result<(), CatalogError> {
    validate_windows(parts)?;

    let parent_start = parent.start_minutes();
    let mut cursor = parent_start;
    let mut covered = 0u32;

    for (index, part) in parts.iter().enumerate() {
        let w = part.window();
        // Re-anchor the part into the parent's wrapped minute space.
        let part_start = parent_start + parent.elapsed_minutes(w.start_minutes());
        if part_start != cursor {
            return Err(CatalogError::NotContiguous {
                index,
                expected_start: cursor,
                actual_start: part_start,
            });
        }
        cursor += w.duration_minutes();
        covered += w.duration_minutes();
    }

    if covered != parent.duration_minutes() {
        return Err(CatalogError::PartitionMismatch {
            parent_duration: parent.duration_minutes(),
            parts_duration: covered,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Named {
        name: &'static str,
        window: TimeWindow,
    }

    impl Windowed for Named {
        fn window(&self) -> TimeWindow {
            self.window
        }
    }

    fn catalog() -> Vec<Named> {
        vec![
            Named { name: "asia", window: TimeWindow::new(20, 0, 0, 0) },
            Named { name: "london", window: TimeWindow::new(2, 0, 5, 0) },
            Named { name: "ny_am", window: TimeWindow::new(9, 30, 12, 0) },
        ]
    }

    #[test]
    fn classify_is_half_open() {
        let c = catalog();
        assert_eq!(classify(&c, 9 * 60 + 30).map(|n| n.name), Some("ny_am"));
        assert_eq!(classify(&c, 12 * 60 - 1).map(|n| n.name), Some("ny_am"));
        assert_eq!(classify(&c, 12 * 60), None);
    }

    #[test]
    fn classify_handles_midnight_wrap() {
        let c = catalog();
        assert_eq!(classify(&c, 23 * 60 + 59).map(|n| n.name), Some("asia"));
        // 00:00 is the wrap end, exclusive: not inside the previous evening.
        assert_eq!(classify(&c, 0), None);
    }

    #[test]
    fn first_declared_match_wins_on_overlap() {
        let c = vec![
            Named { name: "first", window: TimeWindow::new(9, 0, 11, 0) },
            Named { name: "second", window: TimeWindow::new(10, 0, 12, 0) },
        ];
        assert_eq!(classify(&c, 10 * 60 + 30).map(|n| n.name), Some("first"));
        assert_eq!(classify(&c, 11 * 60).map(|n| n.name), Some("second"));
    }

    #[test]
    fn progress_clamps_and_handles_wrap() {
        let w = TimeWindow::new(20, 0, 0, 0);
        assert_eq!(progress_percent(w, 20 * 60), 0.0);
        assert_eq!(progress_percent(w, 22 * 60), 50.0);
        assert!((progress_percent(w, 23 * 60 + 59) - 99.583).abs() < 0.01);
    }

    #[test]
    fn zero_duration_window_fails_validation() {
        let c = vec![Named { name: "broken", window: TimeWindow::new(9, 0, 9, 0) }];
        assert!(matches!(
            validate_windows(&c),
            Err(CatalogError::ZeroDuration { index: 0, .. })
        ));
    }

    #[test]
    fn exact_partition_validates() {
        let parent = TimeWindow::new(9, 30, 12, 0);
        let parts = vec![
            TimeWindow::new(9, 30, 10, 7),
            TimeWindow::new(10, 7, 10, 45),
            TimeWindow::new(10, 45, 11, 22),
            TimeWindow::new(11, 22, 12, 0),
        ];
        assert_eq!(validate_partition(parent, &parts), Ok(()));
    }

    #[test]
    fn gapped_partition_is_rejected() {
        let parent = TimeWindow::new(9, 30, 12, 0);
        let parts = vec![
            TimeWindow::new(9, 30, 10, 7),
            TimeWindow::new(10, 10, 12, 0), // 3-minute gap
        ];
        assert!(matches!(
            validate_partition(parent, &parts),
            Err(CatalogError::NotContiguous { index: 1, .. })
        ));
    }

    #[test]
    fn short_partition_is_rejected() {
        let parent = TimeWindow::new(9, 30, 12, 0);
        let parts = vec![TimeWindow::new(9, 30, 11, 0)];
        assert!(matches!(
            validate_partition(parent, &parts),
            Err(CatalogError::PartitionMismatch { .. })
        ));
    }

    #[test]
    fn wrapping_parent_partitions_cleanly() {
        let parent = TimeWindow::new(20, 0, 0, 0);
        let parts = vec![
            TimeWindow::new(20, 0, 21, 0),
            TimeWindow::new(21, 0, 22, 0),
            TimeWindow::new(22, 0, 23, 0),
            TimeWindow::new(23, 0, 0, 0),
        ];
        assert_eq!(validate_partition(parent, &parts), Ok(()));
    }
}
