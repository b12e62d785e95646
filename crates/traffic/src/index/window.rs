//! Window selection over the minute-of-day buckets.
//!
//! A filter centered on minute `c` selects the half-open range `[c - w, c + w)` on the clock
//! face, where `w` is the half-width. When that range crosses midnight it is split into
//! `[lo, 1440)` and `[0, hi)`.

use std::ops::Range;

use crate::models::time::{MinuteOfDay, TimeFilter, MINUTES_PER_DAY};

/// "One hour either side of the selected time"
pub const DEFAULT_HALF_WIDTH: u16 = 60;

const DAY: usize = MINUTES_PER_DAY as usize;

/// Buckets selected by a time filter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Every bucket
    All,
    /// `[lo, hi)` when `lo <= hi`, otherwise `[lo, 1440) ∪ [0, hi)`
    Window { lo: MinuteOfDay, hi: MinuteOfDay },
}

impl Selection {
    pub fn wraps_midnight(&self) -> bool {
        matches!(self, Self::Window { lo, hi } if lo > hi)
    }

    /// The selected bucket indices as at most two disjoint ranges. The second range is empty
    /// unless the window wraps midnight.
    pub fn bucket_ranges(&self) -> [Range<usize>; 2] {
        match *self {
            Self::All => [0..DAY, 0..0],
            Self::Window { lo, hi } if lo <= hi => [lo.index()..hi.index(), 0..0],
            Self::Window { lo, hi } => [lo.index()..DAY, 0..hi.index()],
        }
    }

    pub fn contains(&self, minute: MinuteOfDay) -> bool {
        self.bucket_ranges()
            .iter()
            .any(|range| range.contains(&minute.index()))
    }

    /// Number of selected minutes
    pub fn width(&self) -> usize {
        self.bucket_ranges().iter().map(|range| range.len()).sum()
    }
}

/// Computes the buckets covered by `filter` with the given half-width in minutes.
///
/// A half-width of 720 or more spans the whole day and selects [`Selection::All`]; splitting
/// such a window at midnight would produce overlapping ranges and count buckets twice.
pub fn select_range(filter: TimeFilter, half_width: u16) -> Selection {
    let center = match filter {
        TimeFilter::Any => return Selection::All,
        TimeFilter::Around(center) => i32::from(center.get()),
    };

    if half_width >= MINUTES_PER_DAY / 2 {
        return Selection::All;
    }

    let half_width = i32::from(half_width);
    Selection::Window {
        lo: MinuteOfDay::wrapping(center - half_width),
        hi: MinuteOfDay::wrapping(center + half_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn around(minute: u16) -> TimeFilter {
        TimeFilter::Around(MinuteOfDay::new(minute).unwrap())
    }

    #[test]
    fn test_unfiltered_selects_everything() {
        let selection = select_range(TimeFilter::Any, DEFAULT_HALF_WIDTH);
        assert_eq!(selection, Selection::All);
        assert_eq!(selection.width(), 1440);
        assert!(selection.contains(MinuteOfDay::new(1439).unwrap()));
    }

    #[test]
    fn test_contiguous_window() {
        let selection = select_range(around(720), DEFAULT_HALF_WIDTH);
        assert_eq!(selection.bucket_ranges(), [660..780, 0..0]);
        assert!(!selection.wraps_midnight());
        assert!(selection.contains(MinuteOfDay::new(660).unwrap()));
        assert!(selection.contains(MinuteOfDay::new(779).unwrap()));
        assert!(!selection.contains(MinuteOfDay::new(780).unwrap()));
        assert_eq!(selection.width(), 120);
    }

    #[test]
    fn test_window_wraps_at_midnight() {
        let selection = select_range(around(0), DEFAULT_HALF_WIDTH);
        assert!(selection.wraps_midnight());
        assert_eq!(selection.bucket_ranges(), [1380..1440, 0..60]);
        assert!(selection.contains(MinuteOfDay::new(1430).unwrap()));
        assert!(selection.contains(MinuteOfDay::new(30).unwrap()));
        assert!(!selection.contains(MinuteOfDay::new(60).unwrap()));
        assert_eq!(selection.width(), 120);

        let selection = select_range(around(1400), DEFAULT_HALF_WIDTH);
        assert_eq!(selection.bucket_ranges(), [1340..1440, 0..20]);
    }

    #[test]
    fn test_window_ending_exactly_at_midnight() {
        // hi wraps to 0, so the window is [1320, 1440) ∪ [0, 0)
        let selection = select_range(around(1380), DEFAULT_HALF_WIDTH);
        assert_eq!(selection.bucket_ranges(), [1320..1440, 0..0]);
        assert_eq!(selection.width(), 120);
    }

    #[test]
    fn test_wide_windows_select_all() {
        assert_eq!(select_range(around(100), 720), Selection::All);
        assert_eq!(select_range(around(100), 1000), Selection::All);
        assert_eq!(select_range(around(100), 719).width(), 1438);
    }

    #[test]
    fn test_zero_width_window_is_empty() {
        let selection = select_range(around(100), 0);
        assert_eq!(selection.width(), 0);
        assert!(!selection.contains(MinuteOfDay::new(100).unwrap()));
    }
}
