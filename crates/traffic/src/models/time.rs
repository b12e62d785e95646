//! Minute-of-day arithmetic and the slider time filter.
//!
//! Every timestamp is reduced to wall-clock minutes since midnight in `[0, 1440)`; the date and
//! any sub-minute precision are discarded.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

use crate::models::types::{Result, TrafficError};

/// Number of one-minute buckets in a day
pub const MINUTES_PER_DAY: u16 = 1440;

/// Wall-clock minute of the day, always in `[0, 1440)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const MIDNIGHT: Self = Self(0);
    pub const NOON: Self = Self(720);

    /// Returns `None` when `minute >= 1440`
    pub fn new(minute: u16) -> Option<Self> {
        (minute < MINUTES_PER_DAY).then_some(Self(minute))
    }

    /// Wraps any signed minute offset onto the clock face
    pub fn wrapping(minute: i32) -> Self {
        Self(minute.rem_euclid(MINUTES_PER_DAY as i32) as u16)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self((hour * 60 + minute) as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// `hour * 60 + minute` of a timestamp's wall-clock time
pub fn minutes_since_midnight<T: Timelike>(timestamp: &T) -> MinuteOfDay {
    // hour() < 24 and minute() < 60 for every chrono time type
    MinuteOfDay((timestamp.hour() * 60 + timestamp.minute()) as u16)
}

/// Formats a minute of the day as en-US short time, e.g. `12:00 AM`, `8:05 AM`, `1:30 PM`
pub fn format_time(minute: MinuteOfDay) -> String {
    NaiveTime::from_hms_opt(minute.hour(), minute.minute(), 0)
        .map(|time| time.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

// ============================================================================
// Time Filter
// ============================================================================

/// Slider-controlled filter: every trip, or a window centered on one minute of the day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TimeFilter {
    #[default]
    Any,
    Around(MinuteOfDay),
}

impl TimeFilter {
    /// Slider sentinel for "no filter"
    pub const ANY_SLIDER_VALUE: i32 = -1;

    /// Converts a raw slider value in `[-1, 1439]`
    pub fn from_slider(value: i32) -> Result<Self> {
        if value == Self::ANY_SLIDER_VALUE {
            return Ok(Self::Any);
        }
        u16::try_from(value)
            .ok()
            .and_then(MinuteOfDay::new)
            .map(Self::Around)
            .ok_or(TrafficError::InvalidTimeFilter(value))
    }

    pub fn slider_value(self) -> i32 {
        match self {
            Self::Any => Self::ANY_SLIDER_VALUE,
            Self::Around(center) => i32::from(center.get()),
        }
    }

    pub fn is_filtered(self) -> bool {
        matches!(self, Self::Around(_))
    }

    pub fn center(self) -> Option<MinuteOfDay> {
        match self {
            Self::Any => None,
            Self::Around(center) => Some(center),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("(any time)"),
            Self::Around(center) => f.write_str(&format_time(*center)),
        }
    }
}

impl FromStr for TimeFilter {
    type Err = TrafficError;

    /// Accepts `any`, a slider integer (`-1`, `0`..=`1439`), or 24-hour `HH:MM`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(Self::Any);
        }

        if let Some((hour, minute)) = s.split_once(':') {
            return hour
                .parse::<u32>()
                .ok()
                .zip(minute.parse::<u32>().ok())
                .and_then(|(h, m)| MinuteOfDay::from_hm(h, m))
                .map(Self::Around)
                .ok_or_else(|| TrafficError::InvalidData(format!("Invalid time of day: {s:?}")));
        }

        let value = s
            .parse::<i32>()
            .map_err(|_| TrafficError::InvalidData(format!("Invalid time filter: {s:?}")))?;
        Self::from_slider(value)
    }
}
