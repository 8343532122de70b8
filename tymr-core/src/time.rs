//! Wall-clock time of day, stored as minutes since midnight.
//!
//! Times are naive: there is no time zone attached, and every event lives
//! on a single calendar date, so a time never crosses midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TymrError, TymrResult};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Length applied when auto-correcting an inverted start/end pair.
pub const AUTO_CORRECT_MINUTES: u16 = 60;

/// Spacing of the time pickers offered to the user.
pub const SLOT_STEP_MINUTES: u16 = 15;

/// Lead time required before a new event can start today.
pub const MIN_LEAD_MINUTES: u16 = 15;

/// A minute of the day in `0..=1439`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);
    pub const LAST: MinuteOfDay = MinuteOfDay(MINUTES_PER_DAY - 1);

    pub const fn new(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(MinuteOfDay(minutes))
        } else {
            None
        }
    }

    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(MinuteOfDay(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Parse a 24-hour `HH:MM` string (`9:05` is accepted too).
    pub fn parse(s: &str) -> TymrResult<Self> {
        let invalid = || TymrError::InvalidTime(s.to_string());

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute).ok_or_else(invalid)
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    pub fn checked_add(self, minutes: u16) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::new)
    }

    /// Add minutes, stopping at 23:59.
    pub fn saturating_add(self, minutes: u16) -> Self {
        self.checked_add(minutes).unwrap_or(Self::LAST)
    }

    /// Subtract minutes, stopping at 00:00.
    pub fn saturating_sub(self, minutes: u16) -> Self {
        MinuteOfDay(self.0.saturating_sub(minutes))
    }

    /// Render as a 12-hour clock label, e.g. `9:00 AM` or `12:30 PM`.
    pub fn format_12h(self) -> String {
        let hour = self.hour();
        let hour12 = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        format!("{}:{:02} {}", hour12, self.minute(), suffix)
    }

    pub fn from_time<T: Timelike>(t: &T) -> Self {
        // hour() < 24 and minute() < 60 by construction
        MinuteOfDay((t.hour() * 60 + t.minute()) as u16)
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteOfDay {
    type Err = TymrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinuteOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Time pickers emit `""` for an unset field; treat it like a missing one.
pub(crate) fn deserialize_optional_time<'de, D>(
    deserializer: D,
) -> Result<Option<MinuteOfDay>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => MinuteOfDay::parse(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Apply a new start time, pushing the end out when the pair would invert.
///
/// Returns the corrected `(start, end)`; `start < end` always holds.
pub fn adjust_start(start: MinuteOfDay, end: MinuteOfDay) -> (MinuteOfDay, MinuteOfDay) {
    if start < end {
        return (start, end);
    }
    let start = start.min(MinuteOfDay(MINUTES_PER_DAY - 2));
    (start, start.saturating_add(AUTO_CORRECT_MINUTES))
}

/// Apply a new end time, pulling the start back when the pair would invert.
///
/// Returns the corrected `(start, end)`; `start < end` always holds.
pub fn adjust_end(start: MinuteOfDay, end: MinuteOfDay) -> (MinuteOfDay, MinuteOfDay) {
    if end > start {
        return (start, end);
    }
    let end = end.max(MinuteOfDay(1));
    (end.saturating_sub(AUTO_CORRECT_MINUTES), end)
}

/// All times of day at `step`-minute spacing, starting from midnight.
pub fn time_slots(step: u16) -> Vec<MinuteOfDay> {
    if step == 0 {
        return Vec::new();
    }
    (0..MINUTES_PER_DAY)
        .step_by(usize::from(step))
        .map(MinuteOfDay)
        .collect()
}

/// Earliest start time a new event on `date` may use.
///
/// Any time is allowed on other days. On the current day the start must be
/// at least [`MIN_LEAD_MINUTES`] away, rounded up to the next quarter hour.
/// Returns `None` when that lands past midnight (nothing is left today).
pub fn min_start_for(date: NaiveDate, now: NaiveDateTime) -> Option<MinuteOfDay> {
    if date != now.date() {
        return Some(MinuteOfDay::MIDNIGHT);
    }
    let earliest = MinuteOfDay::from_time(&now).minutes() + MIN_LEAD_MINUTES;
    let rounded = earliest.div_ceil(SLOT_STEP_MINUTES) * SLOT_STEP_MINUTES;
    MinuteOfDay::new(rounded)
}
