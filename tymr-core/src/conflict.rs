//! Time-interval overlap detection between events on the same day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventId};
use crate::time::MinuteOfDay;

/// Half-open time interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl Interval {
    pub const fn new(start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Interval { start, end }
    }

    /// Length in minutes; zero for empty or inverted intervals.
    pub fn duration(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Strict overlap: intervals that only touch at a boundary do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// The date and time range being checked, typically an unsaved form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub date: NaiveDate,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl Candidate {
    pub fn new(date: NaiveDate, start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Candidate { date, start, end }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Build a candidate from an event, if it has both times.
    pub fn from_event(event: &Event) -> Option<Self> {
        Some(Candidate::new(event.date, event.start_time?, event.end_time?))
    }
}

/// Events on `date` that have a complete time range, skipping `exclude`.
///
/// Events missing a start or end time are left out rather than treated as
/// errors.
pub fn day_events<'a>(
    date: NaiveDate,
    existing: &'a [Event],
    exclude: Option<EventId>,
) -> impl Iterator<Item = (&'a Event, Interval)> + 'a {
    existing
        .iter()
        .filter(move |event| event.date == date && Some(event.id) != exclude)
        .filter_map(|event| event.interval().map(|interval| (event, interval)))
}

/// Intervals of the events on `date`, in collection order.
pub fn day_intervals(date: NaiveDate, existing: &[Event], exclude: Option<EventId>) -> Vec<Interval> {
    day_events(date, existing, exclude)
        .map(|(_, interval)| interval)
        .collect()
}

/// Existing events whose time range strictly overlaps the candidate.
///
/// `exclude` skips the event being edited so it does not conflict with
/// itself.
pub fn conflicts<'a>(
    candidate: &Candidate,
    existing: &'a [Event],
    exclude: Option<EventId>,
) -> Vec<&'a Event> {
    let wanted = candidate.interval();
    day_events(candidate.date, existing, exclude)
        .filter(|(_, interval)| wanted.overlaps(interval))
        .map(|(event, _)| event)
        .collect()
}

pub fn has_conflict(candidate: &Candidate, existing: &[Event], exclude: Option<EventId>) -> bool {
    let wanted = candidate.interval();
    day_events(candidate.date, existing, exclude).any(|(_, interval)| wanted.overlaps(&interval))
}
