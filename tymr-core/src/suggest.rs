//! Free time slot suggestions.
//!
//! Walks the gaps between a day's commitments in chronological order and
//! proposes the earliest slot of the requested length in each gap that is
//! large enough. No scoring is involved: the order is the order of the gaps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::{Candidate, Interval, day_intervals, has_conflict};
use crate::event::{Event, EventId};
use crate::time::MinuteOfDay;

/// Most slots returned by [`suggest`].
pub const MAX_SUGGESTIONS: usize = 3;

/// Bounding interval for suggestions, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl Default for WorkWindow {
    /// 08:00 to 20:00
    fn default() -> Self {
        WorkWindow {
            start: MinuteOfDay::new(8 * 60).unwrap_or(MinuteOfDay::MIDNIGHT),
            end: MinuteOfDay::new(20 * 60).unwrap_or(MinuteOfDay::LAST),
        }
    }
}

impl WorkWindow {
    /// `None` unless `start < end`.
    pub fn new(start: MinuteOfDay, end: MinuteOfDay) -> Option<Self> {
        (start < end).then_some(WorkWindow { start, end })
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestOptions {
    pub window: WorkWindow,
    pub limit: usize,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        SuggestOptions {
            window: WorkWindow::default(),
            limit: MAX_SUGGESTIONS,
        }
    }
}

/// Up to three free slots of exactly `duration` minutes on `date`.
///
/// Every slot lies inside `window` and overlaps none of the existing events.
/// Events without a complete time range are ignored.
pub fn suggest(date: NaiveDate, duration: u16, existing: &[Event], window: WorkWindow) -> Vec<Interval> {
    let options = SuggestOptions {
        window,
        limit: MAX_SUGGESTIONS,
    };
    suggest_with(date, duration, existing, None, &options)
}

/// [`suggest`] with an excluded event (the one being edited) and a custom
/// limit.
pub fn suggest_with(
    date: NaiveDate,
    duration: u16,
    existing: &[Event],
    exclude: Option<EventId>,
    options: &SuggestOptions,
) -> Vec<Interval> {
    let mut busy = day_intervals(date, existing, exclude);
    busy.retain(|interval| !interval.is_empty());
    busy.sort();

    let slots = free_slots(&busy, duration, options);
    debug!(
        %date,
        duration,
        busy = busy.len(),
        suggestions = slots.len(),
        "Computed free slots"
    );
    slots
}

/// Alternatives for a candidate that clashes with the existing events.
///
/// Uses the candidate's own length. Returns nothing when the candidate has
/// no conflict, since there is nothing to resolve.
pub fn suggest_for(
    candidate: &Candidate,
    existing: &[Event],
    exclude: Option<EventId>,
    options: &SuggestOptions,
) -> Vec<Interval> {
    if !has_conflict(candidate, existing, exclude) {
        return Vec::new();
    }
    let duration = candidate.interval().duration();
    suggest_with(candidate.date, duration, existing, exclude, options)
}

/// Sweep the gaps of `busy` (sorted by start) inside the window.
fn free_slots(busy: &[Interval], duration: u16, options: &SuggestOptions) -> Vec<Interval> {
    let mut slots = Vec::new();
    if duration == 0 || options.limit == 0 {
        return slots;
    }

    let duration = u32::from(duration);
    let window_end = u32::from(options.window.end.minutes());
    let mut cursor = u32::from(options.window.start.minutes());

    for interval in busy {
        if slots.len() >= options.limit {
            return slots;
        }
        let gap_end = u32::from(interval.start.minutes()).min(window_end);
        if cursor + duration <= gap_end {
            slots.extend(slot(cursor, duration));
        }
        // Overlapping commitments merge: the cursor never moves back.
        cursor = cursor.max(u32::from(interval.end.minutes()));
    }

    if slots.len() < options.limit && cursor + duration <= window_end {
        slots.extend(slot(cursor, duration));
    }
    slots
}

fn slot(start: u32, duration: u32) -> Option<Interval> {
    let start = MinuteOfDay::new(u16::try_from(start).ok()?)?;
    let end = MinuteOfDay::new(u16::try_from(u32::from(start.minutes()) + duration).ok()?)?;
    Some(Interval::new(start, end))
}
