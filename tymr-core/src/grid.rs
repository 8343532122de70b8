//! Month grid for calendar views.
//!
//! A month is always shown as six Sunday-first weeks (42 cells), padded with
//! the tail of the previous month and the head of the next one.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::event::Event;

/// Number of cells in a month grid.
pub const GRID_CELLS: usize = 42;

/// Days per grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// One position in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

impl DayCell {
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    /// Past cells cannot take new events.
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.date < today
    }
}

/// Build the 42 cells for the month containing `reference`.
///
/// The first cell is always a Sunday. Identical inputs yield identical
/// cells.
pub fn build(reference: NaiveDate) -> Vec<DayCell> {
    let first = reference.with_day(1).unwrap_or(reference);
    let lead = u64::from(first.weekday().num_days_from_sunday());

    // Walking forward one day at a time from the grid's first Sunday rolls
    // over month and year boundaries on its own.
    let grid_start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);

    grid_start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| DayCell {
            date,
            in_current_month: date.year() == first.year() && date.month() == first.month(),
        })
        .collect()
}

/// ISO-8601 week number of `date`.
///
/// Shifts to the Thursday of the date's Monday-based week and counts weeks
/// from the start of that Thursday's year.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let from_monday = u64::from(date.weekday().num_days_from_monday());
    let thursday = date
        .checked_sub_days(Days::new(from_monday))
        .and_then(|monday| monday.checked_add_days(Days::new(3)))
        .unwrap_or(date);
    thursday.ordinal0() / 7 + 1
}

/// A built month grid with row helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn new(reference: NaiveDate) -> Self {
        MonthGrid {
            year: reference.year(),
            month: reference.month(),
            cells: build(reference),
        }
    }

    /// The six rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// ISO week number for each row, taken from the row's first cell.
    pub fn week_numbers(&self) -> Vec<u32> {
        self.weeks()
            .filter_map(|week| week.first())
            .map(|cell| iso_week_number(cell.date))
            .collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.cells.first().map(|cell| cell.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.cells.last().map(|cell| cell.date)
    }
}

/// Events that fall on `date`, ordered by start time (untimed events last).
pub fn events_on(date: NaiveDate, events: &[Event]) -> Vec<&Event> {
    let mut day: Vec<&Event> = events.iter().filter(|e| e.date == date).collect();
    day.sort_by_key(|e| (e.start_time.is_none(), e.start_time, e.id));
    day
}

/// Weekday column headers, Sunday first.
pub const WEEKDAY_HEADERS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];
