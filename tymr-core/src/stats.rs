//! Event counts for sidebars and grid badges.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::event::{Event, Priority};
use crate::grid::DayCell;

/// Number of events dated in the given month.
pub fn month_count(events: &[Event], year: i32, month: u32) -> usize {
    events
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .count()
}

/// Event count per grid cell, in cell order.
pub fn day_counts(events: &[Event], cells: &[DayCell]) -> Vec<usize> {
    let mut by_date: HashMap<NaiveDate, usize> = HashMap::new();
    for event in events {
        *by_date.entry(event.date).or_default() += 1;
    }
    cells
        .iter()
        .map(|cell| by_date.get(&cell.date).copied().unwrap_or(0))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthStats {
    pub total: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    /// Events that belong to a recurring series (base or generated)
    pub recurring: usize,
}

impl MonthStats {
    pub fn collect(events: &[Event], year: i32, month: u32) -> Self {
        let mut stats = MonthStats::default();
        for event in events
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
        {
            stats.total += 1;
            match event.priority {
                Priority::Low => stats.low += 1,
                Priority::Medium => stats.medium += 1,
                Priority::High => stats.high += 1,
            }
            if event.repeats() || event.is_generated() {
                stats.recurring += 1;
            }
        }
        stats
    }

    pub fn by_priority(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }
}
