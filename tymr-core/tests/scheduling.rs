//! End-to-end checks of the scheduling core through its public API.

use chrono::{Datelike, NaiveDate, Weekday};
use tymr_core::conflict::{Candidate, conflicts};
use tymr_core::grid::{GRID_CELLS, build};
use tymr_core::recurrence::expand;
use tymr_core::suggest::{WorkWindow, suggest};
use tymr_core::{Event, EventId, MinuteOfDay, RecurringType};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn m(minutes: u16) -> MinuteOfDay {
    MinuteOfDay::new(minutes).unwrap()
}

fn event(id: u64, date: NaiveDate, start: u16, end: u16) -> Event {
    Event::new(EventId(id), format!("event {id}"), date, m(start), m(end))
}

#[test]
fn grid_always_has_six_sunday_first_weeks() {
    let mut date = ymd(2024, 1, 1);
    while date <= ymd(2026, 12, 31) {
        let cells = build(date);
        assert_eq!(cells.len(), GRID_CELLS, "{date}");
        assert_eq!(cells[0].date.weekday(), Weekday::Sun, "{date}");
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn june_2025_grid_bounds() {
    let cells = build(ymd(2025, 6, 25));
    let first = cells.first().unwrap().date;
    let last = cells.last().unwrap().date;

    assert!(first <= ymd(2025, 6, 1));
    assert_eq!(first.weekday(), Weekday::Sun);
    assert!(last >= ymd(2025, 6, 30));
    assert_eq!(last.weekday(), Weekday::Sat);
    assert_eq!(build(ymd(2025, 6, 25)), cells);
}

#[test]
fn weekly_series_without_end() {
    let mut base = event(1, ymd(2025, 6, 25), 540, 600);
    base.is_recurring = true;
    base.recurring_type = RecurringType::Weekly;

    let series = expand(&base);
    assert!(series.len() >= 52);
    assert_eq!(series[0], base);
    assert!(series.windows(2).all(|w| (w[1].date - w[0].date).num_days() == 7));
    assert!(series.iter().all(|e| e.date.weekday() == ymd(2025, 6, 25).weekday()));

    let mut ids: Vec<_> = series.iter().map(|e| e.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), series.len());
}

#[test]
fn overlap_and_touching_boundary() {
    let candidate = Candidate::new(ymd(2025, 6, 25), m(540), m(600));

    let overlapping = vec![event(2, ymd(2025, 6, 25), 570, 630)];
    assert_eq!(conflicts(&candidate, &overlapping, None).len(), 1);

    let touching = vec![event(3, ymd(2025, 6, 25), 600, 660)];
    assert!(conflicts(&candidate, &touching, None).is_empty());
}

#[test]
fn suggestions_follow_gap_order() {
    let day = ymd(2025, 6, 25);
    let existing = vec![event(1, day, 540, 600), event(2, day, 660, 720)];

    let slots: Vec<_> = suggest(day, 60, &existing, WorkWindow::default())
        .iter()
        .map(|s| (s.start.minutes(), s.end.minutes()))
        .collect();
    assert_eq!(slots, vec![(480, 540), (600, 660), (720, 780)]);
}
