use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;
use tymr_core::grid::{DayCell, MonthGrid};
use tymr_core::navigation::{day_title, shift_months};
use tymr_core::stats::{day_counts, month_count};

use super::Output;
use crate::input::{load_schedule, now};
use crate::render::{Render, pluralize, render_month};

#[derive(Serialize)]
struct MonthView<'a> {
    year: i32,
    month: u32,
    week_numbers: Vec<u32>,
    cells: Vec<CellView<'a>>,
}

#[derive(Serialize)]
struct CellView<'a> {
    #[serde(flatten)]
    cell: &'a DayCell,
    events: usize,
}

pub fn run(events: Option<&Path>, date: Option<NaiveDate>, shift: i32, output: Output) -> Result<()> {
    let schedule = load_schedule(events)?;
    let today = now().date();
    let selected = date.unwrap_or(today);
    let reference = shift_months(selected, shift);

    let grid = MonthGrid::new(reference);
    let counts = day_counts(schedule.events(), &grid.cells);

    let view = MonthView {
        year: grid.year,
        month: grid.month,
        week_numbers: grid.week_numbers(),
        cells: grid
            .cells
            .iter()
            .zip(&counts)
            .map(|(cell, events)| CellView { cell, events: *events })
            .collect(),
    };
    if output.print_json(&view)? {
        return Ok(());
    }

    println!("{}", render_month(&grid, &counts, today));
    println!();

    let total = month_count(schedule.events(), grid.year, grid.month);
    println!("   {} {} this month", total.bold(), pluralize("event", total));

    // Only list a day when the caller picked one in the shown month
    if shift == 0 && date.is_some() {
        let day_events = schedule.on_date(selected);
        println!();
        println!("{}", day_title(selected).bold());
        if day_events.is_empty() {
            println!("   {}", "No events".dimmed());
        }
        for event in day_events {
            println!("   {}", event.render());
        }
    }

    Ok(())
}
