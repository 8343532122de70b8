use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use tymr_core::navigation::month_title;
use tymr_core::stats::MonthStats;

use super::Output;
use crate::input::{load_schedule, now};
use crate::render::Render;

pub fn run(events: Option<&Path>, date: Option<NaiveDate>, output: Output) -> Result<()> {
    let schedule = load_schedule(events)?;
    let date = date.unwrap_or_else(|| now().date());

    let stats = MonthStats::collect(schedule.events(), date.year(), date.month());
    if output.print_json(&stats)? {
        return Ok(());
    }

    println!("{}", month_title(date).bold());
    println!("   {}", stats.render());

    Ok(())
}
