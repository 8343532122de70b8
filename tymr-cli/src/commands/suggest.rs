use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tymr_core::config::SchedulerConfig;
use tymr_core::suggest::suggest_with;

use super::Output;
use crate::input::{load_schedule, parse_minutes};
use crate::render::Render;

pub fn run(
    events: Option<&Path>,
    date: NaiveDate,
    duration: Option<String>,
    config: &SchedulerConfig,
    output: Output,
) -> Result<()> {
    let schedule = load_schedule(events)?;
    let duration = match duration.as_deref() {
        Some(input) => parse_minutes(input)?,
        None => config.default_duration,
    };

    let options = config.suggest_options();
    let slots = suggest_with(date, duration, schedule.events(), None, &options);

    if output.print_json(&slots)? {
        return Ok(());
    }

    println!(
        "{} {}",
        date.to_string().bold(),
        format!(
            "({} min within {}-{})",
            duration, options.window.start, options.window.end
        )
        .dimmed()
    );
    if slots.is_empty() {
        println!("   {}", "No free slots".dimmed());
    }
    for slot in &slots {
        println!("   {}", slot.render());
    }

    Ok(())
}
