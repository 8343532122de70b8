use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use tymr_core::Priority;
use tymr_core::search::{DateRangeFilter, EventFilter};

use super::Output;
use crate::input::{load_schedule, now};
use crate::render::{Render, pluralize};

pub fn run(
    events: Option<&Path>,
    query: Option<String>,
    priority: Option<Priority>,
    range: DateRangeFilter,
    tags: Option<String>,
    output: Output,
) -> Result<()> {
    let schedule = load_schedule(events)?;
    let filter = EventFilter {
        query: query.unwrap_or_default(),
        priority,
        range,
        tags: tags.unwrap_or_default(),
    };

    let mut found = filter.apply(schedule.events(), now().date());
    found.sort_by_key(|e| (e.date, e.start_time, e.id));

    if output.print_json(&found)? {
        return Ok(());
    }

    if found.is_empty() {
        println!("   {}", "No matching events".dimmed());
        return Ok(());
    }
    for event in &found {
        println!("   {}", event.render());
    }
    if filter.is_active() {
        println!();
        let summary = format!(
            "  {} of {} {}",
            found.len(),
            schedule.len(),
            pluralize("event", schedule.len())
        );
        println!("{}", summary.dimmed());
    }

    Ok(())
}
