use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;
use tymr_core::config::SchedulerConfig;
use tymr_core::conflict::{Candidate, Interval};
use tymr_core::time::adjust_start;
use tymr_core::validation::is_in_past;
use tymr_core::{Event, EventDraft, EventId, MinuteOfDay};

use super::Output;
use crate::input::{load_schedule, now, parse_minutes};
use crate::render::Render;

pub struct CheckRequest {
    pub date: NaiveDate,
    pub start: MinuteOfDay,
    pub end: Option<MinuteOfDay>,
    pub duration: Option<String>,
    pub exclude: Option<u64>,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    start: MinuteOfDay,
    end: MinuteOfDay,
    in_past: bool,
    conflicts: Vec<&'a Event>,
    suggestions: Vec<Interval>,
}

pub fn run(
    events: Option<&Path>,
    request: CheckRequest,
    config: &SchedulerConfig,
    output: Output,
) -> Result<()> {
    let schedule = load_schedule(events)?;

    let requested_end = match (request.end, request.duration.as_deref()) {
        (Some(end), _) => end,
        (None, Some(duration)) => request.start.saturating_add(parse_minutes(duration)?),
        (None, None) => request.start.saturating_add(config.default_duration),
    };
    // Same correction a form applies when the end lands before the start
    let (start, end) = adjust_start(request.start, requested_end);
    if (start, end) != (request.start, requested_end) {
        tracing::info!(%start, %end, "Adjusted inverted time range");
    }

    let exclude = request.exclude.map(EventId);
    let candidate = Candidate::new(request.date, start, end);
    let conflicts = schedule.conflicts_for(&candidate, exclude);
    let suggestions = schedule.suggestions_for(&candidate, exclude, &config.suggest_options());

    // Edits may keep past dates; only new events are held to "not in the past"
    let in_past = exclude.is_none()
        && is_in_past(&EventDraft::new("", request.date, start, end), now());

    let report = CheckReport {
        start,
        end,
        in_past,
        conflicts,
        suggestions,
    };
    if output.print_json(&report)? {
        return Ok(());
    }

    println!("{} {}-{}", request.date.to_string().bold(), start, end);
    if report.in_past {
        println!("   {}", "Cannot schedule events in the past".yellow());
    }

    if report.conflicts.is_empty() {
        println!("   {}", "No conflicts".green());
        return Ok(());
    }

    println!("   {}", "Conflicts with:".red());
    for event in &report.conflicts {
        println!("      {}", event.render());
    }

    if report.suggestions.is_empty() {
        println!("   {}", "No free slots within working hours".dimmed());
    } else {
        println!("   {}", "Free slots:".dimmed());
        for slot in &report.suggestions {
            println!("      {}", slot.render());
        }
    }

    Ok(())
}
