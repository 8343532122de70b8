use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tymr_core::conflict::{Candidate, has_conflict};
use tymr_core::config::SchedulerConfig;
use tymr_core::{EventDraft, MinuteOfDay, Priority, RecurringType};

use super::Output;
use crate::input::{load_schedule, now};
use crate::render::{Render, pluralize};

pub struct ExpandRequest {
    pub title: String,
    pub date: NaiveDate,
    pub start: MinuteOfDay,
    pub end: Option<MinuteOfDay>,
    pub repeat: RecurringType,
    pub until: Option<NaiveDate>,
    pub priority: Priority,
}

pub fn run(
    events: Option<&Path>,
    request: ExpandRequest,
    config: &SchedulerConfig,
    output: Output,
) -> Result<()> {
    let mut schedule = load_schedule(events)?;
    schedule.set_expand_options(config.expand_options());
    let existing = schedule.events().to_vec();

    let end = request
        .end
        .unwrap_or_else(|| request.start.saturating_add(config.default_duration));
    let draft = EventDraft::new(request.title, request.date, request.start, end)
        .repeating(request.repeat, request.until)
        .with_priority(request.priority);

    let ids = schedule.add(draft, now())?;
    let created: Vec<_> = ids.iter().filter_map(|id| schedule.get(*id)).collect();

    if output.print_json(&created)? {
        return Ok(());
    }

    let mut clashes = 0;
    for event in &created {
        let clash = Candidate::from_event(event)
            .is_some_and(|candidate| has_conflict(&candidate, &existing, None));
        if clash {
            clashes += 1;
            println!("   {} {}", event.render(), "conflict".red());
        } else {
            println!("   {}", event.render());
        }
    }

    println!();
    let summary = format!("  Created {} {}", created.len(), pluralize("event", created.len()));
    println!("{}", summary.green());
    if clashes > 0 {
        let warning = format!("  {} {} overlap existing events", clashes, pluralize("occurrence", clashes));
        println!("{}", warning.yellow());
    }

    Ok(())
}
