//! Reading events and durations from the command line.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use tymr_core::schedule::Schedule;
use tymr_core::time::MINUTES_PER_DAY;

/// Load the event list, or start empty when no file was given.
pub fn load_schedule(path: Option<&Path>) -> Result<Schedule> {
    let Some(path) = path else {
        return Ok(Schedule::new());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read events from {}", path.display()))?;
    let schedule = Schedule::from_json(&content)
        .with_context(|| format!("Could not parse events in {}", path.display()))?;

    tracing::debug!(path = %path.display(), events = schedule.len(), "Loaded events");
    Ok(schedule)
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a duration in whole minutes: a bare number ("45") or a humantime
/// expression ("90min", "1h 30m").
pub fn parse_minutes(input: &str) -> Result<u16> {
    let input = input.trim();

    let minutes = match input.parse::<u64>() {
        Ok(minutes) => minutes,
        Err(_) => {
            let duration = humantime::parse_duration(input)
                .with_context(|| format!("Invalid duration '{}'", input))?;
            if duration.as_secs() % 60 != 0 || duration.subsec_nanos() != 0 {
                bail!("Duration '{}' must be a whole number of minutes", input);
            }
            duration.as_secs() / 60
        }
    };

    if minutes == 0 || minutes >= u64::from(MINUTES_PER_DAY) {
        bail!("Duration '{}' must be between 1 minute and 23h 59m", input);
    }
    Ok(minutes as u16)
}
