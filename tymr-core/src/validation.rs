//! Form-level checks run before an event is stored.
//!
//! The scheduling functions accept any input; these checks are for the
//! layer that builds events from user input.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::event::EventDraft;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationIssue {
    #[error("title is required")]
    EmptyTitle,

    #[error("start and end time are required")]
    MissingTime,

    #[error("end time must be after start time")]
    EndNotAfterStart,

    #[error("cannot schedule events in the past")]
    InPast,
}

/// Checks for a brand-new event, including that it does not start before
/// `now`.
pub fn validate_new(draft: &EventDraft, now: NaiveDateTime) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = field_issues(draft);
    if is_in_past(draft, now) {
        issues.push(ValidationIssue::InPast);
    }
    into_result(issues)
}

/// Checks for an edited event. Existing events may keep past dates.
pub fn validate_edit(draft: &EventDraft) -> Result<(), Vec<ValidationIssue>> {
    into_result(field_issues(draft))
}

/// True when the draft's start lies before `now`. Without a start time the
/// whole date is compared.
pub fn is_in_past(draft: &EventDraft, now: NaiveDateTime) -> bool {
    match draft.start_time {
        Some(start) => {
            let starts_at = draft.date.and_hms_opt(
                u32::from(start.hour()),
                u32::from(start.minute()),
                0,
            );
            starts_at.is_some_and(|at| at < now)
        }
        None => draft.date < now.date(),
    }
}

fn field_issues(draft: &EventDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if draft.title.trim().is_empty() {
        issues.push(ValidationIssue::EmptyTitle);
    }
    match (draft.start_time, draft.end_time) {
        (Some(start), Some(end)) if end <= start => issues.push(ValidationIssue::EndNotAfterStart),
        (Some(_), Some(_)) => {}
        _ => issues.push(ValidationIssue::MissingTime),
    }
    issues
}

fn into_result(issues: Vec<ValidationIssue>) -> Result<(), Vec<ValidationIssue>> {
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
