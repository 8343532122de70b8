//! In-memory event collection.
//!
//! Owns the events, allocates ids and expands recurring events when they
//! are added. Generated instances are independent records: updating or
//! removing one never touches the rest of its series.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::conflict::{self, Candidate, Interval};
use crate::error::{TymrError, TymrResult};
use crate::event::{Event, EventDraft, EventId};
use crate::grid;
use crate::recurrence::{self, ExpandOptions, MAX_INSTANCES};
use crate::suggest::{self, SuggestOptions};
use crate::validation;

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    events: Vec<Event>,
    expand: ExpandOptions,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(expand: ExpandOptions) -> Self {
        Schedule {
            events: Vec::new(),
            expand,
        }
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        Schedule {
            events,
            expand: ExpandOptions::default(),
        }
    }

    /// Parse a JSON array of events.
    pub fn from_json(json: &str) -> TymrResult<Self> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        Ok(Self::from_events(events))
    }

    pub fn to_json(&self) -> TymrResult<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    pub fn set_expand_options(&mut self, expand: ExpandOptions) {
        self.expand = expand;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// First id above every id in use, so a new series cannot collide with
    /// existing ones.
    pub fn next_id(&self) -> TymrResult<EventId> {
        match self.events.iter().map(|e| e.id).max() {
            None => Ok(EventId(1)),
            Some(max) => max.nth(1).ok_or(TymrError::IdsExhausted(max)),
        }
    }

    /// Validate and store a new event, expanding it if it repeats.
    ///
    /// Returns the ids of every stored record, base first. A series longer
    /// than [`MAX_INSTANCES`] is rejected and nothing is stored.
    pub fn add(&mut self, draft: EventDraft, now: NaiveDateTime) -> TymrResult<Vec<EventId>> {
        validation::validate_new(&draft, now).map_err(TymrError::Validation)?;

        let base = draft.into_event(self.next_id()?);
        let series = if base.repeats() {
            recurrence::expand_limited(&base, &self.expand, MAX_INSTANCES)?
        } else {
            vec![base]
        };

        let ids: Vec<EventId> = series.iter().map(|e| e.id).collect();
        info!(
            title = %series[0].title,
            date = %series[0].date,
            instances = ids.len(),
            "Added event"
        );
        self.events.extend(series);
        Ok(ids)
    }

    /// Replace one stored event with the draft's fields, keeping its id.
    pub fn update(&mut self, id: EventId, draft: EventDraft) -> TymrResult<&Event> {
        validation::validate_edit(&draft).map_err(TymrError::Validation)?;

        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(TymrError::EventNotFound(id))?;
        *slot = draft.apply_to(slot);

        debug!(%id, "Updated event");
        Ok(slot)
    }

    pub fn remove(&mut self, id: EventId) -> TymrResult<Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(TymrError::EventNotFound(id))?;

        debug!(%id, "Removed event");
        Ok(self.events.remove(index))
    }

    /// Events on `date`, ordered by start time.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Event> {
        grid::events_on(date, &self.events)
    }

    pub fn conflicts_for(&self, candidate: &Candidate, exclude: Option<EventId>) -> Vec<&Event> {
        conflict::conflicts(candidate, &self.events, exclude)
    }

    /// Free slots for a clashing candidate; empty when it does not clash.
    pub fn suggestions_for(
        &self,
        candidate: &Candidate,
        exclude: Option<EventId>,
        options: &SuggestOptions,
    ) -> Vec<Interval> {
        suggest::suggest_for(candidate, &self.events, exclude, options)
    }
}
