//! Event types.
//!
//! An [`Event`] is a single dated occurrence with an optional time-of-day
//! interval. Recurring series are stored as independent instances that point
//! back at their base event through `recurring_parent_id`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::conflict::Interval;
use crate::error::{TymrError, TymrResult};
use crate::time::{MinuteOfDay, deserialize_optional_time};

/// Stable identifier of one event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    /// Id of the `n`-th generated instance of a series rooted at `self`, or
    /// `None` once the id space is used up.
    pub fn nth(self, n: u64) -> Option<EventId> {
        self.0.checked_add(n).map(EventId)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TymrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(TymrError::InvalidValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// How a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurringType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringType::None => "none",
            RecurringType::Daily => "daily",
            RecurringType::Weekly => "weekly",
            RecurringType::Monthly => "monthly",
            RecurringType::Yearly => "yearly",
        }
    }

    /// Like `from_str`, but anything unrecognized means "does not repeat".
    pub fn from_name_lenient(s: &str) -> Self {
        s.parse().unwrap_or(RecurringType::None)
    }
}

impl fmt::Display for RecurringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurringType {
    type Err = TymrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RecurringType::None),
            "daily" => Ok(RecurringType::Daily),
            "weekly" => Ok(RecurringType::Weekly),
            "monthly" => Ok(RecurringType::Monthly),
            "yearly" => Ok(RecurringType::Yearly),
            _ => Err(TymrError::InvalidValue {
                field: "recurrence",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for RecurringType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecurringType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RecurringType::from_name_lenient(&s))
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> TymrResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TymrError::InvalidDate(s.to_string()))
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Free-form tag text, e.g. `"work, planning"`.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub priority: Priority,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub start_time: Option<MinuteOfDay>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub end_time: Option<MinuteOfDay>,

    // Recurrence fields
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_type: RecurringType,
    /// Last date a generated instance may fall on (inclusive)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub recurring_end: Option<NaiveDate>,
    /// Base event of the series; only set on generated instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_parent_id: Option<EventId>,
}

impl Event {
    /// A medium-priority, non-recurring event with no extra metadata.
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        date: NaiveDate,
        start_time: MinuteOfDay,
        end_time: MinuteOfDay,
    ) -> Self {
        Event {
            id,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            tags: String::new(),
            priority: Priority::default(),
            date,
            start_time: Some(start_time),
            end_time: Some(end_time),
            is_recurring: false,
            recurring_type: RecurringType::None,
            recurring_end: None,
            recurring_parent_id: None,
        }
    }

    /// The event's time interval, if both ends are set.
    pub fn interval(&self) -> Option<Interval> {
        Some(Interval::new(self.start_time?, self.end_time?))
    }

    /// Duration in minutes, if both ends are set and ordered.
    pub fn duration(&self) -> Option<u16> {
        self.interval()
            .filter(|interval| !interval.is_empty())
            .map(|interval| interval.duration())
    }

    /// True when this event repeats and should be expanded.
    pub fn repeats(&self) -> bool {
        self.is_recurring && self.recurring_type != RecurringType::None
    }

    /// True for instances generated from a recurring base event.
    pub fn is_generated(&self) -> bool {
        self.recurring_parent_id.is_some()
    }

    /// Human-readable time range, e.g. `09:00-10:00`.
    pub fn render_time_range(&self) -> String {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => format!("{start}-{end}"),
            (Some(start), None) => format!("{start}-"),
            (None, Some(end)) => format!("-{end}"),
            (None, None) => "all day".to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Event fields as submitted by a form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub priority: Priority,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub start_time: Option<MinuteOfDay>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub end_time: Option<MinuteOfDay>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_type: RecurringType,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub recurring_end: Option<NaiveDate>,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: MinuteOfDay,
        end_time: MinuteOfDay,
    ) -> Self {
        EventDraft {
            title: title.into(),
            description: String::new(),
            location: String::new(),
            tags: String::new(),
            priority: Priority::default(),
            date,
            start_time: Some(start_time),
            end_time: Some(end_time),
            is_recurring: false,
            recurring_type: RecurringType::None,
            recurring_end: None,
        }
    }

    /// Mark the draft as repeating. `RecurringType::None` clears it.
    pub fn repeating(mut self, kind: RecurringType, until: Option<NaiveDate>) -> Self {
        self.is_recurring = kind != RecurringType::None;
        self.recurring_type = kind;
        self.recurring_end = until;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            location: self.location,
            tags: self.tags,
            priority: self.priority,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            is_recurring: self.is_recurring,
            recurring_type: self.recurring_type,
            recurring_end: self.recurring_end,
            recurring_parent_id: None,
        }
    }

    /// Copy the draft's fields over an existing event, keeping its id and
    /// series link.
    pub fn apply_to(self, event: &Event) -> Event {
        Event {
            recurring_parent_id: event.recurring_parent_id,
            ..self.into_event(event.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_dashboard_json() {
        let json = r#"{
            "id": 1750000000000,
            "title": "Standup",
            "description": "",
            "location": "Room 4",
            "tags": "work",
            "priority": "high",
            "date": "2025-06-25",
            "startTime": "09:00",
            "endTime": "09:15",
            "isRecurring": true,
            "recurringType": "weekly",
            "recurringEnd": ""
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, EventId(1_750_000_000_000));
        assert_eq!(event.priority, Priority::High);
        assert_eq!(event.start_time, Some(MinuteOfDay::from_hm(9, 0).unwrap()));
        assert_eq!(event.duration(), Some(15));
        assert_eq!(event.recurring_type, RecurringType::Weekly);
        assert_eq!(event.recurring_end, None);
        assert!(event.repeats());
        assert!(!event.is_generated());
    }

    #[test]
    fn unknown_recurrence_is_none() {
        let json = r#"{"id": 7, "title": "x", "date": "2025-06-25", "recurringType": "fortnightly"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.recurring_type, RecurringType::None);
        assert!(!event.repeats());
        assert_eq!(event.priority, Priority::Medium);
    }

    #[test]
    fn missing_times_have_no_interval() {
        let json = r#"{"id": 7, "title": "x", "date": "2025-06-25", "startTime": "10:00", "endTime": ""}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.start_time, MinuteOfDay::from_hm(10, 0));
        assert!(event.interval().is_none());
        assert!(event.duration().is_none());
        assert_eq!(event.render_time_range(), "10:00-");
    }

    #[test]
    fn strict_parsers_reject_unknown_names() {
        assert!("urgent".parse::<Priority>().is_err());
        assert!("hourly".parse::<RecurringType>().is_err());
        assert_eq!("Weekly".parse::<RecurringType>().unwrap(), RecurringType::Weekly);
    }

    #[test]
    fn apply_draft_keeps_identity() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let nine = MinuteOfDay::from_hm(9, 0).unwrap();
        let ten = MinuteOfDay::from_hm(10, 0).unwrap();

        let mut original = Event::new(EventId(5), "Old", date, nine, ten);
        original.recurring_parent_id = Some(EventId(4));

        let updated = EventDraft::new("  New  ", date, nine, ten).apply_to(&original);
        assert_eq!(updated.id, EventId(5));
        assert_eq!(updated.recurring_parent_id, Some(EventId(4)));
        assert_eq!(updated.title, "New");
    }
}
