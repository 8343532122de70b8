//! Search and filtering over an event collection.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TymrError;
use crate::event::{Event, Priority};
use crate::navigation::is_same_month;

/// Date window relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRangeFilter {
    #[default]
    All,
    Today,
    /// Sunday through Saturday of the current week
    ThisWeek,
    ThisMonth,
    /// Today and later
    Upcoming,
    /// Before today
    Past,
}

impl DateRangeFilter {
    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateRangeFilter::All => true,
            DateRangeFilter::Today => date == today,
            DateRangeFilter::ThisWeek => {
                let (start, end) = week_bounds(today);
                start <= date && date <= end
            }
            DateRangeFilter::ThisMonth => is_same_month(date, today),
            DateRangeFilter::Upcoming => date >= today,
            DateRangeFilter::Past => date < today,
        }
    }
}

impl FromStr for DateRangeFilter {
    type Err = TymrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "all" => Ok(DateRangeFilter::All),
            "today" => Ok(DateRangeFilter::Today),
            "thisweek" | "week" => Ok(DateRangeFilter::ThisWeek),
            "thismonth" | "month" => Ok(DateRangeFilter::ThisMonth),
            "upcoming" => Ok(DateRangeFilter::Upcoming),
            "past" => Ok(DateRangeFilter::Past),
            _ => Err(TymrError::InvalidValue {
                field: "date range",
                value: s.to_string(),
            }),
        }
    }
}

/// Sunday and Saturday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_sunday = u64::from(date.weekday().num_days_from_sunday());
    let start = date.checked_sub_days(Days::new(from_sunday)).unwrap_or(date);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(date);
    (start, end)
}

/// Combined search criteria. Empty strings and `None` match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Matched against title, description, location and tags
    pub query: String,
    pub priority: Option<Priority>,
    pub range: DateRangeFilter,
    /// Matched against tags only
    pub tags: String,
}

impl EventFilter {
    /// True when any criterion is set.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.priority.is_some()
            || self.range != DateRangeFilter::All
            || !self.tags.trim().is_empty()
    }

    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() {
            let found = [&event.title, &event.description, &event.location, &event.tags]
                .iter()
                .any(|field| field.to_lowercase().contains(&query));
            if !found {
                return false;
            }
        }

        if self.priority.is_some_and(|priority| priority != event.priority) {
            return false;
        }

        if !self.range.matches(event.date, today) {
            return false;
        }

        let tags = self.tags.trim().to_lowercase();
        tags.is_empty() || event.tags.to_lowercase().contains(&tags)
    }

    pub fn apply<'a>(&self, events: &'a [Event], today: NaiveDate) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e, today)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use crate::time::MinuteOfDay;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: u64, title: &str, date: NaiveDate) -> Event {
        Event::new(
            EventId(id),
            title,
            date,
            MinuteOfDay::from_hm(9, 0).unwrap(),
            MinuteOfDay::from_hm(10, 0).unwrap(),
        )
    }

    fn sample() -> Vec<Event> {
        let mut planning = event(1, "Sprint planning", ymd(2025, 6, 23));
        planning.tags = "work, Planning".to_string();
        planning.priority = Priority::High;

        let mut dentist = event(2, "Dentist", ymd(2025, 6, 25));
        dentist.location = "Main Street Clinic".to_string();
        dentist.priority = Priority::Low;

        let mut retro = event(3, "Retro", ymd(2025, 7, 2));
        retro.description = "Planning review".to_string();

        vec![planning, dentist, retro, event(4, "Old sync", ymd(2025, 5, 30))]
    }

    fn ids(found: Vec<&Event>) -> Vec<u64> {
        found.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn empty_filter_matches_all() {
        let filter = EventFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&sample(), ymd(2025, 6, 25)).len(), 4);
    }

    #[test]
    fn query_searches_text_fields_case_insensitively() {
        let events = sample();
        let today = ymd(2025, 6, 25);

        let filter = EventFilter { query: "PLANNING".into(), ..Default::default() };
        assert!(filter.is_active());
        assert_eq!(ids(filter.apply(&events, today)), vec![1, 3]);

        let filter = EventFilter { query: "clinic".into(), ..Default::default() };
        assert_eq!(ids(filter.apply(&events, today)), vec![2]);
    }

    #[test]
    fn priority_and_tags() {
        let events = sample();
        let today = ymd(2025, 6, 25);

        let filter = EventFilter { priority: Some(Priority::Medium), ..Default::default() };
        assert_eq!(ids(filter.apply(&events, today)), vec![3, 4]);

        let filter = EventFilter { tags: "work".into(), ..Default::default() };
        assert_eq!(ids(filter.apply(&events, today)), vec![1]);
    }

    #[test]
    fn date_ranges() {
        let events = sample();
        let today = ymd(2025, 6, 25);
        let with_range = |range| EventFilter { range, ..Default::default() };

        assert_eq!(ids(with_range(DateRangeFilter::Today).apply(&events, today)), vec![2]);
        assert_eq!(ids(with_range(DateRangeFilter::ThisWeek).apply(&events, today)), vec![1, 2]);
        assert_eq!(ids(with_range(DateRangeFilter::ThisMonth).apply(&events, today)), vec![1, 2]);
        assert_eq!(ids(with_range(DateRangeFilter::Upcoming).apply(&events, today)), vec![2, 3]);
        assert_eq!(ids(with_range(DateRangeFilter::Past).apply(&events, today)), vec![1, 4]);
    }

    #[test]
    fn week_runs_sunday_to_saturday() {
        assert_eq!(week_bounds(ymd(2025, 6, 25)), (ymd(2025, 6, 22), ymd(2025, 6, 28)));
        assert_eq!(week_bounds(ymd(2025, 6, 22)), (ymd(2025, 6, 22), ymd(2025, 6, 28)));
    }

    #[test]
    fn parse_range_names() {
        assert_eq!("thisWeek".parse::<DateRangeFilter>().unwrap(), DateRangeFilter::ThisWeek);
        assert_eq!("this-month".parse::<DateRangeFilter>().unwrap(), DateRangeFilter::ThisMonth);
        assert!("someday".parse::<DateRangeFilter>().is_err());
    }
}
