//! Recurring event expansion.
//!
//! A recurring base event is materialized into a finite, ordered series of
//! independent instances. Each instance copies the base event and gets its
//! own date, a deterministic id and a link back to the base.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{TymrError, TymrResult};
use crate::event::{Event, RecurringType};

/// Most generated instances [`Schedule`](crate::schedule::Schedule) stores
/// for one series (ten years of daily events).
pub const MAX_INSTANCES: usize = 366 * 10;

/// What a monthly or yearly step does when the anchor day does not exist in
/// the target month (Jan 31 + 1 month, Feb 29 + 1 year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyOverflow {
    /// Use the last day of the target month. Steps are counted from the base
    /// date, so Jan 31 gives Feb 28, Mar 31, Apr 30, ...
    #[default]
    Clamp,
    /// Spill the extra days into the following month and keep stepping from
    /// there, so Jan 31 gives Mar 3, Apr 3, May 3, ... The default one-year
    /// bound spills the same way (Feb 29 gives Mar 1).
    Rollover,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandOptions {
    pub overflow: MonthlyOverflow,
}

/// Last date an instance of `base` may fall on.
///
/// `recurring_end` when given, otherwise one year after the base date,
/// resolved with the same overflow policy as the yearly steps.
pub fn end_bound(base: &Event, options: &ExpandOptions) -> NaiveDate {
    base.recurring_end.unwrap_or_else(|| {
        let year_later = match options.overflow {
            MonthlyOverflow::Clamp => base.date.checked_add_months(Months::new(12)),
            MonthlyOverflow::Rollover => rollover_add_months(base.date, 12),
        };
        year_later.unwrap_or(NaiveDate::MAX)
    })
}

/// Dates of the generated instances of a series, excluding the base date.
///
/// Lazy, strictly increasing, and bounded by [`end_bound`].
pub struct Occurrences {
    anchor: NaiveDate,
    kind: RecurringType,
    overflow: MonthlyOverflow,
    until: NaiveDate,
    current: NaiveDate,
    steps: u32,
    done: bool,
}

impl Occurrences {
    pub fn new(base: &Event, options: &ExpandOptions) -> Self {
        Occurrences {
            anchor: base.date,
            kind: base.recurring_type,
            overflow: options.overflow,
            until: end_bound(base, options),
            current: base.date,
            steps: 0,
            done: base.recurring_type == RecurringType::None,
        }
    }

    fn add_months(&self, months: u32) -> Option<NaiveDate> {
        match self.overflow {
            MonthlyOverflow::Clamp => self
                .anchor
                .checked_add_months(Months::new(self.steps.checked_mul(months)?)),
            MonthlyOverflow::Rollover => rollover_add_months(self.current, months),
        }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.done {
            return None;
        }

        let Some(steps) = self.steps.checked_add(1) else {
            self.done = true;
            return None;
        };
        self.steps = steps;
        let next = match self.kind {
            RecurringType::None => None,
            RecurringType::Daily => self.current.checked_add_days(Days::new(1)),
            RecurringType::Weekly => self.current.checked_add_days(Days::new(7)),
            RecurringType::Monthly => self.add_months(1),
            RecurringType::Yearly => self.add_months(12),
        };

        match next {
            Some(date) if date <= self.until => {
                self.current = date;
                Some(date)
            }
            _ => {
                self.done = true;
                None
            }
        }
    }
}

/// Add calendar months keeping the day number, letting days past the end of
/// the target month carry into the next one.
fn rollover_add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = date.year() * 12 + date.month0() as i32 + i32::try_from(months).ok()?;
    let first = NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day0())))
}

fn instance(base: &Event, n: u64, date: NaiveDate) -> Option<Event> {
    Some(Event {
        id: base.id.nth(n)?,
        date,
        recurring_parent_id: Some(base.id),
        ..base.clone()
    })
}

/// Expand `base` into its full series using the default overflow policy.
///
/// The first element is always `base` itself. Non-repeating events (and
/// unrecognized recurrence kinds, which deserialize as `none`) yield a
/// one-element series.
pub fn expand(base: &Event) -> Vec<Event> {
    expand_with(base, &ExpandOptions::default())
}

/// The series ends early, with a warning, only if the base id leaves no room
/// for the remaining instance ids.
pub fn expand_with(base: &Event, options: &ExpandOptions) -> Vec<Event> {
    let mut series = vec![base.clone()];
    for (n, date) in (1u64..).zip(Occurrences::new(base, options)) {
        let Some(event) = instance(base, n, date) else {
            warn!(base_id = %base.id, %date, "Recurrence stopped, no ids left");
            break;
        };
        series.push(event);
    }

    debug!(
        base_id = %base.id,
        kind = %base.recurring_type,
        instances = series.len(),
        "Expanded recurring event"
    );
    series
}

/// [`expand_with`] for callers that store the series.
///
/// Fails instead of returning a shortened series when it would need more
/// than `limit` generated instances or run out of ids.
pub fn expand_limited(base: &Event, options: &ExpandOptions, limit: usize) -> TymrResult<Vec<Event>> {
    let mut series = vec![base.clone()];
    for (n, date) in (1u64..).zip(Occurrences::new(base, options)) {
        if series.len() > limit {
            return Err(TymrError::SeriesTooLong {
                limit,
                until: end_bound(base, options),
            });
        }
        series.push(instance(base, n, date).ok_or(TymrError::IdsExhausted(base.id))?);
    }
    Ok(series)
}

/// Only the members of the series dated within `[from, to]`.
///
/// Instances past `to` are never generated. Ids match what [`expand_with`]
/// would assign.
pub fn expand_within(
    base: &Event,
    from: NaiveDate,
    to: NaiveDate,
    options: &ExpandOptions,
) -> Vec<Event> {
    let mut visible = Vec::new();
    if (from..=to).contains(&base.date) {
        visible.push(base.clone());
    }
    visible.extend(
        (1u64..)
            .zip(Occurrences::new(base, options))
            .take_while(|(_, date)| *date <= to)
            .map_while(|(n, date)| instance(base, n, date))
            .filter(|event| event.date >= from),
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use crate::time::MinuteOfDay;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base(date: NaiveDate, kind: RecurringType, until: Option<NaiveDate>) -> Event {
        let mut event = Event::new(
            EventId(1000),
            "Review",
            date,
            MinuteOfDay::from_hm(9, 0).unwrap(),
            MinuteOfDay::from_hm(10, 0).unwrap(),
        );
        event.is_recurring = kind != RecurringType::None;
        event.recurring_type = kind;
        event.recurring_end = until;
        event
    }

    fn dates(series: &[Event]) -> Vec<NaiveDate> {
        series.iter().map(|e| e.date).collect()
    }

    #[test_log::test]
    fn weekly_without_end_covers_one_year() {
        let start = base(ymd(2025, 6, 25), RecurringType::Weekly, None);
        let series = expand(&start);

        assert_eq!(series[0], start);
        assert_eq!(series.len(), 53);
        assert_eq!(series.last().unwrap().date, ymd(2026, 6, 24));
        assert!(series.windows(2).all(|w| (w[1].date - w[0].date).num_days() == 7));
        assert!(series.iter().all(|e| e.date.weekday() == Weekday::Wed));
    }

    #[test]
    fn instances_copy_base_and_link_back() {
        let start = base(ymd(2025, 6, 25), RecurringType::Daily, Some(ymd(2025, 6, 28)));
        let series = expand(&start);

        assert_eq!(dates(&series), vec![ymd(2025, 6, 25), ymd(2025, 6, 26), ymd(2025, 6, 27), ymd(2025, 6, 28)]);
        let ids: Vec<_> = series.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EventId(1000), EventId(1001), EventId(1002), EventId(1003)]);

        assert_eq!(series[0].recurring_parent_id, None);
        for instance in &series[1..] {
            assert_eq!(instance.recurring_parent_id, Some(EventId(1000)));
            assert_eq!(instance.title, start.title);
            assert_eq!(instance.start_time, start.start_time);
            assert_eq!(instance.end_time, start.end_time);
            assert_eq!(instance.priority, start.priority);
        }
    }

    #[test]
    fn non_repeating_is_singleton() {
        let single = base(ymd(2025, 6, 25), RecurringType::None, None);
        assert_eq!(expand(&single), vec![single]);
    }

    #[test]
    fn end_before_start_is_singleton() {
        let start = base(ymd(2025, 6, 25), RecurringType::Daily, Some(ymd(2025, 6, 1)));
        assert_eq!(expand(&start).len(), 1);
    }

    #[test]
    fn end_date_is_inclusive() {
        let start = base(ymd(2025, 6, 25), RecurringType::Weekly, Some(ymd(2025, 7, 9)));
        assert_eq!(dates(&expand(&start)), vec![ymd(2025, 6, 25), ymd(2025, 7, 2), ymd(2025, 7, 9)]);
    }

    #[test]
    fn monthly_clamps_to_month_end_without_drift() {
        let start = base(ymd(2025, 1, 31), RecurringType::Monthly, Some(ymd(2025, 5, 31)));
        assert_eq!(
            dates(&expand(&start)),
            vec![ymd(2025, 1, 31), ymd(2025, 2, 28), ymd(2025, 3, 31), ymd(2025, 4, 30), ymd(2025, 5, 31)]
        );
    }

    #[test]
    fn monthly_rollover_spills_into_next_month() {
        let start = base(ymd(2025, 1, 31), RecurringType::Monthly, Some(ymd(2025, 5, 31)));
        let options = ExpandOptions { overflow: MonthlyOverflow::Rollover };
        assert_eq!(
            dates(&expand_with(&start, &options)),
            vec![ymd(2025, 1, 31), ymd(2025, 3, 3), ymd(2025, 4, 3), ymd(2025, 5, 3)]
        );
    }

    #[test]
    fn yearly_from_leap_day() {
        let start = base(ymd(2024, 2, 29), RecurringType::Yearly, Some(ymd(2028, 12, 31)));
        assert_eq!(
            dates(&expand(&start)),
            vec![ymd(2024, 2, 29), ymd(2025, 2, 28), ymd(2026, 2, 28), ymd(2027, 2, 28), ymd(2028, 2, 29)]
        );

        let options = ExpandOptions { overflow: MonthlyOverflow::Rollover };
        assert_eq!(expand_with(&start, &options)[1].date, ymd(2025, 3, 1));
    }

    #[test]
    fn default_bound_from_leap_day_follows_overflow() {
        let start = base(ymd(2024, 2, 29), RecurringType::Daily, None);
        assert_eq!(end_bound(&start, &ExpandOptions::default()), ymd(2025, 2, 28));
        assert_eq!(expand(&start).last().unwrap().date, ymd(2025, 2, 28));

        let options = ExpandOptions { overflow: MonthlyOverflow::Rollover };
        assert_eq!(end_bound(&start, &options), ymd(2025, 3, 1));
        assert_eq!(expand_with(&start, &options).last().unwrap().date, ymd(2025, 3, 1));
    }

    #[test]
    fn long_series_reaches_end_date() {
        let until = ymd(2036, 6, 25);
        let start = base(ymd(2025, 6, 25), RecurringType::Daily, Some(until));
        let series = expand(&start);

        assert_eq!(series.last().unwrap().date, until);
        assert_eq!(series.len() as i64, (until - start.date).num_days() + 1);
    }

    #[test]
    fn limited_expansion_rejects_long_series() {
        let until = ymd(2036, 6, 25);
        let start = base(ymd(2025, 6, 25), RecurringType::Daily, Some(until));

        let err = expand_limited(&start, &ExpandOptions::default(), MAX_INSTANCES).unwrap_err();
        assert!(matches!(err, TymrError::SeriesTooLong { until: u, .. } if u == until));

        let short = base(ymd(2025, 6, 25), RecurringType::Weekly, None);
        assert_eq!(expand_limited(&short, &ExpandOptions::default(), MAX_INSTANCES).unwrap(), expand(&short));
        assert_eq!(expand_limited(&short, &ExpandOptions::default(), 52).unwrap().len(), 53);
        assert!(expand_limited(&short, &ExpandOptions::default(), 51).is_err());
    }

    #[test_log::test]
    fn series_stops_when_ids_run_out() {
        let mut start = base(ymd(2025, 6, 25), RecurringType::Daily, Some(ymd(2025, 6, 28)));
        start.id = EventId(u64::MAX - 1);

        let series = expand(&start);
        let ids: Vec<_> = series.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EventId(u64::MAX - 1), EventId(u64::MAX)]);
        assert_eq!(series[1].date, ymd(2025, 6, 26));

        let visible = expand_within(&start, ymd(2025, 6, 26), ymd(2025, 6, 30), &ExpandOptions::default());
        assert_eq!(visible, series[1..].to_vec());

        let err = expand_limited(&start, &ExpandOptions::default(), MAX_INSTANCES).unwrap_err();
        assert!(matches!(err, TymrError::IdsExhausted(id) if id == start.id));
    }

    #[test]
    fn windowed_expansion_is_not_limited() {
        let start = base(ymd(2025, 6, 25), RecurringType::Daily, Some(ymd(2040, 1, 1)));
        let visible = expand_within(&start, ymd(2039, 12, 30), ymd(2040, 1, 5), &ExpandOptions::default());
        assert_eq!(dates(&visible), vec![ymd(2039, 12, 30), ymd(2039, 12, 31), ymd(2040, 1, 1)]);
    }

    #[test]
    fn windowed_expansion_matches_eager_ids() {
        let start = base(ymd(2025, 6, 25), RecurringType::Weekly, None);
        let eager = expand(&start);
        let visible = expand_within(&start, ymd(2025, 8, 1), ymd(2025, 8, 31), &ExpandOptions::default());

        let expected: Vec<_> = eager
            .iter()
            .filter(|e| e.date.month() == 8 && e.date.year() == 2025)
            .cloned()
            .collect();
        assert_eq!(visible, expected);
        assert_eq!(visible.len(), 4);

        let with_base = expand_within(&start, ymd(2025, 6, 1), ymd(2025, 6, 30), &ExpandOptions::default());
        assert_eq!(with_base, vec![start]);
    }
}
