//! Month and year navigation for the calendar view.

use chrono::{Datelike, Months, NaiveDate};

pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Same month and day a year later (Feb 29 becomes Feb 28).
pub fn next_year(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(12)).unwrap_or(date)
}

pub fn previous_year(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(12)).unwrap_or(date)
}

/// Move by a signed number of months, e.g. from arrow-key navigation.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

pub fn is_same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Title for a month view, e.g. `June 2025`.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Long label for a selected day, e.g. `Wednesday, June 25, 2025`.
pub fn day_title(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_steps_clamp_day() {
        assert_eq!(next_month(ymd(2025, 1, 31)), ymd(2025, 2, 28));
        assert_eq!(next_month(ymd(2025, 12, 15)), ymd(2026, 1, 15));
        assert_eq!(previous_month(ymd(2025, 3, 31)), ymd(2025, 2, 28));
        assert_eq!(previous_month(ymd(2025, 1, 10)), ymd(2024, 12, 10));
    }

    #[test]
    fn year_steps() {
        assert_eq!(next_year(ymd(2024, 2, 29)), ymd(2025, 2, 28));
        assert_eq!(previous_year(ymd(2025, 6, 25)), ymd(2024, 6, 25));
    }

    #[test]
    fn shift_in_both_directions() {
        assert_eq!(shift_months(ymd(2025, 6, 25), 7), ymd(2026, 1, 25));
        assert_eq!(shift_months(ymd(2025, 6, 25), -6), ymd(2024, 12, 25));
        assert_eq!(shift_months(ymd(2025, 6, 25), 0), ymd(2025, 6, 25));
    }

    #[test]
    fn titles() {
        assert_eq!(month_title(ymd(2025, 6, 25)), "June 2025");
        assert_eq!(day_title(ymd(2025, 6, 5)), "Thursday, June 5, 2025");
        assert!(is_same_month(ymd(2025, 6, 1), ymd(2025, 6, 30)));
        assert!(!is_same_month(ymd(2025, 6, 1), ymd(2024, 6, 1)));
    }
}
