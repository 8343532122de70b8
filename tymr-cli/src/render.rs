//! TUI rendering traits for tymr types.
//!
//! Extension traits that add colored terminal rendering to tymr-core types
//! using owo_colors.

use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use tymr_core::conflict::Interval;
use tymr_core::grid::{DayCell, MonthGrid, WEEKDAY_HEADERS};
use tymr_core::navigation::month_title;
use tymr_core::stats::MonthStats;
use tymr_core::{Event, Priority};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Priority {
    fn render(&self) -> String {
        match self {
            Priority::Low => "↓".green().to_string(),
            Priority::Medium => "→".yellow().to_string(),
            Priority::High => "↑".red().to_string(),
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!(
            "{} {} {} {}",
            self.priority.render(),
            self.date.to_string().dimmed(),
            self.render_time_range().cyan(),
            self.title.bold()
        );
        if !self.location.is_empty() {
            line.push_str(&format!(" @ {}", self.location).dimmed().to_string());
        }
        line.push_str(&format!(" #{}", self.id).dimmed().to_string());
        line
    }
}

impl Render for Interval {
    fn render(&self) -> String {
        format!(
            "{}-{} {}",
            self.start,
            self.end,
            format!("({} - {})", self.start.format_12h(), self.end.format_12h()).dimmed()
        )
    }
}

impl Render for MonthStats {
    fn render(&self) -> String {
        format!(
            "{} {}\n   {} high  {} medium  {} low  {} recurring",
            self.total.bold(),
            pluralize("event", self.total),
            self.high.red(),
            self.medium.yellow(),
            self.low.green(),
            self.recurring
        )
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn render_cell(cell: &DayCell, count: usize, today: NaiveDate) -> String {
    let day = format!("{:>3}", cell.date.day());
    let marker = if count > 0 { "•" } else { " " };

    let day = if cell.is_today(today) {
        day.reversed().to_string()
    } else if !cell.in_current_month {
        day.dimmed().to_string()
    } else if cell.is_past(today) {
        day.bright_black().to_string()
    } else {
        day
    };
    format!("{}{}", day, marker.cyan())
}

/// Month grid with ISO week numbers in the left column.
pub fn render_month(grid: &MonthGrid, counts: &[usize], today: NaiveDate) -> String {
    let mut lines = Vec::new();

    let title = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .map(month_title)
        .unwrap_or_default();
    lines.push(format!("     {}", title.bold()));

    let headers: Vec<String> = WEEKDAY_HEADERS
        .iter()
        .map(|weekday| format!("{:>4}", &weekday.to_string()[..2]))
        .collect();
    lines.push(format!(" {}{}", "Wk".dimmed(), headers.join("").dimmed()));

    for ((week, number), row_counts) in grid
        .weeks()
        .zip(grid.week_numbers())
        .zip(counts.chunks(7))
    {
        let cells: Vec<String> = week
            .iter()
            .zip(row_counts)
            .map(|(cell, count)| render_cell(cell, *count, today))
            .collect();
        lines.push(format!(" {}{}", format!("{:>2}", number).dimmed(), cells.join("")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 0), "events");
        assert_eq!(pluralize("slot", 3), "slots");
    }

    #[test]
    fn month_has_header_and_six_rows() {
        let june = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let grid = MonthGrid::new(june);
        let rendered = render_month(&grid, &[0; 42], june);

        assert_eq!(rendered.lines().count(), 8);
        assert!(rendered.contains("June 2025"));
    }
}
