mod commands;
mod input;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tymr_core::config::SchedulerConfig;
use tymr_core::search::DateRangeFilter;
use tymr_core::{MinuteOfDay, Priority, RecurringType};

#[derive(Parser)]
#[command(name = "tymr")]
#[command(about = "Browse your month, expand recurring events and find free time")]
struct Cli {
    /// JSON file holding the event list
    #[arg(short, long, global = true)]
    events: Option<PathBuf>,

    /// Print JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid
    Month {
        /// Any date in the month to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Months to move from that date (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,
    },
    /// Create an event and print every record it expands to
    Expand {
        title: String,

        /// Date of the first occurrence (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: MinuteOfDay,

        /// End time (HH:MM, defaults to start + default duration)
        #[arg(long)]
        end: Option<MinuteOfDay>,

        /// none, daily, weekly, monthly or yearly
        #[arg(short, long, default_value = "none")]
        repeat: RecurringType,

        /// Last date an occurrence may fall on (YYYY-MM-DD, defaults to one year)
        #[arg(long)]
        until: Option<NaiveDate>,

        #[arg(short, long, default_value = "medium")]
        priority: Priority,
    },
    /// Check a time range against existing events
    Check {
        #[arg(short, long)]
        date: NaiveDate,

        #[arg(short, long)]
        start: MinuteOfDay,

        /// End time (HH:MM); takes precedence over --duration
        #[arg(long)]
        end: Option<MinuteOfDay>,

        /// Length, e.g. "45" (minutes), "90min" or "1h 30m"
        #[arg(long)]
        duration: Option<String>,

        /// Id of the event being edited, so it does not clash with itself
        #[arg(long)]
        exclude: Option<u64>,
    },
    /// List free slots on a day
    Suggest {
        #[arg(short, long)]
        date: NaiveDate,

        /// Length, e.g. "45" (minutes), "90min" or "1h 30m"
        #[arg(long)]
        duration: Option<String>,
    },
    /// Search events by text, priority, date range and tags
    Search {
        /// Matched against title, description, location and tags
        query: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,

        /// all, today, this-week, this-month, upcoming or past
        #[arg(short, long, default_value = "all")]
        range: DateRangeFilter,

        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Event counts for a month
    Stats {
        /// Any date in the month (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show the config file location and available options
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SchedulerConfig::load()?;
    init_logging(&config.log_level);

    tracing::debug!(config = ?config, "Configuration loaded");

    let output = commands::Output { json: cli.json };
    let events = cli.events.as_deref();

    match cli.command {
        Commands::Month { date, shift } => commands::month::run(events, date, shift, output),
        Commands::Expand {
            title,
            date,
            start,
            end,
            repeat,
            until,
            priority,
        } => {
            let request = commands::expand::ExpandRequest {
                title,
                date,
                start,
                end,
                repeat,
                until,
                priority,
            };
            commands::expand::run(events, request, &config, output)
        }
        Commands::Check {
            date,
            start,
            end,
            duration,
            exclude,
        } => {
            let request = commands::check::CheckRequest {
                date,
                start,
                end,
                duration,
                exclude,
            };
            commands::check::run(events, request, &config, output)
        }
        Commands::Suggest { date, duration } => {
            commands::suggest::run(events, date, duration, &config, output)
        }
        Commands::Search {
            query,
            priority,
            range,
            tags,
        } => commands::search::run(events, query, priority, range, tags, output),
        Commands::Stats { date } => commands::stats::run(events, date, output),
        Commands::Config => commands::config::run(),
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
