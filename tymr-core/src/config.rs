//! Scheduler configuration.
//!
//! Loaded from `~/.config/tymr/config.toml` when present, with `TYMR_*`
//! environment variables layered on top. Every field has a default, so a
//! missing file is not an error.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TymrError, TymrResult};
use crate::recurrence::{ExpandOptions, MonthlyOverflow};
use crate::suggest::{MAX_SUGGESTIONS, SuggestOptions, WorkWindow};
use crate::time::{AUTO_CORRECT_MINUTES, MinuteOfDay};

static ENV_PREFIX: &str = "TYMR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Start of the working window used for suggestions
    pub work_start: MinuteOfDay,
    /// End of the working window (exclusive)
    pub work_end: MinuteOfDay,
    pub max_suggestions: usize,
    /// Length in minutes used when only a start time is given
    pub default_duration: u16,
    pub monthly_overflow: MonthlyOverflow,
    /// `tracing` filter directive, e.g. `warn` or `tymr_core=debug`
    pub log_level: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let window = WorkWindow::default();
        SchedulerConfig {
            work_start: window.start,
            work_end: window.end,
            max_suggestions: MAX_SUGGESTIONS,
            default_duration: AUTO_CORRECT_MINUTES,
            monthly_overflow: MonthlyOverflow::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl SchedulerConfig {
    pub fn config_path() -> TymrResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TymrError::Config("Could not determine config directory".into()))?
            .join("tymr");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path. A missing file yields the defaults.
    pub fn load() -> TymrResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load `path` with `TYMR_*` environment variables layered on top.
    pub fn load_from(path: &Path) -> TymrResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> TymrResult<Self> {
        debug!(path = %path.display(), "Loading scheduler config");
        Self::build(
            Config::builder()
                .add_source(File::from(path).required(false))
                .add_source(env.try_parsing(true)),
        )
    }

    /// Parse a TOML document on its own, without environment overrides.
    pub fn from_toml_str(contents: &str) -> TymrResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> TymrResult<Self> {
        let config: SchedulerConfig = builder
            .build()
            .map_err(|e| TymrError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TymrError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TymrResult<()> {
        if self.work_start >= self.work_end {
            return Err(TymrError::Config(format!(
                "work_start ({}) must be before work_end ({})",
                self.work_start, self.work_end
            )));
        }
        if self.max_suggestions == 0 {
            return Err(TymrError::Config("max_suggestions must be at least 1".into()));
        }
        if self.default_duration == 0 {
            return Err(TymrError::Config("default_duration must be at least 1 minute".into()));
        }
        Ok(())
    }

    pub fn work_window(&self) -> WorkWindow {
        WorkWindow::new(self.work_start, self.work_end).unwrap_or_default()
    }

    pub fn suggest_options(&self) -> SuggestOptions {
        SuggestOptions {
            window: self.work_window(),
            limit: self.max_suggestions,
        }
    }

    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            overflow: self.monthly_overflow,
        }
    }

    /// Commented-out config file listing every option with its default.
    pub fn template() -> String {
        let defaults = SchedulerConfig::default();
        format!(
            "\
# tymr configuration

# Working hours used for free slot suggestions:
# work_start = \"{}\"
# work_end = \"{}\"

# How many free slots to suggest:
# max_suggestions = {}

# Event length in minutes when only a start time is given:
# default_duration = {}

# Monthly repeats on days missing from the target month (\"clamp\" or \"rollover\"):
# monthly_overflow = \"clamp\"

# Log filter (overridden by RUST_LOG):
# log_level = \"{}\"
",
            defaults.work_start,
            defaults.work_end,
            defaults.max_suggestions,
            defaults.default_duration,
            defaults.log_level,
        )
    }
}
