//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Format`] - Report format options
//! - [`DateOrderArg`] - Day/month convention options
//!
//! [`Args::build_config`] turns the flags into a [`StatsConfig`], so the
//! binary stays a thin shell around the library:
//!
//! ```rust
//! use chatstat::cli::Args;
//! use chatstat::config::DateOrder;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstat", "chat.txt", "--date-order", "mdy", "--skip-media"]);
//! let config = args.build_config().unwrap();
//! assert_eq!(config.date_order, DateOrder::MonthFirst);
//! assert!(config.skip_media_omitted);
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DateOrder, StatsConfig};
use crate::error::Result;
use crate::report::ReportFormat;

/// Count messages per participant in an exported WhatsApp chat.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat chat.txt
    chatstat chat.txt --date-order month-first
    chatstat chat.txt -f json -o stats.json
    chatstat chat.txt --after 2024-01-01 --skip-media
    chatstat chat.txt --disable-rule left-or-added
    chatstat --list-rules")]
pub struct Args {
    /// Path to the exported chat (.txt)
    #[arg(required_unless_present = "list_rules")]
    pub input: Option<PathBuf>,

    /// Report format (default: from the output extension, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Whether timestamps read day/month or month/day
    #[arg(long, value_enum)]
    pub date_order: Option<DateOrderArg>,

    /// strftime pattern for dates in the text report
    #[arg(long, value_name = "FMT")]
    pub date_format: Option<String>,

    /// Only count entries on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only count entries on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Treat "<Media omitted>" placeholders as system notices
    #[arg(long)]
    pub skip_media: bool,

    /// Switch off a built-in rule (repeatable)
    #[arg(long, value_name = "NAME")]
    pub disable_rule: Vec<String>,

    /// JSON configuration file; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the active system-notice rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the run configuration: the `--config` file if given, then the
    /// flags on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or a date flag
    /// is not `YYYY-MM-DD`.
    pub fn build_config(&self) -> Result<StatsConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => StatsConfig::new(),
        };

        if let Some(order) = self.date_order {
            config = config.with_date_order(order.into());
        }
        if self.skip_media {
            config = config.with_skip_media_omitted(true);
        }
        for name in &self.disable_rule {
            config = config.with_disabled_rule(name.clone());
        }

        let mut filter = config.filter;
        if let Some(after) = &self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(before) = &self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(config.with_filter(filter))
    }

    /// Report format: `--format`, else guessed from `--output`, else text.
    pub fn report_format(&self) -> ReportFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|path| ReportFormat::from_path(path).ok())
            .unwrap_or_default()
    }

    /// Date pattern for the text report: `--date-format`, else the
    /// convention of `order`.
    pub fn date_pattern(&self, order: DateOrder) -> String {
        self.date_format
            .clone()
            .unwrap_or_else(|| order.display_format().to_string())
    }
}

#[cfg(feature = "json-output")]
fn load_config(path: &std::path::Path) -> Result<StatsConfig> {
    StatsConfig::from_json_file(path)
}

#[cfg(not(feature = "json-output"))]
fn load_config(_path: &std::path::Path) -> Result<StatsConfig> {
    Err(crate::ChatstatError::invalid_format(
        "config",
        "--config requires the 'json-output' feature to be enabled",
    ))
}

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Plain text summary
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Pretty JSON of the full statistics record
    Json,

    /// Sender;Messages rows
    Csv,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ReportFormat::from(*self))
    }
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> ReportFormat {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
            Format::Csv => ReportFormat::Csv,
        }
    }
}

/// Day/month convention options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrderArg {
    /// 1/2/23 is the 1st of February
    #[value(alias = "dmy")]
    DayFirst,

    /// 1/2/23 is the 2nd of January
    #[value(alias = "mdy")]
    MonthFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(order: DateOrderArg) -> DateOrder {
        match order {
            DateOrderArg::DayFirst => DateOrder::DayFirst,
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
        }
    }
}
