//! Rendering [`ChatStats`] for people and for other programs.
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::StatsConfig;
//! use chatstat::report::{ReportFormat, render_report};
//!
//! # fn main() -> chatstat::Result<()> {
//! let stats = chatstat::analyze_str(
//!     "1/2/23, 10:00 AM - Alice: Hello\n1/2/23, 10:05 AM - Bob: Hi there",
//!     &StatsConfig::new(),
//! )?;
//!
//! let text = render_report(&stats, ReportFormat::Text, "%-d/%-m/%y")?;
//! assert!(text.starts_with("Total Messages: 2\n"));
//! assert!(text.contains("Start Date: 1/2/23"));
//! # Ok(())
//! # }
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{ChatStats, SenderCount};
use crate::error::{ChatstatError, Result};

/// Shape of a statistics report.
///
/// - [`Text`](ReportFormat::Text) - one fact per line, for reading
/// - [`Json`](ReportFormat::Json) - the whole record, pretty-printed
/// - [`Csv`](ReportFormat::Csv) - `Sender;Messages` rows, for spreadsheets
///
/// # Example
///
/// ```rust
/// use chatstat::report::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("json").unwrap();
/// assert_eq!(format, ReportFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Plain text summary (default)
    #[default]
    Text,

    /// Pretty JSON of the full [`ChatStats`] record
    Json,

    /// Per-sender counts with semicolon delimiter
    Csv,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ReportFormat] {
        &[ReportFormat::Text, ReportFormat::Json, ReportFormat::Csv]
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstat::report::ReportFormat;
    ///
    /// let format = ReportFormat::from_path("stats.csv").unwrap();
    /// assert_eq!(format, ReportFormat::Csv);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "txt" | "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(ChatstatError::invalid_format(
                "report",
                format!("Unknown file extension: '.{ext}'. Expected one of: txt, json, csv"),
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
            ReportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Renders `stats` as a string.
///
/// `date_format` is a strftime pattern used for the dates of the text
/// report; JSON and CSV ignore it.
///
/// # Errors
///
/// Returns [`ChatstatError::InvalidFormat`] if `date_format` is not a valid
/// pattern or the format's feature is not enabled.
pub fn render_report(stats: &ChatStats, format: ReportFormat, date_format: &str) -> Result<String> {
    match format {
        ReportFormat::Text => render_text(stats, date_format),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
        #[cfg(feature = "csv-output")]
        ReportFormat::Csv => render_csv(stats),
        #[allow(unreachable_patterns)]
        _ => Err(ChatstatError::invalid_format(
            "report",
            format!(
                "Report format {} requires the '{}' feature to be enabled",
                format,
                match format {
                    ReportFormat::Json => "json-output",
                    _ => "csv-output",
                }
            ),
        )),
    }
}

/// Renders `stats` and writes the result to `path`, replacing any file
/// already there.
pub fn write_report(
    stats: &ChatStats,
    path: impl AsRef<Path>,
    format: ReportFormat,
    date_format: &str,
) -> Result<()> {
    let rendered = render_report(stats, format, date_format)?;
    fs::write(path.as_ref(), rendered)?;
    tracing::debug!(path = %path.as_ref().display(), %format, "wrote report");
    Ok(())
}

fn render_text(stats: &ChatStats, date_format: &str) -> Result<String> {
    check_date_format(date_format)?;

    let mut out = format!("Total Messages: {}\n", stats.total_messages);
    for (sender, count) in &stats.message_count {
        out.push_str(&format!("{sender}: {count}\n"));
    }
    out.push_str(&format!("Most Texted: {}\n", describe(stats.most_texted.as_ref())));
    out.push_str(&format!("Least Texted: {}\n", describe(stats.least_texted.as_ref())));
    out.push_str(&format!("Start Date: {}\n", render_date(stats.start_date, date_format)?));
    out.push_str(&format!("Last Date: {}\n", render_date(stats.last_date, date_format)?));
    Ok(out)
}

fn describe(extreme: Option<&SenderCount>) -> String {
    extreme.map_or_else(|| "-".to_string(), |sc| format!("{} ({})", sc.sender, sc.count))
}

/// Formats a date without going through `to_string`, which panics when the
/// pattern asks for fields a date lacks (`%H`, `%p`, `%z`).
fn render_date(date: NaiveDate, date_format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format)).map_err(|_| {
        ChatstatError::invalid_format(
            "date",
            format!("'{date_format}' is not a strftime pattern for a calendar date"),
        )
    })?;
    Ok(out)
}

/// Rejects patterns chrono cannot parse at all.
fn check_date_format(date_format: &str) -> Result<()> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(ChatstatError::invalid_format(
            "date",
            format!("'{date_format}' is not a valid strftime pattern"),
        ));
    }
    Ok(())
}

#[cfg(feature = "csv-output")]
fn render_csv(stats: &ChatStats) -> Result<String> {
    let mut bytes = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(&mut bytes);

        writer.write_record(["Sender", "Messages"])?;
        for (sender, count) in &stats.message_count {
            writer.write_record([sender.as_str(), count.to_string().as_str()])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(bytes)?)
}
