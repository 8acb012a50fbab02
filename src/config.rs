//! Configuration for a statistics run.
//!
//! [`StatsConfig`] collects everything that changes how a transcript is read
//! and classified: the day/month convention of the timestamps, which
//! system-notice rules are active, extra rules, and an optional date window.
//! It is plain data (serde-serializable) so it can be built in code with the
//! builder methods or loaded from a JSON file.
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::{DateOrder, StatsConfig};
//!
//! let config = StatsConfig::new()
//!     .with_date_order(DateOrder::MonthFirst)
//!     .with_skip_media_omitted(true)
//!     .with_disabled_rule("left-or-added")
//!     .with_extra_rule("pinned", r"pinned a message");
//!
//! assert_eq!(config.extra_rules.len(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::filter::EntryFilter;
use crate::parsing::builtin_rule_names;

/// How the first two numbers of a `D/M/YY` timestamp are read.
///
/// Exports from the same app differ by phone locale, and the text alone
/// cannot tell `1/2/23` apart. The convention is fixed per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `1/2/23` is 1 February 2023
    #[default]
    DayFirst,

    /// `1/2/23` is 2 January 2023
    MonthFirst,
}

impl DateOrder {
    /// Returns `(day, month)` from the first and second numbers of a stamp.
    pub fn resolve(self, first: u32, second: u32) -> (u32, u32) {
        match self {
            DateOrder::DayFirst => (first, second),
            DateOrder::MonthFirst => (second, first),
        }
    }

    /// strftime pattern that renders a date back in this convention.
    pub fn display_format(self) -> &'static str {
        match self {
            DateOrder::DayFirst => "%-d/%-m/%y",
            DateOrder::MonthFirst => "%-m/%-d/%y",
        }
    }

    /// Returns all accepted names.
    pub fn all_names() -> &'static [&'static str] {
        &["day-first", "dmy", "month-first", "mdy"]
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::DayFirst => write!(f, "day-first"),
            DateOrder::MonthFirst => write!(f, "month-first"),
        }
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day-first" | "dmy" => Ok(DateOrder::DayFirst),
            "month-first" | "mdy" => Ok(DateOrder::MonthFirst),
            _ => Err(format!(
                "Unknown date order: '{}'. Expected one of: {}",
                s,
                DateOrder::all_names().join(", ")
            )),
        }
    }
}

/// A user-supplied system-notice rule: a name and a case-insensitive regex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Rule name, shown in diagnostics and used by `disabled_rules`
    pub name: String,
    /// Regular expression matched against the entry body
    pub pattern: String,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Configuration for one statistics run.
///
/// Every field has a default, so a JSON config file only needs to name the
/// fields it changes:
///
/// ```json
/// { "date_order": "month-first", "skip_media_omitted": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Day/month convention for timestamps (default: day-first)
    pub date_order: DateOrder,

    /// Treat `<Media omitted>` placeholders as system notices (default: false)
    pub skip_media_omitted: bool,

    /// Names of built-in rules to switch off
    pub disabled_rules: Vec<String>,

    /// Additional rules evaluated after the built-in catalog
    pub extra_rules: Vec<RuleSpec>,

    /// Date window applied before aggregation (default: none)
    pub filter: EntryFilter,
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the day/month convention.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Enables or disables the `media-omitted` rule.
    #[must_use]
    pub fn with_skip_media_omitted(mut self, skip: bool) -> Self {
        self.skip_media_omitted = skip;
        self
    }

    /// Switches off a built-in rule by name.
    #[must_use]
    pub fn with_disabled_rule(mut self, name: impl Into<String>) -> Self {
        self.disabled_rules.push(name.into());
        self
    }

    /// Adds a named case-insensitive pattern to the rule list.
    #[must_use]
    pub fn with_extra_rule(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.extra_rules.push(RuleSpec::new(name, pattern));
        self
    }

    /// Sets the date window.
    #[must_use]
    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns `true` if the named built-in rule is switched off.
    pub fn is_rule_disabled(&self, name: &str) -> bool {
        self.disabled_rules.iter().any(|d| d.eq_ignore_ascii_case(name))
    }

    /// Disabled rule names that match no built-in rule.
    pub fn unknown_disabled_rules(&self) -> Vec<&str> {
        self.disabled_rules
            .iter()
            .map(String::as_str)
            .filter(|d| !builtin_rule_names().any(|name| d.eq_ignore_ascii_case(name)))
            .collect()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields take their defaults.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| crate::ChatstatError::source_unavailable(path, e))?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_config_default() {
        let config = StatsConfig::default();
        assert_eq!(config.date_order, DateOrder::DayFirst);
        assert!(!config.skip_media_omitted);
        assert!(config.disabled_rules.is_empty());
        assert!(config.extra_rules.is_empty());
        assert!(!config.filter.is_active());
    }

    #[test]
    fn test_stats_config_builder() {
        let config = StatsConfig::new()
            .with_date_order(DateOrder::MonthFirst)
            .with_skip_media_omitted(true)
            .with_disabled_rule("Left-Or-Added")
            .with_extra_rule("pinned", "pinned a message");

        assert_eq!(config.date_order, DateOrder::MonthFirst);
        assert!(config.skip_media_omitted);
        assert!(config.is_rule_disabled("left-or-added"));
        assert!(!config.is_rule_disabled("encryption"));
        assert_eq!(config.extra_rules[0], RuleSpec::new("pinned", "pinned a message"));
    }

    #[test]
    fn test_unknown_disabled_rules() {
        let config = StatsConfig::new()
            .with_disabled_rule("LEFT-OR-ADDED")
            .with_disabled_rule("left-or-add")
            .with_disabled_rule("media-omitted");
        assert_eq!(config.unknown_disabled_rules(), ["left-or-add"]);
        assert!(StatsConfig::new().unknown_disabled_rules().is_empty());
    }

    #[test]
    fn test_date_order_resolve() {
        assert_eq!(DateOrder::DayFirst.resolve(1, 2), (1, 2));
        assert_eq!(DateOrder::MonthFirst.resolve(1, 2), (2, 1));
    }

    #[test]
    fn test_date_order_from_str() {
        assert_eq!("day-first".parse::<DateOrder>().unwrap(), DateOrder::DayFirst);
        assert_eq!("MDY".parse::<DateOrder>().unwrap(), DateOrder::MonthFirst);
        assert!("sideways".parse::<DateOrder>().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StatsConfig =
            serde_json::from_str(r#"{"date_order": "month-first"}"#).unwrap();
        assert_eq!(config.date_order, DateOrder::MonthFirst);
        assert!(!config.skip_media_omitted);
        assert!(config.extra_rules.is_empty());
    }

    #[test]
    fn test_filter_in_json() {
        let config: StatsConfig =
            serde_json::from_str(r#"{"filter": {"after": "2024-01-01"}}"#).unwrap();
        assert!(config.filter.is_active());
        assert!(config.filter.before.is_none());
    }
}
