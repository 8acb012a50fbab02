//! Restrict a run to a date window.
//!
//! This module provides [`EntryFilter`], an inclusive calendar-date window
//! applied to chat entries before they reach the aggregator. Entries outside
//! the window are skipped entirely: they are not counted and do not move the
//! start or last date.
//!
//! # Examples
//!
//! ```
//! use chatstat::core::filter::EntryFilter;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatstat::Result<()> {
//! let filter = EntryFilter::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! assert!(filter.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
//! assert!(!filter.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ChatstatError;
use crate::parsing::ChatEntry;

/// Inclusive date window for chat entries.
///
/// Both bounds are optional; an empty filter lets everything through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Include only entries on or after this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<NaiveDate>,

    /// Include only entries on or before this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<NaiveDate>,
}

impl EntryFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatstatError> {
        self.after = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatstatError> {
        self.before = Some(parse_filter_date(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Returns `true` if any bound is set.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.after.is_some_and(|after| date < after) {
            return false;
        }
        if self.before.is_some_and(|before| date > before) {
            return false;
        }
        true
    }

    /// Returns `true` if the entry's calendar date falls inside the window.
    pub fn matches(&self, entry: &ChatEntry) -> bool {
        self.contains(entry.date())
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate, ChatstatError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatstatError::invalid_date(date_str))
}
