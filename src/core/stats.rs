//! The statistics record produced by one run.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A sender together with their message count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenderCount {
    pub sender: String,
    pub count: usize,
}

impl SenderCount {
    pub fn new(sender: impl Into<String>, count: usize) -> Self {
        Self {
            sender: sender.into(),
            count,
        }
    }
}

/// Aggregate statistics for a whole transcript.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `total_messages` | Personal messages counted |
/// | `message_count` | Sender → count, in first-seen order |
/// | `most_texted` / `least_texted` | Extremes of `message_count`; ties go to the sender seen first |
/// | `start_date` / `last_date` | Dates of the first and the last entry by position |
/// | `entries` | Valid entries seen, personal or not |
/// | `system_notices` | Entries classified as system notices |
/// | `malformed_entries` | Timestamp lines with an impossible date or time |
///
/// `last_date` is the date of the entry that came last in the file, not the
/// latest date, so an export with out-of-order lines reports what it ends with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStats {
    pub total_messages: usize,
    pub message_count: IndexMap<String, usize>,
    pub most_texted: Option<SenderCount>,
    pub least_texted: Option<SenderCount>,
    pub start_date: NaiveDate,
    pub last_date: NaiveDate,
    pub entries: usize,
    pub system_notices: usize,
    pub malformed_entries: usize,
}

impl ChatStats {
    /// Number of distinct senders.
    pub fn participants(&self) -> usize {
        self.message_count.len()
    }

    /// Message count for `sender`, zero if they never wrote.
    pub fn count_for(&self, sender: &str) -> usize {
        self.message_count.get(sender).copied().unwrap_or(0)
    }

    /// Percentage of all personal messages written by `sender`.
    pub fn share(&self, sender: &str) -> f64 {
        if self.total_messages == 0 {
            return 0.0;
        }
        self.count_for(sender) as f64 / self.total_messages as f64 * 100.0
    }

    /// Days between `start_date` and `last_date`.
    ///
    /// Negative if the transcript ends on an earlier date than it starts.
    pub fn span_days(&self) -> i64 {
        (self.last_date - self.start_date).num_days()
    }
}
