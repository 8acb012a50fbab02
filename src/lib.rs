//! # Chatstat
//!
//! A Rust library for computing message statistics from exported WhatsApp
//! chat transcripts.
//!
//! ## Overview
//!
//! A transcript is a plain-text file where each entry starts with a line
//! like `1/2/23, 10:00 AM - Alice: Hello` and may continue over the
//! following lines. Chatstat splits it into entries, tells personal
//! messages apart from system notices ("Messages and calls are end-to-end
//! encrypted", "Bob left", ...), attributes each message to its sender and
//! reports:
//!
//! - the total number of personal messages
//! - a per-sender message count
//! - the most and the least active participant
//! - the dates of the first and the last entry
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let stats = analyze_str(
//!         "1/2/23, 10:00 AM - Alice: Hello\n\
//!          1/2/23, 10:05 AM - Bob: Hi there\n\
//!          1/2/23, 10:06 AM - Messages and calls are end-to-end encrypted.\n\
//!          1/2/23, 10:07 AM - Alice: How are you?",
//!         &StatsConfig::new(),
//!     )?;
//!
//!     assert_eq!(stats.total_messages, 3);
//!     assert_eq!(stats.message_count["Alice"], 2);
//!     assert_eq!(stats.least_texted.unwrap().sender, "Bob");
//!     Ok(())
//! }
//! ```
//!
//! ## Reading From Disk
//!
//! ```rust,no_run
//! use chatstat::prelude::*;
//!
//! let config = StatsConfig::new().with_date_order(DateOrder::MonthFirst);
//! let stats = analyze_file("WhatsApp Chat with Alice.txt", &config)?;
//! print!("{}", render_report(&stats, ReportFormat::Text, "%Y-%m-%d")?);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] — the line pipeline
//!   - [`parsing::entry`] — [`EntryMatcher`](parsing::EntryMatcher), [`ChatEntry`](parsing::ChatEntry)
//!   - [`parsing::classifier`] — [`EventClassifier`](parsing::EventClassifier), [`EventRule`](parsing::EventRule)
//!   - [`parsing::sender`] — [`extract_sender`](parsing::extract_sender)
//! - [`core`] — aggregation
//!   - [`core::aggregator`] — [`ChatAggregator`](core::ChatAggregator), [`aggregate`](core::aggregate)
//!   - [`core::stats`] — [`ChatStats`], [`SenderCount`](core::SenderCount)
//!   - [`core::filter`] — [`EntryFilter`](core::EntryFilter)
//! - [`analyzer`] — [`ChatAnalyzer`], [`analyze_str`], [`analyze_file`]
//! - [`config`] — [`StatsConfig`](config::StatsConfig), [`DateOrder`](config::DateOrder)
//! - [`report`] — [`ReportFormat`](report::ReportFormat), [`render_report`](report::render_report)
//! - [`source`] — reading a transcript file
//! - `cli` — clap arguments for the `chatstat` binary (`cli` feature)
//! - [`error`] — Unified error types ([`ChatstatError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod parsing;
pub mod report;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use analyzer::{ChatAnalyzer, analyze_file, analyze_str};
pub use crate::core::ChatStats;
pub use error::{ChatstatError, MalformedEntry, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatstatError, MalformedEntry, Result};

    // One-call API
    pub use crate::analyzer::{ChatAnalyzer, analyze_file, analyze_str};

    // Configuration
    pub use crate::config::{DateOrder, RuleSpec, StatsConfig};

    // Pipeline stages
    pub use crate::parsing::{
        AttributedMessage, ChatEntry, Classification, EntryMatcher, EventClassifier, EventRule,
        extract_sender,
    };

    // Aggregation
    pub use crate::core::{ChatAggregator, ChatStats, EntryFilter, SenderCount, aggregate};

    // Reports
    pub use crate::report::{ReportFormat, render_report, write_report};
}
