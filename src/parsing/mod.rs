//! The line classification pipeline.
//!
//! - [`entry`] - which lines start an entry, which continue one
//! - [`classifier`] - personal message or system notice
//! - [`sender`] - who wrote a personal message

pub mod classifier;
pub mod entry;
pub mod sender;

pub use classifier::{
    Classification, EventClassifier, EventRule, MEDIA_OMITTED_RULE, builtin_rule_names,
};
pub use entry::{ChatEntry, Entries, EntryMatcher, LineMatch, build_timestamp, entries};
pub use sender::{AttributedMessage, extract_sender};
