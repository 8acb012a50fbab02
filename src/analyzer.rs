//! One-call entry point for computing transcript statistics.
//!
//! # Example
//!
//! ```rust
//! use chatstat::analyzer::ChatAnalyzer;
//! use chatstat::config::StatsConfig;
//!
//! # fn main() -> chatstat::Result<()> {
//! let analyzer = ChatAnalyzer::new(StatsConfig::new())?;
//! let stats = analyzer.analyze_str(
//!     "1/2/23, 10:00 AM - Alice: Hello\n\
//!      1/2/23, 10:05 AM - Bob: Hi there\n\
//!      1/2/23, 10:06 AM - Messages and calls are end-to-end encrypted.\n\
//!      1/2/23, 10:07 AM - Alice: How are you?",
//! )?;
//!
//! assert_eq!(stats.total_messages, 3);
//! assert_eq!(stats.most_texted.unwrap().sender, "Alice");
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::config::StatsConfig;
use crate::core::{ChatStats, aggregate};
use crate::error::Result;
use crate::parsing::{Entries, EntryMatcher, EventClassifier};
use crate::source::read_transcript;

/// A configured pipeline: line matcher, classifier and date window.
///
/// Building the classifier compiles every rule once; the analyzer can then
/// be reused for any number of transcripts.
#[derive(Debug, Clone)]
pub struct ChatAnalyzer {
    config: StatsConfig,
    matcher: EntryMatcher,
    classifier: EventClassifier,
}

impl ChatAnalyzer {
    /// Builds an analyzer from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidRule`](crate::ChatstatError::InvalidRule)
    /// if an extra rule does not compile.
    pub fn new(config: StatsConfig) -> Result<Self> {
        let classifier = EventClassifier::from_config(&config)?;
        Ok(Self::with_classifier(config, classifier))
    }

    /// Builds an analyzer around a hand-assembled classifier.
    ///
    /// The rule fields of `config` are ignored.
    pub fn with_classifier(config: StatsConfig, classifier: EventClassifier) -> Self {
        Self {
            matcher: EntryMatcher::new(config.date_order),
            config,
            classifier,
        }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn classifier(&self) -> &EventClassifier {
        &self.classifier
    }

    /// Lazily splits `content` into entries without aggregating them.
    pub fn entries<'a>(&self, content: &'a str) -> Entries<std::str::Lines<'a>> {
        self.matcher.entries(content.lines())
    }

    /// Computes statistics for an in-memory transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::EmptyInput`](crate::ChatstatError::EmptyInput)
    /// if no line holds a valid entry.
    pub fn analyze_str(&self, content: &str) -> Result<ChatStats> {
        aggregate(self.entries(content), &self.classifier, &self.config.filter)
    }

    /// Reads `path` and computes its statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::SourceUnavailable`](crate::ChatstatError::SourceUnavailable)
    /// or [`ChatstatError::Utf8`](crate::ChatstatError::Utf8) if the file
    /// cannot be read, otherwise the same errors as
    /// [`analyze_str`](Self::analyze_str).
    pub fn analyze_file(&self, path: &Path) -> Result<ChatStats> {
        let content = read_transcript(path)?;
        self.analyze_str(&content)
    }
}

/// Computes statistics for `content` with a one-off analyzer.
pub fn analyze_str(content: &str, config: &StatsConfig) -> Result<ChatStats> {
    ChatAnalyzer::new(config.clone())?.analyze_str(content)
}

/// Reads `path` and computes its statistics with a one-off analyzer.
pub fn analyze_file(path: impl AsRef<Path>, config: &StatsConfig) -> Result<ChatStats> {
    ChatAnalyzer::new(config.clone())?.analyze_file(path.as_ref())
}
