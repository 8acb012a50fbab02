//! Personal message or system notice?
//!
//! Exports mix people's messages with lines the app writes itself: the
//! encryption banner, group changes, calls, number changes. Those must not be
//! attributed to anyone. [`EventClassifier`] decides this from the entry body
//! alone, using an ordered list of named [`EventRule`]s.
//!
//! Every rule is evaluated for every body and the results are OR-ed, so rules
//! are independent of each other and adding one never changes what another
//! matches.
//!
//! Rules are phrase fragments rather than single keywords where possible: a
//! system notice counted as a message corrupts the per-sender numbers, while
//! a real message dropped only lowers them by one.

use std::fmt;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::config::StatsConfig;
use crate::error::{ChatstatError, Result};

/// Outcome of classifying an entry body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Written by a participant; counts toward the statistics
    Personal,
    /// Written by the app; excluded from the statistics
    SystemNotice,
}

impl Classification {
    pub fn is_personal(self) -> bool {
        self == Classification::Personal
    }
}

/// Name of the catalog rule for `<Media omitted>` placeholders.
///
/// It is part of the catalog but off unless
/// [`StatsConfig::skip_media_omitted`] is set.
pub const MEDIA_OMITTED_RULE: &str = "media-omitted";

/// Built-in system notice rules, in evaluation order.
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("encryption", r"Messages and calls are end-to-end encrypted\."),
    ("blocked", r"You (blocked|unblocked) this contact\."),
    ("group-created", r"created group"),
    ("added-you", r"added you"),
    ("now-admin", r"You're now an admin"),
    ("added-many", r"added .* and"),
    ("group-name", r"changed the group name"),
    ("group-icon", r"changed (this )?group.*icon"),
    ("left-or-added", r"\b(left|added)\b"),
    ("call-or-removed", r"(\bstarted a (video|voice) call\b)|(\bremoved\b)"),
    ("phone-number", r"changed their phone number"),
    ("message-timer", r"updated the message timer"),
    ("disappearing-off", r"turned off disappearing messages"),
    ("you-started-call", r"You started a call"),
    (MEDIA_OMITTED_RULE, r"<Media omitted>"),
];

/// Returns the names of all built-in rules, in evaluation order.
pub fn builtin_rule_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_RULES.iter().map(|(name, _)| *name)
}

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A named predicate over an entry body.
///
/// Most rules are case-insensitive regular expressions; [`EventRule::from_fn`]
/// accepts any pure function.
#[derive(Clone)]
pub struct EventRule {
    name: String,
    predicate: Predicate,
}

impl EventRule {
    /// Builds a case-insensitive regex rule.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidRule`] if `pattern` does not compile.
    pub fn pattern(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex: Regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ChatstatError::invalid_rule(name.clone(), e))?;

        Ok(Self {
            name,
            predicate: Arc::new(move |body| regex.is_match(body)),
        })
    }

    /// Builds a rule from an arbitrary predicate.
    pub fn from_fn<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, body: &str) -> bool {
        (self.predicate)(body)
    }
}

impl fmt::Debug for EventRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Ordered set of system-notice rules.
///
/// # Example
///
/// ```rust
/// use chatstat::parsing::{Classification, EventClassifier, EventRule};
///
/// let classifier = EventClassifier::builtin()
///     .with_rule(EventRule::from_fn("pinned", |body| body.contains("pinned a message")));
///
/// assert_eq!(classifier.classify("Alice: Hello"), Classification::Personal);
/// assert_eq!(
///     classifier.classify("Messages and calls are end-to-end encrypted."),
///     Classification::SystemNotice
/// );
/// assert_eq!(classifier.classify("Bob pinned a message"), Classification::SystemNotice);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventClassifier {
    rules: Vec<EventRule>,
}

impl EventClassifier {
    /// Creates a classifier with no rules: everything is personal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier with the built-in catalog, `media-omitted` off.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .filter(|(name, _)| *name != MEDIA_OMITTED_RULE)
            .map(|(name, pattern)| {
                EventRule::pattern(*name, pattern).expect("built-in rule patterns are valid regexes")
            })
            .collect();
        Self { rules }
    }

    /// Builds the rule list described by `config`.
    ///
    /// Starts from the built-in catalog, enables `media-omitted` if asked,
    /// removes disabled rules, then appends the extra rules.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::InvalidRule`] if an extra pattern does not
    /// compile.
    pub fn from_config(config: &StatsConfig) -> Result<Self> {
        for name in config.unknown_disabled_rules() {
            tracing::warn!(rule = name, "disabled rule does not exist; nothing was switched off");
        }

        let mut rules = Vec::with_capacity(BUILTIN_RULES.len() + config.extra_rules.len());

        for (name, pattern) in BUILTIN_RULES {
            if *name == MEDIA_OMITTED_RULE && !config.skip_media_omitted {
                continue;
            }
            if config.is_rule_disabled(name) {
                continue;
            }
            rules.push(EventRule::pattern(*name, pattern)?);
        }

        for spec in &config.extra_rules {
            rules.push(EventRule::pattern(spec.name.clone(), &spec.pattern)?);
        }

        tracing::debug!(rules = rules.len(), "built event classifier");
        Ok(Self { rules })
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: EventRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Removes every rule with the given name.
    #[must_use]
    pub fn without_rule(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name != name);
        self
    }

    /// The active rules, in evaluation order.
    pub fn rules(&self) -> &[EventRule] {
        &self.rules
    }

    /// Names of every rule that matches `body`.
    pub fn matching_rules<'s>(&'s self, body: &str) -> Vec<&'s str> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(body))
            .map(EventRule::name)
            .collect()
    }

    /// Classifies an entry body (sender prefix included).
    pub fn classify(&self, body: &str) -> Classification {
        let hits = self.rules.iter().fold(0usize, |hits, rule| {
            hits + usize::from(rule.matches(body))
        });

        if hits > 0 {
            tracing::trace!(hits, body, "system notice");
            Classification::SystemNotice
        } else {
            Classification::Personal
        }
    }
}
