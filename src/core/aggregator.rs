//! Single-pass accumulation of chat entries into [`ChatStats`].

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::core::filter::EntryFilter;
use crate::core::stats::{ChatStats, SenderCount};
use crate::error::{ChatstatError, MalformedEntry, Result};
use crate::parsing::{ChatEntry, Classification, Entries, EventClassifier, extract_sender};

/// Running state of one statistics pass.
///
/// Feed it entries in file order with [`push`](Self::push) and
/// [`push_malformed`](Self::push_malformed), then call
/// [`finish`](Self::finish).
///
/// # Example
///
/// ```rust
/// use chatstat::core::ChatAggregator;
/// use chatstat::parsing::{ChatEntry, EventClassifier};
/// use chrono::NaiveDate;
///
/// let classifier = EventClassifier::builtin();
/// let mut aggregator = ChatAggregator::new(&classifier);
/// aggregator.push(&ChatEntry {
///     line: 1,
///     timestamp: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap().and_hms_opt(10, 0, 0).unwrap(),
///     body: "Alice: Hello".into(),
/// });
///
/// let stats = aggregator.finish(1)?;
/// assert_eq!(stats.total_messages, 1);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
#[derive(Debug)]
pub struct ChatAggregator<'c> {
    classifier: &'c EventClassifier,
    message_count: IndexMap<String, usize>,
    total_messages: usize,
    start_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
    entries: usize,
    system_notices: usize,
    malformed_entries: usize,
}

impl<'c> ChatAggregator<'c> {
    pub fn new(classifier: &'c EventClassifier) -> Self {
        Self {
            classifier,
            message_count: IndexMap::new(),
            total_messages: 0,
            start_date: None,
            last_date: None,
            entries: 0,
            system_notices: 0,
            malformed_entries: 0,
        }
    }

    /// Accounts for one entry and returns how it was classified.
    pub fn push(&mut self, entry: &ChatEntry) -> Classification {
        let date = entry.date();
        self.start_date.get_or_insert(date);
        self.last_date = Some(date);
        self.entries += 1;

        let class = self.classifier.classify(&entry.body);
        match class {
            Classification::Personal => {
                let message = extract_sender(&entry.body);
                *self.message_count.entry(message.sender).or_insert(0) += 1;
                self.total_messages += 1;
            }
            Classification::SystemNotice => self.system_notices += 1,
        }
        class
    }

    /// Accounts for an entry whose timestamp is not a real date.
    ///
    /// It is counted but never moves the date range.
    pub fn push_malformed(&mut self, malformed: &MalformedEntry) {
        tracing::warn!(line = malformed.line, stamp = %malformed.stamp, "skipping entry with invalid timestamp");
        self.malformed_entries += 1;
    }

    /// Personal messages counted so far.
    pub fn total_messages(&self) -> usize {
        self.total_messages
    }

    /// Builds the final record.
    ///
    /// `lines_read` is only used to describe the input when it held no
    /// valid entry.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::EmptyInput`] if no valid entry was pushed.
    pub fn finish(self, lines_read: usize) -> Result<ChatStats> {
        let (Some(start_date), Some(last_date)) = (self.start_date, self.last_date) else {
            return Err(ChatstatError::empty_input(lines_read, self.malformed_entries));
        };

        let (most_texted, least_texted) = extremes(&self.message_count);

        Ok(ChatStats {
            total_messages: self.total_messages,
            message_count: self.message_count,
            most_texted,
            least_texted,
            start_date,
            last_date,
            entries: self.entries,
            system_notices: self.system_notices,
            malformed_entries: self.malformed_entries,
        })
    }
}

/// Most and least active senders in one scan.
///
/// Comparisons are strict, so on a tie the sender met first keeps the spot.
fn extremes(counts: &IndexMap<String, usize>) -> (Option<SenderCount>, Option<SenderCount>) {
    let mut most: Option<(&str, usize)> = None;
    let mut least: Option<(&str, usize)> = None;

    for (sender, &count) in counts {
        if most.is_none_or(|(_, best)| count > best) {
            most = Some((sender.as_str(), count));
        }
        if least.is_none_or(|(_, worst)| count < worst) {
            least = Some((sender.as_str(), count));
        }
    }

    let to_owned = |pair: Option<(&str, usize)>| pair.map(|(s, c)| SenderCount::new(s, c));
    (to_owned(most), to_owned(least))
}

/// Runs a whole entry stream through an aggregator.
///
/// Entries outside `filter` are skipped before classification.
pub fn aggregate<'a, I>(
    mut entries: Entries<I>,
    classifier: &EventClassifier,
    filter: &EntryFilter,
) -> Result<ChatStats>
where
    I: Iterator<Item = &'a str>,
{
    let mut aggregator = ChatAggregator::new(classifier);
    let mut filtered_out = 0usize;

    for item in entries.by_ref() {
        match item {
            Ok(entry) if filter.matches(&entry) => {
                aggregator.push(&entry);
            }
            Ok(_) => filtered_out += 1,
            Err(malformed) => aggregator.push_malformed(&malformed),
        }
    }

    let lines_read = entries.lines_read();
    let stats = aggregator.finish(lines_read)?;

    tracing::debug!(
        lines = lines_read,
        entries = stats.entries,
        messages = stats.total_messages,
        notices = stats.system_notices,
        malformed = stats.malformed_entries,
        filtered_out,
        "aggregated transcript"
    );
    Ok(stats)
}
