//! Entry boundaries: which lines start a chat entry and which continue one.
//!
//! Exported transcripts put one message per line, prefixed with a timestamp:
//!
//! ```text
//! 1/2/23, 10:00 AM - Alice: Hello
//! 1/2/23, 10:01 - Bob: Hi
//! this line wraps Bob's message
//! ```
//!
//! A line that matches the timestamp grammar opens a new [`ChatEntry`]; any
//! other line is appended to the open entry's body. Lines before the first
//! timestamp are the export preamble and are dropped.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::DateOrder;
use crate::error::MalformedEntry;

/// `D{1,2}/M{1,2}/YY, H{1,2}:MM[ ](AM|PM) - body`
///
/// Digits are ASCII only. The separator before the meridiem may be any
/// Unicode space; newer exports use U+202F there.
const ENTRY_PATTERN: &str =
    r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{2}), ([0-9]{1,2}):([0-9]{2})\s?([AaPp][Mm])? - (.*)$";

static ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENTRY_PATTERN).expect("entry pattern is a valid regex"));

/// One logical, timestamped message unit, possibly spanning several lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// 1-based line number of the timestamp line
    pub line: usize,
    /// When the entry was written, in the exporting phone's local time
    pub timestamp: NaiveDateTime,
    /// Everything after ` - `, continuation lines joined with `\n`
    pub body: String,
}

impl ChatEntry {
    /// Calendar date of the entry.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// The parts of a timestamp line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    /// Date and time text, e.g. `1/2/23, 10:00 AM`
    pub stamp: &'a str,
    /// Parsed timestamp, `None` if the stamp is not a real date/time
    pub timestamp: Option<NaiveDateTime>,
    /// Text after ` - `
    pub body: &'a str,
}

/// Recognizes timestamp lines under a fixed day/month convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryMatcher {
    order: DateOrder,
}

impl EntryMatcher {
    pub fn new(order: DateOrder) -> Self {
        Self { order }
    }

    pub fn date_order(&self) -> DateOrder {
        self.order
    }

    /// Returns `true` if `line` opens a new entry.
    pub fn is_entry_start(&self, line: &str) -> bool {
        ENTRY_REGEX.is_match(line)
    }

    /// Splits a timestamp line into stamp, timestamp and body.
    ///
    /// Returns `None` for continuation lines. A line whose stamp has the
    /// right shape but names an impossible date (`31/2/23`) still matches,
    /// with `timestamp: None`.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<LineMatch<'a>> {
        let caps = ENTRY_REGEX.captures(line)?;
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let body_start = caps.get(7).map_or(line.len(), |m| m.start());
        let stamp = line[..body_start].trim_end_matches(" - ");

        let timestamp = build_timestamp(
            field(1),
            field(2),
            field(3),
            field(4),
            field(5),
            caps.get(6).map(|m| m.as_str()),
            self.order,
        );

        Some(LineMatch {
            stamp,
            timestamp,
            body: field(7),
        })
    }

    /// Returns a lazy iterator of entries over `lines`.
    pub fn entries<'a, I>(&self, lines: I) -> Entries<I>
    where
        I: Iterator<Item = &'a str>,
    {
        Entries::new(*self, lines)
    }
}

/// Assembles a timestamp from the captured digit groups.
///
/// Two-digit years are taken as 20YY. With a meridiem the hour must be
/// 1-12; without one it must be 0-23.
pub fn build_timestamp(
    first: &str,
    second: &str,
    year: &str,
    hour: &str,
    minute: &str,
    meridiem: Option<&str>,
    order: DateOrder,
) -> Option<NaiveDateTime> {
    let (day, month) = order.resolve(first.parse().ok()?, second.parse().ok()?);
    let year = 2000 + year.parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let hour: u32 = hour.parse().ok()?;
    let hour = match meridiem {
        Some(m) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            let pm = m.eq_ignore_ascii_case("pm");
            hour % 12 + if pm { 12 } else { 0 }
        }
        None => hour,
    };
    let time = NaiveTime::from_hms_opt(hour, minute.parse().ok()?, 0)?;

    Some(date.and_time(time))
}

#[derive(Debug)]
struct PendingEntry {
    line: usize,
    stamp: String,
    timestamp: Option<NaiveDateTime>,
    body: String,
}

impl PendingEntry {
    fn finish(self) -> Result<ChatEntry, MalformedEntry> {
        match self.timestamp {
            Some(timestamp) => Ok(ChatEntry {
                line: self.line,
                timestamp,
                body: self.body,
            }),
            None => Err(MalformedEntry {
                line: self.line,
                stamp: self.stamp,
            }),
        }
    }
}

/// Iterator over the entries of a transcript.
///
/// Each item is either a [`ChatEntry`] or, for a timestamp line that does not
/// denote a real date/time, a [`MalformedEntry`]. An entry is yielded once
/// the next timestamp line (or the end of input) closes it.
///
/// Blank lines inside an entry are kept only when more continuation text
/// follows them, so trailing blank lines never change a body.
pub struct Entries<I> {
    matcher: EntryMatcher,
    lines: I,
    lines_read: usize,
    preamble_lines: usize,
    pending: Option<PendingEntry>,
    deferred_blanks: String,
}

impl<I> Entries<I> {
    fn new(matcher: EntryMatcher, lines: I) -> Self {
        Self {
            matcher,
            lines,
            lines_read: 0,
            preamble_lines: 0,
            pending: None,
            deferred_blanks: String::new(),
        }
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Number of lines dropped because no entry was open yet.
    pub fn preamble_lines(&self) -> usize {
        self.preamble_lines
    }

    fn open(&mut self, line: &str) -> Option<PendingEntry> {
        let m = self.matcher.match_line(line)?;
        Some(PendingEntry {
            line: self.lines_read,
            stamp: m.stamp.to_string(),
            timestamp: m.timestamp,
            body: m.body.to_string(),
        })
    }

    fn continue_pending(&mut self, line: &str) {
        let Some(pending) = self.pending.as_mut() else {
            self.preamble_lines += 1;
            return;
        };

        if line.trim().is_empty() {
            self.deferred_blanks.push('\n');
            self.deferred_blanks.push_str(line);
            return;
        }

        pending.body.push_str(&self.deferred_blanks);
        self.deferred_blanks.clear();

        pending.body.push('\n');
        pending.body.push_str(line);
    }
}

impl<'a, I: Iterator<Item = &'a str>> Iterator for Entries<I> {
    type Item = Result<ChatEntry, MalformedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(raw) = self.lines.next() else {
                if self.preamble_lines > 0 && self.pending.is_none() {
                    tracing::debug!(lines = self.preamble_lines, "no entry found after preamble");
                }
                return self.pending.take().map(PendingEntry::finish);
            };

            self.lines_read += 1;
            let line = if self.lines_read == 1 {
                raw.strip_prefix('\u{feff}').unwrap_or(raw)
            } else {
                raw
            };

            match self.open(line) {
                Some(started) => {
                    self.deferred_blanks.clear();
                    if self.pending.is_none() && self.preamble_lines > 0 {
                        tracing::debug!(lines = self.preamble_lines, "skipped export preamble");
                    }
                    if let Some(done) = self.pending.replace(started) {
                        return Some(done.finish());
                    }
                }
                None => self.continue_pending(line),
            }
        }
    }
}

/// Splits `content` into entries.
///
/// # Example
///
/// ```rust
/// use chatstat::config::DateOrder;
/// use chatstat::parsing::entries;
///
/// let content = "1/2/23, 10:00 AM - Alice: Hello\nand more text\n";
/// let parsed: Vec<_> = entries(content, DateOrder::DayFirst).collect();
///
/// assert_eq!(parsed.len(), 1);
/// assert_eq!(parsed[0].as_ref().unwrap().body, "Alice: Hello\nand more text");
/// ```
pub fn entries(content: &str, order: DateOrder) -> Entries<std::str::Lines<'_>> {
    EntryMatcher::new(order).entries(content.lines())
}
