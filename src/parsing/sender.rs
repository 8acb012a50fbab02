//! Sender attribution for personal messages.

use serde::{Deserialize, Serialize};

/// A personal message split into who wrote it and what they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedMessage {
    /// Trimmed text before the first colon
    pub sender: String,
    /// Everything after the first colon, untouched
    pub text: String,
}

/// Splits `sender: text` on the first colon of the header line.
///
/// Only the first colon counts, so `Bob: Meeting at 3:00` keeps its time
/// intact. Continuation lines never contribute to the sender. A header
/// without any colon becomes a pseudo-sender equal to the trimmed header,
/// and whatever continuation lines follow become the text.
///
/// # Example
///
/// ```rust
/// use chatstat::parsing::extract_sender;
///
/// let msg = extract_sender("Bob: Meeting at 3:00");
/// assert_eq!(msg.sender, "Bob");
/// assert_eq!(msg.text, " Meeting at 3:00");
/// ```
pub fn extract_sender(body: &str) -> AttributedMessage {
    let (header, rest) = body.split_once('\n').unwrap_or((body, ""));

    match header.split_once(':') {
        Some((sender, _)) => AttributedMessage {
            sender: sender.trim().to_string(),
            text: body[sender.len() + 1..].to_string(),
        },
        None => AttributedMessage {
            sender: header.trim().to_string(),
            text: rest.to_string(),
        },
    }
}
