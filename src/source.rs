//! Reading a transcript from disk.

use std::fs;
use std::path::Path;

use crate::error::{ChatstatError, Result};

/// Reads the whole file at `path` as UTF-8.
///
/// The file handle is closed before decoding starts, so a decoding failure
/// never leaves it open.
///
/// # Errors
///
/// - [`ChatstatError::SourceUnavailable`] if the file cannot be read
/// - [`ChatstatError::Utf8`] if the contents are not valid UTF-8
pub fn read_transcript(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ChatstatError::source_unavailable(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read transcript");

    String::from_utf8(bytes).map_err(|e| ChatstatError::Utf8 {
        context: path.display().to_string(),
        source: e,
    })
}
