//! Input resolution: read and validate the conversation transcript.
//!
//! The library accepts the transcript as a string; the CLI accepts a file
//! path or `-` for stdin. Either way the text passes through
//! [`validate_transcript`] before any LLM call is made, so an empty request
//! fails fast and never costs tokens.

use crate::error::GuideError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marker for reading the transcript from standard input.
pub const STDIN_MARKER: &str = "-";

/// Reject a missing or whitespace-only transcript.
///
/// Returns the trimmed transcript on success.
pub fn validate_transcript(transcript: &str) -> Result<&str, GuideError> {
    let trimmed = transcript.trim();
    if trimmed.is_empty() {
        return Err(GuideError::EmptyTranscript);
    }
    Ok(trimmed)
}

/// Read a transcript from a file path, or from stdin when `input` is `-`.
pub fn read_transcript(input: &str) -> Result<String, GuideError> {
    if input == STDIN_MARKER {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| GuideError::InputReadFailed {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        debug!("Read {} bytes of transcript from stdin", buf.len());
        return Ok(buf);
    }
    read_transcript_file(Path::new(input))
}

fn read_transcript_file(path: &Path) -> Result<String, GuideError> {
    if !path.exists() {
        return Err(GuideError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| GuideError::InputReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Read {} bytes of transcript from {}", text.len(), path.display());
    Ok(text)
}
