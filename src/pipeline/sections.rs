//! Completeness check: every required section title must appear in the guide.
//!
//! The check is a literal substring match over the generated text. It does
//! not care whether the title sits in a heading; the prompt asks for
//! headings, and a guide that mentions every section title somewhere is
//! treated as complete.

use crate::error::GuideError;
use tracing::warn;

/// Return the required titles that do not occur in `guide`, in the order
/// they were declared.
pub fn missing_sections<'a>(guide: &str, required: &'a [String]) -> Vec<&'a str> {
    required
        .iter()
        .map(String::as_str)
        .filter(|title| !guide.contains(title))
        .collect()
}

/// Fail with [`GuideError::MissingSections`] when any required title is absent.
pub fn check_sections(guide: &str, required: &[String]) -> Result<(), GuideError> {
    let missing = missing_sections(guide, required);
    if missing.is_empty() {
        return Ok(());
    }
    warn!("Generated guide is missing {} section(s): {:?}", missing.len(), missing);
    Err(GuideError::MissingSections {
        missing: missing.into_iter().map(str::to_string).collect(),
    })
}
