//! Rendering options.

use serde::{Deserialize, Serialize};

/// Title used in the document shell when none is configured.
pub const DEFAULT_TITLE: &str = "Coaching Guide";

/// Options for rendering generated guide text into HTML.
///
/// The defaults reproduce the historical behaviour exactly: empty table
/// cells are dropped and text is inserted into the markup unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Text for the document `<title>` element.
    pub title: String,

    /// What to do with table cells that are empty after trimming.
    pub empty_cells: EmptyCellPolicy,

    /// Escape `&`, `<`, `>` and `"` in all emitted text.
    ///
    /// Off by default: the generator's text is inserted verbatim, so any
    /// markup it produces reaches the document. Turn this on when the
    /// generated text cannot be trusted to be markup-free.
    pub escape_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            empty_cells: EmptyCellPolicy::default(),
            escape_html: false,
        }
    }
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the empty-cell policy.
    pub fn with_empty_cells(mut self, policy: EmptyCellPolicy) -> Self {
        self.empty_cells = policy;
        self
    }

    /// Enable or disable HTML escaping of text content.
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }
}

/// Handling of table cells that trim to the empty string.
///
/// Splitting `| a |  | c |` on `|` yields an empty artifact cell before the
/// leading pipe, one after the trailing pipe, and an interior blank cell.
/// The two policies differ only in what happens to the interior one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyCellPolicy {
    /// Drop every empty cell, interior ones included. Ragged rows may
    /// shift columns. (default)
    #[default]
    Drop,
    /// Drop only the edge artifacts of a leading/trailing pipe; interior
    /// blank cells are kept as empty cells.
    Preserve,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_behaviour() {
        let opts = RenderOptions::default();
        assert_eq!(opts.title, "Coaching Guide");
        assert_eq!(opts.empty_cells, EmptyCellPolicy::Drop);
        assert!(!opts.escape_html);
    }

    #[test]
    fn builder_methods() {
        let opts = RenderOptions::new()
            .with_title("Call Review")
            .with_empty_cells(EmptyCellPolicy::Preserve)
            .with_escape_html(true);
        assert_eq!(opts.title, "Call Review");
        assert_eq!(opts.empty_cells, EmptyCellPolicy::Preserve);
        assert!(opts.escape_html);
    }
}
