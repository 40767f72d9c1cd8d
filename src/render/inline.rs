//! Inline emphasis: `**bold**` and `*italic*`.
//!
//! Bold runs first over the whole text, italic runs second over the result.
//! The order matters: an italic pass first would pair up half of each `**`
//! delimiter and corrupt every bold span. Both patterns are non-greedy and
//! stay within one line; unmatched markers are left as literal `*`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// Apply bold then italic emphasis to `text`.
pub fn apply_emphasis(text: &str) -> String {
    let bold = apply_bold(text);
    apply_italic(&bold).into_owned()
}

fn apply_bold(text: &str) -> Cow<'_, str> {
    RE_BOLD.replace_all(text, "<strong>$1</strong>")
}

fn apply_italic(text: &str) -> Cow<'_, str> {
    RE_ITALIC.replace_all(text, "<em>$1</em>")
}
