//! Post-processing: deterministic cleanup of LLM-generated guide text.
//!
//! Even with a strict prompt the generation service occasionally produces
//! artefacts the renderer would otherwise turn into visible noise:
//!
//! - the whole guide wrapped in ` ```markdown ... ``` ` fences
//! - Windows-style `\r\n` line endings
//! - zero-width spaces and BOMs copied out of the transcript
//! - extra `|---|---|` rows in the middle of the scorecard table
//!
//! The rules here fix those quirks without touching content. They run only
//! on generated text; [`crate::render`] itself never rewrites its input.
//!
//! ## Rule Order
//!
//! Fences are stripped first so the remaining rules see the real first and
//! last lines; line endings are normalised before any line-based rule.

use crate::render::table::{is_pipe_row, is_separator_row};
use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all post-processing rules to the raw LLM output.
///
/// Rules (applied in order):
/// 1. Strip outer markdown fences
/// 2. Normalise line endings (CRLF → LF)
/// 3. Trim trailing whitespace per line
/// 4. Collapse 3+ consecutive blank lines down to 2
/// 5. Remove spurious mid-table separator rows
/// 6. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, etc.)
/// 7. Ensure the text ends with exactly one newline
pub fn clean_guide(input: &str) -> String {
    let s = strip_markdown_fences(input);
    let s = normalise_line_endings(&s);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    let s = remove_mid_table_separators(&s);
    let s = remove_invisible_chars(&s);
    ensure_final_newline(&s)
}

// ── Rule 1: Strip outer markdown fences ──────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown|md)?\r?\n(.*)\r?\n```\s*$").unwrap());

fn strip_markdown_fences(input: &str) -> String {
    if let Some(caps) = RE_OUTER_FENCES.captures(input.trim()) {
        caps[1].to_string()
    } else {
        input.to_string()
    }
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n\n").to_string()
}

// ── Rule 5: Remove spurious mid-table separator rows ─────────────────────────
//
// Only the row directly after the header may be a separator. A separator in
// the body would otherwise render as a row of dashes.

fn remove_mid_table_separators(input: &str) -> String {
    let mut result: Vec<&str> = Vec::new();
    let mut table_line_count = 0usize;

    for line in input.lines() {
        if is_pipe_row(line) {
            table_line_count += 1;
            if is_separator_row(line) && table_line_count != 2 {
                continue;
            }
        } else {
            table_line_count = 0;
        }
        result.push(line);
    }

    result.join("\n")
}

// ── Rule 6: Remove invisible Unicode characters ──────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 7: Ensure text ends with single newline ─────────────────────────────

fn ensure_final_newline(input: &str) -> String {
    let trimmed = input.trim_end();
    if trimmed.is_empty() {
        String::from("\n")
    } else {
        format!("{}\n", trimmed)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences() {
        let input = "```markdown\n# Coaching Guide\nBody\n```";
        assert_eq!(strip_markdown_fences(input), "# Coaching Guide\nBody");
    }

    #[test]
    fn test_strip_fences_no_lang() {
        let input = "```\n## Action Plan\n```";
        assert_eq!(strip_markdown_fences(input), "## Action Plan");
    }

    #[test]
    fn test_inner_fence_is_kept() {
        let input = "## Overview\n```\ncode\n```\nafter";
        assert_eq!(strip_markdown_fences(input), input);
    }

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_trim_trailing_whitespace() {
        assert_eq!(trim_trailing_whitespace("  quote   \nline  "), "  quote\nline");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_remove_mid_table_separator() {
        let input = "| A | B |\n| --- | --- |\n| 1 | 2 |\n| --- | --- |\n| 3 | 4 |";
        let result = remove_mid_table_separators(input);
        let sep_count = result.lines().filter(|l| is_separator_row(l)).count();
        assert_eq!(sep_count, 1);
        assert!(result.contains("| 3 | 4 |"));
    }

    #[test]
    fn test_second_table_keeps_its_separator() {
        let input = "| A |\n|---|\n| 1 |\n\n| B |\n|---|\n| 2 |";
        assert_eq!(remove_mid_table_separators(input), input);
    }

    #[test]
    fn test_remove_invisible() {
        let input = "great\u{200B}moment\u{FEFF}here\u{00AD}now";
        assert_eq!(remove_invisible_chars(input), "greatmomentherenow");
    }

    #[test]
    fn test_ensure_final_newline() {
        assert_eq!(ensure_final_newline("guide"), "guide\n");
        assert_eq!(ensure_final_newline("guide\n\n\n"), "guide\n");
        assert_eq!(ensure_final_newline(""), "\n");
    }

    #[test]
    fn test_clean_guide_full_pipeline() {
        let input = "```markdown\r\n# Coaching Guide\r\n\r\nSome text   \n\n\n\n\n\n## Skill Scorecard\n| A | B |\n|---|---|\n| 1 | 2 |\n|---|---|\n```";
        let result = clean_guide(input);
        assert!(result.starts_with("# Coaching Guide"));
        assert!(result.ends_with("| 1 | 2 |\n"));
        assert!(!result.contains("\n\n\n\n"));
        assert!(!result.contains('\r'));
    }
}
