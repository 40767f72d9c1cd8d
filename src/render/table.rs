//! Pipe-table detection and row parsing.
//!
//! A table is three or more consecutive lines:
//!
//! ```text
//! | Skill    | Score |      header row
//! |----------|:-----:|      separator row
//! | Empathy  | 4     |      one or more body rows
//! ```
//!
//! Anything that does not have exactly this shape is not a table and is left
//! for the paragraph scanner.

use super::options::EmptyCellPolicy;

/// A parsed pipe table.
///
/// Body rows are kept exactly as parsed: they are not padded or truncated to
/// the header's column count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns, defined by the header row.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// A line that starts and ends with a pipe.
pub fn is_pipe_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|') && trimmed.len() > 2
}

/// A pipe row made only of pipes, dashes, alignment colons and whitespace.
pub fn is_separator_row(line: &str) -> bool {
    if !is_pipe_row(line) {
        return false;
    }
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| c == '|' || c == '-' || c == ':' || c.is_whitespace())
}

/// Split a pipe row into trimmed cell values according to `policy`.
pub fn split_row(line: &str, policy: EmptyCellPolicy) -> Vec<String> {
    match policy {
        EmptyCellPolicy::Drop => line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect(),
        EmptyCellPolicy::Preserve => {
            let mut s = line.trim();
            if let Some(stripped) = s.strip_prefix('|') {
                s = stripped;
            }
            if let Some(stripped) = s.strip_suffix('|') {
                s = stripped;
            }
            s.split('|').map(|cell| cell.trim().to_string()).collect()
        }
    }
}

/// Try to parse a table starting at `lines[0]`.
///
/// Returns the table and the number of lines it consumed, or `None` when the
/// lines do not form a header + separator + at least one body row.
pub fn parse_table(lines: &[&str], policy: EmptyCellPolicy) -> Option<(Table, usize)> {
    let header = *lines.first()?;
    let separator = *lines.get(1)?;
    if !is_pipe_row(header) || is_separator_row(header) || !is_separator_row(separator) {
        return None;
    }

    let body_len = lines[2..].iter().take_while(|l| is_pipe_row(l)).count();
    if body_len == 0 {
        return None;
    }

    let table = Table {
        header: split_row(header, policy),
        rows: lines[2..2 + body_len]
            .iter()
            .map(|l| split_row(l, policy))
            .collect(),
    };
    Some((table, 2 + body_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_row_detection() {
        assert!(is_pipe_row("| A | B |"));
        assert!(is_pipe_row("   |a|   "));
        assert!(!is_pipe_row("A | B"));
        assert!(!is_pipe_row("||"));
        assert!(!is_pipe_row(""));
    }

    #[test]
    fn separator_detection() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("| :--- | ---: | :-: |"));
        assert!(!is_separator_row("| A | B |"));
        assert!(!is_separator_row("| --- | x |"));
        // pipes and spaces only: no dash, not a separator
        assert!(!is_separator_row("|   |   |"));
    }

    #[test]
    fn split_drops_edge_artifacts() {
        assert_eq!(split_row("| A | B | C |", EmptyCellPolicy::Drop), vec!["A", "B", "C"]);
    }

    #[test]
    fn split_drops_interior_blank_cell() {
        assert_eq!(split_row("| 1 |  | 3 |", EmptyCellPolicy::Drop), vec!["1", "3"]);
    }

    #[test]
    fn split_preserves_interior_blank_cell() {
        assert_eq!(
            split_row("| 1 |  | 3 |", EmptyCellPolicy::Preserve),
            vec!["1", "", "3"]
        );
    }

    #[test]
    fn parse_simple_table() {
        let lines = ["| A | B | C |", "|---|---|---|", "| 1 | 2 | 3 |", "not a row"];
        let (table, consumed) = parse_table(&lines, EmptyCellPolicy::Drop).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(table.header, vec!["A", "B", "C"]);
        assert_eq!(table.rows, vec![vec!["1", "2", "3"]]);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn ragged_body_rows_are_not_padded() {
        let lines = ["| A | B | C |", "| - | - | - |", "| 1 | 2 |", "| 1 | 2 | 3 | 4 |"];
        let (table, _) = parse_table(&lines, EmptyCellPolicy::Drop).unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn missing_separator_is_not_a_table() {
        let lines = ["| A | B |", "| 1 | 2 |", "| 3 | 4 |"];
        assert!(parse_table(&lines, EmptyCellPolicy::Drop).is_none());
    }

    #[test]
    fn header_and_separator_without_body_is_not_a_table() {
        let lines = ["| A | B |", "|---|---|", "text"];
        assert!(parse_table(&lines, EmptyCellPolicy::Drop).is_none());
    }

    #[test]
    fn separator_as_header_is_not_a_table() {
        let lines = ["|---|---|", "|---|---|", "| 1 | 2 |"];
        assert!(parse_table(&lines, EmptyCellPolicy::Drop).is_none());
    }
}
