//! Block scanner: partition guide text into headings, tables and paragraphs.
//!
//! The scanner walks the input line by line and emits a flat sequence of
//! [`Block`]s. Every non-blank line lands in exactly one block:
//!
//! - a line starting with 1-3 `#` markers and a space is a [`Block::Heading`];
//! - a header row, separator row and body rows form a [`Block::Table`];
//! - runs of any other non-blank lines form a [`Block::Paragraph`].
//!
//! Blank lines only terminate paragraphs. Headings and tables also terminate
//! a running paragraph, so `"text\n## Title"` yields a paragraph followed by
//! a heading rather than one merged paragraph.

use super::options::EmptyCellPolicy;
use super::table::{self, Table};

/// One classified block of guide text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading at level 1, 2 or 3, marker prefix stripped.
    Heading { level: u8, text: String },
    /// Pipe table.
    Table(Table),
    /// Free text; source lines joined with `\n`.
    Paragraph(String),
}

/// Classify a single line as a heading.
///
/// Returns the level and the text after the marker prefix and its space.
/// Four or more markers, or markers not followed by a space, are not a
/// heading.
pub fn classify_heading(line: &str) -> Option<(u8, &str)> {
    let markers = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=3).contains(&markers) {
        return None;
    }
    let text = line[markers..].strip_prefix(' ')?;
    Some((markers as u8, text))
}

/// Partition `text` into blocks.
pub fn scan_blocks(text: &str, policy: EmptyCellPolicy) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            i += 1;
            continue;
        }

        if let Some((level, heading)) = classify_heading(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                text: heading.trim_end().to_string(),
            });
            i += 1;
            continue;
        }

        if let Some((parsed, consumed)) = table::parse_table(&lines[i..], policy) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Table(parsed));
            i += consumed;
            continue;
        }

        paragraph.push(line);
        i += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }
    blocks.push(Block::Paragraph(lines.join("\n")));
    lines.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Block> {
        scan_blocks(text, EmptyCellPolicy::Drop)
    }

    #[test]
    fn heading_levels() {
        assert_eq!(classify_heading("# Title"), Some((1, "Title")));
        assert_eq!(classify_heading("## Section"), Some((2, "Section")));
        assert_eq!(classify_heading("### Sub"), Some((3, "Sub")));
    }

    #[test]
    fn non_headings() {
        assert_eq!(classify_heading("#### Too deep"), None);
        assert_eq!(classify_heading("#NoSpace"), None);
        assert_eq!(classify_heading(" # indented"), None);
        assert_eq!(classify_heading("plain"), None);
        assert_eq!(classify_heading("#"), None);
    }

    #[test]
    fn heading_keeps_inner_markers() {
        assert_eq!(classify_heading("## C# tips"), Some((2, "C# tips")));
    }

    #[test]
    fn blank_lines_split_paragraphs() {
        let blocks = scan("first\nstill first\n\n\nsecond");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("first\nstill first".into()),
                Block::Paragraph("second".into()),
            ]
        );
    }

    #[test]
    fn heading_interrupts_paragraph() {
        let blocks = scan("intro line\n## Great Moments\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("intro line".into()),
                Block::Heading { level: 2, text: "Great Moments".into() },
                Block::Paragraph("after".into()),
            ]
        );
    }

    #[test]
    fn table_interrupts_paragraph() {
        let blocks = scan("Scores below:\n| A | B |\n|---|---|\n| 1 | 2 |\nclosing words");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::Paragraph("Scores below:".into()));
        assert!(matches!(blocks[1], Block::Table(_)));
        assert_eq!(blocks[2], Block::Paragraph("closing words".into()));
    }

    #[test]
    fn rejected_table_falls_through_to_paragraph() {
        let blocks = scan("| A | B |\n| not | separator |");
        assert_eq!(
            blocks,
            vec![Block::Paragraph("| A | B |\n| not | separator |".into())]
        );
    }

    #[test]
    fn every_line_lands_in_one_block() {
        let text = "# T\np1\n| A |\n|---|\n| 1 |\n\n#### deep\n### S";
        let blocks = scan(text);
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "T".into() },
                Block::Paragraph("p1".into()),
                Block::Table(Table {
                    header: vec!["A".into()],
                    rows: vec![vec!["1".into()]],
                }),
                Block::Paragraph("#### deep".into()),
                Block::Heading { level: 3, text: "S".into() },
            ]
        );
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(scan("").is_empty());
        assert!(scan("\n  \n\t\n").is_empty());
    }
}
