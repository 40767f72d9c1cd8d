//! Deterministic guide-text-to-HTML renderer.
//!
//! ## Two phases
//!
//! ```text
//! text ──▶ block::scan_blocks ──▶ Vec<Block> ──▶ html::render_blocks ──▶ shell::assemble
//!          (headings, tables,                    (emphasis in paragraphs
//!           paragraphs)                           and table cells)
//! ```
//!
//! The scanner classifies every line into exactly one block before any
//! markup is produced, so there is no "wrap in `<p>` then unwrap around
//! headings" repair step: a paragraph can never end up around a heading or
//! a table.
//!
//! Rendering is a pure function of its input. It holds no state between
//! calls, performs no I/O and cannot fail; text that does not match the
//! heading or table grammar becomes paragraph content.

pub mod block;
pub mod html;
pub mod inline;
mod options;
pub mod shell;
pub mod table;

pub use block::{scan_blocks, Block};
pub use options::{EmptyCellPolicy, RenderOptions, DEFAULT_TITLE};
pub use table::Table;

/// Render guide text to an HTML body fragment (no document shell).
pub fn render_body(text: &str, options: &RenderOptions) -> String {
    let blocks = scan_blocks(text, options.empty_cells);
    html::render_blocks(&blocks, options)
}

/// Render guide text to a complete, styled HTML document.
pub fn render_document(text: &str, options: &RenderOptions) -> String {
    shell::assemble(&render_body(text, options), &options.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_verbatim_paragraph() {
        let input = "Nothing special here: 3 < 4 & \"quotes\" stay.";
        assert_eq!(
            render_body(input, &RenderOptions::default()),
            format!("<p>{input}</p>")
        );
    }

    #[test]
    fn document_wraps_body() {
        let doc = render_document("## Next Steps", &RenderOptions::default());
        assert!(doc.contains("<h2>Next Steps</h2>"));
        assert!(doc.contains("<title>Coaching Guide</title>"));
    }

    #[test]
    fn empty_input_renders_empty_body() {
        assert_eq!(render_body("", &RenderOptions::default()), "");
    }
}
