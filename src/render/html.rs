//! HTML emission for scanned blocks.

use super::block::Block;
use super::inline::apply_emphasis;
use super::options::RenderOptions;
use super::table::Table;

/// Render blocks to an HTML fragment, one block per line group.
///
/// Emphasis is applied to paragraph and table-cell text. Heading text is
/// emitted as-is.
pub fn render_blocks(blocks: &[Block], options: &RenderOptions) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &Block, options: &RenderOptions) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", plain(text, options))
        }
        Block::Paragraph(text) => format!("<p>{}</p>", inline(text, options)),
        Block::Table(table) => render_table(table, options),
    }
}

fn render_table(table: &Table, options: &RenderOptions) -> String {
    let mut html = String::from("<table>\n<thead>\n");
    html.push_str(&render_row(&table.header, "th", options));
    html.push_str("</thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str(&render_row(row, "td", options));
    }
    html.push_str("</tbody>\n</table>");
    html
}

fn render_row(cells: &[String], tag: &str, options: &RenderOptions) -> String {
    let mut html = String::from("<tr>");
    for cell in cells {
        html.push_str(&format!("<{tag}>{}</{tag}>", inline(cell, options)));
    }
    html.push_str("</tr>\n");
    html
}

fn plain(text: &str, options: &RenderOptions) -> String {
    if options.escape_html {
        html_escape(text)
    } else {
        text.to_string()
    }
}

fn inline(text: &str, options: &RenderOptions) -> String {
    apply_emphasis(&plain(text, options))
}

/// Escape HTML special characters in text.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_markup() {
        let blocks = [Block::Heading { level: 3, text: "Next Steps".into() }];
        assert_eq!(render_blocks(&blocks, &RenderOptions::default()), "<h3>Next Steps</h3>");
    }

    #[test]
    fn heading_text_is_not_emphasised() {
        let blocks = [Block::Heading { level: 1, text: "**Loud**".into() }];
        assert_eq!(render_blocks(&blocks, &RenderOptions::default()), "<h1>**Loud**</h1>");
    }

    #[test]
    fn table_markup() {
        let blocks = [Block::Table(Table {
            header: vec!["Skill".into(), "Score".into()],
            rows: vec![vec!["**Empathy**".into(), "4".into()]],
        })];
        let html = render_blocks(&blocks, &RenderOptions::default());
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr><th>Skill</th><th>Score</th></tr>\n</thead>\n\
             <tbody>\n<tr><td><strong>Empathy</strong></td><td>4</td></tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn preserved_empty_cell_renders_empty_td() {
        let blocks = [Block::Table(Table {
            header: vec!["A".into(), "B".into()],
            rows: vec![vec!["".into(), "2".into()]],
        })];
        let html = render_blocks(&blocks, &RenderOptions::default());
        assert!(html.contains("<tr><td></td><td>2</td></tr>"));
    }

    #[test]
    fn text_is_verbatim_by_default() {
        let blocks = [Block::Paragraph("<b>raw</b> & \"quoted\"".into())];
        assert_eq!(
            render_blocks(&blocks, &RenderOptions::default()),
            "<p><b>raw</b> & \"quoted\"</p>"
        );
    }

    #[test]
    fn escape_option_escapes_text_but_keeps_emphasis() {
        let opts = RenderOptions::default().with_escape_html(true);
        let blocks = [
            Block::Heading { level: 2, text: "Q&A".into() },
            Block::Paragraph("<script> **bold**".into()),
        ];
        assert_eq!(
            render_blocks(&blocks, &opts),
            "<h2>Q&amp;A</h2>\n<p>&lt;script&gt; <strong>bold</strong></p>"
        );
    }

    #[test]
    fn escape_helper() {
        assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
