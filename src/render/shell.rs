//! The fixed document shell every rendered guide is embedded in.

use super::html::html_escape;

/// Stylesheet embedded in every document.
pub const STYLESHEET: &str = r#"body {
  font-family: -apple-system, "Segoe UI", Arial, sans-serif;
  line-height: 1.6;
  color: #222;
  max-width: 860px;
  margin: 0 auto;
  padding: 24px;
}
h1 { font-size: 1.9em; color: #1a3d6d; border-bottom: 3px solid #1a3d6d; padding-bottom: 8px; }
h2 { font-size: 1.45em; color: #1a3d6d; margin-top: 1.6em; border-bottom: 1px solid #d5dde8; padding-bottom: 4px; }
h3 { font-size: 1.15em; color: #33547f; margin-top: 1.2em; }
p { margin: 0.6em 0; white-space: pre-line; }
strong { color: #111; }
em { color: #555; }
table { border-collapse: collapse; width: 100%; margin: 1em 0; }
th, td { border: 1px solid #c8d1dc; padding: 8px 10px; text-align: left; vertical-align: top; }
th { background: #eef3f9; font-weight: 600; }
tbody tr:nth-child(even) { background: #f8fafc; }
.print-button {
  position: fixed;
  top: 16px;
  right: 16px;
  padding: 8px 16px;
  background: #1a3d6d;
  color: #fff;
  border: none;
  border-radius: 4px;
  cursor: pointer;
}
@media print {
  body { max-width: none; padding: 0; font-size: 11pt; }
  .print-button { display: none; }
  h1, h2, h3 { page-break-after: avoid; }
  table, tr { page-break-inside: avoid; }
  tbody tr:nth-child(even) { background: none; }
}"#;

/// Embed a rendered body into the document shell.
///
/// The body is inserted unmodified. The title is always escaped because it
/// comes from configuration, not from the generator.
pub fn assemble(body: &str, title: &str) -> String {
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="coachguide">
  <title>{title}</title>
  <style>
{STYLESHEET}
  </style>
</head>
<body>
<button class="print-button" onclick="window.print()">Print as PDF</button>
<main class="guide">
{body}
</main>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_embedded_unmodified() {
        let body = "<h2>Great Moment</h2>\n<p>**not touched here**</p>";
        let doc = assemble(body, "Coaching Guide");
        assert!(doc.contains(&format!("<main class=\"guide\">\n{body}\n</main>")));
    }

    #[test]
    fn shell_carries_stylesheet_and_print_rules() {
        let doc = assemble("", "Coaching Guide");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Coaching Guide</title>"));
        assert!(doc.contains("@media print"));
        assert!(doc.contains("window.print()"));
    }

    #[test]
    fn title_is_escaped() {
        let doc = assemble("", "Q&A <Review>");
        assert!(doc.contains("<title>Q&amp;A &lt;Review&gt;</title>"));
    }
}
