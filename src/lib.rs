//! # coachguide
//!
//! Turn a conversation transcript into a printable coaching guide.
//!
//! ## How it works
//!
//! An LLM reads the transcript and writes a structured evaluation in a small
//! Markdown-like dialect: headings, pipe tables, `**bold**` and `*italic*`.
//! The crate cleans that text, checks that every required section came back
//! and renders it into a self-contained HTML document with print styling, so
//! the browser's "Save as PDF" produces the final guide.
//!
//! ## Pipeline Overview
//!
//! ```text
//! transcript
//!  │
//!  ├─ 1. Input     reject blank transcripts
//!  ├─ 2. LLM       one chat call under a timeout (gpt-4.1-nano / claude / …)
//!  ├─ 3. Polish    strip fences, normalise whitespace, drop stray separators
//!  ├─ 4. Sections  every required section title must be present
//!  └─ 5. Render    block scan → HTML body → styled document shell
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coachguide::{generate, GuideConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / GEMINI_API_KEY
//!     let config = GuideConfig::default();
//!     let transcript = std::fs::read_to_string("call.txt")?;
//!     let output = generate(&transcript, &config).await?;
//!     std::fs::write("guide.html", &output.html)?;
//!     eprintln!("tokens: {} in / {} out",
//!         output.stats.input_tokens,
//!         output.stats.output_tokens);
//!     Ok(())
//! }
//! ```
//!
//! The renderer is usable on its own and needs no LLM:
//!
//! ```rust
//! use coachguide::{render_body, RenderOptions};
//!
//! let html = render_body("## Action Plan\n**Slow down.**", &RenderOptions::default());
//! assert_eq!(html, "<h2>Action Plan</h2>\n<p><strong>Slow down.</strong></p>");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `coachguide` binary (clap + anyhow + tracing-subscriber) |
//! | `server` | on      | Enables [`server`], the `POST /api/generate-pdf` endpoint (axum + tower-http) |
//!
//! Disable both when using only the library:
//! ```toml
//! coachguide = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod render;
#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{GuideConfig, GuideConfigBuilder};
pub use error::GuideError;
pub use generate::{generate, generate_sync, generate_to_file, render_generated, write_html};
pub use output::{GenerationStats, GuideOutput};
pub use progress::{GenerationProgressCallback, NoopProgressCallback, ProgressCallback};
pub use prompts::REQUIRED_SECTIONS;
pub use render::{render_body, render_document, Block, EmptyCellPolicy, RenderOptions, Table};
