//! CLI binary for coachguide.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `GuideConfig` and prints or writes the rendered guide.

use anyhow::{Context, Result};
use clap::Parser;
use coachguide::pipeline::input::{read_transcript, STDIN_MARKER};
use coachguide::{
    generate, render_generated, write_html, EmptyCellPolicy, GenerationProgressCallback,
    GuideConfig, GuideOutput, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner that follows the single generation call.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading transcript…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_generation_start(&self, transcript_chars: usize) {
        self.bar.set_prefix("Evaluating");
        self.bar.set_message(format!("{transcript_chars} character transcript"));
    }

    fn on_attempt_failed(&self, attempt: u32, error: &str) {
        let msg = if error.len() > 80 {
            let cut = (0..=79).rev().find(|&i| error.is_char_boundary(i)).unwrap_or(0);
            format!("{}\u{2026}", &error[..cut])
        } else {
            error.to_string()
        };
        self.bar
            .println(format!("  {} attempt {}  {}", red("✗"), attempt, red(&msg)));
    }

    fn on_generation_complete(&self, markdown_len: usize) {
        self.bar.println(format!(
            "  {} guide generated  {}",
            green("✓"),
            dim(&format!("{markdown_len} chars"))
        ));
        self.bar.set_prefix("Rendering");
        self.bar.set_message("building HTML…");
    }

    fn on_render_complete(&self, html_len: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} coaching guide rendered  {}",
            green("✔"),
            dim(&format!("{html_len} bytes"))
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate a guide and print the HTML document (stdout)
  coachguide call.txt

  # Write the guide to a file, then open it and print to PDF
  coachguide call.txt -o guide.html

  # Read the transcript from stdin
  cat call.txt | coachguide - -o guide.html

  # Render text you already have (no API key needed)
  coachguide --render-only guide.md -o guide.html

  # Use a specific model
  coachguide --model gpt-4.1 --provider openai call.txt

  # Run the HTTP endpoint (POST /api/generate-pdf)
  coachguide --serve 127.0.0.1:8080

  # JSON output with HTML, cleaned text and token counts
  coachguide --json call.txt > guide.json

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID
  RUST_LOG                Log filter, overrides -v / -q

SETUP:
  1. Set API key:     export OPENAI_API_KEY=sk-...
  2. Generate:        coachguide call.txt -o guide.html
"#;

/// Generate printable coaching guides from conversation transcripts.
#[derive(Parser, Debug)]
#[command(
    name = "coachguide",
    version,
    about = "Generate printable coaching guides from conversation transcripts",
    long_about = "Send a conversation transcript to an LLM for evaluation and render the \
resulting coaching guide as a self-contained, print-ready HTML document. Supports OpenAI, \
Anthropic, Google Gemini, Azure OpenAI, and any OpenAI-compatible endpoint (Ollama, vLLM, \
LiteLLM, etc.).",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Transcript file path, or `-` for stdin (the default).
    input: Option<String>,

    /// Write the HTML document to this file instead of stdout.
    #[arg(short, long, env = "COACHGUIDE_OUTPUT")]
    output: Option<PathBuf>,

    /// Treat the input as generated guide text and only render it.
    #[arg(long, env = "COACHGUIDE_RENDER_ONLY")]
    render_only: bool,

    /// Serve the HTTP endpoint on this address instead of processing a file.
    #[cfg(feature = "server")]
    #[arg(long, env = "COACHGUIDE_SERVE", value_name = "ADDR")]
    serve: Option<std::net::SocketAddr>,

    /// LLM model ID (e.g. gpt-4.1-nano, gpt-4.1, claude-sonnet-4-20250514).
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(
        long,
        env = "EDGEQUAKE_PROVIDER",
        long_help = "LLM provider. Auto-detected from API key env vars if not set.\n\
          Supported: openai, anthropic, gemini, azure, ollama, or any OpenAI-compatible URL."
    )]
    provider: Option<String>,

    /// Path to a text file containing a custom system prompt.
    #[arg(long, env = "COACHGUIDE_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// Max LLM output tokens.
    #[arg(long, env = "COACHGUIDE_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "COACHGUIDE_TEMPERATURE", default_value_t = 0.4)]
    temperature: f32,

    /// Retries on LLM failure.
    #[arg(long, env = "COACHGUIDE_MAX_RETRIES", default_value_t = 0)]
    max_retries: u32,

    /// LLM call timeout in seconds.
    #[arg(long, env = "COACHGUIDE_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Document title shown in the browser tab and print header.
    #[arg(long, env = "COACHGUIDE_TITLE")]
    title: Option<String>,

    /// Keep empty table cells instead of dropping them.
    #[arg(long, env = "COACHGUIDE_KEEP_EMPTY_CELLS")]
    keep_empty_cells: bool,

    /// Escape `<`, `>`, `&` and `"` in generated text.
    #[arg(long, env = "COACHGUIDE_ESCAPE_HTML")]
    escape_html: bool,

    /// Accept guides that lack some of the required sections.
    #[arg(long, env = "COACHGUIDE_NO_SECTION_CHECK")]
    no_section_check: bool,

    /// Output structured JSON (GuideOutput) instead of HTML.
    #[arg(long, env = "COACHGUIDE_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "COACHGUIDE_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "COACHGUIDE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "COACHGUIDE_QUIET")]
    quiet: bool,
}

impl Cli {
    #[cfg(feature = "server")]
    fn serving(&self) -> bool {
        self.serve.is_some()
    }

    #[cfg(not(feature = "server"))]
    fn serving(&self) -> bool {
        false
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; a server
    // always logs at INFO so requests are visible.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && !cli.render_only && !cli.serving();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn GenerationProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb).await?;

    // ── Server mode ──────────────────────────────────────────────────────
    #[cfg(feature = "server")]
    if let Some(addr) = cli.serve {
        let state = coachguide::server::AppState::new(config);
        coachguide::server::serve(addr, state)
            .await
            .with_context(|| format!("Server on {addr} failed"))?;
        return Ok(());
    }

    // ── Read input ───────────────────────────────────────────────────────
    let input = cli.input.as_deref().unwrap_or(STDIN_MARKER);
    let text = tokio::task::block_in_place(|| read_transcript(input))
        .with_context(|| format!("Failed to read {input}"))?;

    // ── Generate or render ───────────────────────────────────────────────
    let output = if cli.render_only {
        render_generated(&text, &config).context("Rendering failed")?
    } else {
        generate(&text, &config)
            .await
            .context("Guide generation failed")?
    };

    emit(&cli, &output)?;

    if !cli.quiet && !cli.json {
        if cli.render_only {
            eprintln!("Rendered guide in {}ms", output.stats.render_duration_ms);
        } else {
            eprintln!(
                "   {} tokens in  /  {} tokens out  ·  {}ms total",
                dim(&output.stats.input_tokens.to_string()),
                dim(&output.stats.output_tokens.to_string()),
                output.stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Write the result to `--output` or stdout.
fn emit(cli: &Cli, output: &GuideOutput) -> Result<()> {
    if let Some(ref output_path) = cli.output {
        let written = if cli.json {
            let json = serde_json::to_string_pretty(output).context("Failed to serialise output")?;
            write_html(&json, output_path)
        } else {
            write_html(&output.html, output_path)
        };
        written.with_context(|| format!("Failed to write {}", output_path.display()))?;

        if !cli.quiet {
            eprintln!(
                "{}  {}  →  {}",
                cyan("◆"),
                bold("guide written"),
                bold(&output_path.display().to_string()),
            );
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        let json = serde_json::to_string_pretty(output).context("Failed to serialise output")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else {
        handle
            .write_all(output.html.as_bytes())
            .context("Failed to write to stdout")?;
        if !output.html.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }
    Ok(())
}

/// Map CLI args to `GuideConfig`.
async fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<GuideConfig> {
    let system_prompt = if let Some(ref path) = cli.system_prompt {
        Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read system prompt from {:?}", path))?,
        )
    } else {
        None
    };

    let empty_cells = if cli.keep_empty_cells {
        EmptyCellPolicy::Preserve
    } else {
        EmptyCellPolicy::Drop
    };

    let mut builder = GuideConfig::builder()
        .max_tokens(cli.max_tokens)
        .temperature(cli.temperature)
        .max_retries(cli.max_retries)
        .api_timeout_secs(cli.api_timeout)
        .empty_cells(empty_cells)
        .escape_html(cli.escape_html);

    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.clone());
    }
    if let Some(prompt) = system_prompt {
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if cli.no_section_check {
        builder = builder.skip_section_check();
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_reads_stdin() {
        let cli = Cli::try_parse_from(["coachguide"]).unwrap();
        assert!(cli.input.is_none());
        assert!(!cli.render_only);
    }

    #[test]
    fn dash_reads_stdin() {
        let cli = Cli::try_parse_from(["coachguide", "-", "-o", "guide.html"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some(STDIN_MARKER));
        assert_eq!(cli.output, Some(PathBuf::from("guide.html")));
    }
}
