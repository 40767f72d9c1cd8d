//! Transcript-to-guide entry points.
//!
//! [`generate`] runs the whole pipeline: validate the transcript, ask the
//! LLM for a guide, clean the text, check it for completeness and render it
//! into a printable HTML document. [`render_generated`] is the second half
//! on its own, for text that was generated elsewhere.

use crate::config::GuideConfig;
use crate::error::GuideError;
use crate::output::{GenerationStats, GuideOutput};
use crate::pipeline::{input, llm, postprocess, sections};
use crate::render;
use edgequake_llm::{LLMProvider, ProviderFactory};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Model used when a provider is named without a model.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Generate a coaching guide from a conversation transcript.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// - [`GuideError::EmptyTranscript`] when the transcript is blank
/// - [`GuideError::ProviderNotConfigured`] when no LLM can be resolved
/// - [`GuideError::LlmApiError`] / [`GuideError::ApiTimeout`] /
///   [`GuideError::EmptyGeneration`] when the generation call fails
/// - [`GuideError::MissingSections`] when the guide lacks a required title
pub async fn generate(
    transcript: impl AsRef<str>,
    config: &GuideConfig,
) -> Result<GuideOutput, GuideError> {
    let total_start = Instant::now();

    // ── Step 1: Validate input ───────────────────────────────────────────
    let transcript = input::validate_transcript(transcript.as_ref())?;
    let transcript_chars = transcript.chars().count();
    info!("Generating coaching guide for {} character transcript", transcript_chars);

    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_start(transcript_chars);
    }

    // ── Step 2: Get/create provider ──────────────────────────────────────
    let provider = resolve_provider(config)?;

    // ── Step 3: Call the LLM ─────────────────────────────────────────────
    let generation = llm::generate_guide_text(&provider, transcript, config).await?;
    info!(
        "LLM returned {} bytes in {}ms",
        generation.markdown.len(),
        generation.duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_complete(generation.markdown.len());
    }

    // ── Step 4: Clean, check and render ──────────────────────────────────
    let mut output = render_generated(&generation.markdown, config)?;

    output.stats.transcript_chars = transcript_chars;
    output.stats.input_tokens = generation.input_tokens;
    output.stats.output_tokens = generation.output_tokens;
    output.stats.retries = generation.retries;
    output.stats.llm_duration_ms = generation.duration_ms;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Guide complete: {} bytes of HTML, {}ms total",
        output.html.len(),
        output.stats.total_duration_ms
    );

    Ok(output)
}

/// Turn already-generated guide text into the final document.
///
/// Applies the post-processing rules, checks the required sections and
/// renders the HTML document. No LLM is involved.
pub fn render_generated(markdown: &str, config: &GuideConfig) -> Result<GuideOutput, GuideError> {
    let start = Instant::now();

    let cleaned = postprocess::clean_guide(markdown);
    sections::check_sections(&cleaned, &config.required_sections)?;

    let html = render::render_document(&cleaned, &config.render);
    let render_duration_ms = start.elapsed().as_millis() as u64;
    debug!("Rendered {} bytes of HTML in {}ms", html.len(), render_duration_ms);

    if let Some(ref cb) = config.progress_callback {
        cb.on_render_complete(html.len());
    }

    Ok(GuideOutput {
        html,
        markdown: cleaned,
        stats: GenerationStats {
            render_duration_ms,
            total_duration_ms: render_duration_ms,
            ..Default::default()
        },
    })
}

/// Generate a guide and write the HTML document directly to a file.
///
/// The document is written to a temporary file in the target directory and
/// renamed into place, so a failed run never leaves a partial file behind.
pub async fn generate_to_file(
    transcript: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &GuideConfig,
) -> Result<GenerationStats, GuideError> {
    let output = generate(transcript, config).await?;
    write_html(&output.html, output_path.as_ref())?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_sync(
    transcript: impl AsRef<str>,
    config: &GuideConfig,
) -> Result<GuideOutput, GuideError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| GuideError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate(transcript, config))
}

/// Atomically write `html` to `path`.
pub fn write_html(html: &str, path: &Path) -> Result<(), GuideError> {
    let write_err = |e: std::io::Error| GuideError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(write_err)?;
            parent
        }
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(html.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, GuideError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        GuideError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`), used as-is.
/// 2. **Named provider + model** (`config.provider_name`); the factory reads
///    the matching API key (`OPENAI_API_KEY`, ...) from the environment.
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`),
///    honoured even when several API keys are present.
/// 4. **OpenAI** when `OPENAI_API_KEY` is set.
/// 5. **Full auto-detection** (`ProviderFactory::from_env`).
fn resolve_provider(config: &GuideConfig) -> Result<Arc<dyn LLMProvider>, GuideError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return create_provider(name, model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
            return create_provider("openai", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| GuideError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
