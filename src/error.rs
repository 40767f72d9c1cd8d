//! Error types for the coachguide library.
//!
//! The renderer itself never fails: text that does not match the block
//! grammar degrades to paragraph content. Everything around it (reading the
//! transcript, calling the generation service, checking the generated guide
//! for completeness, writing output) reports a [`GuideError`].
//!
//! Each variant maps to one condition the caller can act on, so the HTTP
//! layer can pick a status code and the CLI can print a useful hint without
//! parsing message strings.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the coachguide library.
#[derive(Debug, Error)]
pub enum GuideError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The transcript was missing or contained only whitespace.
    #[error("No transcript provided")]
    EmptyTranscript,

    /// Transcript file was not found at the given path.
    #[error("Transcript file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The transcript could not be read (permissions, invalid UTF-8, ...).
    #[error("Failed to read transcript from '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The generation service returned an error on every attempt.
    #[error("LLM API error after {retries} retries: {message}")]
    LlmApiError { message: String, retries: u32 },

    /// The generation call exceeded the configured timeout.
    #[error("LLM call timed out after {elapsed_ms}ms\nIncrease --api-timeout.")]
    ApiTimeout { elapsed_ms: u64 },

    /// The generation service answered with nothing but whitespace.
    #[error("LLM returned an empty coaching guide")]
    EmptyGeneration,

    // ── Completeness errors ───────────────────────────────────────────────
    /// One or more required section titles are absent from the generated text.
    #[error("Generated guide is missing required sections: {}", missing.join(", "))]
    MissingSections { missing: Vec<String> },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GuideError {
    /// True when the failure originated at the upstream generation service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            GuideError::LlmApiError { .. } | GuideError::ApiTimeout { .. } | GuideError::EmptyGeneration
        )
    }
}
