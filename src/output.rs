//! Output types returned by the generation entry points.

use serde::{Deserialize, Serialize};

/// A finished coaching guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideOutput {
    /// Complete, styled HTML document.
    pub html: String,
    /// Cleaned guide text the HTML was rendered from.
    pub markdown: String,
    pub stats: GenerationStats,
}

/// Accounting for one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Characters in the trimmed transcript (0 for render-only runs).
    pub transcript_chars: usize,
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Retries spent before the LLM call succeeded.
    pub retries: u32,
    pub llm_duration_ms: u64,
    pub render_duration_ms: u64,
    pub total_duration_ms: u64,
}
