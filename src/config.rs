//! Configuration types for transcript-to-guide generation.
//!
//! All generation behaviour is controlled through [`GuideConfig`], built via
//! its [`GuideConfigBuilder`]. One struct holds the LLM knobs, the list of
//! required section titles and the [`RenderOptions`], so the HTTP server can
//! share a single `Arc<GuideConfig>` across every request.

use crate::error::GuideError;
use crate::progress::ProgressCallback;
use crate::prompts::REQUIRED_SECTIONS;
use crate::render::{EmptyCellPolicy, RenderOptions};
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Configuration for generating a coaching guide.
///
/// Built via [`GuideConfig::builder()`] or using [`GuideConfig::default()`].
///
/// # Example
/// ```rust
/// use coachguide::GuideConfig;
///
/// let config = GuideConfig::builder()
///     .model("gpt-4.1-mini")
///     .temperature(0.3)
///     .api_timeout_secs(90)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct GuideConfig {
    /// LLM model identifier, e.g. "gpt-4.1-nano", "claude-sonnet-4-20250514".
    /// If None, uses provider default.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is detected from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for the LLM completion. Default: 0.4.
    ///
    /// Coaching feedback is prose, not transcription; a little variety reads
    /// better, but high values start inventing quotes that are not in the
    /// transcript.
    pub temperature: f32,

    /// Maximum tokens the LLM may generate for one guide. Default: 4096.
    pub max_tokens: usize,

    /// Retry attempts after a failed LLM call. Default: 0.
    ///
    /// Failures are reported to the caller rather than retried. Raise this to
    /// enable exponential backoff (`retry_backoff_ms * 2^attempt`).
    pub max_retries: u32,

    /// Initial retry delay in milliseconds. Default: 500.
    pub retry_backoff_ms: u64,

    /// Per-call LLM timeout in seconds. Default: 60.
    pub api_timeout_secs: u64,

    /// Custom system prompt. If None, uses built-in default.
    pub system_prompt: Option<String>,

    /// Section titles that must appear literally in the generated text.
    ///
    /// Defaults to [`REQUIRED_SECTIONS`]. An empty list disables the check.
    pub required_sections: Vec<String>,

    /// How the generated text is rendered to HTML.
    pub render: RenderOptions,

    /// Optional progress callback invoked during generation.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.4,
            max_tokens: 4096,
            max_retries: 0,
            retry_backoff_ms: 500,
            api_timeout_secs: 60,
            system_prompt: None,
            required_sections: REQUIRED_SECTIONS.iter().map(|s| s.to_string()).collect(),
            render: RenderOptions::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for GuideConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuideConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("required_sections", &self.required_sections)
            .field("render", &self.render)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn GenerationProgressCallback>"),
            )
            .finish()
    }
}

impl GuideConfig {
    /// Create a new builder for `GuideConfig`.
    pub fn builder() -> GuideConfigBuilder {
        GuideConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GuideConfig`].
#[derive(Debug)]
pub struct GuideConfigBuilder {
    config: GuideConfig,
}

impl GuideConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Replace the required section titles.
    pub fn required_sections<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.required_sections = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Disable the completeness check entirely.
    pub fn skip_section_check(mut self) -> Self {
        self.config.required_sections.clear();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.render.title = title.into();
        self
    }

    pub fn empty_cells(mut self, policy: EmptyCellPolicy) -> Self {
        self.config.render.empty_cells = policy;
        self
    }

    pub fn escape_html(mut self, v: bool) -> Self {
        self.config.render.escape_html = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GuideConfig, GuideError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(GuideError::InvalidConfig("max_tokens must be ≥ 1".into()));
        }
        if c.api_timeout_secs == 0 {
            return Err(GuideError::InvalidConfig(
                "api_timeout_secs must be ≥ 1".into(),
            ));
        }
        if c.required_sections.iter().any(|s| s.trim().is_empty()) {
            return Err(GuideError::InvalidConfig(
                "required section titles must not be blank".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GuideConfig::default();
        assert_eq!(c.max_retries, 0);
        assert_eq!(c.api_timeout_secs, 60);
        assert_eq!(c.required_sections.len(), REQUIRED_SECTIONS.len());
        assert_eq!(c.render, RenderOptions::default());
    }

    #[test]
    fn temperature_is_clamped() {
        let c = GuideConfig::builder().temperature(9.0).build().unwrap();
        assert_eq!(c.temperature, 2.0);
    }

    #[test]
    fn zero_max_tokens_rejected() {
        let err = GuideConfig::builder().max_tokens(0).build().unwrap_err();
        assert!(matches!(err, GuideError::InvalidConfig(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(GuideConfig::builder().api_timeout_secs(0).build().is_err());
    }

    #[test]
    fn blank_section_title_rejected() {
        assert!(GuideConfig::builder()
            .required_sections(["Summary", "  "])
            .build()
            .is_err());
    }

    #[test]
    fn render_setters_reach_render_options() {
        let c = GuideConfig::builder()
            .title("Call Review")
            .empty_cells(EmptyCellPolicy::Preserve)
            .escape_html(true)
            .skip_section_check()
            .build()
            .unwrap();
        assert_eq!(c.render.title, "Call Review");
        assert_eq!(c.render.empty_cells, EmptyCellPolicy::Preserve);
        assert!(c.render.escape_html);
        assert!(c.required_sections.is_empty());
    }

    #[test]
    fn debug_hides_provider() {
        let dbg = format!("{:?}", GuideConfig::default());
        assert!(dbg.contains("GuideConfig"));
        assert!(dbg.contains("provider: None"));
    }
}
