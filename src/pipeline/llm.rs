//! LLM interaction: build the evaluation messages and call the provider.
//!
//! This module is intentionally thin: all prompt text lives in
//! [`crate::prompts`] so it can be changed without touching timeout or
//! error-handling logic here.
//!
//! ## Failure policy
//!
//! Each call is bounded by `api_timeout_secs`. By default a failed or
//! timed-out call is reported straight back to the caller (`max_retries = 0`).
//! When retries are enabled the wait doubles after each attempt
//! (`retry_backoff_ms * 2^attempt`), e.g. 500 ms → 1 s → 2 s, and is capped
//! at [`MAX_BACKOFF_MS`].

use crate::config::GuideConfig;
use crate::error::GuideError;
use crate::prompts::{transcript_message, DEFAULT_SYSTEM_PROMPT};
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, warn};

/// Upper bound on the wait between two attempts.
pub const MAX_BACKOFF_MS: u64 = 30_000;

/// Raw generator output plus call accounting.
#[derive(Debug, Clone)]
pub struct Generation {
    pub markdown: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub retries: u32,
    pub duration_ms: u64,
}

/// Ask the LLM to evaluate `transcript` and return the guide text.
///
/// ## Message Layout
///
/// 1. **System message**: the coaching-guide prompt (or user override)
/// 2. **User message**: the transcript, fenced in triple quotes
pub async fn generate_guide_text(
    provider: &Arc<dyn LLMProvider>,
    transcript: &str,
    config: &GuideConfig,
) -> Result<Generation, GuideError> {
    let start = Instant::now();
    let system_prompt = config
        .system_prompt
        .as_deref()
        .unwrap_or(DEFAULT_SYSTEM_PROMPT);

    let messages = vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(transcript_message(transcript)),
    ];
    let options = build_options(config);
    let call_timeout = Duration::from_secs(config.api_timeout_secs);

    let mut last_err: Option<GuideError> = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let backoff = backoff_delay_ms(config.retry_backoff_ms, attempt);
            warn!(
                "Guide generation: retry {}/{} after {}ms",
                attempt, config.max_retries, backoff
            );
            sleep(Duration::from_millis(backoff)).await;
        }

        let attempt_start = Instant::now();
        let err = match timeout(call_timeout, provider.chat(&messages, Some(&options))).await {
            Ok(Ok(response)) if !response.content.trim().is_empty() => {
                let duration = start.elapsed();
                debug!(
                    "Guide generation: {} input tokens, {} output tokens, {:?}",
                    response.prompt_tokens, response.completion_tokens, duration
                );
                return Ok(Generation {
                    markdown: response.content,
                    input_tokens: response.prompt_tokens as u64,
                    output_tokens: response.completion_tokens as u64,
                    retries: attempt,
                    duration_ms: duration.as_millis() as u64,
                });
            }
            Ok(Ok(_)) => GuideError::EmptyGeneration,
            Ok(Err(e)) => GuideError::LlmApiError {
                message: e.to_string(),
                retries: config.max_retries,
            },
            Err(_) => GuideError::ApiTimeout {
                elapsed_ms: attempt_start.elapsed().as_millis() as u64,
            },
        };

        let err_msg = err.to_string();
        warn!("Guide generation: attempt {} failed: {}", attempt + 1, err_msg);
        if let Some(ref cb) = config.progress_callback {
            cb.on_attempt_failed(attempt + 1, &err_msg);
        }
        last_err = Some(err);
    }

    Err(last_err.unwrap_or_else(|| GuideError::LlmApiError {
        message: "Unknown error".to_string(),
        retries: config.max_retries,
    }))
}

/// Wait before retry number `attempt` (1-based), doubling from `base_ms`.
fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    2u64.checked_pow(attempt.saturating_sub(1))
        .map_or(MAX_BACKOFF_MS, |factor| base_ms.saturating_mul(factor))
        .min(MAX_BACKOFF_MS)
}

/// Build `CompletionOptions` from the guide config.
fn build_options(config: &GuideConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_options_defaults() {
        let config = GuideConfig::default();
        let opts = build_options(&config);
        assert_eq!(opts.temperature, Some(0.4));
        assert_eq!(opts.max_tokens, Some(4096));
    }

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff_delay_ms(500, 1), 500);
        assert_eq!(backoff_delay_ms(500, 2), 1_000);
        assert_eq!(backoff_delay_ms(500, 3), 2_000);
        assert_eq!(backoff_delay_ms(500, 10), MAX_BACKOFF_MS);
    }

    #[test]
    fn backoff_never_overflows() {
        assert_eq!(backoff_delay_ms(500, 64), MAX_BACKOFF_MS);
        assert_eq!(backoff_delay_ms(500, u32::MAX), MAX_BACKOFF_MS);
        assert_eq!(backoff_delay_ms(u64::MAX, 2), MAX_BACKOFF_MS);
    }

    #[test]
    fn build_options_follow_builder() {
        let config = GuideConfig::builder()
            .temperature(0.0)
            .max_tokens(1200)
            .build()
            .unwrap();
        let opts = build_options(&config);
        assert_eq!(opts.temperature, Some(0.0));
        assert_eq!(opts.max_tokens, Some(1200));
    }
}
