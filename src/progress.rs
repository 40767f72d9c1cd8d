//! Progress-callback trait for generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::GuideConfigBuilder::progress_callback`] to receive events
//! while a transcript is turned into a coaching guide.
//!
//! A single guide is one LLM call followed by a fast local render, so the
//! events are coarse: start, each failed attempt, generation done, render
//! done. The CLI drives a spinner from them; a server could forward them to
//! a log or a websocket.
//!
//! # Example
//!
//! ```rust
//! use coachguide::{GenerationProgressCallback, GuideConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct FailureCounter {
//!     failures: AtomicUsize,
//! }
//!
//! impl GenerationProgressCallback for FailureCounter {
//!     fn on_attempt_failed(&self, attempt: u32, error: &str) {
//!         self.failures.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("attempt {attempt} failed: {error}");
//!     }
//! }
//!
//! let counter = Arc::new(FailureCounter { failures: AtomicUsize::new(0) });
//!
//! let config = GuideConfig::builder()
//!     .progress_callback(counter as Arc<dyn GenerationProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the generation pipeline as it works through one transcript.
///
/// Implementations must be `Send + Sync`: the HTTP server shares one config
/// (and therefore one callback) across concurrent requests. All methods have
/// default no-op implementations so callers only override what they need.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called once the transcript has been validated, before the LLM call.
    ///
    /// # Arguments
    /// * `transcript_chars`: character count of the trimmed transcript
    fn on_generation_start(&self, transcript_chars: usize) {
        let _ = transcript_chars;
    }

    /// Called after each failed LLM attempt (error or timeout).
    ///
    /// # Arguments
    /// * `attempt`: 1-indexed attempt number
    /// * `error`  : human-readable error description
    fn on_attempt_failed(&self, attempt: u32, error: &str) {
        let _ = (attempt, error);
    }

    /// Called when the LLM has returned the guide markdown.
    ///
    /// # Arguments
    /// * `markdown_len`: byte length of the generated markdown
    fn on_generation_complete(&self, markdown_len: usize) {
        let _ = markdown_len;
    }

    /// Called when the HTML document has been assembled.
    ///
    /// # Arguments
    /// * `html_len`: byte length of the rendered document
    fn on_render_complete(&self, html_len: usize) {
        let _ = html_len;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::GuideConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        started_chars: AtomicUsize,
        failures: AtomicUsize,
        markdown_len: AtomicUsize,
        html_len: AtomicUsize,
    }

    impl GenerationProgressCallback for TrackingCallback {
        fn on_generation_start(&self, transcript_chars: usize) {
            self.started_chars.store(transcript_chars, Ordering::SeqCst);
        }

        fn on_attempt_failed(&self, _attempt: u32, _error: &str) {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }

        fn on_generation_complete(&self, markdown_len: usize) {
            self.markdown_len.store(markdown_len, Ordering::SeqCst);
        }

        fn on_render_complete(&self, html_len: usize) {
            self.html_len.store(html_len, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_generation_start(120);
        cb.on_attempt_failed(1, "rate limited");
        cb.on_generation_complete(2048);
        cb.on_render_complete(4096);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_generation_start(300);
        tracker.on_attempt_failed(1, "timeout");
        tracker.on_attempt_failed(2, "timeout");
        tracker.on_generation_complete(1500);
        tracker.on_render_complete(5200);

        assert_eq!(tracker.started_chars.load(Ordering::SeqCst), 300);
        assert_eq!(tracker.failures.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.markdown_len.load(Ordering::SeqCst), 1500);
        assert_eq!(tracker.html_len.load(Ordering::SeqCst), 5200);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_generation_start(10);
        cb.on_render_complete(512);
    }
}
