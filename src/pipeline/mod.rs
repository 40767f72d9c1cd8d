//! Pipeline stages for transcript-to-guide generation.
//!
//! Each submodule implements exactly one step, which keeps every stage
//! independently testable; only [`llm`] does network I/O.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ llm ──▶ postprocess ──▶ sections ──▶ crate::render
//! (validate) (LLM)  (cleanup)      (completeness) (HTML document)
//! ```
//!
//! 1. [`input`]      : read the transcript and reject empty input
//! 2. [`llm`]        : prompt the generation service under a timeout
//! 3. [`postprocess`]: deterministic cleanup of generator quirks (fences,
//!    CRLF, invisible characters, stray table separators)
//! 4. [`sections`]   : confirm every required section title is present

pub mod input;
pub mod llm;
pub mod postprocess;
pub mod sections;
