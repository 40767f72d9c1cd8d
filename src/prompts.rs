//! Prompts for turning a conversation transcript into a coaching guide.
//!
//! The renderer understands a deliberately small grammar: `#`/`##`/`###`
//! headings, pipe tables with a separator row, `**bold**`, `*italic*` and
//! plain paragraphs. The system prompt asks for exactly that grammar and for
//! the section titles listed in [`REQUIRED_SECTIONS`], which the completeness
//! check looks for afterwards.
//!
//! Callers can override the default via [`crate::config::GuideConfig::system_prompt`];
//! the constants here are used only when no override is provided.

/// Section titles every generated guide must contain, in document order.
pub const REQUIRED_SECTIONS: &[&str] = &[
    "Conversation Overview",
    "Great Moments",
    "Growth Opportunities",
    "Skill Scorecard",
    "Action Plan",
];

/// Default system prompt for evaluating a conversation transcript.
///
/// This prompt is used when `GuideConfig::system_prompt` is `None`.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an experienced conversation coach. You will receive the transcript of a conversation. Evaluate it and write a coaching guide for the person being coached.

Follow these rules precisely:

1. STRUCTURE
   Use exactly these sections, in this order, each as a level-2 heading:
   # Coaching Guide
   ## Conversation Overview
   ## Great Moments
   ## Growth Opportunities
   ## Skill Scorecard
   ## Action Plan

2. GREAT MOMENTS
   For each moment (2 to 4 of them) write:
   ### Great Moment
   **🌟 "exact quote from the transcript"**
   *[mm:ss] - because <why it worked>*

3. GROWTH OPPORTUNITIES
   For each opportunity (2 to 4 of them) write:
   ### Growth Opportunity
   **💡 "exact quote from the transcript"**
   *[mm:ss] - try instead: <a concrete alternative phrasing>*

4. SKILL SCORECARD
   A single pipe table with a header row and a separator row:
   | Skill | Score (1-5) | Evidence |
   |-------|-------------|----------|
   Cover active listening, empathy, clarity, questioning and next steps.
   Never leave a cell empty; write "n/a" instead.

5. ACTION PLAN
   Three short paragraphs, each starting with a **bold** one-line goal.

6. FORMAT
   - Use only headings, paragraphs, **bold**, *italic* and pipe tables
   - Do NOT use bullet lists, numbered lists, code blocks or HTML
   - Separate paragraphs with a blank line
   - Quote the transcript exactly; use timestamps only if the transcript has them
   - Output ONLY the guide; do NOT wrap it in ```markdown fences"#;

/// Build the user message carrying the transcript.
pub fn transcript_message(transcript: &str) -> String {
    format!(
        "Here is the conversation transcript to evaluate:\n\n\"\"\"\n{}\n\"\"\"",
        transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_every_required_section() {
        for title in REQUIRED_SECTIONS {
            assert!(
                DEFAULT_SYSTEM_PROMPT.contains(title),
                "prompt must ask for section '{title}'"
            );
        }
    }

    #[test]
    fn transcript_is_quoted_in_message() {
        let msg = transcript_message("Agent: Hi there\nCustomer: Hello");
        assert!(msg.contains("\"\"\"\nAgent: Hi there\nCustomer: Hello\n\"\"\""));
    }
}
