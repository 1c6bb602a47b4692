//! Study note generation
//!
//! Turns extracted material text into structured Markdown study notes
//! via a single LLM call, then normalizes the Markdown spacing.

use std::sync::Arc;

use regex::Regex;

use crate::error::Result;
use crate::generation::prompt::PromptBuilder;
use crate::providers::LlmProvider;
use crate::types::{NotesMetadata, NotesResponse};

const NOTES_SYSTEM: &str =
    "You are an expert study tutor who creates clear, structured, and comprehensive study notes.";

const NOTES_TEMPERATURE: f32 = 0.7;
const NOTES_MAX_TOKENS: u32 = 4000;

/// Generates study notes from material content
pub struct NoteGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl NoteGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Generate formatted study notes for the given content
    ///
    /// `level` and `focus` are expected pre-validated; `subject` is
    /// free-form and lands in the prompt as-is.
    pub async fn generate(
        &self,
        content: &str,
        subject: Option<&str>,
        level: &str,
        focus: &str,
    ) -> Result<NotesResponse> {
        tracing::info!(
            "Generating notes (level: {}, focus: {}, {} chars of material)",
            level,
            focus,
            content.chars().count()
        );

        let prompt = PromptBuilder::notes_prompt(content, subject, level, focus);
        let raw = self
            .provider
            .generate(&prompt, NOTES_SYSTEM, NOTES_TEMPERATURE, NOTES_MAX_TOKENS)
            .await?;

        // Word count reflects the response as generated, before spacing
        // normalization shifts any tokens around
        let word_count = raw.split_whitespace().count();
        let notes = format_notes(&raw);

        Ok(NotesResponse {
            success: true,
            notes,
            metadata: NotesMetadata {
                subject: subject.map(str::to_string),
                level: level.to_string(),
                focus: focus.to_string(),
                word_count,
            },
        })
    }
}

/// Normalize Markdown spacing in generated notes
///
/// Headings get blank lines on both sides and the highlight emojis are
/// pinned one space before their bold markers.
pub fn format_notes(notes: &str) -> String {
    let mut formatted = notes.to_string();

    if let Ok(re) = Regex::new(r"\n(#{1,6}\s)") {
        formatted = re.replace_all(&formatted, "\n\n$1").into_owned();
    }
    if let Ok(re) = Regex::new(r"(#{1,6}\s[^\n]+)\n") {
        formatted = re.replace_all(&formatted, "$1\n\n").into_owned();
    }
    if let Ok(re) = Regex::new(r"([⭐⚠️🧠])\s*\*\*") {
        formatted = re.replace_all(&formatted, "$1 **").into_owned();
    }

    formatted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_get_breathing_room() {
        let raw = "Intro line\n## Key Concepts\nFirst point";
        let formatted = format_notes(raw);
        // Blank line inserted on both sides of the heading
        assert!(formatted.contains("Intro line\n\n## Key Concepts\n\nFirst point"));
    }

    #[test]
    fn test_emoji_markers_snug_to_bold() {
        let raw = "⭐   **Important Points:**\n- one";
        let formatted = format_notes(raw);
        assert!(formatted.starts_with("⭐ **Important Points:**"));
    }

    #[test]
    fn test_output_is_trimmed() {
        assert_eq!(format_notes("\n\n# Title\n\n"), "# Title");
    }

    #[test]
    fn test_plain_text_untouched() {
        let raw = "Just a paragraph with no markup.";
        assert_eq!(format_notes(raw), raw);
    }
}
