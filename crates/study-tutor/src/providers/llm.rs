//! LLM provider trait for text generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-backed text generation
///
/// The tutor only needs plain completions: a prompt, a system preamble,
/// and per-call sampling knobs. Implementations wrap whatever backend is
/// configured (Ollama locally).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text from a prompt with a system preamble
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
