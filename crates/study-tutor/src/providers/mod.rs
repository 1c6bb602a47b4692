//! Provider abstraction for the LLM backend
//!
//! The generation code talks to `LlmProvider` so the backend can be
//! swapped without touching the generators.

pub mod llm;
pub mod ollama;

pub use llm::LlmProvider;
pub use ollama::OllamaClient;
