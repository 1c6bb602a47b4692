//! Concept explanation
//!
//! Three operations share one tutor persona: answer a question (with
//! optional material context), re-explain an answer in simpler terms,
//! and present a concept from three different angles.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::prompt::PromptBuilder;
use crate::providers::LlmProvider;
use crate::types::{
    AnswerMetadata, AnswerResponse, ApproachesMetadata, ApproachesResponse, SimplerMetadata,
    SimplerResponse,
};

const EXPLAINER_SYSTEM: &str = "You are a patient, friendly tutor who excels at explaining complex concepts in simple, clear ways. You never assume prior knowledge and always break things down step-by-step.";

const EXPLAINER_TEMPERATURE: f32 = 0.7;
const EXPLAINER_MAX_TOKENS: u32 = 3000;

/// Explains concepts at the student's level
pub struct Explainer {
    provider: Arc<dyn LlmProvider>,
}

impl Explainer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    async fn respond(&self, prompt: &str) -> Result<String> {
        self.provider
            .generate(prompt, EXPLAINER_SYSTEM, EXPLAINER_TEMPERATURE, EXPLAINER_MAX_TOKENS)
            .await
    }

    /// Answer a student question, optionally grounded in material text
    pub async fn explain_concept(
        &self,
        question: &str,
        context: Option<&str>,
        level: &str,
    ) -> Result<AnswerResponse> {
        tracing::info!(
            "Explaining question (level: {}, context: {})",
            level,
            context.is_some()
        );

        let prompt = PromptBuilder::ask_prompt(question, context, level);
        let explanation = self.respond(&prompt).await?;
        let word_count = explanation.split_whitespace().count();

        Ok(AnswerResponse {
            success: true,
            explanation,
            metadata: AnswerMetadata {
                level: level.to_string(),
                has_context: context.is_some(),
                word_count,
            },
        })
    }

    /// Re-explain a previous answer at ELI5 level
    pub async fn explain_simpler(
        &self,
        original_explanation: &str,
        question: &str,
    ) -> Result<SimplerResponse> {
        tracing::info!("Simplifying a previous explanation");

        let prompt = PromptBuilder::simpler_prompt(original_explanation, question);
        let explanation = self.respond(&prompt).await?;
        let word_count = explanation.split_whitespace().count();

        Ok(SimplerResponse {
            success: true,
            explanation,
            metadata: SimplerMetadata {
                simplified: true,
                word_count,
            },
        })
    }

    /// Explain a concept three different ways in one response
    pub async fn multiple_approaches(&self, concept: &str) -> Result<ApproachesResponse> {
        tracing::info!("Generating multiple approaches for a concept");

        let prompt = PromptBuilder::approaches_prompt(concept);
        let approaches = self.respond(&prompt).await?;
        let word_count = approaches.split_whitespace().count();

        Ok(ApproachesResponse {
            success: true,
            approaches,
            metadata: ApproachesMetadata {
                num_approaches: 3,
                word_count,
            },
        })
    }
}
