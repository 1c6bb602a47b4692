//! Practice quiz generation
//!
//! Builds a difficulty distribution for the request, prompts the LLM
//! for strict JSON, and runs the output through the contract validator
//! before anything reaches a client.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::contract::{validate_question_set, DifficultyDistribution};
use crate::generation::prompt::PromptBuilder;
use crate::providers::LlmProvider;
use crate::types::{QuizMetadata, QuizResponse};
use crate::validation::QuizDifficulty;

const QUIZ_SYSTEM: &str =
    "You are an expert at creating educational practice questions with detailed solutions.";

const QUIZ_TEMPERATURE: f32 = 0.8;
const QUIZ_MAX_TOKENS: u32 = 3000;

/// Generates validated practice question sets
pub struct QuizGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl QuizGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Generate a practice quiz over the given content
    ///
    /// `num_questions` and `difficulty` are expected pre-validated. The
    /// returned metadata carries drift flags instead of pretending the
    /// backend honored the request exactly.
    pub async fn generate(
        &self,
        content: &str,
        subject: Option<&str>,
        num_questions: usize,
        difficulty: QuizDifficulty,
    ) -> Result<QuizResponse> {
        let distribution = DifficultyDistribution::for_request(num_questions, difficulty);

        tracing::info!(
            "Generating quiz ({} questions, {} difficulty, {}/{}/{} split)",
            num_questions,
            difficulty,
            distribution.easy,
            distribution.medium,
            distribution.hard
        );

        let prompt = PromptBuilder::quiz_prompt(content, subject, &distribution);
        let raw = self
            .provider
            .generate(&prompt, QUIZ_SYSTEM, QUIZ_TEMPERATURE, QUIZ_MAX_TOKENS)
            .await?;

        let set = validate_question_set(&raw, num_questions, &distribution)?;

        Ok(QuizResponse {
            success: true,
            metadata: QuizMetadata {
                total_questions: set.questions.len(),
                subject: subject.map(str::to_string),
                difficulty: difficulty.to_string(),
                requested_questions: num_questions,
                count_mismatch: set.count_mismatch,
                distribution_mismatch: set.distribution_mismatch,
            },
            questions: set.questions,
        })
    }
}
