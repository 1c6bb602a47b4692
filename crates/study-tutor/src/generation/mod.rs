//! Artifact generation with LLM output contracts

pub mod contract;
pub mod explain;
pub mod notes;
pub mod prompt;
pub mod quiz;

pub use contract::{validate_question_set, DifficultyDistribution, QuestionSet};
pub use explain::Explainer;
pub use notes::{format_notes, NoteGenerator};
pub use prompt::PromptBuilder;
pub use quiz::QuizGenerator;
