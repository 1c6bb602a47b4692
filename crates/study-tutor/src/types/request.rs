//! Request types for the tutor endpoints
//!
//! Parameter fields arrive as free-form strings and are normalized by the
//! validation layer, which substitutes documented defaults for unknown
//! values instead of rejecting the request.

use serde::{Deserialize, Serialize};

/// Request for study-notes generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesRequest {
    /// Material to generate notes from
    pub material_id: String,

    /// Subject area (optional)
    #[serde(default)]
    pub subject: Option<String>,

    /// Academic level: beginner, intermediate, or advanced
    #[serde(default = "default_level")]
    pub level: String,

    /// Focus: concept-oriented or exam-oriented
    #[serde(default = "default_focus")]
    pub focus: String,
}

/// Request for practice-quiz generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    /// Material to generate questions from
    pub material_id: String,

    /// Number of questions (clamped to 1-20)
    #[serde(default = "default_num_questions")]
    pub num_questions: i64,

    /// Difficulty: easy, medium, hard, or mixed
    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    /// Subject area (optional)
    #[serde(default)]
    pub subject: Option<String>,
}

/// Request for answering a student question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    pub question: String,

    /// Material to pull context from (optional)
    #[serde(default)]
    pub material_id: Option<String>,

    /// Academic level: beginner, intermediate, or advanced
    #[serde(default = "default_level")]
    pub level: String,
}

/// Request for a simpler restatement of an earlier explanation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplerRequest {
    /// The explanation that did not land
    pub original_explanation: String,

    /// The question that started the exchange
    pub question: String,
}

/// Request for explaining one concept several different ways
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproachesRequest {
    /// The concept to explain
    pub concept: String,
}

fn default_level() -> String {
    "intermediate".to_string()
}

fn default_focus() -> String {
    "concept-oriented".to_string()
}

fn default_difficulty() -> String {
    "mixed".to_string()
}

fn default_num_questions() -> i64 {
    5
}
