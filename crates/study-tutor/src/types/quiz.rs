//! Quiz question types

use serde::{Deserialize, Serialize};

/// Difficulty bucket for a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation type of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Calculation,
    Explanation,
}

/// A single quiz question as emitted by the generation backend
///
/// Field names mirror the JSON contract the model is prompted with:
/// `type` on the wire maps to `question_type` here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    /// 1-based question number
    pub id: i64,
    /// Difficulty bucket
    pub difficulty: Difficulty,
    /// Question text
    pub question: String,
    /// Presentation type
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Answer options; exactly 4 for multiple choice, empty otherwise
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct answer (option label for multiple choice)
    pub correct_answer: String,
    /// Step-by-step solution
    pub explanation: String,
    /// Main concept the question tests
    pub key_concept: String,
    /// Progressive hints, at most 3
    #[serde(default)]
    pub hints: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_names() {
        let raw = r#"{
            "id": 1,
            "difficulty": "easy",
            "question": "What unit measures force?",
            "type": "multiple_choice",
            "options": ["A) Joule", "B) Newton", "C) Watt", "D) Pascal"],
            "correct_answer": "B) Newton",
            "explanation": "Step 1: Force is mass times acceleration.",
            "key_concept": "SI units",
            "hints": ["Think of Newton's laws"]
        }"#;
        let q: GeneratedQuestion = serde_json::from_str(raw).unwrap();
        assert_eq!(q.question_type, QuestionType::MultipleChoice);
        assert_eq!(q.difficulty, Difficulty::Easy);
        assert_eq!(q.options.len(), 4);

        // The struct round-trips back to the `type` key, not `question_type`
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "multiple_choice");
        assert!(json.get("question_type").is_none());
    }

    #[test]
    fn test_options_and_hints_default_empty() {
        let raw = r#"{
            "id": 2,
            "difficulty": "hard",
            "question": "Explain entropy.",
            "type": "explanation",
            "correct_answer": "Entropy measures disorder.",
            "explanation": "Entropy quantifies the number of microstates.",
            "key_concept": "Thermodynamics"
        }"#;
        let q: GeneratedQuestion = serde_json::from_str(raw).unwrap();
        assert!(q.options.is_empty());
        assert!(q.hints.is_empty());
    }
}
