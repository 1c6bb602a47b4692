//! Output contract for the quiz generator
//!
//! The model is prompted for a strict JSON shape; this module is the
//! gate that raw output passes through before anything downstream sees
//! it. A question that fails the shape check rejects the whole set,
//! identified by index. Count and distribution drift against the request
//! is flagged, not silently accepted.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{Difficulty, GeneratedQuestion, QuestionType};
use crate::validation::QuizDifficulty;

/// Requested number of questions per difficulty bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyDistribution {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyDistribution {
    /// Mixed distribution: floor thirds, remainder going first to easy,
    /// then medium, never hard
    pub fn for_count(count: usize) -> Self {
        let base = count / 3;
        let remainder = count % 3;
        Self {
            easy: base + usize::from(remainder > 0),
            medium: base + usize::from(remainder > 1),
            hard: base,
        }
    }

    /// Distribution for a request: a named difficulty puts everything in
    /// that bucket
    pub fn for_request(count: usize, difficulty: QuizDifficulty) -> Self {
        match difficulty {
            QuizDifficulty::Easy => Self {
                easy: count,
                medium: 0,
                hard: 0,
            },
            QuizDifficulty::Medium => Self {
                easy: 0,
                medium: count,
                hard: 0,
            },
            QuizDifficulty::Hard => Self {
                easy: 0,
                medium: 0,
                hard: count,
            },
            QuizDifficulty::Mixed => Self::for_count(count),
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }

    /// Tally the actual questions against this distribution
    pub fn matches(&self, questions: &[GeneratedQuestion]) -> bool {
        let mut easy = 0;
        let mut medium = 0;
        let mut hard = 0;
        for q in questions {
            match q.difficulty {
                Difficulty::Easy => easy += 1,
                Difficulty::Medium => medium += 1,
                Difficulty::Hard => hard += 1,
            }
        }
        easy == self.easy && medium == self.medium && hard == self.hard
    }
}

/// A validated question set with drift flags
#[derive(Debug, Clone)]
pub struct QuestionSet {
    pub questions: Vec<GeneratedQuestion>,
    /// The backend returned a different number of questions than requested
    pub count_mismatch: bool,
    /// The per-difficulty tally differs from the requested distribution
    pub distribution_mismatch: bool,
}

/// Strip Markdown code fences the model sometimes wraps JSON in
fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    }
    if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

const REQUIRED_STRING_FIELDS: &[&str] = &["question", "correct_answer", "explanation", "key_concept"];

/// Check one question object and convert it
fn validate_question(value: &Value, index: usize) -> Result<GeneratedQuestion> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::schema_violation(index, "question is not an object"))?;

    if obj.get("id").and_then(Value::as_i64).is_none() {
        return Err(Error::schema_violation(index, "missing integer id"));
    }

    for field in REQUIRED_STRING_FIELDS {
        match obj.get(*field).and_then(Value::as_str) {
            Some(_) => {}
            None => {
                return Err(Error::schema_violation(
                    index,
                    format!("missing required field '{}'", field),
                ))
            }
        }
    }
    // Question text itself must carry content
    if obj["question"].as_str().is_some_and(|s| s.trim().is_empty()) {
        return Err(Error::schema_violation(index, "empty question text"));
    }

    let question: GeneratedQuestion = serde_json::from_value(value.clone())
        .map_err(|e| Error::schema_violation(index, e.to_string()))?;

    match question.question_type {
        QuestionType::MultipleChoice => {
            if question.options.len() != 4 {
                return Err(Error::schema_violation(
                    index,
                    format!(
                        "multiple_choice requires exactly 4 options, got {}",
                        question.options.len()
                    ),
                ));
            }
        }
        _ => {
            if !question.options.is_empty() {
                return Err(Error::schema_violation(
                    index,
                    format!(
                        "{:?} question carries {} options, expected none",
                        question.question_type,
                        question.options.len()
                    ),
                ));
            }
        }
    }

    if question.hints.len() > 3 {
        return Err(Error::schema_violation(
            index,
            format!("at most 3 hints allowed, got {}", question.hints.len()),
        ));
    }

    Ok(question)
}

/// Validate raw model output against the quiz contract
///
/// Unparseable output is a `MalformedOutput` carrying the cleaned text;
/// a bad question rejects the entire set as a `SchemaViolation` naming
/// the offending index. Partial sets are never silently truncated.
pub fn validate_question_set(
    raw: &str,
    requested_count: usize,
    requested: &DifficultyDistribution,
) -> Result<QuestionSet> {
    let cleaned = strip_fences(raw);

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| Error::malformed_output(format!("Failed to parse questions: {}", e), cleaned))?;

    let raw_questions = value
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::malformed_output("missing 'questions' array", cleaned))?;

    let mut questions = Vec::with_capacity(raw_questions.len());
    for (index, raw_question) in raw_questions.iter().enumerate() {
        questions.push(validate_question(raw_question, index)?);
    }

    let count_mismatch = questions.len() != requested_count;
    if count_mismatch {
        tracing::warn!(
            "Quiz backend returned {} questions, {} requested",
            questions.len(),
            requested_count
        );
    }
    let distribution_mismatch = !requested.matches(&questions);
    if distribution_mismatch && !count_mismatch {
        tracing::warn!(
            "Quiz difficulty tally drifted from requested {}/{}/{}",
            requested.easy,
            requested.medium,
            requested.hard
        );
    }

    Ok(QuestionSet {
        questions,
        count_mismatch,
        distribution_mismatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_json(id: i64, difficulty: &str, question_type: &str, options: &[&str]) -> Value {
        serde_json::json!({
            "id": id,
            "difficulty": difficulty,
            "question": format!("Question {}?", id),
            "type": question_type,
            "options": options,
            "correct_answer": "A) Something",
            "explanation": "Step 1: reason it out.",
            "key_concept": "Concept",
            "hints": ["Hint 1"]
        })
    }

    fn set_json(questions: Vec<Value>) -> String {
        serde_json::json!({ "questions": questions }).to_string()
    }

    #[test]
    fn test_mixed_distribution() {
        assert_eq!(
            DifficultyDistribution::for_count(5),
            DifficultyDistribution { easy: 2, medium: 2, hard: 1 }
        );
        assert_eq!(
            DifficultyDistribution::for_count(6),
            DifficultyDistribution { easy: 2, medium: 2, hard: 2 }
        );
        // Remainder of one goes to easy alone
        assert_eq!(
            DifficultyDistribution::for_count(7),
            DifficultyDistribution { easy: 3, medium: 2, hard: 2 }
        );
    }

    #[test]
    fn test_named_difficulty_fills_one_bucket() {
        let dist = DifficultyDistribution::for_request(3, QuizDifficulty::Easy);
        assert_eq!(dist, DifficultyDistribution { easy: 3, medium: 0, hard: 0 });
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn test_fenced_output_parses() {
        let body = set_json(vec![question_json(
            1,
            "easy",
            "multiple_choice",
            &["A) 1", "B) 2", "C) 3", "D) 4"],
        )]);
        let fenced = format!("```json\n{}\n```", body);
        let requested = DifficultyDistribution { easy: 1, medium: 0, hard: 0 };

        let set = validate_question_set(&fenced, 1, &requested).unwrap();
        assert_eq!(set.questions.len(), 1);
        assert!(!set.count_mismatch);
        assert!(!set.distribution_mismatch);
    }

    #[test]
    fn test_unparseable_output_is_malformed_and_keeps_raw() {
        let requested = DifficultyDistribution::for_count(5);
        let err = validate_question_set("I could not generate questions.", 5, &requested)
            .unwrap_err();
        match err {
            Error::MalformedOutput { raw, .. } => {
                assert!(raw.contains("could not generate"));
            }
            other => panic!("expected MalformedOutput, got {:?}", other),
        }
    }

    #[test]
    fn test_three_options_rejects_whole_set_with_index() {
        let body = set_json(vec![
            question_json(1, "easy", "multiple_choice", &["A) 1", "B) 2", "C) 3", "D) 4"]),
            question_json(2, "medium", "multiple_choice", &["A) 1", "B) 2", "C) 3"]),
        ]);
        let requested = DifficultyDistribution { easy: 1, medium: 1, hard: 0 };

        let err = validate_question_set(&body, 2, &requested).unwrap_err();
        match err {
            Error::SchemaViolation { index, message } => {
                assert_eq!(index, 1);
                assert!(message.contains("exactly 4 options"));
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_names_the_question() {
        let mut bad = question_json(1, "easy", "short_answer", &[]);
        bad.as_object_mut().unwrap().remove("key_concept");
        let body = set_json(vec![bad]);
        let requested = DifficultyDistribution { easy: 1, medium: 0, hard: 0 };

        let err = validate_question_set(&body, 1, &requested).unwrap_err();
        match err {
            Error::SchemaViolation { index, message } => {
                assert_eq!(index, 0);
                assert!(message.contains("key_concept"));
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_hints_rejected() {
        let mut bad = question_json(1, "easy", "true_false", &[]);
        bad["hints"] = serde_json::json!(["h1", "h2", "h3", "h4"]);
        let body = set_json(vec![bad]);
        let requested = DifficultyDistribution { easy: 1, medium: 0, hard: 0 };

        let err = validate_question_set(&body, 1, &requested).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { index: 0, .. }));
    }

    #[test]
    fn test_drift_is_flagged_not_rejected() {
        let body = set_json(vec![
            question_json(1, "hard", "short_answer", &[]),
            question_json(2, "hard", "short_answer", &[]),
        ]);
        // Asked for 3 mixed, got 2 hard
        let requested = DifficultyDistribution::for_count(3);

        let set = validate_question_set(&body, 3, &requested).unwrap();
        assert_eq!(set.questions.len(), 2);
        assert!(set.count_mismatch);
        assert!(set.distribution_mismatch);
    }

    #[test]
    fn test_unknown_difficulty_string_is_schema_violation() {
        let body = set_json(vec![question_json(1, "brutal", "short_answer", &[])]);
        let requested = DifficultyDistribution { easy: 1, medium: 0, hard: 0 };

        let err = validate_question_set(&body, 1, &requested).unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { index: 0, .. }));
    }
}
