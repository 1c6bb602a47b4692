//! Request parameter and upload validation
//!
//! Parameter validation is lenient: a value outside the allowed set is
//! replaced by its documented default and logged, never rejected. Upload
//! validation and empty-text checks are the hard-failing exceptions.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::SUPPORTED_EXTENSIONS;

/// Academic level of the student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Study focus for notes generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ConceptOriented,
    ExamOriented,
}

impl Focus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConceptOriented => "concept-oriented",
            Self::ExamOriented => "exam-oriented",
        }
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requested quiz difficulty, including the mixed distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizDifficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl QuizDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for QuizDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize an academic level, defaulting to intermediate
pub fn validate_level(input: &str) -> Level {
    match input.trim().to_lowercase().as_str() {
        "beginner" => Level::Beginner,
        "intermediate" | "" => Level::Intermediate,
        "advanced" => Level::Advanced,
        other => {
            tracing::warn!("Invalid level {:?}, using intermediate", other);
            Level::Intermediate
        }
    }
}

/// Normalize a study focus, defaulting to concept-oriented
pub fn validate_focus(input: &str) -> Focus {
    match input.trim().to_lowercase().as_str() {
        "concept-oriented" | "" => Focus::ConceptOriented,
        "exam-oriented" => Focus::ExamOriented,
        other => {
            tracing::warn!("Invalid focus {:?}, using concept-oriented", other);
            Focus::ConceptOriented
        }
    }
}

/// Normalize a quiz difficulty, defaulting to mixed
pub fn validate_difficulty(input: &str) -> QuizDifficulty {
    match input.trim().to_lowercase().as_str() {
        "easy" => QuizDifficulty::Easy,
        "medium" => QuizDifficulty::Medium,
        "hard" => QuizDifficulty::Hard,
        "mixed" | "" => QuizDifficulty::Mixed,
        other => {
            tracing::warn!("Invalid difficulty {:?}, using mixed", other);
            QuizDifficulty::Mixed
        }
    }
}

/// Clamp the question count into the allowed 1-20 range
///
/// Anything below 1 falls back to the default of 5; anything above 20 is
/// capped at 20.
pub fn validate_num_questions(num: i64) -> usize {
    if num < 1 {
        tracing::warn!("Question count {} below 1, using 5", num);
        5
    } else if num > 20 {
        tracing::warn!("Question count {} above 20, using 20", num);
        20
    } else {
        num as usize
    }
}

/// Trim and truncate free-form text input
///
/// Truncation counts characters, not bytes. Returns an empty string for
/// whitespace-only input; callers that require text treat that as a hard
/// failure.
pub fn sanitize_text(text: &str, max_length: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > max_length {
        trimmed.chars().take(max_length).collect()
    } else {
        trimmed.to_string()
    }
}

/// Outcome of a successful upload validation
#[derive(Debug, Clone)]
pub struct FileCheck {
    /// Lowercased extension including the leading dot
    pub extension: String,
    /// File size in bytes
    pub size: u64,
}

/// Validate an uploaded file: known extension, within the size cap,
/// and readable
pub fn validate_file(path: &Path, max_size: u64) -> Result<FileCheck> {
    if !path.exists() {
        return Err(Error::validation("File does not exist"));
    }

    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::unsupported_format(&extension));
    }

    let size = std::fs::metadata(path)?.len();
    if size > max_size {
        return Err(Error::validation(format!(
            "File too large: {} bytes (max: {} bytes)",
            size, max_size
        )));
    }

    let mut probe = [0u8; 1];
    std::fs::File::open(path)
        .and_then(|mut f| f.read(&mut probe))
        .map_err(|e| Error::validation(format!("File not readable: {}", e)))?;

    Ok(FileCheck { extension, size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_level_case_insensitive() {
        assert_eq!(validate_level("ADVANCED"), Level::Advanced);
        assert_eq!(validate_level("Beginner"), Level::Beginner);
    }

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        assert_eq!(validate_level("phd"), Level::Intermediate);
        assert_eq!(validate_level(""), Level::Intermediate);
        assert_eq!(validate_focus("vibes-oriented"), Focus::ConceptOriented);
        assert_eq!(validate_difficulty("extreme"), QuizDifficulty::Mixed);
    }

    #[test]
    fn test_num_questions_clamping() {
        assert_eq!(validate_num_questions(0), 5); // below range resets to the default
        assert_eq!(validate_num_questions(-3), 5);
        assert_eq!(validate_num_questions(1), 1);
        assert_eq!(validate_num_questions(7), 7);
        assert_eq!(validate_num_questions(20), 20);
        assert_eq!(validate_num_questions(21), 20); // above range caps
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  what is torque?  ", 1000), "what is torque?");
        assert_eq!(sanitize_text("   \t\n ", 1000), "");
        // Truncation is by character so multibyte input cannot split
        assert_eq!(sanitize_text("héllo", 3), "hél");
    }

    #[test]
    fn test_validate_file_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.xlsx");
        std::fs::write(&path, b"data").unwrap();

        let err = validate_file(&path, 1024).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn test_validate_file_size_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0u8; 64]).unwrap();

        let err = validate_file(&path, 10).unwrap_err();
        assert!(err.to_string().contains("File too large"));
    }

    #[test]
    fn test_validate_file_accepts_small_known_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.PPTX");
        std::fs::write(&path, b"PK").unwrap();

        let check = validate_file(&path, 1024).unwrap();
        assert_eq!(check.extension, ".pptx");
        assert_eq!(check.size, 2);
    }

    #[test]
    fn test_validate_file_missing() {
        let err = validate_file(Path::new("/nonexistent/notes.pdf"), 1024).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
