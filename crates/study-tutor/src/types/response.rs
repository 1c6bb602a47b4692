//! Response types for the tutor endpoints

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::material::{Material, MaterialFormat};
use super::quiz::GeneratedQuestion;

/// Payload returned after a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Assigned material ID
    pub material_id: Uuid,
    /// Original filename as uploaded
    pub filename: String,
    /// Detected format
    pub format: MaterialFormat,
    /// Format-specific extraction metadata
    pub metadata: HashMap<String, serde_json::Value>,
    /// Subject as supplied in the form (optional)
    pub subject: Option<String>,
    pub message: String,
}

impl UploadResponse {
    pub fn new(material: &Material) -> Self {
        Self {
            success: true,
            material_id: material.id,
            filename: material.file_name.clone(),
            format: material.raw.format,
            metadata: material.raw.metadata.clone(),
            subject: material.subject.clone(),
            message: "File uploaded and processed successfully".to_string(),
        }
    }
}

/// Summary view of one stored material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub success: bool,
    pub material_id: Uuid,
    pub format: MaterialFormat,
    pub metadata: HashMap<String, serde_json::Value>,
    /// Whether a structure pass produced sections for this material
    pub has_structure: bool,
    /// Extracted text length in characters
    pub content_length: usize,
    /// Number of structured sections (0 without structure)
    pub num_sections: usize,
}

impl From<&Material> for MaterialSummary {
    fn from(material: &Material) -> Self {
        Self {
            success: true,
            material_id: material.id,
            format: material.raw.format,
            metadata: material.raw.metadata.clone(),
            has_structure: material.has_structure(),
            content_length: material.content_length(),
            num_sections: material.sections.as_ref().map_or(0, |s| s.len()),
        }
    }
}

/// One row of the material listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialListItem {
    pub material_id: Uuid,
    pub format: MaterialFormat,
    pub file_name: String,
    pub content_length: usize,
}

impl From<&Material> for MaterialListItem {
    fn from(material: &Material) -> Self {
        Self {
            material_id: material.id,
            format: material.raw.format,
            file_name: material.file_name.clone(),
            content_length: material.content_length(),
        }
    }
}

/// Listing of all stored materials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialListResponse {
    pub success: bool,
    pub count: usize,
    pub materials: Vec<MaterialListItem>,
}

impl MaterialListResponse {
    pub fn new(materials: Vec<MaterialListItem>) -> Self {
        Self {
            success: true,
            count: materials.len(),
            materials,
        }
    }
}

/// Study notes with generation metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesResponse {
    pub success: bool,
    /// Markdown notes text
    pub notes: String,
    pub metadata: NotesMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesMetadata {
    pub subject: Option<String>,
    pub level: String,
    pub focus: String,
    /// Whitespace-delimited word count of the notes text
    pub word_count: usize,
}

/// Practice quiz with the validated question set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub questions: Vec<GeneratedQuestion>,
    pub metadata: QuizMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizMetadata {
    /// Number of questions actually returned
    pub total_questions: usize,
    pub subject: Option<String>,
    pub difficulty: String,
    /// Number of questions the caller asked for
    pub requested_questions: usize,
    /// True when the backend returned a different number of questions
    /// than requested
    pub count_mismatch: bool,
    /// True when the per-difficulty tally differs from the requested
    /// distribution
    pub distribution_mismatch: bool,
}

/// Answer to a student question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub success: bool,
    pub explanation: String,
    pub metadata: AnswerMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerMetadata {
    pub level: String,
    /// Whether material context was included in the prompt
    pub has_context: bool,
    pub word_count: usize,
}

/// Simplified restatement of an earlier explanation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplerResponse {
    pub success: bool,
    pub explanation: String,
    pub metadata: SimplerMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplerMetadata {
    pub simplified: bool,
    pub word_count: usize,
}

/// A concept explained through several different approaches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproachesResponse {
    pub success: bool,
    pub approaches: String,
    pub metadata: ApproachesMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproachesMetadata {
    pub num_approaches: usize,
    pub word_count: usize,
}
