//! Material types: extracted documents, normalized sections, and the stored unit

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Supported study-material formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaterialFormat {
    /// PDF document
    Pdf,
    /// Word document (.docx, .doc)
    Word,
    /// Slide deck (.pptx, .ppt)
    Slides,
    /// Raster image processed through OCR
    ImageOcr,
}

/// Every extension the intake layer accepts, with the leading dot.
///
/// Deletion sweeps the upload directory for all of these, so the list must
/// stay in sync with `MaterialFormat::from_extension`.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".pdf", ".docx", ".doc", ".pptx", ".ppt", ".jpg", ".jpeg", ".png", ".bmp", ".tiff", ".gif",
];

impl MaterialFormat {
    /// Detect format from a file extension (without the dot, case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" | "doc" => Some(Self::Word),
            "pptx" | "ppt" => Some(Self::Slides),
            "jpg" | "jpeg" | "png" | "bmp" | "tiff" | "gif" => Some(Self::ImageOcr),
            _ => None,
        }
    }

    /// Detect format from a file name or path
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = path.rsplit('.').next().unwrap_or("");
        if ext.len() == path.len() {
            return None;
        }
        Self::from_extension(ext)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Word => "Word Document",
            Self::Slides => "Slide Deck",
            Self::ImageOcr => "Image (OCR)",
        }
    }

    /// Short tag used in error messages and logs
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Slides => "slides",
            Self::ImageOcr => "image_ocr",
        }
    }
}

impl std::fmt::Display for MaterialFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One format-native unit of extracted text: a page (PDF), a slide (deck),
/// or a paragraph (Word). OCR output has no units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUnit {
    /// 1-indexed position within the source file
    pub index: u32,
    /// Trimmed unit text
    pub text: String,
}

/// One recognized token from OCR with its confidence and pixel position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrToken {
    pub text: String,
    /// Engine confidence, 0-100
    pub confidence: f32,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Direct output of a format extractor, before structuring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    /// Source format
    pub format: MaterialFormat,
    /// All extracted text, units separated by blank lines. Never empty:
    /// extraction fails with a typed error instead of producing an empty
    /// document.
    pub full_text: String,
    /// Format-specific metadata (page/slide/paragraph counts, image
    /// dimensions, file name, file size)
    pub metadata: HashMap<String, serde_json::Value>,
    /// Ordered format-native units; empty for OCR output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<DocumentUnit>,
    /// Per-token OCR confidence table, present only for image input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_data: Option<Vec<OcrToken>>,
}

impl RawDocument {
    /// Create a raw document with empty metadata
    pub fn new(format: MaterialFormat, full_text: String) -> Self {
        Self {
            format,
            full_text,
            metadata: HashMap::new(),
            units: Vec::new(),
            ocr_data: None,
        }
    }
}

/// A heading-delimited chunk of normalized content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredSection {
    /// Detected heading, or a synthesized default ("Introduction", "Content")
    pub heading: String,
    /// Format-specific level label: a Word style name, "Slide N", or a
    /// generic label for heuristic output
    pub level: String,
    /// Non-empty, whitespace-trimmed content lines
    pub content: Vec<String>,
}

impl StructuredSection {
    pub fn new(heading: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            level: level.into(),
            content: Vec::new(),
        }
    }
}

/// The stored, immutable unit representing one ingested file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique material ID, assigned at upload
    pub id: Uuid,
    /// Original filename as uploaded
    pub file_name: String,
    /// Subject hint supplied at upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Extractor output
    pub raw: RawDocument,
    /// Normalized sections, present when structure extraction was requested
    /// and the extractor produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<StructuredSection>>,
    /// SHA-256 of the extracted text
    pub content_hash: String,
    /// Source file size in bytes
    pub file_size: u64,
    /// Upload timestamp
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl Material {
    /// Create a material record from extractor output
    pub fn new(
        id: Uuid,
        file_name: String,
        subject: Option<String>,
        raw: RawDocument,
        sections: Option<Vec<StructuredSection>>,
        content_hash: String,
        file_size: u64,
    ) -> Self {
        Self {
            id,
            file_name,
            subject,
            raw,
            sections,
            content_hash,
            file_size,
            uploaded_at: chrono::Utc::now(),
        }
    }

    /// Length of the extracted text in characters
    pub fn content_length(&self) -> usize {
        self.raw.full_text.chars().count()
    }

    /// Whether normalized sections are available
    pub fn has_structure(&self) -> bool {
        self.sections.is_some()
    }
}
