//! Word document extraction

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{DocumentUnit, MaterialFormat, RawDocument, StructuredSection};

use super::Extractor;

/// Word (.docx) extractor.
///
/// Paragraphs are walked in document order. Structure comes from named
/// paragraph styles rather than the line heuristic: any style identifier
/// beginning with "Heading" opens a new section and becomes its level
/// label; body text before the first heading collects under a synthesized
/// "Introduction" section with level "Body".
pub struct WordExtractor;

/// Concatenated text of every run in a paragraph
fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// Style identifier carried on the paragraph, if any
fn paragraph_style(paragraph: &docx_rs::Paragraph) -> Option<&str> {
    paragraph.property.style.as_ref().map(|s| s.val.as_str())
}

/// Fold styled paragraphs into heading-delimited sections
fn build_sections(doc: &docx_rs::Docx) -> Vec<StructuredSection> {
    let mut sections = Vec::new();
    let mut current: Option<StructuredSection> = None;

    for child in &doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let text = paragraph_text(paragraph);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            match paragraph_style(paragraph) {
                Some(style) if style.starts_with("Heading") => {
                    if let Some(done) = current.take() {
                        if !done.content.is_empty() {
                            sections.push(done);
                        }
                    }
                    current = Some(StructuredSection::new(text, style));
                }
                _ => {
                    current
                        .get_or_insert_with(|| StructuredSection::new("Introduction", "Body"))
                        .content
                        .push(text.to_string());
                }
            }
        }
    }

    if let Some(done) = current {
        if !done.content.is_empty() {
            sections.push(done);
        }
    }

    sections
}

impl Extractor for WordExtractor {
    fn format(&self) -> MaterialFormat {
        MaterialFormat::Word
    }

    fn extract(&self, path: &Path) -> Result<RawDocument> {
        let data = std::fs::read(path)?;
        let doc = docx_rs::read_docx(&data)
            .map_err(|e| Error::extraction(MaterialFormat::Word, e.to_string()))?;

        let mut num_paragraphs = 0usize;
        let mut paragraphs = Vec::new();
        for child in &doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                num_paragraphs += 1;
                let text = paragraph_text(paragraph);
                let text = text.trim();
                if !text.is_empty() {
                    paragraphs.push(text.to_string());
                }
            }
        }

        let full_text = paragraphs.join("\n\n");
        if full_text.is_empty() {
            return Err(Error::extraction(
                MaterialFormat::Word,
                "document contains no text",
            ));
        }

        let units = paragraphs
            .into_iter()
            .enumerate()
            .map(|(i, text)| DocumentUnit {
                index: (i + 1) as u32,
                text,
            })
            .collect();

        let mut metadata = HashMap::new();
        metadata.insert("num_paragraphs".to_string(), serde_json::json!(num_paragraphs));
        metadata.insert(
            "file_name".to_string(),
            serde_json::json!(path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()),
        );
        metadata.insert("file_size".to_string(), serde_json::json!(data.len()));

        let mut raw = RawDocument::new(MaterialFormat::Word, full_text);
        raw.metadata = metadata;
        raw.units = units;
        Ok(raw)
    }

    fn native_structure(&self, path: &Path) -> Result<Option<Vec<StructuredSection>>> {
        let data = std::fs::read(path)?;
        let doc = docx_rs::read_docx(&data)
            .map_err(|e| Error::extraction(MaterialFormat::Word, e.to_string()))?;
        Ok(Some(build_sections(&doc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a .docx fixture with the given (text, style) paragraphs
    fn write_fixture(paragraphs: &[(&str, Option<&str>)]) -> (tempfile::TempDir, std::path::PathBuf) {
        let mut docx = docx_rs::Docx::new();
        for (text, style) in paragraphs {
            let mut paragraph =
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text));
            if let Some(style) = style {
                paragraph = paragraph.style(style);
            }
            docx = docx.add_paragraph(paragraph);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.docx");
        let file = std::fs::File::create(&path).unwrap();
        docx.build().pack(file).unwrap();
        (dir, path)
    }

    #[test]
    fn test_extract_joins_paragraphs_with_blank_lines() {
        let (_dir, path) = write_fixture(&[
            ("Cell biology basics", None),
            ("", None),
            ("Mitochondria produce ATP", None),
        ]);

        let raw = WordExtractor.extract(&path).unwrap();
        assert_eq!(raw.full_text, "Cell biology basics\n\nMitochondria produce ATP");
        // Empty paragraphs count toward the total but produce no unit
        assert_eq!(raw.metadata["num_paragraphs"], serde_json::json!(3));
        assert_eq!(raw.units.len(), 2);
        assert_eq!(raw.units[1].index, 2);
    }

    #[test]
    fn test_sections_with_preamble_get_synthesized_introduction() {
        let (_dir, path) = write_fixture(&[
            ("Course overview for the term", None),
            ("Mechanics", Some("Heading1")),
            ("Force equals mass times acceleration", None),
        ]);

        let sections = WordExtractor.native_structure(&path).unwrap().unwrap();
        // One heading plus the pre-heading run: N+1 sections
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Introduction");
        assert_eq!(sections[0].level, "Body");
        assert_eq!(sections[0].content, vec!["Course overview for the term"]);
        assert_eq!(sections[1].heading, "Mechanics");
        assert_eq!(sections[1].level, "Heading1");
    }

    #[test]
    fn test_sections_without_preamble() {
        let (_dir, path) = write_fixture(&[
            ("Mechanics", Some("Heading1")),
            ("Bodies at rest stay at rest", None),
            ("Waves", Some("Heading2")),
            ("Frequency times wavelength gives speed", None),
        ]);

        let sections = WordExtractor.native_structure(&path).unwrap().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Mechanics");
        assert_eq!(sections[1].level, "Heading2");
    }

    #[test]
    fn test_trailing_heading_without_content_is_dropped() {
        let (_dir, path) = write_fixture(&[
            ("Optics", Some("Heading1")),
            ("Light bends at interfaces", None),
            ("Further Reading", Some("Heading1")),
        ]);

        let sections = WordExtractor.native_structure(&path).unwrap().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Optics");
    }

    #[test]
    fn test_corrupt_docx_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"zip? never heard of it").unwrap();

        let err = WordExtractor.extract(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Extraction {
                format: MaterialFormat::Word,
                ..
            }
        ));
    }
}
