//! Image OCR extraction via the tesseract CLI

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};
use crate::types::{MaterialFormat, OcrToken, RawDocument};

use super::Extractor;

/// Image extractor.
///
/// Shells out to tesseract twice: once for plain text and once for the TSV
/// table that carries per-word confidences and bounding boxes. The TSV pass
/// is supplementary; when it fails the extraction still succeeds with text
/// only. Structure is recovered by the shared heading heuristic with
/// leading content filed under "Content".
pub struct ImageExtractor {
    language: String,
}

impl ImageExtractor {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Check that the tesseract binary is on PATH
    pub fn has_tesseract() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Run tesseract on an image, writing to stdout. `extra` appends
    /// config names such as "tsv".
    fn run_tesseract(&self, path: &Path, extra: &[&str]) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(path)
            .arg("stdout")
            .args(["-l", &self.language])
            .args(extra)
            .output()
            .map_err(|e| {
                Error::extraction(MaterialFormat::ImageOcr, format!("failed to run tesseract: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::extraction(
                MaterialFormat::ImageOcr,
                format!("tesseract error: {}", stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Parse tesseract TSV output into word-level tokens plus the page size.
/// Columns: level, page_num, block_num, par_num, line_num, word_num, left,
/// top, width, height, conf, text. Level 1 is the page record, level 5 a
/// recognized word; everything else is grouping structure.
fn parse_ocr_tsv(tsv: &str) -> (Vec<OcrToken>, Option<(u32, u32)>) {
    let mut tokens = Vec::new();
    let mut page_size = None;

    for line in tsv.lines().skip(1) {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }
        match cols[0] {
            "1" => {
                if let (Ok(width), Ok(height)) = (cols[8].parse(), cols[9].parse()) {
                    page_size = Some((width, height));
                }
            }
            "5" => {
                let text = cols[11].trim();
                let confidence: f32 = cols[10].parse().unwrap_or(-1.0);
                if text.is_empty() || confidence < 0.0 {
                    continue;
                }
                tokens.push(OcrToken {
                    text: text.to_string(),
                    confidence,
                    left: cols[6].parse().unwrap_or(0),
                    top: cols[7].parse().unwrap_or(0),
                    width: cols[8].parse().unwrap_or(0),
                    height: cols[9].parse().unwrap_or(0),
                });
            }
            _ => {}
        }
    }

    (tokens, page_size)
}

impl Extractor for ImageExtractor {
    fn format(&self) -> MaterialFormat {
        MaterialFormat::ImageOcr
    }

    fn extract(&self, path: &Path) -> Result<RawDocument> {
        if !Self::has_tesseract() {
            return Err(Error::extraction(
                MaterialFormat::ImageOcr,
                "tesseract is not installed; install with: apt install tesseract-ocr",
            ));
        }

        let text = self.run_tesseract(path, &[])?;
        // Tesseract terminates each page with a form feed
        let text = text.trim_end_matches('\u{c}').trim_end().to_string();
        if text.is_empty() {
            return Err(Error::extraction(
                MaterialFormat::ImageOcr,
                "OCR produced no text from image",
            ));
        }

        let (ocr_data, page_size) = match self.run_tesseract(path, &["tsv"]) {
            Ok(tsv) => {
                let (tokens, size) = parse_ocr_tsv(&tsv);
                (Some(tokens), size)
            }
            Err(e) => {
                tracing::warn!("tesseract TSV pass failed: {}", e);
                (None, None)
            }
        };

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        let mut metadata = HashMap::new();
        metadata.insert(
            "file_name".to_string(),
            serde_json::json!(path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()),
        );
        metadata.insert("file_size".to_string(), serde_json::json!(file_size));
        if let Some((width, height)) = page_size {
            metadata.insert("image_width".to_string(), serde_json::json!(width));
            metadata.insert("image_height".to_string(), serde_json::json!(height));
        }

        tracing::debug!("OCR extracted {} characters from {}", text.len(), path.display());

        let mut raw = RawDocument::new(MaterialFormat::ImageOcr, text);
        raw.metadata = metadata;
        raw.ocr_data = ocr_data;
        Ok(raw)
    }
}
