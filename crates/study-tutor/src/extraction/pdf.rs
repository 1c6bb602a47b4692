//! PDF text extraction

use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{DocumentUnit, MaterialFormat, RawDocument};

use super::Extractor;

/// Glyph-name residue that pdf-extract leaves behind for fonts without a
/// usable Unicode mapping, replaced with plain-text equivalents.
const GLYPH_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("uni2010", "-"),
    ("uni2011", "-"),
    ("uni2013", "-"),
    ("uni2014", "--"),
    ("uni2018", "'"),
    ("uni2019", "'"),
    ("uni201C", "\""),
    ("uni201D", "\""),
    ("uni2022", "* "),
    ("uni2026", "..."),
    ("uni00A0", " "),
    ("fi", "fi"),
    ("fl", "fl"),
    ("ff", "ff"),
    ("ffi", "ffi"),
    ("ffl", "ffl"),
    ("f_i", "fi"),
    ("f_l", "fl"),
    ("f_f", "ff"),
];

/// Ligature and punctuation code points that trip up the heading heuristic
/// and downstream prompts, folded to ASCII.
const CHAR_SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "--"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2022}', "* "),
    ('\u{2026}', "..."),
    ('\u{00A0}', " "),
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Normalize pdf-extract output: resolve glyph-name residue in parentheses
/// or angle brackets, then fold typographic characters to ASCII.
fn cleanup_pdf_text(text: &str) -> String {
    let mut result = text.to_string();

    for (glyph, replacement) in GLYPH_SUBSTITUTIONS {
        let wrapped = [format!("({glyph})"), format!("<{glyph}>")];
        for pattern in &wrapped {
            if result.contains(pattern.as_str()) {
                result = result.replace(pattern.as_str(), replacement);
            }
        }
        // Bare uniXXXX names cannot occur in prose, so those are safe to
        // substitute unwrapped as well
        if glyph.starts_with("uni") && result.contains(glyph) {
            result = result.replace(glyph, replacement);
        }
    }

    for (ch, replacement) in CHAR_SUBSTITUTIONS {
        if result.contains(*ch) {
            result = result.replace(*ch, replacement);
        }
    }

    result.replace('\0', "")
}

/// Trim every line and drop the empty ones
fn tidy_page(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// PDF extractor.
///
/// Pulls per-page text with pdf-extract under a watchdog timeout (complex
/// embedded fonts can hang the decoder), falling back to a crude lopdf
/// content-stream scan when the primary path fails. Structure is recovered
/// by the shared heading heuristic, with leading content filed under
/// "Introduction".
pub struct PdfExtractor {
    timeout: Duration,
}

impl PdfExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run pdf-extract on a worker thread so a decoder hang cannot wedge
    /// the request. On failure or timeout the lopdf fallback is tried.
    fn extract_pages_with_timeout(&self, data: &[u8]) -> Result<Vec<String>> {
        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem_by_pages(&data_vec);
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(pages)) => {
                let _ = handle.join();
                Ok(pages)
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!("pdf-extract failed: {}, trying lopdf fallback", e);
                Self::extract_pages_fallback(data)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The worker thread cannot be killed; it is left to finish
                // on its own while the request moves on.
                tracing::error!(
                    "PDF extraction timed out after {}s, trying lopdf fallback",
                    self.timeout.as_secs()
                );
                Self::extract_pages_fallback(data)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::error!("PDF extraction thread crashed, trying lopdf fallback");
                Self::extract_pages_fallback(data)
            }
        }
    }

    /// Fallback: scan each page's content stream for text-show operators.
    /// Far less capable than pdf-extract but immune to its font handling.
    fn extract_pages_fallback(data: &[u8]) -> Result<Vec<String>> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::extraction(MaterialFormat::Pdf, format!("failed to load PDF: {}", e)))?;

        let mut pages = Vec::new();
        for (page_num, page_id) in doc.get_pages() {
            match doc.get_page_content(page_id) {
                Ok(content) => pages.push(scan_content_stream(&content)),
                Err(e) => {
                    tracing::debug!("no content stream for page {}: {}", page_num, e);
                    pages.push(String::new());
                }
            }
        }

        if pages.iter().all(|p| p.trim().is_empty()) {
            return Err(Error::extraction(
                MaterialFormat::Pdf,
                "PDF appears to be image-based or has no extractable text",
            ));
        }

        Ok(pages)
    }

    /// Page count straight from the page tree, independent of how much text
    /// the decoder recovered.
    fn count_pages(data: &[u8], extracted: usize) -> usize {
        match lopdf::Document::load_mem(data) {
            Ok(doc) => doc.get_pages().len(),
            Err(_) => extracted,
        }
    }
}

impl Extractor for PdfExtractor {
    fn format(&self) -> MaterialFormat {
        MaterialFormat::Pdf
    }

    fn extract(&self, path: &Path) -> Result<RawDocument> {
        let data = std::fs::read(path)?;
        let raw_pages = self.extract_pages_with_timeout(&data)?;

        let mut units = Vec::new();
        let mut page_texts = Vec::new();
        for (i, page) in raw_pages.iter().enumerate() {
            let text = tidy_page(&cleanup_pdf_text(page));
            if !text.is_empty() {
                page_texts.push(text.clone());
            }
            units.push(DocumentUnit {
                index: (i + 1) as u32,
                text,
            });
        }

        let full_text = page_texts.join("\n\n");
        if full_text.trim().is_empty() {
            return Err(Error::extraction(
                MaterialFormat::Pdf,
                "no text content could be extracted from PDF",
            ));
        }

        let num_pages = Self::count_pages(&data, raw_pages.len());

        let mut metadata = HashMap::new();
        metadata.insert("num_pages".to_string(), serde_json::json!(num_pages));
        metadata.insert(
            "file_name".to_string(),
            serde_json::json!(path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()),
        );
        metadata.insert("file_size".to_string(), serde_json::json!(data.len()));

        tracing::debug!("extracted {} chars from {} PDF pages", full_text.len(), num_pages);

        let mut raw = RawDocument::new(MaterialFormat::Pdf, full_text);
        raw.metadata = metadata;
        raw.units = units;
        Ok(raw)
    }

    fn fallback_heading(&self) -> &'static str {
        "Introduction"
    }
}

/// Pull text out of a PDF content stream by walking BT/ET blocks and
/// decoding the parenthesized operands of Tj/TJ show operators.
fn scan_content_stream(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;

    for line in content_str.lines() {
        let line = line.trim();

        if line == "BT" {
            in_text_block = true;
            continue;
        }
        if line == "ET" {
            in_text_block = false;
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            continue;
        }

        if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
            if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                if start < end {
                    let operand = &line[start + 1..end];
                    let decoded = operand
                        .replace("\\n", "\n")
                        .replace("\\r", "\r")
                        .replace("\\t", "\t")
                        .replace("\\(", "(")
                        .replace("\\)", ")")
                        .replace("\\\\", "\\");
                    text.push_str(&decoded);
                    text.push(' ');
                }
            }
        }
    }

    text
}
