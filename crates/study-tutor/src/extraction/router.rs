//! Extension-based extractor dispatch

use std::path::Path;
use std::time::Duration;

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::types::{MaterialFormat, RawDocument, StructuredSection};

use super::structure::{normalize_sections, HeadingHeuristic, SectionStrategy};
use super::{Extractor, ImageExtractor, PdfExtractor, SlidesExtractor, WordExtractor};

/// Routes files to the extractor matching their extension and reconciles
/// the per-format structure capabilities into one output shape.
///
/// Dispatch is strictly by case-insensitive extension. Extractors with
/// native structure answer for themselves; for the rest the router runs
/// the configured heading strategy over the flattened text. Whatever goes
/// wrong inside an extractor crosses this boundary as a format-tagged
/// extraction error, never as a raw library failure.
pub struct ExtractionRouter {
    pdf: PdfExtractor,
    word: WordExtractor,
    slides: SlidesExtractor,
    image: ImageExtractor,
    strategy: Box<dyn SectionStrategy>,
}

impl ExtractionRouter {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            pdf: PdfExtractor::new(Duration::from_secs(config.pdf_timeout_secs)),
            word: WordExtractor,
            slides: SlidesExtractor,
            image: ImageExtractor::new(config.ocr_language.clone()),
            strategy: Box::new(HeadingHeuristic),
        }
    }

    /// Swap in an alternative sectioning strategy for heuristic formats
    pub fn with_strategy(mut self, strategy: Box<dyn SectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolve the format for a path, or fail naming the extension
    pub fn resolve_format(&self, path: &Path) -> Result<MaterialFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        MaterialFormat::from_extension(ext).ok_or_else(|| {
            let shown = if ext.is_empty() {
                "(no extension)".to_string()
            } else {
                format!(".{}", ext.to_lowercase())
            };
            Error::unsupported_format(shown)
        })
    }

    fn extractor_for(&self, format: MaterialFormat) -> &dyn Extractor {
        match format {
            MaterialFormat::Pdf => &self.pdf,
            MaterialFormat::Word => &self.word,
            MaterialFormat::Slides => &self.slides,
            MaterialFormat::ImageOcr => &self.image,
        }
    }

    /// Extract text only
    pub fn extract(&self, path: &Path) -> Result<RawDocument> {
        let format = self.resolve_format(path)?;
        let extractor = self.extractor_for(format);

        tracing::info!("extracting {} as {}", path.display(), format);
        extractor.extract(path).map_err(|e| tag_error(format, e))
    }

    /// Extract text and sections. Sections come from the extractor's native
    /// pass when it has one, otherwise from the heading strategy.
    pub fn extract_with_structure(&self, path: &Path) -> Result<(RawDocument, Vec<StructuredSection>)> {
        let format = self.resolve_format(path)?;
        let extractor = self.extractor_for(format);

        tracing::info!("extracting {} as {} with structure", path.display(), format);
        let raw = extractor.extract(path).map_err(|e| tag_error(format, e))?;

        let sections = match extractor.native_structure(path).map_err(|e| tag_error(format, e))? {
            Some(sections) => sections,
            None => {
                tracing::debug!(
                    "no native structure for {}, applying {} strategy",
                    format,
                    self.strategy.name()
                );
                normalize_sections(&raw.full_text, extractor.fallback_heading(), self.strategy.as_ref())
            }
        };

        Ok((raw, sections))
    }
}

/// Collapse any error from inside an extractor into the format-tagged
/// extraction variant; already-tagged errors pass through untouched.
fn tag_error(format: MaterialFormat, err: Error) -> Error {
    match err {
        e @ Error::Extraction { .. } => e,
        e @ Error::UnsupportedFormat(_) => e,
        other => Error::extraction(format, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ExtractionRouter {
        ExtractionRouter::new(&ExtractionConfig::default())
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let err = router().extract(Path::new("/tmp/grades.xlsx")).unwrap_err();
        match err {
            Error::UnsupportedFormat(ext) => assert_eq!(ext, ".xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_extensionless_path_is_unsupported() {
        let err = router().extract(Path::new("/tmp/README")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_format_resolution_is_case_insensitive() {
        let r = router();
        assert_eq!(r.resolve_format(Path::new("a.PDF")).unwrap(), MaterialFormat::Pdf);
        assert_eq!(r.resolve_format(Path::new("b.Docx")).unwrap(), MaterialFormat::Word);
        assert_eq!(r.resolve_format(Path::new("c.PPTX")).unwrap(), MaterialFormat::Slides);
        assert_eq!(r.resolve_format(Path::new("d.JPeG")).unwrap(), MaterialFormat::ImageOcr);
    }

    #[test]
    fn test_corrupt_files_surface_as_tagged_extraction_errors() {
        let dir = tempfile::tempdir().unwrap();
        let r = router();

        for (name, expected) in [
            ("broken.pdf", MaterialFormat::Pdf),
            ("broken.docx", MaterialFormat::Word),
            ("broken.pptx", MaterialFormat::Slides),
        ] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"garbage bytes, no real structure").unwrap();
            let err = r.extract(&path).unwrap_err();
            match err {
                Error::Extraction { format, .. } => assert_eq!(format, expected),
                other => panic!("expected Extraction for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_file_is_tagged_with_its_format() {
        // An IO failure must not leak across the boundary untyped
        let err = router().extract(Path::new("/nonexistent/notes.docx")).unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction {
                format: MaterialFormat::Word,
                ..
            }
        ));
    }

    #[test]
    fn test_capability_split() {
        let r = router();
        // PDF and OCR declare no native structure pass, so the router runs
        // the heading strategy over their text with per-format defaults
        assert!(r
            .extractor_for(MaterialFormat::Pdf)
            .native_structure(Path::new("unused.pdf"))
            .unwrap()
            .is_none());
        assert!(r
            .extractor_for(MaterialFormat::ImageOcr)
            .native_structure(Path::new("unused.png"))
            .unwrap()
            .is_none());
        assert_eq!(r.extractor_for(MaterialFormat::Pdf).fallback_heading(), "Introduction");
        assert_eq!(r.extractor_for(MaterialFormat::ImageOcr).fallback_heading(), "Content");
    }
}
