//! Multi-format extraction pipeline
//!
//! One extractor per supported format family (PDF, Word, slide decks,
//! images via OCR), each turning a file on disk into a [`RawDocument`].
//! Formats that carry native structural markers (Word styles, slide
//! boundaries) also produce labeled sections; for the rest the router runs
//! the shared line heuristic from [`structure`] over the flattened text.

mod image;
mod pdf;
mod router;
mod slides;
pub mod structure;
mod word;

pub use image::ImageExtractor;
pub use pdf::PdfExtractor;
pub use router::ExtractionRouter;
pub use slides::SlidesExtractor;
pub use structure::{normalize_sections, HeadingHeuristic, SectionStrategy, GENERIC_LEVEL};
pub use word::WordExtractor;

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::types::{MaterialFormat, RawDocument, StructuredSection};

/// A single-format extractor.
///
/// Text extraction is the base capability every extractor implements.
/// Structure is an optional second capability: extractors whose format has
/// native markers override [`Extractor::native_structure`], while the rest
/// keep the default and let the router fall back to the heading heuristic
/// with [`Extractor::fallback_heading`] as the leading section name.
pub trait Extractor: Send + Sync {
    /// Format this extractor handles
    fn format(&self) -> MaterialFormat;

    /// Extract text plus format metadata from a file on disk
    fn extract(&self, path: &Path) -> Result<RawDocument>;

    /// Heading that absorbs leading unlabeled content when the fallback
    /// heuristic runs over this format's text
    fn fallback_heading(&self) -> &'static str {
        "Content"
    }

    /// Format-native structure pass. `Ok(None)` means the format carries no
    /// structural markers of its own and the caller should derive sections
    /// from `full_text` instead.
    fn native_structure(&self, path: &Path) -> Result<Option<Vec<StructuredSection>>> {
        let _ = path;
        Ok(None)
    }
}

/// SHA-256 hex digest of extracted text, recorded on the stored material
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_content_is_stable() {
        let a = hash_content("photosynthesis converts light into chemical energy");
        let b = hash_content("photosynthesis converts light into chemical energy");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // hex-encoded SHA-256
        assert_ne!(a, hash_content("different content"));
    }
}
