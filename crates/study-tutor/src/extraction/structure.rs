//! Structure normalization for flat text
//!
//! PDF and OCR output carry no native structural markers, so sections are
//! recovered with a line-level heading heuristic. The heuristic is a named,
//! swappable strategy: extractors call `normalize_sections` with whichever
//! strategy is configured and never embed the classification rule themselves.

use crate::types::StructuredSection;

/// Level label assigned to sections recovered heuristically. Word documents
/// use style names and slide decks use "Slide N" instead.
pub const GENERIC_LEVEL: &str = "Section";

/// A pluggable policy deciding whether a text line is a section heading
pub trait SectionStrategy: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Classify a single non-empty, trimmed line
    fn is_heading(&self, line: &str) -> bool;
}

/// Default heading heuristic.
///
/// A line is a heading iff it is shorter than 100 characters AND is either
/// fully uppercase or title-case with at most 5 words. Deliberately cheap
/// and explainable; known to misfire on short emphatic sentences and long
/// headings. The rule is load-bearing for output compatibility, so changes
/// belong in a new strategy, not here.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadingHeuristic;

impl SectionStrategy for HeadingHeuristic {
    fn name(&self) -> &'static str {
        "heading-heuristic"
    }

    fn is_heading(&self, line: &str) -> bool {
        if line.chars().count() >= 100 {
            return false;
        }
        is_all_uppercase(line) || (is_title_case(line) && line.split_whitespace().count() <= 5)
    }
}

/// At least one cased character and no lowercase ones
fn is_all_uppercase(line: &str) -> bool {
    let mut any_cased = false;
    for ch in line.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            any_cased = true;
        }
    }
    any_cased
}

/// Every cased run starts with an uppercase letter followed by lowercase
/// ones, and at least one cased character exists
fn is_title_case(line: &str) -> bool {
    let mut any_cased = false;
    let mut prev_cased = false;
    for ch in line.chars() {
        if ch.is_uppercase() {
            if prev_cased {
                return false;
            }
            any_cased = true;
            prev_cased = true;
        } else if ch.is_lowercase() {
            if !prev_cased {
                return false;
            }
            any_cased = true;
            prev_cased = true;
        } else {
            prev_cased = false;
        }
    }
    any_cased
}

/// Split flat text into heading-delimited sections.
///
/// Lines are trimmed and empty lines skipped. A heading-classified line
/// flushes the section under construction (if it has content) and opens a
/// new one named by that line. Leading non-heading lines collect under
/// `default_heading`. The trailing section is emitted only if non-empty, so
/// a heading with no following content produces nothing.
pub fn normalize_sections(
    text: &str,
    default_heading: &str,
    strategy: &dyn SectionStrategy,
) -> Vec<StructuredSection> {
    let mut sections = Vec::new();
    let mut current = StructuredSection::new(default_heading, GENERIC_LEVEL);

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if strategy.is_heading(line) {
            if !current.content.is_empty() {
                sections.push(current);
            }
            current = StructuredSection::new(line, GENERIC_LEVEL);
        } else {
            current.content.push(line.to_string());
        }
    }

    if !current.content.is_empty() {
        sections.push(current);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heuristic() -> HeadingHeuristic {
        HeadingHeuristic
    }

    #[test]
    fn test_uppercase_line_is_heading() {
        assert!(heuristic().is_heading("INTRODUCTION"));
        assert!(heuristic().is_heading("CHAPTER 2: THERMODYNAMICS"));
        assert!(heuristic().is_heading("SUMMARY:"));
    }

    #[test]
    fn test_long_line_is_never_heading() {
        let long = "THIS LINE KEEPS GOING WELL PAST THE LIMIT ".repeat(3);
        assert!(long.chars().count() >= 100);
        assert!(!heuristic().is_heading(&long));

        let long_title = "One Two Three ".repeat(10);
        assert!(!heuristic().is_heading(&long_title));
    }

    #[test]
    fn test_title_case_word_cap() {
        assert!(heuristic().is_heading("Laws Of Motion"));
        assert!(heuristic().is_heading("Photosynthesis"));
        // Six title-case words exceed the cap
        assert!(!heuristic().is_heading("The Very Long Heading About Everything"));
        // Apostrophe breaks the cased run, so this is not title-case
        assert!(!heuristic().is_heading("Newton's Laws Of Motion"));
    }

    #[test]
    fn test_ordinary_prose_is_not_heading() {
        assert!(!heuristic().is_heading("This sentence is ordinary prose."));
        assert!(!heuristic().is_heading("mixed Case but not Title"));
        // No cased characters at all
        assert!(!heuristic().is_heading("12345"));
    }

    #[test]
    fn test_leading_lines_fall_under_default() {
        let text = "some preamble text\nmore preamble\nFIRST TOPIC\nbody line";
        let sections = normalize_sections(text, "Introduction", &heuristic());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Introduction");
        assert_eq!(sections[0].content, vec!["some preamble text", "more preamble"]);
        assert_eq!(sections[1].heading, "FIRST TOPIC");
        assert_eq!(sections[1].content, vec!["body line"]);
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        // Back-to-back headings: the first gets no content and vanishes
        let text = "TOPIC ONE\nTOPIC TWO\ncontent under two";
        let sections = normalize_sections(text, "Introduction", &heuristic());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "TOPIC TWO");

        // Trailing heading with nothing after it is not emitted
        let text = "intro line\nDANGLING HEADING";
        let sections = normalize_sections(text, "Introduction", &heuristic());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Introduction");
    }

    #[test]
    fn test_no_default_section_without_preamble() {
        let text = "FIRST\na\nSECOND\nb";
        let sections = normalize_sections(text, "Content", &heuristic());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "FIRST");
        assert_eq!(sections[1].heading, "SECOND");
    }

    #[test]
    fn test_blank_and_padded_lines_are_normalized() {
        let text = "   padded line   \n\n\n  ANOTHER TOPIC  \n  body  ";
        let sections = normalize_sections(text, "Content", &heuristic());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, vec!["padded line"]);
        assert_eq!(sections[1].heading, "ANOTHER TOPIC");
        assert_eq!(sections[1].content, vec!["body"]);
    }
}
