//! Slide deck extraction

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::types::{DocumentUnit, MaterialFormat, RawDocument, StructuredSection};

use super::Extractor;

/// Slide deck (.pptx) extractor.
///
/// Decks carry native structure, so no heuristic runs: each slide becomes
/// one section whose level is "Slide N". A slide's title is its first
/// text-bearing shape; every text-bearing shape (title included) is an
/// ordered content entry. The flattened text labels each slide as
/// "Slide N: title" followed by the slide body.
pub struct SlidesExtractor;

/// Text content of one slide
struct SlideContent {
    number: u32,
    title: String,
    shapes: Vec<String>,
}

/// Collect per-shape text from slide XML. A shape's text is its paragraphs
/// joined with newlines, mirroring how presentation tools report shape
/// text; empty shapes are skipped. Text inside tables and other
/// non-shape frames is ignored.
fn shape_texts(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut shapes = Vec::new();
    let mut shape_paragraphs: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut shape_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sp" => shape_depth += 1,
                // <a:t> holds the actual run text
                b"t" if shape_depth > 0 => in_text = true,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    if let Ok(text) = e.unescape() {
                        paragraph.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                // <a:p> closes one paragraph within the shape's text body
                b"p" if shape_depth > 0 => {
                    shape_paragraphs.push(std::mem::take(&mut paragraph));
                }
                b"sp" => {
                    if shape_depth > 0 {
                        shape_depth -= 1;
                        if shape_depth == 0 {
                            let text = shape_paragraphs.join("\n");
                            let text = text.trim();
                            if !text.is_empty() {
                                shapes.push(text.to_string());
                            }
                            shape_paragraphs.clear();
                            paragraph.clear();
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    shapes
}

/// Read every slide from the deck archive in presentation order
fn read_slides(data: &[u8]) -> Result<Vec<SlideContent>> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| Error::extraction(MaterialFormat::Slides, e.to_string()))?;

    let mut slide_names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(|s| s.to_string())
        .collect();

    // Archive order is arbitrary; slide filenames carry the real order
    slide_names.sort_by_key(|name| {
        name.trim_start_matches("ppt/slides/slide")
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(0)
    });

    let mut slides = Vec::new();
    for (i, name) in slide_names.iter().enumerate() {
        let mut file = archive
            .by_name(name)
            .map_err(|e| Error::extraction(MaterialFormat::Slides, e.to_string()))?;
        let mut xml = String::new();
        file.read_to_string(&mut xml)
            .map_err(|e| Error::extraction(MaterialFormat::Slides, e.to_string()))?;

        let shapes = shape_texts(&xml);
        let title = shapes.first().cloned().unwrap_or_default();
        slides.push(SlideContent {
            number: (i + 1) as u32,
            title,
            shapes,
        });
    }

    Ok(slides)
}

impl Extractor for SlidesExtractor {
    fn format(&self) -> MaterialFormat {
        MaterialFormat::Slides
    }

    fn extract(&self, path: &Path) -> Result<RawDocument> {
        let data = std::fs::read(path)?;
        let slides = read_slides(&data)?;

        if slides.is_empty() {
            return Err(Error::extraction(
                MaterialFormat::Slides,
                "no slides found in file",
            ));
        }
        if slides.iter().all(|s| s.shapes.is_empty()) {
            return Err(Error::extraction(
                MaterialFormat::Slides,
                "deck contains no text",
            ));
        }

        let mut units = Vec::new();
        let mut blocks = Vec::new();
        for slide in &slides {
            let body = slide.shapes.join("\n");
            blocks.push(format!("Slide {}: {}\n{}", slide.number, slide.title, body));
            units.push(DocumentUnit {
                index: slide.number,
                text: body,
            });
        }

        let mut metadata = HashMap::new();
        metadata.insert("num_slides".to_string(), serde_json::json!(slides.len()));
        metadata.insert(
            "file_name".to_string(),
            serde_json::json!(path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()),
        );
        metadata.insert("file_size".to_string(), serde_json::json!(data.len()));

        let mut raw = RawDocument::new(MaterialFormat::Slides, blocks.join("\n\n"));
        raw.metadata = metadata;
        raw.units = units;
        Ok(raw)
    }

    fn native_structure(&self, path: &Path) -> Result<Option<Vec<StructuredSection>>> {
        let data = std::fs::read(path)?;
        let slides = read_slides(&data)?;

        let mut sections = Vec::new();
        for slide in slides {
            let level = format!("Slide {}", slide.number);
            let heading = if slide.title.is_empty() {
                level.clone()
            } else {
                slide.title.clone()
            };
            let mut section = StructuredSection::new(heading, level);
            section.content = slide.shapes;
            if !section.content.is_empty() {
                sections.push(section);
            }
        }

        Ok(Some(sections))
    }
}
