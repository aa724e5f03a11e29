//! Outline reader for decks written by [`crate::PptxWriter`].
//!
//! Recovers just enough structure from a package to check what was written:
//! slide order, backgrounds, titles, and shape counts.

use deck_core::{Error, Result, Rgb};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Structural summary of one slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideOutline {
    /// 1-based position in the deck.
    pub number: usize,
    pub background: Option<Rgb>,
    /// Text of the first title text box, if any.
    pub title: Option<String>,
    /// Font size of the title's first run, in points.
    pub title_size_pt: Option<f64>,
    pub title_boxes: usize,
    /// Text boxes other than titles.
    pub text_boxes: usize,
    pub pictures: usize,
    /// Every paragraph of every non-title text box, in document order.
    pub paragraphs: Vec<String>,
}

/// Structural summary of a deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckOutline {
    pub slides: Vec<SlideOutline>,
}

impl DeckOutline {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn picture_count(&self) -> usize {
        self.slides.iter().map(|s| s.pictures).sum()
    }
}

/// Reader for PPTX packages.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Outline the package stored at `path`.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<DeckOutline> {
        let file = std::fs::File::open(path)?;
        self.outline(std::io::BufReader::new(file))
    }

    /// Outline a package from a reader.
    pub fn outline<R: Read + Seek>(&self, reader: R) -> Result<DeckOutline> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;
        let mut outline = DeckOutline::default();

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let content = read_file_from_archive(&mut archive, slide_path)?;
            let mut slide = outline_slide_xml(&content)?;
            slide.number = idx + 1;
            log::debug!(
                "Read {} ({} pictures, {} text boxes)",
                slide_path,
                slide.pictures,
                slide.text_boxes
            );
            outline.slides.push(slide);
        }

        Ok(outline)
    }

    /// Slide part paths in presentation order.
    ///
    /// Order comes from `<p:sldIdLst>` in `presentation.xml`, resolved through
    /// the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut targets: Vec<(String, String)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attr_value(e, b"Type").unwrap_or_default();
                    // Slide relationships end in "/slide"; layouts and masters do not.
                    if !rel_type.ends_with("/slide") {
                        continue;
                    }
                    let id = attr_value(e, b"Id").unwrap_or_default();
                    let target = attr_value(e, b"Target").unwrap_or_default();
                    let full_path = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("ppt/{}", target),
                    };
                    targets.push((id, full_path));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        let presentation = read_file_from_archive(archive, "ppt/presentation.xml")?;
        let mut reader = Reader::from_str(&presentation);
        reader.trim_text(true);

        let mut ordered = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"sldId" =>
                {
                    let rel_id = attr_value(e, b"r:id").ok_or_else(|| {
                        Error::CorruptedFile("sldId without relationship id".to_string())
                    })?;
                    let path = targets
                        .iter()
                        .find(|(id, _)| *id == rel_id)
                        .map(|(_, path)| path.clone())
                        .ok_or_else(|| {
                            Error::CorruptedFile(format!("No slide relationship '{}'", rel_id))
                        })?;
                    ordered.push(path);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing presentation: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(ordered)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Which kind of shape the parser is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Title,
    TextBox,
    Other,
}

/// Outline a single slide part.
fn outline_slide_xml(xml_content: &str) -> Result<SlideOutline> {
    let mut slide = SlideOutline::default();
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut in_background = false;
    let mut current: Option<ShapeKind> = None;
    let mut paragraph: Option<String> = None;
    let mut title_text: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = true,
                b"sp" => current = Some(ShapeKind::Other),
                b"pic" => {
                    slide.pictures += 1;
                    current = Some(ShapeKind::Other);
                }
                b"p" if current.is_some() => paragraph = Some(String::new()),
                b"rPr" => record_title_size(&mut slide, current, e),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"cNvPr" => {
                    if current.is_some() {
                        current = Some(classify(e));
                    }
                }
                b"cNvSpPr" => {
                    // Text boxes without a recognizable name still count.
                    if current == Some(ShapeKind::Other)
                        && attr_value(e, b"txBox").as_deref() == Some("1")
                    {
                        current = Some(ShapeKind::TextBox);
                    }
                }
                b"srgbClr" if in_background && slide.background.is_none() => {
                    slide.background = attr_value(e, b"val").and_then(|v| Rgb::from_hex(&v));
                }
                b"rPr" => record_title_size(&mut slide, current, e),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some(ref mut text) = paragraph {
                    let decoded = e
                        .unescape()
                        .map_err(|e| Error::XmlError(format!("Bad text content: {}", e)))?;
                    text.push_str(&decoded);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = false,
                b"p" => {
                    if let Some(text) = paragraph.take() {
                        match current {
                            Some(ShapeKind::Title) => title_text.push(text),
                            Some(ShapeKind::TextBox) => slide.paragraphs.push(text),
                            _ => {}
                        }
                    }
                }
                b"sp" | b"pic" => {
                    match current.take() {
                        Some(ShapeKind::Title) => {
                            slide.title_boxes += 1;
                            if slide.title.is_none() {
                                slide.title = Some(title_text.join("\n"));
                            }
                        }
                        Some(ShapeKind::TextBox) => slide.text_boxes += 1,
                        _ => {}
                    }
                    title_text.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok(slide)
}

fn classify(e: &BytesStart) -> ShapeKind {
    let name = attr_value(e, b"name").unwrap_or_default();
    if name.starts_with("Title") {
        ShapeKind::Title
    } else if name.starts_with("TextBox") {
        ShapeKind::TextBox
    } else {
        ShapeKind::Other
    }
}

fn record_title_size(slide: &mut SlideOutline, current: Option<ShapeKind>, e: &BytesStart) {
    if current != Some(ShapeKind::Title) || slide.title_size_pt.is_some() || slide.title.is_some() {
        return;
    }
    if let Some(sz) = attr_value(e, b"sz").and_then(|v| v.parse::<f64>().ok()) {
        slide.title_size_pt = Some(sz / 100.0);
    }
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
