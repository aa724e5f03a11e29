//! PPTX package writer.

use crate::shapes::{write_picture, write_text_box, write_title, ShapeIds};
use crate::template::*;
use crate::xml::{escape, Relationships};
use deck_core::{ContentItem, Deck, Error, ImageFormat, Result, Slide};
use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// First id used in `<p:sldIdLst>`.
const FIRST_SLIDE_ID: u32 = 256;

/// Writer that serializes a [`Deck`] into an Office Open XML package.
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self
    }

    /// Write the deck to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, deck: &Deck, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut sink = BufWriter::new(file);
        self.write(deck, &mut sink)?;
        sink.flush()?;
        log::info!("Saved {} slides to {}", deck.slides.len(), path.display());
        Ok(())
    }

    /// Write the deck as a ZIP package into any seekable sink.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, sink: W) -> Result<()> {
        let mut package = Package::new(sink);

        package.add_xml("[Content_Types].xml", &content_types_xml(deck)?)?;
        package.add_xml("_rels/.rels", &root_rels().to_xml()?)?;
        package.add_xml("docProps/core.xml", &core_props_xml(deck)?)?;
        package.add_xml("docProps/app.xml", APP_PROPS_XML)?;

        let (presentation_xml, presentation_rels) = presentation_parts(deck)?;
        package.add_xml("ppt/presentation.xml", &presentation_xml)?;
        package.add_xml("ppt/_rels/presentation.xml.rels", &presentation_rels.to_xml()?)?;
        package.add_xml("ppt/presProps.xml", PRES_PROPS_XML)?;
        package.add_xml("ppt/viewProps.xml", VIEW_PROPS_XML)?;
        package.add_xml("ppt/tableStyles.xml", TABLE_STYLES_XML)?;

        let mut master_rels = Relationships::new();
        master_rels.add(REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(REL_THEME, "../theme/theme1.xml");
        package.add_xml("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML)?;
        package.add_xml("ppt/slideMasters/_rels/slideMaster1.xml.rels", &master_rels.to_xml()?)?;

        let mut layout_rels = Relationships::new();
        layout_rels.add(REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        package.add_xml("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT_XML)?;
        package.add_xml("ppt/slideLayouts/_rels/slideLayout1.xml.rels", &layout_rels.to_xml()?)?;

        package.add_xml("ppt/theme/theme1.xml", THEME_XML)?;

        let mut image_counter = 0;
        for slide in &deck.slides {
            let mut slide_rels = Relationships::new();
            slide_rels.add(REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

            // Media parts are numbered across the whole package.
            let mut image_rel_ids = Vec::new();
            for picture in slide.pictures() {
                image_counter += 1;
                let media_name = format!("image{}.{}", image_counter, picture.format.extension());
                package.add_media(&format!("ppt/media/{}", media_name), &picture.data)?;
                image_rel_ids.push(slide_rels.add(REL_IMAGE, format!("../media/{}", media_name)));
            }

            let slide_xml = slide_xml(slide, &image_rel_ids)?;
            package.add_xml(&format!("ppt/slides/slide{}.xml", slide.number), &slide_xml)?;
            package.add_xml(
                &format!("ppt/slides/_rels/slide{}.xml.rels", slide.number),
                &slide_rels.to_xml()?,
            )?;
            log::debug!(
                "Wrote slide {} ({} items, {} pictures)",
                slide.number,
                slide.items.len(),
                image_rel_ids.len()
            );
        }

        package.finish()
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin wrapper over the ZIP writer that logs and maps errors per part.
struct Package<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> Package<W> {
    fn new(sink: W) -> Self {
        Self {
            zip: ZipWriter::new(sink),
        }
    }

    fn add_xml(&mut self, name: &str, xml: &str) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.add(name, xml.as_bytes(), options)
    }

    /// Images are already compressed, so store them as-is.
    fn add_media(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        self.add(name, data, options)
    }

    fn add(&mut self, name: &str, data: &[u8], options: FileOptions) -> Result<()> {
        self.zip
            .start_file(name, options)
            .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", name, e)))?;
        self.zip.write_all(data)?;
        log::trace!("Added part {} ({} bytes)", name, data.len());
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        Ok(())
    }
}

fn root_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(REL_OFFICE_DOCUMENT, "ppt/presentation.xml");
    rels.add(REL_CORE_PROPS, "docProps/core.xml");
    rels.add(REL_EXTENDED_PROPS, "docProps/app.xml");
    rels
}

fn content_types_xml(deck: &Deck) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let formats: BTreeSet<ImageFormat> = deck
        .slides
        .iter()
        .flat_map(|s| s.pictures().map(|p| p.format))
        .collect();
    for format in formats {
        write!(
            xml,
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            format.extension(),
            format.content_type()
        )?;
    }

    let overrides = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/viewProps.xml", CT_VIEW_PROPS),
        ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
        ("/docProps/core.xml", CT_CORE_PROPS),
        ("/docProps/app.xml", CT_EXTENDED_PROPS),
    ];
    for (part, content_type) in overrides {
        write!(
            xml,
            r#"<Override PartName="{}" ContentType="{}"/>"#,
            part, content_type
        )?;
    }
    for slide in &deck.slides {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
            slide.number, CT_SLIDE
        )?;
    }

    xml.push_str("</Types>");
    Ok(xml)
}

fn core_props_xml(deck: &Deck) -> Result<String> {
    let title = deck
        .slides
        .iter()
        .find_map(|s| s.title.as_ref())
        .map(|t| t.text.as_str())
        .unwrap_or("Presentation");

    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    write!(xml, "<dc:title>{}</dc:title>", escape(title))?;
    xml.push_str("<cp:revision>1</cp:revision></cp:coreProperties>");
    Ok(xml)
}

/// Build `presentation.xml` and its relationships.
///
/// Slide relationships are added right after the master so that their ids
/// follow slide order (`rId2` is slide 1).
fn presentation_parts(deck: &Deck) -> Result<(String, Relationships)> {
    let mut rels = Relationships::new();
    let master_rel = rels.add(REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    let slide_rels: Vec<String> = deck
        .slides
        .iter()
        .map(|s| rels.add(REL_SLIDE, format!("slides/slide{}.xml", s.number)))
        .collect();
    rels.add(REL_PRES_PROPS, "presProps.xml");
    rels.add(REL_VIEW_PROPS, "viewProps.xml");
    rels.add(REL_THEME, "theme/theme1.xml");
    rels.add(REL_TABLE_STYLES, "tableStyles.xml");

    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )?;
    write!(
        xml,
        r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="{}"/></p:sldMasterIdLst>"#,
        master_rel
    )?;

    if !slide_rels.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (index, rel_id) in slide_rels.iter().enumerate() {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + index as u32,
                rel_id
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, deck.width, deck.height)?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");

    Ok((xml, rels))
}

/// Serialize one slide. `image_rel_ids` lists the relationship id of each
/// picture on the slide in drawing order.
fn slide_xml(slide: &Slide, image_rel_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    write!(xml, r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#, NS_A, NS_R, NS_P)?;
    xml.push_str("<p:cSld>");

    // Background must come before the shape tree.
    if let Some(color) = slide.background {
        write!(
            xml,
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            color.hex()
        )?;
    }

    xml.push_str("<p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

    let mut ids = ShapeIds::new();
    if let Some(title) = &slide.title {
        write_title(&mut xml, &mut ids, title)?;
    }

    let mut rel_ids = image_rel_ids.iter();
    for item in &slide.items {
        match item {
            ContentItem::Text(text_box) => {
                write_text_box(&mut xml, ids.next(), "TextBox", text_box)?;
            }
            ContentItem::Picture(picture) => {
                let rel_id = rel_ids.next().ok_or_else(|| {
                    Error::XmlError(format!(
                        "No image relationship for picture '{}' on slide {}",
                        picture.name, slide.number
                    ))
                })?;
                write_picture(&mut xml, ids.next(), picture, rel_id)?;
            }
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Bullet, Frame, Picture, Rgb, SlideTitle};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn sample_deck() -> Deck {
        let mut deck = Deck::widescreen();
        let slide = deck.add_slide();
        slide.set_background(Rgb(248, 250, 252));
        slide.set_title(SlideTitle::heading("LN一覧画面"));
        slide
            .add_text_box(Frame::inches(7.0, 1.8, 5.8, 5.0))
            .word_wrap(true)
            .add_bullet(Bullet::new("① タブ切替").bold());
        slide.add_picture(Picture {
            name: "shot.png".to_string(),
            data: vec![0x89, b'P', b'N', b'G'],
            format: ImageFormat::Png,
            frame: Frame::inches(0.5, 1.8, 8.0, 5.0),
        });
        deck
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_presentation_lists_slides_in_order() {
        let mut deck = Deck::widescreen();
        deck.add_slide();
        deck.add_slide();

        let (xml, rels) = presentation_parts(&deck).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12191695" cy="6858000"/>"#));
        assert_eq!(rels.to_xml().unwrap().matches("<Relationship ").count(), 7);
    }

    #[test]
    fn test_slide_xml_shapes() {
        let deck = sample_deck();
        let xml = slide_xml(&deck.slides[0], &["rId2".to_string()]).unwrap();

        assert!(xml.contains(r#"<a:srgbClr val="F8FAFC"/>"#));
        assert!(xml.contains(r#"name="Title 2""#));
        assert!(xml.contains(r#"name="Rectangle 3""#));
        assert!(xml.contains(r#"name="TextBox 4""#));
        assert!(xml.contains(r#"name="Picture 5""#));
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.find("<p:bg>").unwrap() < xml.find("<p:spTree>").unwrap());
    }

    #[test]
    fn test_picture_without_relationship_is_error() {
        let deck = sample_deck();
        assert!(slide_xml(&deck.slides[0], &[]).is_err());
    }

    #[test]
    fn test_package_contains_required_parts() {
        let deck = sample_deck();
        let mut buffer = Cursor::new(Vec::new());
        PptxWriter::new().write(&deck, &mut buffer).unwrap();
        let bytes = buffer.into_inner();

        let content_types = read_part(&bytes, "[Content_Types].xml");
        assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(content_types.contains("/ppt/slides/slide1.xml"));

        let slide_rels = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(slide_rels.contains("../media/image1.png"));

        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>LN一覧画面</dc:title>"));

        let mut archive = ZipArchive::new(Cursor::new(&bytes)).unwrap();
        for name in [
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/media/image1.png",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {}", name);
        }
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        std::fs::write(&path, b"stale").unwrap();

        PptxWriter::new().save(&sample_deck(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }
}
