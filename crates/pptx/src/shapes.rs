//! Shape tree serialization for a single slide.

use crate::xml::escape;
use deck_core::{centipoints, Frame, Paragraph, Picture, Result, Rule, SlideTitle, TextBox};
use std::fmt::Write as FmtWrite;

/// Hands out shape ids within one slide. Id 1 is the shape tree itself.
#[derive(Debug)]
pub(crate) struct ShapeIds(u32);

impl ShapeIds {
    pub(crate) fn new() -> Self {
        Self(1)
    }

    pub(crate) fn next(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }
}

fn write_xfrm(xml: &mut String, frame: &Frame) -> Result<()> {
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, frame.x, frame.y)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, frame.cx, frame.cy)?;
    xml.push_str("</a:xfrm>");
    Ok(())
}

/// Character properties shared by runs and the end-of-paragraph marker.
fn write_run_props(xml: &mut String, tag: &str, para: &Paragraph) -> Result<()> {
    write!(xml, r#"<a:{} lang="ja-JP" altLang="en-US""#, tag)?;
    if let Some(size) = para.size_pt {
        write!(xml, r#" sz="{}""#, centipoints(size))?;
    }
    if para.bold {
        xml.push_str(r#" b="1""#);
    }
    xml.push_str(r#" dirty="0""#);

    match para.color {
        Some(color) => {
            xml.push('>');
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.hex()
            )?;
            write!(xml, "</a:{}>", tag)?;
        }
        None => xml.push_str("/>"),
    }
    Ok(())
}

pub(crate) fn write_paragraph(xml: &mut String, para: &Paragraph) -> Result<()> {
    xml.push_str("<a:p>");

    if para.level > 0 || para.alignment.is_some() {
        xml.push_str("<a:pPr");
        if para.level > 0 {
            write!(xml, r#" marL="{}" lvl="{}""#, para.left_margin(), para.level)?;
        }
        if let Some(alignment) = para.alignment {
            write!(xml, r#" algn="{}""#, alignment.as_ooxml())?;
        }
        xml.push_str("/>");
    }

    if !para.text.is_empty() {
        xml.push_str("<a:r>");
        write_run_props(xml, "rPr", para)?;
        write!(xml, "<a:t>{}</a:t>", escape(&para.text))?;
        xml.push_str("</a:r>");
    }

    write_run_props(xml, "endParaRPr", para)?;
    xml.push_str("</a:p>");
    Ok(())
}

pub(crate) fn write_text_box(xml: &mut String, id: u32, name: &str, text_box: &TextBox) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{} {}"/>"#, id, name, id)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &text_box.frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    let wrap = if text_box.word_wrap { "square" } else { "none" };
    write!(xml, r#"<a:bodyPr wrap="{}" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#, wrap)?;
    xml.push_str("<a:lstStyle/>");
    for para in &text_box.paragraphs {
        write_paragraph(xml, para)?;
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

pub(crate) fn write_rule(xml: &mut String, id: u32, rule: &Rule) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="Rectangle {}"/>"#, id, id)?;
    xml.push_str("<p:cNvSpPr/><p:nvPr/></p:nvSpPr>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &rule.frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    let hex = rule.color.hex();
    write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, hex)?;
    write!(xml, r#"<a:ln><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:ln>"#, hex)?;
    xml.push_str("</p:spPr></p:sp>");
    Ok(())
}

/// Write a title as a single-paragraph text box, followed by its rule.
pub(crate) fn write_title(xml: &mut String, ids: &mut ShapeIds, title: &SlideTitle) -> Result<()> {
    let mut text_box = TextBox::new(title.frame);
    let para = text_box.set_text(title.text.as_str());
    para.font_size(title.size_pt).bold(true).color(title.color);
    if let Some(alignment) = title.alignment {
        para.align(alignment);
    }
    write_text_box(xml, ids.next(), "Title", &text_box)?;

    if let Some(rule) = &title.rule {
        write_rule(xml, ids.next(), rule)?;
    }
    Ok(())
}

pub(crate) fn write_picture(xml: &mut String, id: u32, picture: &Picture, rel_id: &str) -> Result<()> {
    xml.push_str("<p:pic><p:nvPicPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
        id,
        id,
        escape(&picture.name)
    )?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);

    xml.push_str("<p:blipFill>");
    write!(xml, r#"<a:blip r:embed="{}"/>"#, rel_id)?;
    xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &picture.frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr></p:pic>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Alignment, Bullet, Rgb};

    #[test]
    fn test_indented_paragraph() {
        let mut tb = TextBox::new(Frame::inches(0.0, 0.0, 1.0, 1.0));
        let para = tb.add_bullet(Bullet::new("item").level(1)).clone();

        let mut xml = String::new();
        write_paragraph(&mut xml, &para).unwrap();
        assert!(xml.contains(r#"<a:pPr marL="457200" lvl="1"/>"#));
        assert!(xml.contains(r#"sz="2000""#));
        assert!(xml.contains(r#"<a:srgbClr val="1E293B"/>"#));
        assert!(xml.contains("<a:t>item</a:t>"));
    }

    #[test]
    fn test_empty_paragraph_has_no_run() {
        let mut xml = String::new();
        write_paragraph(&mut xml, &Paragraph::default()).unwrap();
        assert!(!xml.contains("<a:r>"));
        assert!(xml.contains("<a:endParaRPr"));
    }

    #[test]
    fn test_centered_bold_paragraph() {
        let mut para = Paragraph::default();
        para.text = "A & B".to_string();
        para.font_size(36.0).bold(true).color(Rgb(255, 255, 255)).align(Alignment::Center);

        let mut xml = String::new();
        write_paragraph(&mut xml, &para).unwrap();
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains(r#"sz="3600" b="1""#));
        assert!(xml.contains("<a:t>A &amp; B</a:t>"));
    }

    #[test]
    fn test_heading_title_writes_rule() {
        let mut ids = ShapeIds::new();
        let mut xml = String::new();
        write_title(&mut xml, &mut ids, &SlideTitle::heading("概要")).unwrap();

        assert!(xml.contains(r#"name="Title 2""#));
        assert!(xml.contains(r#"name="Rectangle 3""#));
        assert!(xml.contains(r#"<a:bodyPr wrap="none""#));
        assert!(xml.contains(r#"sz="4000""#));
    }

    #[test]
    fn test_cover_title_has_no_rule() {
        let mut ids = ShapeIds::new();
        let mut xml = String::new();
        write_title(&mut xml, &mut ids, &SlideTitle::cover("まとめ", 1.5, 48.0)).unwrap();

        assert!(xml.contains(r#"name="Title 2""#));
        assert!(!xml.contains("Rectangle"));
        assert!(xml.contains(r#"algn="ctr""#));
    }
}
