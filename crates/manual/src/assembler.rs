//! Builds the eight manual slides and writes them out.

use crate::content::*;
use deck_core::{
    Alignment, Bullet, Deck, Frame, ImageRef, Result, Rgb, Slide, SlideTitle, TextBox, BRAND_BLUE,
};
use deck_pptx::PptxWriter;
use std::path::{Path, PathBuf};

/// Assembles the manual deck relative to a base directory.
///
/// Screenshot paths are resolved against the base directory, and the deck is
/// written to [`OUTPUT_FILE`] inside it.
#[derive(Debug, Clone)]
pub struct DeckAssembler {
    base_dir: PathBuf,
}

impl DeckAssembler {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Where [`run`](Self::run) writes the deck.
    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(OUTPUT_FILE)
    }

    /// Build the deck in memory.
    pub fn assemble(&self) -> Result<Deck> {
        let mut deck = Deck::widescreen();

        title_slide(deck.add_slide());
        overview_slide(deck.add_slide());
        for page in &SCREENSHOT_PAGES {
            self.screenshot_slide(deck.add_slide(), page)?;
        }
        summary_slide(deck.add_slide());

        log::debug!(
            "Assembled {} slides with {} screenshots",
            deck.slides.len(),
            deck.picture_count()
        );
        Ok(deck)
    }

    /// Build the deck and write it, replacing any previous output.
    pub fn run(&self) -> Result<PathBuf> {
        let deck = self.assemble()?;
        let path = self.output_path();
        PptxWriter::new().save(&deck, &path)?;
        Ok(path)
    }

    fn screenshot_slide(&self, slide: &mut Slide, page: &ScreenshotPage) -> Result<()> {
        slide
            .set_background(PAGE_BACKGROUND)
            .set_title(SlideTitle::heading(page.title));

        // A missing screenshot leaves the left half empty.
        let image = ImageRef::with_height(page.image, 0.5, 1.8, 5.0);
        if let Some(picture) = image.load(&self.base_dir)? {
            slide.add_picture(picture);
        }

        let notes = slide
            .add_text_box(Frame::inches(7.0, 1.8, 5.8, 5.0))
            .word_wrap(true);
        for (idx, section) in page.sections.iter().enumerate() {
            if idx > 0 {
                notes.add_paragraph();
            }
            notes.add_bullet(Bullet::new(section.heading).bold().color(ACCENT_RED));
            add_items(notes, section.items);
        }
        log::debug!("Built slide {}: {}", slide.number, page.title);
        Ok(())
    }
}

fn add_items(text_box: &mut TextBox, items: &[&str]) {
    for item in items {
        text_box.add_bullet(Bullet::new(*item).level(1));
    }
}

/// A single centered line on a cover slide.
fn add_centered_line(slide: &mut Slide, frame: Frame, text: &str, size_pt: f64, color: Rgb) {
    slide
        .add_text_box(frame)
        .set_text(text)
        .font_size(size_pt)
        .color(color)
        .align(Alignment::Center);
}

fn title_slide(slide: &mut Slide) {
    slide
        .set_background(BRAND_BLUE)
        .set_title(SlideTitle::cover(COVER_TITLE, 2.5, 60.0));

    add_centered_line(slide, Frame::inches(1.0, 3.8, 11.333, 0.6), COVER_SUBTITLE, 36.0, WHITE);
    add_centered_line(slide, Frame::inches(1.0, 5.0, 11.333, 0.4), COVER_VERSION, 20.0, PALE_BLUE);
    log::debug!("Built slide {}: {}", slide.number, COVER_TITLE);
}

fn overview_slide(slide: &mut Slide) {
    slide
        .set_background(PAGE_BACKGROUND)
        .set_title(SlideTitle::heading(OVERVIEW_TITLE));

    let content = slide
        .add_text_box(Frame::inches(1.0, 1.8, 11.333, 5.0))
        .word_wrap(true);
    content.add_bullet(Bullet::new(OVERVIEW_INTRO));
    for (idx, section) in OVERVIEW_SECTIONS.iter().enumerate() {
        if idx > 0 {
            content.add_paragraph();
        }
        content.add_bullet(Bullet::new(section.heading).bold());
        add_items(content, section.items);
    }
    log::debug!("Built slide {}: {}", slide.number, OVERVIEW_TITLE);
}

fn summary_slide(slide: &mut Slide) {
    slide
        .set_background(BRAND_BLUE)
        .set_title(SlideTitle::cover(SUMMARY_TITLE, 1.5, 48.0));

    let content = slide
        .add_text_box(Frame::inches(1.5, 3.0, 10.333, 3.5))
        .word_wrap(true);
    for point in SUMMARY_POINTS {
        content.add_bullet(Bullet::new(point).size(28.0).color(WHITE));
    }

    add_centered_line(slide, Frame::inches(1.0, 6.5, 11.333, 0.6), PORTAL_URL, 24.0, PALE_BLUE);
    log::debug!("Built slide {}: {}", slide.number, SUMMARY_TITLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ContentItem, TitleLayout, DEFAULT_TEXT_COLOR};

    fn text_boxes(slide: &Slide) -> Vec<&TextBox> {
        slide
            .items
            .iter()
            .filter_map(|item| match item {
                ContentItem::Text(tb) => Some(tb),
                _ => None,
            })
            .collect()
    }

    fn assemble_without_images() -> Deck {
        let dir = tempfile::tempdir().unwrap();
        DeckAssembler::new(dir.path()).assemble().unwrap()
    }

    #[test]
    fn test_slide_order_and_titles() {
        let deck = assemble_without_images();
        let titles: Vec<&str> = deck
            .slides
            .iter()
            .map(|s| s.title.as_ref().unwrap().text.as_str())
            .collect();

        assert_eq!(
            titles,
            vec![
                "LNポータルシステム",
                "システム概要",
                "ユーザー選択とホーム画面",
                "LN一覧画面",
                "申立書作成（makeln）画面",
                "マニュアル画面",
                "実績・レベル画面",
                "まとめ",
            ]
        );
    }

    #[test]
    fn test_cover_slides_use_cover_layout() {
        let deck = assemble_without_images();
        for (idx, slide) in deck.slides.iter().enumerate() {
            let title = slide.title.as_ref().unwrap();
            let expected = if idx == 0 || idx == 7 {
                TitleLayout::Cover
            } else {
                TitleLayout::Heading
            };
            assert_eq!(title.layout, expected, "slide {}", slide.number);
        }
        assert_eq!(deck.slides[0].title.as_ref().unwrap().size_pt, 60.0);
        assert_eq!(deck.slides[7].title.as_ref().unwrap().size_pt, 48.0);
        assert_eq!(deck.slides[0].background, Some(BRAND_BLUE));
        assert_eq!(deck.slides[3].background, Some(PAGE_BACKGROUND));
    }

    #[test]
    fn test_overview_paragraphs() {
        let deck = assemble_without_images();
        let boxes = text_boxes(&deck.slides[1]);
        assert_eq!(boxes.len(), 1);

        let lines = boxes[0].lines();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], OVERVIEW_INTRO);
        assert_eq!(lines[2], "主な機能");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "対象ユーザー");
        assert_eq!(lines.len(), 13);

        let heading = &boxes[0].paragraphs[2];
        assert!(heading.bold);
        assert_eq!(heading.color, Some(DEFAULT_TEXT_COLOR));
        assert_eq!(boxes[0].paragraphs[3].level, 1);
    }

    #[test]
    fn test_screenshot_sections() {
        let deck = assemble_without_images();
        let slide = &deck.slides[2];
        let boxes = text_boxes(slide);
        assert_eq!(boxes.len(), 1);
        assert!(boxes[0].word_wrap);
        assert_eq!(boxes[0].frame, Frame::inches(7.0, 1.8, 5.8, 5.0));

        let headings: Vec<_> = boxes[0]
            .paragraphs
            .iter()
            .filter(|p| p.color == Some(ACCENT_RED))
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(headings, vec!["① ユーザー選択", "② LN一覧クリック", "③ サマリー確認"]);

        // Leading empty paragraph plus one spacer between each section.
        let empty = boxes[0].paragraphs.iter().filter(|p| p.text.is_empty()).count();
        assert_eq!(empty, 3);
    }

    #[test]
    fn test_summary_points() {
        let deck = assemble_without_images();
        let boxes = text_boxes(&deck.slides[7]);
        assert_eq!(boxes.len(), 2);

        let points = &boxes[0].paragraphs[1..];
        assert_eq!(points.len(), SUMMARY_POINTS.len());
        assert!(points
            .iter()
            .all(|p| p.size_pt == Some(28.0) && p.color == Some(WHITE) && p.level == 0));

        let url = &boxes[1].paragraphs[0];
        assert_eq!(url.text, PORTAL_URL);
        assert_eq!(url.alignment, Some(Alignment::Center));
    }

    #[test]
    fn test_output_path_is_in_base_dir() {
        let assembler = DeckAssembler::new("/tmp/manual");
        assert_eq!(
            assembler.output_path(),
            Path::new("/tmp/manual").join("LNポータル_操作マニュアル.pptx")
        );
    }
}
