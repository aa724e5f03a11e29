//! Domain types for representing a deck before it is serialized.

use crate::units::{inches, Emu, Frame, Rgb};
use serde::{Deserialize, Serialize};

/// Default font size for bullet items, in points.
pub const DEFAULT_BULLET_SIZE: f64 = 20.0;

/// Text color applied to bullets that carry no color override.
pub const DEFAULT_TEXT_COLOR: Rgb = Rgb(30, 41, 59);

/// Brand blue used for headings, rules, and cover backgrounds.
pub const BRAND_BLUE: Rgb = Rgb(37, 99, 235);

/// Left margin added per indent level.
pub const INDENT_PER_LEVEL: Emu = 457_200;

/// An entire deck in slide order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Slide width in EMUs.
    pub width: Emu,

    /// Slide height in EMUs.
    pub height: Emu,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty 16:9 deck (13.333" x 7.5").
    pub fn widescreen() -> Self {
        Self {
            width: inches(13.333),
            height: inches(7.5),
            slides: Vec::new(),
        }
    }

    /// Append a new blank slide and return it for filling.
    pub fn add_slide(&mut self) -> &mut Slide {
        let number = self.slides.len() + 1;
        self.slides.push(Slide::new(number));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    /// Total number of pictures across all slides.
    pub fn picture_count(&self) -> usize {
        self.slides.iter().map(Slide::picture_count).sum()
    }
}

/// A single slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Solid background fill. None inherits the master background.
    pub background: Option<Rgb>,

    /// Title drawn before any other content.
    pub title: Option<SlideTitle>,

    /// Freeform content in drawing order.
    pub items: Vec<ContentItem>,
}

impl Slide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            background: None,
            title: None,
            items: Vec::new(),
        }
    }

    /// Fill the background with a solid color.
    pub fn set_background(&mut self, color: Rgb) -> &mut Self {
        self.background = Some(color);
        self
    }

    /// Set the slide title.
    pub fn set_title(&mut self, title: SlideTitle) -> &mut Self {
        self.title = Some(title);
        self
    }

    /// Add a text box and return it for filling.
    pub fn add_text_box(&mut self, frame: Frame) -> &mut TextBox {
        self.items.push(ContentItem::Text(TextBox::new(frame)));
        match self.items.last_mut() {
            Some(ContentItem::Text(text_box)) => text_box,
            _ => unreachable!("text box was just pushed"),
        }
    }

    /// Add a picture.
    pub fn add_picture(&mut self, picture: Picture) {
        self.items.push(ContentItem::Picture(picture));
    }

    /// Number of pictures on this slide.
    pub fn picture_count(&self) -> usize {
        self.pictures().count()
    }

    /// Pictures on this slide in drawing order.
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.items.iter().filter_map(|item| match item {
            ContentItem::Picture(p) => Some(p),
            _ => None,
        })
    }
}

/// How a slide title is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleLayout {
    /// Left-aligned heading at the top of the slide, underlined by a rule.
    Heading,
    /// Large centered title on a cover-style slide.
    Cover,
}

/// A slide title with its fully resolved styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideTitle {
    pub text: String,
    pub layout: TitleLayout,
    pub frame: Frame,
    pub size_pt: f64,
    pub color: Rgb,
    pub alignment: Option<Alignment>,
    /// Solid bar drawn under the title.
    pub rule: Option<Rule>,
}

impl SlideTitle {
    /// 40pt bold blue heading with a blue rule beneath it.
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            layout: TitleLayout::Heading,
            frame: Frame::inches(0.5, 0.5, 12.333, 0.8),
            size_pt: 40.0,
            color: BRAND_BLUE,
            alignment: None,
            rule: Some(Rule {
                frame: Frame::inches(0.5, 1.4, 12.333, 0.05),
                color: BRAND_BLUE,
            }),
        }
    }

    /// Centered bold white title for cover-style slides.
    pub fn cover(text: impl Into<String>, top_in: f64, size_pt: f64) -> Self {
        Self {
            text: text.into(),
            layout: TitleLayout::Cover,
            frame: Frame::inches(1.0, top_in, 11.333, 1.0),
            size_pt,
            color: Rgb(255, 255, 255),
            alignment: Some(Alignment::Center),
            rule: None,
        }
    }
}

/// A filled rectangle used as a horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub frame: Frame,
    pub color: Rgb,
}

/// Freeform content placed on a slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContentItem {
    Text(TextBox),
    Picture(Picture),
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value of the `algn` attribute.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Alignment::Left => "l",
            Alignment::Center => "ctr",
            Alignment::Right => "r",
        }
    }
}

/// A text box holding one or more paragraphs.
///
/// Like a freshly inserted PowerPoint text box, it starts out with a single
/// empty paragraph. `set_text` fills that paragraph; bullets are appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    pub frame: Frame,
    pub word_wrap: bool,
    pub paragraphs: Vec<Paragraph>,
}

impl TextBox {
    /// Create a text box with one empty paragraph.
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            word_wrap: false,
            paragraphs: vec![Paragraph::default()],
        }
    }

    /// Enable or disable word wrapping.
    pub fn word_wrap(&mut self, wrap: bool) -> &mut Self {
        self.word_wrap = wrap;
        self
    }

    /// Replace the text of the first paragraph and return it for styling.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::default());
        }
        let first = &mut self.paragraphs[0];
        first.text = text.into();
        first
    }

    /// Append an empty paragraph and return it.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::default());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// Append a bullet item as a new paragraph.
    ///
    /// Bullets without a color override use [`DEFAULT_TEXT_COLOR`].
    pub fn add_bullet(&mut self, bullet: Bullet) -> &mut Paragraph {
        let paragraph = self.add_paragraph();
        paragraph.text = bullet.text;
        paragraph.level = bullet.level;
        paragraph.size_pt = Some(bullet.size_pt);
        paragraph.bold = bullet.bold;
        paragraph.color = Some(bullet.color.unwrap_or(DEFAULT_TEXT_COLOR));
        paragraph
    }

    /// Text of every paragraph, including empty spacers.
    pub fn lines(&self) -> Vec<&str> {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }
}

/// A paragraph with uniform character formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    /// Indent level, 0 for top-level.
    pub level: u8,
    pub size_pt: Option<f64>,
    pub bold: bool,
    pub color: Option<Rgb>,
    pub alignment: Option<Alignment>,
}

impl Paragraph {
    /// Set the font size in points.
    pub fn font_size(&mut self, size_pt: f64) -> &mut Self {
        self.size_pt = Some(size_pt);
        self
    }

    /// Make the paragraph bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.bold = bold;
        self
    }

    /// Set the text color.
    pub fn color(&mut self, color: Rgb) -> &mut Self {
        self.color = Some(color);
        self
    }

    /// Set the horizontal alignment.
    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = Some(alignment);
        self
    }

    /// Left margin implied by the indent level.
    pub fn left_margin(&self) -> Emu {
        self.level as Emu * INDENT_PER_LEVEL
    }
}

/// One line of indented text within a content area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
    pub level: u8,
    pub bold: bool,
    pub size_pt: f64,
    pub color: Option<Rgb>,
}

impl Bullet {
    /// Create a level-0, regular-weight bullet at the default size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
            bold: false,
            size_pt: DEFAULT_BULLET_SIZE,
            color: None,
        }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, size_pt: f64) -> Self {
        self.size_pt = size_pt;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// Encoded image formats that can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// File extension used for the media part.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    /// MIME type registered in `[Content_Types].xml`.
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// An image loaded from disk and sized for placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    /// File name shown as the picture's description.
    pub name: String,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub frame: Frame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_box_starts_with_empty_paragraph() {
        let mut tb = TextBox::new(Frame::inches(1.0, 1.0, 2.0, 1.0));
        assert_eq!(tb.lines(), vec![""]);

        tb.add_bullet(Bullet::new("first"));
        assert_eq!(tb.lines(), vec!["", "first"]);
    }

    #[test]
    fn test_set_text_fills_first_paragraph() {
        let mut tb = TextBox::new(Frame::inches(1.0, 1.0, 2.0, 1.0));
        tb.set_text("Title").font_size(60.0).bold(true);
        assert_eq!(tb.paragraphs.len(), 1);
        assert_eq!(tb.paragraphs[0].text, "Title");
        assert_eq!(tb.paragraphs[0].size_pt, Some(60.0));
        assert!(tb.paragraphs[0].bold);
    }

    #[test]
    fn test_bullet_defaults() {
        let mut tb = TextBox::new(Frame::inches(0.0, 0.0, 1.0, 1.0));
        let p = tb.add_bullet(Bullet::new("item").level(1));
        assert_eq!(p.size_pt, Some(DEFAULT_BULLET_SIZE));
        assert_eq!(p.color, Some(DEFAULT_TEXT_COLOR));
        assert!(!p.bold);
        assert_eq!(p.left_margin(), INDENT_PER_LEVEL);
    }

    #[test]
    fn test_bullet_color_override() {
        let mut tb = TextBox::new(Frame::inches(0.0, 0.0, 1.0, 1.0));
        let red = Rgb(220, 38, 38);
        let p = tb.add_bullet(Bullet::new("heading").bold().color(red).size(28.0));
        assert_eq!(p.color, Some(red));
        assert_eq!(p.size_pt, Some(28.0));
        assert!(p.bold);
    }

    #[test]
    fn test_deck_numbers_slides() {
        let mut deck = Deck::widescreen();
        deck.add_slide();
        deck.add_slide().set_background(BRAND_BLUE);
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[1].number, 2);
        assert_eq!(deck.slides[1].background, Some(BRAND_BLUE));
        assert_eq!(deck.picture_count(), 0);
    }

    #[test]
    fn test_title_layouts() {
        let heading = SlideTitle::heading("概要");
        assert_eq!(heading.layout, TitleLayout::Heading);
        assert!(heading.rule.is_some());

        let cover = SlideTitle::cover("まとめ", 1.5, 48.0);
        assert_eq!(cover.layout, TitleLayout::Cover);
        assert_eq!(cover.alignment, Some(Alignment::Center));
        assert!(cover.rule.is_none());
        assert!(cover.size_pt > heading.size_pt);
    }
}
