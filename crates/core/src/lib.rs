//! Core domain types, length units, and image probing for the
//! LN Portal manual deck.

pub mod error;
pub mod media;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use media::{Extent, ImageRef};
pub use types::{
    Alignment, Bullet, ContentItem, Deck, ImageFormat, Paragraph, Picture, Rule, Slide,
    SlideTitle, TextBox, TitleLayout, BRAND_BLUE, DEFAULT_BULLET_SIZE, DEFAULT_TEXT_COLOR,
};
pub use units::{centipoints, inches, points, Emu, Frame, Rgb};
