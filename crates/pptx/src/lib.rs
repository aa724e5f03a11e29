//! PPTX (Office Open XML) backend for the manual deck.
//!
//! Writes a [`deck_core::Deck`] as a .pptx ZIP package and reads written
//! packages back into a structural outline.

pub mod reader;
mod shapes;
pub mod template;
pub mod writer;
mod xml;

pub use reader::{DeckOutline, PptxReader, SlideOutline};
pub use writer::PptxWriter;
