//! The LN Portal user manual deck: fixed content and the assembler that
//! turns it into a .pptx file.

pub mod assembler;
pub mod content;

pub use assembler::DeckAssembler;
pub use content::OUTPUT_FILE;
