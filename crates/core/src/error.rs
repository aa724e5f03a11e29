//! Error types for building and serializing the manual deck.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling, writing, or reading a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read an input file or write the output file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// An image file exists but could not be decoded.
    #[error("Image error: {0}")]
    ImageError(String),

    /// The image format is not one we can embed.
    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML generation or parsing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// A package is missing a required part or has an unexpected structure.
    #[error("Invalid or corrupted package: {0}")]
    CorruptedFile(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::ImageError(e.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(e: std::fmt::Error) -> Self {
        Error::XmlError(e.to_string())
    }
}
