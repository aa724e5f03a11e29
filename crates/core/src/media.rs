//! Loading screenshots from disk and sizing them for a slide.

use crate::error::{Error, Result};
use crate::types::{ImageFormat, Picture};
use crate::units::{inches, Emu, Frame};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Which side of an image is fixed; the other follows the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extent {
    Width(Emu),
    Height(Emu),
}

/// A reference to an optional image file and where to put it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path relative to the assembly base directory.
    pub path: PathBuf,
    pub x: Emu,
    pub y: Emu,
    pub extent: Extent,
}

impl ImageRef {
    /// Place an image at `(x, y)` inches with a fixed height in inches.
    pub fn with_height(path: impl Into<PathBuf>, x_in: f64, y_in: f64, height_in: f64) -> Self {
        Self {
            path: path.into(),
            x: inches(x_in),
            y: inches(y_in),
            extent: Extent::Height(inches(height_in)),
        }
    }

    /// Place an image at `(x, y)` inches with a fixed width in inches.
    pub fn with_width(path: impl Into<PathBuf>, x_in: f64, y_in: f64, width_in: f64) -> Self {
        Self {
            path: path.into(),
            x: inches(x_in),
            y: inches(y_in),
            extent: Extent::Width(inches(width_in)),
        }
    }

    /// Load the referenced image relative to `base`.
    ///
    /// Returns `Ok(None)` when the file does not exist. A file that exists but
    /// cannot be decoded is an error.
    pub fn load(&self, base: &Path) -> Result<Option<Picture>> {
        let full_path = base.join(&self.path);
        if !full_path.is_file() {
            return Ok(None);
        }

        let data = std::fs::read(&full_path)?;
        let (format, px_width, px_height) = probe(&data)?;
        log::debug!(
            "Loaded {} ({}x{} px, {:?})",
            full_path.display(),
            px_width,
            px_height,
            format
        );

        let (cx, cy) = scale(self.extent, px_width, px_height)?;
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        Ok(Some(Picture {
            name,
            data,
            format,
            frame: Frame {
                x: self.x,
                y: self.y,
                cx,
                cy,
            },
        }))
    }
}

/// Detect the format and pixel dimensions of encoded image bytes.
pub fn probe(data: &[u8]) -> Result<(ImageFormat, u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;

    let format = match reader.format() {
        Some(image::ImageFormat::Png) => ImageFormat::Png,
        Some(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
        Some(other) => return Err(Error::UnsupportedImage(format!("{:?}", other))),
        None => return Err(Error::UnsupportedImage("unrecognized data".to_string())),
    };

    let (width, height) = reader.into_dimensions()?;
    Ok((format, width, height))
}

/// Resolve the free side of an extent from the pixel aspect ratio.
pub fn scale(extent: Extent, px_width: u32, px_height: u32) -> Result<(Emu, Emu)> {
    if px_width == 0 || px_height == 0 {
        return Err(Error::ImageError(format!(
            "degenerate image size {}x{}",
            px_width, px_height
        )));
    }

    let (w, h) = (px_width as i64, px_height as i64);
    Ok(match extent {
        Extent::Height(cy) => (cy * w / h, cy),
        Extent::Width(cx) => (cx, cx * h / w),
    })
}
