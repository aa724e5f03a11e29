//! Length units and colors as they appear in Office Open XML.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A length in English Metric Units.
pub type Emu = i64;

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Convert inches to EMUs, truncating any fractional EMU.
pub fn inches(value: f64) -> Emu {
    (value * EMU_PER_INCH as f64) as Emu
}

/// Convert points to EMUs, truncating any fractional EMU.
pub fn points(value: f64) -> Emu {
    (value * EMU_PER_POINT as f64) as Emu
}

/// Font size in hundredths of a point, the unit of `sz` attributes.
pub fn centipoints(size_pt: f64) -> u32 {
    (size_pt * 100.0).round() as u32
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Upper-case hex digits as used by `<a:srgbClr val="..."/>`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Parse six hex digits back into a color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// A placement rectangle on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Frame {
    /// Build a frame from inch measurements.
    pub fn inches(x: f64, y: f64, cx: f64, cy: f64) -> Self {
        Self {
            x: inches(x),
            y: inches(y),
            cx: inches(cx),
            cy: inches(cy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_truncate() {
        assert_eq!(inches(1.0), 914_400);
        assert_eq!(inches(7.5), 6_858_000);
        assert_eq!(inches(13.333), 12_191_695);
        assert_eq!(inches(0.05), 45_720);
    }

    #[test]
    fn test_points_and_centipoints() {
        assert_eq!(points(20.0), 254_000);
        assert_eq!(centipoints(40.0), 4000);
        assert_eq!(centipoints(28.0), 2800);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb(37, 99, 235).hex(), "2563EB");
        assert_eq!(Rgb(255, 255, 255).to_string(), "#FFFFFF");
        assert_eq!(Rgb::from_hex("DC2626"), Some(Rgb(220, 38, 38)));
        assert_eq!(Rgb::from_hex("xyz"), None);
    }
}
