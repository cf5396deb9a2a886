use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// RGB color, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub fn from_packed(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Parse a CSS-style hex color: `#RRGGBB`, `#RGB`, with or without `#`.
    pub fn from_hex(hex: &str) -> Result<Self, SimError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || SimError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let packed = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map_err(|_| invalid())?,
            3 => {
                // #abc -> #aabbcc
                let short = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                let r = (short >> 8) & 0xF;
                let g = (short >> 4) & 0xF;
                let b = short & 0xF;
                (r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)
            }
            _ => return Err(invalid()),
        };
        Ok(Self::from_packed(packed))
    }

    /// Packed `0xRRGGBB` form (channels rounded to the nearest byte).
    pub fn to_packed(&self) -> u32 {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        byte(self.r) << 16 | byte(self.g) << 8 | byte(self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:06X}", self.to_packed())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
