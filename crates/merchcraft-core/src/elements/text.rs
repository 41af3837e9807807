//! Text element content and styling.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    /// Proportional sans-serif face (default).
    #[default]
    Sans,
    /// Fixed-width face.
    Mono,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Arial",
            FontFamily::Mono => "Courier",
        }
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

/// Opaque RGB color stored as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for TextColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<TextColor> for String {
    fn from(color: TextColor) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for TextColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<TextColor> for Color {
    fn from(color: TextColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

/// A block of user text with its styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The literal text as typed.
    pub text: String,
    /// Fill color of the glyphs.
    pub color: TextColor,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family.
    pub font_family: FontFamily,
}

impl TextBlock {
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;
    pub const MIN_FONT_SIZE: f64 = 8.0;
    pub const MAX_FONT_SIZE: f64 = 48.0;

    /// Create a text block with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: TextColor::BLACK,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: FontFamily::default(),
        }
    }

    /// Set the font size, clamped to the supported range.
    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = size.clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(TextColor::from_hex("#ff8000"), Ok(TextColor::new(255, 128, 0)));
        assert_eq!(TextColor::from_hex("FF8000"), Ok(TextColor::new(255, 128, 0)));
        assert!(TextColor::from_hex("#ff80").is_err());
        assert!(TextColor::from_hex("#gg0000").is_err());
        assert!(TextColor::from_hex("#ffé000").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(TextColor::new(255, 128, 0).to_hex(), "#ff8000");
        assert_eq!(TextColor::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&TextColor::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: TextColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TextColor::new(1, 2, 3));
    }

    #[test]
    fn test_font_size_clamp() {
        let mut block = TextBlock::new("x");
        block.set_font_size(100.0);
        assert_eq!(block.font_size, TextBlock::MAX_FONT_SIZE);
        block.set_font_size(0.0);
        assert_eq!(block.font_size, TextBlock::MIN_FONT_SIZE);
    }
}
