// src/color.rs

//! Defines the `Color` type used by palettes and the bitmap buffer.
//!
//! Colors are plain sRGB triples. Configuration files write them as
//! three-element arrays (`[255, 0, 0]`), so `Color` serializes to and from
//! `[u8; 3]`.

use serde::{Deserialize, Serialize};

/// An RGB true color, each component from 0 to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates a color from its components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_triple() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 128)).unwrap();
        assert_eq!(json, "[255,0,128]");
    }

    #[test]
    fn deserializes_from_triple() {
        let c: Color = serde_json::from_str("[0, 205, 0]").unwrap();
        assert_eq!(c, Color::rgb(0, 205, 0));
    }
}
