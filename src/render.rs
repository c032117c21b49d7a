// src/render.rs

//! Renders a classified grid into an RGB bitmap.
//!
//! Each cell paints a `dot_size × dot_size` block at
//! `(col * (dot_size + spacing), row * (dot_size + spacing))`; composite
//! cells and the spacing between blocks stay the background color. A prime
//! cell shows exactly one color: its tag set is resolved through the fixed
//! [`Tag::PRIORITY`](crate::classify::Tag::PRIORITY) order and the palette
//! maps the winning tag to a color. Rendering is deterministic: identical
//! grid, palette, and dimensions produce byte-identical buffers.

use crate::classify::Tag;
use crate::color::Color;
use crate::grid::Grid;
use log::debug;
use serde::{Deserialize, Serialize};

/// One color per tag; fixed for a rendering pass. The composite/background
/// color travels separately (it comes from `grid.background_color` in the
/// config rather than the `colors` section).
///
/// Field names double as the `colors.<tag>` keys in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub regular: Color,
    pub twin: Color,
    pub mersenne: Color,
    pub safe: Color,
    pub palindromic: Color,
    pub circular: Color,
    pub sophie_germain: Color,
    pub factorial: Color,
    pub fibonacci: Color,
    pub sexy: Color,
    pub cuban: Color,
    pub happy: Color,
    pub chen: Color,
    pub wieferich: Color,
    pub isolated: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            regular: Color::BLACK,
            twin: Color::rgb(255, 0, 0),
            mersenne: Color::rgb(0, 255, 0),
            safe: Color::rgb(0, 0, 255),
            palindromic: Color::rgb(255, 165, 0),
            circular: Color::rgb(128, 0, 128),
            sophie_germain: Color::rgb(0, 128, 128),
            factorial: Color::rgb(255, 0, 255),
            fibonacci: Color::rgb(255, 215, 0),
            sexy: Color::rgb(255, 105, 180),
            cuban: Color::rgb(139, 69, 19),
            happy: Color::rgb(0, 255, 255),
            chen: Color::rgb(128, 128, 0),
            wieferich: Color::rgb(220, 20, 60),
            isolated: Color::rgb(105, 105, 105),
        }
    }
}

impl Palette {
    /// The color assigned to a single tag.
    pub fn color(&self, tag: Tag) -> Color {
        match tag {
            Tag::Regular => self.regular,
            Tag::Twin => self.twin,
            Tag::Mersenne => self.mersenne,
            Tag::Safe => self.safe,
            Tag::Palindromic => self.palindromic,
            Tag::Circular => self.circular,
            Tag::SophieGermain => self.sophie_germain,
            Tag::Factorial => self.factorial,
            Tag::Fibonacci => self.fibonacci,
            Tag::Sexy => self.sexy,
            Tag::Cuban => self.cuban,
            Tag::Happy => self.happy,
            Tag::Chen => self.chen,
            Tag::Wieferich => self.wieferich,
            Tag::Isolated => self.isolated,
        }
    }
}

/// A packed RGB8 pixel buffer, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Allocates a buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&[fill.r, fill.g, fill.b]);
        }
        Bitmap {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel bytes, for export collaborators.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the bitmap, yielding the raw bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The pixel at (x, y). Panics if out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(x < self.width && y < self.height);
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Color::rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Fills a rectangle, clamped to the buffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            let row_base = row as usize * self.width as usize;
            for col in x..x_end {
                let idx = (row_base + col as usize) * 3;
                self.pixels[idx] = color.r;
                self.pixels[idx + 1] = color.g;
                self.pixels[idx + 2] = color.b;
            }
        }
    }
}

/// Translates a classified [`Grid`] into a [`Bitmap`] through a palette.
///
/// Stateless beyond the scope of a single `render` call.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    /// Paints the grid. The bitmap is
    /// `columns * (dot_size + spacing)` × `rows * (dot_size + spacing)`
    /// pixels regardless of how many cells are prime.
    pub fn render(
        &self,
        grid: &Grid,
        palette: &Palette,
        dot_size: u32,
        spacing: u32,
        background: Color,
    ) -> Bitmap {
        let pitch = dot_size + spacing;
        let width = grid.columns * pitch;
        let height = grid.rows * pitch;
        let mut bitmap = Bitmap::new(width, height, background);

        let mut painted = 0usize;
        for cell in grid.cells() {
            let Some(tags) = cell.tags else {
                continue; // composite cells keep the background
            };
            let Some(tag) = tags.dominant() else {
                continue; // unreachable for primes, but harmless
            };
            bitmap.fill_rect(
                cell.col * pitch,
                cell.row * pitch,
                dot_size,
                dot_size,
                palette.color(tag),
            );
            painted += 1;
        }
        debug!(
            "rendered {}x{} bitmap, {} prime dots painted",
            width, height, painted
        );
        bitmap
    }
}
