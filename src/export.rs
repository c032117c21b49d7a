// src/export.rs

//! Writes a rendered [`Bitmap`] to disk as a PNG.
//!
//! The core pipeline only produces a raw pixel buffer; encoding is delegated
//! to the `image` crate here, at the edge of the application.

use crate::render::Bitmap;
use anyhow::{Context, Result};
use image::RgbImage;
use log::info;
use std::fs;
use std::path::Path;

/// Encodes the bitmap as PNG at `path`, creating parent directories.
pub fn save_png(bitmap: Bitmap, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    let width = bitmap.width();
    let height = bitmap.height();
    let img = RgbImage::from_raw(width, height, bitmap.into_pixels())
        .context("Bitmap buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("Failed to write image to {}", path.display()))?;
    info!("Image saved to {}", path.display());
    Ok(())
}
