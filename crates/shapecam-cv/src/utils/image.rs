//! Image loading, saving and cropping helpers

use crate::bbox::BBox;
use crate::mask::Mask;
use crate::{CvError, Result};
use ab_glyph::FontArc;
use anyhow::Context;
use image::{RgbImage, imageops};
use std::path::Path;

/// DejaVu Sans, used for labels when no font is configured
static DEFAULT_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Load image as RGB
    pub fn load_color<P: AsRef<Path>>(path: P) -> anyhow::Result<RgbImage> {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?
            .to_rgb8();
        Ok(img)
    }

    /// Save RGB image, format chosen from the extension
    pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> anyhow::Result<()> {
        image
            .save(&path)
            .with_context(|| format!("Failed to save image: {:?}", path.as_ref()))
    }

    /// Save a mask as a black/white image
    pub fn save_mask<P: AsRef<Path>>(mask: &Mask, path: P) -> anyhow::Result<()> {
        mask.to_image()
            .save(&path)
            .with_context(|| format!("Failed to save mask: {:?}", path.as_ref()))
    }

    /// Load a TrueType/OpenType font for label rendering
    pub fn load_font<P: AsRef<Path>>(path: P) -> anyhow::Result<FontArc> {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read font: {:?}", path.as_ref()))?;
        FontArc::try_from_vec(bytes)
            .with_context(|| format!("Failed to parse font: {:?}", path.as_ref()))
    }

    /// Built-in label font
    pub fn default_font() -> anyhow::Result<FontArc> {
        FontArc::try_from_slice(DEFAULT_FONT).context("Failed to parse built-in font")
    }

    /// Copy the pixels under `bbox`; the box must lie inside the frame
    pub fn crop(frame: &RgbImage, bbox: &BBox) -> Result<RgbImage> {
        let (width, height) = frame.dimensions();
        if bbox.is_empty() || !bbox.fits_within(width, height) {
            return Err(CvError::OutOfBounds {
                region: (bbox.x, bbox.y, bbox.width, bbox.height),
                width,
                height,
            });
        }

        Ok(imageops::crop_imm(frame, bbox.x as u32, bbox.y as u32, bbox.width, bbox.height).to_image())
    }
}
