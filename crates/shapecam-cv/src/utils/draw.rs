//! `Canvas` implementation over an in-memory RGB image

use crate::bbox::BBox;
use crate::traits::Canvas;
use crate::Result;
use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use shapecam_core::Rgb as Color;

/// Pixel height of a label drawn at font scale 1.0
const BASE_TEXT_PX: f32 = 30.0;

/// RGB frame with an optional font for labels.
///
/// Without a font, labels are skipped and only rectangles are drawn.
pub struct ImageCanvas {
    image: RgbImage,
    font: Option<FontArc>,
}

impl ImageCanvas {
    pub fn new(image: RgbImage) -> Self {
        Self { image, font: None }
    }

    pub fn with_font(mut self, font: Option<FontArc>) -> Self {
        self.font = font;
        self
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

impl Canvas for ImageCanvas {
    fn draw_rectangle(&mut self, bbox: &BBox, color: Color, thickness: u32) -> Result<()> {
        let pixel = Rgb([color.0, color.1, color.2]);
        let thickness = thickness.max(1);
        let (width, height) = self.image.dimensions();
        // edges further out than the border never reach the image
        let Some(visible) = bbox.clip(width, height, thickness) else {
            return Ok(());
        };
        for ring in 0..thickness {
            let Some(rect) = visible.inset(ring).and_then(|b| b.to_rect()) else {
                break;
            };
            draw_hollow_rect_mut(&mut self.image, rect, pixel);
        }
        Ok(())
    }

    fn draw_label(
        &mut self,
        text: &str,
        origin: (i32, i32),
        color: Color,
        font_scale: f64,
        thickness: u32,
    ) -> Result<()> {
        let Some(font) = &self.font else {
            log::trace!("no font loaded, skipping label '{}'", text);
            return Ok(());
        };

        let scale = PxScale::from(BASE_TEXT_PX * font_scale as f32);
        let (_, text_height) = text_size(scale, font, text);
        let pixel = Rgb([color.0, color.1, color.2]);
        // origin is the baseline; imageproc anchors text at its top edge
        let top = origin.1.saturating_sub(text_height as i32);

        let (width, height) = self.image.dimensions();
        if i64::from(origin.0) >= i64::from(width) || i64::from(top) >= i64::from(height) {
            return Ok(());
        }

        for dx in 0..thickness.max(1) as i32 {
            draw_text_mut(&mut self.image, pixel, origin.0 + dx, top, scale, font, text);
        }
        Ok(())
    }
}
