//! RGB to 8-bit HSV conversion

use image::{Rgb, RgbImage};
use palette::{Hsv, IntoColor, Srgb};
use shapecam_core::colors::Hsv8;

/// Convert one RGB pixel to 8-bit HSV.
///
/// Hue is stored as degrees / 2 so it fits 0..=180; saturation and value
/// are scaled to 0..=255.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> Hsv8 {
    let [r, g, b] = pixel.0;
    let hsv: Hsv = Srgb::new(r, g, b).into_format::<f32>().into_color();

    let hue = (hsv.hue.into_positive_degrees() / 2.0).round().min(180.0);
    let saturation = (hsv.saturation * 255.0).round().clamp(0.0, 255.0);
    let value = (hsv.value * 255.0).round().clamp(0.0, 255.0);

    [hue as u8, saturation as u8, value as u8]
}

/// A region converted to 8-bit HSV, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<Hsv8>,
}

impl HsvImage {
    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|&p| rgb_to_hsv(p)).collect();
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Hsv8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[Hsv8] {
        &self.pixels
    }
}
