//! Dominant color inside a shape footprint

use super::HsvImage;
use crate::mask::Mask;
use crate::{CvError, Result};
use serde::{Deserialize, Serialize};
use shapecam_core::ColorPalette;

pub const COLOR_THRESHOLD: f64 = 0.85;

/// Dominant color band and its coverage of the masked pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMatch {
    pub index: usize,
    pub rate: f64,
}

/// Per-band coverage: pixels inside the band and under the mask, divided by
/// the number of masked pixels.
///
/// Returns `Ok(None)` when the mask has no foreground cells.
pub fn color_rates(region: &HsvImage, mask: &Mask, palette: &ColorPalette) -> Result<Option<Vec<f64>>> {
    if region.dimensions() != mask.dimensions() {
        return Err(CvError::mismatch(mask.dimensions(), region.dimensions()));
    }

    let masked = mask.count_ones();
    if masked == 0 {
        return Ok(None);
    }

    let mut hits = vec![0usize; palette.len()];
    for (pixel, _) in region
        .pixels()
        .iter()
        .zip(mask.cells())
        .filter(|(_, cell)| **cell == 1)
    {
        for (count, band) in hits.iter_mut().zip(palette.iter()) {
            if band.contains(*pixel) {
                *count += 1;
            }
        }
    }

    Ok(Some(hits.into_iter().map(|h| h as f64 / masked as f64).collect()))
}

/// Band with the highest coverage; earlier bands win ties.
///
/// No threshold is applied. `Ok(None)` for an all-zero mask.
pub fn classify_color(region: &HsvImage, mask: &Mask, palette: &ColorPalette) -> Result<Option<ColorMatch>> {
    let Some(rates) = color_rates(region, mask, palette)? else {
        return Ok(None);
    };

    let mut best: Option<ColorMatch> = None;
    for (index, &rate) in rates.iter().enumerate() {
        if best.is_none_or(|b| rate > b.rate) {
            best = Some(ColorMatch { index, rate });
        }
    }
    Ok(best)
}

/// Thresholded color classification
#[derive(Debug, Clone)]
pub struct ColorClassifier {
    threshold: f64,
}

impl ColorClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Dominant band when its rate is strictly above the threshold
    pub fn classify(&self, region: &HsvImage, mask: &Mask, palette: &ColorPalette) -> Result<Option<ColorMatch>> {
        let best = classify_color(region, mask, palette)?;
        if let Some(m) = &best {
            log::debug!("dominant color band {} at {:.3}", m.index, m.rate);
        }
        Ok(best.filter(|m| m.rate > self.threshold))
    }
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::new(COLOR_THRESHOLD)
    }
}
