//! Non-background segmentation

use super::Mask;
use crate::color::HsvImage;
use shapecam_core::HsvRange;

/// Pixels saturated enough to not be white/grey/black background
pub const FOREGROUND_BAND: ([u8; 3], [u8; 3]) = ([0, 30, 0], [180, 255, 255]);

/// Default foreground band as an [`HsvRange`]
pub fn foreground_band() -> HsvRange {
    HsvRange::new(FOREGROUND_BAND.0, FOREGROUND_BAND.1).expect("foreground band is ordered")
}

/// Mark every pixel inside `band` as foreground
pub fn extract_foreground(region: &HsvImage, band: &HsvRange) -> Mask {
    Mask::from_fn(region.width(), region.height(), |x, y| band.contains(region.get(x, y)))
}
