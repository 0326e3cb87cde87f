//! Bounding box of the region being classified

use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use shapecam_core::Roi;

/// Axis-aligned box in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BBox {
    /// Create a new bounding box
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Square box covering a region of interest; corners past `i32::MAX`
    /// are pinned there
    pub fn from_roi(roi: &Roi) -> Self {
        let x = i32::try_from(roi.left).unwrap_or(i32::MAX);
        let y = i32::try_from(roi.top).unwrap_or(i32::MAX);
        Self::new(x, y, roi.size, roi.size)
    }

    /// Top-left corner
    pub fn start_point(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Bottom-right corner, one past the last pixel, saturating at
    /// `i32::MAX`.
    ///
    /// The border is drawn inside the box, so the last border pixel sits at
    /// `end_point() - 1`, one short of a line drawn through `end_point()`.
    pub fn end_point(&self) -> (i32, i32) {
        let (right, bottom) = self.edges();
        (saturate(right), saturate(bottom))
    }

    /// Exclusive right and bottom edges without overflow
    fn edges(&self) -> (i64, i64) {
        (
            i64::from(self.x) + i64::from(self.width),
            i64::from(self.y) + i64::from(self.height),
        )
    }

    /// Calculate area of the bounding box
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the box lies entirely inside a `width × height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let (right, bottom) = self.edges();
        self.x >= 0 && self.y >= 0 && right <= i64::from(width) && bottom <= i64::from(height)
    }

    /// Part of the box inside a `width × height` image grown by `margin` on
    /// every side; `None` when nothing is left
    pub fn clip(&self, width: u32, height: u32, margin: u32) -> Option<BBox> {
        let margin = i64::from(margin);
        let (right, bottom) = self.edges();
        let left = i64::from(self.x).max(-margin);
        let top = i64::from(self.y).max(-margin);
        let right = right.min(i64::from(width) + margin);
        let bottom = bottom.min(i64::from(height) + margin);
        if right <= left || bottom <= top {
            return None;
        }
        Some(BBox::new(
            saturate(left),
            saturate(top),
            u32::try_from(right - left).ok()?,
            u32::try_from(bottom - top).ok()?,
        ))
    }

    /// Convert to an imageproc rect; `None` for empty boxes
    pub fn to_rect(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(Rect::at(self.x, self.y).of_size(self.width, self.height))
    }

    /// Box shrunk by `inset` pixels on every side; `None` once it vanishes
    pub fn inset(&self, inset: u32) -> Option<BBox> {
        let twice = inset.checked_mul(2)?;
        let width = self.width.checked_sub(twice)?;
        let height = self.height.checked_sub(twice)?;
        let shift = i32::try_from(inset).ok()?;
        let inner = BBox::new(self.x.checked_add(shift)?, self.y.checked_add(shift)?, width, height);
        (!inner.is_empty()).then_some(inner)
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
