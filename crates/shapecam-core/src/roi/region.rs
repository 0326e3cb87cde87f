use serde::{Deserialize, Serialize};

pub const DEFAULT_ROI_SIZE: u32 = 200;

/// Square region of interest in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roi {
    pub left: u32,
    pub top: u32,
    pub size: u32,
}

impl Roi {
    pub fn new(left: u32, top: u32, size: u32) -> Self {
        Self { left, top, size }
    }

    /// Top-left corner
    pub fn start_point(&self) -> (u32, u32) {
        (self.left, self.top)
    }

    /// Bottom-right corner (exclusive), saturating at `u32::MAX`
    pub fn end_point(&self) -> (u32, u32) {
        (self.left.saturating_add(self.size), self.top.saturating_add(self.size))
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// True when the whole square lies inside a `width × height` frame
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let size = u64::from(self.size);
        u64::from(self.left) + size <= u64::from(width) && u64::from(self.top) + size <= u64::from(height)
    }
}

impl Default for Roi {
    fn default() -> Self {
        Self::new(0, 0, DEFAULT_ROI_SIZE)
    }
}
