//! Error type for the vision pipeline

use shapecam_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CvError {
    #[error("invalid mask dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch { expected: (u32, u32), found: (u32, u32) },

    #[error("mask has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },

    #[error("region {region:?} does not fit a {width}x{height} frame")]
    OutOfBounds {
        region: (i32, i32, u32, u32),
        width: u32,
        height: u32,
    },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl CvError {
    pub fn mismatch(expected: (u32, u32), found: (u32, u32)) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}
