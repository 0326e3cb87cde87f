//! Binary masks: rasterized templates and foreground segmentation

pub mod foreground;
pub mod generator;

pub use foreground::{FOREGROUND_BAND, extract_foreground};
pub use generator::generate_mask;

use crate::{CvError, Result};
use image::{GrayImage, Luma};

/// Row-major grid of 0/1 cells with explicit dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl Mask {
    /// All-zero mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Mask whose cell (x, y) is `f(x, y)`
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(u8::from(f(x, y)));
            }
        }
        Self { width, height, cells }
    }

    /// Wrap row-major cells; any non-zero value counts as 1
    pub fn from_cells(width: u32, height: u32, cells: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(CvError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        let cells = cells.into_iter().map(|c| u8::from(c != 0)).collect();
        Ok(Self { width, height, cells })
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

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at column `x`, row `y`
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of cells set to 1
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Mask with every cell flipped
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| 1 - c).collect(),
        }
    }

    /// Correlation score: fraction of cells where both masks hold the same
    /// value. Background agreement counts as much as foreground agreement.
    pub fn agreement(&self, other: &Mask) -> Result<f64> {
        if self.dimensions() != other.dimensions() {
            return Err(CvError::mismatch(self.dimensions(), other.dimensions()));
        }
        if self.cells.is_empty() {
            return Err(CvError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let equal = self
            .cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a == b)
            .count();

        Ok(equal as f64 / (self.width as f64 * self.height as f64))
    }

    /// Black/white image of the mask, for debug dumps
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.get(x, y) * 255]))
    }
}
