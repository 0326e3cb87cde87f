//! Color bands and the ordered palette the color classifier walks

pub mod band;

pub use band::{ColorBand, Hsv8, HsvRange};

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of color bands; earlier bands win ties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorBand>", into = "Vec<ColorBand>")]
pub struct ColorPalette {
    bands: Vec<ColorBand>,
}

impl ColorPalette {
    pub fn new(bands: Vec<ColorBand>) -> Result<Self, CoreError> {
        if bands.is_empty() {
            return Err(CoreError::EmptyPalette);
        }
        Ok(Self { bands })
    }

    /// Red, green and blue
    pub fn builtin() -> Self {
        let bands = [
            ColorBand::new("red", (255, 0, 0), [0, 30, 20], [20, 255, 255]),
            ColorBand::new("green", (0, 255, 0), [45, 30, 20], [70, 255, 255]),
            ColorBand::new("blue", (0, 0, 255), [110, 30, 20], [130, 255, 255]),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("builtin color bands are well formed");

        Self { bands }
    }

    pub fn get(&self, index: usize) -> Option<&ColorBand> {
        self.bands.get(index)
    }

    pub fn as_slice(&self) -> &[ColorBand] {
        &self.bands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorBand> {
        self.bands.iter()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<ColorBand>> for ColorPalette {
    type Error = CoreError;

    fn try_from(bands: Vec<ColorBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<ColorPalette> for Vec<ColorBand> {
    fn from(palette: ColorPalette) -> Self {
        palette.bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palette() {
        let palette = ColorPalette::builtin();
        let names: Vec<&str> = palette.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["red", "green", "blue"]);
        assert_eq!(palette.get(0).map(|b| b.display), Some((255, 0, 0)));
        // pure hues in the 8-bit convention
        assert!(palette.as_slice()[0].contains([0, 255, 255]));
        assert!(palette.as_slice()[1].contains([60, 255, 255]));
        assert!(palette.as_slice()[2].contains([120, 255, 255]));
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(ColorPalette::new(Vec::new()), Err(CoreError::EmptyPalette));
    }
}
