use crate::Rgb;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// 8-bit HSV triple: hue in 0..=180, saturation and value in 0..=255
pub type Hsv8 = [u8; 3];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawRange {
    lower: Hsv8,
    upper: Hsv8,
}

/// Inclusive per-channel HSV bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct HsvRange {
    lower: Hsv8,
    upper: Hsv8,
}

impl HsvRange {
    pub fn new(lower: Hsv8, upper: Hsv8) -> Result<Self, CoreError> {
        for channel in 0..3 {
            if lower[channel] > upper[channel] {
                return Err(CoreError::InvertedRange {
                    channel,
                    lower: lower[channel],
                    upper: upper[channel],
                });
            }
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> Hsv8 {
        self.lower
    }

    pub fn upper(&self) -> Hsv8 {
        self.upper
    }

    /// True when every channel lies within its bounds
    #[inline]
    pub fn contains(&self, hsv: Hsv8) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }
}

impl TryFrom<RawRange> for HsvRange {
    type Error = CoreError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

impl From<HsvRange> for RawRange {
    fn from(range: HsvRange) -> Self {
        Self {
            lower: range.lower,
            upper: range.upper,
        }
    }
}

/// A recognized color: its HSV band and the RGB color used to draw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBand {
    pub name: String,
    pub display: Rgb,
    pub range: HsvRange,
}

impl ColorBand {
    pub fn new(name: impl Into<String>, display: Rgb, lower: Hsv8, upper: Hsv8) -> Result<Self, CoreError> {
        Ok(Self {
            name: name.into(),
            display,
            range: HsvRange::new(lower, upper)?,
        })
    }

    #[inline]
    pub fn contains(&self, hsv: Hsv8) -> bool {
        self.range.contains(hsv)
    }
}
