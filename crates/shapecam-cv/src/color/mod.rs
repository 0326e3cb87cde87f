//! HSV conversion and color-band classification

pub mod classifier;
pub mod hsv;

pub use classifier::{COLOR_THRESHOLD, ColorClassifier, ColorMatch, classify_color, color_rates};
pub use hsv::{HsvImage, rgb_to_hsv};
