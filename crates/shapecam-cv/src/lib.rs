//! Shapecam Computer Vision Library
//!
//! Classifies the dominant shape and color inside a square region of a
//! frame by correlating a binary foreground mask against fixed templates.

pub mod bbox;
pub mod color;
pub mod detection;
pub mod error;
pub mod mask;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use bbox::BBox;
pub use color::{ColorClassifier, ColorMatch, HsvImage, classify_color};
pub use detection::{Classification, ClassifierConfig, FrameAnnotator};
pub use error::CvError;
pub use mask::{Mask, extract_foreground, generate_mask};
pub use template::{ShapeMatch, ShapeMatcher, TemplateLoader};

// Error handling
pub type Result<T> = std::result::Result<T, CvError>;

/// Core traits for the CV system
pub mod traits {
    use super::*;
    use shapecam_core::Rgb;

    /// Drawing surface the annotator renders onto
    pub trait Canvas {
        /// Outline `bbox` with a border `thickness` pixels wide
        fn draw_rectangle(&mut self, bbox: &BBox, color: Rgb, thickness: u32) -> Result<()>;

        /// Draw `text` with its baseline starting at `origin`
        fn draw_label(
            &mut self,
            text: &str,
            origin: (i32, i32),
            color: Rgb,
            font_scale: f64,
            thickness: u32,
        ) -> Result<()>;
    }
}
