//! Shapecam domain types
//!
//! Shape templates, color bands and the region-of-interest state shared by
//! the vision pipeline and the interactive front end.

pub mod colors;
pub mod error;
pub mod roi;
pub mod shapes;

pub use colors::{ColorBand, ColorPalette, HsvRange};
pub use error::CoreError;
pub use roi::{NavCommand, NavOutcome, Roi, RoiNavigator, StepConfig};
pub use shapes::{ShapeTemplate, TemplateSet};

/// 8-bit RGB display color
pub type Rgb = (u8, u8, u8);
