//! High-level detection module

pub mod annotator;
pub mod config;

pub use annotator::{Classification, FrameAnnotator};
pub use config::{ClassifierConfig, RenderConfig};
