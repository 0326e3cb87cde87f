//! Region of interest and keyboard-driven navigation

pub mod navigator;
pub mod region;

pub use navigator::{MOVE_STEP, NavCommand, NavOutcome, RoiNavigator, StepConfig, ZOOM_STEP};
pub use region::{DEFAULT_ROI_SIZE, Roi};
