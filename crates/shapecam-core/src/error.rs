use thiserror::Error;

/// Errors raised while building templates, bands and their sets.
///
/// All of these are configuration errors: they surface when the process
/// starts or a config file is loaded, never while classifying a frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("template '{name}' has an empty grid")]
    EmptyTemplate { name: String },

    #[error("template '{name}' row {row} has {found} cells, expected {expected}")]
    RaggedTemplate {
        name: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("template '{name}' cell ({row}, {col}) is {value}, expected 0 or 1")]
    InvalidCell {
        name: String,
        row: usize,
        col: usize,
        value: u8,
    },

    #[error("HSV range channel {channel} has lower bound {lower} above upper bound {upper}")]
    InvertedRange { channel: usize, lower: u8, upper: u8 },

    #[error("template set is empty")]
    EmptyTemplateSet,

    #[error("color palette is empty")]
    EmptyPalette,
}
