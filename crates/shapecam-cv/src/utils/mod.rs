//! Utility modules

pub mod draw;
pub mod image;

pub use self::draw::ImageCanvas;
pub use self::image::ImageUtils;
