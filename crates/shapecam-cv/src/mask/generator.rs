//! Template rasterization

use super::Mask;
use crate::{CvError, Result};
use image::{ImageBuffer, Luma, imageops::{self, FilterType}};
use shapecam_core::ShapeTemplate;

/// Cells whose interpolated value reaches this are set
const MASK_LEVEL: f32 = 0.5;

/// Rasterize `template` to a `width × height` binary mask.
///
/// The 0/1 grid is resampled with a triangle (bilinear) filter and the
/// result is thresholded at the midpoint, so one low-resolution template
/// serves every ROI size.
pub fn generate_mask(template: &ShapeTemplate, width: u32, height: u32) -> Result<Mask> {
    if width == 0 || height == 0 {
        return Err(CvError::InvalidDimensions { width, height });
    }

    let source: ImageBuffer<Luma<f32>, Vec<f32>> = ImageBuffer::from_fn(
        template.cols() as u32,
        template.rows() as u32,
        |x, y| Luma([f32::from(template.get(y as usize, x as usize))]),
    );

    let resized = imageops::resize(&source, width, height, FilterType::Triangle);

    Ok(Mask::from_fn(width, height, |x, y| {
        resized.get_pixel(x, y)[0] >= MASK_LEVEL
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecam_core::TemplateSet;

    fn builtin(index: usize) -> ShapeTemplate {
        TemplateSet::builtin().as_slice()[index].clone()
    }

    #[test]
    fn test_output_dimensions() -> Result<()> {
        for template in TemplateSet::builtin().iter() {
            for (w, h) in [(1, 1), (4, 4), (40, 40), (400, 400), (37, 91)] {
                let mask = generate_mask(template, w, h)?;
                assert_eq!(mask.dimensions(), (w, h));
                assert_eq!(mask.len(), (w * h) as usize);
                assert!(mask.cells().iter().all(|&c| c <= 1));
            }
        }
        Ok(())
    }

    #[test]
    fn test_zero_size_fails() {
        let square = builtin(0);
        assert!(matches!(
            generate_mask(&square, 0, 10),
            Err(CvError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(generate_mask(&square, 10, 0).is_err());
    }

    #[test]
    fn test_square_fills_everything() -> Result<()> {
        let mask = generate_mask(&builtin(0), 200, 200)?;
        assert_eq!(mask.count_ones(), 200 * 200);
        Ok(())
    }

    #[test]
    fn test_native_size_is_identity() -> Result<()> {
        let rectangle = builtin(1);
        let mask = generate_mask(&rectangle, 4, 4)?;
        assert_eq!(mask.cells(), rectangle.cells());
        Ok(())
    }

    #[test]
    fn test_rectangle_band_survives_scaling() -> Result<()> {
        for size in [40, 400] {
            let mask = generate_mask(&builtin(1), size, size)?;
            assert_eq!(mask.get(0, 0), 0);
            assert_eq!(mask.get(size / 2, size / 2), 1);
            assert_eq!(mask.get(size - 1, size - 1), 0);
            let ratio = mask.count_ones() as f64 / mask.len() as f64;
            assert!((ratio - 0.5).abs() < 0.05, "ratio {ratio} at {size}");
        }
        Ok(())
    }

    #[test]
    fn test_triangle_silhouette_consistent_across_sizes() -> Result<()> {
        let triangle = builtin(2);
        let small = generate_mask(&triangle, 40, 40)?;
        let large = generate_mask(&triangle, 400, 400)?;

        for (mask, size) in [(&small, 40), (&large, 400)] {
            // apex column, bottom row, empty top corners
            assert_eq!(mask.get(size / 2, 0), 1);
            assert_eq!(mask.get(0, size - 1), 1);
            assert_eq!(mask.get(size - 1, size - 1), 1);
            assert_eq!(mask.get(0, 0), 0);
            assert_eq!(mask.get(size - 1, 0), 0);
        }

        let small_fill = small.count_ones() as f64 / small.len() as f64;
        let large_fill = large.count_ones() as f64 / large.len() as f64;
        assert!((small_fill - large_fill).abs() < 0.05);
        Ok(())
    }
}
