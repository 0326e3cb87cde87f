//! Per-frame orchestration: crop, segment, match, color, draw

use super::config::ClassifierConfig;
use crate::bbox::BBox;
use crate::color::{ColorClassifier, ColorMatch, HsvImage};
use crate::mask::{Mask, extract_foreground, generate_mask};
use crate::template::{ShapeMatch, ShapeMatcher};
use crate::traits::Canvas;
use crate::utils::{ImageCanvas, ImageUtils};
use crate::Result;
use ab_glyph::FontArc;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use shapecam_core::{Rgb, Roi};

/// Outcome of classifying one frame's region of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub bbox: BBox,
    pub label: String,
    pub color: Rgb,
    pub shape: Option<ShapeMatch>,
    /// Correlation per template, empty when the region was not classified
    pub shape_scores: Vec<f64>,
    pub color_match: Option<ColorMatch>,
}

impl Classification {
    pub fn is_recognized(&self) -> bool {
        self.shape.is_some()
    }

    /// Shape confidence, only meaningful when recognized
    pub fn confidence(&self) -> Option<f64> {
        self.shape.map(|m| m.score)
    }

    /// Labels are anchored at the bottom-right corner of the box
    pub fn label_origin(&self) -> (i32, i32) {
        self.bbox.end_point()
    }
}

/// Classifies the shape and color under a region of interest and draws the
/// result onto the frame.
pub struct FrameAnnotator {
    config: ClassifierConfig,
    matcher: ShapeMatcher,
    colors: ColorClassifier,
    font: Option<FontArc>,
}

impl FrameAnnotator {
    /// Create new annotator labelling with the built-in font
    pub fn new(config: ClassifierConfig) -> Self {
        let matcher = ShapeMatcher::new(config.shape_threshold);
        let colors = ColorClassifier::new(config.color_threshold);
        let font = match ImageUtils::default_font() {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Labels disabled: {:#}", e);
                None
            }
        };
        Self {
            config,
            matcher,
            colors,
            font,
        }
    }

    /// Validate the config and load its label font, if one is configured
    pub fn from_config(config: ClassifierConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let font = match &config.render.font_path {
            Some(path) => Some(ImageUtils::load_font(path)?),
            None => None,
        };
        let annotator = Self::new(config);
        Ok(match font {
            Some(font) => annotator.with_font(Some(font)),
            None => annotator,
        })
    }

    pub fn with_font(mut self, font: Option<FontArc>) -> Self {
        self.font = font;
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn font(&self) -> Option<&FontArc> {
        self.font.as_ref()
    }

    /// Crop and convert the region; `None` when it cannot be classified
    fn region(&self, frame: &RgbImage, roi: &Roi) -> Result<Option<HsvImage>> {
        let (width, height) = frame.dimensions();
        if roi.is_empty() || !roi.fits_within(width, height) {
            log::debug!("roi {:?} not inside {}x{} frame, skipping", roi, width, height);
            return Ok(None);
        }
        let crop = ImageUtils::crop(frame, &BBox::from_roi(roi))?;
        Ok(Some(HsvImage::from_rgb(&crop)))
    }

    /// Foreground mask of the region, for inspection
    pub fn foreground(&self, frame: &RgbImage, roi: &Roi) -> Result<Option<Mask>> {
        Ok(self
            .region(frame, roi)?
            .map(|hsv| extract_foreground(&hsv, &self.config.foreground_band)))
    }

    /// Classify the shape and color under `roi`
    pub fn classify(&self, frame: &RgbImage, roi: &Roi) -> Result<Classification> {
        let bbox = BBox::from_roi(roi);
        let mut result = Classification {
            bbox,
            label: self.config.render.fallback_label.clone(),
            color: self.config.render.default_color,
            shape: None,
            shape_scores: Vec::new(),
            color_match: None,
        };

        let Some(hsv) = self.region(frame, roi)? else {
            return Ok(result);
        };
        let size = roi.size;

        let foreground = extract_foreground(&hsv, &self.config.foreground_band);
        result.shape_scores = self
            .matcher
            .scores(&foreground, &self.config.templates, size, size)?;
        log::debug!("shape scores {:?}", result.shape_scores);

        let Some(shape) = self.matcher.accept(&result.shape_scores) else {
            return Ok(result);
        };
        let Some(template) = self.config.templates.get(shape.index) else {
            return Ok(result);
        };
        result.label = template.name().to_string();
        result.shape = Some(shape);

        // color is measured inside the template's footprint, not the raw foreground
        let template_mask = generate_mask(template, size, size)?;
        result.color_match = self.colors.classify(&hsv, &template_mask, &self.config.palette)?;
        if let Some(band) = result
            .color_match
            .and_then(|m| self.config.palette.get(m.index))
        {
            result.color = band.display;
        }

        Ok(result)
    }

    /// Draw the box and label of `classification`
    pub fn render<C: Canvas>(&self, canvas: &mut C, classification: &Classification) -> Result<()> {
        let render = &self.config.render;
        canvas.draw_rectangle(&classification.bbox, classification.color, render.border_width)?;
        canvas.draw_label(
            &classification.label,
            classification.label_origin(),
            classification.color,
            render.font_scale,
            render.border_width,
        )
    }

    /// Classify and draw onto the frame, returning both
    pub fn annotate(&self, frame: RgbImage, roi: &Roi) -> Result<(RgbImage, Classification)> {
        let classification = self.classify(&frame, roi)?;
        let mut canvas = ImageCanvas::new(frame).with_font(self.font.clone());
        self.render(&mut canvas, &classification)?;
        Ok((canvas.into_image(), classification))
    }
}

impl Default for FrameAnnotator {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb as Pixel;

    const WHITE: Pixel<u8> = Pixel([255, 255, 255]);

    /// Records draw calls instead of rasterizing them
    #[derive(Default)]
    struct RecordingCanvas {
        rectangles: Vec<(BBox, Rgb, u32)>,
        labels: Vec<(String, (i32, i32), Rgb, f64, u32)>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_rectangle(&mut self, bbox: &BBox, color: Rgb, thickness: u32) -> Result<()> {
            self.rectangles.push((*bbox, color, thickness));
            Ok(())
        }

        fn draw_label(
            &mut self,
            text: &str,
            origin: (i32, i32),
            color: Rgb,
            font_scale: f64,
            thickness: u32,
        ) -> Result<()> {
            self.labels.push((text.to_string(), origin, color, font_scale, thickness));
            Ok(())
        }
    }

    fn frame_with_block(color: Pixel<u8>, block: (u32, u32, u32, u32)) -> RgbImage {
        let (bx, by, bw, bh) = block;
        RgbImage::from_fn(320, 240, |x, y| {
            if x >= bx && x < bx + bw && y >= by && y < by + bh { color } else { WHITE }
        })
    }

    #[test]
    fn test_green_square() -> Result<()> {
        let frame = frame_with_block(Pixel([0, 200, 0]), (20, 20, 100, 100));
        let result = FrameAnnotator::default().classify(&frame, &Roi::new(20, 20, 100))?;
        assert_eq!(result.label, "square");
        assert_eq!(result.confidence(), Some(1.0));
        assert_eq!(result.color, (0, 255, 0));
        assert_eq!(result.color_match.map(|m| m.index), Some(1));
        Ok(())
    }

    #[test]
    fn test_horizontal_bar_is_rectangle() -> Result<()> {
        // middle half of a 100px roi filled with blue
        let frame = frame_with_block(Pixel([0, 0, 255]), (10, 35, 100, 50));
        let result = FrameAnnotator::default().classify(&frame, &Roi::new(10, 10, 100))?;
        assert_eq!(result.label, "rectangle");
        assert_eq!(result.color, (0, 0, 255));
        Ok(())
    }

    #[test]
    fn test_unsaturated_shape_keeps_default_color() -> Result<()> {
        // magenta is foreground but outside every band
        let frame = frame_with_block(Pixel([255, 0, 255]), (0, 0, 80, 80));
        let result = FrameAnnotator::default().classify(&frame, &Roi::new(0, 0, 80))?;
        assert_eq!(result.label, "square");
        assert_eq!(result.color_match, None);
        assert_eq!(result.color, (0, 0, 0));
        Ok(())
    }

    #[test]
    fn test_roi_outside_frame_falls_back() -> Result<()> {
        let frame = frame_with_block(Pixel([255, 0, 0]), (0, 0, 320, 240));
        let annotator = FrameAnnotator::default();

        let result = annotator.classify(&frame, &Roi::new(200, 100, 200))?;
        assert_eq!(result.label, "idk");
        assert!(result.shape_scores.is_empty());
        assert_eq!(annotator.foreground(&frame, &Roi::new(200, 100, 200))?, None);

        let empty = annotator.classify(&frame, &Roi::new(10, 10, 0))?;
        assert_eq!(empty.label, "idk");
        assert_eq!(empty.color, (0, 0, 0));
        Ok(())
    }

    #[test]
    fn test_oversized_roi_falls_back_without_allocating() -> Result<()> {
        let frame = RgbImage::from_pixel(320, 240, WHITE);
        let annotator = FrameAnnotator::default();
        let huge = Roi::new(200, 0, u32::MAX - 99);

        let result = annotator.classify(&frame, &huge)?;
        assert_eq!(result.label, "idk");
        assert_eq!(result.color, (0, 0, 0));
        assert!(result.shape_scores.is_empty());
        assert_eq!(annotator.foreground(&frame, &huge)?, None);

        let (annotated, _) = annotator.annotate(frame, &huge)?;
        assert_eq!(annotated.dimensions(), (320, 240));
        assert_eq!(annotated.get_pixel(200, 100), &Pixel([0, 0, 0]));
        Ok(())
    }

    #[test]
    fn test_annotate_draws_label_right_of_corner() -> Result<()> {
        let frame = RgbImage::from_pixel(320, 240, WHITE);
        let (annotated, result) = FrameAnnotator::default().annotate(frame, &Roi::new(20, 20, 100))?;
        assert_eq!(result.label, "idk");
        assert_eq!(result.label_origin(), (120, 120));

        // text sits on the baseline at the bottom-right corner, outside the box
        let inked = (122..220)
            .flat_map(|x| (100..140).map(move |y| (x, y)))
            .filter(|&(x, y)| annotated.get_pixel(x, y) != &WHITE)
            .count();
        assert!(inked > 0);
        Ok(())
    }

    #[test]
    fn test_render_uses_result_color_and_corner() -> Result<()> {
        let frame = frame_with_block(Pixel([255, 0, 0]), (40, 40, 60, 60));
        let annotator = FrameAnnotator::default();
        let result = annotator.classify(&frame, &Roi::new(40, 40, 60))?;

        let mut canvas = RecordingCanvas::default();
        annotator.render(&mut canvas, &result)?;

        assert_eq!(canvas.rectangles, vec![(BBox::new(40, 40, 60, 60), (255, 0, 0), 2)]);
        assert_eq!(
            canvas.labels,
            vec![("square".to_string(), (100, 100), (255, 0, 0), 0.7, 2)]
        );
        Ok(())
    }

    #[test]
    fn test_annotate_draws_on_full_frame() -> Result<()> {
        let frame = frame_with_block(Pixel([255, 0, 0]), (40, 40, 60, 60));
        let (annotated, result) = FrameAnnotator::default().annotate(frame, &Roi::new(30, 30, 80))?;
        assert_eq!(annotated.dimensions(), (320, 240));
        // border drawn at the roi corner in the result color
        assert_eq!(annotated.get_pixel(30, 30), &Pixel([result.color.0, result.color.1, result.color.2]));
        Ok(())
    }
}
