//! Correlation of a foreground mask against rasterized templates

use super::{SHAPE_THRESHOLD, ShapeMatch};
use crate::mask::{Mask, generate_mask};
use crate::Result;
use shapecam_core::{ShapeTemplate, TemplateSet};

/// Scores every registered template against a foreground mask
#[derive(Debug, Clone)]
pub struct ShapeMatcher {
    threshold: f64,
}

impl ShapeMatcher {
    /// Create new shape matcher
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Correlation of `foreground` with one template rasterized at
    /// `width × height`
    pub fn score(&self, foreground: &Mask, template: &ShapeTemplate, width: u32, height: u32) -> Result<f64> {
        let template_mask = generate_mask(template, width, height)?;
        foreground.agreement(&template_mask)
    }

    /// Scores for all templates, in registration order
    pub fn scores(&self, foreground: &Mask, templates: &TemplateSet, width: u32, height: u32) -> Result<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            templates
                .as_slice()
                .par_iter()
                .map(|template| self.score(foreground, template, width, height))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            templates
                .iter()
                .map(|template| self.score(foreground, template, width, height))
                .collect()
        }
    }

    /// Best template if its score is strictly above the threshold
    pub fn match_shape(
        &self,
        foreground: &Mask,
        templates: &TemplateSet,
        width: u32,
        height: u32,
    ) -> Result<Option<ShapeMatch>> {
        let scores = self.scores(foreground, templates, width, height)?;
        Ok(self.accept(&scores))
    }

    /// Apply the decision policy to precomputed scores
    pub fn accept(&self, scores: &[f64]) -> Option<ShapeMatch> {
        ShapeMatch::best(scores).filter(|m| m.score > self.threshold)
    }
}

impl Default for ShapeMatcher {
    fn default() -> Self {
        Self::new(SHAPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CvError;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn square_only() -> TemplateSet {
        TemplateSet::new(vec![TemplateSet::builtin().as_slice()[0].clone()]).unwrap()
    }

    #[test]
    fn test_template_mask_scores_one() -> Result<()> {
        let matcher = ShapeMatcher::default();
        let templates = TemplateSet::builtin();
        for (index, template) in templates.iter().enumerate() {
            let foreground = generate_mask(template, 60, 60)?;
            let scores = matcher.scores(&foreground, &templates, 60, 60)?;
            assert_eq!(scores[index], 1.0);
        }
        Ok(())
    }

    #[test]
    fn test_inverse_scores_zero() -> Result<()> {
        let matcher = ShapeMatcher::default();
        let templates = TemplateSet::builtin();
        let rectangle = &templates.as_slice()[1];
        let foreground = generate_mask(rectangle, 50, 50)?.inverted();
        assert_eq!(matcher.score(&foreground, rectangle, 50, 50)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_threshold_boundary() -> Result<()> {
        let matcher = ShapeMatcher::default();
        let templates = square_only();

        // 340 of 400 cells set: exactly 0.85 against the full square
        let at_threshold = Mask::from_fn(20, 20, |x, y| y * 20 + x < 340);
        assert_eq!(matcher.scores(&at_threshold, &templates, 20, 20)?, vec![0.85]);
        assert_eq!(matcher.match_shape(&at_threshold, &templates, 20, 20)?, None);

        let above = Mask::from_fn(20, 20, |x, y| y * 20 + x < 341);
        let matched = matcher.match_shape(&above, &templates, 20, 20)?.unwrap();
        assert_eq!(matched.index, 0);
        assert!(matched.score > SHAPE_THRESHOLD);
        Ok(())
    }

    #[test]
    fn test_ties_pick_first_registered() -> Result<()> {
        let square = TemplateSet::builtin().as_slice()[0].clone();
        let grid = square.grid();
        let twins = TemplateSet::new(vec![
            square,
            ShapeTemplate::new("also-square", grid)?,
        ])?;

        let foreground = Mask::from_fn(30, 30, |_, _| true);
        let matched = ShapeMatcher::default()
            .match_shape(&foreground, &twins, 30, 30)?
            .unwrap();
        assert_eq!(matched, ShapeMatch { index: 0, score: 1.0 });
        Ok(())
    }

    #[test]
    fn test_deterministic_on_random_masks() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let matcher = ShapeMatcher::default();
        let templates = TemplateSet::builtin();

        for _ in 0..5 {
            let size = rng.gen_range(5..80);
            let density = rng.gen_range(0.1..0.9);
            let foreground = Mask::from_fn(size, size, |_, _| rng.gen_bool(density));
            let first = matcher.scores(&foreground, &templates, size, size)?;
            let second = matcher.scores(&foreground, &templates, size, size)?;
            assert_eq!(first, second);
            assert_eq!(
                matcher.match_shape(&foreground, &templates, size, size)?,
                matcher.accept(&second)
            );
        }
        Ok(())
    }

    #[test]
    fn test_size_mismatch_fails_fast() {
        let foreground = Mask::new(10, 10);
        let err = ShapeMatcher::default()
            .scores(&foreground, &TemplateSet::builtin(), 10, 12)
            .unwrap_err();
        assert!(matches!(err, CvError::DimensionMismatch { .. }));
    }
}
