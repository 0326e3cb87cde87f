//! Template matching module

pub mod loader;
pub mod matcher;

pub use loader::TemplateLoader;
pub use matcher::ShapeMatcher;

use serde::{Deserialize, Serialize};

/// Minimum correlation score for a shape to be recognized (exclusive)
pub const SHAPE_THRESHOLD: f64 = 0.85;

/// Best template and its correlation score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeMatch {
    pub index: usize,
    pub score: f64,
}

impl ShapeMatch {
    /// Highest score, first occurrence on ties
    pub fn best(scores: &[f64]) -> Option<ShapeMatch> {
        let mut best: Option<ShapeMatch> = None;
        for (index, &score) in scores.iter().enumerate() {
            if best.is_none_or(|b| score > b.score) {
                best = Some(ShapeMatch { index, score });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_prefers_first_on_ties() {
        assert_eq!(
            ShapeMatch::best(&[0.2, 0.9, 0.9, 0.1]),
            Some(ShapeMatch { index: 1, score: 0.9 })
        );
        assert_eq!(ShapeMatch::best(&[]), None);
    }
}
