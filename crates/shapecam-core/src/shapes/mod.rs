//! Shape templates and the ordered set the matcher walks

pub mod template;

pub use template::ShapeTemplate;

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const SQUARE_GRID: [[u8; 4]; 4] = [
    [1, 1, 1, 1],
    [1, 1, 1, 1],
    [1, 1, 1, 1],
    [1, 1, 1, 1],
];

pub const RECTANGLE_GRID: [[u8; 4]; 4] = [
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
];

pub const TRIANGLE_GRID: [[u8; 7]; 7] = [
    [0, 0, 0, 1, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 0, 0],
    [0, 0, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1],
];

/// Ordered, non-empty list of templates.
///
/// Registration order matters: when two templates score the same, the one
/// registered first wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShapeTemplate>", into = "Vec<ShapeTemplate>")]
pub struct TemplateSet {
    templates: Vec<ShapeTemplate>,
}

impl TemplateSet {
    pub fn new(templates: Vec<ShapeTemplate>) -> Result<Self, CoreError> {
        if templates.is_empty() {
            return Err(CoreError::EmptyTemplateSet);
        }
        Ok(Self { templates })
    }

    /// Square, rectangle and triangle, in that order
    pub fn builtin() -> Self {
        let templates = [
            ShapeTemplate::from_rows("square", &SQUARE_GRID),
            ShapeTemplate::from_rows("rectangle", &RECTANGLE_GRID),
            ShapeTemplate::from_rows("triangle", &TRIANGLE_GRID),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("builtin templates are well formed");

        Self { templates }
    }

    /// Register more templates after the existing ones
    pub fn extend(&mut self, more: impl IntoIterator<Item = ShapeTemplate>) {
        self.templates.extend(more);
    }

    pub fn get(&self, index: usize) -> Option<&ShapeTemplate> {
        self.templates.get(index)
    }

    pub fn as_slice(&self) -> &[ShapeTemplate] {
        &self.templates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShapeTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(ShapeTemplate::name).collect()
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<ShapeTemplate>> for TemplateSet {
    type Error = CoreError;

    fn try_from(templates: Vec<ShapeTemplate>) -> Result<Self, Self::Error> {
        Self::new(templates)
    }
}

impl From<TemplateSet> for Vec<ShapeTemplate> {
    fn from(set: TemplateSet) -> Self {
        set.templates
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a ShapeTemplate;
    type IntoIter = std::slice::Iter<'a, ShapeTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let set = TemplateSet::builtin();
        assert_eq!(set.names(), vec!["square", "rectangle", "triangle"]);
        assert_eq!(set.get(2).map(|t| (t.rows(), t.cols())), Some((7, 7)));
    }

    #[test]
    fn test_builtin_fill_ratios() {
        let set = TemplateSet::builtin();
        let ratios: Vec<f64> = set.iter().map(ShapeTemplate::fill_ratio).collect();
        assert_eq!(ratios[0], 1.0);
        assert_eq!(ratios[1], 0.5);
        assert!((ratios[2] - 25.0 / 49.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(TemplateSet::new(Vec::new()), Err(CoreError::EmptyTemplateSet));
        assert!(serde_json::from_str::<TemplateSet>("[]").is_err());
    }

    #[test]
    fn test_extend_keeps_order() -> Result<(), CoreError> {
        let mut set = TemplateSet::builtin();
        set.extend([ShapeTemplate::from_rows("dot", &[[1u8]])?]);
        assert_eq!(set.len(), 4);
        assert_eq!(set.names().last(), Some(&"dot"));
        Ok(())
    }
}
