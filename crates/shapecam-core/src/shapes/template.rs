use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Serialized form of a template, validated on conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTemplate {
    name: String,
    grid: Vec<Vec<u8>>,
}

/// A hand-authored binary shape silhouette.
///
/// The grid is stored row-major and is guaranteed rectangular, non-empty and
/// made only of 0 and 1 cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplate", into = "RawTemplate")]
pub struct ShapeTemplate {
    name: String,
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl ShapeTemplate {
    /// Build a template from rows of cells
    pub fn new(name: impl Into<String>, grid: Vec<Vec<u8>>) -> Result<Self, CoreError> {
        let name = name.into();
        let cols = grid.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(CoreError::EmptyTemplate { name });
        }

        let mut cells = Vec::with_capacity(grid.len() * cols);
        for (row, line) in grid.iter().enumerate() {
            if line.len() != cols {
                return Err(CoreError::RaggedTemplate {
                    name,
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &value) in line.iter().enumerate() {
                if value > 1 {
                    return Err(CoreError::InvalidCell { name, row, col, value });
                }
                cells.push(value);
            }
        }

        Ok(Self {
            name,
            rows: grid.len(),
            cols,
            cells,
        })
    }

    /// Build a template from borrowed rows
    pub fn from_rows<R: AsRef<[u8]>>(name: impl Into<String>, rows: &[R]) -> Result<Self, CoreError> {
        Self::new(name, rows.iter().map(|r| r.as_ref().to_vec()).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value at (row, col); panics when out of range
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.rows && col < self.cols, "template cell out of range");
        self.cells[row * self.cols + col]
    }

    /// Row-major cells
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Grid as nested rows
    pub fn grid(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(<[u8]>::to_vec).collect()
    }

    /// Fraction of cells set to 1
    pub fn fill_ratio(&self) -> f64 {
        let ones = self.cells.iter().filter(|&&c| c == 1).count();
        ones as f64 / self.cells.len() as f64
    }
}

impl TryFrom<RawTemplate> for ShapeTemplate {
    type Error = CoreError;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.grid)
    }
}

impl From<ShapeTemplate> for RawTemplate {
    fn from(template: ShapeTemplate) -> Self {
        let grid = template.grid();
        Self {
            name: template.name,
            grid,
        }
    }
}
