//! Template loading from bitmap files

use anyhow::Context;
use image::GrayImage;
use shapecam_core::ShapeTemplate;
use std::fs;
use std::path::{Path, PathBuf};

/// Pixels at or above this grey level become template cells set to 1
const INK_LEVEL: u8 = 128;

/// Loads hand-drawn templates from directories of small bitmaps.
///
/// Every supported image becomes one template named after its file stem.
/// Files are read in name order so registration order is stable.
pub struct TemplateLoader {
    template_dirs: Vec<PathBuf>,
    supported_extensions: Vec<String>,
}

impl TemplateLoader {
    /// Create new template loader
    pub fn new() -> Self {
        Self {
            template_dirs: Vec::new(),
            supported_extensions: vec![
                "png".to_string(),
                "bmp".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
            ],
        }
    }

    /// Add template directory
    pub fn add_template_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.template_dirs.push(dir.as_ref().to_path_buf());
        self
    }

    /// Add supported extension
    pub fn add_extension(mut self, ext: String) -> Self {
        self.supported_extensions.push(ext.to_lowercase());
        self
    }

    /// Load one bitmap as a template
    pub fn load_template<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<ShapeTemplate> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .with_context(|| format!("Template path has no file name: {:?}", path))?;

        let image = image::open(path)
            .with_context(|| format!("Failed to open template: {:?}", path))?
            .to_luma8();

        Self::template_from_image(name, &image)
            .with_context(|| format!("Invalid template bitmap: {:?}", path))
    }

    /// Load all templates from directories
    pub fn load_all_templates(&self) -> anyhow::Result<Vec<ShapeTemplate>> {
        let mut templates = Vec::new();

        for dir in &self.template_dirs {
            if !dir.exists() {
                log::warn!("Template directory {:?} does not exist, skipping", dir);
                continue;
            }

            let mut paths = fs::read_dir(dir)
                .with_context(|| format!("Failed to read directory: {:?}", dir))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()?;
            paths.sort();

            for path in paths.into_iter().filter(|p| self.is_supported(p)) {
                let template = self.load_template(&path)?;
                log::info!(
                    "Loaded template '{}' ({}x{}) from {:?}",
                    template.name(),
                    template.cols(),
                    template.rows(),
                    path
                );
                templates.push(template);
            }
        }

        Ok(templates)
    }

    /// Threshold a grey bitmap into a template
    pub fn template_from_image(name: String, image: &GrayImage) -> anyhow::Result<ShapeTemplate> {
        let grid: Vec<Vec<u8>> = image
            .rows()
            .map(|row| row.map(|p| u8::from(p[0] >= INK_LEVEL)).collect())
            .collect();
        Ok(ShapeTemplate::new(name, grid)?)
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.supported_extensions.contains(&ext))
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new()
    }
}
