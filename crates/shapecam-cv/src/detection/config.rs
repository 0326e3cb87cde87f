//! Classifier configuration

use crate::color::COLOR_THRESHOLD;
use crate::mask::foreground::foreground_band;
use crate::template::SHAPE_THRESHOLD;
use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};
use shapecam_core::{ColorPalette, HsvRange, Rgb, TemplateSet};
use std::path::{Path, PathBuf};

pub const DEFAULT_BORDER_WIDTH: u32 = 2;
pub const DEFAULT_FONT_SCALE: f64 = 0.7;
pub const DEFAULT_COLOR: Rgb = (0, 0, 0);
pub const FALLBACK_LABEL: &str = "idk";

/// Main classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub shape_threshold: f64,
    pub color_threshold: f64,
    pub foreground_band: HsvRange,
    pub templates: TemplateSet,
    pub palette: ColorPalette,
    pub render: RenderConfig,
}

/// How results are drawn onto the frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub border_width: u32,
    pub font_scale: f64,
    /// Color used when no band passes the threshold
    pub default_color: Rgb,
    /// Label used when no shape is recognized
    pub fallback_label: String,
    /// TTF/OTF font for labels on in-memory frames, replacing the built-in one
    pub font_path: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            shape_threshold: SHAPE_THRESHOLD,
            color_threshold: COLOR_THRESHOLD,
            foreground_band: foreground_band(),
            templates: TemplateSet::builtin(),
            palette: ColorPalette::builtin(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            font_scale: DEFAULT_FONT_SCALE,
            default_color: DEFAULT_COLOR,
            fallback_label: FALLBACK_LABEL.to_string(),
            font_path: None,
        }
    }
}

impl ClassifierConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric settings; templates and bands validate themselves
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.shape_threshold),
            "shape_threshold must be within 0..=1, got {}",
            self.shape_threshold
        );
        ensure!(
            (0.0..=1.0).contains(&self.color_threshold),
            "color_threshold must be within 0..=1, got {}",
            self.color_threshold
        );
        ensure!(self.render.border_width > 0, "border_width must be positive");
        ensure!(self.render.font_scale > 0.0, "font_scale must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.shape_threshold, 0.85);
        assert_eq!(config.color_threshold, 0.85);
        assert_eq!(config.render.border_width, 2);
        assert_eq!(config.render.fallback_label, "idk");
        assert_eq!(config.templates.len(), 3);
        assert_eq!(config.palette.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("classifier.json");
        std::fs::write(
            &path,
            r#"{
                "shape_threshold": 0.9,
                "templates": [{"name": "dot", "grid": [[1]]}],
                "render": {"fallback_label": "?"}
            }"#,
        )?;

        let config = ClassifierConfig::load(&path)?;
        assert_eq!(config.shape_threshold, 0.9);
        assert_eq!(config.color_threshold, 0.85);
        assert_eq!(config.templates.names(), vec!["dot"]);
        assert_eq!(config.render.fallback_label, "?");
        assert_eq!(config.render.border_width, 2);
        assert_eq!(config.palette, ColorPalette::builtin());
        Ok(())
    }

    #[test]
    fn test_malformed_template_fails_at_load() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"templates": [{"name": "ragged", "grid": [[1, 1], [1]]}]}"#)?;
        assert!(ClassifierConfig::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = ClassifierConfig {
            color_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
