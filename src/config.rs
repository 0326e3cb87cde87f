//! Application configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shapecam_core::{Roi, StepConfig};
use shapecam_cv::{ClassifierConfig, TemplateLoader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub navigation: StepConfig,
    pub initial_roi: Roi,
    /// Directories of bitmap templates registered after the configured ones
    pub template_dirs: Vec<PathBuf>,
}

impl AppConfig {
    /// Load from JSON, or use defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {:?}", path))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse config: {:?}", path))?
            }
            None => AppConfig::default(),
        };

        if !config.template_dirs.is_empty() {
            let loader = config
                .template_dirs
                .iter()
                .fold(TemplateLoader::new(), |loader, dir| loader.add_template_dir(dir));
            let extra = loader.load_all_templates()?;
            log::info!("Registered {} bitmap templates", extra.len());
            config.classifier.templates.extend(extra);
        }

        config.classifier.validate()?;
        Ok(config)
    }
}
