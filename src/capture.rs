//! Frame sources

use anyhow::{Context, bail};
use image::RgbImage;
use shapecam_cv::utils::ImageUtils;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Produces frames on demand
pub trait FrameSource {
    /// False once the source is exhausted or closed
    fn is_open(&self) -> bool;

    /// Next frame; `Ok(None)` means the read failed and the frame is skipped
    fn next_frame(&mut self) -> anyhow::Result<Option<RgbImage>>;
}

/// Replays still images as a video: one file, or a directory in name order
pub struct ImageSequenceSource {
    pending: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    pub fn open<P: AsRef<Path>>(input: P) -> anyhow::Result<Self> {
        let input = input.as_ref();
        if !input.exists() {
            bail!("Input does not exist: {:?}", input);
        }
        let pending = if input.is_dir() {
            let mut paths = fs::read_dir(input)
                .with_context(|| format!("Failed to read directory: {:?}", input))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()?;
            paths.retain(|p| is_supported(p));
            paths.sort();
            paths.into()
        } else {
            VecDeque::from([input.to_path_buf()])
        };

        log::info!("Replaying {} frame(s) from {:?}", pending.len(), input);
        Ok(Self { pending })
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn is_open(&self) -> bool {
        !self.pending.is_empty()
    }

    fn next_frame(&mut self) -> anyhow::Result<Option<RgbImage>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        match ImageUtils::load_color(&path) {
            Ok(frame) => Ok(Some(frame)),
            Err(e) => {
                log::warn!("Skipping unreadable frame: {:#}", e);
                Ok(None)
            }
        }
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
