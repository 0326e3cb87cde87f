//! Display sinks

use anyhow::Context;
use image::RgbImage;
use shapecam_cv::utils::{ImageCanvas, ImageUtils};
use shapecam_cv::{Classification, FrameAnnotator};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Presents annotated frames and reports the key pressed meanwhile
pub trait DisplaySink {
    fn present(
        &mut self,
        frame: RgbImage,
        classification: &Classification,
        annotator: &FrameAnnotator,
    ) -> anyhow::Result<Option<char>>;

    /// Key pressed while no frame was available
    fn poll_key(&mut self) -> anyhow::Result<Option<char>> {
        Ok(None)
    }
}

/// Writes numbered PNG frames and replays a scripted key sequence
pub struct DirectorySink {
    out_dir: PathBuf,
    keys: VecDeque<char>,
    written: usize,
}

impl DirectorySink {
    pub fn create<P: AsRef<Path>>(out_dir: P) -> anyhow::Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;
        Ok(Self {
            out_dir,
            keys: VecDeque::new(),
            written: 0,
        })
    }

    /// One key is returned per presented frame, in order
    pub fn with_keys(mut self, script: &str) -> Self {
        self.keys = script.chars().filter(|c| !c.is_whitespace()).collect();
        self
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl DisplaySink for DirectorySink {
    fn present(
        &mut self,
        frame: RgbImage,
        classification: &Classification,
        annotator: &FrameAnnotator,
    ) -> anyhow::Result<Option<char>> {
        let mut canvas = ImageCanvas::new(frame).with_font(annotator.font().cloned());
        annotator.render(&mut canvas, classification)?;

        self.written += 1;
        let path = self.out_dir.join(format!("frame_{:05}.png", self.written));
        ImageUtils::save_image(canvas.image(), &path)?;
        log::debug!("Wrote {:?} ({})", path, classification.label);

        Ok(self.keys.pop_front())
    }
}
