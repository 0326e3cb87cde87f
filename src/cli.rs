//! Command line interface

use crate::capture::ImageSequenceSource;
use crate::config::AppConfig;
use crate::display::DirectorySink;
use crate::session::{Session, SessionStats};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use shapecam_core::{Roi, RoiNavigator};
use shapecam_cv::utils::ImageUtils;
use shapecam_cv::{Classification, FrameAnnotator};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shapecam")]
#[command(about = "Classify the shape and color inside a movable square of a video feed", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive loop over an image or a directory of frames
    Replay {
        /// Image file or directory of frames
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for annotated frames
        #[arg(short, long, default_value = "annotated")]
        out: PathBuf,

        /// Keys fed to the navigator, one per frame (e.g. "ddxs")
        #[arg(short, long, default_value = "")]
        keys: String,
    },

    /// Classify a single image
    Classify {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Region of interest as LEFT,TOP,SIZE
        #[arg(long, value_parser = parse_roi)]
        roi: Option<Roi>,

        /// Write the classification as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Write the region's foreground mask
        #[arg(long, value_name = "FILE")]
        mask: Option<PathBuf>,

        /// Write the annotated image
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Run the interactive loop on a live camera
    #[cfg(feature = "camera")]
    Camera {
        /// V4L device index; the Jetson CSI pipeline is used when omitted
        #[arg(short, long)]
        device: Option<i32>,
    },
}

/// Parse `LEFT,TOP,SIZE`
pub fn parse_roi(s: &str) -> Result<Roi, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [left, top, size] = parts.as_slice() else {
        return Err(format!("expected LEFT,TOP,SIZE, got {:?}", s));
    };
    let parse = |field: &str, value: &str| {
        value
            .parse::<u32>()
            .map_err(|e| format!("invalid {}: {:?} ({})", field, value, e))
    };
    Ok(Roi::new(parse("left", left)?, parse("top", top)?, parse("size", size)?))
}

pub fn replay(
    config: &AppConfig,
    annotator: &FrameAnnotator,
    input: PathBuf,
    out: PathBuf,
    keys: &str,
) -> anyhow::Result<SessionStats> {
    let mut source = ImageSequenceSource::open(&input)?;
    if source.remaining() == 0 {
        bail!("No frames found in {:?}", input);
    }
    let mut sink = DirectorySink::create(&out)?.with_keys(keys);

    let navigator = RoiNavigator::new(config.initial_roi, config.navigation);
    let stats = Session::new(annotator, navigator).run(&mut source, &mut sink)?;
    log::info!("Annotated frames written to {:?}", out);
    Ok(stats)
}

pub fn classify(
    config: &AppConfig,
    annotator: &FrameAnnotator,
    image: PathBuf,
    roi: Option<Roi>,
    json: Option<PathBuf>,
    mask: Option<PathBuf>,
    out: Option<PathBuf>,
) -> anyhow::Result<Classification> {
    let frame = ImageUtils::load_color(&image)?;
    let roi = roi.unwrap_or(config.initial_roi);

    if let Some(path) = mask {
        match annotator.foreground(&frame, &roi)? {
            Some(foreground) => ImageUtils::save_mask(&foreground, &path)?,
            None => log::warn!("roi {:?} is outside the image, no mask written", roi),
        }
    }

    let (annotated, classification) = annotator.annotate(frame, &roi)?;
    match classification.confidence() {
        Some(score) => log::info!("{} ({:.3})", classification.label, score),
        None => log::info!("{}", classification.label),
    }

    if let Some(path) = json {
        let text = serde_json::to_string_pretty(&classification)?;
        std::fs::write(&path, text).with_context(|| format!("Failed to write {:?}", path))?;
    }
    if let Some(path) = out {
        ImageUtils::save_image(&annotated, &path)?;
    }

    Ok(classification)
}
