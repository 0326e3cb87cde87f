//! Capture -> classify -> display loop

use crate::capture::FrameSource;
use crate::display::DisplaySink;
use shapecam_core::{NavCommand, NavOutcome, RoiNavigator};
use shapecam_cv::FrameAnnotator;

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: usize,
    pub recognized: usize,
    pub skipped: usize,
}

/// Runs frames through the annotator until the source closes or the user
/// exits. The navigator owns the ROI between frames.
pub struct Session<'a> {
    annotator: &'a FrameAnnotator,
    navigator: RoiNavigator,
}

impl<'a> Session<'a> {
    pub fn new(annotator: &'a FrameAnnotator, navigator: RoiNavigator) -> Self {
        Self { annotator, navigator }
    }

    pub fn navigator(&self) -> &RoiNavigator {
        &self.navigator
    }

    pub fn run<S: FrameSource, D: DisplaySink>(&mut self, source: &mut S, sink: &mut D) -> anyhow::Result<SessionStats> {
        let mut stats = SessionStats::default();
        let mut last_dims: Option<(u32, u32)> = None;

        while source.is_open() {
            let Some(frame) = source.next_frame()? else {
                stats.skipped += 1;
                // keep the keyboard live while reads fail
                if let Some(command) = sink.poll_key()?.and_then(NavCommand::from_key) {
                    let outcome = match last_dims {
                        Some((width, height)) => self.navigator.apply(command, width, height),
                        None if command == NavCommand::Exit => NavOutcome::Exit,
                        None => continue,
                    };
                    if outcome == NavOutcome::Exit {
                        log::info!("bye-bye");
                        break;
                    }
                }
                continue;
            };
            let (width, height) = frame.dimensions();
            last_dims = Some((width, height));

            let classification = self.annotator.classify(&frame, self.navigator.roi())?;
            stats.frames += 1;
            if classification.is_recognized() {
                stats.recognized += 1;
            }

            let key = sink.present(frame, &classification, self.annotator)?;
            if let Some(command) = key.and_then(NavCommand::from_key) {
                if self.navigator.apply(command, width, height) == NavOutcome::Exit {
                    log::info!("bye-bye");
                    break;
                }
            }
        }

        log::info!(
            "Processed {} frames ({} recognized, {} skipped)",
            stats.frames,
            stats.recognized,
            stats.skipped
        );
        Ok(stats)
    }
}
