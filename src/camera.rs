//! Live camera capture and highgui display

use crate::capture::FrameSource;
use crate::config::AppConfig;
use crate::display::DisplaySink;
use crate::session::Session;
use anyhow::{Context, bail};
use image::RgbImage;
use opencv::{
    core::{Mat, Point, Rect, Scalar},
    highgui, imgproc,
    prelude::*,
    videoio,
};
use opencv_match::prelude::*;
use shapecam_core::{Rgb, RoiNavigator};
use shapecam_cv::traits::Canvas;
use shapecam_cv::{BBox, Classification, CvError, FrameAnnotator};

const WINDOW_NAME: &str = "frame";

/// CSI camera settings for the Jetson `nvarguscamerasrc` pipeline
#[derive(Debug, Clone, Copy)]
pub struct CsiSettings {
    pub capture_width: u32,
    pub capture_height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub framerate: u32,
    pub flip_method: u32,
}

impl Default for CsiSettings {
    fn default() -> Self {
        Self {
            capture_width: 1280,
            capture_height: 720,
            display_width: 1280,
            display_height: 720,
            framerate: 30,
            flip_method: 4,
        }
    }
}

pub fn gstreamer_pipeline(s: &CsiSettings) -> String {
    format!(
        "nvarguscamerasrc ! video/x-raw(memory:NVMM), width=(int){}, height=(int){}, \
         format=(string)NV12, framerate=(fraction){}/1 ! nvvidconv flip-method={} ! \
         video/x-raw, width=(int){}, height=(int){}, format=(string)BGRx ! \
         videoconvert ! video/x-raw, format=(string)BGR ! appsink max-buffers=1 drop=true",
        s.capture_width,
        s.capture_height,
        s.framerate,
        s.flip_method,
        s.display_width,
        s.display_height,
    )
}

pub struct CameraSource {
    capture: videoio::VideoCapture,
    frame: Mat,
}

impl CameraSource {
    pub fn open(device: Option<i32>) -> anyhow::Result<Self> {
        let capture = match device {
            Some(index) => videoio::VideoCapture::new(index, videoio::CAP_ANY)
                .with_context(|| format!("Failed to open camera {}", index))?,
            None => {
                let pipeline = gstreamer_pipeline(&CsiSettings::default());
                log::debug!("{}", pipeline);
                videoio::VideoCapture::from_file(&pipeline, videoio::CAP_GSTREAMER)
                    .context("Failed to open GStreamer pipeline")?
            }
        };
        if !capture.is_opened()? {
            bail!("Camera could not be opened");
        }
        Ok(Self {
            capture,
            frame: Mat::default(),
        })
    }
}

impl FrameSource for CameraSource {
    fn is_open(&self) -> bool {
        self.capture.is_opened().unwrap_or(false)
    }

    fn next_frame(&mut self) -> anyhow::Result<Option<RgbImage>> {
        if !self.capture.read(&mut self.frame)? || self.frame.empty() {
            log::warn!("Failed to read frame");
            return Ok(None);
        }
        let frame: RgbImage = self
            .frame
            .try_into_cv()
            .context("Failed to convert OpenCV Mat to RGB image")?;
        Ok(Some(frame))
    }
}

/// OpenCV `Mat` drawing surface
pub struct MatCanvas<'a> {
    mat: &'a mut Mat,
}

impl<'a> MatCanvas<'a> {
    pub fn new(mat: &'a mut Mat) -> Self {
        Self { mat }
    }
}

fn bgr_scalar(color: Rgb) -> Scalar {
    let (r, g, b) = color;
    Scalar::new(f64::from(b), f64::from(g), f64::from(r), 0.0)
}

fn mat_size(mat: &Mat) -> (u32, u32) {
    (mat.cols().max(0) as u32, mat.rows().max(0) as u32)
}

fn render_error(e: opencv::Error) -> CvError {
    CvError::Render(e.to_string())
}

impl Canvas for MatCanvas<'_> {
    fn draw_rectangle(&mut self, bbox: &BBox, color: Rgb, thickness: u32) -> shapecam_cv::Result<()> {
        let (width, height) = mat_size(self.mat);
        let Some(visible) = bbox.clip(width, height, thickness) else {
            return Ok(());
        };
        let rect = Rect::new(visible.x, visible.y, visible.width as i32, visible.height as i32);
        // opencv centres the line on the rect edge; shift it inside the box
        let shrink = (thickness / 2) as i32;
        let rect = Rect::new(
            rect.x + shrink,
            rect.y + shrink,
            (rect.width - 2 * shrink).max(1),
            (rect.height - 2 * shrink).max(1),
        );
        imgproc::rectangle(self.mat, rect, bgr_scalar(color), thickness as i32, imgproc::LINE_8, 0)
            .map_err(render_error)
    }

    fn draw_label(
        &mut self,
        text: &str,
        origin: (i32, i32),
        color: Rgb,
        font_scale: f64,
        thickness: u32,
    ) -> shapecam_cv::Result<()> {
        let (width, height) = mat_size(self.mat);
        if i64::from(origin.0) >= i64::from(width) || i64::from(origin.1) < 0 || height == 0 {
            return Ok(());
        }
        imgproc::put_text(
            self.mat,
            text,
            Point::new(origin.0, origin.1),
            imgproc::FONT_HERSHEY_SIMPLEX,
            font_scale,
            bgr_scalar(color),
            thickness as i32,
            imgproc::LINE_AA,
            false,
        )
        .map_err(render_error)
    }
}

/// highgui window; each frame polls the keyboard for one millisecond
pub struct HighguiWindow {
    name: String,
}

impl HighguiWindow {
    pub fn open(name: &str) -> anyhow::Result<Self> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self { name: name.to_string() })
    }
}

impl DisplaySink for HighguiWindow {
    fn present(
        &mut self,
        frame: RgbImage,
        classification: &Classification,
        annotator: &FrameAnnotator,
    ) -> anyhow::Result<Option<char>> {
        let mut mat: Mat = frame
            .try_into_cv()
            .context("Failed to convert RGB image to OpenCV Mat")?;
        annotator.render(&mut MatCanvas::new(&mut mat), classification)?;
        highgui::imshow(&self.name, &mat)?;
        self.poll_key()
    }

    fn poll_key(&mut self) -> anyhow::Result<Option<char>> {
        let key = highgui::wait_key(1)? & 0xFF;
        Ok(match key {
            0xFF => None,
            k => u8::try_from(k).ok().map(char::from),
        })
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close windows: {}", e);
        }
    }
}

pub fn run(config: &AppConfig, annotator: &FrameAnnotator, device: Option<i32>) -> anyhow::Result<()> {
    let mut source = CameraSource::open(device)?;
    let mut window = HighguiWindow::open(WINDOW_NAME)?;

    let navigator = RoiNavigator::new(config.initial_roi, config.navigation);
    Session::new(annotator, navigator).run(&mut source, &mut window)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline() {
        let pipeline = gstreamer_pipeline(&CsiSettings::default());
        assert!(pipeline.starts_with("nvarguscamerasrc"));
        assert!(pipeline.contains("width=(int)1280, height=(int)720"));
        assert!(pipeline.contains("framerate=(fraction)30/1"));
        assert!(pipeline.contains("flip-method=4"));
        // only the newest frame is kept while a slow frame is classified
        assert!(pipeline.ends_with("appsink max-buffers=1 drop=true"));
    }

    #[test]
    fn test_oversized_box_is_clipped_to_mat() -> anyhow::Result<()> {
        let mut mat = Mat::new_rows_cols_with_default(24, 32, opencv::core::CV_8UC3, Scalar::all(0.0))?;
        let bbox = BBox::from_roi(&shapecam_core::Roi::new(20, 0, u32::MAX - 99));
        MatCanvas::new(&mut mat).draw_rectangle(&bbox, (0, 0, 255), 2)?;

        let left = mat.at_2d::<opencv::core::Vec3b>(10, 21)?;
        assert_eq!(left.0, [255, 0, 0]);
        let outside = mat.at_2d::<opencv::core::Vec3b>(10, 5)?;
        assert_eq!(outside.0, [0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_bgr_order() {
        assert_eq!(bgr_scalar((255, 0, 10)), Scalar::new(10.0, 0.0, 255.0, 0.0));
    }
}
