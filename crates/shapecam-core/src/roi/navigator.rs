use super::region::Roi;
use serde::{Deserialize, Serialize};

pub const MOVE_STEP: u32 = 5;
pub const ZOOM_STEP: u32 = 10;

/// Pixel steps applied by one navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    pub move_step: u32,
    pub zoom_step: u32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            move_step: MOVE_STEP,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Logical navigation commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Up,
    Down,
    Left,
    Right,
    /// Grow the ROI
    ZoomIn,
    /// Shrink the ROI
    ZoomOut,
    Exit,
}

impl NavCommand {
    /// Keyboard binding: w/a/s/d move, x grows, z shrinks, e exits
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Self::Up),
            's' => Some(Self::Down),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            'x' => Some(Self::ZoomIn),
            'z' => Some(Self::ZoomOut),
            'e' => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Continue,
    Exit,
}

/// Owns the ROI and applies navigation commands against the frame bounds.
///
/// Moves keep a margin of one step from the frame edges; growing is refused
/// when the larger square would leave the frame; shrinking stops before the
/// size would reach zero.
#[derive(Debug, Clone)]
pub struct RoiNavigator {
    roi: Roi,
    steps: StepConfig,
}

impl RoiNavigator {
    pub fn new(roi: Roi, steps: StepConfig) -> Self {
        Self { roi, steps }
    }

    pub fn roi(&self) -> &Roi {
        &self.roi
    }

    pub fn steps(&self) -> StepConfig {
        self.steps
    }

    /// Apply one command for a `frame_width × frame_height` frame
    pub fn apply(&mut self, command: NavCommand, frame_width: u32, frame_height: u32) -> NavOutcome {
        let step = i64::from(self.steps.move_step);
        let zoom = i64::from(self.steps.zoom_step);
        let left = i64::from(self.roi.left);
        let top = i64::from(self.roi.top);
        let size = i64::from(self.roi.size);
        let width = i64::from(frame_width);
        let height = i64::from(frame_height);

        match command {
            NavCommand::Up => {
                if top > step {
                    self.roi.top -= self.steps.move_step;
                }
            }
            NavCommand::Down => {
                if top < height - size - step {
                    self.roi.top += self.steps.move_step;
                }
            }
            NavCommand::Left => {
                if left > step {
                    self.roi.left -= self.steps.move_step;
                }
            }
            NavCommand::Right => {
                if left < width - size - step {
                    self.roi.left += self.steps.move_step;
                }
            }
            NavCommand::ZoomIn => {
                if left + size + zoom <= width && top + size + zoom <= height {
                    self.roi.size += self.steps.zoom_step;
                }
            }
            NavCommand::ZoomOut => {
                if size > zoom {
                    self.roi.size -= self.steps.zoom_step;
                }
            }
            NavCommand::Exit => return NavOutcome::Exit,
        }

        log::debug!("{:?} -> roi {:?}", command, self.roi);
        NavOutcome::Continue
    }
}

impl Default for RoiNavigator {
    fn default() -> Self {
        Self::new(Roi::default(), StepConfig::default())
    }
}
