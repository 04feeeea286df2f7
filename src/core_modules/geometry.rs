// THEORY:
// Geometric preprocessors run upstream of feature extraction. The capture
// rig frames the hand inside a known fixed window, so cropping is a plain
// sub-rectangle copy with pixel bounds declared up front, and rotation
// exists only to undo the camera's 90-degree mounting. Both operations
// produce fresh frames and never alias their input.
//
// An undersized source frame is rejected with a SizeMismatch error rather
// than silently truncated: a truncated frame would change the feature
// length and corrupt every row of the exported table after it.

use crate::core_modules::frame::Frame;
use crate::error::{PipelineError, Result};

/// A fixed crop window, bounds inclusive-exclusive in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    /// First row of the window.
    pub top: u32,
    /// One past the last row of the window.
    pub bottom: u32,
    /// First column of the window.
    pub left: u32,
    /// One past the last column of the window.
    pub right: u32,
}

impl Default for CropWindow {
    /// The capture rig's hand window: rows 75..275, columns 125..425,
    /// yielding a 200x300 frame.
    fn default() -> Self {
        Self {
            top: 75,
            bottom: 275,
            left: 125,
            right: 425,
        }
    }
}

impl CropWindow {
    /// Height of the cropped output in pixels.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Width of the cropped output in pixels.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Copies the window out of `frame` with pixel values unchanged.
    /// Fails with `SizeMismatch` when the frame is smaller than the window.
    pub fn crop(&self, frame: &Frame) -> Result<Frame> {
        if frame.height < self.bottom || frame.width < self.right {
            return Err(PipelineError::SizeMismatch {
                width: frame.width,
                height: frame.height,
                required_width: self.right,
                required_height: self.bottom,
            });
        }

        let mut data = Vec::with_capacity((self.width() * self.height()) as usize * 3);
        for row in self.top..self.bottom {
            for col in self.left..self.right {
                data.extend_from_slice(&frame.pixel(row, col));
            }
        }
        Frame::new(self.width(), self.height(), data)
    }
}

/// Returns a new frame equal to the input rotated 90 degrees clockwise.
/// The output never aliases the input buffer.
pub fn rotate_cw(frame: &Frame) -> Frame {
    let out_width = frame.height;
    let out_height = frame.width;

    let mut data = Vec::with_capacity(frame.pixel_count() * 3);
    for row in 0..out_height {
        for col in 0..out_width {
            // Destination (row, col) comes from source (height - 1 - col, row).
            data.extend_from_slice(&frame.pixel(frame.height - 1 - col, row));
        }
    }

    Frame::new(out_width, out_height, data)
        .expect("rotation preserves pixel count and finiteness")
}
