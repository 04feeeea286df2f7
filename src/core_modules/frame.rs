// THEORY:
// The `Frame` is the fundamental data container of the pipeline. It is a
// "dumb" owner of pixel data, deliberately free of any processing logic:
// a row-major buffer of RGB triples with every channel normalized to the
// [0.0, 1.0] range, plus the bookkeeping (width, height) needed to index it.
//
// Key architectural principles:
// 1.  **Normalized Floats Everywhere**: All downstream math (hue distance,
//     thresholding, luminance) operates on normalized f64 channels. Decoding
//     from 8-bit PNG data is the only place a conversion happens, so the rest
//     of the pipeline never has to reason about integer ranges.
// 2.  **Validation at the Boundary**: A `Frame` can only be constructed with
//     a buffer that matches its declared shape and contains finite values.
//     Once a `Frame` exists, every module may index it without re-checking.
// 3.  **Value Semantics**: Transformations never mutate a `Frame` in place;
//     they produce fresh frames. This keeps every pipeline stage a pure
//     function and makes the whole batch run trivially deterministic.

use crate::error::{PipelineError, Result};
use std::path::Path;

/// Number of color channels per pixel. The pipeline only handles RGB input.
pub const CHANNELS: usize = 3;

/// A single image held as normalized pixel intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The width of the frame in pixels.
    pub width: u32,
    /// The height of the frame in pixels.
    pub height: u32,
    /// Row-major RGB triples, each channel in [0.0, 1.0].
    data: Vec<f64>,
}

impl Frame {
    /// Builds a frame from an already-normalized buffer, rejecting malformed
    /// input (wrong buffer length or non-finite channel values).
    pub fn new(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(PipelineError::InvalidInput(format!(
                "buffer holds {} values but a {}x{} RGB frame requires {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::InvalidInput(
                "buffer contains non-finite channel values".to_string(),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a frame from raw 8-bit RGB bytes, normalizing each channel.
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let data = bytes.iter().map(|&b| b as f64 / 255.0).collect();
        Self::new(width, height, data)
    }

    /// Decodes an image file into a frame. Any decode failure is a hard
    /// error carrying the offending path; corrupt files are never skipped.
    pub fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|source| PipelineError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgb = decoded.to_rgb8();
        Self::from_rgb8(rgb.width(), rgb.height(), rgb.as_raw())
    }

    /// The RGB triple at (row, col). Callers must stay in bounds; the shape
    /// invariant is established at construction.
    pub fn pixel(&self, row: u32, col: u32) -> [f64; CHANNELS] {
        let base = self.index(row, col);
        [self.data[base], self.data[base + 1], self.data[base + 2]]
    }

    /// Overwrites the RGB triple at (row, col).
    pub fn set_pixel(&mut self, row: u32, col: u32, rgb: [f64; CHANNELS]) {
        let base = self.index(row, col);
        self.data[base..base + CHANNELS].copy_from_slice(&rgb);
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Read-only view of the underlying normalized buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    fn index(&self, row: u32, col: u32) -> usize {
        (row as usize * self.width as usize + col as usize) * CHANNELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn rejects_wrong_buffer_length() {
        let result = Frame::new(2, 2, vec![0.0; 11]);
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut data = vec![0.5; 12];
        data[7] = f64::NAN;
        let result = Frame::new(2, 2, data);
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }

    #[test]
    fn normalizes_rgb8_channels() {
        let frame = Frame::from_rgb8(2, 1, &[255, 0, 51, 0, 255, 102]).unwrap();
        assert_eq!(frame.pixel(0, 0), [1.0, 0.0, 51.0 / 255.0]);
        assert_eq!(frame.pixel(0, 1), [0.0, 1.0, 102.0 / 255.0]);
    }

    #[test]
    fn pixel_indexing_is_row_major() {
        let data: Vec<f64> = (0..24).map(|v| v as f64 / 24.0).collect();
        let frame = Frame::new(4, 2, data).unwrap();
        // Pixel (1, 2) starts at (1 * 4 + 2) * 3 = 18.
        assert_eq!(
            frame.pixel(1, 2),
            [18.0 / 24.0, 19.0 / 24.0, 20.0 / 24.0]
        );
    }
}
