// THEORY:
// The `pipeline` module is the top-level API for turning one image into one
// feature vector. It composes the leaf stages in a fixed order — optional
// rotation, optional crop, background removal, grayscale flattening — behind
// a single `extract` call, so callers never wire stages together themselves.
//
// The whole pipeline is a pure function of the frame and the configuration:
// no randomness, no hidden state, no side effects. The same frame and the
// same `PipelineConfig` always yield a bit-identical feature vector, which
// is what makes regenerated training datasets comparable across runs.

use crate::core_modules::background::{AUTO_THRESHOLD, remove_background};
use crate::core_modules::frame::Frame;
use crate::core_modules::geometry::{CropWindow, rotate_cw};
use crate::core_modules::grayscale::gray_features;
use crate::error::Result;

/// The reference hue of the expected capture-rig background.
pub const DEFAULT_BACKGROUND_HUE: f64 = 0.36;

/// Configuration for the feature extraction pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Reference hue of the background, in [0, 1).
    pub background_hue: f64,
    /// Segmentation threshold; 0.0 selects the per-image automatic cut.
    pub threshold: f64,
    /// Fixed crop window applied before segmentation, if any.
    pub crop: Option<CropWindow>,
    /// Rotate the source 90 degrees clockwise before cropping. Used when
    /// the camera is mounted sideways.
    pub rotate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            background_hue: DEFAULT_BACKGROUND_HUE,
            threshold: AUTO_THRESHOLD,
            crop: Some(CropWindow::default()),
            rotate: false,
        }
    }
}

/// Extracts grayscale feature vectors from frames according to one fixed
/// configuration.
pub struct FeaturePipeline {
    config: PipelineConfig,
}

impl FeaturePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The length of every feature vector this pipeline produces for a
    /// source frame of the given size.
    pub fn feature_len(&self, source_width: u32, source_height: u32) -> usize {
        match self.config.crop {
            Some(window) => (window.width() * window.height()) as usize,
            None => (source_width * source_height) as usize,
        }
    }

    /// Runs the full stage sequence on one frame and returns the flattened
    /// grayscale feature vector.
    pub fn extract(&self, frame: &Frame) -> Result<Vec<f64>> {
        let rotated;
        let mut current = if self.config.rotate {
            rotated = rotate_cw(frame);
            &rotated
        } else {
            frame
        };

        let cropped;
        if let Some(window) = self.config.crop {
            cropped = window.crop(current)?;
            current = &cropped;
        }

        let masked = remove_background(current, self.config.background_hue, self.config.threshold);
        Ok(gray_features(&masked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::new();
        for row in 0..height {
            for col in 0..width {
                if (row + col) % 2 == 0 {
                    data.extend_from_slice(&[0.1, 0.9, 0.1]);
                } else {
                    data.extend_from_slice(&[0.9, 0.1, 0.1]);
                }
            }
        }
        Frame::new(width, height, data).unwrap()
    }

    #[test]
    fn output_length_matches_cropped_shape() {
        let config = PipelineConfig {
            crop: Some(CropWindow {
                top: 1,
                bottom: 3,
                left: 0,
                right: 4,
            }),
            ..PipelineConfig::default()
        };
        let pipeline = FeaturePipeline::new(config);
        let features = pipeline.extract(&checker_frame(6, 6)).unwrap();
        assert_eq!(features.len(), 8);
        assert_eq!(pipeline.feature_len(6, 6), 8);
    }

    #[test]
    fn extraction_is_deterministic() {
        let config = PipelineConfig {
            crop: None,
            ..PipelineConfig::default()
        };
        let pipeline = FeaturePipeline::new(config);
        let frame = checker_frame(5, 4);

        let first = pipeline.extract(&frame).unwrap();
        let second = pipeline.extract(&frame).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rotation_runs_before_cropping() {
        // A 4x6 frame only satisfies a 6-column window after rotation.
        let config = PipelineConfig {
            crop: Some(CropWindow {
                top: 0,
                bottom: 4,
                left: 0,
                right: 6,
            }),
            rotate: true,
            ..PipelineConfig::default()
        };
        let pipeline = FeaturePipeline::new(config);
        let features = pipeline.extract(&checker_frame(4, 6)).unwrap();
        assert_eq!(features.len(), 24);
    }
}
