// Luminance-weighted grayscale conversion and row-major flattening.
// The weights match the standard CRT-luminance combination the training
// data was originally generated with; changing them would silently change
// every exported feature vector.

use crate::core_modules::frame::Frame;

const LUMA_RED: f64 = 0.2125;
const LUMA_GREEN: f64 = 0.7154;
const LUMA_BLUE: f64 = 0.0721;

/// The luminance of a single RGB pixel, in [0, 1].
pub fn luminance(rgb: [f64; 3]) -> f64 {
    LUMA_RED * rgb[0] + LUMA_GREEN * rgb[1] + LUMA_BLUE * rgb[2]
}

/// Converts a frame to grayscale and flattens it in row-major order into a
/// vector of length height * width.
pub fn gray_features(frame: &Frame) -> Vec<f64> {
    let mut features = Vec::with_capacity(frame.pixel_count());
    for row in 0..frame.height {
        for col in 0..frame.width {
            features.push(luminance(frame.pixel(row, col)));
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_equals_height_times_width() {
        let frame = Frame::new(3, 2, vec![0.5; 18]).unwrap();
        assert_eq!(gray_features(&frame).len(), 6);
    }

    #[test]
    fn weights_are_luminance_weighted() {
        let frame = Frame::new(
            3,
            1,
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        )
        .unwrap();
        let features = gray_features(&frame);
        assert_eq!(features, vec![0.2125, 0.7154, 0.0721]);
    }

    #[test]
    fn flattening_is_row_major() {
        // Row 0 black, row 1 white.
        let frame = Frame::new(2, 2, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        let features = gray_features(&frame);
        assert_eq!(features[..2], [0.0, 0.0]);
        assert!(features[2..].iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }
}
