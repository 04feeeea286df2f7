// THEORY:
// The background remover is the only place the segmentation decision is
// made. It is a deliberately simple, fast heuristic and not a general
// segmentor: the foreground (a hand) is assumed to have a hue far from the
// single dominant background hue, so thresholding the hue-distance map
// separates the two. It fails when foreground and background hues are
// close, or when lighting shifts the hue distribution bimodally.
//
// Key architectural principles:
// 1.  **Per-Image Automatic Cut**: A threshold of 0.0 is a sentinel meaning
//     "auto": the effective threshold becomes the mean of that image's own
//     distance map. The cut adapts to each image's lighting instead of
//     relying on a fixed global constant.
// 2.  **Strict Comparison**: A pixel is background exactly when its distance
//     is strictly below the effective threshold. Classifier training data
//     depends on reproducing this cut bit-for-bit, so the comparison must
//     not be "improved" to <=.
// 3.  **Copy, Never Mutate**: The masked image is a fresh copy of the input
//     with background pixels zeroed across all channels; the source frame
//     is untouched.

use crate::core_modules::frame::Frame;
use crate::core_modules::hue::hue_distance_map;

/// Sentinel threshold value selecting the automatic per-image cut.
pub const AUTO_THRESHOLD: f64 = 0.0;

/// Returns a copy of `frame` with every background pixel set to zero.
///
/// A pixel is background when its hue distance from `reference_hue` is
/// strictly below the effective threshold. With `threshold == 0.0` the
/// effective threshold is the mean of the frame's hue-distance map.
pub fn remove_background(frame: &Frame, reference_hue: f64, threshold: f64) -> Frame {
    let map = hue_distance_map(frame, reference_hue);
    let effective = if threshold == AUTO_THRESHOLD {
        map.mean()
    } else {
        threshold
    };

    let mut masked = frame.clone();
    for row in 0..frame.height {
        for col in 0..frame.width {
            let index = row as usize * frame.width as usize + col as usize;
            if map.data[index] < effective {
                masked.set_pixel(row, col, [0.0, 0.0, 0.0]);
            }
        }
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::hue::hue_distance_map;

    /// 2x2 frame mixing a green-ish background with red foreground pixels.
    fn sample_frame() -> Frame {
        Frame::new(
            2,
            2,
            vec![
                0.0, 1.0, 0.0, // green, hue 1/3
                1.0, 0.0, 0.0, // red, hue 0
                0.1, 0.9, 0.1, // green-ish, hue 1/3
                0.9, 0.1, 0.1, // red-ish, hue 0
            ],
        )
        .unwrap()
    }

    #[test]
    fn explicit_threshold_zeroes_exactly_the_near_pixels() {
        let frame = sample_frame();
        let reference = 1.0 / 3.0;
        let masked = remove_background(&frame, reference, 0.2);
        let map = hue_distance_map(&frame, reference);

        for row in 0..2 {
            for col in 0..2 {
                let index = (row * 2 + col) as usize;
                if map.data[index] < 0.2 {
                    assert_eq!(masked.pixel(row, col), [0.0, 0.0, 0.0]);
                } else {
                    assert_eq!(masked.pixel(row, col), frame.pixel(row, col));
                }
            }
        }
        // Green pixels are near the reference, red pixels far from it.
        assert_eq!(masked.pixel(0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(masked.pixel(0, 1), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn auto_threshold_resolves_to_distance_map_mean() {
        let frame = sample_frame();
        let reference = 1.0 / 3.0;
        let map = hue_distance_map(&frame, reference);
        let mean = map.data.iter().sum::<f64>() / map.data.len() as f64;

        let auto = remove_background(&frame, reference, AUTO_THRESHOLD);
        let explicit = remove_background(&frame, reference, mean);
        assert_eq!(auto, explicit);
    }

    #[test]
    fn source_frame_is_not_mutated() {
        let frame = sample_frame();
        let before = frame.clone();
        let _ = remove_background(&frame, 1.0 / 3.0, AUTO_THRESHOLD);
        assert_eq!(frame, before);
    }
}
