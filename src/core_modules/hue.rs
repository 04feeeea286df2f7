// THEORY:
// The hue-distance map is the sensory input of the segmentation heuristic.
// The background of a capture rig has one dominant hue; a hand does not.
// Measuring, per pixel, how far the hue sits from a reference value turns
// "is this background?" into a simple one-dimensional threshold problem.
//
// Key architectural principles:
// 1.  **Hue Only**: Saturation and value are deliberately ignored. The
//     heuristic assumes lighting mostly shifts brightness, not hue, so the
//     hue channel is the most stable discriminator available.
// 2.  **Stateless Utility**: `hue_distance_map` is a pure function of one
//     frame. It has no memory and never mutates its input.
// 3.  **Summary Statistics Downstream**: The map exposes its arithmetic
//     mean so the background remover can derive a per-image automatic
//     threshold instead of relying on a fixed global cut.

use crate::core_modules::frame::Frame;

/// A per-pixel map of |hue - reference_hue|, same spatial shape as the
/// frame it was computed from. Values lie in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    /// The width of the map in pixels.
    pub width: u32,
    /// The height of the map in pixels.
    pub height: u32,
    /// Row-major distance values.
    pub data: Vec<f64>,
}

impl DistanceMap {
    /// The arithmetic mean of all distance values. This is the automatic
    /// segmentation cut used when no explicit threshold is supplied.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}

/// The hue component of a single RGB pixel, in [0, 1).
/// Achromatic pixels (zero chroma) report a hue of 0.
pub fn pixel_hue(rgb: [f64; 3]) -> f64 {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0.0 {
        return 0.0;
    }

    let hue = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    // Scale from sextants to [0, 1).
    hue / 6.0
}

/// Computes the per-pixel absolute distance between the frame's hue channel
/// and `reference_hue`.
pub fn hue_distance_map(frame: &Frame, reference_hue: f64) -> DistanceMap {
    let mut data = Vec::with_capacity(frame.pixel_count());
    for row in 0..frame.height {
        for col in 0..frame.width {
            let hue = pixel_hue(frame.pixel(row, col));
            data.push((hue - reference_hue).abs());
        }
    }
    DistanceMap {
        width: frame.width,
        height: frame.height,
        data,
    }
}
