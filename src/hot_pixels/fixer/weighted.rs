use crate::hot_pixels::defect::{Direction, Rect};
use crate::hot_pixels::image::ImageBuffer;
use crate::hot_pixels::weights::HotPixelsWeights;

/// Below this magnitude a weighted sum counts as zero.
const EPS: f64 = 1e-7;

/// Replaces every pixel of `rect` by the weighted sum of the in-bounds
/// samples around it, normalized by the sum of the weights used.
pub(super) fn weight_pixels<I: ImageBuffer + ?Sized>(
    image: &mut I,
    rect: &Rect,
    weights: &HotPixelsWeights,
    direction: Direction,
) {
    let max = image.max_component();
    let x0 = rect.x as i64;
    let y0 = rect.y as i64;

    for y in 0..rect.height as usize {
        for x in 0..rect.width as usize {
            let (px, py) = (x0 + x as i64, y0 + y as i64);
            if !image.is_valid(px, py) {
                continue;
            }

            let mut values = [0.0f64; 3];
            let mut sum_weights = 0.0;

            for (i, &(ox, oy)) in weights.positions().iter().enumerate() {
                let (sx, sy, weight) = match direction {
                    Direction::TwoDim => (x0 + ox as i64, y0 + oy as i64, weights.weight(i, y, x)),
                    Direction::Vertical => (px, y0 + oy as i64, weights.weight(i, y, 0)),
                    Direction::Horizontal => (x0 + oy as i64, py, weights.weight(i, x, 0)),
                };
                if !image.is_valid(sx, sy) {
                    continue;
                }

                let sample = image.get_pixel(sx as usize, sy as usize);
                for (channel, value) in values.iter_mut().enumerate() {
                    *value += weight * sample.channel(channel) as f64;
                }
                sum_weights += weight;
            }

            let mut color = image.get_pixel(px as usize, py as usize);
            for (channel, &value) in values.iter().enumerate() {
                color.set_channel(channel, component(value, sum_weights, max));
            }
            image.set_pixel(px as usize, py as usize, color);
        }
    }
}

/// Normalized channel value. A vanishing weight sum saturates toward the sign
/// of the numerator.
fn component(value: f64, sum_weights: f64, max: u16) -> u16 {
    if value.abs() <= EPS {
        0
    } else if sum_weights.abs() >= EPS {
        (value / sum_weights).round().clamp(0.0, max as f64) as u16
    } else if value >= 0.0 {
        max
    } else {
        0
    }
}
