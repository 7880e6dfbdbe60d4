use crate::hot_pixels::defect::Rect;
use crate::hot_pixels::image::ImageBuffer;

/// Fills `rect` with the mean color of the pixels directly above, below, left
/// and right of it. Returns `false` when no bordering pixel is inside the image.
pub(super) fn average_pixels<I: ImageBuffer + ?Sized>(image: &mut I, rect: &Rect) -> bool {
    let x0 = rect.x as i64;
    let y0 = rect.y as i64;
    let x1 = rect.right();
    let y1 = rect.bottom();

    let mut sum = [0.0f64; 3];
    let mut count = 0u32;
    {
        let mut add = |x: i64, y: i64| {
            if image.is_valid(x, y) {
                let color = image.get_pixel(x as usize, y as usize);
                for (channel, total) in sum.iter_mut().enumerate() {
                    *total += color.channel(channel) as f64;
                }
                count += 1;
            }
        };

        for x in x0..x1 {
            add(x, y0 - 1);
            add(x, y1);
        }
        for y in y0..y1 {
            add(x0 - 1, y);
            add(x1, y);
        }
    }

    if count == 0 {
        return false;
    }

    let max = image.max_component() as f64;
    let mean = sum.map(|total| (total / count as f64).round().clamp(0.0, max) as u16);

    for y in y0..y1 {
        for x in x0..x1 {
            if !image.is_valid(x, y) {
                continue;
            }
            let mut color = image.get_pixel(x as usize, y as usize);
            for (channel, &value) in mean.iter().enumerate() {
                color.set_channel(channel, value);
            }
            image.set_pixel(x as usize, y as usize, color);
        }
    }
    true
}
