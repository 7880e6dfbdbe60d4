use tracing::debug;

use crate::hot_pixels::defect::HotPixelProps;

/// Merges touching regions until no two remaining regions touch.
///
/// Merged regions keep the position of the earliest region in the list.
pub fn consolidate(hot_pixels: &mut Vec<HotPixelProps>) {
    let before = hot_pixels.len();
    let mut merged = true;

    while merged {
        merged = false;
        let mut i = 0;
        while i < hot_pixels.len() {
            let mut j = i + 1;
            while j < hot_pixels.len() {
                if hot_pixels[i].touches(&hot_pixels[j]) {
                    let other = hot_pixels.remove(j);
                    hot_pixels[i].merge(&other);
                    merged = true;
                    // The grown region may now touch entries already passed over.
                    j = i + 1;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }

    debug!("Consolidated {} candidates into {} regions", before, hot_pixels.len());
}
