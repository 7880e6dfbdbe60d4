use crate::hot_pixels::image::types::Rgba;

/// Pixel access used by the black frame parser and the hot pixel fixer.
///
/// `get_pixel` and `set_pixel` may panic outside `[0, width) x [0, height)`;
/// callers check [`ImageBuffer::is_valid`] first.
pub trait ImageBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn sixteen_bit(&self) -> bool;
    fn get_pixel(&self, x: usize, y: usize) -> Rgba;
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba);

    /// Largest value a channel can hold: 255 or 65535.
    fn max_component(&self) -> u16 {
        if self.sixteen_bit() { u16::MAX } else { u8::MAX as u16 }
    }

    fn is_valid(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width() as u64 && (y as u64) < self.height() as u64
    }
}
