use crate::hot_pixels::common::error::Result;
use crate::hot_pixels::image::RgbaImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RgbaImage>;
}
