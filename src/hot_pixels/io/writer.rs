use std::io::Write;

use crate::hot_pixels::common::error::Result;
use crate::hot_pixels::image::RgbaImage;
use crate::hot_pixels::io::types::OutputConfig;

pub trait ImageWriter {
    fn write_image(&self, image: &RgbaImage, output: &mut dyn Write, config: &OutputConfig) -> Result<()>;
}
