use std::io::Write;

use tracing::debug;

use crate::hot_pixels::common::error::{HotPixelError, Result};
use crate::hot_pixels::image::RgbaImage;
use crate::hot_pixels::image::types::CHANNELS;
use crate::hot_pixels::io::types::{OutputConfig, TiffCompression};
use crate::hot_pixels::io::writer::ImageWriter;

/// Writes RGB or RGBA TIFF images at the depth of the source image.
pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &RgbaImage, output: &mut dyn Write, config: &OutputConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        let mut buffer = Vec::new();

        {
            let compression = match config.compression {
                TiffCompression::None => tiff::encoder::Compression::Uncompressed,
                TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
                TiffCompression::Deflate => tiff::encoder::Compression::Deflate(
                    tiff::encoder::compression::DeflateLevel::Fast,
                ),
            };

            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| HotPixelError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            let width = image.width as u32;
            let height = image.height as u32;
            let samples = if config.keep_alpha { CHANNELS } else { 3 };
            let data: Vec<u16> = image
                .data
                .chunks_exact(CHANNELS)
                .flat_map(|px| px[..samples].iter().copied())
                .collect();

            let written = match (image.sixteen_bit, config.keep_alpha) {
                (true, false) => encoder.write_image::<tiff::encoder::colortype::RGB16>(width, height, &data),
                (true, true) => encoder.write_image::<tiff::encoder::colortype::RGBA16>(width, height, &data),
                (false, keep_alpha) => {
                    let bytes: Vec<u8> = data.iter().map(|&v| v.min(u8::MAX as u16) as u8).collect();
                    if keep_alpha {
                        encoder.write_image::<tiff::encoder::colortype::RGBA8>(width, height, &bytes)
                    } else {
                        encoder.write_image::<tiff::encoder::colortype::RGB8>(width, height, &bytes)
                    }
                }
            };
            written.map_err(|e| HotPixelError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
