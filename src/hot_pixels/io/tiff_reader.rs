use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::hot_pixels::common::error::{HotPixelError, Result};
use crate::hot_pixels::image::RgbaImage;
use crate::hot_pixels::image::types::CHANNELS;
use crate::hot_pixels::io::reader::ImageReader;

/// Reads 8 and 16 bit gray, gray+alpha, RGB and RGBA TIFF images.
pub struct TiffImageReader;

impl ImageReader for TiffImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RgbaImage> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let decode_err = |e: tiff::TiffError| HotPixelError::DecodeError(e.to_string());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_err)?;
        let (width, height) = decoder.dimensions().map_err(decode_err)?;
        let (width, height) = (width as usize, height as usize);

        let samples = match decoder.colortype().map_err(decode_err)? {
            ColorType::Gray(_) => 1,
            ColorType::GrayA(_) => 2,
            ColorType::RGB(_) => 3,
            ColorType::RGBA(_) => 4,
            other => {
                return Err(HotPixelError::UnsupportedFormat(format!("TIFF color type {:?}", other)));
            }
        };

        let (sixteen_bit, values) = match decoder.read_image().map_err(decode_err)? {
            DecodingResult::U8(values) => (false, values.into_iter().map(u16::from).collect::<Vec<_>>()),
            DecodingResult::U16(values) => (true, values),
            _ => {
                return Err(HotPixelError::UnsupportedFormat(
                    "TIFF sample format other than 8 or 16 bit unsigned".to_string(),
                ));
            }
        };

        if values.len() != width * height * samples {
            return Err(HotPixelError::DecodeError(format!(
                "expected {} samples for {}x{}, got {}",
                width * height * samples,
                width,
                height,
                values.len()
            )));
        }

        let opaque = if sixteen_bit { u16::MAX } else { u8::MAX as u16 };
        let mut rgba = Vec::with_capacity(width * height * CHANNELS);
        for px in values.chunks_exact(samples) {
            let pixel = match samples {
                1 => [px[0], px[0], px[0], opaque],
                2 => [px[0], px[0], px[0], px[1]],
                3 => [px[0], px[1], px[2], opaque],
                _ => [px[0], px[1], px[2], px[3]],
            };
            rgba.extend_from_slice(&pixel);
        }

        debug!("Decoded image: {}x{}, {} samples, sixteen_bit={}", width, height, samples, sixteen_bit);

        Ok(RgbaImage {
            width,
            height,
            sixteen_bit,
            data: rgba,
        })
    }
}
