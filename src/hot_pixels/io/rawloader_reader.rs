//! RAW black frame reader using the rawloader library.
//!
//! Black frames are often shot straight to RAW. The sensor data is decoded by
//! rawloader, black and white levels are normalized to the full 16 bit range,
//! and the CFA mosaic is interpolated to RGB with the bayer crate so that the
//! parser sees the same kind of image as for a TIFF black frame.

use std::io::Cursor;

use anyhow::anyhow;
use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::hot_pixels::common::error::{HotPixelError, Result};
use crate::hot_pixels::image::RgbaImage;
use crate::hot_pixels::image::types::CHANNELS;
use crate::hot_pixels::io::reader::ImageReader;

/// RAW image reader that uses the rawloader library for decoding.
///
/// This reader supports any RAW format that rawloader can decode, including but not limited to:
/// - Sony ARW
/// - Canon CR2
/// - Nikon NEF
/// - Adobe DNG
pub struct RawLoaderReader;

impl ImageReader for RawLoaderReader {
    /// Decodes a RAW file into a 16 bit RGBA image.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hotpixels_rs::hot_pixels::{ImageReader, RawLoaderReader};
    ///
    /// let raw_bytes = std::fs::read("black.arw").unwrap();
    /// let image = RawLoaderReader.read_image(&raw_bytes).unwrap();
    /// assert!(image.sixteen_bit);
    /// ```
    fn read_image(&self, data: &[u8]) -> Result<RgbaImage> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| HotPixelError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;

        debug!("Decoded image: {}x{}, {} components, CFA {}", width, height, decoded.cpp, decoded.cfa.name);

        let black = decoded.blacklevels[0] as f32;
        let white = decoded.whitelevels[0] as f32;
        let range = (white - black).max(1.0);

        // Integer data is normalized from [black, white], float data (0.0-1.0) is scaled directly
        let samples: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values
                .iter()
                .map(|&v| (((v as f32 - black).max(0.0) / range) * u16::MAX as f32).min(u16::MAX as f32) as u16)
                .collect(),
            RawloaderImageData::Float(values) => values
                .iter()
                .map(|&v| (v * u16::MAX as f32).clamp(0.0, u16::MAX as f32) as u16)
                .collect(),
        };

        let rgb = match decoded.cpp {
            1 => debayer(&decoded.cfa.name, width, height, &samples)
                .map_err(|e| HotPixelError::DecodeError(e.to_string()))?,
            3 => samples,
            other => {
                return Err(HotPixelError::UnsupportedFormat(format!("{} components per pixel", other)));
            }
        };

        if rgb.len() != width * height * 3 {
            return Err(HotPixelError::InvalidDimensions(width, height));
        }

        let data = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], u16::MAX])
            .collect::<Vec<_>>();
        debug_assert_eq!(data.len(), width * height * CHANNELS);

        Ok(RgbaImage {
            width,
            height,
            sixteen_bit: true,
            data,
        })
    }
}

/// Interpolates a 16 bit CFA mosaic to interleaved RGB.
pub(crate) fn debayer(cfa_name: &str, width: usize, height: usize, mosaic: &[u16]) -> anyhow::Result<Vec<u16>> {
    let cfa = match cfa_name {
        "RGGB" => CFA::RGGB,
        "BGGR" => CFA::BGGR,
        "GRBG" => CFA::GRBG,
        "GBRG" => CFA::GBRG,
        other => anyhow::bail!("Unsupported CFA pattern: {}", other),
    };

    if mosaic.len() != width * height {
        anyhow::bail!("Mosaic has {} samples, expected {}x{}", mosaic.len(), width, height);
    }

    let bayer_bytes: Vec<u8> = mosaic.iter().flat_map(|&v| v.to_le_bytes()).collect();
    let mut output_buf = vec![0u8; width * height * 3 * 2];

    {
        let mut output_raster = RasterMut::new(width, height, RasterDepth::Depth16, &mut output_buf);
        bayer::run_demosaic(
            &mut Cursor::new(&bayer_bytes[..]),
            BayerDepth::Depth16LE,
            cfa,
            Demosaic::Linear,
            &mut output_raster,
        )
        .map_err(|e| anyhow!("Demosaic failed: {:?}", e))?;
    }

    Ok(output_buf
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect())
}
