use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::hot_pixels::black_frame::consolidate::consolidate;
use crate::hot_pixels::black_frame::types::BlackFrameConfig;
use crate::hot_pixels::common::error::{HotPixelError, Result};
use crate::hot_pixels::defect::{DENOM, HotPixelProps};
use crate::hot_pixels::image::ImageBuffer;
use crate::hot_pixels::io::ImageReader;

/// Finds hot pixels in a black frame.
#[derive(Debug, Clone, Default)]
pub struct BlackFrameParser {
    config: BlackFrameConfig,
}

impl BlackFrameParser {
    pub fn new(config: BlackFrameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BlackFrameConfig {
        &self.config
    }

    /// Detects and consolidates hot pixels.
    ///
    /// Fails with [`HotPixelError::DefectScanAborted`] when the image has more
    /// candidates than `max_hot_pixels`; consolidation is skipped in that case.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn parse<I: ImageBuffer + ?Sized>(&self, image: &I) -> Result<Vec<HotPixelProps>> {
        let mut hot_pixels = self.detect(image)?;
        consolidate(&mut hot_pixels);
        info!("Found {} hot pixel regions", hot_pixels.len());
        Ok(hot_pixels)
    }

    /// Detection pass only: one 1x1 region per flagged sample, in scan order.
    pub fn detect<I: ImageBuffer + ?Sized>(&self, image: &I) -> Result<Vec<HotPixelProps>> {
        let max_component = image.max_component();
        let threshold = self.config.threshold(max_component);
        let limit = self.config.max_hot_pixels;

        debug!("Detecting hot pixels above {} of {}", threshold, max_component);

        let mut hot_pixels = Vec::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                let max_value = image.get_pixel(x, y).max_channel();
                if max_value <= threshold {
                    continue;
                }

                hot_pixels.push(HotPixelProps::new(
                    x as u32,
                    y as u32,
                    luminosity(max_value, max_component),
                ));

                if hot_pixels.len() > limit {
                    warn!(
                        "More than {} hot pixel candidates at ({}, {}), not a black frame?",
                        limit, x, y
                    );
                    return Err(HotPixelError::DefectScanAborted { limit });
                }
            }
        }

        debug!("Detected {} hot pixel candidates", hot_pixels.len());
        Ok(hot_pixels)
    }

    /// Loads a black frame through `reader` and parses it.
    ///
    /// A missing or undecodable file gives an empty list.
    pub fn parse_file<R: ImageReader, P: AsRef<Path>>(
        &self,
        path: P,
        reader: &R,
    ) -> Result<Vec<HotPixelProps>> {
        let path = path.as_ref();

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cannot read black frame {}: {}", path.display(), e);
                return Ok(Vec::new());
            }
        };

        let image = match reader.read_image(&data) {
            Ok(image) => image,
            Err(e) => {
                warn!("Cannot decode black frame {}: {}", path.display(), e);
                return Ok(Vec::new());
            }
        };

        self.parse(&image)
    }
}

/// Scales a channel value into `0..=DENOM`.
fn luminosity(value: u16, max_component: u16) -> u32 {
    let scaled = value as u64 * DENOM as u64 / max_component.max(1) as u64;
    scaled.min(DENOM as u64) as u32
}

