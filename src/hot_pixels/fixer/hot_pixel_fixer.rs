use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::hot_pixels::defect::{Direction, FilterMethod, HotPixelContainer, HotPixelProps};
use crate::hot_pixels::fixer::average::average_pixels;
use crate::hot_pixels::fixer::weighted::weight_pixels;
use crate::hot_pixels::image::{ImageBuffer, RgbaImage};
use crate::hot_pixels::weights::{WeightsCache, WeightsKey};

/// Repairs hot pixel regions in target images.
///
/// Weights are shared through a [`WeightsCache`]; clones of a fixer share the
/// same cache.
#[derive(Debug, Clone, Default)]
pub struct HotPixelFixer {
    direction: Direction,
    cache: Arc<WeightsCache>,
}

impl HotPixelFixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_cache(mut self, cache: Arc<WeightsCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn cache(&self) -> &Arc<WeightsCache> {
        &self.cache
    }

    /// Returns a corrected copy of `image`.
    pub fn fix(&self, image: &RgbaImage, container: &HotPixelContainer) -> RgbaImage {
        let mut output = image.clone();
        self.fix_in_place(&mut output, container);
        output
    }

    /// Corrects every region of `container` directly in `image`.
    #[instrument(skip_all, fields(regions = container.hot_pixels.len(), method = ?container.filter_method))]
    pub fn fix_in_place<I: ImageBuffer + ?Sized>(&self, image: &mut I, container: &HotPixelContainer) {
        let mut fallbacks = 0usize;
        for region in &container.hot_pixels {
            if !self.fix_region(image, region, container.filter_method) {
                fallbacks += 1;
            }
        }

        info!(
            "Fixed {} hot pixel regions ({} averaged instead of interpolated)",
            container.hot_pixels.len(),
            fallbacks
        );
    }

    /// Corrects one region, clipped to the image. Returns `false` when the
    /// polynomial fit was not available for its shape and the region was
    /// averaged instead.
    pub fn fix_region<I: ImageBuffer + ?Sized>(
        &self,
        image: &mut I,
        region: &HotPixelProps,
        method: FilterMethod,
    ) -> bool {
        let Some(rect) = region.rect.clipped_to(image.width(), image.height()) else {
            debug!("Region {} lies outside the {}x{} image", region, image.width(), image.height());
            return true;
        };
        let clipped = HotPixelProps {
            rect,
            luminosity: region.luminosity,
        };

        match method.polynomial_order() {
            Some(order) => self.interpolate(image, &clipped, order),
            None => {
                average_region(image, &clipped);
                true
            }
        }
    }

    pub(super) fn interpolate<I: ImageBuffer + ?Sized>(
        &self,
        image: &mut I,
        region: &HotPixelProps,
        order: u32,
    ) -> bool {
        let key = WeightsKey::for_region(&region.rect, order, self.direction);
        match self.cache.get_or_compute(key) {
            Some(weights) => {
                weight_pixels(image, &region.rect, &weights, self.direction);
                true
            }
            None => {
                warn!("No order {} weights for region {}, averaging", order, region);
                average_region(image, region);
                false
            }
        }
    }
}

fn average_region<I: ImageBuffer + ?Sized>(image: &mut I, region: &HotPixelProps) {
    if !average_pixels(image, &region.rect) {
        debug!("Region {} has no neighbours inside the image", region);
    }
}
