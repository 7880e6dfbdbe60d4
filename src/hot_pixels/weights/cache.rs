use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::warn;

use crate::hot_pixels::defect::{Direction, Rect};
use crate::hot_pixels::weights::hot_pixels_weights::HotPixelsWeights;

/// Identifies one set of weights: shape, order and dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightsKey {
    pub width: usize,
    pub height: usize,
    pub polynome_order: u32,
    pub two_dim: bool,
}

impl WeightsKey {
    /// Key for repairing `rect` along `direction`.
    ///
    /// One-dimensional weights are laid out as a single column whose height is
    /// the defect length along the interpolation axis.
    pub fn for_region(rect: &Rect, polynome_order: u32, direction: Direction) -> Self {
        let (width, height) = match direction {
            Direction::TwoDim => (rect.width as usize, rect.height as usize),
            Direction::Vertical => (1, rect.height as usize),
            Direction::Horizontal => (1, rect.width as usize),
        };
        Self {
            width,
            height,
            polynome_order,
            two_dim: direction == Direction::TwoDim,
        }
    }
}

type Slot = Arc<OnceLock<Option<Arc<HotPixelsWeights>>>>;

/// Weights computed at most once per key and shared between correction passes.
///
/// Shapes whose coefficient matrix cannot be inverted are remembered as
/// unavailable.
#[derive(Debug, Default)]
pub struct WeightsCache {
    entries: Mutex<HashMap<WeightsKey, Slot>>,
}

impl WeightsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&self, key: WeightsKey) -> Option<Arc<HotPixelsWeights>> {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.entry(key).or_default().clone()
        };

        slot.get_or_init(|| {
            match HotPixelsWeights::calculate(key.width, key.height, key.polynome_order, key.two_dim) {
                Ok(weights) => Some(Arc::new(weights)),
                Err(e) => {
                    warn!("Interpolation unavailable: {}", e);
                    None
                }
            }
        })
        .clone()
    }

    /// Number of shapes computed or being computed.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
