use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hot_pixels::common::error::{HotPixelError, Result};
use crate::hot_pixels::defect::props::HotPixelProps;

/// How defect regions are repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterMethod {
    /// Mean of the pixels bordering the region
    Average = 0,
    /// First order polynomial fit
    Linear = 1,
    /// Second order polynomial fit (default)
    #[default]
    Quadratic = 2,
    /// Third order polynomial fit
    Cubic = 3,
}

impl FilterMethod {
    /// Polynomial order of the interpolating fit, `None` for [`FilterMethod::Average`].
    pub fn polynomial_order(self) -> Option<u32> {
        match self {
            FilterMethod::Average => None,
            FilterMethod::Linear => Some(1),
            FilterMethod::Quadratic => Some(2),
            FilterMethod::Cubic => Some(3),
        }
    }
}

impl TryFrom<u8> for FilterMethod {
    type Error = HotPixelError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(FilterMethod::Average),
            1 => Ok(FilterMethod::Linear),
            2 => Ok(FilterMethod::Quadratic),
            3 => Ok(FilterMethod::Cubic),
            other => Err(HotPixelError::InvalidFilterMethod(other)),
        }
    }
}

/// Axis along which surrounding samples are taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Samples all around the region
    #[default]
    TwoDim,
    /// Samples above and below, same column
    Vertical,
    /// Samples left and right, same row
    Horizontal,
}

/// Everything the fixer needs: the defect list and how to repair it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotPixelContainer {
    /// Black frame the hot pixels were parsed from
    pub black_frame_reference: PathBuf,
    /// Persisted as `"{luminosity}-{x}x{y}-{w}x{h}"` strings
    #[serde(with = "string_list")]
    pub hot_pixels: Vec<HotPixelProps>,
    #[serde(default)]
    pub filter_method: FilterMethod,
}

impl HotPixelContainer {
    pub fn new<P: Into<PathBuf>>(
        black_frame_reference: P,
        hot_pixels: Vec<HotPixelProps>,
        filter_method: FilterMethod,
    ) -> Self {
        Self {
            black_frame_reference: black_frame_reference.into(),
            hot_pixels,
            filter_method,
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| {
            HotPixelError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        debug!("Saved {} hot pixels to {}", self.hot_pixels.len(), path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            HotPixelError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        let container: Self = serde_json::from_str(&json)?;
        debug!("Loaded {} hot pixels from {}", container.hot_pixels.len(), path.display());
        Ok(container)
    }
}

mod string_list {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::hot_pixels::defect::props::{HotPixelProps, parse_hot_pixel_list};

    pub fn serialize<S: Serializer>(list: &[HotPixelProps], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(list.iter().map(ToString::to_string))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<HotPixelProps>, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        Ok(parse_hot_pixel_list(items))
    }
}
