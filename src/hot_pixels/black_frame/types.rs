//! Black frame parsing configuration

/// Configuration for hot pixel detection
#[derive(Debug, Clone, PartialEq)]
pub struct BlackFrameConfig {
    /// Fraction of full scale a sample must exceed to be flagged (0.1 = 10%)
    pub threshold_fraction: f64,
    /// Candidate count above which the frame is rejected as not black
    pub max_hot_pixels: usize,
}

impl Default for BlackFrameConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: 0.1,
            max_hot_pixels: 1000,
        }
    }
}

impl BlackFrameConfig {
    pub fn builder() -> BlackFrameConfigBuilder {
        BlackFrameConfigBuilder::default()
    }

    /// Absolute threshold for a channel depth.
    pub fn threshold(&self, max_component: u16) -> u16 {
        (max_component as f64 * self.threshold_fraction)
            .floor()
            .clamp(0.0, max_component as f64) as u16
    }
}

/// Builder for BlackFrameConfig
#[derive(Default)]
pub struct BlackFrameConfigBuilder {
    threshold_fraction: Option<f64>,
    max_hot_pixels: Option<usize>,
}

impl BlackFrameConfigBuilder {
    pub fn threshold_fraction(mut self, fraction: f64) -> Self {
        self.threshold_fraction = Some(fraction);
        self
    }

    pub fn max_hot_pixels(mut self, max: usize) -> Self {
        self.max_hot_pixels = Some(max);
        self
    }

    pub fn build(self) -> BlackFrameConfig {
        let default = BlackFrameConfig::default();
        BlackFrameConfig {
            threshold_fraction: self.threshold_fraction.unwrap_or(default.threshold_fraction),
            max_hot_pixels: self.max_hot_pixels.unwrap_or(default.max_hot_pixels),
        }
    }
}
