//! Pipeline orchestration module
//!
//! Ties the engine to the file system: parse a black frame into a
//! [`HotPixelContainer`](crate::hot_pixels::defect::HotPixelContainer), then
//! correct target images with it.

mod hot_pixel_pipeline;
mod timing;

#[cfg(test)]
mod tests;

pub use hot_pixel_pipeline::HotPixelPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
