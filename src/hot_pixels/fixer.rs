//! Hot pixel correction module
//!
//! Repairs every region of a [`HotPixelContainer`](crate::hot_pixels::defect::HotPixelContainer)
//! either with the mean of the bordering pixels or with a polynomial fit of
//! the surrounding samples.

mod average;
mod hot_pixel_fixer;
mod weighted;


pub use hot_pixel_fixer::HotPixelFixer;
