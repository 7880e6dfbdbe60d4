//! Interpolation weights module
//!
//! For a defect rectangle of a given size, precomputes how much each sample
//! around the rectangle contributes to each pixel inside it, from a least
//! squares polynomial fit.

mod cache;
mod hot_pixels_weights;
pub mod matrix;


pub use cache::{WeightsCache, WeightsKey};
pub use hot_pixels_weights::{HotPixelsWeights, coefficient_matrix, sample_positions};
pub use matrix::{PIVOT_EPSILON, gauss_jordan_inverse, poly_term};
