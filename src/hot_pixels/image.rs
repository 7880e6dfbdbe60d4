//! Image buffer module
//!
//! The engine never decodes files itself; it works on anything implementing
//! [`ImageBuffer`]. [`RgbaImage`] is the owned buffer produced by the readers.

mod buffer;
pub mod types;

pub use buffer::ImageBuffer;
pub use types::{Rgba, RgbaImage};
