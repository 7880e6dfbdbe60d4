//! Image I/O module
//!
//! Adapters between files and [`RgbaImage`](crate::hot_pixels::image::RgbaImage):
//! TIFF reading and writing, and RAW black frame decoding.

mod rawloader_reader;
mod reader;
mod standard_tiff_writer;
mod tiff_reader;
pub mod types;
mod writer;


pub use rawloader_reader::RawLoaderReader;
pub use reader::ImageReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use tiff_reader::TiffImageReader;
pub use types::{OutputConfig, OutputConfigBuilder, TiffCompression};
pub use writer::ImageWriter;
