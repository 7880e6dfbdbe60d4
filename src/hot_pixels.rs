//! Hot pixel detection and correction module
//!
//! This module finds stuck sensor pixels in a dark calibration frame and
//! repairs them in other images taken with the same sensor, with separate
//! modules for the defect model, black frame parsing, interpolation weights,
//! correction, image I/O and pipeline orchestration.

pub mod black_frame;
pub mod common;
pub mod defect;
pub mod fixer;
pub mod image;
pub mod io;
pub mod pipeline;
pub mod weights;

pub use common::{
    HotPixelError,
    Result,
};

pub use image::{
    ImageBuffer,
    Rgba,
    RgbaImage,
};

pub use defect::{
    Direction,
    FilterMethod,
    HotPixelContainer,
    HotPixelProps,
    Rect,
};

pub use black_frame::{
    BlackFrameConfig,
    BlackFrameConfigBuilder,
    BlackFrameParser,
};

pub use weights::{
    HotPixelsWeights,
    WeightsCache,
};

pub use fixer::HotPixelFixer;

pub use io::{
    ImageReader,
    ImageWriter,
    OutputConfig,
    OutputConfigBuilder,
    RawLoaderReader,
    StandardTiffWriter,
    TiffCompression,
    TiffImageReader,
};

pub use pipeline::{
    HotPixelPipeline,
    PipelineTimings,
};
