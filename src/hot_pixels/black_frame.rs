//! Black frame parsing module
//!
//! Scans a black frame for samples brighter than a threshold and groups
//! adjacent samples into defect regions.

mod consolidate;
mod parser;
pub mod types;


pub use consolidate::consolidate;
pub use parser::BlackFrameParser;
pub use types::{BlackFrameConfig, BlackFrameConfigBuilder};
