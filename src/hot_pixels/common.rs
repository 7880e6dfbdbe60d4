//! Common utilities module
//!
//! This module contains shared utilities used across the hot pixel engine.

pub mod error;

pub use error::{HotPixelError, Result};
