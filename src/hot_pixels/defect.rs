//! Defect region model
//!
//! A defect is a rectangle of one or more adjacent hot pixels plus the
//! luminosity of its brightest sample. Regions are persisted as
//! `"{luminosity}-{x}x{y}-{w}x{h}"` strings.

mod container;
mod props;


pub use container::{Direction, FilterMethod, HotPixelContainer};
pub use props::{DENOM, DENOM_SQRT, HotPixelProps, Rect, parse_hot_pixel_list, to_string_list};
