use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::hot_pixels::common::error::{HotPixelError, Result};

/// Luminosity scale: a saturated sample has luminosity `DENOM`.
pub const DENOM_SQRT: u32 = 10_000;
pub const DENOM: u32 = DENOM_SQRT * DENOM_SQRT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// First column past the right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// First row past the bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Bounding box of both rectangles. Sizes saturate at `u32::MAX`.
    pub fn united(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let span = |end: i64, start: u32| u32::try_from(end - start as i64).unwrap_or(u32::MAX);
        Rect {
            x,
            y,
            width: span(self.right().max(other.right()), x),
            height: span(self.bottom().max(other.bottom()), y),
        }
    }

    /// Part of the rectangle inside `[0, width) x [0, height)`, `None` when
    /// nothing is left.
    pub fn clipped_to(&self, width: usize, height: usize) -> Option<Rect> {
        let right = self.right().min(width as i64);
        let bottom = self.bottom().min(height as i64);
        if right <= self.x as i64 || bottom <= self.y as i64 {
            return None;
        }
        Some(Rect {
            x: self.x,
            y: self.y,
            width: (right - self.x as i64) as u32,
            height: (bottom - self.y as i64) as u32,
        })
    }

    /// Overlapping or sharing an edge row/column, corners included.
    fn near(&self, other: &Rect) -> bool {
        (self.x as i64) <= other.right()
            && (other.x as i64) <= self.right()
            && (self.y as i64) <= other.bottom()
            && (other.y as i64) <= self.bottom()
    }

    /// Only a corner of `self` meets a corner of `other`.
    fn diagonal(&self, other: &Rect) -> bool {
        let above = self.bottom() == other.y as i64;
        let below = self.y as i64 == other.bottom();
        let left = self.right() == other.x as i64;
        let right = self.x as i64 == other.right();
        (above || below) && (left || right)
    }
}

/// A hot pixel region found in a black frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotPixelProps {
    pub rect: Rect,
    pub luminosity: u32,
}

impl HotPixelProps {
    /// Single defective sample at `(x, y)`.
    pub fn new(x: u32, y: u32, luminosity: u32) -> Self {
        Self {
            rect: Rect::new(x, y, 1, 1),
            luminosity,
        }
    }

    /// Region with an explicit size. Width and height must be non-zero and
    /// the far edges must fit in `u32`.
    pub fn with_rect(rect: Rect, luminosity: u32) -> Result<Self> {
        if rect.width == 0 || rect.height == 0 {
            return Err(HotPixelError::Parse(format!(
                "empty rectangle {}x{}",
                rect.width, rect.height
            )));
        }
        if rect.x.checked_add(rect.width).is_none() || rect.y.checked_add(rect.height).is_none() {
            return Err(HotPixelError::Parse(format!(
                "rectangle {}x{} at {}x{} exceeds the coordinate range",
                rect.width, rect.height, rect.x, rect.y
            )));
        }
        Ok(Self { rect, luminosity })
    }

    pub fn x(&self) -> u32 {
        self.rect.x
    }

    pub fn y(&self) -> u32 {
        self.rect.y
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    /// Whether both regions belong to the same defect: they overlap or share
    /// an edge, but do not merely touch at a corner.
    pub fn touches(&self, other: &HotPixelProps) -> bool {
        self.rect.near(&other.rect) && !self.rect.diagonal(&other.rect)
    }

    /// Grows `self` to the bounding box of both regions, keeping the brighter luminosity.
    pub fn merge(&mut self, other: &HotPixelProps) {
        self.rect = self.rect.united(&other.rect);
        self.luminosity = self.luminosity.max(other.luminosity);
    }
}

impl fmt::Display for HotPixelProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}x{}-{}x{}",
            self.luminosity, self.rect.x, self.rect.y, self.rect.width, self.rect.height
        )
    }
}

fn parse_pair(part: &str, entry: &str) -> Result<(u32, u32)> {
    let (a, b) = part
        .split_once('x')
        .ok_or_else(|| HotPixelError::Parse(entry.to_string()))?;
    Ok((parse_number(a, entry)?, parse_number(b, entry)?))
}

fn parse_number(digits: &str, entry: &str) -> Result<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HotPixelError::Parse(entry.to_string()));
    }
    digits
        .parse()
        .map_err(|_| HotPixelError::Parse(entry.to_string()))
}

impl FromStr for HotPixelProps {
    type Err = HotPixelError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('-');
        let (Some(luminosity), Some(position), Some(size), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(HotPixelError::Parse(s.to_string()));
        };

        let luminosity = parse_number(luminosity, s)?;
        let (x, y) = parse_pair(position, s)?;
        let (width, height) = parse_pair(size, s)?;

        HotPixelProps::with_rect(Rect::new(x, y, width, height), luminosity)
            .map_err(|_| HotPixelError::Parse(s.to_string()))
    }
}

/// Parses a persisted hot pixel list. Malformed entries are logged and skipped.
pub fn parse_hot_pixel_list<I, S>(items: I) -> Vec<HotPixelProps>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(|item| match item.as_ref().parse::<HotPixelProps>() {
            Ok(props) => Some(props),
            Err(e) => {
                warn!("Skipping hot pixel entry: {}", e);
                None
            }
        })
        .collect()
}

pub fn to_string_list(hot_pixels: &[HotPixelProps]) -> Vec<String> {
    hot_pixels.iter().map(ToString::to_string).collect()
}
