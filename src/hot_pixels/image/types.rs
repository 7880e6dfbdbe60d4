//! Pixel and image buffer types

use crate::hot_pixels::image::buffer::ImageBuffer;

/// Samples per pixel in [`RgbaImage::data`].
pub const CHANNELS: usize = 4;

/// One pixel. 8-bit images keep every channel in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub alpha: u16,
}

impl Rgba {
    pub fn new(red: u16, green: u16, blue: u16, alpha: u16) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Gray pixel with full opacity for the given depth.
    pub fn gray(value: u16, sixteen_bit: bool) -> Self {
        let alpha = if sixteen_bit { u16::MAX } else { u8::MAX as u16 };
        Self::new(value, value, value, alpha)
    }

    pub fn max_channel(&self) -> u16 {
        self.red.max(self.green).max(self.blue)
    }

    /// Color channel by index: 0 = red, 1 = green, 2 = blue.
    ///
    /// Panics for any other index; alpha is never a color channel.
    pub fn channel(&self, index: usize) -> u16 {
        match index {
            0 => self.red,
            1 => self.green,
            2 => self.blue,
            other => unreachable!("color channel index {} out of range", other),
        }
    }

    pub fn set_channel(&mut self, index: usize, value: u16) {
        match index {
            0 => self.red = value,
            1 => self.green = value,
            2 => self.blue = value,
            other => unreachable!("color channel index {} out of range", other),
        }
    }
}

/// Owned RGBA image, 8 or 16 bits per channel
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Whether channels span `0..=65535` (true) or `0..=255` (false)
    pub sixteen_bit: bool,
    /// RGBA pixel data interleaved [R, G, B, A, R, G, B, A, ...]
    pub data: Vec<u16>,
}

impl RgbaImage {
    /// Black, fully opaque image.
    pub fn new(width: usize, height: usize, sixteen_bit: bool) -> Self {
        Self::filled(width, height, sixteen_bit, Rgba::gray(0, sixteen_bit))
    }

    pub fn filled(width: usize, height: usize, sixteen_bit: bool, color: Rgba) -> Self {
        let data = [color.red, color.green, color.blue, color.alpha]
            .into_iter()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Self { width, height, sixteen_bit, data }
    }

    pub fn from_fn<F>(width: usize, height: usize, sixteen_bit: bool, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Rgba,
    {
        let mut image = Self::new(width, height, sixteen_bit);
        for y in 0..height {
            for x in 0..width {
                image.set_pixel(x, y, f(x, y));
            }
        }
        image
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) * CHANNELS
    }
}

impl ImageBuffer for RgbaImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn sixteen_bit(&self) -> bool {
        self.sixteen_bit
    }

    fn get_pixel(&self, x: usize, y: usize) -> Rgba {
        let i = self.offset(x, y);
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        let i = self.offset(x, y);
        self.data[i] = color.red;
        self.data[i + 1] = color.green;
        self.data[i + 2] = color.blue;
        self.data[i + 3] = color.alpha;
    }
}
