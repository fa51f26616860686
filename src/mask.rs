//! Binary mask at twice the source resolution.
//!
//! Each source pixel becomes a 2x2 block, so one-pixel features still have
//! an interior and traced borders run through pixel corners once scaled
//! back down.

use crate::image::Image;

/// Source channel compared against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskChannel {
    #[default]
    Alpha,
    /// Red channel, used for grayscale sources.
    Red,
}

/// Single-channel `u8` mask holding 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BinaryMask {
    pub const ON: u8 = 255;

    /// All-zero mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// `2w x 2h` mask, on where the channel value exceeds `threshold`.
    pub fn from_image(image: &Image, channel: MaskChannel, threshold: u8) -> Self {
        let (w, h) = (image.width(), image.height());
        let mut mask = Self::new(w * 2, h * 2);
        if image.is_empty() {
            return mask;
        }
        let mw = mask.width as usize;
        for y in 0..h {
            let row = image.row(y);
            let top = (y as usize * 2) * mw;
            for (x, px) in row.iter().enumerate() {
                let value = match channel {
                    MaskChannel::Alpha => px.a,
                    MaskChannel::Red => px.r,
                };
                if value > threshold {
                    let i = top + x * 2;
                    mask.data[i..i + 2].fill(Self::ON);
                    mask.data[i + mw..i + mw + 2].fill(Self::ON);
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[y as usize * self.width as usize + x as usize] != 0
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        self.data[y as usize * self.width as usize + x as usize] = if on { Self::ON } else { 0 };
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn count_on(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}
