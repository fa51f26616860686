//! Rendering buffer: row-oriented access to caller-owned pixel data.
//!
//! A [`RenderingBuffer`] borrows a slice of [`Color`] pixels together with a
//! width, height and row stride (in pixels). Every rasterizer and compositing
//! kernel in the crate writes through this view; it never allocates and it
//! never touches the padding between `width` and `stride`.

use crate::color::Color;
use crate::error::{ImageError, Result};

// ============================================================================
// RenderingBuffer
// ============================================================================

/// Mutable view of a `width * height` block of pixels with a row stride.
#[derive(Debug)]
pub struct RenderingBuffer<'a> {
    pixels: &'a mut [Color],
    width: u32,
    height: u32,
    stride: u32,
}

impl<'a> RenderingBuffer<'a> {
    /// Attach to a pixel slice.
    ///
    /// The slice must contain at least `(height - 1) * stride + width`
    /// pixels. A zero-sized view is always accepted.
    pub fn new(pixels: &'a mut [Color], width: u32, height: u32, stride: u32) -> Result<Self> {
        if stride < width {
            return Err(ImageError::InvalidStride { stride, width });
        }
        let expected = required_len(width, height, stride);
        if pixels.len() < expected {
            return Err(ImageError::BufferTooSmall {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    /// Attach to a tightly packed slice (`stride == width`).
    pub fn packed(pixels: &'a mut [Color], width: u32, height: u32) -> Result<Self> {
        Self::new(pixels, width, height, width)
    }

    /// Packed view over storage whose size the caller already maintains.
    pub(crate) fn packed_unchecked(pixels: &'a mut [Color], width: u32, height: u32) -> Self {
        debug_assert!(pixels.len() >= required_len(width, height, width));
        Self {
            pixels,
            width,
            height,
            stride: width,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row `y`, exactly `width` pixels long.
    #[inline]
    pub fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.stride as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable row `y`, exactly `width` pixels long.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Color] {
        let start = y as usize * self.stride as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.stride as usize + x as usize]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Color {
        &mut self.pixels[y as usize * self.stride as usize + x as usize]
    }

    /// Shorter-lived view of the same pixels.
    pub fn reborrow(&mut self) -> RenderingBuffer<'_> {
        RenderingBuffer {
            pixels: &mut *self.pixels,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Pixel addressed by a paint-buffer offset (`y * width + x`).
    #[inline]
    pub fn pixel_at_offset_mut(&mut self, offset: u32) -> &mut Color {
        let x = offset % self.width;
        let y = offset / self.width;
        self.pixel_mut(x, y)
    }
}

// ============================================================================
// PaintTarget
// ============================================================================

/// Anything shapes and images can be painted onto.
pub trait PaintTarget {
    fn rendering_buffer(&mut self) -> RenderingBuffer<'_>;
}

impl PaintTarget for RenderingBuffer<'_> {
    fn rendering_buffer(&mut self) -> RenderingBuffer<'_> {
        self.reborrow()
    }
}

#[inline]
fn required_len(width: u32, height: u32, stride: u32) -> usize {
    if width == 0 || height == 0 {
        0
    } else {
        (height as usize - 1) * stride as usize + width as usize
    }
}

// ============================================================================
// Tests
// ============================================================================
