//! Owned RGBA image.
//!
//! Pixels are tightly packed (`stride == width`), row-major, top-left
//! origin. Shapes paint onto an `Image` through [`PaintTarget`]; images
//! composite onto any [`PaintTarget`] with `paint_to`, `stamp_to` and
//! `overwrite_to`.

use crate::basics::Point;
use crate::blend::{stamp_pixel, PaintKernel};
use crate::color::Color;
use crate::error::{ImageError, Result};
use crate::rendering_buffer::{PaintTarget, RenderingBuffer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    pub const MAX_WIDTH: u32 = 16384;
    pub const MAX_HEIGHT: u32 = 16384;

    /// Transparent image. Sizes beyond [`Image::MAX_WIDTH`] or
    /// [`Image::MAX_HEIGHT`] give an empty image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::new_filled(width, height, Color::TRANSPARENT)
    }

    pub fn new_filled(width: u32, height: u32, color: Color) -> Self {
        if let Err(e) = check_size(width, height) {
            log::warn!("{}; creating an empty image", e);
            return Self::default();
        }
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Take ownership of `width * height` packed pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        check_size(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::BufferTooSmall {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
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
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    #[inline]
    pub fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, c: Color) {
        self.pixels[y as usize * self.width as usize + x as usize] = c;
    }

    pub fn fill(&mut self, c: Color) {
        self.pixels.fill(c);
    }

    pub fn view(&mut self) -> RenderingBuffer<'_> {
        RenderingBuffer::packed_unchecked(&mut self.pixels, self.width, self.height)
    }

    // ------------------------------------------------------------------------
    // Blits
    // ------------------------------------------------------------------------

    /// Source-over this image, multiplied by `tint`, at `pos`. Destination
    /// alpha is kept. Uses the process-wide kernel.
    pub fn paint_to<T: PaintTarget + ?Sized>(&self, dst: &mut T, pos: Point, tint: Color) -> &Self {
        self.paint_to_with(PaintKernel::selected(), dst, pos, tint)
    }

    /// [`Image::paint_to`] with an explicit kernel.
    pub fn paint_to_with<T: PaintTarget + ?Sized>(
        &self,
        kernel: PaintKernel,
        dst: &mut T,
        pos: Point,
        tint: Color,
    ) -> &Self {
        self.blit(dst, pos, |d, s| kernel.paint_row(d, s, tint));
        self
    }

    /// Like `paint_to`, but transparent destination pixels take the tinted
    /// source as is and alpha becomes the maximum of both.
    pub fn stamp_to<T: PaintTarget + ?Sized>(&self, dst: &mut T, pos: Point, tint: Color) -> &Self {
        self.blit(dst, pos, |d, s| {
            for (d, s) in d.iter_mut().zip(s) {
                stamp_pixel(d, tinted(*s, tint));
            }
        });
        self
    }

    /// Copy the pixels, alpha included.
    pub fn overwrite_to<T: PaintTarget + ?Sized>(&self, dst: &mut T, pos: Point) -> &Self {
        self.blit(dst, pos, |d, s| d.copy_from_slice(s));
        self
    }

    /// Clip this image at `pos` against `dst` and hand each overlapping
    /// row pair to `row_op`.
    fn blit<T: PaintTarget + ?Sized>(&self, dst: &mut T, pos: Point, mut row_op: impl FnMut(&mut [Color], &[Color])) {
        let mut rb = dst.rendering_buffer();
        if self.is_empty() || rb.is_empty() {
            return;
        }
        let x0 = pos.x.max(0) as i64;
        let y0 = pos.y.max(0) as i64;
        let x1 = (pos.x as i64 + self.width as i64).min(rb.width() as i64);
        let y1 = (pos.y as i64 + self.height as i64).min(rb.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let sx = (x0 - pos.x as i64) as usize;
        let n = (x1 - x0) as usize;
        for y in y0..y1 {
            let sy = (y - pos.y as i64) as u32;
            let src = &self.row(sy)[sx..sx + n];
            let dst_row = &mut rb.row_mut(y as u32)[x0 as usize..x0 as usize + n];
            row_op(dst_row, src);
        }
    }
}

impl PaintTarget for Image {
    fn rendering_buffer(&mut self) -> RenderingBuffer<'_> {
        self.view()
    }
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width > Image::MAX_WIDTH || height > Image::MAX_HEIGHT {
        return Err(ImageError::InvalidSize { width, height });
    }
    Ok(())
}

/// Channel-wise `src * tint / 255`.
#[inline]
fn tinted(src: Color, tint: Color) -> Color {
    if tint.is_opaque_white() {
        return src;
    }
    let m = |s: u8, t: u8| ((s as u32 * t as u32) / 255) as u8;
    Color::new(m(src.r, tint.r), m(src.g, tint.g), m(src.b, tint.b), m(src.a, tint.a))
}

// ============================================================================
// `image` crate interop
// ============================================================================

#[cfg(feature = "codec")]
impl From<&::image::RgbaImage> for Image {
    fn from(img: &::image::RgbaImage) -> Self {
        let pixels = img.pixels().map(|p| Color::from(p.0)).collect();
        Image::from_pixels(img.width(), img.height(), pixels).unwrap_or_else(|e| {
            log::warn!("{}; creating an empty image", e);
            Image::default()
        })
    }
}

#[cfg(feature = "codec")]
impl From<::image::RgbaImage> for Image {
    fn from(img: ::image::RgbaImage) -> Self {
        Image::from(&img)
    }
}

#[cfg(feature = "codec")]
impl Image {
    pub fn to_rgba_image(&self) -> ::image::RgbaImage {
        ::image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            ::image::Rgba(self.get(x, y).to_array())
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
