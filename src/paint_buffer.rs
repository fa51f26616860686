//! Paint buffer: the coverage hand-off between rasterizers and compositing.
//!
//! A [`PaintBuffer`] is a list of flat pixel offsets (`y * width + x`). The
//! rasterizers push offsets in any order; [`PaintBuffer::finish`] sorts and
//! de-duplicates them so [`write_paint_buffer`] visits every covered pixel
//! exactly once, in memory order.

use crate::blend::{blend_pixel, BlendMode};
use crate::color::Color;
use crate::rendering_buffer::{PaintTarget, RenderingBuffer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaintBuffer {
    offsets: Vec<u32>,
}

impl PaintBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn push(&mut self, offset: u32) {
        self.offsets.push(offset);
    }

    /// Push the inclusive horizontal span `x1..=x2` on row `y`.
    #[inline]
    pub fn push_span(&mut self, width: i32, y: i32, x1: i32, x2: i32) {
        if x1 > x2 {
            return;
        }
        let base = (y * width) as u32;
        self.offsets
            .extend((x1 as u32..=x2 as u32).map(|x| base + x));
    }

    /// Sort ascending and drop duplicates.
    pub fn finish(&mut self) {
        self.offsets.sort_unstable();
        self.offsets.dedup();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.offsets
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.offsets.iter().copied()
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.offsets
    }

    /// `true` when the offsets are strictly ascending.
    pub fn is_finished(&self) -> bool {
        self.offsets.windows(2).all(|w| w[0] < w[1])
    }
}

/// Composite `color` into every pixel named by `buffer`.
///
/// Offsets are interpreted with the destination's width and addressed
/// through its stride. The buffer must have been produced for the same
/// width and be finished.
pub fn write_paint_buffer(
    dst: &mut RenderingBuffer<'_>,
    buffer: &PaintBuffer,
    color: Color,
    mode: BlendMode,
) {
    if dst.is_empty() || buffer.is_empty() {
        return;
    }
    debug_assert!(buffer.is_finished());
    let limit = dst.width() * dst.height();
    for offset in buffer.iter().take_while(|&o| o < limit) {
        blend_pixel(dst.pixel_at_offset_mut(offset), color, mode);
    }
}

/// Rasterize with `raster` at the target's size, then composite the result.
pub fn composite<T: PaintTarget + ?Sized>(
    dst: &mut T,
    color: Color,
    mode: BlendMode,
    raster: impl FnOnce(&mut PaintBuffer, i32, i32),
) {
    let mut rb = dst.rendering_buffer();
    if rb.is_empty() {
        return;
    }
    let mut buf = PaintBuffer::new();
    raster(&mut buf, rb.width() as i32, rb.height() as i32);
    buf.finish();
    write_paint_buffer(&mut rb, &buf, color, mode);
}
