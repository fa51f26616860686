//! Line walkers producing paint-buffer offsets.
//!
//! - [`LineIterator`]: integer Bresenham over pixel endpoints, yielding flat
//!   offsets after clipping to the image.
//! - [`line_fixed`]: 16.16 fixed-point DDA used to stroke polygon
//!   boundaries, so that filled spans and edges agree on every pixel.

use crate::basics::{Point, XY_ONE, XY_SHIFT};
use crate::clip_line::clip_line;
use crate::paint_buffer::PaintBuffer;

// ============================================================================
// Bresenham iterator
// ============================================================================

/// Bresenham walk between two pixel centers, yielding `y * width + x`.
///
/// Endpoints outside the image are clipped first; a segment that misses the
/// image yields nothing. Both endpoints are included.
#[derive(Debug, Clone)]
pub struct LineIterator {
    offset: i32,
    err: i32,
    remaining: i32,
    minus_delta: i32,
    plus_delta: i32,
    minus_step: i32,
    plus_step: i32,
}

impl LineIterator {
    pub fn new(width: i32, height: i32, mut p1: Point, mut p2: Point) -> Self {
        let outside = |p: Point| p.x as u32 >= width as u32 || p.y as u32 >= height as u32;
        if (outside(p1) || outside(p2)) && !clip_line(Point::new(width, height), &mut p1, &mut p2)
        {
            return Self {
                offset: 0,
                err: 0,
                remaining: 0,
                minus_delta: 0,
                plus_delta: 0,
                minus_step: 0,
                plus_step: 0,
            };
        }

        // Walk left to right.
        if p2.x < p1.x {
            core::mem::swap(&mut p1, &mut p2);
        }
        let mut dx = p2.x - p1.x;
        let mut dy = p2.y - p1.y;
        let offset = p1.y * width + p1.x;

        let mut major_step = 1;
        let mut minor_step = width;
        if dy < 0 {
            dy = -dy;
            minor_step = -minor_step;
        }
        if dy > dx {
            core::mem::swap(&mut dx, &mut dy);
            core::mem::swap(&mut major_step, &mut minor_step);
        }

        Self {
            offset,
            err: dx - (dy + dy),
            remaining: dx + 1,
            minus_delta: -(dy + dy),
            plus_delta: dx + dx,
            minus_step: major_step,
            plus_step: minor_step,
        }
    }

    /// Number of offsets left to yield.
    #[inline]
    pub fn count(&self) -> usize {
        self.remaining.max(0) as usize
    }
}

impl Iterator for LineIterator {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.remaining <= 0 {
            return None;
        }
        let out = self.offset as u32;
        self.remaining -= 1;
        if self.err < 0 {
            self.err += self.minus_delta + self.plus_delta;
            self.offset += self.minus_step + self.plus_step;
        } else {
            self.err += self.minus_delta;
            self.offset += self.minus_step;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count(), Some(self.count()))
    }
}

/// Push the one-pixel line `p1`-`p2`.
pub fn write_line(buf: &mut PaintBuffer, width: i32, height: i32, p1: Point, p2: Point) {
    for offset in LineIterator::new(width, height, p1, p2) {
        buf.push(offset);
    }
}

// ============================================================================
// Fixed-point DDA
// ============================================================================

#[inline]
fn put_point(buf: &mut PaintBuffer, x: i32, y: i32, width: i32, height: i32) {
    if 0 <= x && x < width && 0 <= y && y < height {
        buf.push((y * width + x) as u32);
    }
}

/// Stroke the segment between two 16.16 fixed-point endpoints.
///
/// Steps one pixel along the major axis and accumulates the minor axis in
/// fixed point. Every plotted pixel is bounds-checked.
pub fn line_fixed(buf: &mut PaintBuffer, mut p1: Point, mut p2: Point, width: i32, height: i32) {
    let scaled = Point::new(width.saturating_mul(XY_ONE), height.saturating_mul(XY_ONE));
    if !clip_line(scaled, &mut p1, &mut p2) {
        return;
    }

    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let (ax, ay) = (dx.abs(), dy.abs());
    let x_major = ax > ay;

    // Order the endpoints along the major axis.
    if (x_major && dx < 0) || (!x_major && dy < 0) {
        core::mem::swap(&mut p1, &mut p2);
    }
    let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);

    let half = XY_ONE >> 1;
    put_point(
        buf,
        (p2.x + half) >> XY_SHIFT,
        (p2.y + half) >> XY_SHIFT,
        width,
        height,
    );

    let mut x = p1.x + half;
    let mut y = p1.y + half;
    if x_major {
        let y_step = (((dy as i64) << XY_SHIFT) / (ax | 1) as i64) as i32;
        let mut ecount = (p2.x - p1.x) >> XY_SHIFT;
        x >>= XY_SHIFT;
        while ecount >= 0 {
            put_point(buf, x, y >> XY_SHIFT, width, height);
            x += 1;
            y += y_step;
            ecount -= 1;
        }
    } else {
        let x_step = (((dx as i64) << XY_SHIFT) / (ay | 1) as i64) as i32;
        let mut ecount = (p2.y - p1.y) >> XY_SHIFT;
        y >>= XY_SHIFT;
        while ecount >= 0 {
            put_point(buf, x >> XY_SHIFT, y, width, height);
            x += x_step;
            y += 1;
            ecount -= 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
