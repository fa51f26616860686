//! Axis-aligned integer rectangle shape, painted row by row.

use crate::basics::{Rect, RectI, Vec2};
use crate::blend::{blend_pixel, BlendMode};
use crate::color::Color;
use crate::rendering_buffer::PaintTarget;

/// `w x h` pixels with the top-left corner at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> i64 {
        self.w.max(0) as i64 * self.h.max(0) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f64 + self.w as f64 * 0.5, self.y as f64 + self.h as f64 * 0.5)
    }

    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.w, self.h)
    }

    /// Inclusive corner form, `None` when empty. Corners past `i32::MAX`
    /// are clamped.
    pub fn to_rect_i(&self) -> Option<RectI> {
        if self.is_empty() {
            return None;
        }
        let last = |start: i32, len: i32| (start as i64 + len as i64 - 1).min(i32::MAX as i64) as i32;
        Some(RectI::new(self.x, self.y, last(self.x, self.w), last(self.y, self.h)))
    }

    pub fn paint<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        self.draw(dst, color, BlendMode::Paint)
    }

    pub fn stamp<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        self.draw(dst, color, BlendMode::Stamp)
    }

    pub fn overwrite<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        self.draw(dst, color, BlendMode::Overwrite)
    }

    /// Paint a border `inner` pixels into the rectangle and `outer` pixels
    /// out of it, as four non-overlapping bands.
    pub fn paint_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, inner: i32, outer: i32, color: Color) -> &Self {
        self.draw_frame(dst, inner, outer, color, BlendMode::Paint)
    }

    pub fn stamp_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, inner: i32, outer: i32, color: Color) -> &Self {
        self.draw_frame(dst, inner, outer, color, BlendMode::Stamp)
    }

    pub fn overwrite_frame<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        inner: i32,
        outer: i32,
        color: Color,
    ) -> &Self {
        self.draw_frame(dst, inner, outer, color, BlendMode::Overwrite)
    }

    fn draw<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, mode: BlendMode) -> &Self {
        if !self.is_empty() {
            let (x, y) = (self.x as i64, self.y as i64);
            fill_region(dst, [x, y, x + self.w as i64, y + self.h as i64], color, mode);
        }
        self
    }

    fn draw_frame<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        inner: i32,
        outer: i32,
        color: Color,
        mode: BlendMode,
    ) -> &Self {
        if self.is_empty() {
            return self;
        }
        let (inner, outer) = (inner as i64, outer as i64);
        let (x, y, w, h) = (self.x as i64, self.y as i64, self.w as i64, self.h as i64);
        let (x0, x1, x2, x3) = (x - outer, x + inner, x + w - inner, x + w + outer);
        let (y0, y1, y2, y3) = (y - outer, y + inner, y + h - inner, y + h + outer);

        fill_region(dst, [x0, y0, x3, y1], color, mode);
        fill_region(dst, [x0, y1, x1, y2], color, mode);
        fill_region(dst, [x2, y1, x3, y2], color, mode);
        fill_region(dst, [x0, y2, x3, y3], color, mode);
        self
    }
}

/// Composite the half-open region `[x0, x1) x [y0, y1)`, clipped to the
/// destination. Empty or inverted regions paint nothing.
fn fill_region<T: PaintTarget + ?Sized>(dst: &mut T, [x0, y0, x1, y1]: [i64; 4], color: Color, mode: BlendMode) {
    let mut rb = dst.rendering_buffer();
    let bounds = Rect::new(0, 0, rb.width() as i64 - 1, rb.height() as i64 - 1);
    let mut r = Rect::new(x0, y0, x1 - 1, y1 - 1);
    if !r.is_valid() || !r.clip(&bounds) {
        return;
    }
    for y in r.y1..=r.y2 {
        let row = &mut rb.row_mut(y as u32)[r.x1 as usize..=r.x2 as usize];
        if mode == BlendMode::Overwrite {
            row.fill(color);
        } else {
            row.iter_mut().for_each(|px| blend_pixel(px, color, mode));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering_buffer::RenderingBuffer;

    #[test]
    fn test_clipped_fill() {
        let mut px = vec![Color::TRANSPARENT; 25];
        let mut rb = RenderingBuffer::packed(&mut px, 5, 5).unwrap();
        Rectangle::new(3, -2, 10, 4).overwrite(&mut rb, Color::WHITE);
        drop(rb);
        let white = px.iter().filter(|c| **c == Color::WHITE).count();
        assert_eq!(white, 2 * 2);
        assert_eq!(px[3], Color::WHITE);
        assert_eq!(px[5 + 4], Color::WHITE);
        assert_eq!(px[2 * 5 + 3], Color::TRANSPARENT);
    }

    #[test]
    fn test_paint_preserves_alpha() {
        let mut px = vec![Color::new(0, 0, 0, 77); 16];
        let mut rb = RenderingBuffer::packed(&mut px, 4, 4).unwrap();
        Rectangle::new(0, 0, 4, 4).paint(&mut rb, Color::new(200, 100, 50, 255));
        assert_eq!(rb.pixel(1, 1), Color::new(200, 100, 50, 77));
    }

    #[test]
    fn test_empty_and_outside() {
        let mut px = vec![Color::BLACK; 16];
        let mut rb = RenderingBuffer::packed(&mut px, 4, 4).unwrap();
        Rectangle::new(1, 1, 0, 3).overwrite(&mut rb, Color::WHITE);
        Rectangle::new(10, 10, 3, 3).overwrite(&mut rb, Color::WHITE);
        Rectangle::new(-5, 0, 5, 3).overwrite(&mut rb, Color::WHITE);
        drop(rb);
        assert!(px.iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_corners_near_i32_max() {
        let r = Rectangle::new(i32::MAX - 1, 0, 10, 10);
        assert_eq!(r.to_rect_i(), Some(RectI::new(i32::MAX - 1, 0, i32::MAX, 9)));
        assert_eq!(r.moved_by(5, 0).x, i32::MAX);
        assert_eq!(Rectangle::new(i32::MIN, 0, 1, 1).moved_by(-1, 0).x, i32::MIN);

        let mut px = vec![Color::BLACK; 16];
        let mut rb = RenderingBuffer::packed(&mut px, 4, 4).unwrap();
        r.overwrite(&mut rb, Color::WHITE);
        Rectangle::new(0, i32::MAX, i32::MAX, i32::MAX).paint(&mut rb, Color::WHITE);
        drop(rb);
        assert!(px.iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_reaching_across_the_i32_range() {
        let mut px = vec![Color::BLACK; 16];
        let mut rb = RenderingBuffer::packed(&mut px, 4, 4).unwrap();
        Rectangle::new(i32::MIN, 1, i32::MAX, 2).overwrite(&mut rb, Color::WHITE);
        Rectangle::new(-10, 1, i32::MAX, 2).overwrite(&mut rb, Color::WHITE);
        drop(rb);
        let white = px.iter().filter(|c| **c == Color::WHITE).count();
        assert_eq!(white, 4 * 2);
        assert_eq!(px[4], Color::WHITE);
        assert_eq!(px[0], Color::BLACK);
    }

    fn frame_mask(inner: i32, outer: i32) -> Vec<bool> {
        let mut px = vec![Color::TRANSPARENT; 100];
        let mut rb = RenderingBuffer::packed(&mut px, 10, 10).unwrap();
        Rectangle::new(2, 2, 6, 6).overwrite_frame(&mut rb, inner, outer, Color::WHITE);
        drop(rb);
        px.iter().map(|c| *c == Color::WHITE).collect()
    }

    #[test]
    fn test_frame_bands() {
        // Inner only: the ring of the 6x6 rectangle.
        let m = frame_mask(1, 0);
        assert_eq!(m.iter().filter(|&&b| b).count(), 20);
        assert!(m[2 * 10 + 2] && m[7 * 10 + 7] && m[2 * 10 + 7]);
        assert!(!m[3 * 10 + 3] && !m[10 + 1]);

        // Inner and outer: from (1, 1) to (8, 8), 8x8 minus a 4x4 hole.
        let m = frame_mask(1, 1);
        assert_eq!(m.iter().filter(|&&b| b).count(), 64 - 16);
        assert!(m[10 + 1] && m[8 * 10 + 8]);
        assert!(!m[4 * 10 + 4] && !m[0]);
    }

    #[test]
    fn test_paint_frame_blends_each_pixel_once() {
        let mut px = vec![Color::new(0, 0, 0, 255); 100];
        let mut rb = RenderingBuffer::packed(&mut px, 10, 10).unwrap();
        let color = Color::new(255, 255, 255, 128);
        Rectangle::new(2, 2, 6, 6).paint_frame(&mut rb, 2, 2, color);
        let corner = rb.pixel(0, 0);
        assert_eq!(rb.pixel(9, 9), corner);
        assert_eq!(rb.pixel(3, 0), corner);
        assert_eq!(rb.pixel(0, 5), corner);
        assert_eq!(rb.pixel(5, 5), Color::new(0, 0, 0, 255));
        assert_ne!(corner, Color::new(0, 0, 0, 255));
    }

    #[test]
    fn test_frame_far_off_screen() {
        let mut px = vec![Color::BLACK; 16];
        let mut rb = RenderingBuffer::packed(&mut px, 4, 4).unwrap();
        Rectangle::new(i32::MAX - 1, i32::MAX - 1, 10, 10).overwrite_frame(&mut rb, 3, i32::MAX, Color::WHITE);
        Rectangle::new(1, 1, 0, 2).overwrite_frame(&mut rb, 1, 1, Color::WHITE);
        drop(rb);
        // The outer band of the first rectangle reaches back over the image.
        assert!(px.iter().all(|c| *c == Color::WHITE));
    }
}
