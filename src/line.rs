//! Line segment shape.

use crate::basics::Vec2;
use crate::blend::BlendMode;
use crate::color::Color;
use crate::paint_buffer::composite;
use crate::rendering_buffer::PaintTarget;
use crate::scan_converter::{paint_arrow, paint_line};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub begin: Vec2,
    pub end: Vec2,
}

impl Line {
    pub const fn new(begin: Vec2, end: Vec2) -> Self {
        Self { begin, end }
    }

    pub fn length(&self) -> f64 {
        self.begin.distance_from(self.end)
    }

    pub fn vector(&self) -> Vec2 {
        self.end - self.begin
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.begin)
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        Self::new(self.begin + v, self.end + v)
    }

    /// Paint a `thickness`-pixel wide line with round caps.
    pub fn paint<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Paint)
    }

    pub fn stamp<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Stamp)
    }

    pub fn overwrite<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Overwrite)
    }

    /// Paint the line as an arrow pointing at `end`. `head_size` is the
    /// width and the length of the triangular head.
    pub fn paint_arrow<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        thickness: i32,
        head_size: Vec2,
        color: Color,
    ) -> &Self {
        self.draw_arrow(dst, thickness, head_size, color, BlendMode::Paint)
    }

    pub fn stamp_arrow<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        thickness: i32,
        head_size: Vec2,
        color: Color,
    ) -> &Self {
        self.draw_arrow(dst, thickness, head_size, color, BlendMode::Stamp)
    }

    pub fn overwrite_arrow<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        thickness: i32,
        head_size: Vec2,
        color: Color,
    ) -> &Self {
        self.draw_arrow(dst, thickness, head_size, color, BlendMode::Overwrite)
    }

    fn draw<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color, mode: BlendMode) -> &Self {
        composite(dst, color, mode, |buf, w, h| paint_line(buf, self, w, h, thickness));
        self
    }

    fn draw_arrow<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        thickness: i32,
        head_size: Vec2,
        color: Color,
        mode: BlendMode,
    ) -> &Self {
        composite(dst, color, mode, |buf, w, h| paint_arrow(buf, self, w, h, thickness, head_size));
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
