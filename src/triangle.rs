//! Triangle shape.
//!
//! Aliased painting goes through the convex scan converter, antialiased
//! painting through the analytic edge-distance painter.

use crate::analytic_paint::fill_triangle_aa;
use crate::basics::{RectD, Vec2};
use crate::blend::BlendMode;
use crate::color::Color;
use crate::line_string::LineString;
use crate::paint_buffer::composite;
use crate::rendering_buffer::PaintTarget;
use crate::scan_converter::{paint_line_string, paint_triangle};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Triangle {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Twice the signed area; positive when clockwise on screen.
    pub fn signed_area2(&self) -> f64 {
        (self.p1 - self.p0).cross(self.p2 - self.p0)
    }

    pub fn area(&self) -> f64 {
        self.signed_area2().abs() * 0.5
    }

    pub fn centroid(&self) -> Vec2 {
        Vec2::new(
            (self.p0.x + self.p1.x + self.p2.x) / 3.0,
            (self.p0.y + self.p1.y + self.p2.y) / 3.0,
        )
    }

    pub fn bounding_rect(&self) -> RectD {
        RectD::new(
            self.p0.x.min(self.p1.x).min(self.p2.x),
            self.p0.y.min(self.p1.y).min(self.p2.y),
            self.p0.x.max(self.p1.x).max(self.p2.x),
            self.p0.y.max(self.p1.y).max(self.p2.y),
        )
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        Self::new(self.p0 + v, self.p1 + v, self.p2 + v)
    }

    pub fn paint<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, antialiased: bool) -> &Self {
        self.draw(dst, color, BlendMode::Paint, antialiased)
    }

    pub fn stamp<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, antialiased: bool) -> &Self {
        self.draw(dst, color, BlendMode::Stamp, antialiased)
    }

    pub fn overwrite<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, antialiased: bool) -> &Self {
        self.draw(dst, color, BlendMode::Overwrite, antialiased)
    }

    /// Stroke the three edges as a closed line string of `thickness` pixels.
    pub fn paint_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw_frame(dst, thickness, color, BlendMode::Paint)
    }

    pub fn stamp_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw_frame(dst, thickness, color, BlendMode::Stamp)
    }

    pub fn overwrite_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw_frame(dst, thickness, color, BlendMode::Overwrite)
    }

    fn draw_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color, mode: BlendMode) -> &Self {
        let outline = LineString::new(vec![self.p0, self.p1, self.p2]);
        composite(dst, color, mode, |buf, w, h| paint_line_string(buf, &outline, w, h, thickness, true));
        self
    }

    fn draw<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, mode: BlendMode, antialiased: bool) -> &Self {
        if antialiased {
            let mut rb = dst.rendering_buffer();
            fill_triangle_aa(&mut rb, [self.p0, self.p1, self.p2], color, mode);
        } else {
            composite(dst, color, mode, |buf, w, h| paint_triangle(buf, self, w, h));
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
