//! Circle shape: filled discs and circular frames.

use crate::analytic_paint::{fill_circle, fill_circle_frame};
use crate::basics::{RectD, Vec2};
use crate::blend::BlendMode;
use crate::color::Color;
use crate::rendering_buffer::PaintTarget;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub center: Vec2,
    pub r: f64,
}

impl Circle {
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self {
            center: Vec2::new(x, y),
            r,
        }
    }

    pub const fn from_center(center: Vec2, r: f64) -> Self {
        Self { center, r }
    }

    pub fn area(&self) -> f64 {
        core::f64::consts::PI * self.r * self.r
    }

    pub fn bounding_rect(&self) -> RectD {
        RectD::new(
            self.center.x - self.r,
            self.center.y - self.r,
            self.center.x + self.r,
            self.center.y + self.r,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.center).length_sq() <= self.r * self.r
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        Self::from_center(self.center + v, self.r)
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

    /// Paint a ring extending `inner_thickness` inwards and
    /// `outer_thickness` outwards from the circumference.
    pub fn paint_frame<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        inner_thickness: f64,
        outer_thickness: f64,
        color: Color,
        antialiased: bool,
    ) -> &Self {
        self.draw_frame(dst, inner_thickness, outer_thickness, color, BlendMode::Paint, antialiased)
    }

    pub fn stamp_frame<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        inner_thickness: f64,
        outer_thickness: f64,
        color: Color,
        antialiased: bool,
    ) -> &Self {
        self.draw_frame(dst, inner_thickness, outer_thickness, color, BlendMode::Stamp, antialiased)
    }

    pub fn overwrite_frame<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        inner_thickness: f64,
        outer_thickness: f64,
        color: Color,
        antialiased: bool,
    ) -> &Self {
        self.draw_frame(dst, inner_thickness, outer_thickness, color, BlendMode::Overwrite, antialiased)
    }

    fn draw<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, mode: BlendMode, antialiased: bool) -> &Self {
        let mut rb = dst.rendering_buffer();
        fill_circle(&mut rb, self.center, self.r, color, mode, antialiased);
        self
    }

    fn draw_frame<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        inner_thickness: f64,
        outer_thickness: f64,
        color: Color,
        mode: BlendMode,
        antialiased: bool,
    ) -> &Self {
        let mut rb = dst.rendering_buffer();
        fill_circle_frame(
            &mut rb,
            self.center,
            self.r,
            inner_thickness,
            outer_thickness,
            color,
            mode,
            antialiased,
        );
        self
    }
}
