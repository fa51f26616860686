//! Axis-aligned ellipse shape.

use crate::analytic_paint::fill_ellipse;
use crate::basics::{RectD, Vec2};
use crate::blend::BlendMode;
use crate::color::Color;
use crate::rendering_buffer::PaintTarget;

/// Ellipse with semi-axes `a` (horizontal) and `b` (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ellipse {
    pub center: Vec2,
    pub a: f64,
    pub b: f64,
}

impl Ellipse {
    pub const fn new(x: f64, y: f64, a: f64, b: f64) -> Self {
        Self {
            center: Vec2::new(x, y),
            a,
            b,
        }
    }

    pub fn area(&self) -> f64 {
        core::f64::consts::PI * self.a * self.b
    }

    pub fn bounding_rect(&self) -> RectD {
        RectD::new(
            self.center.x - self.a,
            self.center.y - self.b,
            self.center.x + self.a,
            self.center.y + self.b,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        if !(self.a > 0.0 && self.b > 0.0) {
            return false;
        }
        let d = p - self.center;
        (d.x / self.a) * (d.x / self.a) + (d.y / self.b) * (d.y / self.b) <= 1.0
    }

    /// Boundary approximated by a regular polygon, clockwise on screen.
    ///
    /// With `num_steps == 0` the step count is derived from the radii so
    /// that chords stay within a quarter pixel of the true curve.
    pub fn vertices(&self, num_steps: u32) -> Vec<Vec2> {
        let num = if num_steps > 0 {
            num_steps
        } else {
            let ra = (self.a.abs() + self.b.abs()) / 2.0;
            let da = (ra / (ra + 0.125)).acos() * 2.0;
            if da.is_finite() && da > 0.0 {
                ((2.0 * core::f64::consts::PI / da).round() as u32).max(4)
            } else {
                4
            }
        };
        (0..num)
            .map(|i| {
                let angle = i as f64 / num as f64 * 2.0 * core::f64::consts::PI;
                Vec2::new(
                    self.center.x + angle.cos() * self.a,
                    self.center.y + angle.sin() * self.b,
                )
            })
            .collect()
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

    fn draw<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, mode: BlendMode, antialiased: bool) -> &Self {
        let mut rb = dst.rendering_buffer();
        fill_ellipse(&mut rb, self.center, self.a, self.b, color, mode, antialiased);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering_buffer::RenderingBuffer;

    #[test]
    fn test_contains() {
        let e = Ellipse::new(0.0, 0.0, 4.0, 2.0);
        assert!(e.contains(Vec2::new(4.0, 0.0)));
        assert!(!e.contains(Vec2::new(0.0, 3.0)));
        assert!(!Ellipse::new(0.0, 0.0, 0.0, 2.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_vertices() {
        let e = Ellipse::new(10.0, 10.0, 5.0, 3.0);
        let v = e.vertices(8);
        assert_eq!(v.len(), 8);
        assert!((v[0].x - 15.0).abs() < 1e-9);
        assert!((v[2].y - 13.0).abs() < 1e-9);
        assert!(e.vertices(0).len() >= 4);
    }

    #[test]
    fn test_paint_circle_equivalent() {
        let mut a = vec![Color::TRANSPARENT; 144];
        let mut b = vec![Color::TRANSPARENT; 144];
        Ellipse::new(6.0, 6.0, 4.0, 4.0).overwrite(
            &mut RenderingBuffer::packed(&mut a, 12, 12).unwrap(),
            Color::WHITE,
            false,
        );
        crate::circle::Circle::new(6.0, 6.0, 4.0).overwrite(
            &mut RenderingBuffer::packed(&mut b, 12, 12).unwrap(),
            Color::WHITE,
            false,
        );
        assert_eq!(a, b);
    }
}
