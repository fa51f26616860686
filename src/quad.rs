//! Convex quadrilateral shape.

use crate::basics::{RectD, Vec2};
use crate::blend::BlendMode;
use crate::color::Color;
use crate::paint_buffer::composite;
use crate::rendering_buffer::PaintTarget;
use crate::scan_converter::paint_quad;

/// Four corners in drawing order. Painting assumes the quad is convex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quad {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl Quad {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn area(&self) -> f64 {
        ((self.p2 - self.p0).cross(self.p3 - self.p1) * 0.5).abs()
    }

    pub fn bounding_rect(&self) -> RectD {
        let pts = [self.p0, self.p1, self.p2, self.p3];
        let mut r = RectD::new(pts[0].x, pts[0].y, pts[0].x, pts[0].y);
        for p in &pts[1..] {
            r.add_point(p.x, p.y);
        }
        r
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        Self::new(self.p0 + v, self.p1 + v, self.p2 + v, self.p3 + v)
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

    fn draw<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color, mode: BlendMode) -> &Self {
        composite(dst, color, mode, |buf, w, h| paint_quad(buf, self, w, h));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering_buffer::RenderingBuffer;

    #[test]
    fn test_area_and_bounds() {
        let q = Quad::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 3.0),
            Vec2::new(0.0, 3.0),
        );
        assert_eq!(q.area(), 12.0);
        let b = q.moved_by(Vec2::new(1.0, 1.0)).bounding_rect();
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (1.0, 1.0, 5.0, 4.0));
    }

    #[test]
    fn test_stamp_onto_transparent() {
        let mut px = vec![Color::TRANSPARENT; 64];
        let mut rb = RenderingBuffer::packed(&mut px, 8, 8).unwrap();
        let q = Quad::new(
            Vec2::new(2.0, 2.0),
            Vec2::new(5.0, 2.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(2.0, 5.0),
        );
        let c = Color::new(10, 20, 30, 40);
        q.stamp(&mut rb, c);
        assert_eq!(rb.pixel(3, 3), c);
        assert_eq!(rb.pixel(6, 6), Color::TRANSPARENT);
    }
}
