//! Open or closed polyline.

use crate::basics::{RectD, Vec2};
use crate::blend::BlendMode;
use crate::color::Color;
use crate::paint_buffer::composite;
use crate::rendering_buffer::PaintTarget;
use crate::scan_converter::paint_line_string;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    points: Vec<Vec2>,
}

impl LineString {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn push(&mut self, p: Vec2) {
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_rect(&self) -> Option<RectD> {
        RectD::bounding(&self.points)
    }

    /// Total length of the open polyline.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_from(w[1]))
            .sum()
    }

    pub fn paint<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Paint, false)
    }

    pub fn stamp<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Stamp, false)
    }

    pub fn overwrite<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Overwrite, false)
    }

    /// Paint with a closing segment from the last point back to the first.
    pub fn paint_closed<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Paint, true)
    }

    pub fn stamp_closed<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Stamp, true)
    }

    pub fn overwrite_closed<T: PaintTarget + ?Sized>(&self, dst: &mut T, thickness: i32, color: Color) -> &Self {
        self.draw(dst, thickness, color, BlendMode::Overwrite, true)
    }

    fn draw<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        thickness: i32,
        color: Color,
        mode: BlendMode,
        closed: bool,
    ) -> &Self {
        if self.points.is_empty() {
            return self;
        }
        composite(dst, color, mode, |buf, w, h| {
            paint_line_string(buf, self, w, h, thickness, closed)
        });
        self
    }
}

impl From<Vec<Vec2>> for LineString {
    fn from(points: Vec<Vec2>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Vec2> for LineString {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
