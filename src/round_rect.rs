//! Rectangle with rounded corners.
//!
//! Painting goes through the polygon filler: each corner becomes a fan of
//! arc vertices whose count grows with the radius.

use core::f64::consts::FRAC_PI_2;

use crate::basics::{RectD, Vec2};
use crate::color::Color;
use crate::line_string::LineString;
use crate::polygon::Polygon;
use crate::rendering_buffer::PaintTarget;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub r: f64,
}

/// Vertices per quarter arc.
fn fan_quality(r: f64) -> usize {
    if r <= 1.0 {
        3
    } else if r <= 6.0 {
        5
    } else if r <= 12.0 {
        8
    } else {
        (r * 0.2 + 6.0).min(64.0) as usize
    }
}

impl RoundRect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64, r: f64) -> Self {
        Self { x, y, w, h, r }
    }

    /// Corner radius actually used: at most half of either side.
    pub fn effective_radius(&self) -> f64 {
        (self.w * 0.5).min(self.h * 0.5).min(self.r.max(0.0))
    }

    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    pub fn bounding_rect(&self) -> RectD {
        RectD::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.w, self.h, self.r)
    }

    /// Clockwise outline grown by `offset` on every side.
    ///
    /// Arcs meeting at the middle of a side share their end vertex, and
    /// repeated vertices of a zero radius are dropped.
    pub fn outline(&self, offset: f64) -> Vec<Vec2> {
        let rr = self.effective_radius() + offset;
        let quality = fan_quality(rr);
        let step = FRAC_PI_2 / (quality - 1) as f64;
        let fan: Vec<Vec2> = (0..quality)
            .map(|i| {
                let (s, c) = (step * i as f64).sin_cos();
                Vec2::new(rr * s, -rr * c)
            })
            .collect();

        let unite_v = usize::from(self.h * 0.5 == rr);
        let unite_h = usize::from(self.w * 0.5 == rr);
        let (left, right) = (self.x + rr - offset, self.x + self.w - rr + offset);
        let (top, bottom) = (self.y + rr - offset, self.y + self.h - rr + offset);

        let mut out = Vec::with_capacity(quality * 4);
        out.extend(fan[..quality - unite_v].iter().map(|f| Vec2::new(right + f.x, top + f.y)));
        out.extend(fan.iter().rev().take(quality - unite_h).map(|f| Vec2::new(right + f.x, bottom - f.y)));
        out.extend(fan[..quality - unite_v].iter().map(|f| Vec2::new(left - f.x, bottom - f.y)));
        out.extend(fan.iter().rev().take(quality - unite_h).map(|f| Vec2::new(left - f.x, top + f.y)));

        out.dedup();
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }

    pub fn as_polygon(&self) -> Polygon {
        if self.is_empty() {
            return Polygon::default();
        }
        Polygon::new(self.outline(0.0))
    }

    pub fn paint<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        self.as_polygon().paint(dst, color);
        self
    }

    pub fn stamp<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        self.as_polygon().stamp(dst, color);
        self
    }

    pub fn overwrite<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        self.as_polygon().overwrite(dst, color);
        self
    }

    /// Stroke a border reaching `inner` pixels into the shape and `outer`
    /// pixels out of it.
    pub fn paint_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, inner: i32, outer: i32, color: Color) -> &Self {
        if let Some((ring, thickness)) = self.frame_ring(inner, outer) {
            ring.paint_closed(dst, thickness, color);
        }
        self
    }

    pub fn stamp_frame<T: PaintTarget + ?Sized>(&self, dst: &mut T, inner: i32, outer: i32, color: Color) -> &Self {
        if let Some((ring, thickness)) = self.frame_ring(inner, outer) {
            ring.stamp_closed(dst, thickness, color);
        }
        self
    }

    pub fn overwrite_frame<T: PaintTarget + ?Sized>(
        &self,
        dst: &mut T,
        inner: i32,
        outer: i32,
        color: Color,
    ) -> &Self {
        if let Some((ring, thickness)) = self.frame_ring(inner, outer) {
            ring.overwrite_closed(dst, thickness, color);
        }
        self
    }

    fn frame_ring(&self, inner: i32, outer: i32) -> Option<(LineString, i32)> {
        let thickness = inner.saturating_add(outer);
        if self.is_empty() || thickness <= 0 {
            return None;
        }
        let offset = (outer as f64 - inner as f64) * 0.5;
        Some((LineString::new(self.outline(offset)), thickness))
    }
}

// ============================================================================
// Tests
// ============================================================================
