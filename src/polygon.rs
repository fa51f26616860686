//! Polygon with holes.
//!
//! The outer ring is kept clockwise on screen (positive shoelace area with
//! y pointing down) and holes counter-clockwise. A triangulation and the
//! bounding box are cached and kept current across every mutation.

use crate::basics::{Point, RectD, Vec2};
use crate::blend::BlendMode;
use crate::clip_line::clip_polygon;
use crate::color::Color;
use crate::edge_fill::paint_polygon;
use crate::paint_buffer::composite;
use crate::polygon_correct;
use crate::rendering_buffer::PaintTarget;

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    outer: Vec<Vec2>,
    holes: Vec<Vec<Vec2>>,
    triangles: Vec<[u32; 3]>,
    bounding_rect: RectD,
}

impl Default for Polygon {
    fn default() -> Self {
        Self {
            outer: Vec::new(),
            holes: Vec::new(),
            triangles: Vec::new(),
            bounding_rect: RectD::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

impl Polygon {
    pub fn new(outer: Vec<Vec2>) -> Self {
        Self::with_holes(outer, Vec::new())
    }

    /// Build from rings that are already simple and correctly oriented.
    /// Use [`Polygon::correct`] for raw input.
    pub fn with_holes(outer: Vec<Vec2>, holes: Vec<Vec<Vec2>>) -> Self {
        if outer.len() < 3 {
            return Self::default();
        }
        let mut polygon = Self {
            outer,
            holes,
            triangles: Vec::new(),
            bounding_rect: RectD::new(0.0, 0.0, 0.0, 0.0),
        };
        polygon.triangulate();
        polygon.update_bounding_rect();
        polygon
    }

    /// Repair arbitrary rings into zero or more valid polygons.
    pub fn correct(outer: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<Polygon> {
        polygon_correct::correct(outer, holes)
    }

    #[inline]
    pub fn outer(&self) -> &[Vec2] {
        &self.outer
    }

    #[inline]
    pub fn holes(&self) -> &[Vec<Vec2>] {
        &self.holes
    }

    /// Triangle indices into the concatenation of the outer ring and holes.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn bounding_rect(&self) -> RectD {
        self.bounding_rect
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    pub fn num_vertices(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Vertex `i` of the outer ring followed by the hole rings.
    pub fn vertex(&self, i: usize) -> Option<Vec2> {
        if i < self.outer.len() {
            return Some(self.outer[i]);
        }
        let mut i = i - self.outer.len();
        for hole in &self.holes {
            if i < hole.len() {
                return Some(hole[i]);
            }
            i -= hole.len();
        }
        None
    }

    /// Outer area minus hole areas.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        signed_area(&self.outer).abs() - holes
    }

    /// Even-odd containment over all rings.
    pub fn contains(&self, p: Vec2) -> bool {
        ring_contains(&self.outer, p) && !self.holes.iter().any(|h| ring_contains(h, p))
    }

    pub fn move_by(&mut self, v: Vec2) -> &mut Self {
        for p in self.rings_mut() {
            *p = *p + v;
        }
        self.update_bounding_rect();
        self
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        let mut p = self.clone();
        p.move_by(v);
        p
    }

    /// Scale about the origin. A non-positive factor yields an empty polygon.
    pub fn scale(&mut self, s: f64) -> &mut Self {
        if !(s > 0.0) {
            *self = Self::default();
            return self;
        }
        for p in self.rings_mut() {
            *p = *p * s;
        }
        self.update_bounding_rect();
        self
    }

    pub fn scaled(&self, s: f64) -> Self {
        let mut p = self.clone();
        p.scale(s);
        p
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
        if self.is_empty() {
            return self;
        }
        composite(dst, color, mode, |buf, w, h| {
            let rings: Vec<Vec<Point>> = core::iter::once(&self.outer)
                .chain(self.holes.iter())
                .map(|ring| pixel_ring(ring, w, h))
                .collect();
            let contours: Vec<&[Point]> = rings.iter().map(Vec::as_slice).collect();
            paint_polygon(buf, &contours, w, h);
        });
        self
    }

    // ------------------------------------------------------------------------

    fn rings_mut(&mut self) -> impl Iterator<Item = &mut Vec2> {
        self.outer
            .iter_mut()
            .chain(self.holes.iter_mut().flatten())
    }

    fn update_bounding_rect(&mut self) {
        self.bounding_rect = RectD::bounding(&self.outer).unwrap_or(RectD::new(0.0, 0.0, 0.0, 0.0));
    }

    fn triangulate(&mut self) {
        let mut coords = Vec::with_capacity(self.num_vertices() * 2);
        let mut hole_starts = Vec::with_capacity(self.holes.len());
        for p in &self.outer {
            coords.extend([p.x, p.y]);
        }
        for hole in &self.holes {
            hole_starts.push(coords.len() / 2);
            for p in hole {
                coords.extend([p.x, p.y]);
            }
        }
        self.triangles = match earcutr::earcut(&coords, &hole_starts, 2) {
            Ok(idx) => idx
                .chunks_exact(3)
                .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
                .collect(),
            Err(e) => {
                log::trace!("triangulation failed: {:?}", e);
                Vec::new()
            }
        };
    }
}

// ============================================================================
// Ring helpers
// ============================================================================

/// Shoelace area, positive for clockwise rings on a y-down screen.
pub fn signed_area(ring: &[Vec2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = n - 1;
    for i in 0..n {
        sum += ring[j].cross(ring[i]);
        j = i;
    }
    sum * 0.5
}

/// Even-odd point-in-ring test.
pub fn ring_contains(ring: &[Vec2], p: Vec2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Ring in pixel coordinates for the edge filler. Rings beyond the `i32`
/// range are cut to a band around the `width x height` image first, which
/// keeps the even-odd fill of every visible pixel.
fn pixel_ring(ring: &[Vec2], width: i32, height: i32) -> Vec<Point> {
    const LIMIT: f64 = (1u32 << 30) as f64;
    let in_range = |p: &Vec2| p.x.abs() < LIMIT && p.y.abs() < LIMIT;
    if ring.iter().all(in_range) {
        return ring.iter().map(|p| p.as_point()).collect();
    }
    let guard = RectD::new(-2.0, -2.0, width as f64 + 2.0, height as f64 + 2.0);
    clip_polygon(ring, &guard)
        .iter()
        .map(|p| p.as_point())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
