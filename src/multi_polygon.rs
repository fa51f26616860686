//! Collection of polygons.

use crate::basics::{RectD, Vec2};
use crate::color::Color;
use crate::polygon::Polygon;
use crate::rendering_buffer::PaintTarget;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    pub fn as_slice(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn into_vec(self) -> Vec<Polygon> {
        self.polygons
    }

    pub fn push(&mut self, p: Polygon) {
        self.polygons.push(p);
    }

    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }

    pub fn bounding_rect(&self) -> Option<RectD> {
        let mut it = self.polygons.iter().filter(|p| !p.is_empty());
        let mut r = it.next()?.bounding_rect();
        for p in it {
            let b = p.bounding_rect();
            r.add_point(b.x1, b.y1);
            r.add_point(b.x2, b.y2);
        }
        Some(r)
    }

    /// The polygon with the largest area; the first one on ties.
    pub fn largest(&self) -> Option<&Polygon> {
        let mut best: Option<(&Polygon, f64)> = None;
        for p in &self.polygons {
            let a = p.area();
            if best.map_or(true, |(_, b)| a > b) {
                best = Some((p, a));
            }
        }
        best.map(|(p, _)| p)
    }

    pub fn move_by(&mut self, v: Vec2) -> &mut Self {
        for p in &mut self.polygons {
            p.move_by(v);
        }
        self
    }

    pub fn moved_by(&self, v: Vec2) -> Self {
        let mut m = self.clone();
        m.move_by(v);
        m
    }

    pub fn scale(&mut self, s: f64) -> &mut Self {
        for p in &mut self.polygons {
            p.scale(s);
        }
        self
    }

    pub fn scaled(&self, s: f64) -> Self {
        let mut m = self.clone();
        m.scale(s);
        m
    }

    pub fn paint<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        for p in &self.polygons {
            p.paint(&mut *dst, color);
        }
        self
    }

    pub fn stamp<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        for p in &self.polygons {
            p.stamp(&mut *dst, color);
        }
        self
    }

    pub fn overwrite<T: PaintTarget + ?Sized>(&self, dst: &mut T, color: Color) -> &Self {
        for p in &self.polygons {
            p.overwrite(&mut *dst, color);
        }
        self
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self::new(polygons)
    }
}

impl FromIterator<Polygon> for MultiPolygon {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for MultiPolygon {
    type Item = Polygon;
    type IntoIter = std::vec::IntoIter<Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiPolygon {
    type Item = &'a Polygon;
    type IntoIter = core::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, s: f64) -> Polygon {
        Polygon::new(vec![
            Vec2::new(x, y),
            Vec2::new(x + s, y),
            Vec2::new(x + s, y + s),
            Vec2::new(x, y + s),
        ])
    }

    #[test]
    fn test_largest_first_on_ties() {
        let m: MultiPolygon = [square(0.0, 0.0, 2.0), square(10.0, 0.0, 3.0), square(20.0, 0.0, 3.0)]
            .into_iter()
            .collect();
        let l = m.largest().unwrap();
        assert_eq!(l.outer()[0], Vec2::new(10.0, 0.0));
        assert!(MultiPolygon::default().largest().is_none());
    }

    #[test]
    fn test_bounds_and_transform() {
        let m = MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(4.0, 4.0, 2.0)]);
        let b = m.moved_by(Vec2::new(-1.0, -1.0)).bounding_rect().unwrap();
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (-1.0, -1.0, 5.0, 5.0));
        assert_eq!(m.scaled(0.5).area(), 2.0);
    }
}
