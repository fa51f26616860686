//! Line and polygon clipping.
//!
//! - [`clip_line`]: Cohen-Sutherland on integer endpoints against the image
//!   box `[0, size.x - 1] x [0, size.y - 1]`. Arithmetic runs in `i64` so
//!   that 16.16 fixed-point endpoints of large images cannot overflow the
//!   interpolation products.
//! - [`clip_segment`]: Liang-Barsky on floating-point endpoints against an
//!   arbitrary box.
//! - [`clip_polygon`]: Sutherland-Hodgman, one box side at a time.
//!
//! The floating-point clippers bring far off-screen geometry into a guard
//! band around the image before it is converted to fixed point.

use crate::basics::{Point, RectD, Vec2};

// ============================================================================
// Outcodes
// ============================================================================

pub const CLIP_LEFT: u32 = 1;
pub const CLIP_RIGHT: u32 = 2;
pub const CLIP_TOP: u32 = 4;
pub const CLIP_BOTTOM: u32 = 8;
pub const CLIP_Y: u32 = CLIP_TOP | CLIP_BOTTOM;

/// Outcode of `(x, y)` against `[0, right] x [0, bottom]`.
///
/// ```text
///   0101 | 0100 | 0110
///  ------+------+------  y = 0
///   0001 | 0000 | 0010
///  ------+------+------  y = bottom
///   1001 | 1000 | 1010
///      x = 0    x = right
/// ```
#[inline]
pub fn outcode(x: i64, y: i64, right: i64, bottom: i64) -> u32 {
    (x < 0) as u32 * CLIP_LEFT
        | (x > right) as u32 * CLIP_RIGHT
        | (y < 0) as u32 * CLIP_TOP
        | (y > bottom) as u32 * CLIP_BOTTOM
}

/// Clip the segment `p1`-`p2` to the image of `size`.
///
/// Endpoints are moved onto the border when the segment crosses it.
/// Returns `false` when nothing of the segment lies inside, or when the
/// image is empty.
pub fn clip_line(size: Point, p1: &mut Point, p2: &mut Point) -> bool {
    if size.x <= 0 || size.y <= 0 {
        return false;
    }
    let right = size.x as i64 - 1;
    let bottom = size.y as i64 - 1;

    let (mut x1, mut y1) = (p1.x as i64, p1.y as i64);
    let (mut x2, mut y2) = (p2.x as i64, p2.y as i64);
    let mut c1 = outcode(x1, y1, right, bottom);
    let mut c2 = outcode(x2, y2, right, bottom);

    if (c1 & c2) == 0 && (c1 | c2) != 0 {
        if c1 & CLIP_Y != 0 {
            let a = if c1 & CLIP_BOTTOM == 0 { 0 } else { bottom };
            x1 += (a - y1) * (x2 - x1) / (y2 - y1);
            y1 = a;
            c1 = outcode(x1, 0, right, bottom);
        }
        if c2 & CLIP_Y != 0 {
            let a = if c2 & CLIP_BOTTOM == 0 { 0 } else { bottom };
            x2 += (a - y2) * (x2 - x1) / (y2 - y1);
            y2 = a;
            c2 = outcode(x2, 0, right, bottom);
        }
        if (c1 & c2) == 0 && (c1 | c2) != 0 {
            if c1 != 0 {
                let a = if c1 == CLIP_LEFT { 0 } else { right };
                y1 += (a - x1) * (y2 - y1) / (x2 - x1);
                x1 = a;
                c1 = 0;
            }
            if c2 != 0 {
                let a = if c2 == CLIP_LEFT { 0 } else { right };
                y2 += (a - x2) * (y2 - y1) / (x2 - x1);
                x2 = a;
                c2 = 0;
            }
        }

        *p1 = Point::new(x1 as i32, y1 as i32);
        *p2 = Point::new(x2 as i32, y2 as i32);
    }

    (c1 | c2) == 0
}

// ============================================================================
// Floating-point clipping
// ============================================================================

/// Box sides in the order the clippers visit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

const SIDES: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

impl Side {
    /// Signed distance of `p` to this side of `clip`, positive inside.
    #[inline]
    fn distance(self, p: Vec2, clip: &RectD) -> f64 {
        match self {
            Side::Left => p.x - clip.x1,
            Side::Right => clip.x2 - p.x,
            Side::Top => p.y - clip.y1,
            Side::Bottom => clip.y2 - p.y,
        }
    }

    /// Put `p` exactly on this side, so clipped points pass
    /// [`RectD::hit_test`] despite rounding.
    #[inline]
    fn snap(self, p: Vec2, clip: &RectD) -> Vec2 {
        match self {
            Side::Left => Vec2::new(clip.x1, p.y),
            Side::Right => Vec2::new(clip.x2, p.y),
            Side::Top => Vec2::new(p.x, clip.y1),
            Side::Bottom => Vec2::new(p.x, clip.y2),
        }
    }
}

#[inline]
fn is_finite(p: Vec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Clip the segment `p1`-`p2` to `clip`, moving the endpoints onto its
/// border. Returns `false` when the segment misses the box or is not finite.
pub fn clip_segment(p1: &mut Vec2, p2: &mut Vec2, clip: &RectD) -> bool {
    if !(is_finite(*p1) && is_finite(*p2)) {
        return false;
    }
    let start = *p1;
    let end = *p2;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let mut enter = None;
    let mut leave = None;

    for side in SIDES {
        let d0 = side.distance(start, clip);
        let d1 = side.distance(end, clip);
        if d0 < 0.0 && d1 < 0.0 {
            return false;
        }
        if d0 < 0.0 {
            let t = d0 / (d0 - d1);
            if t > t0 {
                t0 = t;
                enter = Some(side);
            }
        } else if d1 < 0.0 {
            let t = d0 / (d0 - d1);
            if t < t1 {
                t1 = t;
                leave = Some(side);
            }
        }
    }
    if t0 > t1 {
        return false;
    }

    let d = end - start;
    if let Some(side) = enter {
        *p1 = side.snap(start + d * t0, clip);
    }
    if let Some(side) = leave {
        *p2 = side.snap(start + d * t1, clip);
    }
    true
}

/// Clip a closed ring to `clip`.
///
/// The result may contain edges running along the box border where the
/// ring left and re-entered it; points strictly inside the box keep their
/// even-odd parity. Rings with non-finite coordinates clip to nothing.
pub fn clip_polygon(ring: &[Vec2], clip: &RectD) -> Vec<Vec2> {
    if !ring.iter().all(|&p| is_finite(p)) {
        return Vec::new();
    }
    let mut out = ring.to_vec();
    let mut input = Vec::with_capacity(ring.len() + 4);

    for side in SIDES {
        core::mem::swap(&mut out, &mut input);
        out.clear();
        let Some(&last) = input.last() else {
            break;
        };
        let mut prev = last;
        let mut prev_d = side.distance(prev, clip);
        for &cur in input.iter() {
            let cur_d = side.distance(cur, clip);
            if (prev_d >= 0.0) != (cur_d >= 0.0) {
                let t = prev_d / (prev_d - cur_d);
                out.push(side.snap(prev + (cur - prev) * t, clip));
            }
            if cur_d >= 0.0 {
                out.push(cur);
            }
            prev = cur;
            prev_d = cur_d;
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcode() {
        assert_eq!(outcode(5, 5, 9, 9), 0);
        assert_eq!(outcode(-1, 5, 9, 9), CLIP_LEFT);
        assert_eq!(outcode(10, -1, 9, 9), CLIP_RIGHT | CLIP_TOP);
        assert_eq!(outcode(-3, 12, 9, 9), CLIP_LEFT | CLIP_BOTTOM);
    }

    #[test]
    fn test_inside_untouched() {
        let (mut a, mut b) = (Point::new(1, 2), Point::new(8, 7));
        assert!(clip_line(Point::new(10, 10), &mut a, &mut b));
        assert_eq!((a, b), (Point::new(1, 2), Point::new(8, 7)));
    }

    #[test]
    fn test_fully_outside() {
        let (mut a, mut b) = (Point::new(-5, -5), Point::new(-1, 20));
        assert!(!clip_line(Point::new(10, 10), &mut a, &mut b));
        let (mut a, mut b) = (Point::new(0, 0), Point::new(3, 3));
        assert!(!clip_line(Point::new(0, 10), &mut a, &mut b));
    }

    #[test]
    fn test_horizontal_crossing() {
        let (mut a, mut b) = (Point::new(-10, 4), Point::new(20, 4));
        assert!(clip_line(Point::new(10, 10), &mut a, &mut b));
        assert_eq!(a, Point::new(0, 4));
        assert_eq!(b, Point::new(9, 4));
    }

    #[test]
    fn test_diagonal_crossing() {
        let (mut a, mut b) = (Point::new(-5, -5), Point::new(15, 15));
        assert!(clip_line(Point::new(10, 10), &mut a, &mut b));
        assert_eq!(a, Point::new(0, 0));
        assert_eq!(b, Point::new(9, 9));
    }

    #[test]
    fn test_clip_segment_far_endpoint() {
        let clip = RectD::new(-2.0, -2.0, 12.0, 12.0);
        let (mut a, mut b) = (Vec2::new(0.0, 5.0), Vec2::new(3e9, 5.0));
        assert!(clip_segment(&mut a, &mut b, &clip));
        assert_eq!(a, Vec2::new(0.0, 5.0));
        assert_eq!(b, Vec2::new(12.0, 5.0));

        // Both ends far away on opposite sides.
        let (mut a, mut b) = (Vec2::new(-1e12, -1e12), Vec2::new(1e12, 1e12));
        assert!(clip_segment(&mut a, &mut b, &clip));
        assert!((a.x + 2.0).abs() < 1e-3 && (a.y + 2.0).abs() < 1e-3);
        assert!((b.x - 12.0).abs() < 1e-3 && (b.y - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_clip_segment_misses_and_rejects_nan() {
        let clip = RectD::new(0.0, 0.0, 10.0, 10.0);
        let (mut a, mut b) = (Vec2::new(-5.0, 20.0), Vec2::new(20.0, 20.0));
        assert!(!clip_segment(&mut a, &mut b, &clip));
        let (mut a, mut b) = (Vec2::new(f64::NAN, 1.0), Vec2::new(5.0, 5.0));
        assert!(!clip_segment(&mut a, &mut b, &clip));
        let (mut a, mut b) = (Vec2::new(1.0, 1.0), Vec2::new(4.0, 6.0));
        assert!(clip_segment(&mut a, &mut b, &clip));
        assert_eq!((a, b), (Vec2::new(1.0, 1.0), Vec2::new(4.0, 6.0)));
    }

    #[test]
    fn test_clip_polygon_far_vertex() {
        let clip = RectD::new(-2.0, -2.0, 102.0, 102.0);
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(40000.0, 0.0), Vec2::new(0.0, 50.0)];
        let out = clip_polygon(&tri, &clip);
        assert!(out.iter().all(|p| clip.hit_test(p.x, p.y)));
        let area = crate::polygon::signed_area(&out).abs();
        // The part of the triangle with x <= 102 is a trapezoid.
        let y_at = 50.0 * (1.0 - 102.0 / 40000.0);
        let expected = (50.0 + y_at) * 0.5 * 102.0;
        assert!((area - expected).abs() < 1e-6, "{} vs {}", area, expected);
    }

    #[test]
    fn test_clip_polygon_inside_and_outside() {
        let clip = RectD::new(0.0, 0.0, 10.0, 10.0);
        let sq = [
            Vec2::new(1.0, 1.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(1.0, 4.0),
        ];
        assert_eq!(clip_polygon(&sq, &clip), sq.to_vec());
        let far: Vec<Vec2> = sq.iter().map(|p| Vec2::new(p.x + 50.0, p.y)).collect();
        assert!(clip_polygon(&far, &clip).is_empty());
        assert!(clip_polygon(&[Vec2::new(f64::INFINITY, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0)], &clip).is_empty());
    }
}
