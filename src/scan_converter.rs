//! Fixed-point scan converter.
//!
//! Rasterizes circles, convex polygons, thick lines and polylines into a
//! [`PaintBuffer`] using integer and 16.16 fixed-point arithmetic only, so
//! adjacent primitives share pixels without floating-point seams.
//!
//! All routines clip silently to `[0, width) x [0, height)`. Degenerate
//! geometry produces no offsets. Geometry reaching beyond a small guard band
//! around the image is clipped in floating point before it is converted to
//! fixed point, so any `i32` or finite `f64` coordinate is accepted.

use crate::basics::{Point, RectD, Vec2, XY_ONE, XY_SHIFT};
use crate::clip_line::{clip_polygon, clip_segment};
use crate::dda_line::{line_fixed, write_line};
use crate::line::Line;
use crate::line_string::LineString;
use crate::paint_buffer::PaintBuffer;
use crate::quad::Quad;
use crate::triangle::Triangle;

/// Round cap at the first endpoint of a segment.
pub const CAP_START: u32 = 1;
/// Round cap at the second endpoint of a segment.
pub const CAP_END: u32 = 2;

/// Largest pixel coordinate that still fits 16.16 in an `i32` with room
/// for rounding.
const FIXED_LIMIT: f64 = ((1 << (31 - XY_SHIFT)) - 2) as f64;

/// Distance kept between the image and a guard band cut.
const GUARD_MARGIN: f64 = 2.0;

/// Image box grown by `margin` on every side.
fn guard_rect(width: i32, height: i32, margin: f64) -> RectD {
    RectD::new(-margin, -margin, width as f64 + margin, height as f64 + margin)
}

/// Guard box for the fixed-point fillers, limited to what 16.16 can hold.
fn fixed_guard_rect(width: i32, height: i32) -> RectD {
    let r = guard_rect(width, height, GUARD_MARGIN);
    RectD::new(
        r.x1.max(-FIXED_LIMIT),
        r.y1.max(-FIXED_LIMIT),
        r.x2.min(FIXED_LIMIT),
        r.y2.min(FIXED_LIMIT),
    )
}

// ============================================================================
// Circle
// ============================================================================

/// Filled midpoint circle, emitted as horizontal spans.
pub fn write_circle(buf: &mut PaintBuffer, width: i32, height: i32, center: Point, radius: i32) {
    write_circle_wide(buf, width, height, center.x as i64, center.y as i64, radius as i64);
}

/// [`write_circle`] on `i64` coordinates, so centers far outside the image
/// and large radii cannot overflow.
fn write_circle_wide(buf: &mut PaintBuffer, width: i32, height: i32, cx: i64, cy: i64, radius: i64) {
    let (w, h) = (width as i64, height as i64);
    if radius < 0 || w <= 0 || h <= 0 {
        return;
    }
    if cx + radius < 0 || cx - radius >= w || cy + radius < 0 || cy - radius >= h {
        return;
    }
    let mut span = |y: i64, x1: i64, x2: i64| {
        if (0..h).contains(&y) && x1 < w && x2 >= 0 {
            buf.push_span(width, y as i32, x1.max(0) as i32, x2.min(w - 1) as i32);
        }
    };

    let mut err = 0i64;
    let mut dx = radius;
    let mut dy = 0i64;
    let mut plus = 1i64;
    let mut minus = (radius << 1) - 1;

    while dx >= dy {
        span(cy - dy, cx - dx, cx + dx);
        span(cy + dy, cx - dx, cx + dx);
        span(cy - dx, cx - dy, cx + dy);
        span(cy + dx, cx - dy, cx + dy);

        dy += 1;
        err += plus;
        plus += 2;
        // All ones when err > 0, zero otherwise.
        let mask = if err <= 0 { 0 } else { -1 };
        err -= minus & mask;
        dx += mask;
        minus -= mask & 2;
    }
}

// ============================================================================
// Convex polygon
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct EdgeCursor {
    idx: usize,
    di: usize,
    x: i32,
    dx: i32,
    ye: i32,
}

/// Fill a convex polygon whose vertices carry `shift` fractional bits.
///
/// The boundary is stroked with the fixed-point line walker. Interior spans
/// come from two cursors descending the left and right chains from the
/// topmost vertex.
pub fn fill_convex_poly(buf: &mut PaintBuffer, width: i32, height: i32, v: &[Point], shift: i32) {
    if !(0..=XY_SHIFT).contains(&shift) {
        return;
    }
    let wide: Vec<(i64, i64)> = v.iter().map(|p| (p.x as i64, p.y as i64)).collect();
    fill_convex_wide(buf, width, height, &wide, shift);
}

/// Vertices with `shift` fractional bits in `i64`. Polygons inside the
/// guard band go straight to the fixed-point filler; others are clipped to
/// it first and re-quantized to 16.16.
fn fill_convex_wide(buf: &mut PaintBuffer, width: i32, height: i32, v: &[(i64, i64)], shift: i32) {
    if v.is_empty() {
        return;
    }
    let unit = (1i64 << shift) as f64;
    let guard = fixed_guard_rect(width, height);
    let pts: Vec<Vec2> = v
        .iter()
        .map(|&(x, y)| Vec2::new(x as f64 / unit, y as f64 / unit))
        .collect();

    if pts.iter().all(|p| guard.hit_test(p.x, p.y)) {
        let narrow: Vec<Point> = v.iter().map(|&(x, y)| Point::new(x as i32, y as i32)).collect();
        fill_convex_fixed(buf, width, height, &narrow, shift);
        return;
    }

    let one = XY_ONE as f64;
    let clipped: Vec<Point> = clip_polygon(&pts, &guard)
        .iter()
        .map(|p| Point::new((p.x * one).round() as i32, (p.y * one).round() as i32))
        .collect();
    fill_convex_fixed(buf, width, height, &clipped, XY_SHIFT);
}

/// Fixed-point convex filler. Every vertex must lie inside the guard band.
fn fill_convex_fixed(buf: &mut PaintBuffer, width: i32, height: i32, v: &[Point], shift: i32) {
    let npts = v.len();
    if npts == 0 {
        return;
    }
    let delta = if shift > 0 { 1 << (shift - 1) } else { 0 };
    let up = XY_SHIFT - shift;
    let to_fixed = |p: Point| Point::new(p.x << up, p.y << up);

    let mut xmin = v[0].x;
    let mut xmax = v[0].x;
    let mut ymin = v[0].y;
    let mut ymax = v[0].y;
    let mut imin = 0;
    let mut p0 = to_fixed(v[npts - 1]);

    for (i, &p) in v.iter().enumerate() {
        if p.y < ymin {
            ymin = p.y;
            imin = i;
        }
        ymax = ymax.max(p.y);
        xmax = xmax.max(p.x);
        xmin = xmin.min(p.x);

        let p = to_fixed(p);
        line_fixed(buf, p0, p, width, height);
        p0 = p;
    }

    let xmin = (xmin + delta) >> shift;
    let xmax = (xmax + delta) >> shift;
    let ymin = (ymin + delta) >> shift;
    let ymax = (ymax + delta) >> shift;

    if npts < 3 || xmax < 0 || ymax < 0 || xmin >= width || ymin >= height {
        return;
    }
    let ymax = ymax.min(height - 1);

    let mut edge = [
        EdgeCursor {
            idx: imin,
            di: 1,
            ye: ymin,
            ..Default::default()
        },
        EdgeCursor {
            idx: imin,
            di: npts - 1,
            ye: ymin,
            ..Default::default()
        },
    ];
    let (mut left, mut right) = (0, 1);
    let mut edges_left = npts;
    let half = XY_ONE >> 1;
    let mut y = ymin;

    loop {
        for e in edge.iter_mut() {
            if y < e.ye {
                continue;
            }
            let mut idx = e.idx;
            let mut xs = 0;
            let mut ty;
            loop {
                ty = (v[idx].y + delta) >> shift;
                if ty > y || edges_left == 0 {
                    break;
                }
                xs = v[idx].x;
                idx = (idx + e.di) % npts;
                edges_left -= 1;
            }

            // No more edges.
            if y >= ty {
                return;
            }
            let xs = xs << up;
            let xe = v[idx].x << up;
            let rows = (ty - y) as i64;
            e.ye = ty;
            e.dx = (((xe as i64 - xs as i64) * 2 + rows) / (2 * rows)) as i32;
            e.x = xs;
            e.idx = idx;
        }

        if edge[left].x > edge[right].x {
            core::mem::swap(&mut left, &mut right);
        }
        let x1 = edge[left].x;
        let x2 = edge[right].x;

        if y >= 0 {
            let xx1 = (x1 + half) >> XY_SHIFT;
            let xx2 = (x2 + half) >> XY_SHIFT;
            if xx2 >= 0 && xx1 < width {
                buf.push_span(width, y, xx1.max(0), xx2.min(width - 1));
            }
        }

        edge[left].x = x1.wrapping_add(edge[left].dx);
        edge[right].x = x2.wrapping_add(edge[right].dx);

        y += 1;
        if y > ymax {
            break;
        }
    }
}

/// Fill a convex polygon given in pixel coordinates. Vertices are
/// truncated toward zero, as [`Vec2::as_point`] does.
fn fill_convex_pixels(buf: &mut PaintBuffer, width: i32, height: i32, v: &[Vec2]) {
    if v.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return;
    }
    let wide: Vec<(i64, i64)> = v.iter().map(|p| (p.x as i64, p.y as i64)).collect();
    fill_convex_wide(buf, width, height, &wide, 0);
}

// ============================================================================
// Thick lines
// ============================================================================

/// Segment of `thickness` pixels, with round caps selected by `flags`
/// ([`CAP_START`], [`CAP_END`]).
pub fn thick_line(
    buf: &mut PaintBuffer,
    width: i32,
    height: i32,
    p0: Point,
    p1: Point,
    thickness: i32,
    flags: u32,
) {
    thick_segment(buf, width, height, p0.to_vec2(), p1.to_vec2(), thickness, flags);
}

/// [`thick_line`] on pixel coordinates. The segment is first cut to a band
/// wider than the stroke's reach, so the cut ends and their caps stay
/// outside the image.
fn thick_segment(
    buf: &mut PaintBuffer,
    width: i32,
    height: i32,
    a: Vec2,
    b: Vec2,
    thickness: i32,
    flags: u32,
) {
    let reach = thickness.max(1) as f64 * 0.5 + 0.5;
    let guard = guard_rect(width, height, reach + GUARD_MARGIN);
    let (mut a, mut b) = (Vec2::new(a.x.trunc(), a.y.trunc()), Vec2::new(b.x.trunc(), b.y.trunc()));
    if !clip_segment(&mut a, &mut b, &guard) {
        return;
    }
    let (x0, y0) = (a.x as i64, a.y as i64);
    let (x1, y1) = (b.x as i64, b.y as i64);

    if thickness <= 1 {
        let p0 = Point::new(x0 as i32, y0 as i32);
        let p1 = Point::new(x1 as i32, y1 as i32);
        write_line(buf, width, height, p0, p1);
        return;
    }

    let dx = (x0 - x1) as f64;
    let dy = (y1 - y0) as f64;
    let len_sq = dx * dx + dy * dy;
    let odd = (thickness & 1) as f64;
    let half_thickness = thickness as f64 * 0.5 * XY_ONE as f64;

    if len_sq > f64::EPSILON {
        let r = (half_thickness + odd * XY_ONE as f64 * 0.5) / len_sq.sqrt();
        let (ox, oy) = ((dy * r).round() as i64, (dx * r).round() as i64);
        let (f0x, f0y) = (x0 << XY_SHIFT, y0 << XY_SHIFT);
        let (f1x, f1y) = (x1 << XY_SHIFT, y1 << XY_SHIFT);
        let quad = [
            (f0x + ox, f0y + oy),
            (f0x - ox, f0y - oy),
            (f1x - ox, f1y - oy),
            (f1x + ox, f1y + oy),
        ];
        fill_convex_wide(buf, width, height, &quad, XY_SHIFT);
    }

    let cap_radius = (thickness as i64 + 1) >> 1;
    if flags & CAP_START != 0 {
        write_circle_wide(buf, width, height, x0, y0, cap_radius);
    }
    if flags & CAP_END != 0 {
        write_circle_wide(buf, width, height, x1, y1, cap_radius);
    }
}

/// Connected thick segments. The first segment gets both caps, later ones
/// only the end cap so joints are rounded. Finishes the buffer.
pub fn poly_line(buf: &mut PaintBuffer, width: i32, height: i32, points: &[Point], thickness: i32) {
    let pts: Vec<Vec2> = points.iter().map(|p| p.to_vec2()).collect();
    stroke_polyline(buf, width, height, &pts, thickness);
}

fn stroke_polyline(buf: &mut PaintBuffer, width: i32, height: i32, points: &[Vec2], thickness: i32) {
    let mut flags = CAP_START | CAP_END;
    for seg in points.windows(2) {
        thick_segment(buf, width, height, seg[0], seg[1], thickness, flags);
        flags = CAP_END;
    }
    buf.finish();
}

// ============================================================================
// Arrow
// ============================================================================

/// Line of `thickness` pixels ending in a triangular head at `line.end`.
///
/// `head_size.x` is the width of the head's base and `head_size.y` its
/// length; a head longer than the line is shortened to the line. The shaft
/// has no caps. Finishes the buffer.
pub fn paint_arrow(
    buf: &mut PaintBuffer,
    line: &Line,
    width: i32,
    height: i32,
    thickness: i32,
    head_size: Vec2,
) {
    let length = line.length();
    if !(length > 0.0) || !length.is_finite() {
        return;
    }
    let dir = line.vector() * (1.0 / length);
    let head_len = head_size.y.clamp(0.0, length);
    let base = line.end - dir * head_len;

    if length - head_len >= 1.0 {
        thick_segment(buf, width, height, line.begin, base, thickness, 0);
    }
    if head_len > 0.0 && head_size.x > 0.0 {
        let n = Vec2::new(-dir.y, dir.x) * (head_size.x * 0.5);
        fill_convex_pixels(buf, width, height, &[line.end, base + n, base - n]);
    }
    buf.finish();
}

// ============================================================================
// Shape entry points
// ============================================================================

/// A zero-length line paints nothing.
pub fn paint_line(buf: &mut PaintBuffer, line: &Line, width: i32, height: i32, thickness: i32) {
    if line.begin == line.end {
        return;
    }
    stroke_polyline(buf, width, height, &[line.begin, line.end], thickness);
}

pub fn paint_line_string(
    buf: &mut PaintBuffer,
    line_string: &LineString,
    width: i32,
    height: i32,
    thickness: i32,
    closed: bool,
) {
    let Some(&first) = line_string.points().first() else {
        return;
    };
    if closed {
        let mut pts = line_string.points().to_vec();
        pts.push(first);
        stroke_polyline(buf, width, height, &pts, thickness);
    } else {
        stroke_polyline(buf, width, height, line_string.points(), thickness);
    }
}

pub fn paint_triangle(buf: &mut PaintBuffer, triangle: &Triangle, width: i32, height: i32) {
    fill_convex_pixels(buf, width, height, &[triangle.p0, triangle.p1, triangle.p2]);
    buf.finish();
}

pub fn paint_quad(buf: &mut PaintBuffer, quad: &Quad, width: i32, height: i32) {
    fill_convex_pixels(buf, width, height, &[quad.p0, quad.p1, quad.p2, quad.p3]);
    buf.finish();
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(buf: &PaintBuffer, width: i32) -> Vec<(i32, i32)> {
        buf.iter()
            .map(|o| (o as i32 % width, o as i32 / width))
            .collect()
    }

    #[test]
    fn test_write_circle_symmetric() {
        let mut buf = PaintBuffer::new();
        write_circle(&mut buf, 20, 20, Point::new(10, 10), 3);
        buf.finish();
        let pts = xy(&buf, 20);
        assert!(pts.contains(&(10, 10)));
        assert!(pts.contains(&(7, 10)));
        assert!(pts.contains(&(13, 10)));
        assert!(pts.contains(&(10, 7)));
        assert!(!pts.contains(&(7, 7)));
        for &(x, y) in &pts {
            assert!(pts.contains(&(20 - x, y)));
            assert!(pts.contains(&(x, 20 - y)));
        }
    }

    #[test]
    fn test_write_circle_clipped_matches_unclipped_inside() {
        let mut full = PaintBuffer::new();
        write_circle(&mut full, 40, 40, Point::new(20, 20), 6);
        full.finish();
        // Same circle near the corner of a smaller image.
        let mut clipped = PaintBuffer::new();
        write_circle(&mut clipped, 40, 40, Point::new(2, 2), 6);
        clipped.finish();
        let shifted: Vec<(i32, i32)> = xy(&full, 40)
            .into_iter()
            .map(|(x, y)| (x - 18, y - 18))
            .filter(|&(x, y)| x >= 0 && y >= 0)
            .collect();
        assert_eq!(xy(&clipped, 40), shifted);
    }

    #[test]
    fn test_fill_convex_rectangle() {
        let mut buf = PaintBuffer::new();
        let pts = [
            Point::new(1, 1),
            Point::new(4, 1),
            Point::new(4, 3),
            Point::new(1, 3),
        ];
        fill_convex_poly(&mut buf, 10, 10, &pts, 0);
        buf.finish();
        assert_eq!(buf.len(), 4 * 3);
        for (x, y) in xy(&buf, 10) {
            assert!((1..=4).contains(&x) && (1..=3).contains(&y));
        }
    }

    #[test]
    fn test_fill_convex_too_few_points() {
        let mut buf = PaintBuffer::new();
        fill_convex_poly(&mut buf, 10, 10, &[Point::new(1, 1), Point::new(5, 5)], 0);
        buf.finish();
        // Boundary only.
        assert!(xy(&buf, 10).iter().all(|&(x, y)| x == y));
    }

    #[test]
    fn test_fill_convex_out_of_range() {
        let mut buf = PaintBuffer::new();
        let pts = [Point::new(-9, -9), Point::new(-5, -9), Point::new(-5, -5)];
        fill_convex_poly(&mut buf, 10, 10, &pts, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_thick_line_extent() {
        let column = |thickness: i32| {
            let mut buf = PaintBuffer::new();
            thick_line(&mut buf, 30, 30, Point::new(5, 15), Point::new(25, 15), thickness, 0);
            buf.finish();
            let pts = xy(&buf, 30);
            assert!(!pts.iter().any(|p| p.0 < 5 || p.0 > 25));
            pts.iter().filter(|p| p.0 == 15).map(|p| p.1).collect::<Vec<_>>()
        };
        // Half extent is thickness / 2, plus half a pixel for odd thickness.
        assert_eq!(column(4), vec![13, 14, 15, 16, 17]);
        assert_eq!(column(5), vec![12, 13, 14, 15, 16, 17, 18]);
    }

    #[test]
    fn test_thick_line_caps() {
        let mut buf = PaintBuffer::new();
        thick_line(&mut buf, 30, 30, Point::new(5, 15), Point::new(25, 15), 5, CAP_START | CAP_END);
        buf.finish();
        let pts = xy(&buf, 30);
        assert!(pts.contains(&(3, 15)));
        assert!(pts.contains(&(27, 15)));
    }

    #[test]
    fn test_poly_line_sorted_unique() {
        let mut buf = PaintBuffer::new();
        let pts = [Point::new(2, 2), Point::new(20, 5), Point::new(8, 25), Point::new(2, 2)];
        poly_line(&mut buf, 30, 30, &pts, 4);
        assert!(buf.is_finished());
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_paint_line_zero_length() {
        let mut buf = PaintBuffer::new();
        let line = Line::new(Vec2::new(4.0, 4.0), Vec2::new(4.0, 4.0));
        paint_line(&mut buf, &line, 10, 10, 3);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_paint_triangle() {
        let mut buf = PaintBuffer::new();
        let tri = Triangle::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0));
        paint_triangle(&mut buf, &tri, 10, 10);
        assert!(buf.is_finished());
        let pts = xy(&buf, 10);
        assert!(pts.contains(&(1, 1)));
        assert!(pts.contains(&(0, 8)));
        assert!(!pts.contains(&(7, 7)));
    }

    #[test]
    fn test_paint_quad_clipped() {
        let mut buf = PaintBuffer::new();
        let quad = Quad::new(
            Vec2::new(-5.0, -5.0),
            Vec2::new(50.0, -5.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(-5.0, 50.0),
        );
        paint_quad(&mut buf, &quad, 6, 4);
        assert_eq!(buf.len(), 24);
    }

    fn rows(buf: &PaintBuffer, width: i32) -> Vec<usize> {
        let mut counts = Vec::new();
        for (_, y) in xy(buf, width) {
            let y = y as usize;
            if counts.len() <= y {
                counts.resize(y + 1, 0);
            }
            counts[y] += 1;
        }
        counts
    }

    #[test]
    fn test_far_line_matches_near_line() {
        let near = {
            let mut buf = PaintBuffer::new();
            paint_line(&mut buf, &Line::new(Vec2::new(0.0, 5.0), Vec2::new(12.0, 5.0)), 10, 10, 3);
            buf
        };
        assert_eq!(near.len(), 10 * 5);
        assert!(xy(&near, 10).iter().all(|&(_, y)| (3..=7).contains(&y)));

        for far_x in [40000.0, 3e9, 1e300] {
            let mut buf = PaintBuffer::new();
            let line = Line::new(Vec2::new(0.0, 5.0), Vec2::new(far_x, 5.0));
            paint_line(&mut buf, &line, 10, 10, 3);
            assert_eq!(buf.as_slice(), near.as_slice(), "x = {}", far_x);
        }
    }

    #[test]
    fn test_thick_line_i32_extremes() {
        let mut buf = PaintBuffer::new();
        thick_line(
            &mut buf,
            10,
            10,
            Point::new(i32::MIN, 5),
            Point::new(i32::MAX, 5),
            3,
            CAP_START | CAP_END,
        );
        buf.finish();
        assert_eq!(buf.len(), 10 * 5);

        let mut buf = PaintBuffer::new();
        let pts = [Point::new(i32::MIN, i32::MIN), Point::new(5, 5), Point::new(i32::MAX, i32::MIN)];
        poly_line(&mut buf, 10, 10, &pts, 4);
        assert!(buf.as_slice().contains(&55));
        assert!(buf.iter().all(|o| o < 100));
    }

    #[test]
    fn test_far_thin_line() {
        let mut buf = PaintBuffer::new();
        let line = Line::new(Vec2::new(-1e12, 3.0), Vec2::new(1e12, 3.0));
        paint_line(&mut buf, &line, 8, 8, 1);
        assert_eq!(buf.as_slice(), &[24, 25, 26, 27, 28, 29, 30, 31]);
    }

    #[test]
    fn test_far_triangle() {
        let mut buf = PaintBuffer::new();
        let tri = Triangle::new(Vec2::new(0.0, 0.0), Vec2::new(40000.0, 0.0), Vec2::new(0.0, 50.0));
        paint_triangle(&mut buf, &tri, 100, 100);
        let counts = rows(&buf, 100);
        assert!(counts[..50].iter().all(|&n| n == 100));
        assert!(counts.len() <= 51);
        assert!(buf.len() >= 5000 && buf.len() <= 5100);
    }

    #[test]
    fn test_fill_convex_i32_extremes() {
        let mut buf = PaintBuffer::new();
        let pts = [Point::new(0, 0), Point::new(i32::MAX, 0), Point::new(0, 50)];
        fill_convex_poly(&mut buf, 100, 100, &pts, 0);
        buf.finish();
        let counts = rows(&buf, 100);
        assert!(counts[..50].iter().all(|&n| n == 100));
        assert!(counts.len() <= 51);

        let mut buf = PaintBuffer::new();
        let pts = [Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MIN), Point::new(0, i32::MAX)];
        fill_convex_poly(&mut buf, 10, 10, &pts, 0);
        buf.finish();
        assert_eq!(buf.len(), 100);
    }

    #[test]
    fn test_far_quad_covers_image() {
        let mut buf = PaintBuffer::new();
        let quad = Quad::new(
            Vec2::new(-1e12, -1e12),
            Vec2::new(1e12, -1e12),
            Vec2::new(1e12, 1e12),
            Vec2::new(-1e12, 1e12),
        );
        paint_quad(&mut buf, &quad, 6, 4);
        assert_eq!(buf.len(), 24);

        let mut buf = PaintBuffer::new();
        let nan = Quad::new(Vec2::new(f64::NAN, 0.0), Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(0.0, 5.0));
        paint_quad(&mut buf, &nan, 6, 4);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_circle_far_center() {
        let mut buf = PaintBuffer::new();
        write_circle(&mut buf, 10, 10, Point::new(i32::MAX, 5), 3);
        write_circle(&mut buf, 10, 10, Point::new(i32::MIN, i32::MIN), 7);
        assert!(buf.is_empty());

        write_circle(&mut buf, 10, 10, Point::new(-1_000_000, 5), 1_000_003);
        buf.finish();
        let pts = xy(&buf, 10);
        assert!(pts.contains(&(3, 5)));
        assert!(!pts.contains(&(4, 5)));
    }

    #[test]
    fn test_paint_arrow() {
        let mut buf = PaintBuffer::new();
        let line = Line::new(Vec2::new(2.0, 10.0), Vec2::new(30.0, 10.0));
        paint_arrow(&mut buf, &line, 40, 20, 2, Vec2::new(10.0, 8.0));
        assert!(buf.is_finished());
        let pts = xy(&buf, 40);
        // Shaft.
        assert!(pts.contains(&(5, 10)));
        assert!(!pts.contains(&(5, 14)));
        // Head: wide at its base, pointed at the tip.
        assert!(pts.contains(&(23, 6)));
        assert!(pts.contains(&(23, 14)));
        assert!(pts.contains(&(30, 10)));
        assert!(!pts.contains(&(31, 10)));
        assert!(!pts.contains(&(29, 6)));
    }

    #[test]
    fn test_paint_arrow_degenerate() {
        let mut buf = PaintBuffer::new();
        let dot = Line::new(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0));
        paint_arrow(&mut buf, &dot, 10, 10, 2, Vec2::new(4.0, 4.0));
        assert!(buf.is_empty());
        // Head longer than the line: head only.
        let short = Line::new(Vec2::new(2.0, 5.0), Vec2::new(6.0, 5.0));
        paint_arrow(&mut buf, &short, 10, 10, 2, Vec2::new(4.0, 20.0));
        let pts = xy(&buf, 10);
        assert!(pts.contains(&(6, 5)));
        assert!(pts.contains(&(2, 4)));
    }
}
