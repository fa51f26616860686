//! Per-pixel analytic painters for circles, circular frames, ellipses and
//! antialiased triangles.
//!
//! These shapes skip the scan converter: the painter walks the shape's
//! bounding box and evaluates membership in closed form at each integer
//! pixel position. A pixel belongs to a circle of radius `r` when its
//! distance to the center is at most `r + 0.5`.
//!
//! With antialiasing, coverage falls off linearly across a one-pixel band
//! centered on the boundary and is blended through
//! [`blend_pixel_cover`].

use crate::basics::{iceil, ifloor, Vec2};
use crate::blend::{blend_pixel, blend_pixel_cover, coverage_to_cover, BlendMode};
use crate::color::Color;
use crate::rendering_buffer::RenderingBuffer;

// ============================================================================
// Bounding-box walker
// ============================================================================

/// Visit every pixel of the box `[x1, x2] x [y1, y2]` clipped to `dst`,
/// blending `color` by the coverage `cover(x, y)` returns.
fn scan_box(
    dst: &mut RenderingBuffer<'_>,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    mode: BlendMode,
    mut cover: impl FnMut(f64, f64) -> f64,
) {
    if dst.is_empty() || !(x1 <= x2 && y1 <= y2) {
        return;
    }
    let xs = ifloor(x1).max(0);
    let ys = ifloor(y1).max(0);
    let xe = iceil(x2).min(dst.width() as i32 - 1);
    let ye = iceil(y2).min(dst.height() as i32 - 1);

    for y in ys..=ye {
        for x in xs..=xe {
            let c = cover(x as f64, y as f64);
            if c <= 0.0 {
                continue;
            }
            let px = dst.pixel_mut(x as u32, y as u32);
            if c >= 1.0 {
                blend_pixel(px, color, mode);
            } else {
                blend_pixel_cover(px, color, mode, coverage_to_cover(c));
            }
        }
    }
}

#[inline]
fn band(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

// ============================================================================
// Circle
// ============================================================================

/// Filled circle. A non-positive radius paints nothing.
pub fn fill_circle(
    dst: &mut RenderingBuffer<'_>,
    center: Vec2,
    r: f64,
    color: Color,
    mode: BlendMode,
    antialiased: bool,
) {
    if !(r > 0.0) {
        return;
    }
    let reach = r + 0.5;
    let reach_sq = reach * reach;
    scan_box(
        dst,
        center.x - reach,
        center.y - reach,
        center.x + reach,
        center.y + reach,
        color,
        mode,
        |x, y| {
            let d_sq = (x - center.x) * (x - center.x) + (y - center.y) * (y - center.y);
            if antialiased {
                band(reach - d_sq.sqrt())
            } else if d_sq <= reach_sq {
                1.0
            } else {
                0.0
            }
        },
    );
}

/// Ring from `r - inner_thickness` to `r + outer_thickness`.
///
/// Without antialiasing the ring is exactly the outer disc minus the inner
/// disc, each with the same half-pixel bias as [`fill_circle`]. With
/// antialiasing the inner edge, the outer edge and the solid middle are
/// three separate zones.
#[allow(clippy::too_many_arguments)]
pub fn fill_circle_frame(
    dst: &mut RenderingBuffer<'_>,
    center: Vec2,
    r: f64,
    inner_thickness: f64,
    outer_thickness: f64,
    color: Color,
    mode: BlendMode,
    antialiased: bool,
) {
    let inner = r - inner_thickness;
    let outer = r + outer_thickness;
    if !(outer > 0.0) || !(inner_thickness + outer_thickness > 0.0) {
        return;
    }
    let outer_reach = outer + 0.5;
    let inner_reach = inner + 0.5;
    let has_hole = inner > 0.0;

    scan_box(
        dst,
        center.x - outer_reach,
        center.y - outer_reach,
        center.x + outer_reach,
        center.y + outer_reach,
        color,
        mode,
        |x, y| {
            let d_sq = (x - center.x) * (x - center.x) + (y - center.y) * (y - center.y);
            if antialiased {
                let d = d_sq.sqrt();
                let outer_cover = band(outer_reach - d);
                let inner_cover = if has_hole { band(d - inner + 0.5) } else { 1.0 };
                outer_cover.min(inner_cover)
            } else if d_sq <= outer_reach * outer_reach
                && !(has_hole && d_sq <= inner_reach * inner_reach)
            {
                1.0
            } else {
                0.0
            }
        },
    );
}

// ============================================================================
// Ellipse
// ============================================================================

/// Filled axis-aligned ellipse with semi-axes `a` (x) and `b` (y).
pub fn fill_ellipse(
    dst: &mut RenderingBuffer<'_>,
    center: Vec2,
    a: f64,
    b: f64,
    color: Color,
    mode: BlendMode,
    antialiased: bool,
) {
    if !(a > 0.0 && b > 0.0) {
        return;
    }
    let (ra, rb) = (a + 0.5, b + 0.5);
    let (a2, b2) = (a * a, b * b);
    scan_box(
        dst,
        center.x - ra,
        center.y - rb,
        center.x + ra,
        center.y + rb,
        color,
        mode,
        |x, y| {
            let dx = x - center.x;
            let dy = y - center.y;
            if antialiased {
                // First-order distance to the boundary, positive outside.
                let f = dx * dx / a2 + dy * dy / b2 - 1.0;
                let g = 2.0 * (dx * dx / (a2 * a2) + dy * dy / (b2 * b2)).sqrt();
                if g == 0.0 {
                    return 1.0;
                }
                band(0.5 - f / g)
            } else if (dx / ra) * (dx / ra) + (dy / rb) * (dy / rb) <= 1.0 {
                1.0
            } else {
                0.0
            }
        },
    );
}

// ============================================================================
// Triangle
// ============================================================================

/// Antialiased triangle. Coverage is the signed distance from the pixel to
/// the nearest edge, shifted by half a pixel. Degenerate triangles paint
/// nothing.
pub fn fill_triangle_aa(
    dst: &mut RenderingBuffer<'_>,
    p: [Vec2; 3],
    color: Color,
    mode: BlendMode,
) {
    let area2 = (p[1] - p[0]).cross(p[2] - p[0]);
    if !(area2.abs() > f64::EPSILON) {
        return;
    }
    let sign = area2.signum();

    // Inward unit normals, one per edge.
    let edges: [(Vec2, Vec2); 3] = core::array::from_fn(|i| {
        let a = p[i];
        let e = p[(i + 1) % 3] - a;
        let len = e.length();
        (a, Vec2::new(-e.y, e.x) * (sign / len))
    });

    let x1 = p[0].x.min(p[1].x).min(p[2].x) - 1.0;
    let y1 = p[0].y.min(p[1].y).min(p[2].y) - 1.0;
    let x2 = p[0].x.max(p[1].x).max(p[2].x) + 1.0;
    let y2 = p[0].y.max(p[1].y).max(p[2].y) + 1.0;

    scan_box(dst, x1, y1, x2, y2, color, mode, |x, y| {
        let q = Vec2::new(x, y);
        let d = edges
            .iter()
            .map(|(a, n)| (q - *a).dot(*n))
            .fold(f64::INFINITY, f64::min);
        band(d + 0.5)
    });
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32, c: Color) -> Vec<Color> {
        vec![c; (w * h) as usize]
    }

    #[test]
    fn test_circle_membership() {
        let mut px = canvas(10, 10, Color::TRANSPARENT);
        let mut rb = RenderingBuffer::packed(&mut px, 10, 10).unwrap();
        let red = Color::new(255, 0, 0, 255);
        fill_circle(&mut rb, Vec2::new(5.0, 5.0), 3.0, red, BlendMode::Paint, false);
        for y in 0..10 {
            for x in 0..10 {
                let inside = (x - 5) * (x - 5) + (y - 5) * (y - 5) <= 12;
                let expected = if inside {
                    Color::new(255, 0, 0, 0)
                } else {
                    Color::TRANSPARENT
                };
                assert_eq!(rb.pixel(x as u32, y as u32), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let mut px = canvas(8, 8, Color::BLACK);
        let mut rb = RenderingBuffer::packed(&mut px, 8, 8).unwrap();
        fill_circle(&mut rb, Vec2::new(4.0, 4.0), 0.0, Color::WHITE, BlendMode::Overwrite, false);
        fill_circle(&mut rb, Vec2::new(4.0, 4.0), 0.0, Color::WHITE, BlendMode::Overwrite, true);
        fill_ellipse(&mut rb, Vec2::new(4.0, 4.0), 0.0, 3.0, Color::WHITE, BlendMode::Overwrite, false);
        drop(rb);
        assert!(px.iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_circle_clipped_at_border() {
        let mut px = canvas(6, 6, Color::BLACK);
        let mut rb = RenderingBuffer::packed(&mut px, 6, 6).unwrap();
        fill_circle(&mut rb, Vec2::new(0.0, 0.0), 2.0, Color::WHITE, BlendMode::Overwrite, false);
        assert_eq!(rb.pixel(0, 0), Color::WHITE);
        assert_eq!(rb.pixel(2, 0), Color::WHITE);
        assert_eq!(rb.pixel(2, 2), Color::BLACK);
    }

    #[test]
    fn test_antialiased_circle_soft_edge() {
        let mut px = canvas(21, 21, Color::TRANSPARENT);
        let mut rb = RenderingBuffer::packed(&mut px, 21, 21).unwrap();
        fill_circle(&mut rb, Vec2::new(10.0, 10.0), 5.0, Color::WHITE, BlendMode::Overwrite, true);
        assert_eq!(rb.pixel(10, 10), Color::WHITE);
        // Exactly on the radius: half covered.
        assert_eq!(rb.pixel(15, 10).a, 128);
        assert_eq!(rb.pixel(16, 10), Color::TRANSPARENT);
    }

    #[test]
    fn test_frame_plus_inner_disc_is_outer_disc() {
        let c = Vec2::new(12.0, 12.0);
        let mut a = canvas(25, 25, Color::TRANSPARENT);
        {
            let mut rb = RenderingBuffer::packed(&mut a, 25, 25).unwrap();
            fill_circle_frame(&mut rb, c, 8.0, 3.0, 2.0, Color::WHITE, BlendMode::Overwrite, false);
            fill_circle(&mut rb, c, 5.0, Color::WHITE, BlendMode::Overwrite, false);
        }
        let mut b = canvas(25, 25, Color::TRANSPARENT);
        {
            let mut rb = RenderingBuffer::packed(&mut b, 25, 25).unwrap();
            fill_circle(&mut rb, c, 10.0, Color::WHITE, BlendMode::Overwrite, false);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_frame_hole_untouched() {
        let mut px = canvas(25, 25, Color::BLACK);
        let mut rb = RenderingBuffer::packed(&mut px, 25, 25).unwrap();
        fill_circle_frame(&mut rb, Vec2::new(12.0, 12.0), 8.0, 2.0, 2.0, Color::WHITE, BlendMode::Paint, true);
        assert_eq!(rb.pixel(12, 12), Color::BLACK);
        assert_eq!(rb.pixel(20, 12), Color::WHITE);
        assert_eq!(rb.pixel(12, 4), Color::WHITE);
    }

    #[test]
    fn test_ellipse_axes() {
        let mut px = canvas(30, 20, Color::TRANSPARENT);
        let mut rb = RenderingBuffer::packed(&mut px, 30, 20).unwrap();
        fill_ellipse(&mut rb, Vec2::new(15.0, 10.0), 10.0, 4.0, Color::WHITE, BlendMode::Overwrite, false);
        assert_eq!(rb.pixel(25, 10), Color::WHITE);
        assert_eq!(rb.pixel(26, 10), Color::TRANSPARENT);
        assert_eq!(rb.pixel(15, 14), Color::WHITE);
        assert_eq!(rb.pixel(15, 15), Color::TRANSPARENT);
    }

    #[test]
    fn test_ellipse_aa_center_opaque() {
        let mut px = canvas(30, 20, Color::TRANSPARENT);
        let mut rb = RenderingBuffer::packed(&mut px, 30, 20).unwrap();
        fill_ellipse(&mut rb, Vec2::new(15.0, 10.0), 10.0, 4.0, Color::WHITE, BlendMode::Overwrite, true);
        assert_eq!(rb.pixel(15, 10), Color::WHITE);
        assert_eq!(rb.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn test_triangle_aa() {
        let mut px = canvas(20, 20, Color::TRANSPARENT);
        let mut rb = RenderingBuffer::packed(&mut px, 20, 20).unwrap();
        let tri = [Vec2::new(2.0, 2.0), Vec2::new(18.0, 2.0), Vec2::new(2.0, 18.0)];
        fill_triangle_aa(&mut rb, tri, Color::WHITE, BlendMode::Overwrite);
        assert_eq!(rb.pixel(5, 5), Color::WHITE);
        // On an edge: half covered.
        assert_eq!(rb.pixel(10, 2).a, 128);
        assert_eq!(rb.pixel(15, 15), Color::TRANSPARENT);
    }

    #[test]
    fn test_triangle_orientation_independent() {
        let tri = [Vec2::new(1.0, 1.0), Vec2::new(9.0, 3.0), Vec2::new(4.0, 9.0)];
        let rev = [tri[2], tri[1], tri[0]];
        let mut a = canvas(10, 10, Color::TRANSPARENT);
        let mut b = canvas(10, 10, Color::TRANSPARENT);
        fill_triangle_aa(&mut RenderingBuffer::packed(&mut a, 10, 10).unwrap(), tri, Color::WHITE, BlendMode::Overwrite);
        fill_triangle_aa(&mut RenderingBuffer::packed(&mut b, 10, 10).unwrap(), rev, Color::WHITE, BlendMode::Overwrite);
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_triangle_noop() {
        let mut px = canvas(10, 10, Color::BLACK);
        let mut rb = RenderingBuffer::packed(&mut px, 10, 10).unwrap();
        let tri = [Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0), Vec2::new(9.0, 9.0)];
        fill_triangle_aa(&mut rb, tri, Color::WHITE, BlendMode::Overwrite);
        drop(rb);
        assert!(px.iter().all(|c| *c == Color::BLACK));
    }
}
