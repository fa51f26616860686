//! Polygon repair.
//!
//! Turns rings traced from a raster (which may touch themselves, carry
//! collinear runs, or share vertices with their holes) into simple,
//! consistently oriented polygons that triangulate cleanly.
//!
//! Steps, per ring:
//!
//! 1. drop consecutive and closing duplicates, collinear points and spikes;
//! 2. split at repeated vertices and at proper self-intersections;
//! 3. drop pieces with fewer than three vertices or no area;
//! 4. orient outer pieces clockwise and holes counter-clockwise.
//!
//! Hole vertices that coincide with a vertex of another ring are then
//! nudged half a unit into the hole, and every hole is assigned to the
//! outer piece that contains it.

use std::collections::HashMap;

use crate::basics::{RectD, Vec2};
use crate::polygon::{ring_contains, signed_area, Polygon};

/// Distance a shared hole vertex is moved into its hole.
pub const HOLE_NUDGE: f64 = 0.5;

const AREA_EPSILON: f64 = 1e-9;
const CROSS_EPSILON: f64 = 1e-12;

/// Repair `outer` with `holes` into zero or more valid polygons.
pub fn correct(outer: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<Polygon> {
    let outers = split_ring(outer);
    if outers.is_empty() {
        log::trace!("outer ring of {} points discarded", outer.len());
        return Vec::new();
    }

    // Pieces wound against the dominant piece and lying inside another
    // piece are loops enclosing background; they become holes.
    let dominant = outers
        .iter()
        .map(|r| signed_area(r))
        .fold(0.0_f64, |best, a| if a.abs() > best.abs() { a } else { best })
        .signum();
    let (mut kept, loops): (Vec<_>, Vec<_>) = outers
        .into_iter()
        .partition(|r| signed_area(r).signum() == dominant);
    let mut hole_rings: Vec<Vec<Vec2>> = Vec::new();
    for r in loops {
        let sample = sample_point(&r, &kept);
        if kept.iter().any(|o| ring_contains(o, sample)) {
            hole_rings.push(r);
        } else {
            kept.push(r);
        }
    }
    let mut outers = kept;
    for ring in &mut outers {
        orient(ring, true);
    }

    for hole in holes {
        let pieces = split_ring(hole);
        if pieces.is_empty() {
            log::trace!("hole of {} points discarded", hole.len());
        }
        hole_rings.extend(pieces);
    }
    for ring in &mut hole_rings {
        orient(ring, false);
    }

    nudge_shared_vertices(&outers, &mut hole_rings);

    let mut assigned: Vec<Vec<Vec<Vec2>>> = vec![Vec::new(); outers.len()];
    for hole in hole_rings {
        let sample = sample_point(&hole, &outers);
        match outers.iter().position(|o| ring_contains(o, sample)) {
            Some(i) => assigned[i].push(hole),
            None => log::trace!("hole not inside any outer ring, discarded"),
        }
    }

    outers
        .into_iter()
        .zip(assigned)
        .map(|(outer, holes)| Polygon::with_holes(outer, holes))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Reverse `ring` if its winding does not match `clockwise`.
pub fn orient(ring: &mut [Vec2], clockwise: bool) {
    if (signed_area(ring) > 0.0) != clockwise {
        ring.reverse();
    }
}

// ============================================================================
// Cleanup
// ============================================================================

/// Remove duplicates, collinear points and spikes until stable.
pub fn clean_ring(ring: &[Vec2]) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(ring.len());
    for &p in ring {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }

    loop {
        let n = out.len();
        if n < 3 {
            return out;
        }
        let before = n;
        let mut kept = Vec::with_capacity(n);
        for i in 0..n {
            let prev = kept.last().copied().unwrap_or(out[(i + n - 1) % n]);
            let cur = out[i];
            let next = out[(i + 1) % n];
            if cur == prev || (cur - prev).cross(next - cur).abs() <= CROSS_EPSILON {
                continue;
            }
            kept.push(cur);
        }
        out = kept;
        if out.len() == before {
            return out;
        }
    }
}

// ============================================================================
// Splitting
// ============================================================================

/// Clean and split a ring into simple pieces with non-zero area.
pub fn split_ring(ring: &[Vec2]) -> Vec<Vec<Vec2>> {
    let mut pieces = Vec::new();
    let mut stack = vec![clean_ring(ring)];
    while let Some(r) = stack.pop() {
        if r.len() < 3 {
            continue;
        }
        if let Some((i, j)) = find_repeated_vertex(&r) {
            log::trace!("ring split at repeated vertex ({}, {})", r[i].x, r[i].y);
            let inner = r[i..j].to_vec();
            let mut rest = r[..i].to_vec();
            rest.extend_from_slice(&r[j..]);
            stack.push(clean_ring(&rest));
            stack.push(clean_ring(&inner));
            continue;
        }
        if let Some((i, j, x)) = find_intersection(&r) {
            log::trace!("ring split at crossing ({}, {})", x.x, x.y);
            let mut inner = vec![x];
            inner.extend_from_slice(&r[i + 1..=j]);
            let mut rest = r[..=i].to_vec();
            rest.push(x);
            rest.extend_from_slice(&r[j + 1..]);
            stack.push(clean_ring(&rest));
            stack.push(clean_ring(&inner));
            continue;
        }
        if signed_area(&r).abs() > AREA_EPSILON {
            pieces.push(r);
        }
    }
    pieces.reverse();
    pieces
}

/// First vertex index pair `(i, j)`, `i < j`, with equal coordinates.
fn find_repeated_vertex(r: &[Vec2]) -> Option<(usize, usize)> {
    let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(r.len());
    for (j, p) in r.iter().enumerate() {
        // `+ 0.0` folds -0.0 into 0.0.
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        if let Some(&i) = seen.get(&key) {
            return Some((i, j));
        }
        seen.insert(key, j);
    }
    None
}

/// First pair of non-adjacent edges `(i, i+1)` and `(j, j+1)` that cross
/// at a point interior to both, smallest `i` then smallest `j`.
///
/// Edges are swept by their left x; only pairs whose bounding boxes overlap
/// reach the exact crossing test.
fn find_intersection(r: &[Vec2]) -> Option<(usize, usize, Vec2)> {
    let n = r.len();
    if n < 4 {
        return None;
    }
    let edge = |i: usize| (r[i], r[(i + 1) % n]);
    let boxes: Vec<RectD> = (0..n)
        .map(|i| {
            let (a, b) = edge(i);
            RectD::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
        })
        .collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| boxes[a].x1.total_cmp(&boxes[b].x1));

    let mut best: Option<(usize, usize, Vec2)> = None;
    let mut active: Vec<usize> = Vec::new();
    for &e in &order {
        let cur = boxes[e];
        active.retain(|&a| boxes[a].x2 >= cur.x1);
        for &a in &active {
            let other = boxes[a];
            if other.y2 < cur.y1 || cur.y2 < other.y1 {
                continue;
            }
            let (i, j) = (a.min(e), a.max(e));
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            if let Some((bi, bj, _)) = best {
                if (bi, bj) <= (i, j) {
                    continue;
                }
            }
            let ((p0, p1), (q0, q1)) = (edge(i), edge(j));
            if let Some(x) = proper_intersection(p0, p1, q0, q1) {
                best = Some((i, j, x));
            }
        }
        active.push(e);
    }
    best
}

fn proper_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() <= CROSS_EPSILON {
        return None;
    }
    let t = (c - a).cross(s) / denom;
    let u = (c - a).cross(r) / denom;
    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some(a + r * t)
    } else {
        None
    }
}

// ============================================================================
// Holes
// ============================================================================

/// Move hole vertices that coincide with a vertex of any other ring by
/// [`HOLE_NUDGE`] along the bisector of the hole's inward edge normals.
fn nudge_shared_vertices(outers: &[Vec<Vec2>], holes: &mut [Vec<Vec2>]) {
    for h in 0..holes.len() {
        let shared: Vec<usize> = (0..holes[h].len())
            .filter(|&k| {
                let p = holes[h][k];
                outers.iter().flatten().any(|q| *q == p)
                    || holes
                        .iter()
                        .enumerate()
                        .any(|(o, ring)| o != h && ring.contains(&p))
            })
            .collect();
        if shared.is_empty() {
            continue;
        }
        let ring = &holes[h];
        let n = ring.len();
        let sign = signed_area(ring).signum();
        let moved: Vec<(usize, Vec2)> = shared
            .into_iter()
            .map(|k| {
                let prev = ring[(k + n - 1) % n];
                let cur = ring[k];
                let next = ring[(k + 1) % n];
                let inward = |e: Vec2| Vec2::new(-e.y, e.x).normalized() * sign;
                let bisector = (inward(cur - prev) + inward(next - cur)).normalized();
                (k, cur + bisector * HOLE_NUDGE)
            })
            .collect();
        for (k, p) in moved {
            holes[h][k] = p;
        }
    }
}

/// A point of `hole` that is not a vertex of any outer ring, or its
/// centroid when every vertex is shared.
fn sample_point(hole: &[Vec2], outers: &[Vec<Vec2>]) -> Vec2 {
    hole.iter()
        .copied()
        .find(|p| !outers.iter().flatten().any(|q| q == p))
        .unwrap_or_else(|| {
            let n = hole.len().max(1) as f64;
            let sum = hole.iter().fold(Vec2::new(0.0, 0.0), |acc, p| acc + *p);
            sum * (1.0 / n)
        })
}

// ============================================================================
// Tests
// ============================================================================
