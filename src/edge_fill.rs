//! Complex polygon edge filler.
//!
//! Fills any number of contours (an outer ring plus holes) with a global
//! active edge table and even-odd pairing of crossings, producing the same
//! offset list as the scan converter.
//!
//! Edges live in one contiguous array; the active list is threaded through
//! it by index, with [`NONE`] terminating the chain. Crossings are tracked
//! in `i64` 16.16 fixed point, so any `i32` vertex is accepted, and edges
//! are advanced to the first visible row before the scan starts.

use crate::basics::{Point, XY_ONE, XY_SHIFT};
use crate::dda_line::write_line;
use crate::paint_buffer::PaintBuffer;

/// End-of-list marker for [`PolyEdge::next`].
pub const NONE: u32 = u32::MAX;

/// One non-horizontal polygon edge, `y0 < y1`.
///
/// `x` is the 16.16 fixed-point x at the current scanline (initially at
/// `y0`) and `dx` its per-row increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyEdge {
    pub y0: i32,
    pub y1: i32,
    pub x: i64,
    pub dx: i64,
    pub next: u32,
}

impl PolyEdge {
    /// Edge between two integer points, `None` when horizontal.
    pub fn new(p0: Point, p1: Point) -> Option<Self> {
        if p0.y == p1.y {
            return None;
        }
        let (top, bottom) = if p0.y < p1.y { (p0, p1) } else { (p1, p0) };
        let x0 = (top.x as i64) << XY_SHIFT;
        let x1 = (bottom.x as i64) << XY_SHIFT;
        Some(Self {
            y0: top.y,
            y1: bottom.y,
            x: x0,
            dx: (x1 - x0) / (bottom.y as i64 - top.y as i64),
            next: NONE,
        })
    }
}

/// Append the non-horizontal edges of a closed contour.
pub fn collect_poly_edges(contour: &[Point], edges: &mut Vec<PolyEdge>) {
    let Some(&last) = contour.last() else {
        return;
    };
    edges.reserve(contour.len());
    let mut p0 = last;
    for &p1 in contour {
        edges.extend(PolyEdge::new(p0, p1));
        p0 = p1;
    }
}

/// Stroke the closed contour with one-pixel lines.
pub fn stroke_contour(buf: &mut PaintBuffer, contour: &[Point], width: i32, height: i32) {
    let Some(&last) = contour.last() else {
        return;
    };
    let mut p0 = last;
    for &p1 in contour {
        write_line(buf, width, height, p0, p1);
        p0 = p1;
    }
}

// ============================================================================
// Active edge table
// ============================================================================

/// Active list threaded through `edges`.
struct ActiveList<'a> {
    edges: &'a mut [PolyEdge],
    head: u32,
}

impl ActiveList<'_> {
    #[inline]
    fn next_of(&self, prev: u32) -> u32 {
        if prev == NONE {
            self.head
        } else {
            self.edges[prev as usize].next
        }
    }

    #[inline]
    fn set_next(&mut self, prev: u32, value: u32) {
        if prev == NONE {
            self.head = value;
        } else {
            self.edges[prev as usize].next = value;
        }
    }

    #[inline]
    fn x(&self, e: u32) -> i64 {
        self.edges[e as usize].x
    }

    /// Drop edges whose lower end is `y`.
    fn retire(&mut self, y: i32) {
        let mut prev = NONE;
        let mut cur = self.head;
        while cur != NONE {
            let next = self.edges[cur as usize].next;
            if self.edges[cur as usize].y1 == y {
                self.set_next(prev, next);
            } else {
                prev = cur;
            }
            cur = next;
        }
    }

    /// Insert `e` before the first active edge that is not left of it.
    fn insert(&mut self, e: u32) {
        let ex = self.x(e);
        let mut prev = NONE;
        let mut cur = self.head;
        while cur != NONE && self.x(cur) < ex {
            prev = cur;
            cur = self.edges[cur as usize].next;
        }
        self.edges[e as usize].next = cur;
        self.set_next(prev, e);
    }

    /// Bubble sort by x. Adjacent swaps suffice since edges only cross
    /// their neighbours between two scanlines.
    fn sort(&mut self) {
        loop {
            let mut swapped = false;
            let mut prev = NONE;
            let mut cur = self.head;
            while cur != NONE {
                let next = self.edges[cur as usize].next;
                if next == NONE {
                    break;
                }
                if self.x(cur) > self.x(next) {
                    self.edges[cur as usize].next = self.edges[next as usize].next;
                    self.edges[next as usize].next = cur;
                    self.set_next(prev, next);
                    prev = next;
                    swapped = true;
                } else {
                    prev = cur;
                    cur = next;
                }
            }
            if !swapped {
                break;
            }
        }
    }
}

/// Scan-fill the collected edges with the even-odd rule.
///
/// Rows are half-open in y (`y0 <= y < y1`) and spans are half-open in x:
/// a crossing pair `(xl, xr)` covers pixels `ceil(xl) ..= ceil(xr) - 1`.
/// Boundaries are not included; see [`paint_polygon`].
pub fn fill_edge_collection(buf: &mut PaintBuffer, edges: &mut [PolyEdge], width: i32, height: i32) {
    if edges.len() < 2 || width <= 0 || height <= 0 {
        return;
    }

    // Edges above the image start at row 0; edges that never reach a
    // visible row sink to the end of the sort and are never inserted.
    let mut y_min = i32::MAX;
    let mut y_max = i32::MIN;
    for e in edges.iter_mut() {
        debug_assert!(e.y0 < e.y1);
        if e.y1 <= 0 || e.y0 >= height {
            e.y0 = i32::MAX;
            continue;
        }
        if e.y0 < 0 {
            e.x += e.dx * -(e.y0 as i64);
            e.y0 = 0;
        }
        y_min = y_min.min(e.y0);
        y_max = y_max.max(e.y1);
    }
    if y_min > y_max {
        return;
    }

    edges.sort_unstable_by_key(|e| (e.y0, e.x, e.dx));
    for e in edges.iter_mut() {
        e.next = NONE;
    }

    let total = edges.len();
    let y_end = y_max.min(height);
    let row_end = (width as i64) << XY_SHIFT;
    let mut pending = 0usize;
    let mut active = ActiveList {
        edges,
        head: NONE,
    };

    for y in y_min..y_end {
        active.retire(y);
        while pending < total && active.edges[pending].y0 == y {
            active.insert(pending as u32);
            pending += 1;
        }

        // Pair crossings: 1st-2nd, 3rd-4th, ...
        let mut left = active.head;
        while left != NONE {
            let right = active.next_of(left);
            if right == NONE {
                break;
            }
            let (a, b) = (active.x(left), active.x(right));
            let (xl, xr) = if a <= b { (a, b) } else { (b, a) };
            if xr > 0 && xl < row_end {
                let one = XY_ONE as i64;
                let x1 = (xl + one - 1) >> XY_SHIFT;
                let x2 = ((xr + one - 1) >> XY_SHIFT) - 1;
                buf.push_span(width, y, x1.max(0) as i32, x2.min(width as i64 - 1) as i32);
            }
            active.edges[left as usize].x += active.edges[left as usize].dx;
            active.edges[right as usize].x += active.edges[right as usize].dx;
            left = active.next_of(right);
        }

        active.sort();
    }
}

/// Fill the contours (outer ring and holes) and stroke their boundaries.
/// Finishes the buffer.
pub fn paint_polygon(buf: &mut PaintBuffer, contours: &[&[Point]], width: i32, height: i32) {
    let total: usize = contours.iter().map(|c| c.len()).sum();
    let mut edges = Vec::with_capacity(total);
    for contour in contours {
        stroke_contour(buf, contour, width, height);
        collect_poly_edges(contour, &mut edges);
    }
    fill_edge_collection(buf, &mut edges, width, height);
    buf.finish();
}

// ============================================================================
// Tests
// ============================================================================
