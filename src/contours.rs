//! Border following on binary masks (Suzuki and Abe, 1985).
//!
//! Foreground is 8-connected, background 4-connected. Each traced border
//! is stored as its corner points only: runs of equal steps are collapsed.
//!
//! Directions are numbered counter-clockwise on screen starting east:
//! `0 = E, 1 = NE, 2 = N, 3 = NW, 4 = W, 5 = SW, 6 = S, 7 = SE`.

use crate::basics::Point;
use crate::mask::BinaryMask;

/// Which borders [`find_contours`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalMode {
    /// Outermost borders only.
    External,
    /// Outer borders and their holes. Holes point at the outer border they
    /// bound; outer borders have no parent, including islands inside holes.
    #[default]
    TwoLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point>,
    pub is_hole: bool,
    /// Index of the enclosing contour in the returned list.
    pub parent: Option<usize>,
}

const STEPS: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One border found by the raster scan.
struct Border {
    points: Vec<Point>,
    is_hole: bool,
    /// Border number of the parent; 1 is the mask frame.
    parent: i32,
}

/// Label image with a one-pixel zero frame around the mask.
struct Labels {
    stride: i32,
    data: Vec<i32>,
}

impl Labels {
    fn new(mask: &BinaryMask) -> Self {
        let (w, h) = (mask.width() as i32, mask.height() as i32);
        let stride = w + 2;
        let mut data = vec![0i32; (stride * (h + 2)) as usize];
        for y in 0..h {
            for x in 0..w {
                if mask.get(x as u32, y as u32) {
                    data[((y + 1) * stride + x + 1) as usize] = 1;
                }
            }
        }
        Self { stride, data }
    }

    #[inline]
    fn at(&self, x: i32, y: i32) -> i32 {
        self.data[(y * self.stride + x) as usize]
    }

    #[inline]
    fn set(&mut self, x: i32, y: i32, v: i32) {
        self.data[(y * self.stride + x) as usize] = v;
    }

    #[inline]
    fn neighbour(&self, p: Point, dir: usize) -> (Point, i32) {
        let (dx, dy) = STEPS[dir];
        let q = Point::new(p.x + dx, p.y + dy);
        (q, self.at(q.x, q.y))
    }

    /// Trace the border starting at `start` whose known zero neighbour
    /// lies in direction `from`, labelling it `nbd`.
    fn follow(&mut self, start: Point, from: usize, nbd: i32) -> Vec<Point> {
        let to_mask = |p: Point| Point::new(p.x - 1, p.y - 1);

        // Clockwise search for the first non-zero neighbour.
        let Some(first_dir) = (0..8)
            .map(|k| (from + 8 - k) % 8)
            .find(|&d| self.neighbour(start, d).1 != 0)
        else {
            self.set(start.x, start.y, -nbd);
            return vec![to_mask(start)];
        };
        let first = self.neighbour(start, first_dir).0;

        let mut points = Vec::new();
        let mut prev = first;
        let mut cur = start;
        loop {
            points.push(to_mask(cur));

            // Counter-clockwise search, starting after the previous pixel.
            let back = direction(cur, prev);
            let mut east_zero = false;
            let mut next = prev;
            for k in 1..=8 {
                let d = (back + k) % 8;
                let (q, v) = self.neighbour(cur, d);
                if v != 0 {
                    next = q;
                    break;
                }
                if d == 0 {
                    east_zero = true;
                }
            }

            if east_zero {
                self.set(cur.x, cur.y, -nbd);
            } else if self.at(cur.x, cur.y) == 1 {
                self.set(cur.x, cur.y, nbd);
            }

            if next == start && cur == first {
                break;
            }
            prev = cur;
            cur = next;
        }
        points
    }
}

#[inline]
fn direction(from: Point, to: Point) -> usize {
    let d = (to.x - from.x, to.y - from.y);
    STEPS.iter().position(|&s| s == d).unwrap_or(0)
}

/// Drop points whose incoming and outgoing steps are equal.
fn compress_chain(points: Vec<Point>) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points;
    }
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            (cur.x - prev.x, cur.y - prev.y) != (next.x - cur.x, next.y - cur.y)
        })
        .map(|i| points[i])
        .collect()
}

fn trace_borders(mask: &BinaryMask) -> Vec<Border> {
    // Index 0 is unused so that border number `n` lives at `borders[n - 1]`;
    // the frame is border 1 and counts as a hole.
    let mut borders = vec![Border {
        points: Vec::new(),
        is_hole: true,
        parent: 0,
    }];
    if mask.is_empty() {
        return borders;
    }

    let mut labels = Labels::new(mask);
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    let mut nbd = 1;

    for y in 1..=h {
        let mut lnbd = 1;
        for x in 1..=w {
            let f = labels.at(x, y);
            let start = Point::new(x, y);
            let from = if f == 1 && labels.at(x - 1, y) == 0 {
                Some((4, false))
            } else if f >= 1 && labels.at(x + 1, y) == 0 {
                if f > 1 {
                    lnbd = f;
                }
                Some((0, true))
            } else {
                None
            };

            if let Some((from, is_hole)) = from {
                nbd += 1;
                let last = &borders[(lnbd - 1) as usize];
                let parent = if is_hole == last.is_hole { last.parent } else { lnbd };
                let points = labels.follow(start, from, nbd);
                borders.push(Border {
                    points: compress_chain(points),
                    is_hole,
                    parent,
                });
            }

            let v = labels.at(x, y);
            if v != 0 && v != 1 {
                lnbd = v.abs();
            }
        }
    }
    borders
}

/// Trace the borders of `mask`.
pub fn find_contours(mask: &BinaryMask, mode: RetrievalMode) -> Vec<Contour> {
    let borders = trace_borders(mask);
    // Output index of each border number, when kept.
    let mut index: Vec<Option<usize>> = vec![None; borders.len() + 1];
    let mut out = Vec::new();

    for (i, b) in borders.iter().enumerate().skip(1) {
        let nbd = i + 1;
        let keep = match mode {
            RetrievalMode::External => !b.is_hole && b.parent == 1,
            RetrievalMode::TwoLevel => true,
        };
        if !keep {
            continue;
        }
        let parent = if b.is_hole {
            index[b.parent as usize]
        } else {
            None
        };
        index[nbd] = Some(out.len());
        out.push(Contour {
            points: b.points.clone(),
            is_hole: b.is_hole,
            parent,
        });
    }

    log::debug!("traced {} borders, kept {} ({:?})", borders.len() - 1, out.len(), mode);
    out
}

// ============================================================================
// Tests
// ============================================================================
