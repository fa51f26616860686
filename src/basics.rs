//! Foundation types shared by every rasterizer and painter in the crate.
//!
//! Integer and floating-point points, corner-form rectangles, the 16.16
//! fixed-point constants used by the scan converter, and the rounding helpers
//! that convert between them.

use core::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Fixed point
// ============================================================================

/// Number of fractional bits in the scan converter's fixed-point coordinates.
pub const XY_SHIFT: i32 = 16;
/// `1.0` in 16.16 fixed point.
pub const XY_ONE: i32 = 1 << XY_SHIFT;

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round to the nearest integer, half away from zero.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Floor toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Ceiling as a signed integer.
#[inline]
pub fn iceil(v: f64) -> i32 {
    v.ceil() as i32
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two inclusive corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Clip this rectangle to the intersection with `r`.
    /// Returns `true` if the result is a valid (non-empty) rectangle.
    pub fn clip(&mut self, r: &Self) -> bool {
        if self.x2 > r.x2 {
            self.x2 = r.x2;
        }
        if self.y2 > r.y2 {
            self.y2 = r.y2;
        }
        if self.x1 < r.x1 {
            self.x1 = r.x1;
        }
        if self.y1 < r.y1 {
            self.y1 = r.y1;
        }
        self.is_valid()
    }

    /// Returns `true` if the rectangle is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if the point (x, y) is inside the rectangle.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Grow the rectangle so that it also covers `(x, y)`.
    pub fn add_point(&mut self, x: T, y: T) {
        if x < self.x1 {
            self.x1 = x;
        }
        if x > self.x2 {
            self.x2 = x;
        }
        if y < self.y1 {
            self.y1 = y;
        }
        if y > self.y2 {
            self.y2 = y;
        }
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;
/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

impl RectD {
    /// Bounding box of a point set, `None` when empty.
    pub fn bounding(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut r = RectD::new(first.x, first.y, first.x, first.y);
        for p in rest {
            r.add_point(p.x, p.y);
        }
        Some(r)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Integer pixel coordinate.
pub type Point = PointBase<i32>;
/// Floating-point coordinate in pixel space.
pub type Vec2 = PointBase<f64>;

impl<T: Copy + Add<Output = T>> Add for PointBase<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Copy + Sub<Output = T>> Sub for PointBase<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Copy + Neg<Output = T>> Neg for PointBase<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl Point {
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

impl Vec2 {
    /// Truncate toward zero into pixel coordinates.
    #[inline]
    pub fn as_point(self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    #[inline]
    pub fn dot(self, o: Vec2) -> f64 {
        self.x * o.x + self.y * o.y
    }

    /// z component of the 3D cross product.
    #[inline]
    pub fn cross(self, o: Vec2) -> f64 {
        self.x * o.y - self.y * o.x
    }

    #[inline]
    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance_from(self, o: Vec2) -> f64 {
        (self - o).length()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::default()
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
