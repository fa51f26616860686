//! 8-bit RGBA color.
//!
//! Pixels are stored as `Color` values in memory order R, G, B, A, so a
//! pixel row is a contiguous run of 4-byte groups that the SIMD kernels can
//! load directly.

/// RGBA color with u8 components.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// All four channels are 255.
    #[inline]
    pub fn is_opaque_white(&self) -> bool {
        self.r == 255 && self.g == 255 && self.b == 255 && self.a == 255
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// R, G and B are 255, regardless of alpha.
    #[inline]
    pub fn is_white_rgb(&self) -> bool {
        self.r == 255 && self.g == 255 && self.b == 255
    }

    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Color::WHITE.is_opaque_white());
        assert!(Color::WHITE.with_alpha(10).is_white_rgb());
        assert!(!Color::WHITE.with_alpha(10).is_opaque_white());
        assert!(Color::BLACK.is_opaque());
        assert!(!Color::TRANSPARENT.is_opaque());
    }

    #[test]
    fn test_layout_is_rgba_bytes() {
        assert_eq!(core::mem::size_of::<Color>(), 4);
        let c = Color::new(1, 2, 3, 4);
        assert_eq!(<[u8; 4]>::from(c), [1, 2, 3, 4]);
        assert_eq!(Color::from([1, 2, 3, 4]), c);
    }
}
