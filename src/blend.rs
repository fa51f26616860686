//! Per-pixel blend rules and the image-block `paint` kernel dispatch.
//!
//! Three compositing modes are shared by every painter:
//!
//! - [`BlendMode::Paint`]: `dst.rgb = dst.rgb * (1 - a) + color.rgb * a`,
//!   destination alpha untouched.
//! - [`BlendMode::Stamp`]: as `Paint`, but destination alpha becomes
//!   `max(dst.a, color.a)`; a fully transparent destination takes the color.
//! - [`BlendMode::Overwrite`]: the destination becomes the color.
//!
//! Image-on-image `paint` additionally multiplies the source pixel by a tint
//! color. That kernel exists as a scalar reference and as SSE3 / SSE4.1
//! variants ([`PaintKernel`]); all of them truncate and produce identical
//! bytes.

use std::sync::OnceLock;

use crate::color::Color;
use crate::cpu_info::{cpu_features, CpuFeatures};

// ============================================================================
// Blend modes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Paint,
    Stamp,
    Overwrite,
}

#[inline]
fn mix(d: u8, c: u8, a: u32) -> u8 {
    ((d as u32 * (255 - a) + c as u32 * a) / 255) as u8
}

/// Blend `c` over `dst`, keeping the destination alpha.
#[inline]
pub fn paint_pixel(dst: &mut Color, c: Color) {
    if c.a == 255 {
        dst.r = c.r;
        dst.g = c.g;
        dst.b = c.b;
    } else {
        let a = c.a as u32;
        dst.r = mix(dst.r, c.r, a);
        dst.g = mix(dst.g, c.g, a);
        dst.b = mix(dst.b, c.b, a);
    }
}

/// Blend `c` over `dst`; alpha becomes the larger of the two.
#[inline]
pub fn stamp_pixel(dst: &mut Color, c: Color) {
    if dst.a == 0 {
        *dst = c;
        return;
    }
    paint_pixel(dst, c);
    dst.a = dst.a.max(c.a);
}

#[inline]
pub fn overwrite_pixel(dst: &mut Color, c: Color) {
    *dst = c;
}

#[inline]
pub fn blend_pixel(dst: &mut Color, c: Color, mode: BlendMode) {
    match mode {
        BlendMode::Paint => paint_pixel(dst, c),
        BlendMode::Stamp => stamp_pixel(dst, c),
        BlendMode::Overwrite => overwrite_pixel(dst, c),
    }
}

/// Blend with partial coverage (`cover` 0..=255) from an antialiased edge.
///
/// `Paint` and `Stamp` scale the color's alpha by the coverage. `Overwrite`
/// interpolates every channel, alpha included, from `dst` toward `c`.
#[inline]
pub fn blend_pixel_cover(dst: &mut Color, c: Color, mode: BlendMode, cover: u8) {
    if cover == 0 {
        return;
    }
    if cover == 255 {
        blend_pixel(dst, c, mode);
        return;
    }
    match mode {
        BlendMode::Paint | BlendMode::Stamp => {
            let a = (c.a as u32 * cover as u32 + 127) / 255;
            blend_pixel(dst, c.with_alpha(a as u8), mode);
        }
        BlendMode::Overwrite => {
            let k = cover as i32;
            let lerp = |d: u8, s: u8| (d as i32 + (s as i32 - d as i32) * k / 255) as u8;
            *dst = Color::new(
                lerp(dst.r, c.r),
                lerp(dst.g, c.g),
                lerp(dst.b, c.b),
                lerp(dst.a, c.a),
            );
        }
    }
}

/// Convert a fractional coverage to the 0..=255 scale.
#[inline]
pub fn coverage_to_cover(coverage: f64) -> u8 {
    (coverage.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

// ============================================================================
// Tinted image paint
// ============================================================================

/// The four tint shapes the `paint` kernels specialize on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TintCase {
    /// `(255, 255, 255, 255)`: plain source-over.
    OpaqueWhite,
    /// White color channels, translucent tint: only alpha is multiplied.
    WhiteTranslucent,
    /// Opaque non-white tint: only color is multiplied.
    Opaque,
    /// Both color and alpha are multiplied.
    General,
}

impl TintCase {
    pub fn of(tint: Color) -> Self {
        if tint.is_opaque_white() {
            TintCase::OpaqueWhite
        } else if tint.is_white_rgb() {
            TintCase::WhiteTranslucent
        } else if tint.is_opaque() {
            TintCase::Opaque
        } else {
            TintCase::General
        }
    }
}

/// Integer factors of `dst = (kd * d * (full - sa) + kc * s * sa) / den`,
/// with `sa = src.a * alpha_scale`. All four tint cases reduce to this form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PaintFactors {
    pub alpha_scale: u32,
    pub full: u32,
    pub kd: u32,
    pub kc: [u32; 3],
    pub den: u32,
}

impl PaintFactors {
    pub fn new(tint: Color) -> Self {
        let rgb = [tint.r as u32, tint.g as u32, tint.b as u32];
        match TintCase::of(tint) {
            TintCase::OpaqueWhite => Self {
                alpha_scale: 1,
                full: 255,
                kd: 1,
                kc: [1; 3],
                den: 255,
            },
            TintCase::WhiteTranslucent => Self {
                alpha_scale: tint.a as u32,
                full: 255 * 255,
                kd: 1,
                kc: [1; 3],
                den: 255 * 255,
            },
            TintCase::Opaque => Self {
                alpha_scale: 1,
                full: 255,
                kd: 255,
                kc: rgb,
                den: 255 * 255,
            },
            TintCase::General => Self {
                alpha_scale: tint.a as u32,
                full: 255 * 255,
                kd: 255,
                kc: rgb,
                den: 255 * 255 * 255,
            },
        }
    }
}

/// Reference `paint` of one tinted source pixel. Destination alpha is kept.
#[inline]
pub fn paint_image_pixel(dst: &mut Color, src: Color, tint: Color) {
    let (d, s) = (dst.rgb(), src.rgb());
    let c = [tint.r as u32, tint.g as u32, tint.b as u32];
    let out: [u32; 3] = match TintCase::of(tint) {
        TintCase::OpaqueWhite => {
            let sa = src.a as u32;
            let da = 255 - sa;
            core::array::from_fn(|i| (d[i] as u32 * da + s[i] as u32 * sa) / 255)
        }
        TintCase::WhiteTranslucent => {
            let sa = src.a as u32 * tint.a as u32;
            let da = 255 * 255 - sa;
            core::array::from_fn(|i| (d[i] as u32 * da + s[i] as u32 * sa) / (255 * 255))
        }
        TintCase::Opaque => {
            let sa = src.a as u32;
            let da = 255 - sa;
            core::array::from_fn(|i| {
                (255 * d[i] as u32 * da + c[i] * s[i] as u32 * sa) / (255 * 255)
            })
        }
        TintCase::General => {
            let sa = src.a as u32 * tint.a as u32;
            let da = 255 * 255 - sa;
            core::array::from_fn(|i| {
                (255 * d[i] as u32 * da + c[i] * s[i] as u32 * sa) / (255 * 255 * 255)
            })
        }
    };
    dst.r = out[0] as u8;
    dst.g = out[1] as u8;
    dst.b = out[2] as u8;
}

/// Scalar reference kernel over one row.
pub fn paint_row_reference(dst: &mut [Color], src: &[Color], tint: Color) {
    for (d, s) in dst.iter_mut().zip(src) {
        paint_image_pixel(d, *s, tint);
    }
}

// ============================================================================
// Kernel dispatch
// ============================================================================

/// Implementation strategy for the tinted image `paint` kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintKernel {
    Reference,
    Sse3,
    Sse41,
}

static SELECTED_KERNEL: OnceLock<PaintKernel> = OnceLock::new();

impl PaintKernel {
    /// Best kernel for a feature set.
    pub fn detect(features: &CpuFeatures) -> Self {
        if features.sse41 {
            PaintKernel::Sse41
        } else if features.sse3 {
            PaintKernel::Sse3
        } else {
            PaintKernel::Reference
        }
    }

    /// Kernel chosen for this process, resolved on first use.
    pub fn selected() -> Self {
        *SELECTED_KERNEL.get_or_init(|| {
            let kernel = Self::detect(cpu_features());
            log::debug!("paint kernel selected: {:?}", kernel);
            kernel
        })
    }

    /// Whether the running CPU can execute this kernel.
    pub fn is_supported(self) -> bool {
        let f = cpu_features();
        match self {
            PaintKernel::Reference => true,
            PaintKernel::Sse3 => cfg!(any(target_arch = "x86", target_arch = "x86_64")) && f.sse3,
            PaintKernel::Sse41 => {
                cfg!(any(target_arch = "x86", target_arch = "x86_64")) && f.sse41
            }
        }
    }

    /// Paint `src` tinted by `tint` over `dst`, pixel by pixel.
    ///
    /// Only the common prefix of the two rows is processed. Falls back to the
    /// reference kernel when this kernel is not supported.
    pub fn paint_row(self, dst: &mut [Color], src: &[Color], tint: Color) {
        let n = dst.len().min(src.len());
        let (dst, src) = (&mut dst[..n], &src[..n]);

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            let f = cpu_features();
            match self {
                // SAFETY: the required target feature was detected at runtime.
                PaintKernel::Sse41 if f.sse41 => {
                    return unsafe { crate::blend_sse::paint_row_sse41(dst, src, tint) };
                }
                PaintKernel::Sse3 if f.sse3 => {
                    return unsafe { crate::blend_sse::paint_row_sse3(dst, src, tint) };
                }
                _ => {}
            }
        }

        paint_row_reference(dst, src, tint);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic xorshift stream for pixel sweeps.
    fn pseudo_random_colors(seed: u32, n: usize) -> Vec<Color> {
        let mut s = seed | 1;
        (0..n)
            .map(|_| {
                s ^= s << 13;
                s ^= s >> 17;
                s ^= s << 5;
                Color::from(s.to_le_bytes())
            })
            .collect()
    }

    #[test]
    fn test_paint_pixel_keeps_alpha() {
        let mut d = Color::new(0, 0, 0, 77);
        paint_pixel(&mut d, Color::new(255, 0, 0, 255));
        assert_eq!(d, Color::new(255, 0, 0, 77));

        let mut d = Color::new(100, 100, 100, 0);
        paint_pixel(&mut d, Color::new(200, 0, 50, 128));
        assert_eq!(d, Color::new(150, 49, 74, 0));
    }

    #[test]
    fn test_stamp_pixel() {
        let mut d = Color::TRANSPARENT;
        stamp_pixel(&mut d, Color::new(10, 20, 30, 40));
        assert_eq!(d, Color::new(10, 20, 30, 40));

        let mut d = Color::new(0, 0, 0, 200);
        stamp_pixel(&mut d, Color::new(255, 255, 255, 100));
        assert_eq!(d.a, 200);
        let mut d = Color::new(0, 0, 0, 50);
        stamp_pixel(&mut d, Color::new(255, 255, 255, 100));
        assert_eq!(d.a, 100);
    }

    #[test]
    fn test_overwrite_pixel() {
        let mut d = Color::WHITE;
        blend_pixel(&mut d, Color::new(1, 2, 3, 4), BlendMode::Overwrite);
        assert_eq!(d, Color::new(1, 2, 3, 4));
    }

    #[test]
    fn test_cover_extremes() {
        let c = Color::new(200, 100, 0, 255);
        let mut d = Color::BLACK;
        blend_pixel_cover(&mut d, c, BlendMode::Overwrite, 0);
        assert_eq!(d, Color::BLACK);
        blend_pixel_cover(&mut d, c, BlendMode::Overwrite, 255);
        assert_eq!(d, c);

        let mut d = Color::new(0, 0, 0, 0);
        blend_pixel_cover(&mut d, Color::new(255, 255, 255, 255), BlendMode::Overwrite, 128);
        assert_eq!(d, Color::new(128, 128, 128, 128));

        let mut d = Color::new(0, 0, 0, 9);
        blend_pixel_cover(&mut d, Color::WHITE, BlendMode::Paint, 128);
        assert_eq!(d.a, 9);
        assert_eq!(d.r, 128);
    }

    #[test]
    fn test_coverage_to_cover() {
        assert_eq!(coverage_to_cover(-1.0), 0);
        assert_eq!(coverage_to_cover(0.5), 128);
        assert_eq!(coverage_to_cover(2.0), 255);
    }

    #[test]
    fn test_tint_case() {
        assert_eq!(TintCase::of(Color::WHITE), TintCase::OpaqueWhite);
        assert_eq!(TintCase::of(Color::WHITE.with_alpha(3)), TintCase::WhiteTranslucent);
        assert_eq!(TintCase::of(Color::BLACK), TintCase::Opaque);
        assert_eq!(TintCase::of(Color::new(1, 2, 3, 4)), TintCase::General);
    }

    #[test]
    fn test_factors_match_reference() {
        let tints = [
            Color::WHITE,
            Color::WHITE.with_alpha(90),
            Color::new(30, 200, 7, 255),
            Color::new(30, 200, 7, 90),
        ];
        let dst = pseudo_random_colors(7, 512);
        let src = pseudo_random_colors(11, 512);
        for tint in tints {
            let f = PaintFactors::new(tint);
            for (d, s) in dst.iter().zip(&src) {
                let mut expected = *d;
                paint_image_pixel(&mut expected, *s, tint);
                let sa = s.a as u32 * f.alpha_scale;
                let ch = |i: usize, dv: u8, sv: u8| {
                    ((f.kd * dv as u32 * (f.full - sa) + f.kc[i] * sv as u32 * sa) / f.den) as u8
                };
                assert_eq!(expected.r, ch(0, d.r, s.r));
                assert_eq!(expected.g, ch(1, d.g, s.g));
                assert_eq!(expected.b, ch(2, d.b, s.b));
                assert_eq!(expected.a, d.a);
            }
        }
    }

    #[test]
    fn test_opaque_source_special_cases() {
        // Opaque source under a white tint copies the source color.
        let mut d = Color::new(1, 2, 3, 44);
        paint_image_pixel(&mut d, Color::new(90, 80, 70, 255), Color::WHITE);
        assert_eq!(d, Color::new(90, 80, 70, 44));

        // Opaque source under an opaque tint multiplies color.
        let mut d = Color::new(1, 2, 3, 44);
        paint_image_pixel(&mut d, Color::new(255, 128, 0, 255), Color::new(128, 255, 255, 255));
        assert_eq!(d, Color::new(128, 128, 0, 44));
    }

    #[test]
    fn test_kernel_detect() {
        let none = CpuFeatures::default();
        assert_eq!(PaintKernel::detect(&none), PaintKernel::Reference);
        let sse3 = CpuFeatures { sse3: true, sse41: false };
        assert_eq!(PaintKernel::detect(&sse3), PaintKernel::Sse3);
        let all = CpuFeatures { sse3: true, sse41: true };
        assert_eq!(PaintKernel::detect(&all), PaintKernel::Sse41);
        assert!(PaintKernel::selected().is_supported());
    }

    #[test]
    fn test_kernels_bit_identical() {
        let tints = [
            Color::WHITE,
            Color::WHITE.with_alpha(1),
            Color::WHITE.with_alpha(254),
            Color::new(0, 0, 0, 255),
            Color::new(255, 0, 128, 255),
            Color::new(0, 0, 0, 0),
            Color::new(255, 255, 0, 254),
            Color::new(17, 99, 201, 133),
        ];
        let mut src = pseudo_random_colors(3, 4096);
        let mut dst = pseudo_random_colors(5, 4096);
        // Corner values of every channel.
        for a in [0u8, 1, 127, 128, 254, 255] {
            for v in [0u8, 1, 254, 255] {
                src.push(Color::new(v, 255 - v, v, a));
                dst.push(Color::new(255 - v, v, 255, a));
            }
        }

        for tint in tints {
            let mut expected = dst.clone();
            PaintKernel::Reference.paint_row(&mut expected, &src, tint);
            for kernel in [PaintKernel::Sse3, PaintKernel::Sse41] {
                if !kernel.is_supported() {
                    continue;
                }
                let mut out = dst.clone();
                kernel.paint_row(&mut out, &src, tint);
                assert_eq!(out, expected, "{:?} tint {:?}", kernel, tint);
            }
        }
    }

    #[test]
    fn test_paint_row_uses_shorter_length() {
        let mut dst = vec![Color::BLACK; 4];
        let src = vec![Color::WHITE; 2];
        PaintKernel::selected().paint_row(&mut dst, &src, Color::WHITE);
        assert_eq!(dst[1], Color::WHITE);
        assert_eq!(dst[2], Color::BLACK);
    }
}
