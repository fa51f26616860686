//! SSE3 and SSE4.1 variants of the tinted image `paint` kernel.
//!
//! Both variants evaluate `(kd * d * (full - sa) + kc * s * sa) / den` per
//! channel and truncate. Products stay below 2^53 and the quotient below 256,
//! so a correctly rounded `f64` division followed by truncation yields the
//! same integer as the scalar reference division.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::blend::PaintFactors;
use crate::color::Color;

#[inline(always)]
fn pack(c: Color) -> i32 {
    i32::from_le_bytes(c.to_array())
}

/// Truncating division of two `f64` lane pairs by `den`, packed as
/// `[lo.0, lo.1, hi.0, hi.1]` in 32-bit lanes.
#[inline(always)]
unsafe fn div_trunc(num_lo: __m128d, num_hi: __m128d, den: __m128d) -> __m128i {
    let q_lo = _mm_cvttpd_epi32(_mm_div_pd(num_lo, den));
    let q_hi = _mm_cvttpd_epi32(_mm_div_pd(num_hi, den));
    _mm_unpacklo_epi64(q_lo, q_hi)
}

/// Write the low three 32-bit lanes of `q` as r, g, b. Alpha is left alone.
#[inline(always)]
unsafe fn store_rgb(dst: &mut Color, q: __m128i) {
    dst.r = _mm_cvtsi128_si32(q) as u8;
    dst.g = _mm_cvtsi128_si32(_mm_srli_si128(q, 4)) as u8;
    dst.b = _mm_cvtsi128_si32(_mm_srli_si128(q, 8)) as u8;
}

// ============================================================================
// SSE3
// ============================================================================

/// SSE3 kernel: every channel is evaluated in `f64` lanes.
///
/// # Safety
/// The CPU must support SSE3.
#[target_feature(enable = "sse3")]
pub unsafe fn paint_row_sse3(dst: &mut [Color], src: &[Color], tint: Color) {
    let f = PaintFactors::new(tint);
    let full = f.full as f64;
    let v_kd = _mm_set1_pd(f.kd as f64);
    let v_kc_rg = _mm_set_pd(f.kc[1] as f64, f.kc[0] as f64);
    let v_kc_b = _mm_set_pd(0.0, f.kc[2] as f64);
    let v_den = _mm_set1_pd(f.den as f64);

    for (d, s) in dst.iter_mut().zip(src) {
        let sa = (s.a as u32 * f.alpha_scale) as f64;
        let da = full - sa;
        let v_sa = _mm_loaddup_pd(&sa);
        let v_da = _mm_movedup_pd(_mm_set_sd(da));

        let d_rg = _mm_set_pd(d.g as f64, d.r as f64);
        let d_b = _mm_set_pd(0.0, d.b as f64);
        let s_rg = _mm_set_pd(s.g as f64, s.r as f64);
        let s_b = _mm_set_pd(0.0, s.b as f64);

        let num_rg = _mm_add_pd(
            _mm_mul_pd(_mm_mul_pd(d_rg, v_kd), v_da),
            _mm_mul_pd(_mm_mul_pd(s_rg, v_kc_rg), v_sa),
        );
        let num_b = _mm_add_pd(
            _mm_mul_pd(_mm_mul_pd(d_b, v_kd), v_da),
            _mm_mul_pd(_mm_mul_pd(s_b, v_kc_b), v_sa),
        );

        store_rgb(d, div_trunc(num_rg, num_b, v_den));
    }
}

// ============================================================================
// SSE4.1
// ============================================================================

/// SSE4.1 kernel: pixels are widened to 32-bit lanes. The three specialized
/// tint cases fit in `i32` products; the general case widens to `f64`.
///
/// # Safety
/// The CPU must support SSE4.1.
#[target_feature(enable = "sse4.1")]
pub unsafe fn paint_row_sse41(dst: &mut [Color], src: &[Color], tint: Color) {
    let f = PaintFactors::new(tint);
    let v_den = _mm_set1_pd(f.den as f64);
    let zero = _mm_setzero_si128();

    if f.den < 255 * 255 * 255 {
        // Largest numerator is 255 * 255 * 255, well inside i32.
        let v_kd = _mm_set_epi32(0, f.kd as i32, f.kd as i32, f.kd as i32);
        let v_kc = _mm_set_epi32(0, f.kc[2] as i32, f.kc[1] as i32, f.kc[0] as i32);

        for (d, s) in dst.iter_mut().zip(src) {
            let vd = _mm_cvtepu8_epi32(_mm_cvtsi32_si128(pack(*d)));
            let vs = _mm_cvtepu8_epi32(_mm_cvtsi32_si128(pack(*s)));
            let sa = (s.a as u32 * f.alpha_scale) as i32;
            let v_sa = _mm_set1_epi32(sa);
            let v_da = _mm_set1_epi32(f.full as i32 - sa);

            let num = _mm_add_epi32(
                _mm_mullo_epi32(_mm_mullo_epi32(vd, v_kd), v_da),
                _mm_mullo_epi32(_mm_mullo_epi32(vs, v_kc), v_sa),
            );
            let num_lo = _mm_cvtepi32_pd(num);
            let num_hi = _mm_cvtepi32_pd(_mm_unpackhi_epi64(num, num));
            let q = div_trunc(num_lo, num_hi, v_den);

            let bytes = _mm_packus_epi16(_mm_packus_epi32(q, zero), zero);
            let [r, g, b, _] = _mm_cvtsi128_si32(bytes).to_le_bytes();
            d.r = r;
            d.g = g;
            d.b = b;
        }
    } else {
        let v_kd = _mm_set1_pd(f.kd as f64);
        let v_kc_rg = _mm_set_pd(f.kc[1] as f64, f.kc[0] as f64);
        let v_kc_b = _mm_set_pd(0.0, f.kc[2] as f64);
        let full = f.full as f64;

        for (d, s) in dst.iter_mut().zip(src) {
            let vd = _mm_cvtepu8_epi32(_mm_cvtsi32_si128(pack(*d)));
            let vs = _mm_cvtepu8_epi32(_mm_cvtsi32_si128(pack(*s)));
            let d_rg = _mm_cvtepi32_pd(vd);
            let d_ba = _mm_cvtepi32_pd(_mm_unpackhi_epi64(vd, vd));
            let s_rg = _mm_cvtepi32_pd(vs);
            let s_ba = _mm_cvtepi32_pd(_mm_unpackhi_epi64(vs, vs));

            let sa = (s.a as u32 * f.alpha_scale) as f64;
            let v_sa = _mm_set1_pd(sa);
            let v_da = _mm_set1_pd(full - sa);

            let num_rg = _mm_add_pd(
                _mm_mul_pd(_mm_mul_pd(d_rg, v_kd), v_da),
                _mm_mul_pd(_mm_mul_pd(s_rg, v_kc_rg), v_sa),
            );
            let num_ba = _mm_add_pd(
                _mm_mul_pd(_mm_mul_pd(d_ba, v_kd), v_da),
                _mm_mul_pd(_mm_mul_pd(s_ba, v_kc_b), v_sa),
            );

            store_rgb(d, div_trunc(num_rg, num_ba, v_den));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
