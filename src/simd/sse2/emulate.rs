//! Integer operations SSE2 lacks, built from 32-bit and narrower primitives.
//!
//! Each public helper picks the single instruction when the build enables the
//! extension that provides it (SSE4.1 / SSE4.2) and falls back to the SSE2
//! sequence otherwise. The fallback sequences are also exported under
//! `*_sse2` names so they are exercised on every x86 build.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// Sign-bit flips: reorder unsigned values so that a signed compare gives the
// unsigned answer.

#[inline(always)]
pub(crate) fn flip_sign_epi8(a: __m128i) -> __m128i {
    unsafe { _mm_xor_si128(a, _mm_set1_epi8(i8::MIN)) }
}

#[inline(always)]
pub(crate) fn flip_sign_epi16(a: __m128i) -> __m128i {
    unsafe { _mm_xor_si128(a, _mm_set1_epi16(i16::MIN)) }
}

#[inline(always)]
pub(crate) fn flip_sign_epi32(a: __m128i) -> __m128i {
    unsafe { _mm_xor_si128(a, _mm_set1_epi32(i32::MIN)) }
}

#[inline(always)]
pub(crate) fn flip_sign_epi64(a: __m128i) -> __m128i {
    unsafe { _mm_xor_si128(a, _mm_set1_epi64x(i64::MIN)) }
}

#[inline(always)]
pub(crate) fn cmpgt_epu8(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_cmpgt_epi8(flip_sign_epi8(a), flip_sign_epi8(b)) }
}

#[inline(always)]
pub(crate) fn cmpgt_epu16(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_cmpgt_epi16(flip_sign_epi16(a), flip_sign_epi16(b)) }
}

#[inline(always)]
pub(crate) fn cmpgt_epu32(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_cmpgt_epi32(flip_sign_epi32(a), flip_sign_epi32(b)) }
}

/// `a > b` for unsigned 64-bit lanes.
#[inline(always)]
pub(crate) fn cmpgt_epu64(a: __m128i, b: __m128i) -> __m128i {
    cmpgt_epi64(flip_sign_epi64(a), flip_sign_epi64(b))
}

/// 64-bit equality: both 32-bit halves equal.
#[cfg_attr(target_feature = "sse4.1", allow(dead_code))]
#[inline(always)]
pub(crate) fn cmpeq_epi64_sse2(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let eq32 = _mm_cmpeq_epi32(a, b);
        // swap the halves of each 64-bit lane
        let swapped = _mm_shuffle_epi32::<0xB1>(eq32);
        _mm_and_si128(eq32, swapped)
    }
}

/// Signed 64-bit `a > b`: the high halves compare greater (signed), or they
/// are equal and the low halves compare greater (unsigned).
#[cfg_attr(target_feature = "sse4.2", allow(dead_code))]
#[inline(always)]
pub(crate) fn cmpgt_epi64_sse2(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let gt = _mm_cmpgt_epi32(a, b);
        let eq = _mm_cmpeq_epi32(a, b);
        let gt_low = cmpgt_epu32(a, b);

        // 0xF5 broadcasts each high dword over its lane, 0xA0 each low dword.
        let hi_gt = _mm_shuffle_epi32::<0xF5>(gt);
        let hi_eq = _mm_shuffle_epi32::<0xF5>(eq);
        let lo_gt = _mm_shuffle_epi32::<0xA0>(gt_low);

        _mm_or_si128(hi_gt, _mm_and_si128(hi_eq, lo_gt))
    }
}

#[inline(always)]
pub(crate) fn cmpeq_epi64(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_feature = "sse4.1")]
    {
        unsafe { _mm_cmpeq_epi64(a, b) }
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        cmpeq_epi64_sse2(a, b)
    }
}

#[inline(always)]
pub(crate) fn cmpgt_epi64(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_feature = "sse4.2")]
    {
        unsafe { _mm_cmpgt_epi64(a, b) }
    }
    #[cfg(not(target_feature = "sse4.2"))]
    {
        cmpgt_epi64_sse2(a, b)
    }
}

/// `mask ? on_true : on_false` with and/andnot/or.
#[cfg_attr(target_feature = "sse4.1", allow(dead_code))]
#[inline(always)]
pub(crate) fn blend_si128_sse2(on_true: __m128i, on_false: __m128i, mask: __m128i) -> __m128i {
    unsafe { _mm_or_si128(_mm_and_si128(mask, on_true), _mm_andnot_si128(mask, on_false)) }
}

#[inline(always)]
pub(crate) fn blend_si128(on_true: __m128i, on_false: __m128i, mask: __m128i) -> __m128i {
    #[cfg(target_feature = "sse4.1")]
    {
        unsafe { _mm_blendv_epi8(on_false, on_true, mask) }
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        blend_si128_sse2(on_true, on_false, mask)
    }
}

#[inline(always)]
pub(crate) fn blend_ps(on_true: __m128, on_false: __m128, mask: __m128) -> __m128 {
    #[cfg(target_feature = "sse4.1")]
    {
        unsafe { _mm_blendv_ps(on_false, on_true, mask) }
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        unsafe { _mm_or_ps(_mm_and_ps(mask, on_true), _mm_andnot_ps(mask, on_false)) }
    }
}

#[inline(always)]
pub(crate) fn blend_pd(on_true: __m128d, on_false: __m128d, mask: __m128d) -> __m128d {
    #[cfg(target_feature = "sse4.1")]
    {
        unsafe { _mm_blendv_pd(on_false, on_true, mask) }
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        unsafe { _mm_or_pd(_mm_and_pd(mask, on_true), _mm_andnot_pd(mask, on_false)) }
    }
}

// Min/max. SSE2 only has u8 and i16; the rest arrive with SSE4.1 or are
// compare-and-blend.

macro_rules! minmax_sse41_or_blend {
    ($min:ident, $max:ident, $min41:ident, $max41:ident, $gt:expr) => {
        #[inline(always)]
        pub(crate) fn $min(a: __m128i, b: __m128i) -> __m128i {
            #[cfg(target_feature = "sse4.1")]
            {
                unsafe { $min41(a, b) }
            }
            #[cfg(not(target_feature = "sse4.1"))]
            {
                blend_si128(b, a, $gt(a, b))
            }
        }

        #[inline(always)]
        pub(crate) fn $max(a: __m128i, b: __m128i) -> __m128i {
            #[cfg(target_feature = "sse4.1")]
            {
                unsafe { $max41(a, b) }
            }
            #[cfg(not(target_feature = "sse4.1"))]
            {
                blend_si128(a, b, $gt(a, b))
            }
        }
    };
}

minmax_sse41_or_blend!(min_epi8, max_epi8, _mm_min_epi8, _mm_max_epi8, |a, b| unsafe {
    _mm_cmpgt_epi8(a, b)
});
minmax_sse41_or_blend!(min_epi32, max_epi32, _mm_min_epi32, _mm_max_epi32, |a, b| unsafe {
    _mm_cmpgt_epi32(a, b)
});
minmax_sse41_or_blend!(min_epu32, max_epu32, _mm_min_epu32, _mm_max_epu32, cmpgt_epu32);

/// Unsigned 16-bit minimum via saturating subtraction: `a - sat(a - b)`.
#[cfg_attr(target_feature = "sse4.1", allow(dead_code))]
#[inline(always)]
pub(crate) fn min_epu16_sse2(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_sub_epi16(a, _mm_subs_epu16(a, b)) }
}

/// Unsigned 16-bit maximum: `b + sat(a - b)`.
#[cfg_attr(target_feature = "sse4.1", allow(dead_code))]
#[inline(always)]
pub(crate) fn max_epu16_sse2(a: __m128i, b: __m128i) -> __m128i {
    unsafe { _mm_add_epi16(b, _mm_subs_epu16(a, b)) }
}

#[inline(always)]
pub(crate) fn min_epu16(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_feature = "sse4.1")]
    {
        unsafe { _mm_min_epu16(a, b) }
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        min_epu16_sse2(a, b)
    }
}

#[inline(always)]
pub(crate) fn max_epu16(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_feature = "sse4.1")]
    {
        unsafe { _mm_max_epu16(a, b) }
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        max_epu16_sse2(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::mem::transmute;

    fn from_i64(lanes: [i64; 2]) -> __m128i {
        unsafe { transmute(lanes) }
    }

    fn from_u32(lanes: [u32; 4]) -> __m128i {
        unsafe { transmute(lanes) }
    }

    fn from_u16(lanes: [u16; 8]) -> __m128i {
        unsafe { transmute(lanes) }
    }

    fn to_u64(reg: __m128i) -> [u64; 2] {
        unsafe { transmute(reg) }
    }

    fn to_u32(reg: __m128i) -> [u32; 4] {
        unsafe { transmute(reg) }
    }

    fn to_u16(reg: __m128i) -> [u16; 8] {
        unsafe { transmute(reg) }
    }

    fn mask64(lanes: [bool; 2]) -> [u64; 2] {
        lanes.map(|lane| if lane { u64::MAX } else { 0 })
    }

    #[test]
    fn test_eq64_needs_both_halves() {
        // low halves equal, high halves differ
        let a = from_i64([0x0000_0001_0000_0005, 7]);
        let b = from_i64([0x0000_0002_0000_0005, 7]);
        assert_eq!(to_u64(cmpeq_epi64_sse2(a, b)), mask64([false, true]));
        assert_eq!(to_u64(cmpeq_epi64(a, b)), mask64([false, true]));
    }

    #[test]
    fn test_gt64_low_half_is_unsigned() {
        // equal high halves; low halves 0x8000_0000 vs 0x7fff_ffff
        let a = from_i64([0x0000_0000_8000_0000, -1]);
        let b = from_i64([0x0000_0000_7fff_ffff, 0]);
        assert_eq!(to_u64(cmpgt_epi64_sse2(a, b)), mask64([true, false]));
        assert_eq!(to_u64(cmpgt_epi64(a, b)), mask64([true, false]));
    }

    #[test]
    fn test_gt64_high_half_is_signed() {
        let a = from_i64([i64::MAX, i64::MIN]);
        let b = from_i64([i64::MIN, i64::MAX]);
        assert_eq!(to_u64(cmpgt_epi64_sse2(a, b)), mask64([true, false]));
    }

    #[test]
    fn test_gtu64_sign_flip() {
        let a = from_i64([-1, 1]);
        let b = from_i64([1, -1]);
        // as u64: MAX > 1, 1 < MAX
        assert_eq!(to_u64(cmpgt_epu64(a, b)), mask64([true, false]));
    }

    #[test]
    fn test_gtu32_sign_flip() {
        let a = from_u32([0x8000_0000, 1, u32::MAX, 0]);
        let b = from_u32([1, 0x8000_0000, 0, 0]);
        assert_eq!(to_u32(cmpgt_epu32(a, b)), [u32::MAX, 0, u32::MAX, 0]);
    }

    #[test]
    fn test_blend_fallback_matches_select() {
        let on = from_u32([1, 2, 3, 4]);
        let off = from_u32([5, 6, 7, 8]);
        let mask = from_u32([u32::MAX, 0, 0, u32::MAX]);
        assert_eq!(to_u32(blend_si128_sse2(on, off, mask)), [1, 6, 7, 4]);
        assert_eq!(to_u32(blend_si128(on, off, mask)), [1, 6, 7, 4]);
    }

    #[test]
    fn test_random_64bit_emulation_against_scalar() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..2000 {
            let a: [i64; 2] = [rng.random(), rng.random()];
            // share the high half half of the time so the low-half path is hit
            let b: [i64; 2] = if rng.random_bool(0.5) {
                [a[0] ^ rng.random_range(0..=u32::MAX as i64), rng.random()]
            } else {
                [rng.random(), a[1]]
            };

            let eq = to_u64(cmpeq_epi64_sse2(from_i64(a), from_i64(b)));
            let gt = to_u64(cmpgt_epi64_sse2(from_i64(a), from_i64(b)));
            let gtu = to_u64(cmpgt_epu64(from_i64(a), from_i64(b)));

            for i in 0..2 {
                assert_eq!(eq[i] != 0, a[i] == b[i], "eq {} {}", a[i], b[i]);
                assert_eq!(gt[i] != 0, a[i] > b[i], "gt {} {}", a[i], b[i]);
                assert_eq!(gtu[i] != 0, (a[i] as u64) > (b[i] as u64), "gtu {} {}", a[i], b[i]);
            }
        }
    }

    #[test]
    fn test_u16_saturating_min_max() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let a: [u16; 8] = std::array::from_fn(|_| rng.random());
            let b: [u16; 8] = std::array::from_fn(|_| rng.random());

            let lo = to_u16(min_epu16_sse2(from_u16(a), from_u16(b)));
            let hi = to_u16(max_epu16_sse2(from_u16(a), from_u16(b)));

            for i in 0..8 {
                assert_eq!(lo[i], a[i].min(b[i]));
                assert_eq!(hi[i], a[i].max(b[i]));
            }
        }
    }

    #[test]
    fn test_min_max_u32_extremes() {
        let a = from_u32([0, u32::MAX, 0x8000_0000, 5]);
        let b = from_u32([u32::MAX, 0, 0x7fff_ffff, 5]);
        assert_eq!(to_u32(min_epu32(a, b)), [0, 0, 0x7fff_ffff, 5]);
        assert_eq!(to_u32(max_epu32(a, b)), [u32::MAX, u32::MAX, 0x8000_0000, 5]);
    }
}
