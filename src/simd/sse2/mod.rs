//! 128-bit x86 backend.
//!
//! SSE2 is the baseline. When the build enables SSE4.1 or SSE4.2, the
//! operations those extensions add (64-bit compares, blendv, the wider
//! min/max family) are used directly; otherwise the sequences in
//! [`emulate`] stand in for them.
//!
//! | element | eq                | gt                      | min / max               |
//! |---------|-------------------|-------------------------|-------------------------|
//! | i8      | `pcmpeqb`         | `pcmpgtb`               | SSE4.1 or blend         |
//! | u8      | `pcmpeqb`         | sign flip + `pcmpgtb`   | `pminub` / `pmaxub`     |
//! | i16     | `pcmpeqw`         | `pcmpgtw`               | `pminsw` / `pmaxsw`     |
//! | u16     | `pcmpeqw`         | sign flip + `pcmpgtw`   | SSE4.1 or `psubusw`     |
//! | i32     | `pcmpeqd`         | `pcmpgtd`               | SSE4.1 or blend         |
//! | u32     | `pcmpeqd`         | sign flip + `pcmpgtd`   | SSE4.1 or blend         |
//! | i64     | SSE4.1 or halves  | SSE4.2 or halves        | blend                   |
//! | u64     | SSE4.1 or halves  | sign flip + i64 gt      | blend                   |
//! | f32/f64 | `cmpeqps/pd`      | `cmpgtps/pd`            | n/a                     |

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub(crate) mod emulate;

use crate::simd::traits::{max_via_blend, min_via_blend, Backend, IntLane, NativeLane};

/// 128-bit SSE2 backend (SSE4.x refinements when enabled at build time).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sse2;

impl Backend for Sse2 {
    const NAME: &'static str = "sse2";
    const REGISTER_BYTES: usize = 16;
}

macro_rules! sse2_int_lane {
    (
        $t:ty, lanes = $lanes:expr, splat = |$v:ident| $splat:expr,
        eq = $eq:expr, gt = $gt:expr $(,)?
    ) => {
        impl NativeLane<Sse2> for $t {
            type Reg = __m128i;
            type MaskReg = __m128i;

            const LANES: usize = $lanes;

            #[inline(always)]
            fn zero() -> __m128i {
                unsafe { _mm_setzero_si128() }
            }

            #[inline(always)]
            fn splat($v: Self) -> __m128i {
                unsafe { $splat }
            }

            #[inline(always)]
            fn load(src: &[Self]) -> __m128i {
                assert!(src.len() >= $lanes, "load needs {} lanes, got {}", $lanes, src.len());
                // SAFETY: length checked above; unaligned load.
                unsafe { _mm_loadu_si128(src.as_ptr() as *const __m128i) }
            }

            #[inline(always)]
            fn store(reg: __m128i, dst: &mut [Self]) {
                assert!(dst.len() >= $lanes, "store needs {} lanes, got {}", $lanes, dst.len());
                // SAFETY: length checked above; unaligned store.
                unsafe { _mm_storeu_si128(dst.as_mut_ptr() as *mut __m128i, reg) }
            }

            #[inline(always)]
            fn unmask(mask: __m128i) -> __m128i {
                mask
            }

            #[inline(always)]
            fn to_mask(reg: __m128i) -> __m128i {
                reg
            }

            #[inline(always)]
            #[allow(unused_unsafe)]
            fn cmp_eq(a: __m128i, b: __m128i) -> __m128i {
                unsafe {
                    $eq(a, b)
                }
            }

            #[inline(always)]
            #[allow(unused_unsafe)]
            fn cmp_gt(a: __m128i, b: __m128i) -> __m128i {
                unsafe {
                    $gt(a, b)
                }
            }

            #[inline(always)]
            fn blend(on_true: __m128i, on_false: __m128i, mask: __m128i) -> __m128i {
                emulate::blend_si128(on_true, on_false, mask)
            }

            #[inline(always)]
            fn mask_and(a: __m128i, b: __m128i) -> __m128i {
                unsafe { _mm_and_si128(a, b) }
            }

            #[inline(always)]
            fn mask_or(a: __m128i, b: __m128i) -> __m128i {
                unsafe { _mm_or_si128(a, b) }
            }

            #[inline(always)]
            fn mask_not(a: __m128i) -> __m128i {
                unsafe { _mm_xor_si128(a, _mm_set1_epi32(-1)) }
            }
        }
    };
}

sse2_int_lane!(i8, lanes = 16, splat = |v| _mm_set1_epi8(v), eq = _mm_cmpeq_epi8, gt = _mm_cmpgt_epi8);
sse2_int_lane!(u8, lanes = 16, splat = |v| _mm_set1_epi8(v as i8), eq = _mm_cmpeq_epi8, gt = emulate::cmpgt_epu8);
sse2_int_lane!(i16, lanes = 8, splat = |v| _mm_set1_epi16(v), eq = _mm_cmpeq_epi16, gt = _mm_cmpgt_epi16);
sse2_int_lane!(u16, lanes = 8, splat = |v| _mm_set1_epi16(v as i16), eq = _mm_cmpeq_epi16, gt = emulate::cmpgt_epu16);
sse2_int_lane!(i32, lanes = 4, splat = |v| _mm_set1_epi32(v), eq = _mm_cmpeq_epi32, gt = _mm_cmpgt_epi32);
sse2_int_lane!(u32, lanes = 4, splat = |v| _mm_set1_epi32(v as i32), eq = _mm_cmpeq_epi32, gt = emulate::cmpgt_epu32);
sse2_int_lane!(i64, lanes = 2, splat = |v| _mm_set1_epi64x(v), eq = emulate::cmpeq_epi64, gt = emulate::cmpgt_epi64);
sse2_int_lane!(u64, lanes = 2, splat = |v| _mm_set1_epi64x(v as i64), eq = emulate::cmpeq_epi64, gt = emulate::cmpgt_epu64);

macro_rules! sse2_int_minmax {
    ($($t:ty => $min:expr, $max:expr);* $(;)?) => {
        $(
            impl IntLane<Sse2> for $t {
                #[inline(always)]
                #[allow(unused_unsafe)]
                fn min(a: __m128i, b: __m128i) -> __m128i {
                    unsafe {
                        $min(a, b)
                    }
                }

                #[inline(always)]
                #[allow(unused_unsafe)]
                fn max(a: __m128i, b: __m128i) -> __m128i {
                    unsafe {
                        $max(a, b)
                    }
                }
            }
        )*
    };
}

sse2_int_minmax! {
    i8 => emulate::min_epi8, emulate::max_epi8;
    u8 => _mm_min_epu8, _mm_max_epu8;
    i16 => _mm_min_epi16, _mm_max_epi16;
    u16 => emulate::min_epu16, emulate::max_epu16;
    i32 => emulate::min_epi32, emulate::max_epi32;
    u32 => emulate::min_epu32, emulate::max_epu32;
    i64 => min_via_blend::<i64, Sse2>, max_via_blend::<i64, Sse2>;
    u64 => min_via_blend::<u64, Sse2>, max_via_blend::<u64, Sse2>;
}

impl NativeLane<Sse2> for f32 {
    type Reg = __m128;
    type MaskReg = __m128;

    const LANES: usize = 4;

    #[inline(always)]
    fn zero() -> __m128 {
        unsafe { _mm_setzero_ps() }
    }

    #[inline(always)]
    fn splat(value: f32) -> __m128 {
        unsafe { _mm_set1_ps(value) }
    }

    #[inline(always)]
    fn load(src: &[f32]) -> __m128 {
        assert!(src.len() >= 4, "load needs 4 lanes, got {}", src.len());
        // SAFETY: length checked above.
        unsafe { _mm_loadu_ps(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(reg: __m128, dst: &mut [f32]) {
        assert!(dst.len() >= 4, "store needs 4 lanes, got {}", dst.len());
        // SAFETY: length checked above.
        unsafe { _mm_storeu_ps(dst.as_mut_ptr(), reg) }
    }

    #[inline(always)]
    fn unmask(mask: __m128) -> __m128 {
        mask
    }

    #[inline(always)]
    fn to_mask(reg: __m128) -> __m128 {
        reg
    }

    /// Ordered, quiet: NaN lanes are false.
    #[inline(always)]
    fn cmp_eq(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpeq_ps(a, b) }
    }

    #[inline(always)]
    fn cmp_gt(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpgt_ps(a, b) }
    }

    #[inline(always)]
    fn blend(on_true: __m128, on_false: __m128, mask: __m128) -> __m128 {
        emulate::blend_ps(on_true, on_false, mask)
    }

    #[inline(always)]
    fn mask_and(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_and_ps(a, b) }
    }

    #[inline(always)]
    fn mask_or(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_or_ps(a, b) }
    }

    #[inline(always)]
    fn mask_not(a: __m128) -> __m128 {
        unsafe { _mm_xor_ps(a, _mm_castsi128_ps(_mm_set1_epi32(-1))) }
    }
}

impl NativeLane<Sse2> for f64 {
    type Reg = __m128d;
    type MaskReg = __m128d;

    const LANES: usize = 2;

    #[inline(always)]
    fn zero() -> __m128d {
        unsafe { _mm_setzero_pd() }
    }

    #[inline(always)]
    fn splat(value: f64) -> __m128d {
        unsafe { _mm_set1_pd(value) }
    }

    #[inline(always)]
    fn load(src: &[f64]) -> __m128d {
        assert!(src.len() >= 2, "load needs 2 lanes, got {}", src.len());
        // SAFETY: length checked above.
        unsafe { _mm_loadu_pd(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(reg: __m128d, dst: &mut [f64]) {
        assert!(dst.len() >= 2, "store needs 2 lanes, got {}", dst.len());
        // SAFETY: length checked above.
        unsafe { _mm_storeu_pd(dst.as_mut_ptr(), reg) }
    }

    #[inline(always)]
    fn unmask(mask: __m128d) -> __m128d {
        mask
    }

    #[inline(always)]
    fn to_mask(reg: __m128d) -> __m128d {
        reg
    }

    #[inline(always)]
    fn cmp_eq(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmpeq_pd(a, b) }
    }

    #[inline(always)]
    fn cmp_gt(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmpgt_pd(a, b) }
    }

    #[inline(always)]
    fn blend(on_true: __m128d, on_false: __m128d, mask: __m128d) -> __m128d {
        emulate::blend_pd(on_true, on_false, mask)
    }

    #[inline(always)]
    fn mask_and(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_and_pd(a, b) }
    }

    #[inline(always)]
    fn mask_or(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_or_pd(a, b) }
    }

    #[inline(always)]
    fn mask_not(a: __m128d) -> __m128d {
        unsafe { _mm_xor_pd(a, _mm_castsi128_pd(_mm_set1_epi32(-1))) }
    }
}
