//! 256-bit AVX2 backend.
//!
//! AVX2 has native signed compares for every integer width, including
//! 64-bit, and min/max for all widths up to 32 bits. Unsigned `gt` still
//! goes through the sign flip and 64-bit min/max through compare-and-blend.
//! Float compares use the ordered, non-signalling predicates so NaN lanes
//! compare false.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::traits::{max_via_blend, min_via_blend, Backend, IntLane, NativeLane};

/// 256-bit AVX2 backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Avx2;

impl Backend for Avx2 {
    const NAME: &'static str = "avx2";
    const REGISTER_BYTES: usize = 32;
}

macro_rules! flip_then {
    ($name:ident, $set1:ident, $min:expr, $gt:ident) => {
        #[inline(always)]
        fn $name(a: __m256i, b: __m256i) -> __m256i {
            unsafe {
                let sign = $set1($min);
                $gt(_mm256_xor_si256(a, sign), _mm256_xor_si256(b, sign))
            }
        }
    };
}

flip_then!(cmpgt_epu8, _mm256_set1_epi8, i8::MIN, _mm256_cmpgt_epi8);
flip_then!(cmpgt_epu16, _mm256_set1_epi16, i16::MIN, _mm256_cmpgt_epi16);
flip_then!(cmpgt_epu32, _mm256_set1_epi32, i32::MIN, _mm256_cmpgt_epi32);
flip_then!(cmpgt_epu64, _mm256_set1_epi64x, i64::MIN, _mm256_cmpgt_epi64);

macro_rules! avx2_int_lane {
    ($t:ty, lanes = $lanes:expr, splat = |$v:ident| $splat:expr, eq = $eq:ident, gt = $gt:ident $(,)?) => {
        impl NativeLane<Avx2> for $t {
            type Reg = __m256i;
            type MaskReg = __m256i;

            const LANES: usize = $lanes;

            #[inline(always)]
            fn zero() -> __m256i {
                unsafe { _mm256_setzero_si256() }
            }

            #[inline(always)]
            fn splat($v: Self) -> __m256i {
                unsafe { $splat }
            }

            #[inline(always)]
            fn load(src: &[Self]) -> __m256i {
                assert!(src.len() >= $lanes, "load needs {} lanes, got {}", $lanes, src.len());
                // SAFETY: length checked above; unaligned load.
                unsafe { _mm256_loadu_si256(src.as_ptr() as *const __m256i) }
            }

            #[inline(always)]
            fn store(reg: __m256i, dst: &mut [Self]) {
                assert!(dst.len() >= $lanes, "store needs {} lanes, got {}", $lanes, dst.len());
                // SAFETY: length checked above; unaligned store.
                unsafe { _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, reg) }
            }

            #[inline(always)]
            fn unmask(mask: __m256i) -> __m256i {
                mask
            }

            #[inline(always)]
            fn to_mask(reg: __m256i) -> __m256i {
                reg
            }

            #[inline(always)]
            #[allow(unused_unsafe)]
            fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
                unsafe { $eq(a, b) }
            }

            #[inline(always)]
            #[allow(unused_unsafe)]
            fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
                unsafe { $gt(a, b) }
            }

            #[inline(always)]
            fn blend(on_true: __m256i, on_false: __m256i, mask: __m256i) -> __m256i {
                unsafe { _mm256_blendv_epi8(on_false, on_true, mask) }
            }

            #[inline(always)]
            fn mask_and(a: __m256i, b: __m256i) -> __m256i {
                unsafe { _mm256_and_si256(a, b) }
            }

            #[inline(always)]
            fn mask_or(a: __m256i, b: __m256i) -> __m256i {
                unsafe { _mm256_or_si256(a, b) }
            }

            #[inline(always)]
            fn mask_not(a: __m256i) -> __m256i {
                unsafe { _mm256_xor_si256(a, _mm256_set1_epi32(-1)) }
            }
        }
    };
}

avx2_int_lane!(i8, lanes = 32, splat = |v| _mm256_set1_epi8(v), eq = _mm256_cmpeq_epi8, gt = _mm256_cmpgt_epi8);
avx2_int_lane!(u8, lanes = 32, splat = |v| _mm256_set1_epi8(v as i8), eq = _mm256_cmpeq_epi8, gt = cmpgt_epu8);
avx2_int_lane!(i16, lanes = 16, splat = |v| _mm256_set1_epi16(v), eq = _mm256_cmpeq_epi16, gt = _mm256_cmpgt_epi16);
avx2_int_lane!(u16, lanes = 16, splat = |v| _mm256_set1_epi16(v as i16), eq = _mm256_cmpeq_epi16, gt = cmpgt_epu16);
avx2_int_lane!(i32, lanes = 8, splat = |v| _mm256_set1_epi32(v), eq = _mm256_cmpeq_epi32, gt = _mm256_cmpgt_epi32);
avx2_int_lane!(u32, lanes = 8, splat = |v| _mm256_set1_epi32(v as i32), eq = _mm256_cmpeq_epi32, gt = cmpgt_epu32);
avx2_int_lane!(i64, lanes = 4, splat = |v| _mm256_set1_epi64x(v), eq = _mm256_cmpeq_epi64, gt = _mm256_cmpgt_epi64);
avx2_int_lane!(u64, lanes = 4, splat = |v| _mm256_set1_epi64x(v as i64), eq = _mm256_cmpeq_epi64, gt = cmpgt_epu64);

macro_rules! avx2_int_minmax {
    ($($t:ty => $min:ident, $max:ident);* $(;)?) => {
        $(
            impl IntLane<Avx2> for $t {
                #[inline(always)]
                fn min(a: __m256i, b: __m256i) -> __m256i {
                    unsafe { $min(a, b) }
                }

                #[inline(always)]
                fn max(a: __m256i, b: __m256i) -> __m256i {
                    unsafe { $max(a, b) }
                }
            }
        )*
    };
}

avx2_int_minmax! {
    i8 => _mm256_min_epi8, _mm256_max_epi8;
    u8 => _mm256_min_epu8, _mm256_max_epu8;
    i16 => _mm256_min_epi16, _mm256_max_epi16;
    u16 => _mm256_min_epu16, _mm256_max_epu16;
    i32 => _mm256_min_epi32, _mm256_max_epi32;
    u32 => _mm256_min_epu32, _mm256_max_epu32;
}

// no 64-bit min/max below AVX-512
macro_rules! avx2_blend_minmax {
    ($($t:ty),*) => {
        $(
            impl IntLane<Avx2> for $t {
                #[inline(always)]
                fn min(a: __m256i, b: __m256i) -> __m256i {
                    min_via_blend::<$t, Avx2>(a, b)
                }

                #[inline(always)]
                fn max(a: __m256i, b: __m256i) -> __m256i {
                    max_via_blend::<$t, Avx2>(a, b)
                }
            }
        )*
    };
}

avx2_blend_minmax!(i64, u64);

impl NativeLane<Avx2> for f32 {
    type Reg = __m256;
    type MaskReg = __m256;

    const LANES: usize = 8;

    #[inline(always)]
    fn zero() -> __m256 {
        unsafe { _mm256_setzero_ps() }
    }

    #[inline(always)]
    fn splat(value: f32) -> __m256 {
        unsafe { _mm256_set1_ps(value) }
    }

    #[inline(always)]
    fn load(src: &[f32]) -> __m256 {
        assert!(src.len() >= 8, "load needs 8 lanes, got {}", src.len());
        // SAFETY: length checked above.
        unsafe { _mm256_loadu_ps(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(reg: __m256, dst: &mut [f32]) {
        assert!(dst.len() >= 8, "store needs 8 lanes, got {}", dst.len());
        // SAFETY: length checked above.
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), reg) }
    }

    #[inline(always)]
    fn unmask(mask: __m256) -> __m256 {
        mask
    }

    #[inline(always)]
    fn to_mask(reg: __m256) -> __m256 {
        reg
    }

    #[inline(always)]
    fn cmp_eq(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_EQ_OQ>(a, b) }
    }

    #[inline(always)]
    fn cmp_gt(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_GT_OQ>(a, b) }
    }

    #[inline(always)]
    fn blend(on_true: __m256, on_false: __m256, mask: __m256) -> __m256 {
        unsafe { _mm256_blendv_ps(on_false, on_true, mask) }
    }

    #[inline(always)]
    fn mask_and(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_and_ps(a, b) }
    }

    #[inline(always)]
    fn mask_or(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_or_ps(a, b) }
    }

    #[inline(always)]
    fn mask_not(a: __m256) -> __m256 {
        unsafe { _mm256_xor_ps(a, _mm256_castsi256_ps(_mm256_set1_epi32(-1))) }
    }
}

impl NativeLane<Avx2> for f64 {
    type Reg = __m256d;
    type MaskReg = __m256d;

    const LANES: usize = 4;

    #[inline(always)]
    fn zero() -> __m256d {
        unsafe { _mm256_setzero_pd() }
    }

    #[inline(always)]
    fn splat(value: f64) -> __m256d {
        unsafe { _mm256_set1_pd(value) }
    }

    #[inline(always)]
    fn load(src: &[f64]) -> __m256d {
        assert!(src.len() >= 4, "load needs 4 lanes, got {}", src.len());
        // SAFETY: length checked above.
        unsafe { _mm256_loadu_pd(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(reg: __m256d, dst: &mut [f64]) {
        assert!(dst.len() >= 4, "store needs 4 lanes, got {}", dst.len());
        // SAFETY: length checked above.
        unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), reg) }
    }

    #[inline(always)]
    fn unmask(mask: __m256d) -> __m256d {
        mask
    }

    #[inline(always)]
    fn to_mask(reg: __m256d) -> __m256d {
        reg
    }

    #[inline(always)]
    fn cmp_eq(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_EQ_OQ>(a, b) }
    }

    #[inline(always)]
    fn cmp_gt(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_GT_OQ>(a, b) }
    }

    #[inline(always)]
    fn blend(on_true: __m256d, on_false: __m256d, mask: __m256d) -> __m256d {
        unsafe { _mm256_blendv_pd(on_false, on_true, mask) }
    }

    #[inline(always)]
    fn mask_and(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_and_pd(a, b) }
    }

    #[inline(always)]
    fn mask_or(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_or_pd(a, b) }
    }

    #[inline(always)]
    fn mask_not(a: __m256d) -> __m256d {
        unsafe { _mm256_xor_pd(a, _mm256_castsi256_pd(_mm256_set1_epi32(-1))) }
    }
}
