//! 128-bit AArch64 NEON backend.
//!
//! NEON compares return unsigned vectors of the element width, so mask
//! registers are `uint*x*_t` while data registers keep the element's own
//! type. AArch64 compares every width natively, including 64-bit lanes and
//! both signednesses; only 64-bit min/max need compare-and-blend.

use std::arch::aarch64::*;
use std::convert::identity;

use crate::simd::traits::{max_via_blend, min_via_blend, Backend, IntLane, NativeLane};

/// 128-bit NEON backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Neon;

impl Backend for Neon {
    const NAME: &'static str = "neon";
    const REGISTER_BYTES: usize = 16;
}

// vmvnq has no 64-bit form.
#[inline(always)]
fn not_u64(a: uint64x2_t) -> uint64x2_t {
    unsafe { veorq_u64(a, vdupq_n_u64(u64::MAX)) }
}

macro_rules! neon_lane {
    (
        $t:ty, $reg:ty, $mask:ty, lanes = $lanes:expr,
        dup = $dup:ident, ld = $ld:ident, st = $st:ident,
        eq = $eq:ident, gt = $gt:ident, bsl = $bsl:ident,
        to_data = $to_data:path, to_mask = $to_mask:path,
        and = $and:ident, or = $or:ident, not = $not:path $(,)?
    ) => {
        impl NativeLane<Neon> for $t {
            type Reg = $reg;
            type MaskReg = $mask;

            const LANES: usize = $lanes;

            #[inline(always)]
            fn zero() -> $reg {
                unsafe { $dup(<$t as num::Zero>::zero()) }
            }

            #[inline(always)]
            fn splat(value: $t) -> $reg {
                unsafe { $dup(value) }
            }

            #[inline(always)]
            fn load(src: &[$t]) -> $reg {
                assert!(src.len() >= $lanes, "load needs {} lanes, got {}", $lanes, src.len());
                // SAFETY: length checked above.
                unsafe { $ld(src.as_ptr()) }
            }

            #[inline(always)]
            fn store(reg: $reg, dst: &mut [$t]) {
                assert!(dst.len() >= $lanes, "store needs {} lanes, got {}", $lanes, dst.len());
                // SAFETY: length checked above.
                unsafe { $st(dst.as_mut_ptr(), reg) }
            }

            #[inline(always)]
            #[allow(unused_unsafe)]
            fn unmask(mask: $mask) -> $reg {
                unsafe { $to_data(mask) }
            }

            #[inline(always)]
            #[allow(unused_unsafe)]
            fn to_mask(reg: $reg) -> $mask {
                unsafe { $to_mask(reg) }
            }

            #[inline(always)]
            fn cmp_eq(a: $reg, b: $reg) -> $mask {
                unsafe { $eq(a, b) }
            }

            #[inline(always)]
            fn cmp_gt(a: $reg, b: $reg) -> $mask {
                unsafe { $gt(a, b) }
            }

            #[inline(always)]
            fn blend(on_true: $reg, on_false: $reg, mask: $mask) -> $reg {
                unsafe { $bsl(mask, on_true, on_false) }
            }

            #[inline(always)]
            fn mask_and(a: $mask, b: $mask) -> $mask {
                unsafe { $and(a, b) }
            }

            #[inline(always)]
            fn mask_or(a: $mask, b: $mask) -> $mask {
                unsafe { $or(a, b) }
            }

            #[inline(always)]
            #[allow(unused_unsafe)]
            fn mask_not(a: $mask) -> $mask {
                unsafe { $not(a) }
            }
        }
    };
}

neon_lane!(
    i8, int8x16_t, uint8x16_t, lanes = 16,
    dup = vdupq_n_s8, ld = vld1q_s8, st = vst1q_s8,
    eq = vceqq_s8, gt = vcgtq_s8, bsl = vbslq_s8,
    to_data = vreinterpretq_s8_u8, to_mask = vreinterpretq_u8_s8,
    and = vandq_u8, or = vorrq_u8, not = vmvnq_u8,
);
neon_lane!(
    u8, uint8x16_t, uint8x16_t, lanes = 16,
    dup = vdupq_n_u8, ld = vld1q_u8, st = vst1q_u8,
    eq = vceqq_u8, gt = vcgtq_u8, bsl = vbslq_u8,
    to_data = identity, to_mask = identity,
    and = vandq_u8, or = vorrq_u8, not = vmvnq_u8,
);
neon_lane!(
    i16, int16x8_t, uint16x8_t, lanes = 8,
    dup = vdupq_n_s16, ld = vld1q_s16, st = vst1q_s16,
    eq = vceqq_s16, gt = vcgtq_s16, bsl = vbslq_s16,
    to_data = vreinterpretq_s16_u16, to_mask = vreinterpretq_u16_s16,
    and = vandq_u16, or = vorrq_u16, not = vmvnq_u16,
);
neon_lane!(
    u16, uint16x8_t, uint16x8_t, lanes = 8,
    dup = vdupq_n_u16, ld = vld1q_u16, st = vst1q_u16,
    eq = vceqq_u16, gt = vcgtq_u16, bsl = vbslq_u16,
    to_data = identity, to_mask = identity,
    and = vandq_u16, or = vorrq_u16, not = vmvnq_u16,
);
neon_lane!(
    i32, int32x4_t, uint32x4_t, lanes = 4,
    dup = vdupq_n_s32, ld = vld1q_s32, st = vst1q_s32,
    eq = vceqq_s32, gt = vcgtq_s32, bsl = vbslq_s32,
    to_data = vreinterpretq_s32_u32, to_mask = vreinterpretq_u32_s32,
    and = vandq_u32, or = vorrq_u32, not = vmvnq_u32,
);
neon_lane!(
    u32, uint32x4_t, uint32x4_t, lanes = 4,
    dup = vdupq_n_u32, ld = vld1q_u32, st = vst1q_u32,
    eq = vceqq_u32, gt = vcgtq_u32, bsl = vbslq_u32,
    to_data = identity, to_mask = identity,
    and = vandq_u32, or = vorrq_u32, not = vmvnq_u32,
);
neon_lane!(
    f32, float32x4_t, uint32x4_t, lanes = 4,
    dup = vdupq_n_f32, ld = vld1q_f32, st = vst1q_f32,
    eq = vceqq_f32, gt = vcgtq_f32, bsl = vbslq_f32,
    to_data = vreinterpretq_f32_u32, to_mask = vreinterpretq_u32_f32,
    and = vandq_u32, or = vorrq_u32, not = vmvnq_u32,
);
neon_lane!(
    i64, int64x2_t, uint64x2_t, lanes = 2,
    dup = vdupq_n_s64, ld = vld1q_s64, st = vst1q_s64,
    eq = vceqq_s64, gt = vcgtq_s64, bsl = vbslq_s64,
    to_data = vreinterpretq_s64_u64, to_mask = vreinterpretq_u64_s64,
    and = vandq_u64, or = vorrq_u64, not = not_u64,
);
neon_lane!(
    u64, uint64x2_t, uint64x2_t, lanes = 2,
    dup = vdupq_n_u64, ld = vld1q_u64, st = vst1q_u64,
    eq = vceqq_u64, gt = vcgtq_u64, bsl = vbslq_u64,
    to_data = identity, to_mask = identity,
    and = vandq_u64, or = vorrq_u64, not = not_u64,
);
neon_lane!(
    f64, float64x2_t, uint64x2_t, lanes = 2,
    dup = vdupq_n_f64, ld = vld1q_f64, st = vst1q_f64,
    eq = vceqq_f64, gt = vcgtq_f64, bsl = vbslq_f64,
    to_data = vreinterpretq_f64_u64, to_mask = vreinterpretq_u64_f64,
    and = vandq_u64, or = vorrq_u64, not = not_u64,
);

macro_rules! neon_int_minmax {
    ($($t:ty => $min:ident, $max:ident);* $(;)?) => {
        $(
            impl IntLane<Neon> for $t {
                #[inline(always)]
                fn min(a: Self::Reg, b: Self::Reg) -> Self::Reg {
                    unsafe { $min(a, b) }
                }

                #[inline(always)]
                fn max(a: Self::Reg, b: Self::Reg) -> Self::Reg {
                    unsafe { $max(a, b) }
                }
            }
        )*
    };
}

neon_int_minmax! {
    i8 => vminq_s8, vmaxq_s8;
    u8 => vminq_u8, vmaxq_u8;
    i16 => vminq_s16, vmaxq_s16;
    u16 => vminq_u16, vmaxq_u16;
    i32 => vminq_s32, vmaxq_s32;
    u32 => vminq_u32, vmaxq_u32;
}

impl IntLane<Neon> for i64 {
    #[inline(always)]
    fn min(a: int64x2_t, b: int64x2_t) -> int64x2_t {
        min_via_blend::<i64, Neon>(a, b)
    }

    #[inline(always)]
    fn max(a: int64x2_t, b: int64x2_t) -> int64x2_t {
        max_via_blend::<i64, Neon>(a, b)
    }
}

impl IntLane<Neon> for u64 {
    #[inline(always)]
    fn min(a: uint64x2_t, b: uint64x2_t) -> uint64x2_t {
        min_via_blend::<u64, Neon>(a, b)
    }

    #[inline(always)]
    fn max(a: uint64x2_t, b: uint64x2_t) -> uint64x2_t {
        max_via_blend::<u64, Neon>(a, b)
    }
}
