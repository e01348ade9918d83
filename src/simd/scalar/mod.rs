//! Portable fallback backend.
//!
//! Registers are plain arrays covering 16 bytes, so lane counts match SSE2
//! and NEON. Comparison results are kept as `bool` lanes and only turned
//! into all-ones bit patterns by `unmask`. Comparisons go through
//! `PartialEq`/`PartialOrd`, which already give IEEE semantics for floats.

use crate::simd::traits::{max_via_blend, min_via_blend, Backend, Element, IntLane, NativeLane};

/// Lane-by-lane backend available on every target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Scalar;

impl Backend for Scalar {
    const NAME: &'static str = "scalar";
    const REGISTER_BYTES: usize = 16;
}

#[inline(always)]
fn map2<T: Copy, R, const L: usize>(a: [T; L], b: [T; L], f: impl Fn(T, T) -> R) -> [R; L] {
    std::array::from_fn(|i| f(a[i], b[i]))
}

macro_rules! scalar_lane {
    ($($t:ty => $lanes:expr),* $(,)?) => {
        $(
            impl NativeLane<Scalar> for $t {
                type Reg = [$t; $lanes];
                type MaskReg = [bool; $lanes];

                const LANES: usize = $lanes;

                #[inline(always)]
                fn zero() -> Self::Reg {
                    [<$t as num::Zero>::zero(); $lanes]
                }

                #[inline(always)]
                fn splat(value: Self) -> Self::Reg {
                    [value; $lanes]
                }

                #[inline(always)]
                fn load(src: &[Self]) -> Self::Reg {
                    assert!(src.len() >= $lanes, "load needs {} lanes, got {}", $lanes, src.len());
                    std::array::from_fn(|i| src[i])
                }

                #[inline(always)]
                fn store(reg: Self::Reg, dst: &mut [Self]) {
                    assert!(dst.len() >= $lanes, "store needs {} lanes, got {}", $lanes, dst.len());
                    dst[..$lanes].copy_from_slice(&reg);
                }

                #[inline(always)]
                fn unmask(mask: Self::MaskReg) -> Self::Reg {
                    mask.map(|lane| if lane { <$t as Element>::all_ones() } else { <$t as num::Zero>::zero() })
                }

                #[inline(always)]
                fn to_mask(reg: Self::Reg) -> Self::MaskReg {
                    reg.map(|lane| Element::to_bits(lane) != 0)
                }

                #[inline(always)]
                fn cmp_eq(a: Self::Reg, b: Self::Reg) -> Self::MaskReg {
                    map2(a, b, |x, y| x == y)
                }

                #[inline(always)]
                fn cmp_gt(a: Self::Reg, b: Self::Reg) -> Self::MaskReg {
                    map2(a, b, |x, y| x > y)
                }

                #[inline(always)]
                fn blend(on_true: Self::Reg, on_false: Self::Reg, mask: Self::MaskReg) -> Self::Reg {
                    std::array::from_fn(|i| if mask[i] { on_true[i] } else { on_false[i] })
                }

                #[inline(always)]
                fn mask_and(a: Self::MaskReg, b: Self::MaskReg) -> Self::MaskReg {
                    map2(a, b, |x, y| x & y)
                }

                #[inline(always)]
                fn mask_or(a: Self::MaskReg, b: Self::MaskReg) -> Self::MaskReg {
                    map2(a, b, |x, y| x | y)
                }

                #[inline(always)]
                fn mask_not(a: Self::MaskReg) -> Self::MaskReg {
                    a.map(|lane| !lane)
                }
            }
        )*
    };
}

scalar_lane! {
    i8 => 16, u8 => 16,
    i16 => 8, u16 => 8,
    i32 => 4, u32 => 4, f32 => 4,
    i64 => 2, u64 => 2, f64 => 2,
}

macro_rules! scalar_int_lane {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntLane<Scalar> for $t {
                #[inline(always)]
                fn min(a: Self::Reg, b: Self::Reg) -> Self::Reg {
                    min_via_blend::<$t, Scalar>(a, b)
                }

                #[inline(always)]
                fn max(a: Self::Reg, b: Self::Reg) -> Self::Reg {
                    max_via_blend::<$t, Scalar>(a, b)
                }
            }
        )*
    };
}

scalar_int_lane!(i8, u8, i16, u16, i32, u32, i64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_counts_cover_sixteen_bytes() {
        assert_eq!(<u8 as NativeLane<Scalar>>::LANES, 16);
        assert_eq!(<i16 as NativeLane<Scalar>>::LANES, 8);
        assert_eq!(<f32 as NativeLane<Scalar>>::LANES, 4);
        assert_eq!(<u64 as NativeLane<Scalar>>::LANES, 2);
    }

    #[test]
    fn test_unsigned_gt_uses_unsigned_order() {
        let a = [0x8000_0000u32, 1, 0, u32::MAX];
        let b = [1u32, 0x8000_0000, 0, u32::MAX - 1];
        assert_eq!(<u32 as NativeLane<Scalar>>::cmp_gt(a, b), [true, false, false, true]);
    }

    #[test]
    fn test_float_nan_is_unordered() {
        let a = [f64::NAN, 1.0];
        let b = [f64::NAN, f64::NAN];
        assert_eq!(<f64 as NativeLane<Scalar>>::cmp_eq(a, b), [false, false]);
        assert_eq!(<f64 as NativeLane<Scalar>>::cmp_gt(a, b), [false, false]);
    }

    #[test]
    fn test_min_max_signed_64() {
        let a = [i64::MIN, 5];
        let b = [0i64, -5];
        assert_eq!(<i64 as IntLane<Scalar>>::min(a, b), [i64::MIN, -5]);
        assert_eq!(<i64 as IntLane<Scalar>>::max(a, b), [0, 5]);
    }

    #[test]
    fn test_unmask_float_lanes_are_all_ones() {
        let data = <f32 as NativeLane<Scalar>>::unmask([true, false, false, true]);
        assert_eq!(Element::to_bits(data[0]), u32::MAX);
        assert_eq!(Element::to_bits(data[1]), 0);
        assert_eq!(<f32 as NativeLane<Scalar>>::to_mask(data), [true, false, false, true]);
    }

    #[test]
    #[should_panic(expected = "load needs")]
    fn test_short_load_panics() {
        <i32 as NativeLane<Scalar>>::load(&[1, 2, 3]);
    }
}
