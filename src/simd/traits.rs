//! Element, backend and dispatcher traits.
//!
//! A [`Backend`] is a zero-sized marker naming one instruction-set family. For
//! every element type the backend supports, it implements [`NativeLane`]
//! (and [`IntLane`] for integers): these impls are the instruction-selection
//! layer, each method acting on exactly one native register pair.

use std::fmt::Debug;

use num::{Float, PrimInt, Zero};

/// Scalar element types a vector lane can hold.
pub trait Element:
    Copy + Debug + Default + PartialEq + PartialOrd + Zero + Send + Sync + 'static
{
    /// Unsigned integer of the same width, used to inspect raw lane bits.
    type Bits: PrimInt + Debug;

    /// Raw bit pattern of the value.
    fn to_bits(self) -> Self::Bits;

    /// Value with the given raw bit pattern.
    fn from_bits(bits: Self::Bits) -> Self;

    /// The "true" lane of a mask: every bit set.
    #[inline(always)]
    fn all_ones() -> Self {
        Self::from_bits(!<Self::Bits as Zero>::zero())
    }
}

/// Integer element types. Ordered operations like `min` are only defined here.
pub trait IntElement: Element + PrimInt {}

/// IEEE-754 element types.
pub trait FloatElement: Element + Float {}

macro_rules! int_element {
    ($($t:ty => $bits:ty),* $(,)?) => {
        $(
            impl Element for $t {
                type Bits = $bits;

                #[inline(always)]
                fn to_bits(self) -> $bits {
                    self as $bits
                }

                #[inline(always)]
                fn from_bits(bits: $bits) -> Self {
                    bits as $t
                }
            }

            impl IntElement for $t {}
        )*
    };
}

int_element! {
    i8 => u8, u8 => u8,
    i16 => u16, u16 => u16,
    i32 => u32, u32 => u32,
    i64 => u64, u64 => u64,
}

macro_rules! float_element {
    ($($t:ty => $bits:ty),* $(,)?) => {
        $(
            impl Element for $t {
                type Bits = $bits;

                #[inline(always)]
                fn to_bits(self) -> $bits {
                    <$t>::to_bits(self)
                }

                #[inline(always)]
                fn from_bits(bits: $bits) -> Self {
                    <$t>::from_bits(bits)
                }
            }

            impl FloatElement for $t {}
        )*
    };
}

float_element! { f32 => u32, f64 => u64 }

/// Marker for one compiled-in instruction-set family.
pub trait Backend: Copy + Default + Debug + Send + Sync + 'static {
    /// Short identifier, matching the `simd_arch` cfg value.
    const NAME: &'static str;

    /// Width of one native register in bytes.
    const REGISTER_BYTES: usize;
}

/// Per-backend instruction selection for one element type.
///
/// Every method is a pure function of its register inputs. For a given
/// operation and element type, all backends must produce bit-identical lane
/// results; only the instruction sequence differs.
pub trait NativeLane<B: Backend>: Element {
    /// Data register holding [`Self::LANES`] elements.
    type Reg: Copy;

    /// Comparison-result register. Lanes are all-ones or all-zeros once
    /// converted with [`NativeLane::unmask`].
    type MaskReg: Copy;

    /// Number of elements in one native register.
    const LANES: usize;

    fn zero() -> Self::Reg;

    fn splat(value: Self) -> Self::Reg;

    /// Loads the first `LANES` elements of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` holds fewer than `LANES` elements.
    fn load(src: &[Self]) -> Self::Reg;

    /// Stores all `LANES` elements into the front of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` holds fewer than `LANES` elements.
    fn store(reg: Self::Reg, dst: &mut [Self]);

    /// Reinterprets a mask as data: true lanes become all-ones bit patterns.
    fn unmask(mask: Self::MaskReg) -> Self::Reg;

    /// Reinterprets data as a mask. The caller guarantees every lane is either
    /// all-ones or all-zeros.
    fn to_mask(reg: Self::Reg) -> Self::MaskReg;

    /// `r = (a == b) ? ones : 0` per lane. Unordered floats compare false.
    fn cmp_eq(a: Self::Reg, b: Self::Reg) -> Self::MaskReg;

    /// `r = (a > b) ? ones : 0` per lane, respecting the element's signedness.
    /// Unordered floats compare false.
    fn cmp_gt(a: Self::Reg, b: Self::Reg) -> Self::MaskReg;

    /// `r = mask ? on_true : on_false` per lane.
    fn blend(on_true: Self::Reg, on_false: Self::Reg, mask: Self::MaskReg) -> Self::Reg;

    fn mask_and(a: Self::MaskReg, b: Self::MaskReg) -> Self::MaskReg;

    fn mask_or(a: Self::MaskReg, b: Self::MaskReg) -> Self::MaskReg;

    fn mask_not(a: Self::MaskReg) -> Self::MaskReg;
}

/// Ordered integer operations.
pub trait IntLane<B: Backend>: NativeLane<B> + IntElement {
    fn min(a: Self::Reg, b: Self::Reg) -> Self::Reg;

    fn max(a: Self::Reg, b: Self::Reg) -> Self::Reg;
}

/// Min/max for backends without a dedicated instruction: compare, then blend.
#[inline(always)]
pub(crate) fn min_via_blend<T: NativeLane<B>, B: Backend>(a: T::Reg, b: T::Reg) -> T::Reg {
    T::blend(b, a, T::cmp_gt(a, b))
}

#[inline(always)]
pub(crate) fn max_via_blend<T: NativeLane<B>, B: Backend>(a: T::Reg, b: T::Reg) -> T::Reg {
    T::blend(a, b, T::cmp_gt(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ones_integers() {
        assert_eq!(i8::all_ones(), -1);
        assert_eq!(u16::all_ones(), u16::MAX);
        assert_eq!(i64::all_ones(), -1);
        assert_eq!(u64::all_ones(), u64::MAX);
    }

    #[test]
    fn test_all_ones_floats_is_nan_pattern() {
        assert!(f32::all_ones().is_nan());
        assert_eq!(Element::to_bits(f32::all_ones()), u32::MAX);
        assert_eq!(Element::to_bits(f64::all_ones()), u64::MAX);
    }

    #[test]
    fn test_bits_round_trip_sign_bit() {
        assert_eq!(Element::to_bits(i32::MIN), 0x8000_0000u32);
        assert_eq!(<i32 as Element>::from_bits(0x8000_0000), i32::MIN);
        assert_eq!(Element::to_bits(-0.0f64), 0x8000_0000_0000_0000u64);
    }
}
