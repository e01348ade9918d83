//! Single-register wrappers.
//!
//! [`Native`] holds one data register and [`NativeMask`] one comparison
//! result register for the backend `B`. They are the unit the dispatcher
//! works on; logical vectors are sequences of them.

use std::fmt;
use std::marker::PhantomData;
use std::mem::{size_of, transmute_copy};

use num::Zero;
use smallvec::SmallVec;

use crate::simd::traits::{Backend, Element, IntLane, NativeLane};
use crate::simd::Selected;

/// Scratch capacity for one register's lanes (32 x u8 on AVX2).
const MAX_LANES: usize = 32;

/// One native data register of `T` lanes.
pub struct Native<T: NativeLane<B>, B: Backend = Selected> {
    reg: T::Reg,
    _backend: PhantomData<B>,
}

/// One native comparison-result register.
pub struct NativeMask<T: NativeLane<B>, B: Backend = Selected> {
    reg: T::MaskReg,
    _backend: PhantomData<B>,
}

impl<T: NativeLane<B>, B: Backend> Clone for Native<T, B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: NativeLane<B>, B: Backend> Copy for Native<T, B> {}

impl<T: NativeLane<B>, B: Backend> Clone for NativeMask<T, B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: NativeLane<B>, B: Backend> Copy for NativeMask<T, B> {}

impl<T: NativeLane<B>, B: Backend> Native<T, B> {
    /// Number of lanes in one register for this element type and backend.
    pub const LANES: usize = T::LANES;

    #[inline(always)]
    pub fn from_reg(reg: T::Reg) -> Self {
        Self {
            reg,
            _backend: PhantomData,
        }
    }

    /// The raw register value.
    #[inline(always)]
    pub fn reg(self) -> T::Reg {
        self.reg
    }

    /// All-zero register.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::from_reg(<T as NativeLane<B>>::zero())
    }

    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self::from_reg(T::splat(value))
    }

    /// Loads exactly `LANES` elements from the front of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than `LANES`.
    #[inline(always)]
    pub fn load(src: &[T]) -> Self {
        Self::from_reg(T::load(src))
    }

    /// Loads up to `LANES` elements; missing lanes are zero.
    #[inline(always)]
    pub fn load_partial(src: &[T]) -> Self {
        if src.len() >= T::LANES {
            return Self::load(src);
        }

        let mut padded: SmallVec<[T; MAX_LANES]> = SmallVec::from_elem(<T as Zero>::zero(), T::LANES);
        padded[..src.len()].copy_from_slice(src);
        Self::load(&padded)
    }

    /// Stores all `LANES` elements into the front of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `LANES`.
    #[inline(always)]
    pub fn store(self, dst: &mut [T]) {
        T::store(self.reg, dst)
    }

    /// Stores the first `min(dst.len(), LANES)` lanes.
    #[inline(always)]
    pub fn store_partial(self, dst: &mut [T]) {
        if dst.len() >= T::LANES {
            return self.store(dst);
        }

        let mut lanes: SmallVec<[T; MAX_LANES]> = SmallVec::from_elem(<T as Zero>::zero(), T::LANES);
        self.store(&mut lanes);
        let len = dst.len();
        dst.copy_from_slice(&lanes[..len]);
    }

    pub fn to_vec(self) -> Vec<T> {
        let mut lanes = vec![<T as Zero>::zero(); T::LANES];
        self.store(&mut lanes);
        lanes
    }

    /// Reinterprets the register bits as another element type.
    #[inline(always)]
    pub fn bit_cast<U: NativeLane<B>>(self) -> Native<U, B> {
        const {
            assert!(
                size_of::<T::Reg>() == size_of::<U::Reg>(),
                "bit_cast requires registers of identical size"
            )
        };

        // SAFETY: both registers have the same size (checked above) and every
        // bit pattern is a valid value for vector registers and for arrays of
        // primitive numbers.
        Native::from_reg(unsafe { transmute_copy::<T::Reg, U::Reg>(&self.reg) })
    }

    /// Reinterprets the register as a mask; see [`NativeLane::to_mask`].
    #[inline(always)]
    pub fn assume_mask(self) -> NativeMask<T, B> {
        NativeMask::from_reg(T::to_mask(self.reg))
    }

    #[inline(always)]
    pub fn cmp_eq(self, other: Self) -> NativeMask<T, B> {
        NativeMask::from_reg(T::cmp_eq(self.reg, other.reg))
    }

    #[inline(always)]
    pub fn cmp_gt(self, other: Self) -> NativeMask<T, B> {
        NativeMask::from_reg(T::cmp_gt(self.reg, other.reg))
    }

    /// `self < other`, computed as `other > self`.
    #[inline(always)]
    pub fn cmp_lt(self, other: Self) -> NativeMask<T, B> {
        other.cmp_gt(self)
    }

    #[inline(always)]
    pub fn blend(on_true: Self, on_false: Self, mask: NativeMask<T, B>) -> Self {
        Self::from_reg(T::blend(on_true.reg, on_false.reg, mask.reg))
    }
}

impl<T: IntLane<B>, B: Backend> Native<T, B> {
    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        Self::from_reg(<T as IntLane<B>>::min(self.reg, other.reg))
    }

    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        Self::from_reg(<T as IntLane<B>>::max(self.reg, other.reg))
    }
}

impl<T: NativeLane<B>, B: Backend> NativeMask<T, B> {
    #[inline(always)]
    pub fn from_reg(reg: T::MaskReg) -> Self {
        Self {
            reg,
            _backend: PhantomData,
        }
    }

    #[inline(always)]
    pub fn reg(self) -> T::MaskReg {
        self.reg
    }

    /// Data form of the mask: true lanes are all-ones, false lanes zero.
    #[inline(always)]
    pub fn unmask(self) -> Native<T, B> {
        Native::from_reg(T::unmask(self.reg))
    }

    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self::from_reg(T::mask_and(self.reg, other.reg))
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self::from_reg(T::mask_or(self.reg, other.reg))
    }

    #[inline(always)]
    pub fn not(self) -> Self {
        Self::from_reg(T::mask_not(self.reg))
    }

    /// Per-lane truth values of the whole register.
    pub fn to_bools(self) -> Vec<bool> {
        self.unmask()
            .to_vec()
            .into_iter()
            .map(|lane| !lane.to_bits().is_zero())
            .collect()
    }
}

impl<T: NativeLane<B>, B: Backend> fmt::Debug for Native<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Native<{}>", B::NAME)?;
        f.debug_list().entries(self.to_vec()).finish()
    }
}

impl<T: NativeLane<B>, B: Backend> fmt::Debug for NativeMask<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeMask<{}>", B::NAME)?;
        f.debug_list().entries(self.to_bools()).finish()
    }
}
