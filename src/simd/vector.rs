//! Logical vectors of arbitrary declared width.
//!
//! A `Vector<T, N, B>` is ⌈N / LANES⌉ native registers. Lane `i` lives in
//! register `i / LANES` at position `i % LANES`; lanes past `N` in the last
//! register are padding and are never exposed through the lane accessors.

use std::fmt;
use std::mem::size_of;
use std::ops::{Index, IndexMut};

use num::Zero;
use smallvec::SmallVec;

use crate::error::{length_mismatch, native_count_mismatch, Result};
use crate::simd::mask::Mask;
use crate::simd::native::Native;
use crate::simd::traits::{Backend, Element, NativeLane};
use crate::simd::Selected;

/// Registers stored inline before spilling to the heap.
pub(crate) const INLINE_NATIVES: usize = 4;

pub(crate) type Natives<T, B> = SmallVec<[Native<T, B>; INLINE_NATIVES]>;

/// A vector of `N` lanes of `T`, built from native registers of backend `B`.
pub struct Vector<T: NativeLane<B>, const N: usize, B: Backend = Selected> {
    parts: Natives<T, B>,
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Vector<T, N, B> {
    /// Declared number of lanes.
    pub const LEN: usize = {
        assert!(N > 0, "vectors must have at least one lane");
        N
    };

    /// Number of native registers the vector is made of.
    #[inline(always)]
    pub fn native_count() -> usize {
        Self::LEN.div_ceil(T::LANES)
    }

    #[inline(always)]
    pub(crate) fn from_parts_unchecked(parts: Natives<T, B>) -> Self {
        debug_assert_eq!(parts.len(), Self::native_count());
        Self { parts }
    }

    fn from_native(native: Native<T, B>) -> Self {
        Self::from_parts_unchecked(SmallVec::from_elem(native, Self::native_count()))
    }

    /// Vector with every register set to the all-zero register.
    pub fn zero() -> Self {
        Self::from_native(Native::zero())
    }

    /// Vector with every lane set to `value`.
    pub fn splat(value: T) -> Self {
        Self::from_native(Native::splat(value))
    }

    /// Builds a vector from its registers, in lane order.
    ///
    /// # Errors
    ///
    /// Returns [`SimdError::NativeCountMismatch`](crate::error::SimdError) unless
    /// exactly ⌈N / LANES⌉ registers are supplied.
    pub fn from_natives<I>(natives: I) -> Result<Self>
    where
        I: IntoIterator<Item = Native<T, B>>,
    {
        let parts: Natives<T, B> = natives.into_iter().collect();
        let expected = Self::native_count();

        if parts.len() != expected {
            tracing::debug!(
                backend = B::NAME,
                expected,
                actual = parts.len(),
                "rejecting native register sequence"
            );
            return Err(native_count_mismatch(expected, parts.len()));
        }

        Ok(Self::from_parts_unchecked(parts))
    }

    /// Builds a vector from exactly `N` lanes. Padding lanes are zero.
    ///
    /// # Errors
    ///
    /// Returns [`SimdError::LengthMismatch`](crate::error::SimdError) if
    /// `values.len() != N`.
    pub fn from_slice(values: &[T]) -> Result<Self> {
        if values.len() != Self::LEN {
            tracing::debug!(
                backend = B::NAME,
                expected = Self::LEN,
                actual = values.len(),
                "rejecting lane slice"
            );
            return Err(length_mismatch(Self::LEN, values.len()));
        }

        Ok(Self::from_lanes(values))
    }

    pub fn from_array(values: [T; N]) -> Self {
        Self::from_lanes(&values)
    }

    fn from_lanes(values: &[T]) -> Self {
        let parts = values
            .chunks(T::LANES)
            .map(Native::<T, B>::load_partial)
            .collect();
        Self::from_parts_unchecked(parts)
    }

    /// The registers, in lane order.
    #[inline(always)]
    pub fn natives(&self) -> &[Native<T, B>] {
        &self.parts
    }

    #[inline(always)]
    pub fn natives_mut(&mut self) -> &mut [Native<T, B>] {
        &mut self.parts
    }

    /// The `N` logical lanes.
    pub fn to_vec(&self) -> Vec<T> {
        let lanes = T::LANES;
        let mut out = vec![<T as Zero>::zero(); self.parts.len() * lanes];

        for (native, dst) in self.parts.iter().zip(out.chunks_mut(lanes)) {
            native.store(dst);
        }

        out.truncate(Self::LEN);
        out
    }

    pub fn to_array(&self) -> [T; N] {
        let lanes = self.to_vec();
        std::array::from_fn(|i| lanes[i])
    }

    /// Lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn lane(&self, index: usize) -> T {
        assert!(index < Self::LEN, "lane {index} out of range for width {N}");
        let native = self.parts[index / T::LANES];
        native.to_vec()[index % T::LANES]
    }

    /// Reinterprets the raw bits as `M` lanes of `U`. Both sides must cover
    /// the same number of bytes; this is checked at compile time.
    pub fn bit_cast<U: NativeLane<B>, const M: usize>(&self) -> Vector<U, M, B> {
        const {
            assert!(
                N * size_of::<T>() == M * size_of::<U>(),
                "bit_cast requires vectors of identical total width"
            )
        };

        Vector::from_parts_unchecked(self.parts.iter().map(|native| native.bit_cast::<U>()).collect())
    }

    /// Reinterprets the vector as a mask. The caller guarantees each lane is
    /// either all-ones or all-zeros; other patterns give backend-specific
    /// results in later mask operations.
    pub fn assume_mask(&self) -> Mask<T, N, B> {
        Mask::from_parts_unchecked(self.parts.iter().map(|native| native.assume_mask()).collect())
    }

    /// Applies `f` to each pair of corresponding registers.
    #[inline(always)]
    pub(crate) fn zip_natives<R, F>(&self, other: &Self, f: F) -> SmallVec<[R; INLINE_NATIVES]>
    where
        F: Fn(Native<T, B>, Native<T, B>) -> R,
    {
        self.parts
            .iter()
            .zip(other.parts.iter())
            .map(|(&a, &b)| f(a, b))
            .collect()
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Clone for Vector<T, N, B> {
    fn clone(&self) -> Self {
        Self {
            parts: self.parts.clone(),
        }
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Default for Vector<T, N, B> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> From<[T; N]> for Vector<T, N, B> {
    fn from(values: [T; N]) -> Self {
        Self::from_array(values)
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Index<usize> for Vector<T, N, B> {
    type Output = Native<T, B>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.parts[index]
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> IndexMut<usize> for Vector<T, N, B> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.parts[index]
    }
}

/// Bit-pattern equality of the `N` logical lanes. Padding is ignored and a
/// NaN lane equals an identical NaN lane.
impl<T: NativeLane<B>, const N: usize, B: Backend> PartialEq for Vector<T, N, B> {
    fn eq(&self, other: &Self) -> bool {
        self.to_vec()
            .into_iter()
            .zip(other.to_vec())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Eq for Vector<T, N, B> {}

impl<T: NativeLane<B>, const N: usize, B: Backend> fmt::Debug for Vector<T, N, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector<{}>", B::NAME)?;
        f.debug_list().entries(self.to_vec()).finish()
    }
}
