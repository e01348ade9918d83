//! Comparison results of arbitrary declared width.
//!
//! `Mask<T, N, B>` has the same register layout as `Vector<T, N, B>` but holds
//! the backend's comparison-result registers, which are not always the data
//! register type (NEON compares return unsigned vectors, the scalar backend
//! keeps `bool` lanes).

use std::fmt;
use std::ops::{Index, IndexMut};

use num::Zero;
use smallvec::SmallVec;

use crate::error::Result;
use crate::simd::native::NativeMask;
use crate::simd::traits::{Backend, Element, NativeLane};
use crate::simd::vector::{Vector, INLINE_NATIVES};
use crate::simd::Selected;

pub(crate) type NativeMasks<T, B> = SmallVec<[NativeMask<T, B>; INLINE_NATIVES]>;

/// Per-lane boolean result of a comparison over `N` lanes of `T`.
pub struct Mask<T: NativeLane<B>, const N: usize, B: Backend = Selected> {
    parts: NativeMasks<T, B>,
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Mask<T, N, B> {
    #[inline(always)]
    pub(crate) fn from_parts_unchecked(parts: NativeMasks<T, B>) -> Self {
        debug_assert_eq!(parts.len(), Vector::<T, N, B>::native_count());
        Self { parts }
    }

    /// Builds a mask from exactly `N` truth values.
    ///
    /// # Errors
    ///
    /// Returns [`SimdError::LengthMismatch`](crate::error::SimdError) if
    /// `lanes.len() != N`.
    pub fn from_bools(lanes: &[bool]) -> Result<Self> {
        let values: Vec<T> = lanes
            .iter()
            .map(|&lane| if lane { T::all_ones() } else { <T as Zero>::zero() })
            .collect();

        Ok(Vector::<T, N, B>::from_slice(&values)?.assume_mask())
    }

    /// Mask with every lane set to `value`.
    pub fn splat(value: bool) -> Self {
        let lane = if value { T::all_ones() } else { <T as Zero>::zero() };
        Vector::<T, N, B>::splat(lane).assume_mask()
    }

    #[inline(always)]
    pub fn natives(&self) -> &[NativeMask<T, B>] {
        &self.parts
    }

    /// Data form of the mask: each true lane becomes the all-ones bit pattern
    /// of `T`, each false lane zero.
    pub fn unmask(&self) -> Vector<T, N, B> {
        Vector::from_parts_unchecked(self.parts.iter().map(|mask| mask.unmask()).collect())
    }

    /// Truth value of each of the `N` lanes.
    pub fn to_bools(&self) -> Vec<bool> {
        self.unmask()
            .to_vec()
            .into_iter()
            .map(|lane| !lane.to_bits().is_zero())
            .collect()
    }

    /// Truth value of lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn test(&self, index: usize) -> bool {
        !self.unmask().lane(index).to_bits().is_zero()
    }

    pub fn all(&self) -> bool {
        self.to_bools().into_iter().all(|lane| lane)
    }

    pub fn any(&self) -> bool {
        self.to_bools().into_iter().any(|lane| lane)
    }

    pub fn and(&self, other: &Self) -> Self {
        self.zip_with(other, NativeMask::<T, B>::and)
    }

    pub fn or(&self, other: &Self) -> Self {
        self.zip_with(other, NativeMask::<T, B>::or)
    }

    pub fn not(&self) -> Self {
        Self::from_parts_unchecked(self.parts.iter().map(|mask| mask.not()).collect())
    }

    /// Reinterprets the mask for another element type of the same width,
    /// e.g. an `i32` comparison result as an `f32` mask.
    pub fn bit_cast<U: NativeLane<B>, const M: usize>(&self) -> Mask<U, M, B> {
        self.unmask().bit_cast::<U, M>().assume_mask()
    }

    fn zip_with<F>(&self, other: &Self, f: F) -> Self
    where
        F: Fn(NativeMask<T, B>, NativeMask<T, B>) -> NativeMask<T, B>,
    {
        Self::from_parts_unchecked(
            self.parts
                .iter()
                .zip(other.parts.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        )
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Clone for Mask<T, N, B> {
    fn clone(&self) -> Self {
        Self {
            parts: self.parts.clone(),
        }
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Index<usize> for Mask<T, N, B> {
    type Output = NativeMask<T, B>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.parts[index]
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> IndexMut<usize> for Mask<T, N, B> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.parts[index]
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> PartialEq for Mask<T, N, B> {
    fn eq(&self, other: &Self) -> bool {
        self.to_bools() == other.to_bools()
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> Eq for Mask<T, N, B> {}

impl<T: NativeLane<B>, const N: usize, B: Backend> fmt::Debug for Mask<T, N, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask<{}>", B::NAME)?;
        f.debug_list().entries(self.to_bools()).finish()
    }
}
