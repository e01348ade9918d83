//! Slice-level comparison and min/max.
//!
//! Each operation comes in three flavours: `scalar_*` (plain iterator code),
//! `simd_*` (one native register of the selected backend at a time) and
//! `par_simd_*` (the SIMD kernel run over rayon chunks once the input is
//! larger than [`PARALLEL_SIMD_THRESHOLD`]). All three agree lane for lane.
//!
//! ```
//! use simdport::simd::{SimdCompare, SimdMinMax};
//!
//! let a = [1i32, -2, 3, -4, 5, -6, 7, -8];
//! let b = [0i32, -2, 4, -4, 4, -6, 8, -9];
//!
//! assert_eq!(
//!     a.as_slice().simd_eq(b.as_slice()).unwrap(),
//!     [false, true, false, true, false, true, false, false]
//! );
//! assert_eq!(a.as_slice().simd_min(b.as_slice()).unwrap(), [0, -2, 3, -4, 4, -6, 7, -9]);
//! ```

use num::Zero;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::error::{validation_error, Result};
use crate::simd::native::{Native, NativeMask};
use crate::simd::traits::{Backend, Element, IntLane, NativeLane};
use crate::simd::Selected;
use crate::{PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD};

/// Lanewise comparisons of two equal-length slices.
pub trait SimdCompare<Rhs = Self> {
    type Output;

    fn simd_eq(self, rhs: Rhs) -> Self::Output;
    fn par_simd_eq(self, rhs: Rhs) -> Self::Output;
    fn scalar_eq(self, rhs: Rhs) -> Self::Output;

    fn simd_gt(self, rhs: Rhs) -> Self::Output;
    fn par_simd_gt(self, rhs: Rhs) -> Self::Output;
    fn scalar_gt(self, rhs: Rhs) -> Self::Output;
}

/// Lanewise minimum and maximum of two equal-length integer slices.
pub trait SimdMinMax<Rhs = Self> {
    type Output;

    fn simd_min(self, rhs: Rhs) -> Self::Output;
    fn par_simd_min(self, rhs: Rhs) -> Self::Output;
    fn scalar_min(self, rhs: Rhs) -> Self::Output;

    fn simd_max(self, rhs: Rhs) -> Self::Output;
    fn par_simd_max(self, rhs: Rhs) -> Self::Output;
    fn scalar_max(self, rhs: Rhs) -> Self::Output;
}

fn validate<T>(a: &[T], b: &[T]) -> Result<()> {
    if a.is_empty() || b.is_empty() {
        tracing::debug!(lhs = a.len(), rhs = b.len(), "rejecting empty input");
        return Err(validation_error("Size can't be empty (size zero)"));
    }

    if a.len() != b.len() {
        tracing::debug!(lhs = a.len(), rhs = b.len(), "rejecting unequal lengths");
        return Err(validation_error(format!(
            "Slices must be the same length (got {} and {})",
            a.len(),
            b.len()
        )));
    }

    Ok(())
}

/// Writes `op(a, b)` as truth values, one register at a time.
pub(crate) fn compare_into<T, B, F>(a: &[T], b: &[T], out: &mut [bool], op: F)
where
    T: NativeLane<B>,
    B: Backend,
    F: Fn(Native<T, B>, Native<T, B>) -> NativeMask<T, B>,
{
    let lanes = T::LANES;
    let mut scratch: SmallVec<[T; 32]> = SmallVec::from_elem(<T as Zero>::zero(), lanes);

    for ((a, b), out) in a.chunks(lanes).zip(b.chunks(lanes)).zip(out.chunks_mut(lanes)) {
        let mask = op(Native::load_partial(a), Native::load_partial(b));
        mask.unmask().store(&mut scratch);

        for (dst, lane) in out.iter_mut().zip(scratch.iter()) {
            *dst = !lane.to_bits().is_zero();
        }
    }
}

/// Writes `op(a, b)` lanewise, one register at a time.
pub(crate) fn combine_into<T, B, F>(a: &[T], b: &[T], out: &mut [T], op: F)
where
    T: NativeLane<B>,
    B: Backend,
    F: Fn(Native<T, B>, Native<T, B>) -> Native<T, B>,
{
    let lanes = T::LANES;

    for ((a, b), out) in a.chunks(lanes).zip(b.chunks(lanes)).zip(out.chunks_mut(lanes)) {
        op(Native::load_partial(a), Native::load_partial(b)).store_partial(out);
    }
}

/// Chunk length for the parallel paths: a whole number of registers.
fn parallel_chunk(lanes: usize) -> usize {
    ((PARALLEL_CHUNK_SIZE / lanes) * lanes).max(lanes)
}

fn simd_compare<T, B, F>(a: &[T], b: &[T], op: F) -> Result<Vec<bool>>
where
    T: NativeLane<B>,
    B: Backend,
    F: Fn(Native<T, B>, Native<T, B>) -> NativeMask<T, B>,
{
    validate(a, b)?;
    let mut out = vec![false; a.len()];
    compare_into(a, b, &mut out, op);
    Ok(out)
}

fn par_simd_compare<T, B, F>(a: &[T], b: &[T], op: F) -> Result<Vec<bool>>
where
    T: NativeLane<B>,
    B: Backend,
    F: Fn(Native<T, B>, Native<T, B>) -> NativeMask<T, B> + Sync + Send,
{
    if a.len() <= PARALLEL_SIMD_THRESHOLD {
        return simd_compare(a, b, op);
    }

    validate(a, b)?;

    let chunk = parallel_chunk(T::LANES);
    tracing::debug!(backend = B::NAME, len = a.len(), chunk, "parallel comparison");

    let mut out = vec![false; a.len()];
    out.par_chunks_mut(chunk)
        .zip(a.par_chunks(chunk))
        .zip(b.par_chunks(chunk))
        .for_each(|((out, a), b)| compare_into(a, b, out, &op));

    Ok(out)
}

fn simd_combine<T, B, F>(a: &[T], b: &[T], op: F) -> Result<Vec<T>>
where
    T: NativeLane<B>,
    B: Backend,
    F: Fn(Native<T, B>, Native<T, B>) -> Native<T, B>,
{
    validate(a, b)?;
    let mut out = vec![<T as Zero>::zero(); a.len()];
    combine_into(a, b, &mut out, op);
    Ok(out)
}

fn par_simd_combine<T, B, F>(a: &[T], b: &[T], op: F) -> Result<Vec<T>>
where
    T: NativeLane<B>,
    B: Backend,
    F: Fn(Native<T, B>, Native<T, B>) -> Native<T, B> + Sync + Send,
{
    if a.len() <= PARALLEL_SIMD_THRESHOLD {
        return simd_combine(a, b, op);
    }

    validate(a, b)?;

    let chunk = parallel_chunk(T::LANES);
    tracing::debug!(backend = B::NAME, len = a.len(), chunk, "parallel min/max");

    let mut out = vec![<T as Zero>::zero(); a.len()];
    out.par_chunks_mut(chunk)
        .zip(a.par_chunks(chunk))
        .zip(b.par_chunks(chunk))
        .for_each(|((out, a), b)| combine_into(a, b, out, &op));

    Ok(out)
}

fn scalar_zip<T: Element, R>(a: &[T], b: &[T], op: impl Fn(T, T) -> R) -> Result<Vec<R>> {
    validate(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(&x, &y)| op(x, y)).collect())
}

impl<'a, T: NativeLane<Selected>> SimdCompare<&'a [T]> for &'a [T] {
    type Output = Result<Vec<bool>>;

    fn simd_eq(self, rhs: &'a [T]) -> Self::Output {
        simd_compare(self, rhs, Native::<T, Selected>::cmp_eq)
    }

    fn par_simd_eq(self, rhs: &'a [T]) -> Self::Output {
        par_simd_compare(self, rhs, Native::<T, Selected>::cmp_eq)
    }

    fn scalar_eq(self, rhs: &'a [T]) -> Self::Output {
        scalar_zip(self, rhs, |x, y| x == y)
    }

    fn simd_gt(self, rhs: &'a [T]) -> Self::Output {
        simd_compare(self, rhs, Native::<T, Selected>::cmp_gt)
    }

    fn par_simd_gt(self, rhs: &'a [T]) -> Self::Output {
        par_simd_compare(self, rhs, Native::<T, Selected>::cmp_gt)
    }

    fn scalar_gt(self, rhs: &'a [T]) -> Self::Output {
        scalar_zip(self, rhs, |x, y| x > y)
    }
}

impl<'a, T: IntLane<Selected>> SimdMinMax<&'a [T]> for &'a [T] {
    type Output = Result<Vec<T>>;

    fn simd_min(self, rhs: &'a [T]) -> Self::Output {
        simd_combine(self, rhs, Native::<T, Selected>::min)
    }

    fn par_simd_min(self, rhs: &'a [T]) -> Self::Output {
        par_simd_combine(self, rhs, Native::<T, Selected>::min)
    }

    fn scalar_min(self, rhs: &'a [T]) -> Self::Output {
        scalar_zip(self, rhs, std::cmp::min)
    }

    fn simd_max(self, rhs: &'a [T]) -> Self::Output {
        simd_combine(self, rhs, Native::<T, Selected>::max)
    }

    fn par_simd_max(self, rhs: &'a [T]) -> Self::Output {
        par_simd_combine(self, rhs, Native::<T, Selected>::max)
    }

    fn scalar_max(self, rhs: &'a [T]) -> Self::Output {
        scalar_zip(self, rhs, std::cmp::max)
    }
}
