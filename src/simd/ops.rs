//! Portable operations.
//!
//! Each function takes operands of identical element type, width and backend
//! and returns a pending node; call `eval()` on the result to compute it.
//! Operands of the same lane width but different signedness are not mixed
//! implicitly: reinterpret one side with [`Vector::bit_cast`](crate::simd::Vector::bit_cast) first.
//!
//! ```
//! use simdport::prelude::*;
//!
//! let a = Vector::<i32, 8>::from([1, -2, 3, -4, 5, -6, 7, -8]);
//! let b = Vector::<i32, 8>::from([0, -2, 4, -4, 4, -6, 8, -9]);
//!
//! let eq = cmp_eq(&a, &b).eval();
//! assert_eq!(eq.to_bools(), [false, true, false, true, false, true, false, false]);
//!
//! let lo = min(&a, &b).eval();
//! assert_eq!(lo.to_array(), [0, -2, 3, -4, 4, -6, 7, -9]);
//! ```

use crate::simd::expr::{
    AnyMask, AnyVec, Binary, CmpEq, CmpGe, CmpGt, CmpLe, CmpLt, CmpNeq, Max, Min, Select, Unmask,
};
use crate::simd::traits::{Backend, IntLane, NativeLane};

macro_rules! comparison {
    ($($(#[$doc:meta])* $func:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            pub fn $func<T, const N: usize, B, X, Y>(lhs: X, rhs: Y) -> Binary<$op, X, Y, T, N, B>
            where
                T: NativeLane<B>,
                B: Backend,
                X: AnyVec<T, N, B>,
                Y: AnyVec<T, N, B>,
            {
                Binary::new(lhs, rhs)
            }
        )*
    };
}

comparison! {
    /// Lanewise `lhs == rhs`. NaN lanes compare false.
    cmp_eq => CmpEq,
    /// Lanewise `lhs != rhs`. NaN lanes compare true.
    cmp_neq => CmpNeq,
    /// Lanewise `lhs > rhs`, signed or unsigned according to `T`. NaN lanes
    /// compare false.
    cmp_gt => CmpGt,
    /// Lanewise `lhs < rhs`.
    cmp_lt => CmpLt,
    /// Lanewise `lhs >= rhs`.
    cmp_ge => CmpGe,
    /// Lanewise `lhs <= rhs`.
    cmp_le => CmpLe,
}

/// Lanewise minimum of two integer vectors.
///
/// Floating-point element types are rejected at compile time.
#[inline(always)]
pub fn min<T, const N: usize, B, X, Y>(lhs: X, rhs: Y) -> Binary<Min, X, Y, T, N, B>
where
    T: IntLane<B>,
    B: Backend,
    X: AnyVec<T, N, B>,
    Y: AnyVec<T, N, B>,
{
    Binary::new(lhs, rhs)
}

/// Lanewise maximum of two integer vectors.
#[inline(always)]
pub fn max<T, const N: usize, B, X, Y>(lhs: X, rhs: Y) -> Binary<Max, X, Y, T, N, B>
where
    T: IntLane<B>,
    B: Backend,
    X: AnyVec<T, N, B>,
    Y: AnyVec<T, N, B>,
{
    Binary::new(lhs, rhs)
}

/// Lanewise `mask ? on_true : on_false`.
#[inline(always)]
pub fn blend<T, const N: usize, B, X, Y, M>(
    on_true: X,
    on_false: Y,
    mask: M,
) -> Select<X, Y, M, T, N, B>
where
    T: NativeLane<B>,
    B: Backend,
    X: AnyVec<T, N, B>,
    Y: AnyVec<T, N, B>,
    M: AnyMask<T, N, B>,
{
    Select::new(on_true, on_false, mask)
}

/// Data form of a mask: all-ones for true lanes, zero for false lanes.
#[inline(always)]
pub fn unmask<T, const N: usize, B, M>(mask: M) -> Unmask<M, T, N, B>
where
    T: NativeLane<B>,
    B: Backend,
    M: AnyMask<T, N, B>,
{
    Unmask::new(mask)
}
