//! Lazy expression nodes and the evaluation contract.
//!
//! Portable operations accept anything implementing [`AnyVec`] (or
//! [`AnyMask`]) with matching element type, width and backend: a concrete
//! value, a reference to one, or a pending node. They return a node; nothing
//! is computed until [`AnyVec::eval`] / [`AnyMask::eval`] is called.
//!
//! Evaluation of a node evaluates its operands first, left to right, then
//! runs the dispatcher once per native register. Concrete values evaluate to
//! a copy of themselves, so `eval` is idempotent.

use std::fmt;
use std::marker::PhantomData;

use crate::simd::mask::Mask;
use crate::simd::native::{Native, NativeMask};
use crate::simd::traits::{Backend, IntLane, NativeLane};
use crate::simd::vector::Vector;
use crate::simd::Selected;

/// Operand that evaluates to a `Vector<T, N, B>`.
pub trait AnyVec<T: NativeLane<B>, const N: usize, B: Backend = Selected> {
    fn eval(&self) -> Vector<T, N, B>;
}

/// Operand that evaluates to a `Mask<T, N, B>`.
pub trait AnyMask<T: NativeLane<B>, const N: usize, B: Backend = Selected> {
    fn eval(&self) -> Mask<T, N, B>;
}

impl<T: NativeLane<B>, const N: usize, B: Backend> AnyVec<T, N, B> for Vector<T, N, B> {
    #[inline(always)]
    fn eval(&self) -> Vector<T, N, B> {
        self.clone()
    }
}

impl<T: NativeLane<B>, const N: usize, B: Backend> AnyMask<T, N, B> for Mask<T, N, B> {
    #[inline(always)]
    fn eval(&self) -> Mask<T, N, B> {
        self.clone()
    }
}

impl<V, T: NativeLane<B>, const N: usize, B: Backend> AnyVec<T, N, B> for &V
where
    V: AnyVec<T, N, B> + ?Sized,
{
    #[inline(always)]
    fn eval(&self) -> Vector<T, N, B> {
        (**self).eval()
    }
}

impl<M, T: NativeLane<B>, const N: usize, B: Backend> AnyMask<T, N, B> for &M
where
    M: AnyMask<T, N, B> + ?Sized,
{
    #[inline(always)]
    fn eval(&self) -> Mask<T, N, B> {
        (**self).eval()
    }
}

/// Binary operator producing a data register.
pub trait VecOperator<T: NativeLane<B>, B: Backend> {
    fn apply(a: Native<T, B>, b: Native<T, B>) -> Native<T, B>;
}

/// Binary operator producing a comparison-result register.
pub trait MaskOperator<T: NativeLane<B>, B: Backend> {
    fn apply(a: Native<T, B>, b: Native<T, B>) -> NativeMask<T, B>;
}

macro_rules! operator_kind {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;
        )*
    };
}

operator_kind! {
    /// `a == b`
    CmpEq,
    /// `a != b`; true for unordered floats.
    CmpNeq,
    /// `a > b`
    CmpGt,
    /// `a < b`
    CmpLt,
    /// `a >= b`
    CmpGe,
    /// `a <= b`
    CmpLe,
    /// Lanewise minimum.
    Min,
    /// Lanewise maximum.
    Max,
}

impl<T: NativeLane<B>, B: Backend> MaskOperator<T, B> for CmpEq {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> NativeMask<T, B> {
        a.cmp_eq(b)
    }
}

impl<T: NativeLane<B>, B: Backend> MaskOperator<T, B> for CmpNeq {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> NativeMask<T, B> {
        a.cmp_eq(b).not()
    }
}

impl<T: NativeLane<B>, B: Backend> MaskOperator<T, B> for CmpGt {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> NativeMask<T, B> {
        a.cmp_gt(b)
    }
}

impl<T: NativeLane<B>, B: Backend> MaskOperator<T, B> for CmpLt {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> NativeMask<T, B> {
        a.cmp_lt(b)
    }
}

// `gt | eq` rather than `!lt` so unordered float lanes stay false.
impl<T: NativeLane<B>, B: Backend> MaskOperator<T, B> for CmpGe {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> NativeMask<T, B> {
        a.cmp_gt(b).or(a.cmp_eq(b))
    }
}

impl<T: NativeLane<B>, B: Backend> MaskOperator<T, B> for CmpLe {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> NativeMask<T, B> {
        a.cmp_lt(b).or(a.cmp_eq(b))
    }
}

impl<T: IntLane<B>, B: Backend> VecOperator<T, B> for Min {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> Native<T, B> {
        a.min(b)
    }
}

impl<T: IntLane<B>, B: Backend> VecOperator<T, B> for Max {
    #[inline(always)]
    fn apply(a: Native<T, B>, b: Native<T, B>) -> Native<T, B> {
        a.max(b)
    }
}

/// Pending binary operation `Op(lhs, rhs)` over `N` lanes of `T`.
pub struct Binary<Op, X, Y, T, const N: usize, B = Selected> {
    lhs: X,
    rhs: Y,
    _marker: PhantomData<fn() -> (Op, T, B)>,
}

impl<Op, X, Y, T, const N: usize, B> Binary<Op, X, Y, T, N, B> {
    #[inline(always)]
    pub(crate) fn new(lhs: X, rhs: Y) -> Self {
        Self {
            lhs,
            rhs,
            _marker: PhantomData,
        }
    }

    pub fn lhs(&self) -> &X {
        &self.lhs
    }

    pub fn rhs(&self) -> &Y {
        &self.rhs
    }
}

impl<Op, X, Y, T, const N: usize, B> AnyVec<T, N, B> for Binary<Op, X, Y, T, N, B>
where
    T: NativeLane<B>,
    B: Backend,
    Op: VecOperator<T, B>,
    X: AnyVec<T, N, B>,
    Y: AnyVec<T, N, B>,
{
    fn eval(&self) -> Vector<T, N, B> {
        let lhs = self.lhs.eval();
        let rhs = self.rhs.eval();
        Vector::from_parts_unchecked(lhs.zip_natives(&rhs, Op::apply))
    }
}

impl<Op, X, Y, T, const N: usize, B> AnyMask<T, N, B> for Binary<Op, X, Y, T, N, B>
where
    T: NativeLane<B>,
    B: Backend,
    Op: MaskOperator<T, B>,
    X: AnyVec<T, N, B>,
    Y: AnyVec<T, N, B>,
{
    fn eval(&self) -> Mask<T, N, B> {
        let lhs = self.lhs.eval();
        let rhs = self.rhs.eval();
        Mask::from_parts_unchecked(lhs.zip_natives(&rhs, Op::apply))
    }
}

/// Pending lanewise selection `mask ? on_true : on_false`.
pub struct Select<X, Y, M, T, const N: usize, B = Selected> {
    on_true: X,
    on_false: Y,
    mask: M,
    _marker: PhantomData<fn() -> (T, B)>,
}

impl<X, Y, M, T, const N: usize, B> Select<X, Y, M, T, N, B> {
    #[inline(always)]
    pub(crate) fn new(on_true: X, on_false: Y, mask: M) -> Self {
        Self {
            on_true,
            on_false,
            mask,
            _marker: PhantomData,
        }
    }
}

impl<X, Y, M, T, const N: usize, B> AnyVec<T, N, B> for Select<X, Y, M, T, N, B>
where
    T: NativeLane<B>,
    B: Backend,
    X: AnyVec<T, N, B>,
    Y: AnyVec<T, N, B>,
    M: AnyMask<T, N, B>,
{
    fn eval(&self) -> Vector<T, N, B> {
        let on_true = self.on_true.eval();
        let on_false = self.on_false.eval();
        let mask = self.mask.eval();

        let parts = on_true
            .natives()
            .iter()
            .zip(on_false.natives())
            .zip(mask.natives())
            .map(|((&t, &f), &m)| Native::blend(t, f, m))
            .collect();

        Vector::from_parts_unchecked(parts)
    }
}

/// Pending conversion of a mask into its data form.
pub struct Unmask<M, T, const N: usize, B = Selected> {
    mask: M,
    _marker: PhantomData<fn() -> (T, B)>,
}

impl<M, T, const N: usize, B> Unmask<M, T, N, B> {
    #[inline(always)]
    pub(crate) fn new(mask: M) -> Self {
        Self {
            mask,
            _marker: PhantomData,
        }
    }
}

impl<M, T, const N: usize, B> AnyVec<T, N, B> for Unmask<M, T, N, B>
where
    T: NativeLane<B>,
    B: Backend,
    M: AnyMask<T, N, B>,
{
    fn eval(&self) -> Vector<T, N, B> {
        self.mask.eval().unmask()
    }
}

impl<Op, X: Clone, Y: Clone, T, const N: usize, B> Clone for Binary<Op, X, Y, T, N, B> {
    fn clone(&self) -> Self {
        Self::new(self.lhs.clone(), self.rhs.clone())
    }
}

impl<Op, X: Copy, Y: Copy, T, const N: usize, B> Copy for Binary<Op, X, Y, T, N, B> {}

impl<X: Clone, Y: Clone, M: Clone, T, const N: usize, B> Clone for Select<X, Y, M, T, N, B> {
    fn clone(&self) -> Self {
        Self::new(self.on_true.clone(), self.on_false.clone(), self.mask.clone())
    }
}

impl<M: Clone, T, const N: usize, B> Clone for Unmask<M, T, N, B> {
    fn clone(&self) -> Self {
        Self::new(self.mask.clone())
    }
}

impl<Op, X: fmt::Debug, Y: fmt::Debug, T, const N: usize, B> fmt::Debug
    for Binary<Op, X, Y, T, N, B>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binary")
            .field("op", &std::any::type_name::<Op>())
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .finish()
    }
}
