//! Portable SIMD vectors with a build-time selected backend.
//!
//! Code written against [`simd::Vector`] and [`simd::Mask`] runs on whatever
//! instruction set the crate was built for (AVX2, SSE2, NEON, or a scalar
//! fallback) and produces bit-identical results on all of them.
//!
//! ```
//! use simdport::prelude::*;
//!
//! let a = Vector::<u32, 5>::from([1, 0xFFFF_FFFF, 7, 0, 9]);
//! let b = Vector::<u32, 5>::splat(1);
//!
//! let gt = cmp_gt(&a, &b).eval();
//! assert_eq!(gt.to_bools(), [false, true, true, false, true]);
//! ```

pub mod config;
pub mod error;
pub mod simd;

/// Inputs longer than this use the rayon path in the `par_simd_*` helpers.
pub const PARALLEL_SIMD_THRESHOLD: usize = 262_144;

/// Elements per rayon task in the `par_simd_*` helpers, rounded down to a
/// whole number of registers.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;

pub mod prelude {
    pub use crate::error::{Result, SimdError};
    pub use crate::simd::{
        blend, cmp_eq, cmp_ge, cmp_gt, cmp_le, cmp_lt, cmp_neq, max, min, unmask, AnyMask,
        AnyVec, Backend, Element, IntLane, Mask, Native, NativeLane, NativeMask, Selected,
        SimdCompare, SimdMinMax, Vector,
    };
}
