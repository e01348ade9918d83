//! Portable SIMD vectors, masks and the per-backend dispatcher.
//!
//! The backend used by default is chosen at build time (see `build.rs`) and
//! exposed as [`Selected`]. Every other backend the target can execute is
//! also compiled and may be named explicitly, e.g. `Vector<i32, 8, Scalar>`.

pub mod expr;
pub mod mask;
pub mod native;
pub mod ops;
pub mod slice;
pub mod traits;
pub mod vector;

pub mod scalar;

#[cfg(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse2")
))]
pub mod sse2;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx2"
))]
pub mod avx2;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod neon;

/// Backend selected for this build.
///
/// Each alias also requires the cfg of its backend module, so a build whose
/// target features disagree with the build script falls back to scalar.
#[cfg(all(
    simd_arch = "avx2",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx2"
))]
pub type Selected = avx2::Avx2;

#[cfg(all(
    simd_arch = "sse2",
    any(
        target_arch = "x86_64",
        all(target_arch = "x86", target_feature = "sse2")
    )
))]
pub type Selected = sse2::Sse2;

#[cfg(all(simd_arch = "neon", target_arch = "aarch64", target_feature = "neon"))]
pub type Selected = neon::Neon;

#[cfg(not(any(
    all(
        simd_arch = "avx2",
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "avx2"
    ),
    all(
        simd_arch = "sse2",
        any(
            target_arch = "x86_64",
            all(target_arch = "x86", target_feature = "sse2")
        )
    ),
    all(simd_arch = "neon", target_arch = "aarch64", target_feature = "neon")
)))]
pub type Selected = scalar::Scalar;

pub use expr::{AnyMask, AnyVec};
pub use mask::Mask;
pub use native::{Native, NativeMask};
pub use ops::{blend, cmp_eq, cmp_ge, cmp_gt, cmp_le, cmp_lt, cmp_neq, max, min, unmask};
pub use scalar::Scalar;
pub use slice::{SimdCompare, SimdMinMax};
pub use traits::{Backend, Element, FloatElement, IntElement, IntLane, NativeLane};
pub use vector::Vector;
