//! Build configuration report.
//!
//! Everything here is decided at compile time: the target features the crate
//! was built with and the backend `build.rs` selected from them. Nothing is
//! detected at runtime.

use std::fmt;

use crate::simd::traits::{Backend, NativeLane};
use crate::simd::Selected;

/// Highest instruction-set level the build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstructionSet {
    Scalar,
    Sse2,
    Sse3,
    Ssse3,
    Sse4_1,
    Sse4_2,
    Avx,
    Avx2,
    Neon,
}

impl InstructionSet {
    /// Level enabled by the build's target features. This may be above the
    /// selected backend, e.g. SSE4.2 refines the SSE2 backend, and it is
    /// unaffected by a `SIMDPORT_ARCH` override.
    pub const fn selected() -> Self {
        if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
            Self::Neon
        } else if cfg!(target_feature = "avx2") {
            Self::Avx2
        } else if cfg!(target_feature = "avx") {
            Self::Avx
        } else if cfg!(target_feature = "sse4.2") {
            Self::Sse4_2
        } else if cfg!(target_feature = "sse4.1") {
            Self::Sse4_1
        } else if cfg!(target_feature = "ssse3") {
            Self::Ssse3
        } else if cfg!(target_feature = "sse3") {
            Self::Sse3
        } else if cfg!(target_feature = "sse2") {
            Self::Sse2
        } else {
            Self::Scalar
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse2 => "sse2",
            Self::Sse3 => "sse3",
            Self::Ssse3 => "ssse3",
            Self::Sse4_1 => "sse4.1",
            Self::Sse4_2 => "sse4.2",
            Self::Avx => "avx",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
        }
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lanes per native register for each element width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneCounts {
    pub i8: usize,
    pub i16: usize,
    pub i32: usize,
    pub i64: usize,
    pub f32: usize,
    pub f64: usize,
}

/// What a backend compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub backend: &'static str,
    pub instruction_set: InstructionSet,
    pub register_bytes: usize,
    pub lanes: LaneCounts,
}

impl BuildInfo {
    /// Report for the selected backend.
    pub fn current() -> Self {
        Self::for_backend::<Selected>()
    }

    pub fn for_backend<B: Backend>() -> Self
    where
        i8: NativeLane<B>,
        i16: NativeLane<B>,
        i32: NativeLane<B>,
        i64: NativeLane<B>,
        f32: NativeLane<B>,
        f64: NativeLane<B>,
    {
        Self {
            backend: B::NAME,
            instruction_set: InstructionSet::selected(),
            register_bytes: B::REGISTER_BYTES,
            lanes: LaneCounts {
                i8: <i8 as NativeLane<B>>::LANES,
                i16: <i16 as NativeLane<B>>::LANES,
                i32: <i32 as NativeLane<B>>::LANES,
                i64: <i64 as NativeLane<B>>::LANES,
                f32: <f32 as NativeLane<B>>::LANES,
                f64: <f64 as NativeLane<B>>::LANES,
            },
        }
    }
}

/// Emits the build report as one `info` event and returns it.
pub fn log_selection() -> BuildInfo {
    let info = BuildInfo::current();

    tracing::info!(
        backend = info.backend,
        instruction_set = %info.instruction_set,
        register_bytes = info.register_bytes,
        lanes_i8 = info.lanes.i8,
        lanes_i16 = info.lanes.i16,
        lanes_i32 = info.lanes.i32,
        lanes_i64 = info.lanes.i64,
        "SIMD backend selected"
    );

    info
}
