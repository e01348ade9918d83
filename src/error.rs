//! Error types for simdport operations.
//!
//! Operand mismatches between vectors are rejected by the type system, so the
//! only runtime failures are constructions from caller-provided data whose
//! shape does not match the declared vector width.

use thiserror::Error;

/// Errors that can occur when building vectors from runtime data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimdError {
    /// A lane slice did not match the declared vector width.
    #[error("Lane count mismatch: expected {expected} lanes, got {actual}")]
    LengthMismatch {
        /// Declared logical width of the vector.
        expected: usize,
        /// Number of lanes that were supplied.
        actual: usize,
    },
    /// The number of native registers did not match ⌈N / LANES⌉.
    #[error("Native vector count mismatch: expected {expected} registers, got {actual}")]
    NativeCountMismatch {
        /// Number of registers the logical vector is made of.
        expected: usize,
        /// Number of registers that were supplied.
        actual: usize,
    },
    /// Input validation error.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message.
        message: String,
    },
}

/// Result type alias for simdport operations.
pub type Result<T> = std::result::Result<T, SimdError>;

/// Creates a lane count mismatch error.
pub fn length_mismatch(expected: usize, actual: usize) -> SimdError {
    SimdError::LengthMismatch { expected, actual }
}

/// Creates a native register count mismatch error.
pub fn native_count_mismatch(expected: usize, actual: usize) -> SimdError {
    SimdError::NativeCountMismatch { expected, actual }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> SimdError {
    SimdError::Validation {
        message: message.into(),
    }
}
