//! Errors raised by hash engines

use crate::Algorithm;
use shavs_common::{Error, ErrorKind};
use thiserror::Error;

/// Hash engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The caller's state region is smaller than the size query reported
    #[error("State buffer too small: need {required} bytes, got {actual}")]
    StateBufferTooSmall {
        /// Size reported by the size query
        required: usize,
        /// Size of the buffer that was passed in
        actual: usize,
    },

    /// The caller's output buffer cannot hold the result
    #[error("Output buffer too small: need {required} bytes, got {actual}")]
    OutputBufferTooSmall {
        /// Bytes the operation writes
        required: usize,
        /// Size of the buffer that was passed in
        actual: usize,
    },

    /// The state region was never passed to `init`
    #[error("State buffer was never initialized")]
    StateNotInitialized,

    /// The state region was initialized by a different engine
    #[error("State buffer belongs to another engine (expected {expected}, found tag {found_tag})")]
    StateVariantMismatch {
        /// Algorithm of the engine that rejected the buffer
        expected: Algorithm,
        /// Tag byte found in the buffer
        found_tag: u8,
    },

    /// The state region violates the engine's layout invariants
    #[error("State buffer is corrupt: {0}")]
    CorruptState(String),

    /// A serialized checkpoint was rejected by `deserialize`
    #[error("Malformed serialized state: {0}")]
    MalformedSerializedState(String),

    /// A state region could not be allocated
    #[error("Allocation of {0} bytes failed")]
    Allocation(usize),
}

impl HashError {
    /// Create a `CorruptState` error
    #[must_use]
    pub fn corrupt_state(msg: impl Into<String>) -> Self {
        Self::CorruptState(msg.into())
    }

    /// Create a `MalformedSerializedState` error
    #[must_use]
    pub fn malformed_serialized(msg: impl Into<String>) -> Self {
        Self::MalformedSerializedState(msg.into())
    }
}

impl From<HashError> for Error {
    fn from(err: HashError) -> Self {
        let kind = match err {
            HashError::MalformedSerializedState(_) => ErrorKind::Deserialization,
            HashError::Allocation(_) => ErrorKind::Allocation,
            _ => ErrorKind::Engine,
        };
        Error::with_source(kind, err)
    }
}

/// Result type for hash engine operations
pub type Result<T> = std::result::Result<T, HashError>;
