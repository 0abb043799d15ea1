//! Errors raised while parsing vector files and running conformance groups

use shavs_common::{Error, ErrorKind};
use shavs_hashing::HashError;
use std::path::PathBuf;
use thiserror::Error;

/// Vector file parsing errors
///
/// Every variant is fatal to the parse; no partial `VectorFile` is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The vector file could not be opened
    #[error("Vector file not found: {}", path.display())]
    NotFound {
        /// Path that was tried
        path: PathBuf,
    },

    /// Invalid hex, an unparsable number, or a digest that disagrees with the header
    #[error("Malformed vector file at line {line}: {reason}")]
    Malformed {
        /// 1-based line at which the failing record was committed
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Growing the vector sequence failed
    #[error("Allocation failed while growing vector storage to {requested} entries")]
    Allocation {
        /// Capacity that was requested
        requested: usize,
    },

    /// Reading the file failed after it was opened
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

/// Conformance group errors
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// Group setup failed while parsing its vector file
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The engine failed outside of a per-vector check
    #[error(transparent)]
    Engine(#[from] HashError),

    /// The file header disagrees with the engine's digest length
    #[error("Group {group}: file declares {declared}-byte digests but the engine produces {engine}")]
    DigestLengthMismatch {
        /// Group name
        group: String,
        /// Digest length from the `[L = N]` header
        declared: usize,
        /// Digest length of the engine
        engine: usize,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A group ran to completion but some vectors failed
    #[error("Group {group}: {failures} mismatches\n{summary}")]
    GroupFailed {
        /// Group name
        group: String,
        /// Number of recorded mismatches
        failures: usize,
        /// One line per mismatch
        summary: String,
    },

    /// A group's worker task panicked or was cancelled
    #[error("Group {group} did not complete: {reason}")]
    Join {
        /// Group name
        group: String,
        /// Join failure description
        reason: String,
    },
}

impl From<ConformanceError> for Error {
    fn from(err: ConformanceError) -> Self {
        let kind = match &err {
            ConformanceError::Parse(ParseError::NotFound { .. }) => ErrorKind::NotFound,
            ConformanceError::Parse(ParseError::Malformed { .. })
            | ConformanceError::DigestLengthMismatch { .. } => ErrorKind::Malformed,
            ConformanceError::Parse(ParseError::Allocation { .. }) => ErrorKind::Allocation,
            ConformanceError::Parse(ParseError::Io { .. }) => ErrorKind::Io,
            ConformanceError::Engine(HashError::MalformedSerializedState(_)) => {
                ErrorKind::Deserialization
            }
            ConformanceError::Engine(HashError::Allocation(_)) => ErrorKind::Allocation,
            ConformanceError::Engine(_) => ErrorKind::Engine,
            ConformanceError::Config(_) => ErrorKind::Configuration,
            ConformanceError::GroupFailed { .. } => ErrorKind::Mismatch,
            ConformanceError::Join { .. } => ErrorKind::Internal,
        };
        Error::with_source(kind, err)
    }
}

/// Result type for conformance operations
pub type Result<T> = std::result::Result<T, ConformanceError>;
