//! Per-group verification results

use crate::error::ConformanceError;
use serde::Serialize;
use shavs_hashing::Algorithm;
use std::fmt;
use std::fmt::Write as _;
use std::time::Duration;

/// Which verification path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Message buffer length against `Len / 8`
    MessageLength,
    /// `digest` in one call
    OneShot,
    /// `init`, a single `update`, `finalize` on the reused state buffer
    Streaming,
    /// `reset` then `finalize` with no data, against the zero-length vector
    EmptyAfterReset,
    /// One `update` per message byte
    ByteByByte,
    /// Three uneven `update` calls
    ThreeChunks,
    /// `serialize` mid-stream, `deserialize` into a new buffer, finish there
    CheckpointResume,
}

impl CheckKind {
    /// Short label used in logs and reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MessageLength => "message-length",
            Self::OneShot => "one-shot",
            Self::Streaming => "streaming",
            Self::EmptyAfterReset => "empty-after-reset",
            Self::ByteByByte => "byte-by-byte",
            Self::ThreeChunks => "three-chunks",
            Self::CheckpointResume => "checkpoint-resume",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One failed check of one vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Failing check
    pub check: CheckKind,
    /// Vector index in file order
    pub index: usize,
    /// Declared message length in bits
    pub length_bits: u64,
    /// Expected digest; empty for `MessageLength`, whose lengths are in `detail`
    #[serde(with = "hex_bytes")]
    pub expected: Vec<u8>,
    /// Produced digest; empty for `MessageLength` or when the engine returned an error
    #[serde(with = "hex_bytes")]
    pub actual: Vec<u8>,
    /// Engine error or other explanation, if any
    pub detail: Option<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed for vector #{} (Len = {}, {} message bytes): expected {}, got {}",
            self.check,
            self.index,
            self.length_bits,
            self.length_bits / 8,
            hex::encode(&self.expected),
            hex::encode(&self.actual)
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

mod hex_bytes {
    use serde::Serializer;

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }
}

/// Outcome of running every enabled check over one vector file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    /// Group name, e.g. `SHA256ShortMsg`
    pub group: String,
    /// Algorithm under test
    pub algorithm: Algorithm,
    /// Vectors in the file
    pub vectors: usize,
    /// Individual comparisons performed
    pub checks_run: usize,
    /// Every failed comparison, in the order found
    pub mismatches: Vec<Mismatch>,
    /// Wall time spent on verification
    pub elapsed: Duration,
}

impl GroupReport {
    /// Empty report for `group`
    #[must_use]
    pub fn new(group: impl Into<String>, algorithm: Algorithm, vectors: usize) -> Self {
        Self {
            group: group.into(),
            algorithm,
            vectors,
            checks_run: 0,
            mismatches: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Whether every check passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Mismatches recorded by one check
    pub fn mismatches_for(&self, check: CheckKind) -> impl Iterator<Item = &Mismatch> {
        self.mismatches.iter().filter(move |m| m.check == check)
    }

    /// Turn a failing report into an error listing every failing vector
    ///
    /// # Errors
    ///
    /// Returns `ConformanceError::GroupFailed` if any check failed.
    pub fn into_result(self) -> Result<Self, ConformanceError> {
        if self.passed() {
            return Ok(self);
        }
        let mut summary = String::new();
        for mismatch in &self.mismatches {
            let _ = writeln!(summary, "  {mismatch}");
        }
        Err(ConformanceError::GroupFailed {
            group: self.group,
            failures: self.mismatches.len(),
            summary,
        })
    }
}
