//! Drives one engine over one vector file
//!
//! The runner is generic over [`HashEngine`], so the same routine verifies
//! all five algorithms. Mismatches are collected into a [`GroupReport`];
//! only setup failures (state allocation) end a run early.

use crate::config::ConformanceConfig;
use crate::error::Result;
use crate::report::{CheckKind, GroupReport, Mismatch};
use crate::vectors::{TestVector, VectorFile};
use log::warn;
use shavs_common::LoggingTransformer;
use shavs_hashing::{HashEngine, HashError, StateBuffer};
use std::marker::PhantomData;
use std::time::Instant;

type EngineResult<T> = std::result::Result<T, HashError>;

/// Conformance checks for engine `E` over one parsed vector file
#[derive(Debug)]
pub struct ConformanceRunner<'a, E: HashEngine> {
    group: &'a str,
    file: &'a VectorFile,
    config: &'a ConformanceConfig,
    _engine: PhantomData<E>,
}

impl<'a, E: HashEngine> ConformanceRunner<'a, E> {
    /// Pair `file` with engine `E`
    #[must_use]
    pub fn new(group: &'a str, file: &'a VectorFile, config: &'a ConformanceConfig) -> Self {
        Self {
            group,
            file,
            config,
            _engine: PhantomData,
        }
    }

    /// Run every enabled check and collect the results
    ///
    /// # Errors
    ///
    /// Returns an error only if a state buffer cannot be allocated.
    pub fn run(&self) -> Result<GroupReport> {
        let started = Instant::now();
        LoggingTransformer::log_group_start(self.group, self.file.len());

        let mut report = GroupReport::new(self.group, E::ALGORITHM, self.file.len());
        self.check_one_shot(&mut report);
        self.check_streaming(&mut report)?;
        self.check_chunked(&mut report)?;
        self.check_checkpoint_resume(&mut report)?;

        report.elapsed = started.elapsed();
        LoggingTransformer::log_group_outcome(
            self.group,
            report.checks_run,
            report.mismatches.len(),
            report.elapsed,
        );
        Ok(report)
    }

    /// Message length against `Len`, then `digest` in a single call
    pub fn check_one_shot(&self, report: &mut GroupReport) {
        for (index, vector) in self.file.iter().enumerate() {
            report.checks_run += 1;
            let held = vector.message.len() as u64;
            if held != vector.declared_len_bytes() {
                self.push(
                    report,
                    Mismatch {
                        check: CheckKind::MessageLength,
                        index,
                        length_bits: vector.length_bits,
                        expected: Vec::new(),
                        actual: Vec::new(),
                        detail: Some(format!(
                            "message holds {held} bytes, Len declares {}",
                            vector.declared_len_bytes()
                        )),
                    },
                );
            }

            let mut out = vec![0u8; E::DIGEST_LEN];
            let outcome = E::digest(&vector.message, &mut out).map(|n| {
                out.truncate(n);
                out
            });
            self.record(report, CheckKind::OneShot, index, vector, &vector.digest, outcome);
        }
    }

    /// `init`/`update`/`finalize` on one state buffer reused for every vector
    ///
    /// After each non-empty vector the same buffer is `reset` and finalized
    /// again with no data; that must give the file's zero-length digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the state buffer cannot be allocated.
    pub fn check_streaming(&self, report: &mut GroupReport) -> Result<()> {
        let mut state = StateBuffer::for_engine::<E>()?;
        let empty = self.file.empty_message_digest();
        if empty.is_none() && !self.file.is_empty() {
            warn!(
                "Group {}: no zero-length vector, skipping the empty-after-reset cross-check",
                self.group
            );
        }

        for (index, vector) in self.file.iter().enumerate() {
            let outcome = Self::absorb(state.as_mut_slice(), [vector.message.as_slice()]);
            self.record(report, CheckKind::Streaming, index, vector, &vector.digest, outcome);

            if let (false, Some(empty)) = (vector.is_empty_message(), empty) {
                let outcome = Self::reset_and_finalize(state.as_mut_slice());
                self.record(report, CheckKind::EmptyAfterReset, index, vector, empty, outcome);
            }
        }
        Ok(())
    }

    /// Byte-at-a-time and three-uneven-chunk absorption
    ///
    /// # Errors
    ///
    /// Returns an error if the state buffer cannot be allocated.
    pub fn check_chunked(&self, report: &mut GroupReport) -> Result<()> {
        if !self.config.chunked_streaming {
            return Ok(());
        }
        let mut state = StateBuffer::for_engine::<E>()?;

        for (index, vector) in self.file.iter().enumerate() {
            let message = vector.message.as_slice();
            if vector.length_bits > 0 && vector.length_bits <= self.config.byte_by_byte_max_bits {
                let outcome = Self::absorb(state.as_mut_slice(), message.chunks(1));
                self.record(report, CheckKind::ByteByByte, index, vector, &vector.digest, outcome);
            }

            let n = message.len();
            if n >= 3 {
                let (first, rest) = message.split_at(n / 3);
                let (second, third) = rest.split_at(2 * n / 3 - n / 3);
                let outcome = Self::absorb(state.as_mut_slice(), [first, second, third]);
                self.record(report, CheckKind::ThreeChunks, index, vector, &vector.digest, outcome);
            }
        }
        Ok(())
    }

    /// Serialize after the first half, resume in a fresh buffer, finish there
    ///
    /// # Errors
    ///
    /// Returns an error if a state buffer cannot be allocated.
    pub fn check_checkpoint_resume(&self, report: &mut GroupReport) -> Result<()> {
        if !self.config.checkpoint_resume {
            return Ok(());
        }
        let mut head = StateBuffer::for_engine::<E>()?;

        for (index, vector) in self.file.iter().enumerate() {
            let outcome = Self::resume_at(head.as_mut_slice(), &vector.message);
            if let Err(HashError::Allocation(size)) = outcome {
                return Err(HashError::Allocation(size).into());
            }
            self.record(report, CheckKind::CheckpointResume, index, vector, &vector.digest, outcome);
        }
        Ok(())
    }

    fn absorb<'m>(
        state: &mut [u8],
        chunks: impl IntoIterator<Item = &'m [u8]>,
    ) -> EngineResult<Vec<u8>> {
        E::init(Some(&mut *state))?;
        for chunk in chunks {
            E::update(state, chunk)?;
        }
        Self::finalize(state)
    }

    fn reset_and_finalize(state: &mut [u8]) -> EngineResult<Vec<u8>> {
        E::reset(state)?;
        Self::finalize(state)
    }

    fn resume_at(head: &mut [u8], message: &[u8]) -> EngineResult<Vec<u8>> {
        let (before, after) = message.split_at(message.len() / 2);
        E::init(Some(&mut *head))?;
        E::update(head, before)?;

        let mut checkpoint = vec![0u8; E::SERIALIZED_LEN];
        let written = E::serialize(head, &mut checkpoint)?;

        let mut tail = StateBuffer::for_engine::<E>()?;
        E::deserialize(&checkpoint[..written], tail.as_mut_slice())?;
        E::update(tail.as_mut_slice(), after)?;
        Self::finalize(tail.as_mut_slice())
    }

    fn finalize(state: &mut [u8]) -> EngineResult<Vec<u8>> {
        let mut out = vec![0u8; E::DIGEST_LEN];
        let written = E::finalize(state, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    fn record(
        &self,
        report: &mut GroupReport,
        check: CheckKind,
        index: usize,
        vector: &TestVector,
        expected: &[u8],
        outcome: EngineResult<Vec<u8>>,
    ) {
        report.checks_run += 1;
        let (actual, detail) = match outcome {
            Ok(actual) if actual == expected => return,
            Ok(actual) => (actual, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };
        self.push(
            report,
            Mismatch {
                check,
                index,
                length_bits: vector.length_bits,
                expected: expected.to_vec(),
                actual,
                detail,
            },
        );
    }

    fn push(&self, report: &mut GroupReport, mismatch: Mismatch) {
        LoggingTransformer::log_mismatch(
            self.group,
            mismatch.check.label(),
            mismatch.index,
            mismatch.length_bits,
        );
        report.mismatches.push(mismatch);
    }
}
