//! The streaming-hash contract shared by every engine
//!
//! An engine never allocates its own working state. The caller asks for the
//! size of the opaque state region (`init(None)`, the size query),
//! allocates exactly that many bytes, and hands the region back to every
//! lifecycle call. The region's layout is private to the engine.

use crate::{Algorithm, HashError, Result};
use std::marker::PhantomData;

/// Streaming hash contract implemented by every algorithm variant
pub trait HashEngine {
    /// Algorithm this engine computes
    const ALGORITHM: Algorithm;

    /// Digest length in bytes
    const DIGEST_LEN: usize;

    /// Length in bytes of a serialized checkpoint
    const SERIALIZED_LEN: usize;

    /// Initialize `state`, or report the required state size when `state` is `None`
    ///
    /// Returns the number of bytes the state region must hold either way.
    /// Re-initializing an already initialized region is allowed.
    ///
    /// # Errors
    ///
    /// Returns `HashError::StateBufferTooSmall` if `state` is shorter than the
    /// required size.
    fn init(state: Option<&mut [u8]>) -> Result<usize>;

    /// Return an initialized state to the initial state
    ///
    /// # Errors
    ///
    /// Returns an error if `state` was never initialized by this engine.
    fn reset(state: &mut [u8]) -> Result<()>;

    /// Absorb `data` into the running computation
    ///
    /// # Errors
    ///
    /// Returns an error if `state` was never initialized by this engine.
    fn update(state: &mut [u8], data: &[u8]) -> Result<()>;

    /// Complete the computation and write `DIGEST_LEN` bytes to `out`
    ///
    /// The state afterwards is engine-defined; call `reset` before reuse.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` is not initialized or `out` is too short.
    fn finalize(state: &mut [u8], out: &mut [u8]) -> Result<usize>;

    /// One-shot digest of `data` into `out`
    ///
    /// # Errors
    ///
    /// Returns `HashError::OutputBufferTooSmall` if `out` is too short.
    fn digest(data: &[u8], out: &mut [u8]) -> Result<usize>;

    /// Encode the current state as a `SERIALIZED_LEN`-byte checkpoint
    ///
    /// # Errors
    ///
    /// Returns an error if `state` is not initialized or `out` is too short.
    fn serialize(state: &[u8], out: &mut [u8]) -> Result<usize>;

    /// Rebuild a live state from a checkpoint produced by `serialize`
    ///
    /// On failure `state` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `HashError::MalformedSerializedState` for blobs of the wrong
    /// size or with inconsistent fields.
    fn deserialize(serialized: &[u8], state: &mut [u8]) -> Result<usize>;

    /// Size of the state region, discovered through the size query
    #[must_use]
    fn required_state_size() -> usize {
        // The size query never touches a state region, so it cannot fail.
        Self::init(None).unwrap_or_default()
    }
}

/// Caller-owned state region sized by an engine's size query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBuffer {
    bytes: Box<[u8]>,
}

impl StateBuffer {
    /// Allocate a zeroed region of exactly `E::required_state_size()` bytes
    ///
    /// The region is not initialized; pass it to `E::init` first.
    ///
    /// # Errors
    ///
    /// Returns `HashError::Allocation` if the region cannot be allocated.
    pub fn for_engine<E: HashEngine>() -> Result<Self> {
        Self::zeroed(E::required_state_size())
    }

    /// Allocate a zeroed region of `size` bytes
    ///
    /// # Errors
    ///
    /// Returns `HashError::Allocation` if the region cannot be allocated.
    pub fn zeroed(size: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| HashError::Allocation(size))?;
        bytes.resize(size, 0);
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    /// Size of the region in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the region is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the region
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Borrow the region mutably
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Typed handle pairing one engine with one owned state region
///
/// Not meant to be shared between threads while a computation is running;
/// each conformance group owns its own.
#[derive(Debug)]
pub struct HashState<E: HashEngine> {
    buffer: StateBuffer,
    _engine: PhantomData<E>,
}

impl<E: HashEngine> HashState<E> {
    /// Allocate and initialize a fresh state
    ///
    /// # Errors
    ///
    /// Returns an error if the region cannot be allocated or initialized.
    pub fn new() -> Result<Self> {
        let mut buffer = StateBuffer::for_engine::<E>()?;
        E::init(Some(buffer.as_mut_slice()))?;
        Ok(Self {
            buffer,
            _engine: PhantomData,
        })
    }

    /// Rebuild a state from a serialized checkpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the checkpoint is rejected or allocation fails.
    pub fn from_checkpoint(serialized: &[u8]) -> Result<Self> {
        let mut buffer = StateBuffer::for_engine::<E>()?;
        E::deserialize(serialized, buffer.as_mut_slice())?;
        Ok(Self {
            buffer,
            _engine: PhantomData,
        })
    }

    /// Re-run `init` on the owned region
    ///
    /// # Errors
    ///
    /// Propagates engine errors.
    pub fn init(&mut self) -> Result<()> {
        E::init(Some(self.buffer.as_mut_slice())).map(|_| ())
    }

    /// Return to the initial state
    ///
    /// # Errors
    ///
    /// Propagates engine errors.
    pub fn reset(&mut self) -> Result<()> {
        E::reset(self.buffer.as_mut_slice())
    }

    /// Absorb `data`
    ///
    /// # Errors
    ///
    /// Propagates engine errors.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        E::update(self.buffer.as_mut_slice(), data)
    }

    /// Finalize into a freshly allocated digest
    ///
    /// # Errors
    ///
    /// Propagates engine errors.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; E::DIGEST_LEN];
        let written = E::finalize(self.buffer.as_mut_slice(), &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Serialize the current state into a freshly allocated checkpoint
    ///
    /// # Errors
    ///
    /// Propagates engine errors.
    pub fn checkpoint(&self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; E::SERIALIZED_LEN];
        let written = E::serialize(self.buffer.as_slice(), &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Borrow the underlying state region
    #[must_use]
    pub fn buffer(&self) -> &StateBuffer {
        &self.buffer
    }
}

/// One-shot digest into a freshly allocated buffer
///
/// # Errors
///
/// Propagates engine errors.
pub fn digest_to_vec<E: HashEngine>(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = vec![0u8; E::DIGEST_LEN];
    let written = E::digest(data, &mut out)?;
    out.truncate(written);
    Ok(out)
}
