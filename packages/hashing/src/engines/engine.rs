//! The generic SHA-2 engine satisfying the streaming-hash contract

use super::core::Sha2Core;
use super::variant::Sha2Variant;
use crate::{HashEngine, HashError, Result};
use std::fmt;
use std::marker::PhantomData;

/// SHA-2 engine for variant `V`
///
/// Stateless itself; all in-flight state lives in the caller's region.
/// `finalize` leaves that region untouched, so a finalized state may keep
/// absorbing data, but callers should not rely on it and `reset` instead.
pub struct Sha2Engine<V: Sha2Variant> {
    _variant: PhantomData<V>,
}

impl<V: Sha2Variant> fmt::Debug for Sha2Engine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha2Engine")
            .field("algorithm", &V::ALGORITHM)
            .finish()
    }
}

fn check_state(region: &[u8], required: usize) -> Result<()> {
    if region.len() < required {
        return Err(HashError::StateBufferTooSmall {
            required,
            actual: region.len(),
        });
    }
    Ok(())
}

fn check_output(out: &[u8], required: usize) -> Result<()> {
    if out.len() < required {
        return Err(HashError::OutputBufferTooSmall {
            required,
            actual: out.len(),
        });
    }
    Ok(())
}

impl<V: Sha2Variant> HashEngine for Sha2Engine<V> {
    const ALGORITHM: crate::Algorithm = V::ALGORITHM;
    const DIGEST_LEN: usize = V::DIGEST_LEN;
    const SERIALIZED_LEN: usize = Sha2Core::<V>::SERIALIZED_LEN;

    fn init(state: Option<&mut [u8]>) -> Result<usize> {
        if let Some(state) = state {
            check_state(state, Sha2Core::<V>::LIVE_LEN)?;
            Sha2Core::<V>::new().store(state);
        }
        Ok(Sha2Core::<V>::LIVE_LEN)
    }

    fn reset(state: &mut [u8]) -> Result<()> {
        Sha2Core::<V>::load(state)?;
        Sha2Core::<V>::new().store(state);
        Ok(())
    }

    fn update(state: &mut [u8], data: &[u8]) -> Result<()> {
        let mut core = Sha2Core::<V>::load(state)?;
        core.update(data);
        core.store(state);
        Ok(())
    }

    fn finalize(state: &mut [u8], out: &mut [u8]) -> Result<usize> {
        check_output(out, V::DIGEST_LEN)?;
        Sha2Core::<V>::load(state)?.finalize_into(out);
        Ok(V::DIGEST_LEN)
    }

    fn digest(data: &[u8], out: &mut [u8]) -> Result<usize> {
        check_output(out, V::DIGEST_LEN)?;
        let mut core = Sha2Core::<V>::new();
        core.update(data);
        core.finalize_into(out);
        Ok(V::DIGEST_LEN)
    }

    fn serialize(state: &[u8], out: &mut [u8]) -> Result<usize> {
        check_output(out, Sha2Core::<V>::SERIALIZED_LEN)?;
        Sha2Core::<V>::load(state)?.write_checkpoint(out);
        Ok(Sha2Core::<V>::SERIALIZED_LEN)
    }

    fn deserialize(serialized: &[u8], state: &mut [u8]) -> Result<usize> {
        check_state(state, Sha2Core::<V>::LIVE_LEN)?;
        let core = Sha2Core::<V>::read_checkpoint(serialized).map_err(|err| {
            log::warn!("Rejected {} checkpoint: {err}", V::ALGORITHM);
            err
        })?;
        core.store(state);
        Ok(Sha2Core::<V>::LIVE_LEN)
    }
}
