//! Working state of a SHA-2 computation and its two byte encodings
//!
//! The live region (what callers allocate via the size query) is laid out
//! as:
//!
//! ```text
//! [0]                      variant tag (0 = never initialized)
//! [1]                      buffered byte count
//! [2 .. 18]                total bytes absorbed, u128 big-endian
//! [18 .. 18 + STATE]       eight chaining words, big-endian
//! [18 + STATE .. LIVE]     partial block
//! ```
//!
//! The serialized checkpoint omits the tag and packs the length field to the
//! family's width (all big-endian):
//!
//! ```text
//! [0 .. STATE]                         eight chaining words
//! [STATE .. STATE + BLOCK]             partial block, zero-padded
//! [STATE + BLOCK]                      buffered byte count
//! [STATE + BLOCK + 1 .. SERIALIZED]    total bytes absorbed
//! ```
//!
//! giving 105 bytes for SHA-224/256 and 209 bytes for the 64-bit family.

use super::family::{ShaFamily, ShaWord, MAX_BLOCK_LEN, MAX_STATE_LEN};
use super::variant::{Sha2Variant, WordOf};
use crate::{HashError, Result};
use std::marker::PhantomData;

const TAG_OFFSET: usize = 0;
const BUFFER_LEN_OFFSET: usize = 1;
const TOTAL_LEN_OFFSET: usize = 2;
const WORDS_OFFSET: usize = 18;

/// In-flight SHA-2 computation for variant `V`
pub(crate) struct Sha2Core<V: Sha2Variant> {
    words: [WordOf<V>; 8],
    block: [u8; MAX_BLOCK_LEN],
    buffer_len: usize,
    total_len: u128,
    _variant: PhantomData<V>,
}

impl<V: Sha2Variant> Sha2Core<V> {
    const BLOCK_LEN: usize = <V::Family as ShaFamily>::BLOCK_LEN;
    const STATE_LEN: usize = <V::Family as ShaFamily>::STATE_LEN;
    const WORD_LEN: usize = <WordOf<V> as ShaWord>::BYTES;

    /// Size of the live state region
    pub(crate) const LIVE_LEN: usize = WORDS_OFFSET + Self::STATE_LEN + Self::BLOCK_LEN;

    /// Size of a serialized checkpoint
    pub(crate) const SERIALIZED_LEN: usize =
        Self::STATE_LEN + Self::BLOCK_LEN + 1 + <V::Family as ShaFamily>::LEN_FIELD_LEN;

    pub(crate) fn new() -> Self {
        debug_assert_eq!(Self::BLOCK_LEN, V::ALGORITHM.block_len());
        Self {
            words: V::IV,
            block: [0u8; MAX_BLOCK_LEN],
            buffer_len: 0,
            total_len: 0,
            _variant: PhantomData,
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        let block_len = Self::BLOCK_LEN;
        self.total_len = self.total_len.wrapping_add(data.len() as u128);
        let mut rest = data;

        if self.buffer_len > 0 {
            let take = (block_len - self.buffer_len).min(rest.len());
            self.block[self.buffer_len..self.buffer_len + take].copy_from_slice(&rest[..take]);
            self.buffer_len += take;
            rest = &rest[take..];
            if self.buffer_len < block_len {
                return;
            }
            <V::Family as ShaFamily>::compress(&mut self.words, &self.block[..block_len]);
            self.buffer_len = 0;
        }

        let mut blocks = rest.chunks_exact(block_len);
        for block in &mut blocks {
            <V::Family as ShaFamily>::compress(&mut self.words, block);
        }
        let tail = blocks.remainder();
        self.block[..tail.len()].copy_from_slice(tail);
        self.buffer_len = tail.len();
    }

    /// Pad, compress the final block(s) and write the digest prefix to `out`
    ///
    /// `out` must hold at least `V::DIGEST_LEN` bytes.
    pub(crate) fn finalize_into(mut self, out: &mut [u8]) {
        let block_len = Self::BLOCK_LEN;
        let pad_threshold = block_len - <V::Family as ShaFamily>::LEN_FIELD_LEN;

        self.block[self.buffer_len] = 0x80;
        let mut used = self.buffer_len + 1;

        // No room left for the length field: flush an extra block.
        if used > pad_threshold {
            self.block[used..block_len].fill(0);
            <V::Family as ShaFamily>::compress(&mut self.words, &self.block[..block_len]);
            used = 0;
        }

        self.block[used..pad_threshold].fill(0);
        <V::Family as ShaFamily>::encode_bit_len(
            self.total_len,
            &mut self.block[pad_threshold..block_len],
        );
        <V::Family as ShaFamily>::compress(&mut self.words, &self.block[..block_len]);

        let mut full = [0u8; MAX_STATE_LEN];
        self.export_words(&mut full[..Self::STATE_LEN]);
        out[..V::DIGEST_LEN].copy_from_slice(&full[..V::DIGEST_LEN]);
    }

    /// Write the live layout into `region`, which must hold `LIVE_LEN` bytes
    pub(crate) fn store(&self, region: &mut [u8]) {
        let block_start = WORDS_OFFSET + Self::STATE_LEN;
        region[TAG_OFFSET] = V::ALGORITHM.tag();
        region[BUFFER_LEN_OFFSET] = self.buffer_len as u8;
        region[TOTAL_LEN_OFFSET..WORDS_OFFSET].copy_from_slice(&self.total_len.to_be_bytes());
        self.export_words(&mut region[WORDS_OFFSET..block_start]);
        self.export_block(&mut region[block_start..block_start + Self::BLOCK_LEN]);
    }

    /// Read and validate the live layout from `region`
    pub(crate) fn load(region: &[u8]) -> Result<Self> {
        if region.len() < Self::LIVE_LEN {
            return Err(HashError::StateBufferTooSmall {
                required: Self::LIVE_LEN,
                actual: region.len(),
            });
        }

        match region[TAG_OFFSET] {
            0 => return Err(HashError::StateNotInitialized),
            tag if tag != V::ALGORITHM.tag() => {
                return Err(HashError::StateVariantMismatch {
                    expected: V::ALGORITHM,
                    found_tag: tag,
                })
            }
            _ => {}
        }

        let buffer_len = usize::from(region[BUFFER_LEN_OFFSET]);
        let mut total = [0u8; 16];
        total.copy_from_slice(&region[TOTAL_LEN_OFFSET..WORDS_OFFSET]);
        let total_len = u128::from_be_bytes(total);
        Self::check_lengths(buffer_len, total_len).map_err(HashError::corrupt_state)?;

        let block_start = WORDS_OFFSET + Self::STATE_LEN;
        Ok(Self::from_parts(
            &region[WORDS_OFFSET..block_start],
            &region[block_start..block_start + Self::BLOCK_LEN],
            buffer_len,
            total_len,
        ))
    }

    /// Write the checkpoint layout into `out`, which must hold `SERIALIZED_LEN` bytes
    pub(crate) fn write_checkpoint(&self, out: &mut [u8]) {
        let block_end = Self::STATE_LEN + Self::BLOCK_LEN;
        self.export_words(&mut out[..Self::STATE_LEN]);
        self.export_block(&mut out[Self::STATE_LEN..block_end]);
        out[block_end] = self.buffer_len as u8;
        <V::Family as ShaFamily>::write_total_len(
            self.total_len,
            &mut out[block_end + 1..Self::SERIALIZED_LEN],
        );
    }

    /// Parse and validate a checkpoint
    pub(crate) fn read_checkpoint(src: &[u8]) -> Result<Self> {
        if src.len() != Self::SERIALIZED_LEN {
            return Err(HashError::malformed_serialized(format!(
                "{} checkpoint must be {} bytes, got {}",
                V::ALGORITHM,
                Self::SERIALIZED_LEN,
                src.len()
            )));
        }

        let block_end = Self::STATE_LEN + Self::BLOCK_LEN;
        let buffer_len = usize::from(src[block_end]);
        let total_len = <V::Family as ShaFamily>::read_total_len(&src[block_end + 1..]);
        Self::check_lengths(buffer_len, total_len).map_err(HashError::malformed_serialized)?;

        Ok(Self::from_parts(
            &src[..Self::STATE_LEN],
            &src[Self::STATE_LEN..block_end],
            buffer_len,
            total_len,
        ))
    }

    fn check_lengths(buffer_len: usize, total_len: u128) -> std::result::Result<(), String> {
        let block_len = Self::BLOCK_LEN;
        if buffer_len >= block_len {
            return Err(format!(
                "buffered length {buffer_len} must be below the block length {block_len}"
            ));
        }
        if total_len % block_len as u128 != buffer_len as u128 {
            return Err(format!(
                "buffered length {buffer_len} disagrees with total length {total_len}"
            ));
        }
        Ok(())
    }

    fn from_parts(words: &[u8], block: &[u8], buffer_len: usize, total_len: u128) -> Self {
        let mut core = Self::new();
        for (i, word) in core.words.iter_mut().enumerate() {
            *word = <WordOf<V> as ShaWord>::read_be(&words[i * Self::WORD_LEN..]);
        }
        core.block[..buffer_len].copy_from_slice(&block[..buffer_len]);
        core.buffer_len = buffer_len;
        core.total_len = total_len;
        core
    }

    fn export_words(&self, dst: &mut [u8]) {
        for (i, &word) in self.words.iter().enumerate() {
            word.write_be(&mut dst[i * Self::WORD_LEN..]);
        }
    }

    fn export_block(&self, dst: &mut [u8]) {
        dst[..self.buffer_len].copy_from_slice(&self.block[..self.buffer_len]);
        dst[self.buffer_len..].fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::super::variant::{
        Sha224Params, Sha256Params, Sha384Params, Sha512Params, Sha512_256Params,
    };
    use super::*;
    use crate::Algorithm;

    #[test]
    fn test_family_block_len_matches_algorithm() {
        assert_eq!(Sha2Core::<Sha224Params>::BLOCK_LEN, Algorithm::Sha224.block_len());
        assert_eq!(Sha2Core::<Sha256Params>::BLOCK_LEN, Algorithm::Sha256.block_len());
        assert_eq!(Sha2Core::<Sha384Params>::BLOCK_LEN, Algorithm::Sha384.block_len());
        assert_eq!(Sha2Core::<Sha512Params>::BLOCK_LEN, Algorithm::Sha512.block_len());
        assert_eq!(
            Sha2Core::<Sha512_256Params>::BLOCK_LEN,
            Algorithm::Sha512_256.block_len()
        );
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(Sha2Core::<Sha256Params>::SERIALIZED_LEN, 105);
        assert_eq!(Sha2Core::<Sha384Params>::SERIALIZED_LEN, 209);
        assert_eq!(Sha2Core::<Sha256Params>::LIVE_LEN, 18 + 32 + 64);
        assert_eq!(Sha2Core::<Sha384Params>::LIVE_LEN, 18 + 64 + 128);
    }

    #[test]
    fn test_initial_checkpoint_is_big_endian_iv() {
        let mut out = [0u8; 105];
        Sha2Core::<Sha256Params>::new().write_checkpoint(&mut out);
        assert_eq!(&out[0..4], &[0x6a, 0x09, 0xe6, 0x67]);
        assert_eq!(&out[28..32], &[0x5b, 0xe0, 0xcd, 0x19]);
        assert_eq!(out[96], 0);
        assert_eq!(&out[97..], &[0u8; 8]);
    }

    #[test]
    fn test_exact_block_leaves_nothing_buffered() {
        let mut core = Sha2Core::<Sha256Params>::new();
        core.update(&[0x42; 64]);
        assert_eq!(core.buffer_len, 0);
        assert_eq!(core.total_len, 64);

        core.update(&[0x42; 70]);
        assert_eq!(core.buffer_len, 6);
        assert_eq!(core.total_len, 134);
    }

    #[test]
    fn test_live_round_trip_preserves_state() {
        let mut core = Sha2Core::<Sha384Params>::new();
        core.update(b"live layout round trip");
        let mut region = vec![0u8; Sha2Core::<Sha384Params>::LIVE_LEN];
        core.store(&mut region);

        let loaded = Sha2Core::<Sha384Params>::load(&region);
        assert!(loaded.is_ok());
        let mut again = vec![0u8; region.len()];
        if let Ok(loaded) = loaded {
            loaded.store(&mut again);
        }
        assert_eq!(region, again);
    }

    #[test]
    fn test_load_rejects_inconsistent_lengths() {
        let mut region = vec![0u8; Sha2Core::<Sha256Params>::LIVE_LEN];
        Sha2Core::<Sha256Params>::new().store(&mut region);
        region[BUFFER_LEN_OFFSET] = 3;
        assert!(matches!(
            Sha2Core::<Sha256Params>::load(&region),
            Err(HashError::CorruptState(_))
        ));
    }

    #[test]
    fn test_checkpoint_rejects_oversized_buffer_len() {
        let mut out = [0u8; 105];
        Sha2Core::<Sha256Params>::new().write_checkpoint(&mut out);
        out[96] = 64;
        assert!(matches!(
            Sha2Core::<Sha256Params>::read_checkpoint(&out),
            Err(HashError::MalformedSerializedState(_))
        ));
    }
}
