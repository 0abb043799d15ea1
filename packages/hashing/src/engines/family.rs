//! Word-size families of SHA-2
//!
//! A family fixes the word type, block length and width of the message
//! length field. The compression function is delegated to the `sha2` crate.

use sha2::digest::generic_array::GenericArray;
use std::fmt;

/// Largest block length across families
pub(crate) const MAX_BLOCK_LEN: usize = 128;

/// Largest chaining-state length across families (8 × u64)
pub(crate) const MAX_STATE_LEN: usize = 64;

/// Chaining-word operations shared by both families
pub trait ShaWord: Copy + Default + Eq + fmt::Debug + 'static {
    /// Width of the word in bytes
    const BYTES: usize;

    /// Write the word big-endian into `dst[..BYTES]`
    fn write_be(self, dst: &mut [u8]);

    /// Read a big-endian word from `src[..BYTES]`
    fn read_be(src: &[u8]) -> Self;
}

impl ShaWord for u32 {
    const BYTES: usize = 4;

    fn write_be(self, dst: &mut [u8]) {
        dst[..4].copy_from_slice(&self.to_be_bytes());
    }

    fn read_be(src: &[u8]) -> Self {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&src[..4]);
        u32::from_be_bytes(bytes)
    }
}

impl ShaWord for u64 {
    const BYTES: usize = 8;

    fn write_be(self, dst: &mut [u8]) {
        dst[..8].copy_from_slice(&self.to_be_bytes());
    }

    fn read_be(src: &[u8]) -> Self {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&src[..8]);
        u64::from_be_bytes(bytes)
    }
}

/// A SHA-2 word-size family
pub trait ShaFamily: 'static {
    /// Chaining word
    type Word: ShaWord;

    /// Block length in bytes
    const BLOCK_LEN: usize;

    /// Width of the trailing bit-length field in a padded block
    const LEN_FIELD_LEN: usize;

    /// Bytes of the eight chaining words
    const STATE_LEN: usize;

    /// Compress one `BLOCK_LEN`-byte block into the chaining words
    fn compress(words: &mut [Self::Word; 8], block: &[u8]);

    /// Write the message length in bits into the padding length field
    fn encode_bit_len(total_bytes: u128, dst: &mut [u8]);

    /// Write the absorbed byte count into a checkpoint
    fn write_total_len(total_bytes: u128, dst: &mut [u8]);

    /// Read the absorbed byte count from a checkpoint
    fn read_total_len(src: &[u8]) -> u128;
}

/// SHA-224 and SHA-256
pub struct Sha2_32;

impl ShaFamily for Sha2_32 {
    type Word = u32;
    const BLOCK_LEN: usize = 64;
    const LEN_FIELD_LEN: usize = 8;
    const STATE_LEN: usize = 32;

    fn compress(words: &mut [u32; 8], block: &[u8]) {
        ::sha2::compress256(words, std::slice::from_ref(GenericArray::from_slice(block)));
    }

    fn encode_bit_len(total_bytes: u128, dst: &mut [u8]) {
        // The length field is the bit count modulo 2^64.
        let bits = (total_bytes as u64).wrapping_shl(3);
        dst[..8].copy_from_slice(&bits.to_be_bytes());
    }

    fn write_total_len(total_bytes: u128, dst: &mut [u8]) {
        dst[..8].copy_from_slice(&(total_bytes as u64).to_be_bytes());
    }

    fn read_total_len(src: &[u8]) -> u128 {
        u128::from(u64::read_be(src))
    }
}

/// SHA-384, SHA-512 and SHA-512/256
pub struct Sha2_64;

impl ShaFamily for Sha2_64 {
    type Word = u64;
    const BLOCK_LEN: usize = 128;
    const LEN_FIELD_LEN: usize = 16;
    const STATE_LEN: usize = 64;

    fn compress(words: &mut [u64; 8], block: &[u8]) {
        ::sha2::compress512(words, std::slice::from_ref(GenericArray::from_slice(block)));
    }

    fn encode_bit_len(total_bytes: u128, dst: &mut [u8]) {
        dst[..16].copy_from_slice(&total_bytes.wrapping_shl(3).to_be_bytes());
    }

    fn write_total_len(total_bytes: u128, dst: &mut [u8]) {
        dst[..16].copy_from_slice(&total_bytes.to_be_bytes());
    }

    fn read_total_len(src: &[u8]) -> u128 {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&src[..16]);
        u128::from_be_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_length_field_is_big_endian() {
        let mut field = [0u8; 8];
        Sha2_32::encode_bit_len(3, &mut field);
        assert_eq!(field, [0, 0, 0, 0, 0, 0, 0, 24]);

        let mut wide = [0u8; 16];
        Sha2_64::encode_bit_len(0x0100, &mut wide);
        assert_eq!(&wide[13..], &[0x00, 0x08, 0x00][..]);
    }

    #[test]
    fn test_32_bit_length_field_wraps() {
        let mut field = [0u8; 8];
        // 2^61 bytes is 2^64 bits, which wraps to zero.
        Sha2_32::encode_bit_len(1u128 << 61, &mut field);
        assert_eq!(field, [0u8; 8]);
    }

    #[test]
    fn test_total_len_round_trip() {
        let mut narrow = [0u8; 8];
        Sha2_32::write_total_len(0x1234_5678_9abc, &mut narrow);
        assert_eq!(Sha2_32::read_total_len(&narrow), 0x1234_5678_9abc);

        let mut wide = [0u8; 16];
        Sha2_64::write_total_len(u128::from(u64::MAX) + 7, &mut wide);
        assert_eq!(Sha2_64::read_total_len(&wide), u128::from(u64::MAX) + 7);
    }
}
