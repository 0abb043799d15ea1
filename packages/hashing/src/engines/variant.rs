//! Per-algorithm parameters
//!
//! A variant is a family plus an initial hash value and a digest length.

use super::family::{Sha2_32, Sha2_64, ShaFamily};
use crate::Algorithm;

/// Chaining word of a variant's family
pub type WordOf<V> = <<V as Sha2Variant>::Family as ShaFamily>::Word;

/// A concrete SHA-2 algorithm
pub trait Sha2Variant: 'static {
    /// Word-size family
    type Family: ShaFamily;

    /// Algorithm identity
    const ALGORITHM: Algorithm;

    /// Initial hash value
    const IV: [WordOf<Self>; 8];

    /// Digest length in bytes; a prefix of the final chaining state
    const DIGEST_LEN: usize;
}

/// SHA-224 parameters
#[derive(Debug)]
pub struct Sha224Params;

impl Sha2Variant for Sha224Params {
    type Family = Sha2_32;
    const ALGORITHM: Algorithm = Algorithm::Sha224;
    const IV: [u32; 8] = [
        0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7,
        0xbefa4fa4,
    ];
    const DIGEST_LEN: usize = 28;
}

/// SHA-256 parameters
#[derive(Debug)]
pub struct Sha256Params;

impl Sha2Variant for Sha256Params {
    type Family = Sha2_32;
    const ALGORITHM: Algorithm = Algorithm::Sha256;
    const IV: [u32; 8] = [
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
        0x5be0cd19,
    ];
    const DIGEST_LEN: usize = 32;
}

/// SHA-384 parameters
#[derive(Debug)]
pub struct Sha384Params;

impl Sha2Variant for Sha384Params {
    type Family = Sha2_64;
    const ALGORITHM: Algorithm = Algorithm::Sha384;
    const IV: [u64; 8] = [
        0xcbbb9d5dc1059ed8,
        0x629a292a367cd507,
        0x9159015a3070dd17,
        0x152fecd8f70e5939,
        0x67332667ffc00b31,
        0x8eb44a8768581511,
        0xdb0c2e0d64f98fa7,
        0x47b5481dbefa4fa4,
    ];
    const DIGEST_LEN: usize = 48;
}

/// SHA-512 parameters
#[derive(Debug)]
pub struct Sha512Params;

impl Sha2Variant for Sha512Params {
    type Family = Sha2_64;
    const ALGORITHM: Algorithm = Algorithm::Sha512;
    const IV: [u64; 8] = [
        0x6a09e667f3bcc908,
        0xbb67ae8584caa73b,
        0x3c6ef372fe94f82b,
        0xa54ff53a5f1d36f1,
        0x510e527fade682d1,
        0x9b05688c2b3e6c1f,
        0x1f83d9abfb41bd6b,
        0x5be0cd19137e2179,
    ];
    const DIGEST_LEN: usize = 64;
}

/// SHA-512/256 parameters
#[derive(Debug)]
pub struct Sha512_256Params;

impl Sha2Variant for Sha512_256Params {
    type Family = Sha2_64;
    const ALGORITHM: Algorithm = Algorithm::Sha512_256;
    const IV: [u64; 8] = [
        0x22312194fc2bf72c,
        0x9f555fa3c84c64c2,
        0x2393b86b6f53b151,
        0x963877195940eabd,
        0x96283ee2a88effe3,
        0xbe5e1e2553863992,
        0x2b0199fc2c85b8aa,
        0x0eb72ddc81c52ca2,
    ];
    const DIGEST_LEN: usize = 32;
}
