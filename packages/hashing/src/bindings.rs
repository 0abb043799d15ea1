//! Per-algorithm entry points following the `<algorithm>_<operation>` naming
//!
//! Each function is a thin wrapper over the engine's [`HashEngine`] impl and
//! takes caller-owned buffers only. `<algorithm>_init(None)` is the size
//! query.

use crate::{HashEngine, Result, Sha224, Sha256, Sha384, Sha512, Sha512_256};

macro_rules! engine_bindings {
    (
        $engine:ty, $label:literal:
        $init:ident, $reset:ident, $update:ident, $finalize:ident,
        $digest:ident, $serialize:ident, $deserialize:ident
    ) => {
        #[doc = concat!("Initialize a ", $label, " state, or return the required state size when `state` is `None`")]
        ///
        /// # Errors
        ///
        /// Returns an error if `state` is too small.
        pub fn $init(state: Option<&mut [u8]>) -> Result<usize> {
            <$engine>::init(state)
        }

        #[doc = concat!("Return a ", $label, " state to its initial value")]
        ///
        /// # Errors
        ///
        /// Returns an error if `state` is not an initialized state of this algorithm.
        pub fn $reset(state: &mut [u8]) -> Result<()> {
            <$engine>::reset(state)
        }

        #[doc = concat!("Absorb `data` into a ", $label, " state")]
        ///
        /// # Errors
        ///
        /// Returns an error if `state` is not an initialized state of this algorithm.
        pub fn $update(state: &mut [u8], data: &[u8]) -> Result<()> {
            <$engine>::update(state, data)
        }

        #[doc = concat!("Write the ", $label, " digest of the absorbed data to `out`")]
        ///
        /// # Errors
        ///
        /// Returns an error if `state` is invalid or `out` is too short.
        pub fn $finalize(state: &mut [u8], out: &mut [u8]) -> Result<usize> {
            <$engine>::finalize(state, out)
        }

        #[doc = concat!("One-shot ", $label, " digest of `data`")]
        ///
        /// # Errors
        ///
        /// Returns an error if `out` is too short.
        pub fn $digest(data: &[u8], out: &mut [u8]) -> Result<usize> {
            <$engine>::digest(data, out)
        }

        #[doc = concat!("Serialize a ", $label, " state into `out`")]
        ///
        /// # Errors
        ///
        /// Returns an error if `state` is invalid or `out` is too short.
        pub fn $serialize(state: &[u8], out: &mut [u8]) -> Result<usize> {
            <$engine>::serialize(state, out)
        }

        #[doc = concat!("Restore a ", $label, " state from a checkpoint")]
        ///
        /// # Errors
        ///
        /// Returns an error if the checkpoint is malformed; `state` is then untouched.
        pub fn $deserialize(serialized: &[u8], state: &mut [u8]) -> Result<usize> {
            <$engine>::deserialize(serialized, state)
        }
    };
}

engine_bindings!(Sha224, "SHA-224":
    sha224_init, sha224_reset, sha224_update, sha224_finalize,
    sha224_digest, sha224_serialize, sha224_deserialize);

engine_bindings!(Sha256, "SHA-256":
    sha256_init, sha256_reset, sha256_update, sha256_finalize,
    sha256_digest, sha256_serialize, sha256_deserialize);

engine_bindings!(Sha384, "SHA-384":
    sha384_init, sha384_reset, sha384_update, sha384_finalize,
    sha384_digest, sha384_serialize, sha384_deserialize);

engine_bindings!(Sha512, "SHA-512":
    sha512_init, sha512_reset, sha512_update, sha512_finalize,
    sha512_digest, sha512_serialize, sha512_deserialize);

engine_bindings!(Sha512_256, "SHA-512/256":
    sha512_256_init, sha512_256_reset, sha512_256_update, sha512_256_finalize,
    sha512_256_digest, sha512_256_serialize, sha512_256_deserialize);
