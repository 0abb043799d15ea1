//! SHA-2 engines
//!
//! One generic engine over a variant parameter covers all five algorithms:
//!
//! | Engine        | Family | Block | Digest | Checkpoint |
//! |---------------|--------|-------|--------|------------|
//! | `Sha224`      | 32-bit | 64    | 28     | 105        |
//! | `Sha256`      | 32-bit | 64    | 32     | 105        |
//! | `Sha384`      | 64-bit | 128   | 48     | 209        |
//! | `Sha512`      | 64-bit | 128   | 64     | 209        |
//! | `Sha512_256`  | 64-bit | 128   | 32     | 209        |

mod core;
mod engine;
pub mod family;
pub mod variant;

pub use engine::Sha2Engine;
pub use variant::{
    Sha224Params, Sha256Params, Sha2Variant, Sha384Params, Sha512Params, Sha512_256Params,
};

/// SHA-224 engine
pub type Sha224 = Sha2Engine<Sha224Params>;
/// SHA-256 engine
pub type Sha256 = Sha2Engine<Sha256Params>;
/// SHA-384 engine
pub type Sha384 = Sha2Engine<Sha384Params>;
/// SHA-512 engine
pub type Sha512 = Sha2Engine<Sha512Params>;
/// SHA-512/256 engine
pub type Sha512_256 = Sha2Engine<Sha512_256Params>;
