//! SHA-2 engines behind a size-polymorphic streaming-hash contract
//!
//! Every engine is driven through [`HashEngine`]: callers discover the size
//! of the opaque state region with a size query, own that region, and pass
//! it back to `init`/`update`/`finalize`/`reset`/`serialize`/`deserialize`.

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod bindings;
pub mod contract;
pub mod error;
pub mod engines;

pub use algorithm::Algorithm;
pub use contract::{HashEngine, HashState, StateBuffer};
pub use error::{HashError, Result};
pub use engines::{Sha224, Sha256, Sha2Engine, Sha384, Sha512, Sha512_256};
