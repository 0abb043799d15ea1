//! Conformance verification of SHA-2 engines against CAVS response files
//!
//! The flow is `.rsp` file → [`parser`] → [`VectorFile`] → [`runner`] paired
//! with one [`shavs_hashing::HashEngine`] → [`GroupReport`]. Groups are
//! independent and the [`Suite`] may run them concurrently.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod runner;
pub mod suite;
pub mod vectors;

pub use config::ConformanceConfig;
pub use error::{ConformanceError, ParseError, Result};
pub use parser::{parse, parse_bytes, parse_str};
pub use report::{CheckKind, GroupReport, Mismatch};
pub use runner::ConformanceRunner;
pub use suite::{GroupOutcome, GroupSpec, Suite, SuiteReport, run_group, run_group_for};
pub use vectors::{TestVector, VectorFile};
