//! Common infrastructure shared by the SHAVS conformance crates
//!
//! This crate provides:
//! - Error handling with context propagation and backtrace capture
//! - Logging bootstrap over the `log` facade

pub mod error;

pub use error::*;
