//! Error handling with context propagation
//!
//! Provides a small error system with:
//! - Error kinds shared by every crate in the workspace
//! - Context attachment for debugging
//! - Backtrace capture (behind the `full-backtrace` feature)

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

pub use extensions::{OptionExt, ResultExt};
pub use logging::LoggingTransformer;
pub use types::{Error, ErrorKind, Result};
