//! Extension traits for attaching context to results and options

use super::types::{Error, ErrorKind};
use std::fmt;

/// Attach context to any result whose error converts into [`Error`]
pub trait ResultExt<T> {
    /// Wrap the error with a context message
    ///
    /// # Errors
    ///
    /// Returns the original error, converted and annotated with `context`.
    fn context<C: fmt::Display>(self, context: C) -> Result<T, Error>;

    /// Wrap the error with a lazily built context message
    ///
    /// # Errors
    ///
    /// Returns the original error, converted and annotated with the context.
    fn with_context<C, F>(self, f: F) -> Result<T, Error>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Error>,
{
    fn context<C: fmt::Display>(self, context: C) -> Result<T, Error> {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, Error>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f()))
    }
}

/// Turn a missing value into an [`Error`] of the given kind
pub trait OptionExt<T> {
    /// Convert `None` into an error of `kind` carrying `context`
    ///
    /// # Errors
    ///
    /// Returns an error when the option is `None`.
    fn ok_or_kind<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T, Error>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_kind<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T, Error> {
        self.ok_or_else(|| Error::new(kind).context(context))
    }
}
