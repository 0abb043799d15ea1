//! Shorthand for building and returning [`Error`](crate::Error) values
//!
//! Kinds are named by their [`ErrorKind`](crate::ErrorKind) variant; an
//! optional format string becomes the error's context.

/// Build an error of the given kind
#[macro_export]
macro_rules! err {
    ($kind:ident) => {
        $crate::Error::new($crate::ErrorKind::$kind)
    };
    ($kind:ident, $($fmt:tt)+) => {
        $crate::Error::new($crate::ErrorKind::$kind).context(format!($($fmt)+))
    };
}

/// Return early with an error of the given kind
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return Err($crate::err!($($arg)+))
    };
}

/// Return early with an error of the given kind unless `cond` holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($($arg)+);
        }
    };
}
