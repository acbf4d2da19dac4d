use std::fmt;

use thiserror::Error;

use crate::encoding::Encoding;
use crate::holder::HolderKind;
use crate::input::InputSource;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while coercing or transforming input.
///
/// Malformed numeric input never produces an error: it degrades to `0` or
/// `0.0`. Errors are reserved for broken invariants (a null value where
/// nullability is disabled), strict-mode lookups, and encoding problems.
///
/// # Examples
///
/// ```
/// use fluent_sanitizer::{Error, ErrorKind, HolderKind, IntegerHolder};
///
/// let err = IntegerHolder::new(None, false).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Validation);
/// assert_eq!(err, Error::Validation { kind: HolderKind::Integer });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A holder was constructed with a null value while nullability is disabled.
    #[error("{kind} value cannot be null when nullable is disabled")]
    Validation {
        /// The holder that rejected the value
        kind: HolderKind,
    },

    /// Strict mode is enabled and the key is missing from the input source.
    #[error("cannot find '{key}' key in {input}")]
    Lookup {
        /// The source that was consulted
        input: InputSource,
        /// The requested key
        key: String,
    },

    /// The encoding label is not recognised.
    #[error("unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    /// A character cannot be represented in the target encoding.
    #[error("character {ch:?} cannot be represented in {encoding}")]
    Unrepresentable {
        /// The offending character
        ch: char,
        /// The target encoding
        encoding: Encoding,
    },
}

impl Error {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Lookup { .. } => ErrorKind::Lookup,
            Self::UnsupportedEncoding(_) | Self::Unrepresentable { .. } => ErrorKind::Encoding,
        }
    }
}

/// Category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Null value in a non-nullable holder.
    Validation,
    /// Missing key in strict mode.
    Lookup,
    /// Unknown encoding or unrepresentable character.
    Encoding,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation error"),
            Self::Lookup => write!(f, "lookup error"),
            Self::Encoding => write!(f, "encoding error"),
        }
    }
}
