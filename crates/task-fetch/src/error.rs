//! Error types for task-fetch.
//!
//! Every failure a task can deliver is one of three kinds, collected in
//! [`FetchError`]. Raw capabilities reject with an arbitrary [`BoxError`];
//! [`crate::classify`] sorts those into the closed set.

use std::fmt;

use thiserror::Error;

/// An arbitrary rejection value produced by a raw fetch capability.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default message carried by an [`AbortError`].
pub const ABORT_MESSAGE: &str = "The operation was aborted.";

/// A precondition or environment failure.
///
/// Raised when no fetch capability is installed, and by capabilities for
/// transport failures (DNS, connect, invalid URL), matching browser fetch.
#[derive(Debug, Error)]
#[error("TypeError: {message}")]
pub struct TypeError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TypeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str { &self.message }
}

/// An operation cancelled through an [`crate::AbortSignal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("AbortError: {message}")]
pub struct AbortError {
    message: String,
}

impl AbortError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str { &self.message }
}

impl Default for AbortError {
    fn default() -> Self { Self::new(ABORT_MESSAGE) }
}

/// Any rejection that is neither a [`TypeError`] nor an [`AbortError`].
///
/// The original value is kept intact and can be inspected through
/// [`UnknownError::cause`] or [`UnknownError::downcast_ref`].
#[derive(Debug, Error)]
#[error("UnknownError: {cause}")]
pub struct UnknownError {
    #[source]
    cause: BoxError,
}

impl UnknownError {
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) { self.cause.as_ref() }

    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        self.cause.downcast_ref::<T>()
    }

    pub fn into_cause(self) -> BoxError { self.cause }
}

/// Discriminant of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Type,
    Abort,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Type => write!(f, "TypeError"),
            ErrorKind::Abort => write!(f, "AbortError"),
            ErrorKind::Unknown => write!(f, "UnknownError"),
        }
    }
}

/// The closed failure union delivered by every task in this crate.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Abort(#[from] AbortError),

    #[error(transparent)]
    Unknown(#[from] UnknownError),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Type(_) => ErrorKind::Type,
            FetchError::Abort(_) => ErrorKind::Abort,
            FetchError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub fn is_type(&self) -> bool { matches!(self, FetchError::Type(_)) }

    pub fn is_abort(&self) -> bool { matches!(self, FetchError::Abort(_)) }

    pub fn is_unknown(&self) -> bool { matches!(self, FetchError::Unknown(_)) }
}
