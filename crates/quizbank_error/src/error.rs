//! Top-level error wrapper types.

use crate::{ConfigError, ServerError, StorageError, TransportError};

/// Every error the quizbank crates can surface to the process entry point.
///
/// # Examples
///
/// ```
/// use quizbank_error::{QuizbankError, ConfigError};
///
/// let err: QuizbankError = ConfigError::new("no channels configured").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum QuizbankErrorKind {
    /// Record store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Messaging transport error
    #[from(TransportError)]
    Transport(TransportError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Listing server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Quizbank error with kind discrimination.
///
/// # Examples
///
/// ```
/// use quizbank_error::{QuizbankError, QuizbankErrorKind, QuizbankResult, ConfigError};
///
/// fn might_fail() -> QuizbankResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), QuizbankErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Quizbank Error: {}", _0)]
pub struct QuizbankError(Box<QuizbankErrorKind>);

impl QuizbankError {
    /// Create a new error from a kind.
    pub fn new(kind: QuizbankErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuizbankErrorKind {
        &self.0
    }
}

impl<T> From<T> for QuizbankError
where
    T: Into<QuizbankErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for quizbank operations.
pub type QuizbankResult<T> = std::result::Result<T, QuizbankError>;
