//! Messaging transport error types.
//!
//! Every call the moderation engine makes against the chat platform (fetching
//! messages, reading reactions, reacting, replying, deleting) can fail with
//! one of these errors. The engine logs them and carries on.

/// Messaging transport error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Platform API error (HTTP error, gateway error, rate limit).
    #[display("Platform API error: {_0}")]
    Api(String),

    /// Message no longer exists.
    #[display("Message not found: {_0}")]
    MessageNotFound(u64),

    /// Bot lacks required permissions for an operation.
    #[display("Insufficient permissions: {_0}")]
    InsufficientPermissions(String),

    /// Connection to the gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Bot token is invalid or expired.
    #[display("Invalid or expired bot token")]
    InvalidToken,
}

/// Messaging transport error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use quizbank_error::{TransportError, TransportErrorKind};
    ///
    /// let err = TransportError::new(TransportErrorKind::InvalidToken);
    /// assert!(err.to_string().contains("token"));
    /// ```
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for messaging transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

// Serenity error conversions (only available with discord feature)
#[cfg(feature = "discord")]
impl From<serenity::Error> for TransportError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        let status = match &err {
            serenity::Error::Http(http) => http.status_code().map(|s| s.as_u16()),
            _ => None,
        };
        let kind = match status {
            Some(401) => TransportErrorKind::InvalidToken,
            Some(403) => TransportErrorKind::InsufficientPermissions(err.to_string()),
            _ => match err {
                serenity::Error::Gateway(e) => TransportErrorKind::ConnectionFailed(e.to_string()),
                other => TransportErrorKind::Api(other.to_string()),
            },
        };
        TransportError::new(kind)
    }
}

