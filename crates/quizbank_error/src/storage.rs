//! Record store error types.

/// Kinds of record store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the directory holding the store
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write the store file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read the store file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// The persisted data cannot be parsed; loading must abort
    #[display("Corrupt store: {}", _0)]
    Corrupt(String),
    /// The record cannot be represented by this backend
    #[display("Invalid record: {}", _0)]
    InvalidRecord(String),
    /// Database query or connection failure
    #[display("Database error: {}", _0)]
    Database(String),
    /// Schema migration failed
    #[display("Migration error: {}", _0)]
    Migration(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Record store error with location tracking.
///
/// # Examples
///
/// ```
/// use quizbank_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FileRead("questions.txt".to_string()));
/// assert!(format!("{}", err).contains("questions.txt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error means the persisted data itself is unreadable.
    pub fn is_corruption(&self) -> bool {
        matches!(self.kind, StorageErrorKind::Corrupt(_))
    }
}

/// Result type for record store operations.
pub type StorageResult<T> = Result<T, StorageError>;

// Diesel error conversions (only available with database feature)
#[cfg(feature = "database")]
impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        StorageError::new(StorageErrorKind::Database(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<diesel::r2d2::PoolError> for StorageError {
    #[track_caller]
    fn from(err: diesel::r2d2::PoolError) -> Self {
        StorageError::new(StorageErrorKind::Unavailable(err.to_string()))
    }
}
