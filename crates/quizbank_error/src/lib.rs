//! Error types for the quizbank workspace.
//!
//! This crate provides the foundation error types shared by the record store,
//! the moderation engine and the Discord transport.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use quizbank_error::{QuizbankResult, StorageError, StorageErrorKind};
//!
//! fn load() -> QuizbankResult<()> {
//!     Err(StorageError::new(StorageErrorKind::Corrupt("line 3: missing id".into())))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod server;
mod storage;
mod transport;

pub use config::ConfigError;
pub use error::{QuizbankError, QuizbankErrorKind, QuizbankResult};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
pub use transport::{TransportError, TransportErrorKind, TransportResult};
