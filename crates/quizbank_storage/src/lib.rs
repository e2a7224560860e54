//! Question stores for quizbank.
//!
//! This crate provides backends for the [`QuestionStore`] trait that need no
//! database engine:
//!
//! - [`FlatFileStore`] - an append-only text log made crash-safe by
//!   rewrite-via-staging on deletion
//! - [`MemoryQuestionStore`] - a volatile store for tests and dry runs
//!
//! The transactional SQLite backend lives in `quizbank_database`.
//!
//! # Example
//!
//! ```rust
//! use quizbank_core::NewQuestion;
//! use quizbank_interface::QuestionStore;
//! use quizbank_storage::FlatFileStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FlatFileStore::open("/tmp/quizbank/questions.txt").await?;
//! let id = store
//!     .insert(NewQuestion::new(
//!         "Quelle est la capitale de la France ?",
//!         "Paris",
//!         vec!["Lyon".to_string()],
//!     ))
//!     .await?;
//! assert!(store.exists(id).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod flat_file;
mod log_format;
mod memory;

pub use flat_file::FlatFileStore;
pub use memory::MemoryQuestionStore;
pub use quizbank_error::{StorageError, StorageErrorKind, StorageResult};
pub use quizbank_interface::QuestionStore;
