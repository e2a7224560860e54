//! SQLite integration for quizbank.
//!
//! This crate provides [`SqliteQuestionStore`], a transactional backend for the
//! [`QuestionStore`](quizbank_interface::QuestionStore) trait built on Diesel
//! with an r2d2 connection pool. Migrations are embedded and applied when the
//! store is opened.
//!
//! # Example
//!
//! ```rust,no_run
//! use quizbank_core::NewQuestion;
//! use quizbank_database::SqliteQuestionStore;
//! use quizbank_interface::QuestionStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteQuestionStore::open("/var/lib/quizbank/questions.db").await?;
//! let id = store
//!     .insert(NewQuestion::new("Combien font deux et deux ?", "Quatre", vec![]))
//!     .await?;
//! assert!(store.exists(id).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod models;
mod store;

/// Diesel table definitions.
#[allow(missing_docs)]
pub mod schema;

pub use connection::{SqlitePool, build_pool, run_migrations};
pub use store::SqliteQuestionStore;
