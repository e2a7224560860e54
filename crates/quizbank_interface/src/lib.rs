//! Trait definitions for the quizbank moderation bot.
//!
//! The moderation engine only talks to the outside world through these two
//! seams, which keeps it independent of the storage backend and of the chat
//! platform:
//! - [`QuestionStore`] - durable question records
//! - [`MessagingTransport`] - the chat platform, used as a read-through oracle

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod store;
mod transport;

pub use store::QuestionStore;
pub use transport::MessagingTransport;
