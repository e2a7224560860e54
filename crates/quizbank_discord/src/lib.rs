//! Discord adapter for quizbank.
//!
//! - [`SerenityTransport`] implements
//!   [`MessagingTransport`](quizbank_interface::MessagingTransport) over the
//!   Discord HTTP API
//! - [`QuizbankHandler`] turns gateway events into
//!   [`ModerationEvent`](quizbank_moderation::ModerationEvent)s
//! - [`QuizbankBot`] owns the serenity client

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod conversions;
mod handler;
mod transport;

pub use client::QuizbankBot;
pub use conversions::{chat_message, emoji_text};
pub use handler::QuizbankHandler;
pub use transport::SerenityTransport;
