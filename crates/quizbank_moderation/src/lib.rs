//! Reaction-vote moderation for quizbank.
//!
//! Commands posted in a monitored channel only take effect once enough
//! members have reacted with ✅. This crate holds the pieces that decide
//! when that happens:
//!
//! - [`parse_command`] - turns message text into an add or delete command
//! - [`gate::evaluate`] - recounts the votes on a command message
//! - [`ModerationEngine`] - routes platform events, executes approved
//!   commands and replays channel history
//!
//! Executing a command deletes its message. That deletion is the only record
//! that the command ran, which is what makes replays harmless.
//!
//! # Example
//!
//! ```rust,no_run
//! use quizbank_moderation::{ModerationEngine, ModerationEvent, EVENT_QUEUE_CAPACITY};
//! # use std::sync::Arc;
//! # use quizbank_interface::{MessagingTransport, QuestionStore};
//! # async fn example(
//! #     store: Arc<dyn QuestionStore>,
//! #     transport: Arc<dyn MessagingTransport>,
//! #     channels: Vec<quizbank_core::ChannelConfig>,
//! # ) {
//! let (tx, rx) = tokio::sync::mpsc::channel(EVENT_QUEUE_CAPACITY);
//! let engine = ModerationEngine::new(store, transport, channels);
//! let task = tokio::spawn(engine.run(rx));
//!
//! tx.send(ModerationEvent::Reconcile).await.ok();
//! tx.send(ModerationEvent::Shutdown).await.ok();
//! task.await.ok();
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod engine;
mod event;
pub mod gate;
mod outcome;
pub mod replies;

pub use command::{
    ADD_COMMAND, COMMAND_PREFIX, Command, CommandRejection, DELETE_COMMAND, MIN_PROMPT_CHARS,
    ParsedCommand, parse_command,
};
pub use engine::{DEFAULT_BACKLOG_LIMIT, EVENT_QUEUE_CAPACITY, ModerationEngine};
pub use event::ModerationEvent;
pub use gate::GateDecision;
pub use outcome::{Committed, IgnoreReason, ModerationOutcome, ReconcileSummary};
