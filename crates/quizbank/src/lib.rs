//! quizbank - a quiz question bank moderated by reaction votes.
//!
//! Members of a Discord channel propose questions with `!ajouter` and
//! removals with `!supprimer`. A command runs once enough other members have
//! reacted to it with ✅, and its message is then deleted.
//!
//! # Architecture
//!
//! quizbank is organized as a workspace with focused crates:
//!
//! - `quizbank_error` - Error types
//! - `quizbank_core` - Questions, channel configuration, message snapshots
//! - `quizbank_interface` - `QuestionStore` and `MessagingTransport` traits
//! - `quizbank_storage` - Flat-file and in-memory stores
//! - `quizbank_database` - SQLite store
//! - `quizbank_moderation` - Command parsing, vote counting, event routing
//! - `quizbank_discord` - Discord transport and gateway handler
//! - `quizbank_bot` - Configuration, listing API and server wiring
//!
//! This crate (`quizbank`) re-exports everything for convenience and ships
//! the `quizbank` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use quizbank_error::{
    ConfigError, QuizbankError, QuizbankErrorKind, QuizbankResult, ServerError, ServerErrorKind,
    StorageError, StorageErrorKind, StorageResult, TransportError, TransportErrorKind,
    TransportResult,
};

pub use quizbank_core::{
    ACKNOWLEDGEMENT_EMOJI, ChannelConfig, ChannelId, ChatMessage, GuildId, MessageId, MessageRef,
    NewQuestion, Question, QuestionId, UserId,
};

pub use quizbank_interface::{MessagingTransport, QuestionStore};

pub use quizbank_storage::{FlatFileStore, MemoryQuestionStore};

pub use quizbank_database::SqliteQuestionStore;

pub use quizbank_moderation::{
    Command, CommandRejection, Committed, GateDecision, IgnoreReason, ModerationEngine,
    ModerationEvent, ModerationOutcome, ParsedCommand, ReconcileSummary, parse_command,
};

pub use quizbank_discord::{QuizbankBot, QuizbankHandler, SerenityTransport};

pub use quizbank_bot::{
    ApiState, BotConfig, BotServer, HttpConfig, StorageBackend, StorageConfig, create_router,
    open_store,
};
