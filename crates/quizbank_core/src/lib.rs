//! Core data types for the quizbank moderation bot.
//!
//! This crate provides the types shared by the record store, the moderation
//! engine and the platform adapters: questions, channel configuration, chat
//! messages and the snowflake identifiers that tie them together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod ids;
mod message;
mod question;

pub use channel::ChannelConfig;
pub use ids::{ChannelId, GuildId, MessageId, QuestionId, UserId};
pub use message::{ACKNOWLEDGEMENT_EMOJI, ChatMessage, MessageRef};
pub use question::{NewQuestion, Question};
