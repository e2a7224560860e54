//! Test utilities for moderation engine tests.
//!
//! This module provides a scripted transport, a switchable store and message
//! helpers.

pub mod flaky_store;
pub mod mock_transport;

#[allow(unused_imports)]
pub use flaky_store::FlakyStore;
#[allow(unused_imports)]
pub use mock_transport::ScriptedTransport;

use quizbank_core::{ChannelConfig, ChannelId, ChatMessage, GuildId, MessageId, UserId};

/// Guild used by every test channel.
pub const GUILD: GuildId = GuildId(1);

/// Monitored channel.
pub const CHANNEL: ChannelId = ChannelId(10);

/// Channel that is not monitored.
#[allow(dead_code)]
pub const OTHER_CHANNEL: ChannelId = ChannelId(20);

/// Author of the command messages.
pub const AUTHOR: UserId = UserId(100);

/// Identity of the engine.
pub const ENGINE: UserId = UserId(999);

/// Channel configuration for [`CHANNEL`] with the given threshold.
pub fn channel(threshold: u32) -> ChannelConfig {
    ChannelConfig::new(GUILD, CHANNEL, threshold)
}

/// A message posted by [`AUTHOR`] in [`CHANNEL`].
pub fn message(id: u64, content: &str) -> ChatMessage {
    ChatMessage {
        id: MessageId(id),
        channel_id: CHANNEL,
        guild_id: Some(GUILD),
        author_id: AUTHOR,
        content: content.to_string(),
    }
}
