//! Chat message snapshots as seen by the moderation engine.

use crate::{ChannelId, GuildId, MessageId, UserId};
use serde::{Deserialize, Serialize};

/// The reaction used both as the vote symbol and as the engine's marker.
pub const ACKNOWLEDGEMENT_EMOJI: &str = "\u{2705}";

/// A message fetched from the chat platform.
///
/// Reaction state is deliberately absent: it is read fresh from the
/// transport every time a command is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier
    pub id: MessageId,
    /// Channel the message was posted in
    pub channel_id: ChannelId,
    /// Guild the channel belongs to (`None` for direct messages)
    pub guild_id: Option<GuildId>,
    /// Author of the message
    pub author_id: UserId,
    /// Raw message text
    pub content: String,
}

impl ChatMessage {
    /// Identity of this message, without its content.
    pub fn reference(&self) -> MessageRef {
        MessageRef {
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            message_id: self.id,
        }
    }
}

/// Identity of a message that an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    /// Guild the channel belongs to
    pub guild_id: Option<GuildId>,
    /// Channel holding the message
    pub channel_id: ChannelId,
    /// Message identifier
    pub message_id: MessageId,
}
