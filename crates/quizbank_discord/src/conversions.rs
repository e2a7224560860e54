//! Conversions between serenity models and quizbank types.

use quizbank_core::{ChannelId, ChatMessage, GuildId, MessageId, UserId};
use quizbank_error::{TransportError, TransportErrorKind, TransportResult};
use serenity::model::channel::{Message, ReactionType};
use serenity::model::id as discord;
use std::num::NonZeroU64;

/// Convert a serenity message into the engine's view of it.
pub fn chat_message(message: &Message) -> ChatMessage {
    ChatMessage {
        id: MessageId(message.id.get()),
        channel_id: ChannelId(message.channel_id.get()),
        guild_id: message.guild_id.map(|g| GuildId(g.get())),
        author_id: UserId(message.author.id.get()),
        content: message.content.clone(),
    }
}

/// Text form of a reaction emoji.
///
/// Unicode emoji map to themselves, custom emoji to their `<:name:id>` form.
pub fn emoji_text(emoji: &ReactionType) -> String {
    match emoji {
        ReactionType::Unicode(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Serenity ids cannot be zero.
fn non_zero(id: u64) -> TransportResult<NonZeroU64> {
    NonZeroU64::new(id).ok_or_else(|| {
        TransportError::new(TransportErrorKind::Api("snowflake id cannot be zero".to_string()))
    })
}

/// Convert a channel id for serenity.
pub fn discord_channel(id: ChannelId) -> TransportResult<discord::ChannelId> {
    non_zero(id.get()).map(discord::ChannelId::from)
}

/// Convert a message id for serenity.
pub fn discord_message(id: MessageId) -> TransportResult<discord::MessageId> {
    non_zero(id.get()).map(discord::MessageId::from)
}
