//! Messaging transport trait definition.

use async_trait::async_trait;
use quizbank_core::{ChannelId, ChatMessage, MessageId, UserId};
use quizbank_error::TransportResult;

/// Operations the moderation engine performs against the chat platform.
///
/// All methods are fallible; callers are expected to log failures and carry
/// on, since any missed action is recovered by the next re-evaluation.
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    /// Identity the engine posts and reacts as.
    fn engine_user(&self) -> UserId;

    /// Fetch a single message.
    ///
    /// # Returns
    ///
    /// `None` if the message no longer exists
    async fn fetch_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> TransportResult<Option<ChatMessage>>;

    /// Fetch the most recent messages of a channel, at most `limit` of them.
    ///
    /// Order is unspecified; callers sort by message id when order matters.
    async fn recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> TransportResult<Vec<ChatMessage>>;

    /// Users currently reacting to a message with `emoji`.
    async fn reaction_users(
        &self,
        message: &ChatMessage,
        emoji: &str,
    ) -> TransportResult<Vec<UserId>>;

    /// React to a message with `emoji` as the engine user.
    async fn add_reaction(&self, message: &ChatMessage, emoji: &str) -> TransportResult<()>;

    /// Reply to a message with plain text.
    async fn reply(&self, message: &ChatMessage, text: &str) -> TransportResult<()>;

    /// Delete a message.
    async fn delete_message(&self, message: &ChatMessage) -> TransportResult<()>;
}
