//! Serenity event handler.
//!
//! Gateway callbacks are turned into [`ModerationEvent`]s and queued for the
//! moderation engine. The handler itself makes no decisions.

use crate::conversions::{chat_message, emoji_text};
use quizbank_core::{ChannelConfig, ChannelId, GuildId, MessageId, MessageRef};
use quizbank_moderation::ModerationEvent;
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::{Message, Reaction};
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id as discord;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Event handler feeding the moderation engine.
pub struct QuizbankHandler {
    sender: mpsc::Sender<ModerationEvent>,
    channels: Vec<ChannelConfig>,
}

impl QuizbankHandler {
    /// Create a handler that forwards events to `sender`.
    ///
    /// `channels` is used to recover the guild of events that do not carry
    /// one.
    pub fn new(sender: mpsc::Sender<ModerationEvent>, channels: Vec<ChannelConfig>) -> Self {
        Self { sender, channels }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
            | GatewayIntents::MESSAGE_CONTENT
    }

    fn target(
        &self,
        guild_id: Option<discord::GuildId>,
        channel_id: discord::ChannelId,
        message_id: discord::MessageId,
    ) -> MessageRef {
        let channel_id = ChannelId(channel_id.get());
        let guild_id = guild_id.map(|g| GuildId(g.get())).or_else(|| {
            self.channels
                .iter()
                .find(|c| *c.channel_id() == channel_id)
                .map(|c| *c.guild_id())
        });
        MessageRef {
            guild_id,
            channel_id,
            message_id: MessageId(message_id.get()),
        }
    }

    fn reaction_target(&self, reaction: &Reaction) -> (MessageRef, String) {
        (
            self.target(reaction.guild_id, reaction.channel_id, reaction.message_id),
            emoji_text(&reaction.emoji),
        )
    }

    async fn forward(&self, event: ModerationEvent) {
        let name = event.name();
        if let Err(e) = self.sender.send(event).await {
            error!(event = name, error = %e, "Moderation engine is gone, dropping event");
        } else {
            debug!(event = name, "Queued event");
        }
    }
}

#[async_trait]
impl EventHandler for QuizbankHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "Discord bot ready, reconciling backlog"
        );
        self.forward(ModerationEvent::Reconcile).await;
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        self.forward(ModerationEvent::MessageCreated(chat_message(&msg))).await;
    }

    async fn reaction_add(&self, _ctx: Context, reaction: Reaction) {
        let (target, emoji) = self.reaction_target(&reaction);
        self.forward(ModerationEvent::ReactionAdded { target, emoji }).await;
    }

    async fn reaction_remove(&self, _ctx: Context, reaction: Reaction) {
        let (target, emoji) = self.reaction_target(&reaction);
        self.forward(ModerationEvent::ReactionRemoved { target, emoji }).await;
    }

    async fn reaction_remove_emoji(&self, _ctx: Context, removed_reactions: Reaction) {
        let (target, emoji) = self.reaction_target(&removed_reactions);
        self.forward(ModerationEvent::EmojiCleared { target, emoji }).await;
    }

    async fn reaction_remove_all(
        &self,
        _ctx: Context,
        channel_id: discord::ChannelId,
        removed_from_message_id: discord::MessageId,
    ) {
        let target = self.target(None, channel_id, removed_from_message_id);
        self.forward(ModerationEvent::ReactionsCleared(target)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents_include_reactions_and_content() {
        let intents = QuizbankHandler::intents();
        assert!(intents.contains(GatewayIntents::GUILD_MESSAGE_REACTIONS));
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
    }

    #[test]
    fn test_missing_guild_is_recovered_from_channels() {
        let (tx, _rx) = mpsc::channel(1);
        let handler = QuizbankHandler::new(
            tx,
            vec![ChannelConfig::new(GuildId(5), ChannelId(10), 2)],
        );

        let target = handler.target(
            None,
            discord::ChannelId::new(10),
            discord::MessageId::new(99),
        );
        assert_eq!(target.guild_id, Some(GuildId(5)));
        assert_eq!(target.message_id, MessageId(99));

        let unknown = handler.target(
            None,
            discord::ChannelId::new(11),
            discord::MessageId::new(99),
        );
        assert_eq!(unknown.guild_id, None);
    }

    #[tokio::test]
    async fn test_forward_queues_events() {
        let (tx, mut rx) = mpsc::channel(1);
        let handler = QuizbankHandler::new(tx, vec![]);

        handler.forward(ModerationEvent::Reconcile).await;

        assert!(matches!(rx.recv().await, Some(ModerationEvent::Reconcile)));
    }
}
