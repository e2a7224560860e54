//! Messaging transport over Discord's HTTP API.

use crate::conversions::{chat_message, discord_channel, discord_message};
use async_trait::async_trait;
use quizbank_core::{ChannelId, ChatMessage, MessageId, UserId};
use quizbank_error::{TransportError, TransportResult};
use quizbank_interface::MessagingTransport;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::channel::ReactionType;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Users returned per reaction page by the Discord API.
const REACTION_PAGE_SIZE: u8 = 100;

fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(http) if http.status_code().map(|s| s.as_u16()) == Some(404)
    )
}

/// [`MessagingTransport`] backed by serenity's HTTP client.
pub struct SerenityTransport {
    http: Arc<Http>,
    engine_user: UserId,
}

impl SerenityTransport {
    /// Resolve the bot's own identity and build the transport.
    ///
    /// # Errors
    ///
    /// Returns error if the token is rejected or Discord is unreachable.
    #[instrument(skip(http))]
    pub async fn connect(http: Arc<Http>) -> TransportResult<Self> {
        let current = http.get_current_user().await?;
        info!(user_id = %current.id, user_name = %current.name, "Resolved bot identity");
        Ok(Self {
            http,
            engine_user: UserId(current.id.get()),
        })
    }
}

#[async_trait]
impl MessagingTransport for SerenityTransport {
    fn engine_user(&self) -> UserId {
        self.engine_user
    }

    #[instrument(skip(self), fields(channel_id = %channel_id, message_id = %message_id))]
    async fn fetch_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> TransportResult<Option<ChatMessage>> {
        let result = self
            .http
            .get_message(discord_channel(channel_id)?, discord_message(message_id)?)
            .await;

        match result {
            Ok(message) => Ok(Some(chat_message(&message))),
            Err(e) if is_not_found(&e) => {
                debug!("Message no longer exists");
                Ok(None)
            }
            Err(e) => Err(TransportError::from(e)),
        }
    }

    #[instrument(skip(self), fields(channel_id = %channel_id))]
    async fn recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> TransportResult<Vec<ChatMessage>> {
        let messages = self
            .http
            .get_messages(discord_channel(channel_id)?, None, Some(limit))
            .await?;
        debug!(count = messages.len(), "Fetched channel history");
        Ok(messages.iter().map(chat_message).collect())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn reaction_users(
        &self,
        message: &ChatMessage,
        emoji: &str,
    ) -> TransportResult<Vec<UserId>> {
        let channel_id = discord_channel(message.channel_id)?;
        let message_id = discord_message(message.id)?;
        let reaction = ReactionType::Unicode(emoji.to_string());

        let mut users = Vec::new();
        let mut after = None;
        loop {
            let page = self
                .http
                .get_reaction_users(channel_id, message_id, &reaction, REACTION_PAGE_SIZE, after)
                .await?;
            let full_page = page.len() == usize::from(REACTION_PAGE_SIZE);
            after = page.last().map(|user| user.id.get());
            users.extend(page.iter().map(|user| UserId(user.id.get())));
            if !full_page {
                break;
            }
        }

        debug!(count = users.len(), "Read reaction users");
        Ok(users)
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn add_reaction(&self, message: &ChatMessage, emoji: &str) -> TransportResult<()> {
        self.http
            .create_reaction(
                discord_channel(message.channel_id)?,
                discord_message(message.id)?,
                &ReactionType::Unicode(emoji.to_string()),
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self, message, text), fields(message_id = %message.id))]
    async fn reply(&self, message: &ChatMessage, text: &str) -> TransportResult<()> {
        let channel_id = discord_channel(message.channel_id)?;
        let builder = CreateMessage::new()
            .content(text)
            .reference_message((channel_id, discord_message(message.id)?));
        channel_id.send_message(&self.http, builder).await?;
        Ok(())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn delete_message(&self, message: &ChatMessage) -> TransportResult<()> {
        self.http
            .delete_message(
                discord_channel(message.channel_id)?,
                discord_message(message.id)?,
                None,
            )
            .await?;
        Ok(())
    }
}
