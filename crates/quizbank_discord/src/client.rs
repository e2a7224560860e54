//! Discord client setup and lifecycle management.

use crate::{QuizbankHandler, SerenityTransport};
use quizbank_core::ChannelConfig;
use quizbank_error::{TransportError, TransportErrorKind, TransportResult};
use quizbank_moderation::ModerationEvent;
use serenity::Client;
use serenity::gateway::ShardManager;
use serenity::http::Http;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Discord gateway client for quizbank.
///
/// # Example
/// ```no_run
/// use quizbank_discord::QuizbankBot;
///
/// # async fn example(channels: Vec<quizbank_core::ChannelConfig>) -> Result<(), Box<dyn std::error::Error>> {
/// let token = std::env::var("DISCORD_TOKEN")?;
/// let (tx, rx) = tokio::sync::mpsc::channel(256);
///
/// let mut bot = QuizbankBot::new(&token, tx, channels).await?;
/// let transport = bot.transport().await?;
/// // hand `transport` and `rx` to the moderation engine, then:
/// bot.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct QuizbankBot {
    client: Client,
}

impl QuizbankBot {
    /// Build the client. Nothing connects until [`QuizbankBot::start`].
    ///
    /// # Errors
    ///
    /// Returns an error if the Serenity client fails to initialize.
    #[instrument(skip(token, sender, channels), fields(token_len = token.len(), channels = channels.len()))]
    pub async fn new(
        token: &str,
        sender: mpsc::Sender<ModerationEvent>,
        channels: Vec<ChannelConfig>,
    ) -> TransportResult<Self> {
        let intents = QuizbankHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(token, intents)
            .event_handler(QuizbankHandler::new(sender, channels))
            .await
            .map_err(|e| {
                TransportError::new(TransportErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// HTTP client shared with the gateway.
    pub fn http(&self) -> Arc<Http> {
        self.client.http.clone()
    }

    /// Transport for the moderation engine, resolving the bot's identity.
    pub async fn transport(&self) -> TransportResult<SerenityTransport> {
        SerenityTransport::connect(self.http()).await
    }

    /// Handle for stopping the gateway from another task.
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        self.client.shard_manager.clone()
    }

    /// Connect to the gateway and run until shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> TransportResult<()> {
        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            TransportError::new(TransportErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }
}
