//! Process wiring: store, moderation engine, Discord gateway and listing API.

use crate::{ApiState, BotConfig, open_store, spawn_api};
use quizbank_discord::QuizbankBot;
use quizbank_error::{QuizbankResult, ServerError, ServerErrorKind};
use quizbank_moderation::{EVENT_QUEUE_CAPACITY, ModerationEngine, ModerationEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// Bot server running every component until Ctrl+C or a fatal error.
pub struct BotServer {
    config: BotConfig,
}

impl BotServer {
    /// Creates a new bot server.
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    /// Starts the bot server.
    ///
    /// The question store is opened (and recovered) before anything connects,
    /// so a corrupt store stops startup.
    #[instrument(skip(self))]
    pub async fn start(self) -> QuizbankResult<()> {
        self.config.validate_for_serve()?;
        info!(channels = self.config.channels.len(), "Starting bot server");

        let store = open_store(&self.config.storage).await?;

        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let mut bot =
            QuizbankBot::new(&self.config.discord.token, tx.clone(), self.config.channels.clone())
                .await?;
        let transport = Arc::new(bot.transport().await?);

        let engine = ModerationEngine::new(store.clone(), transport, self.config.channels.clone())
            .with_backlog_limit(self.config.discord.backlog_limit);
        let engine_handle = tokio::spawn(engine.run(rx));

        let api_handle = if self.config.http.enabled {
            let addr = self.config.http.socket_addr()?;
            let (_, handle) = spawn_api(addr, ApiState::new(store.clone())).await?;
            Some(handle)
        } else {
            None
        };

        let shard_manager = bot.shard_manager();
        let result: QuizbankResult<()> = tokio::select! {
            result = bot.start() => result.map_err(Into::into),
            signal = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                shard_manager.shutdown_all().await;
                signal.map_err(|e| ServerError::new(ServerErrorKind::Task(e.to_string())).into())
            }
        };

        if tx.send(ModerationEvent::Shutdown).await.is_err() {
            warn!("Moderation engine already stopped");
        }
        if let Err(e) = engine_handle.await {
            error!(error = %e, "Moderation engine task failed");
        }
        if let Some(handle) = api_handle {
            handle.abort();
        }

        info!("Bot server stopped");
        result
    }
}
