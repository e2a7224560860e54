//! The `serve` command.

use quizbank_bot::{BotConfig, BotServer};
use quizbank_error::QuizbankResult;
use tracing::info;

/// Run the bot until interrupted.
///
/// `serve` flags are folded into `config` by [`Cli::load_config`](super::Cli::load_config).
pub async fn serve(config: BotConfig) -> QuizbankResult<()> {
    info!(
        backend = ?config.storage.backend,
        channels = config.channels.len(),
        http = config.http.enabled,
        "Starting quizbank"
    );
    BotServer::new(config).start().await
}
