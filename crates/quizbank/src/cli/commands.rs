//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use quizbank_bot::BotConfig;
use quizbank_error::QuizbankResult;
use std::path::PathBuf;

/// quizbank - quiz question bank moderated by Discord reaction votes
#[derive(Parser, Debug)]
#[command(name = "quizbank")]
#[command(about = "Quiz question bank moderated by Discord reaction votes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./quizbank.toml when present)
    #[arg(long, global = true, env = "QUIZBANK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Monitored channels as guild:channel:threshold;...
    #[arg(long, global = true, env = "DISCORD_CONFIG")]
    pub channels: Option<String>,

    /// Question store file
    #[arg(long, global = true, env = "DB_PATH")]
    pub store_path: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the moderation bot and the listing API
    Serve(ServeArgs),

    /// Print every stored question as JSON
    List {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

/// Options of the `serve` command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: Option<String>,

    /// Listing API port
    #[arg(long, env = "HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Do not serve the listing API
    #[arg(long)]
    pub no_http: bool,
}

impl Cli {
    /// Load the configuration and apply command-line overrides.
    pub fn load_config(&self) -> QuizbankResult<BotConfig> {
        let mut config = BotConfig::load(self.config.as_deref())?;

        if let Some(channels) = &self.channels {
            config.set_channels_from_list(channels)?;
        }
        if let Some(path) = &self.store_path {
            config.storage.path = path.clone();
        }
        if let Commands::Serve(args) = &self.command {
            if let Some(token) = &args.discord_token {
                config.discord.token = token.clone();
            }
            if let Some(port) = args.http_port {
                config.http.port = port;
            }
            if args.no_http {
                config.http.enabled = false;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "quizbank",
            "serve",
            "--discord-token",
            "secret",
            "--http-port",
            "8080",
            "--channels",
            "1:10:2",
        ])
        .unwrap();

        let Commands::Serve(args) = &cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.discord_token.as_deref(), Some("secret"));
        assert_eq!(args.http_port, Some(8080));
        assert_eq!(cli.channels.as_deref(), Some("1:10:2"));
    }
}
