//! Bot configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`quizbank.toml` shipped with this crate)
//! 2. A user file: the path given on the command line, or `./quizbank.toml`
//!    if present
//! 3. Environment variables prefixed `QUIZBANK__`, with `__` between keys
//!    (e.g. `QUIZBANK__STORAGE__BACKEND=sqlite`)

use config::{Config, Environment, File, FileFormat};
use quizbank_core::ChannelConfig;
use quizbank_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../quizbank.toml");

/// Largest backlog Discord returns in one request.
pub const MAX_BACKLOG_LIMIT: u8 = 100;

/// Configuration for the bot server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Discord connection settings
    pub discord: DiscordConfig,
    /// Question store settings
    pub storage: StorageConfig,
    /// Listing API settings
    pub http: HttpConfig,
    /// Monitored channels
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

/// Discord connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token
    #[serde(default)]
    pub token: String,
    /// Messages per channel replayed on (re)connect
    pub backlog_limit: u8,
}

/// Which question store to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Append-only text log
    FlatFile,
    /// SQLite database file
    Sqlite,
    /// Nothing persisted
    Memory,
}

/// Question store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend to use
    pub backend: StorageBackend,
    /// File holding the questions (ignored by the memory backend)
    pub path: PathBuf,
}

/// Listing API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whether to serve the listing API
    pub enabled: bool,
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl HttpConfig {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Invalid listen address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}

impl BotConfig {
    /// Load configuration from the bundled defaults, a user file and the
    /// environment.
    ///
    /// With `path` set, the file must exist. Without it, `./quizbank.toml`
    /// is read when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or a value has the wrong
    /// type.
    #[instrument(skip(path), fields(path = ?path.map(Path::display)))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("quizbank").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("QUIZBANK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        debug!(
            channels = config.channels.len(),
            backend = ?config.storage.backend,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string layered over the bundled defaults.
    ///
    /// The environment is not consulted.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }

    /// Replace the channel list with a compact `guild:channel:threshold;...`
    /// list.
    pub fn set_channels_from_list(&mut self, list: &str) -> Result<(), ConfigError> {
        self.channels = ChannelConfig::parse_list(list)?;
        Ok(())
    }

    /// Check values that every command needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_BACKLOG_LIMIT).contains(&self.discord.backlog_limit) {
            return Err(ConfigError::new(format!(
                "discord.backlog_limit must be between 1 and {}, got {}",
                MAX_BACKLOG_LIMIT, self.discord.backlog_limit
            )));
        }

        for channel in &self.channels {
            if channel.guild_id().get() == 0 || channel.channel_id().get() == 0 {
                return Err(ConfigError::new(format!(
                    "Channel {}:{} has a zero id",
                    channel.guild_id(),
                    channel.channel_id()
                )));
            }
        }

        if self.storage.backend != StorageBackend::Memory
            && self.storage.path.as_os_str().is_empty()
        {
            return Err(ConfigError::new("storage.path must be set"));
        }

        Ok(())
    }

    /// Check everything the bot server needs to run.
    pub fn validate_for_serve(&self) -> Result<(), ConfigError> {
        self.validate()?;

        if self.discord.token.trim().is_empty() {
            return Err(ConfigError::new(
                "Discord token missing: set DISCORD_TOKEN or discord.token",
            ));
        }
        if self.channels.is_empty() {
            return Err(ConfigError::new(
                "No channels configured: set DISCORD_CONFIG or add [[channels]] entries",
            ));
        }
        if self.http.enabled {
            self.http.socket_addr()?;
        }

        Ok(())
    }
}
