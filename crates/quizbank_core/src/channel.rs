//! Monitored channel configuration.

use crate::{ChannelId, GuildId};
use derive_getters::Getters;
use quizbank_error::ConfigError;
use serde::{Deserialize, Serialize};

/// A channel whose messages are moderated, and the votes a command needs there.
///
/// Loaded once at startup and read-only afterwards.
///
/// # Examples
///
/// ```
/// use quizbank_core::{ChannelConfig, ChannelId, GuildId};
///
/// let config = ChannelConfig::parse("123:456:2").unwrap();
/// assert_eq!(*config.guild_id(), GuildId(123));
/// assert_eq!(*config.channel_id(), ChannelId(456));
/// assert_eq!(*config.vote_threshold(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ChannelConfig {
    /// Guild the channel belongs to
    guild_id: GuildId,
    /// Monitored channel
    channel_id: ChannelId,
    /// Qualifying reactions required before a command executes
    vote_threshold: u32,
}

impl ChannelConfig {
    /// Create a channel configuration.
    pub fn new(guild_id: GuildId, channel_id: ChannelId, vote_threshold: u32) -> Self {
        Self {
            guild_id,
            channel_id,
            vote_threshold,
        }
    }

    /// Whether an event from this guild and channel belongs to this entry.
    pub fn matches(&self, guild_id: Option<GuildId>, channel_id: ChannelId) -> bool {
        guild_id == Some(self.guild_id) && channel_id == self.channel_id
    }

    /// Parse a single `guild:channel:threshold` entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not have exactly three fields or a
    /// field is not a non-negative integer.
    pub fn parse(entry: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = entry.trim().split(':').map(str::trim).collect();
        let [guild, channel, threshold] = parts.as_slice() else {
            return Err(ConfigError::new(format!(
                "Channel entry '{}' must look like guild:channel:threshold",
                entry
            )));
        };

        let field = |name: &str, value: &str| {
            value.parse::<u64>().map_err(|e| {
                ConfigError::new(format!(
                    "Invalid {} '{}' in channel entry '{}': {}",
                    name, value, entry, e
                ))
            })
        };

        let guild_id = GuildId(field("guild id", *guild)?);
        let channel_id = ChannelId(field("channel id", *channel)?);
        let vote_threshold = threshold.parse::<u32>().map_err(|e| {
            ConfigError::new(format!(
                "Invalid vote threshold '{}' in channel entry '{}': {}",
                threshold, entry, e
            ))
        })?;

        Ok(Self::new(guild_id, channel_id, vote_threshold))
    }

    /// Parse a `;`-separated list of `guild:channel:threshold` entries.
    ///
    /// Empty entries (for example a trailing `;`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns the error of the first malformed entry.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, ConfigError> {
        list.split(';')
            .filter(|entry| !entry.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}
