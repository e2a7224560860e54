//! Bot server for the quizbank moderation bot.
//!
//! This crate ties the workspace together:
//! - [`BotConfig`] - layered configuration (defaults, file, environment)
//! - [`open_store`] - picks the question store backend
//! - [`create_router`] - the read-only listing API
//! - [`BotServer`] - runs the engine, the Discord gateway and the API

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod server;
mod store;

pub use api::{ApiState, create_router, spawn_api};
pub use config::{
    BotConfig, DiscordConfig, HttpConfig, MAX_BACKLOG_LIMIT, StorageBackend, StorageConfig,
};
pub use server::BotServer;
pub use store::open_store;
