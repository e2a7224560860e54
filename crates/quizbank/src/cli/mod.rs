//! Command-line interface module.

mod commands;
mod list;
mod serve;

pub use commands::{Cli, Commands};
pub use list::list_questions;
pub use serve::serve;
