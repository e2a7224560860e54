//! quizbank CLI binary.
//!
//! - `quizbank serve` runs the moderation bot and the listing API
//! - `quizbank list` prints the stored questions as JSON

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, list_questions, serve};

    // Values from .env are visible to clap's env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.load_config()?;

    match cli.command {
        Commands::Serve(_) => {
            serve(config).await?;
        }

        Commands::List { pretty } => {
            list_questions(&config, pretty).await?;
        }
    }

    Ok(())
}
