//! The `list` command.

use quizbank_bot::{BotConfig, open_store};
use quizbank_error::{QuizbankResult, StorageError, StorageErrorKind};

/// Print every stored question as a JSON array.
///
/// Opening the store performs the same recovery as the server would.
pub async fn list_questions(config: &BotConfig, pretty: bool) -> QuizbankResult<()> {
    let store = open_store(&config.storage).await?;
    let questions = store.fetch_all().await?;

    let json = if pretty {
        serde_json::to_string_pretty(&questions)
    } else {
        serde_json::to_string(&questions)
    }
    .map_err(|e| StorageError::new(StorageErrorKind::InvalidRecord(e.to_string())))?;

    println!("{}", json);
    Ok(())
}
