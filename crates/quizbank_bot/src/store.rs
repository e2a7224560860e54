//! Question store selection.

use crate::{StorageBackend, StorageConfig};
use quizbank_database::SqliteQuestionStore;
use quizbank_interface::QuestionStore;
use quizbank_storage::{FlatFileStore, MemoryQuestionStore, StorageResult};
use std::sync::Arc;
use tracing::{info, instrument};

/// Open the configured question store.
///
/// Opening a flat-file store recovers any interrupted deletion first.
///
/// # Errors
///
/// Returns error if the store cannot be opened or its contents are corrupt.
#[instrument(skip(config), fields(backend = ?config.backend, path = %config.path.display()))]
pub async fn open_store(config: &StorageConfig) -> StorageResult<Arc<dyn QuestionStore>> {
    let store: Arc<dyn QuestionStore> = match config.backend {
        StorageBackend::FlatFile => Arc::new(FlatFileStore::open(&config.path).await?),
        StorageBackend::Sqlite => Arc::new(SqliteQuestionStore::open(&config.path).await?),
        StorageBackend::Memory => Arc::new(MemoryQuestionStore::new()),
    };

    info!(backend = store.backend(), "Question store ready");
    Ok(store)
}
