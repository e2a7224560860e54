//! Flat-file question store.
//!
//! Questions live in a single append-only text log (see `log_format`).
//! Inserting appends one record and syncs the file. Deleting rewrites the log:
//!
//! 1. rename the log to `<log>.tmp` (the staging file)
//! 2. write every remaining record to a fresh log and sync it
//! 3. remove the staging file
//!
//! If the process dies between steps 1 and 3 the staging file still holds the
//! complete pre-delete contents, so [`FlatFileStore::open`] rebuilds the log
//! from it. A deletion interrupted that way is lost; the vote that triggered
//! it is re-evaluated on the next reconciliation.
//!
//! A crash in the middle of an append leaves an unfinished record at the end
//! of the log. That record was never acknowledged, so opening the store cuts
//! it off and keeps every complete record.
//!
//! While the process keeps running, the same rules apply to I/O errors:
//!
//! - a failed append is truncated away before the next one
//! - a staging file that could not be removed is put back as the log, and
//!   mutations fail until that succeeds, so memory and disk never disagree
//!   about what a restart would load

use crate::log_format::{self, LogContents};
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use quizbank_core::{NewQuestion, Question, QuestionId};
use quizbank_error::{StorageError, StorageErrorKind, StorageResult};
use quizbank_interface::QuestionStore;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Everything the store knows about its files.
#[derive(Debug)]
struct LogState {
    contents: LogContents,
    /// Bytes of the log that hold complete records
    log_len: u64,
    /// A staging file survived a deletion and must be restored first
    staging_pending: bool,
}

/// Crash-safe question store backed by a text log.
///
/// # Example Layout
///
/// ```text
/// /var/lib/quizbank/
/// ├── questions.txt      (the log)
/// └── questions.txt.tmp  (only present during a deletion)
/// ```
pub struct FlatFileStore {
    path: PathBuf,
    staging_path: PathBuf,
    state: RwLock<LogState>,
}

impl FlatFileStore {
    /// Open the store, recovering from an interrupted write if needed.
    ///
    /// Creates the parent directory if it doesn't exist. A missing log is an
    /// empty store. An unfinished record at the end of the log is dropped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns a `Corrupt` error if the log (or the staging file being
    /// recovered) cannot be parsed. Starting with a partial question set is
    /// never an option.
    #[tracing::instrument(skip(path), fields(path))]
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        tracing::Span::current().record("path", path.display().to_string());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let staging_path = staging_path_for(&path);
        let state = if try_exists(&staging_path).await? {
            recover(&path, &staging_path).await?
        } else if try_exists(&path).await? {
            load(&path).await?
        } else {
            LogState {
                contents: LogContents::default(),
                log_len: 0,
                staging_pending: false,
            }
        };

        tracing::info!(
            questions = state.contents.questions.len(),
            high_water = state.contents.high_water,
            "Opened flat-file question store"
        );

        Ok(Self {
            path,
            staging_path,
            state: RwLock::new(state),
        })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Put a leftover staging file back as the log.
    ///
    /// The in-memory index still matches the staging contents, because the
    /// deletion that left it behind was reported as failed.
    async fn settle_staging(&self, state: &mut LogState) -> StorageResult<()> {
        if !state.staging_pending {
            return Ok(());
        }

        tokio::fs::rename(&self.staging_path, &self.path)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Unavailable(format!(
                    "staging file {} could not be restored: {}",
                    self.staging_path.display(),
                    e
                )))
            })?;

        state.staging_pending = false;
        tracing::info!("Restored question log from leftover staging file");
        Ok(())
    }

    /// Append one record, leaving the log as it was if anything fails.
    async fn append(&self, state: &LogState, record: &[u8]) -> StorageResult<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| write_error(&self.path, e))?;

        let len = file
            .metadata()
            .await
            .map_err(|e| write_error(&self.path, e))?
            .len();
        if len > state.log_len {
            tracing::warn!(
                expected = state.log_len,
                found = len,
                "Discarding bytes left by a failed append"
            );
            truncate_synced(&mut file, &self.path, state.log_len).await?;
        }

        if let Err(e) = write_all_synced(&mut file, &self.path, record).await {
            tracing::error!(error = %e, "Append failed, truncating the partial record");
            if let Err(rollback) = truncate_synced(&mut file, &self.path, state.log_len).await {
                tracing::error!(error = %rollback, "Failed to truncate the partial record");
            }
            return Err(e);
        }
        Ok(())
    }
}

fn staging_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

async fn try_exists(path: &Path) -> StorageResult<bool> {
    tokio::fs::try_exists(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })
}

async fn read(path: &Path) -> StorageResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })
}

fn write_error(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::new(StorageErrorKind::FileWrite(format!(
        "{}: {}",
        path.display(),
        e
    )))
}

fn byte_len(text: &str) -> u64 {
    u64::try_from(text.len()).unwrap_or(u64::MAX)
}

async fn write_all_synced(file: &mut File, path: &Path, bytes: &[u8]) -> StorageResult<()> {
    file.write_all(bytes)
        .await
        .map_err(|e| write_error(path, e))?;
    file.sync_all().await.map_err(|e| write_error(path, e))
}

async fn truncate_synced(file: &mut File, path: &Path, len: u64) -> StorageResult<()> {
    file.set_len(len).await.map_err(|e| write_error(path, e))?;
    file.sync_all().await.map_err(|e| write_error(path, e))
}

/// Replace the log with `text`, creating it if absent, and sync it to disk.
async fn write_synced(path: &Path, text: &str) -> StorageResult<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| write_error(path, e))?;
    write_all_synced(&mut file, path, text.as_bytes()).await
}

/// Load the log, cutting off a record whose append never finished.
async fn load(path: &Path) -> StorageResult<LogState> {
    let text = read(path).await?;
    let (complete, tail) = log_format::split_torn_tail(&text)?;
    let contents = log_format::parse(complete)?;
    let log_len = byte_len(complete);

    if !tail.is_empty() {
        tracing::warn!(
            dropped_bytes = tail.len(),
            "Dropping unfinished record at the end of the question log"
        );
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .open(path)
            .await
            .map_err(|e| write_error(path, e))?;
        truncate_synced(&mut file, path, log_len).await?;
    }

    Ok(LogState {
        contents,
        log_len,
        staging_pending: false,
    })
}

/// Rebuild the log from a staging file left behind by an interrupted delete.
///
/// Whatever the log holds at this point (nothing, a prefix of the rewrite, or
/// the full rewrite) is discarded: the staging file is the last state known
/// to be complete.
#[tracing::instrument(skip_all)]
async fn recover(path: &Path, staging_path: &Path) -> StorageResult<LogState> {
    tracing::warn!(
        staging = %staging_path.display(),
        "Found staging file from an interrupted deletion, restoring it"
    );

    let text = read(staging_path).await?;
    let (complete, _) = log_format::split_torn_tail(&text)?;
    let contents = log_format::parse(complete)?;
    let snapshot = log_format::encode_snapshot(&contents.questions, contents.high_water);
    write_synced(path, &snapshot).await?;

    tokio::fs::remove_file(staging_path)
        .await
        .map_err(|e| write_error(staging_path, e))?;

    tracing::info!(
        questions = contents.questions.len(),
        "Restored question log from staging file"
    );
    Ok(LogState {
        contents,
        log_len: byte_len(&snapshot),
        staging_pending: false,
    })
}

#[async_trait]
impl QuestionStore for FlatFileStore {
    fn backend(&self) -> &'static str {
        "flat_file"
    }

    async fn fetch_all(&self) -> StorageResult<Vec<Question>> {
        Ok(self.state.read().await.contents.questions.clone())
    }

    #[tracing::instrument(skip(self, question), fields(prompt_len = question.prompt.len()))]
    async fn insert(&self, question: NewQuestion) -> StorageResult<QuestionId> {
        log_format::check_field("prompt", &question.prompt)?;
        log_format::check_field("correct answer", &question.correct_answer)?;
        for answer in &question.incorrect_answers {
            log_format::check_field("incorrect answer", answer)?;
        }

        let mut state = self.state.write().await;
        self.settle_staging(&mut state).await?;

        let next = state.contents.high_water.checked_add(1).ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidRecord(
                "question ids exhausted".to_string(),
            ))
        })?;
        let id = QuestionId(next);
        let record = question.into_question(id, Utc::now().trunc_subsecs(3));
        let encoded = log_format::encode_record(&record);

        self.append(&state, encoded.as_bytes()).await?;

        state.log_len += byte_len(&encoded);
        state.contents.high_water = next;
        state.contents.questions.push(record);

        tracing::info!(id = %id, "Stored question");
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: QuestionId) -> StorageResult<bool> {
        let mut state = self.state.write().await;
        self.settle_staging(&mut state).await?;

        let Some(position) = state.contents.questions.iter().position(|q| q.id == id) else {
            tracing::debug!("No question with this id");
            return Ok(false);
        };

        let remaining: Vec<Question> = state
            .contents
            .questions
            .iter()
            .filter(|q| q.id != id)
            .cloned()
            .collect();
        let snapshot = log_format::encode_snapshot(&remaining, state.contents.high_water);

        tokio::fs::rename(&self.path, &self.staging_path)
            .await
            .map_err(|e| write_error(&self.staging_path, e))?;

        if let Err(e) = write_synced(&self.path, &snapshot).await {
            tracing::error!(error = %e, "Failed to rewrite question log, restoring staging file");
            state.staging_pending = true;
            if let Err(restore) = self.settle_staging(&mut state).await {
                tracing::error!(error = %restore, "Failed to restore staging file");
            }
            return Err(e);
        }

        if let Err(e) = tokio::fs::remove_file(&self.staging_path).await {
            // The staging file would win on restart, so the deletion is undone.
            let e = write_error(&self.staging_path, e);
            tracing::error!(error = %e, "Failed to remove staging file, undoing deletion");
            state.staging_pending = true;
            if let Err(restore) = self.settle_staging(&mut state).await {
                tracing::error!(error = %restore, "Failed to restore staging file");
            }
            return Err(e);
        }

        state.log_len = byte_len(&snapshot);
        state.contents.questions.remove(position);
        tracing::info!(remaining = state.contents.questions.len(), "Deleted question");
        Ok(true)
    }

    async fn exists(&self, id: QuestionId) -> StorageResult<bool> {
        Ok(self
            .state
            .read()
            .await
            .contents
            .questions
            .iter()
            .any(|q| q.id == id))
    }
}
