//! SQLite implementation of the question store.

use crate::connection::{SqlitePool, build_pool, run_migrations};
use crate::models::{NewQuestionRow, QuestionRow};
use crate::schema::questions;
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;
use quizbank_core::{NewQuestion, Question, QuestionId};
use quizbank_error::{StorageError, StorageErrorKind, StorageResult};
use quizbank_interface::QuestionStore;
use std::path::{Path, PathBuf};

/// Transactional question store backed by a SQLite file.
///
/// Ids come from an `AUTOINCREMENT` column, so SQLite itself guarantees they
/// are never reused.
pub struct SqliteQuestionStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteQuestionStore {
    /// Open (creating if needed) the database at `path` and migrate it.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created, the database
    /// cannot be opened, or a migration fails.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let url = path.to_string_lossy().into_owned();
        let pool = tokio::task::spawn_blocking(move || -> StorageResult<SqlitePool> {
            let pool = build_pool(&url, 4)?;
            let mut conn = pool.get()?;
            run_migrations(&mut conn)?;
            Ok(pool)
        })
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Unavailable(e.to_string())))??;

        tracing::info!("Opened SQLite question store");
        Ok(Self { pool, path })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a blocking closure on a pooled connection.
    async fn with_conn<T, F>(&self, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> StorageResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Unavailable(e.to_string())))?
    }
}

/// Ids beyond `i64::MAX` cannot exist in SQLite.
fn to_row_id(id: QuestionId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn fetch_all(&self) -> StorageResult<Vec<Question>> {
        let rows: Vec<QuestionRow> = self
            .with_conn(|conn| {
                Ok(questions::table
                    .order(questions::id.asc())
                    .select(QuestionRow::as_select())
                    .load(conn)?)
            })
            .await?;

        rows.into_iter().map(Question::try_from).collect()
    }

    #[tracing::instrument(skip(self, question), fields(prompt_len = question.prompt.len()))]
    async fn insert(&self, question: NewQuestion) -> StorageResult<QuestionId> {
        let row = NewQuestionRow::from_new(question, Utc::now().naive_utc().trunc_subsecs(3))?;

        let id = self
            .with_conn(move |conn| {
                conn.transaction::<i64, StorageError, _>(|conn| {
                    diesel::insert_into(questions::table)
                        .values(&row)
                        .execute(conn)?;
                    Ok(
                        diesel::select(diesel::dsl::sql::<BigInt>("last_insert_rowid()"))
                            .get_result(conn)?,
                    )
                })
            })
            .await?;

        let id = u64::try_from(id)
            .map(QuestionId)
            .map_err(|_| {
                StorageError::new(StorageErrorKind::Database(format!("negative row id {}", id)))
            })?;
        tracing::info!(id = %id, "Stored question");
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: QuestionId) -> StorageResult<bool> {
        let Some(row_id) = to_row_id(id) else {
            return Ok(false);
        };

        let deleted = self
            .with_conn(move |conn| {
                Ok(diesel::delete(questions::table.find(row_id)).execute(conn)?)
            })
            .await?;

        if deleted > 0 {
            tracing::info!("Deleted question");
        }
        Ok(deleted > 0)
    }

    async fn exists(&self, id: QuestionId) -> StorageResult<bool> {
        let Some(row_id) = to_row_id(id) else {
            return Ok(false);
        };

        self.with_conn(move |conn| {
            Ok(diesel::select(diesel::dsl::exists(questions::table.find(row_id))).get_result(conn)?)
        })
        .await
    }
}
