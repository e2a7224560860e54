//! Question store that can be switched to failing.

use async_trait::async_trait;
use quizbank_core::{NewQuestion, Question, QuestionId};
use quizbank_error::{StorageError, StorageErrorKind, StorageResult};
use quizbank_interface::QuestionStore;
use quizbank_storage::MemoryQuestionStore;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory store whose operations fail while marked unavailable.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryQuestionStore,
    unavailable: AtomicBool,
}

#[allow(dead_code)]
impl FlakyStore {
    /// Create an empty, available store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail, or succeed again.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored questions, regardless of availability.
    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    fn check(&self) -> StorageResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Unavailable(
                "disk gone".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for FlakyStore {
    fn backend(&self) -> &'static str {
        "flaky"
    }

    async fn fetch_all(&self) -> StorageResult<Vec<Question>> {
        self.check()?;
        self.inner.fetch_all().await
    }

    async fn insert(&self, question: NewQuestion) -> StorageResult<QuestionId> {
        self.check()?;
        self.inner.insert(question).await
    }

    async fn delete(&self, id: QuestionId) -> StorageResult<bool> {
        self.check()?;
        self.inner.delete(id).await
    }

    async fn exists(&self, id: QuestionId) -> StorageResult<bool> {
        self.check()?;
        self.inner.exists(id).await
    }
}
