//! Volatile question store.

use async_trait::async_trait;
use chrono::Utc;
use quizbank_core::{NewQuestion, Question, QuestionId};
use quizbank_error::{StorageError, StorageErrorKind, StorageResult};
use quizbank_interface::QuestionStore;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryState {
    questions: BTreeMap<QuestionId, Question>,
    high_water: u64,
}

/// In-memory question store.
///
/// Follows the same id rules as the durable backends, but everything is
/// lost when the process exits.
#[derive(Default)]
pub struct MemoryQuestionStore {
    state: RwLock<MemoryState>,
}

impl MemoryQuestionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored questions.
    pub async fn len(&self) -> usize {
        self.state.read().await.questions.len()
    }

    /// Whether the store holds no questions.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.questions.is_empty()
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn fetch_all(&self) -> StorageResult<Vec<Question>> {
        Ok(self.state.read().await.questions.values().cloned().collect())
    }

    #[tracing::instrument(skip(self, question))]
    async fn insert(&self, question: NewQuestion) -> StorageResult<QuestionId> {
        let mut state = self.state.write().await;
        let next = state.high_water.checked_add(1).ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidRecord(
                "question ids exhausted".to_string(),
            ))
        })?;
        let id = QuestionId(next);
        state.high_water = next;
        state
            .questions
            .insert(id, question.into_question(id, Utc::now()));
        tracing::debug!(id = %id, "Stored question in memory");
        Ok(id)
    }

    async fn delete(&self, id: QuestionId) -> StorageResult<bool> {
        Ok(self.state.write().await.questions.remove(&id).is_some())
    }

    async fn exists(&self, id: QuestionId) -> StorageResult<bool> {
        Ok(self.state.read().await.questions.contains_key(&id))
    }
}
