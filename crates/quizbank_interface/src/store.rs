//! Record store trait definition.

use async_trait::async_trait;
use quizbank_core::{NewQuestion, Question, QuestionId};
use quizbank_error::StorageResult;

/// Trait for pluggable question store backends.
///
/// Implementations own question identity: ids are allocated by the store,
/// strictly increasing, and never handed out twice even after the record
/// holding them is deleted.
///
/// Stores must tolerate concurrent readers (the listing API reads while the
/// moderation engine writes). Writers are serialized by the engine.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Short name of the backend (e.g., "flat_file", "sqlite").
    fn backend(&self) -> &'static str;

    /// Return every stored question, ordered by id.
    async fn fetch_all(&self) -> StorageResult<Vec<Question>>;

    /// Store a question and return its freshly allocated id.
    ///
    /// The record is durable when this returns.
    async fn insert(&self, question: NewQuestion) -> StorageResult<QuestionId>;

    /// Delete a question.
    ///
    /// # Returns
    ///
    /// `true` if a record was removed, `false` if no record had this id
    async fn delete(&self, id: QuestionId) -> StorageResult<bool>;

    /// Check whether a question with this id exists.
    async fn exists(&self, id: QuestionId) -> StorageResult<bool>;
}
