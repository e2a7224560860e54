//! Diesel models for the questions table.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use quizbank_core::{NewQuestion, Question, QuestionId};
use quizbank_error::{StorageError, StorageErrorKind, StorageResult};

/// Database row for the questions table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::questions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuestionRow {
    pub id: i64,
    pub question: String,
    pub correct_answer: String,
    /// JSON array of strings
    pub incorrect_answers: String,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for the questions table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::questions)]
pub struct NewQuestionRow {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: String,
    pub created_at: NaiveDateTime,
}

impl NewQuestionRow {
    /// Build an insertable row, encoding the incorrect answers as JSON.
    pub fn from_new(question: NewQuestion, created_at: NaiveDateTime) -> StorageResult<Self> {
        let incorrect_answers = serde_json::to_string(&question.incorrect_answers).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidRecord(format!(
                "incorrect answers not encodable: {}",
                e
            )))
        })?;

        Ok(Self {
            question: question.prompt,
            correct_answer: question.correct_answer,
            incorrect_answers,
            created_at,
        })
    }
}

impl TryFrom<QuestionRow> for Question {
    type Error = StorageError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "negative question id {}",
                row.id
            )))
        })?;
        let incorrect_answers: Vec<String> = serde_json::from_str(&row.incorrect_answers)
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Corrupt(format!(
                    "question {}: incorrect answers are not a JSON string array: {}",
                    row.id, e
                )))
            })?;

        Ok(Question {
            id: QuestionId(id),
            prompt: row.question,
            correct_answer: row.correct_answer,
            incorrect_answers,
            created_at: row.created_at.and_utc(),
        })
    }
}
