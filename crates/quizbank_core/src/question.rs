//! Quiz question records.

use crate::QuestionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored quiz question.
///
/// # Examples
///
/// ```
/// use quizbank_core::{Question, QuestionId};
///
/// let question = Question {
///     id: QuestionId(1),
///     prompt: "Quelle est la capitale de la France ?".to_string(),
///     correct_answer: "Paris".to_string(),
///     incorrect_answers: vec!["Lyon".to_string()],
///     created_at: chrono::Utc::now(),
/// };
///
/// let json = serde_json::to_value(&question).unwrap();
/// assert_eq!(json["correctAnswer"], "Paris");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier, unique and never reused
    pub id: QuestionId,
    /// The question text
    pub prompt: String,
    /// The expected answer
    pub correct_answer: String,
    /// Wrong answers offered alongside the correct one
    pub incorrect_answers: Vec<String>,
    /// When the question was stored
    pub created_at: DateTime<Utc>,
}

/// A question that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    /// The question text
    pub prompt: String,
    /// The expected answer
    pub correct_answer: String,
    /// Wrong answers, possibly empty
    pub incorrect_answers: Vec<String>,
}

impl NewQuestion {
    /// Create a new unsaved question.
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
        }
    }

    /// Attach the id and creation time chosen by a store.
    pub fn into_question(self, id: QuestionId, created_at: DateTime<Utc>) -> Question {
        Question {
            id,
            prompt: self.prompt,
            correct_answer: self.correct_answer,
            incorrect_answers: self.incorrect_answers,
            created_at,
        }
    }
}
