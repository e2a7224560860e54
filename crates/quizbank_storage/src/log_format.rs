//! Text format of the question log.
//!
//! Each record is a block of prefixed lines terminated by a blank line:
//!
//! ```text
//! I: 3
//! C: 2021-02-14T09:12:45.120Z
//! Q: Quelle est la capitale de la France ?
//! A: Paris
//! F: Lyon
//! F: Marseille
//!
//! ```
//!
//! A rewritten log starts with `H: <id>`, the highest id ever allocated, so
//! that deleting the newest record does not let its id be handed out again.
//!
//! Every complete log is empty or ends with a blank line. Anything after the
//! last blank line is a record whose append never finished.

use chrono::{DateTime, SecondsFormat, Utc};
use quizbank_core::{Question, QuestionId};
use quizbank_error::{StorageError, StorageErrorKind, StorageResult};
use std::collections::HashSet;

const HIGH_WATER: &str = "H: ";
const ID: &str = "I: ";
const CREATED_AT: &str = "C: ";
const PROMPT: &str = "Q: ";
const CORRECT: &str = "A: ";
const INCORRECT: &str = "F: ";

/// Everything a log file holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LogContents {
    /// Records in file order
    pub questions: Vec<Question>,
    /// Highest id ever allocated, including deleted ones
    pub high_water: u64,
}

/// A record whose fields are still being read.
struct PartialRecord {
    id: u64,
    first_line: usize,
    created_at: Option<DateTime<Utc>>,
    prompt: Option<String>,
    correct_answer: Option<String>,
    incorrect_answers: Vec<String>,
}

impl PartialRecord {
    fn new(id: u64, first_line: usize) -> Self {
        Self {
            id,
            first_line,
            created_at: None,
            prompt: None,
            correct_answer: None,
            incorrect_answers: Vec::new(),
        }
    }

    fn finish(self) -> StorageResult<Question> {
        let missing = |field: &str| {
            corrupt(
                self.first_line,
                format!("record {} has no {}", self.id, field),
            )
        };

        let created_at = self.created_at.ok_or_else(|| missing("creation date"))?;
        let prompt = self
            .prompt
            .filter(|p| !p.is_empty())
            .ok_or_else(|| missing("prompt"))?;
        let correct_answer = self
            .correct_answer
            .filter(|a| !a.is_empty())
            .ok_or_else(|| missing("correct answer"))?;

        Ok(Question {
            id: QuestionId(self.id),
            prompt,
            correct_answer,
            incorrect_answers: self.incorrect_answers,
            created_at,
        })
    }
}

fn corrupt(line: usize, reason: impl std::fmt::Display) -> StorageError {
    StorageError::new(StorageErrorKind::Corrupt(format!("line {}: {}", line, reason)))
}

/// Parse a whole log file.
///
/// Any line that cannot be understood makes the whole file unreadable: the
/// caller must not start with a silently truncated question set.
pub(crate) fn parse(text: &str) -> StorageResult<LogContents> {
    if !text.is_empty() && !text.ends_with('\n') {
        let last_line = text.lines().count();
        return Err(corrupt(last_line, "truncated final record"));
    }

    let mut contents = LogContents::default();
    let mut seen = HashSet::new();
    let mut current: Option<PartialRecord> = None;

    let mut finish = |record: Option<PartialRecord>,
                      contents: &mut LogContents|
     -> StorageResult<()> {
        if let Some(record) = record {
            let question = record.finish()?;
            contents.high_water = contents.high_water.max(question.id.get());
            contents.questions.push(question);
        }
        Ok(())
    };

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;

        if line.is_empty() {
            continue;
        }

        if let Some(value) = line.strip_prefix(HIGH_WATER) {
            finish(current.take(), &mut contents)?;
            let high_water = value
                .parse::<u64>()
                .map_err(|e| corrupt(number, format!("invalid high-water mark: {}", e)))?;
            contents.high_water = contents.high_water.max(high_water);
        } else if let Some(value) = line.strip_prefix(ID) {
            finish(current.take(), &mut contents)?;
            let id = value
                .parse::<u64>()
                .map_err(|e| corrupt(number, format!("invalid question id: {}", e)))?;
            if !seen.insert(id) {
                return Err(corrupt(number, format!("duplicate question id {}", id)));
            }
            current = Some(PartialRecord::new(id, number));
        } else {
            let record = current
                .as_mut()
                .ok_or_else(|| corrupt(number, "field outside of a record"))?;

            if let Some(value) = line.strip_prefix(CREATED_AT) {
                let created_at = DateTime::parse_from_rfc3339(value)
                    .map_err(|e| corrupt(number, format!("invalid creation date: {}", e)))?;
                record.created_at = Some(created_at.with_timezone(&Utc));
            } else if let Some(value) = line.strip_prefix(PROMPT) {
                record.prompt = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix(CORRECT) {
                record.correct_answer = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix(INCORRECT) {
                record.incorrect_answers.push(value.to_string());
            } else {
                return Err(corrupt(number, format!("unrecognized line '{}'", line)));
            }
        }
    }

    finish(current.take(), &mut contents)?;
    contents.questions.sort_by_key(|q| q.id);
    Ok(contents)
}

/// Split a log into its complete records and an unfinished trailing record.
///
/// The tail is only accepted when it looks like the start of a record (an
/// `I:` line or a prefix of one). Any other trailing text is corruption.
pub(crate) fn split_torn_tail(text: &str) -> StorageResult<(&str, &str)> {
    if text.is_empty() || text.ends_with("\n\n") {
        return Ok((text, ""));
    }

    let boundary = text.rfind("\n\n").map_or(0, |i| i + 2);
    let (complete, tail) = text.split_at(boundary);
    if !(tail.starts_with(ID) || ID.starts_with(tail)) {
        let line = complete.lines().count() + 1;
        return Err(corrupt(line, "unterminated text after the last record"));
    }
    Ok((complete, tail))
}

/// Encode one record, including its terminating blank line.
pub(crate) fn encode_record(question: &Question) -> String {
    let mut out = format!(
        "{ID}{}\n{CREATED_AT}{}\n{PROMPT}{}\n{CORRECT}{}\n",
        question.id,
        question
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        question.prompt,
        question.correct_answer,
    );
    for answer in &question.incorrect_answers {
        out.push_str(INCORRECT);
        out.push_str(answer);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Encode a full log: the high-water line followed by every record.
pub(crate) fn encode_snapshot(questions: &[Question], high_water: u64) -> String {
    let mut out = format!("{HIGH_WATER}{}\n\n", high_water);
    for question in questions {
        out.push_str(&encode_record(question));
    }
    out
}

/// Check that a field fits on a single log line.
pub(crate) fn check_field(name: &str, value: &str) -> StorageResult<()> {
    if value.contains(['\n', '\r']) {
        return Err(StorageError::new(StorageErrorKind::InvalidRecord(format!(
            "{} must fit on one line",
            name
        ))));
    }
    Ok(())
}
