//! Command parsing.
//!
//! Commands are prefixed with `!`. The command name runs up to the first
//! whitespace; everything after it, trimmed, is the argument body.

use crate::replies;
use quizbank_core::{NewQuestion, QuestionId};

/// Prefix that marks a message as a command.
pub const COMMAND_PREFIX: char = '!';

/// Command name for adding a question.
pub const ADD_COMMAND: &str = "ajouter";

/// Command name for deleting a question.
pub const DELETE_COMMAND: &str = "supprimer";

/// Shortest accepted prompt, in characters.
pub const MIN_PROMPT_CHARS: usize = 10;

/// A well-formed command waiting for votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a new question
    Add(NewQuestion),
    /// Remove an existing question
    Delete(QuestionId),
}

/// Why a command was turned down before voting.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CommandRejection {
    /// The command is missing required parts
    #[display("malformed command")]
    MalformedCommand {
        /// Usage text to show the author
        usage: &'static str,
    },
    /// The argument could not be understood
    #[display("invalid argument '{}'", _0)]
    InvalidArgument(String),
    /// The argument names a question that does not exist
    #[display("question {} not found", _0)]
    NotFound(QuestionId),
}

impl CommandRejection {
    /// Text to reply with when the rejection is reported.
    pub fn reply_text(&self) -> &'static str {
        match self {
            Self::MalformedCommand { usage } => usage,
            Self::InvalidArgument(_) | Self::NotFound(_) => replies::INVALID_QUESTION_ID,
        }
    }
}

/// Result of parsing a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// The text does not start with the command prefix
    NotCommand,
    /// A prefixed command this bot does not handle
    Unknown(String),
    /// A well-formed command
    Command(Command),
    /// A recognized command with bad arguments
    Rejected(CommandRejection),
}

/// Parse a message body into a command.
///
/// Existence of the question named by a delete command is not checked here;
/// that requires the store.
///
/// # Examples
///
/// ```
/// use quizbank_moderation::{Command, ParsedCommand, parse_command};
/// use quizbank_core::QuestionId;
///
/// assert_eq!(
///     parse_command("!supprimer 3"),
///     ParsedCommand::Command(Command::Delete(QuestionId(3)))
/// );
/// assert_eq!(parse_command("bonjour"), ParsedCommand::NotCommand);
/// ```
pub fn parse_command(text: &str) -> ParsedCommand {
    let Some(rest) = text.trim().strip_prefix(COMMAND_PREFIX) else {
        return ParsedCommand::NotCommand;
    };

    let (name, body) = match rest.find(char::is_whitespace) {
        Some(split) => (&rest[..split], rest[split..].trim()),
        None => (rest, ""),
    };

    match name {
        ADD_COMMAND => parse_add(body),
        DELETE_COMMAND => parse_delete(body),
        other => ParsedCommand::Unknown(other.to_string()),
    }
}

fn parse_add(body: &str) -> ParsedCommand {
    let mut lines = body.lines().map(str::trim).filter(|line| !line.is_empty());

    let (Some(prompt), Some(correct_answer)) = (lines.next(), lines.next()) else {
        return ParsedCommand::Rejected(CommandRejection::MalformedCommand {
            usage: replies::ADD_USAGE,
        });
    };

    if prompt.chars().count() < MIN_PROMPT_CHARS {
        return ParsedCommand::Rejected(CommandRejection::MalformedCommand {
            usage: replies::ADD_USAGE,
        });
    }

    let incorrect_answers = lines.map(str::to_string).collect();
    ParsedCommand::Command(Command::Add(NewQuestion::new(
        prompt,
        correct_answer,
        incorrect_answers,
    )))
}

fn parse_delete(body: &str) -> ParsedCommand {
    if body.is_empty() {
        return ParsedCommand::Rejected(CommandRejection::MalformedCommand {
            usage: replies::DELETE_USAGE,
        });
    }

    match body.parse::<u64>() {
        Ok(id) => ParsedCommand::Command(Command::Delete(QuestionId(id))),
        Err(_) => ParsedCommand::Rejected(CommandRejection::InvalidArgument(body.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(prompt: &str, correct: &str, incorrect: &[&str]) -> ParsedCommand {
        ParsedCommand::Command(Command::Add(NewQuestion::new(
            prompt,
            correct,
            incorrect.iter().map(|s| s.to_string()).collect(),
        )))
    }

    #[test]
    fn test_add_with_answers() {
        assert_eq!(
            parse_command("!ajouter Quelle est la capitale de la France ?\nParis\nLyon\nMarseille"),
            add("Quelle est la capitale de la France ?", "Paris", &["Lyon", "Marseille"])
        );
    }

    #[test]
    fn test_add_trims_lines_and_skips_blanks() {
        assert_eq!(
            parse_command("  !ajouter   Quelle couleur a le ciel ?  \n\n  Bleu \n   \n Vert\n"),
            add("Quelle couleur a le ciel ?", "Bleu", &["Vert"])
        );
    }

    #[test]
    fn test_add_accepts_prompt_on_next_line() {
        assert_eq!(
            parse_command("!ajouter\nQuelle couleur a le ciel ?\nBleu"),
            add("Quelle couleur a le ciel ?", "Bleu", &[])
        );
    }

    #[test]
    fn test_add_short_prompt_is_malformed() {
        assert_eq!(
            parse_command("!ajouter Court\nX\nY"),
            ParsedCommand::Rejected(CommandRejection::MalformedCommand {
                usage: replies::ADD_USAGE
            })
        );
    }

    #[test]
    fn test_add_prompt_length_counts_characters() {
        // Ten characters, more than ten bytes.
        assert!(matches!(
            parse_command("!ajouter éléphanté?\nOui"),
            ParsedCommand::Command(Command::Add(_))
        ));
        assert!(matches!(
            parse_command("!ajouter éléphant?\nOui"),
            ParsedCommand::Rejected(_)
        ));
    }

    #[test]
    fn test_add_needs_an_answer() {
        assert!(matches!(
            parse_command("!ajouter Une question sans réponse"),
            ParsedCommand::Rejected(CommandRejection::MalformedCommand { .. })
        ));
        assert!(matches!(
            parse_command("!ajouter"),
            ParsedCommand::Rejected(CommandRejection::MalformedCommand { .. })
        ));
    }

    #[test]
    fn test_delete() {
        assert_eq!(
            parse_command("!supprimer 42"),
            ParsedCommand::Command(Command::Delete(QuestionId(42)))
        );
    }

    #[test]
    fn test_delete_without_argument_is_malformed() {
        assert_eq!(
            parse_command("!supprimer"),
            ParsedCommand::Rejected(CommandRejection::MalformedCommand {
                usage: replies::DELETE_USAGE
            })
        );
        assert_eq!(
            parse_command("!supprimer   "),
            ParsedCommand::Rejected(CommandRejection::MalformedCommand {
                usage: replies::DELETE_USAGE
            })
        );
    }

    #[test]
    fn test_delete_rejects_non_numeric_and_out_of_range() {
        assert!(matches!(
            parse_command("!supprimer quarante"),
            ParsedCommand::Rejected(CommandRejection::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_command("!supprimer -1"),
            ParsedCommand::Rejected(CommandRejection::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_command("!supprimer 99999999999999999999999"),
            ParsedCommand::Rejected(CommandRejection::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_other_text_is_ignored() {
        assert_eq!(parse_command("salut tout le monde"), ParsedCommand::NotCommand);
        assert_eq!(
            parse_command("!aide"),
            ParsedCommand::Unknown("aide".to_string())
        );
        assert_eq!(
            parse_command("!Ajouter Quelle est la capitale de la France ?\nParis"),
            ParsedCommand::Unknown("Ajouter".to_string())
        );
    }

    #[test]
    fn test_reply_texts() {
        assert_eq!(
            CommandRejection::NotFound(QuestionId(42)).reply_text(),
            "Le numéro de la question est invalide !"
        );
        assert!(
            CommandRejection::MalformedCommand {
                usage: replies::DELETE_USAGE
            }
            .reply_text()
            .contains("!supprimer [identifiant question]")
        );
    }
}
