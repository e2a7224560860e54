//! What processing a message led to.

use crate::CommandRejection;
use quizbank_core::QuestionId;

/// Why a message was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    /// The channel is not configured for moderation
    #[display("channel not monitored")]
    UnmonitoredChannel,
    /// The message was posted by the engine itself
    #[display("own message")]
    OwnMessage,
    /// The text is not a command
    #[display("not a command")]
    NotCommand,
    /// A command this bot does not handle
    #[display("unknown command")]
    UnknownCommand,
    /// The message is gone
    #[display("message deleted")]
    MessageGone,
    /// The reaction is not a vote
    #[display("not a vote reaction")]
    OtherEmoji,
}

/// A mutation that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Committed {
    /// A question was stored
    #[display("added question {}", _0)]
    Added(QuestionId),
    /// A question was removed
    #[display("deleted question {}", _0)]
    Deleted(QuestionId),
}

/// Result of evaluating one message.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ModerationOutcome {
    /// Nothing to do
    #[display("ignored: {}", _0)]
    Ignored(IgnoreReason),
    /// The command was turned down
    #[display("rejected: {}", _0)]
    Rejected(CommandRejection),
    /// The command stays open until more votes arrive
    #[display("awaiting votes ({}/{})", votes, threshold)]
    AwaitingVotes {
        /// Qualifying reactions counted
        votes: u32,
        /// Qualifying reactions required
        threshold: u32,
    },
    /// The command was executed
    #[display("committed: {}", _0)]
    Committed(Committed),
    /// The command could not be evaluated or executed right now
    #[display("abandoned: {}", _0)]
    Abandoned(String),
}

/// Totals of one backlog reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Channels whose history was fetched
    pub channels: usize,
    /// Channels whose history could not be fetched
    pub failed_channels: usize,
    /// Messages evaluated
    pub messages: usize,
    /// Commands executed
    pub committed: usize,
    /// Commands still waiting for votes
    pub awaiting: usize,
}

impl ReconcileSummary {
    /// Count one message outcome.
    pub fn record(&mut self, outcome: &ModerationOutcome) {
        self.messages += 1;
        match outcome {
            ModerationOutcome::Committed(_) => self.committed += 1,
            ModerationOutcome::AwaitingVotes { .. } => self.awaiting += 1,
            _ => {}
        }
    }
}
