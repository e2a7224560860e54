//! Events fed to the moderation engine.

use quizbank_core::{ChatMessage, MessageRef};

/// Something happened that may change the state of a command.
#[derive(Debug, Clone)]
pub enum ModerationEvent {
    /// A message was posted
    MessageCreated(ChatMessage),
    /// A reaction was added to a message
    ReactionAdded {
        /// Message that was reacted to
        target: MessageRef,
        /// Emoji of the reaction
        emoji: String,
    },
    /// A reaction was removed from a message
    ReactionRemoved {
        /// Message that was reacted to
        target: MessageRef,
        /// Emoji of the reaction
        emoji: String,
    },
    /// Every reaction with one emoji was removed from a message
    EmojiCleared {
        /// Message that was reacted to
        target: MessageRef,
        /// Emoji that was cleared
        emoji: String,
    },
    /// Every reaction was removed from a message
    ReactionsCleared(MessageRef),
    /// Replay the recent history of every configured channel
    Reconcile,
    /// Stop the engine loop
    Shutdown,
}

impl ModerationEvent {
    /// Event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MessageCreated(_) => "message_created",
            Self::ReactionAdded { .. } => "reaction_added",
            Self::ReactionRemoved { .. } => "reaction_removed",
            Self::EmojiCleared { .. } => "emoji_cleared",
            Self::ReactionsCleared(_) => "reactions_cleared",
            Self::Reconcile => "reconcile",
            Self::Shutdown => "shutdown",
        }
    }
}
