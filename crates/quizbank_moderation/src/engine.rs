//! Event router and backlog reconciler.

use crate::gate::{self, GateDecision};
use crate::{
    Command, CommandRejection, Committed, IgnoreReason, ModerationEvent, ModerationOutcome,
    ParsedCommand, ReconcileSummary, parse_command,
};
use quizbank_core::{
    ACKNOWLEDGEMENT_EMOJI, ChannelConfig, ChannelId, ChatMessage, GuildId, MessageRef,
};
use quizbank_error::StorageError;
use quizbank_interface::{MessagingTransport, QuestionStore};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Messages fetched per channel when replaying history.
pub const DEFAULT_BACKLOG_LIMIT: u8 = 100;

/// Capacity of the event queue feeding [`ModerationEngine::run`].
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// Applies approved commands to the question store.
///
/// The engine keeps no record of open commands. Every event leads to a fresh
/// look at the message and its reactions, so replaying an event or the whole
/// channel history is always safe: a command that already ran has had its
/// message deleted and cannot be found again.
pub struct ModerationEngine {
    store: Arc<dyn QuestionStore>,
    transport: Arc<dyn MessagingTransport>,
    channels: Vec<ChannelConfig>,
    backlog_limit: u8,
}

impl ModerationEngine {
    /// Create an engine for the given channels.
    pub fn new(
        store: Arc<dyn QuestionStore>,
        transport: Arc<dyn MessagingTransport>,
        channels: Vec<ChannelConfig>,
    ) -> Self {
        Self {
            store,
            transport,
            channels,
            backlog_limit: DEFAULT_BACKLOG_LIMIT,
        }
    }

    /// Set how many recent messages per channel reconciliation replays.
    pub fn with_backlog_limit(mut self, limit: u8) -> Self {
        self.backlog_limit = limit;
        self
    }

    fn channel_config(
        &self,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
    ) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.matches(guild_id, channel_id))
    }

    /// Process events until the queue closes or a shutdown event arrives.
    #[instrument(skip_all, fields(channels = self.channels.len(), store = self.store.backend()))]
    pub async fn run(self, mut rx: mpsc::Receiver<ModerationEvent>) {
        info!("Moderation engine started");

        while let Some(event) = rx.recv().await {
            if self.handle(event).await.is_break() {
                info!("Moderation engine shutting down");
                break;
            }
        }

        info!("Moderation engine stopped");
    }

    /// Handle one event.
    ///
    /// Returns `Break` when the engine should stop.
    #[instrument(skip_all, fields(event = event.name()))]
    pub async fn handle(&self, event: ModerationEvent) -> ControlFlow<()> {
        let outcome = match event {
            ModerationEvent::MessageCreated(message) => {
                self.process_message(&message, false).await
            }
            ModerationEvent::ReactionAdded { target, emoji }
            | ModerationEvent::ReactionRemoved { target, emoji }
            | ModerationEvent::EmojiCleared { target, emoji } => {
                self.process_reaction(target, Some(&emoji)).await
            }
            ModerationEvent::ReactionsCleared(target) => self.process_reaction(target, None).await,
            ModerationEvent::Reconcile => {
                self.reconcile().await;
                return ControlFlow::Continue(());
            }
            ModerationEvent::Shutdown => return ControlFlow::Break(()),
        };

        debug!(%outcome, "Event handled");
        ControlFlow::Continue(())
    }

    /// Re-evaluate the message a reaction event points at.
    ///
    /// `emoji` is `None` when every reaction was cleared.
    #[instrument(skip(self), fields(message_id = %target.message_id))]
    pub async fn process_reaction(
        &self,
        target: MessageRef,
        emoji: Option<&str>,
    ) -> ModerationOutcome {
        if emoji.is_some_and(|e| e != ACKNOWLEDGEMENT_EMOJI) {
            return ModerationOutcome::Ignored(IgnoreReason::OtherEmoji);
        }
        if self
            .channel_config(target.guild_id, target.channel_id)
            .is_none()
        {
            return ModerationOutcome::Ignored(IgnoreReason::UnmonitoredChannel);
        }

        match self
            .transport
            .fetch_message(target.channel_id, target.message_id)
            .await
        {
            Ok(Some(mut message)) => {
                message.guild_id = message.guild_id.or(target.guild_id);
                self.process_message(&message, true).await
            }
            Ok(None) => ModerationOutcome::Ignored(IgnoreReason::MessageGone),
            Err(e) => {
                warn!(error = %e, "Failed to fetch reacted message");
                ModerationOutcome::Abandoned(format!("message unavailable: {}", e))
            }
        }
    }

    /// Evaluate a message and execute its command once approved.
    ///
    /// When `silent` is set, rejections are not replied to.
    #[instrument(skip(self, message), fields(message_id = %message.id, channel_id = %message.channel_id))]
    pub async fn process_message(&self, message: &ChatMessage, silent: bool) -> ModerationOutcome {
        let Some(config) = self.channel_config(message.guild_id, message.channel_id) else {
            return ModerationOutcome::Ignored(IgnoreReason::UnmonitoredChannel);
        };
        if message.author_id == self.transport.engine_user() {
            return ModerationOutcome::Ignored(IgnoreReason::OwnMessage);
        }

        let command = match parse_command(&message.content) {
            ParsedCommand::NotCommand => {
                return ModerationOutcome::Ignored(IgnoreReason::NotCommand);
            }
            ParsedCommand::Unknown(name) => {
                debug!(command = %name, "Unknown command");
                return ModerationOutcome::Ignored(IgnoreReason::UnknownCommand);
            }
            ParsedCommand::Rejected(rejection) => {
                return self.reject(message, rejection, silent).await;
            }
            ParsedCommand::Command(command) => command,
        };

        if let Command::Delete(id) = &command {
            match self.store.exists(*id).await {
                Ok(true) => {}
                Ok(false) => {
                    return self
                        .reject(message, CommandRejection::NotFound(*id), silent)
                        .await;
                }
                Err(e) => return store_failure(e),
            }
        }

        let threshold = *config.vote_threshold();
        match gate::evaluate(self.transport.as_ref(), message, threshold).await {
            Ok(GateDecision::Reached { .. }) => {}
            Ok(GateDecision::Pending { votes, threshold }) => {
                return ModerationOutcome::AwaitingVotes { votes, threshold };
            }
            Err(e) => {
                warn!(error = %e, "Failed to read votes");
                return ModerationOutcome::Abandoned(format!("votes unavailable: {}", e));
            }
        }

        let committed = match command {
            Command::Add(question) => match self.store.insert(question).await {
                Ok(id) => Committed::Added(id),
                Err(e) => return store_failure(e),
            },
            Command::Delete(id) => match self.store.delete(id).await {
                Ok(true) => Committed::Deleted(id),
                Ok(false) => {
                    return self
                        .reject(message, CommandRejection::NotFound(id), silent)
                        .await;
                }
                Err(e) => return store_failure(e),
            },
        };

        info!(%committed, "Command approved and executed");
        if let Err(e) = self.transport.delete_message(message).await {
            warn!(error = %e, "Failed to delete executed command message");
        }
        ModerationOutcome::Committed(committed)
    }

    async fn reject(
        &self,
        message: &ChatMessage,
        rejection: CommandRejection,
        silent: bool,
    ) -> ModerationOutcome {
        debug!(%rejection, silent, "Command rejected");
        if !silent {
            if let Err(e) = self.transport.reply(message, rejection.reply_text()).await {
                warn!(error = %e, "Failed to reply to rejected command");
            }
        }
        ModerationOutcome::Rejected(rejection)
    }

    /// Replay the recent history of every monitored channel, oldest first.
    ///
    /// Catches up on commands that reached quorum while the engine was not
    /// listening. Rejections are not replied to.
    #[instrument(skip(self), fields(limit = self.backlog_limit))]
    pub async fn reconcile(&self) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        for config in &self.channels {
            let channel_id = *config.channel_id();
            let mut messages = match self
                .transport
                .recent_messages(channel_id, self.backlog_limit)
                .await
            {
                Ok(messages) => messages,
                Err(e) => {
                    warn!(channel_id = %channel_id, error = %e, "Failed to fetch channel history");
                    summary.failed_channels += 1;
                    continue;
                }
            };
            summary.channels += 1;

            messages.sort_by_key(|m| m.id);
            for mut message in messages {
                message.guild_id = message.guild_id.or(Some(*config.guild_id()));
                let outcome = self.process_message(&message, true).await;
                summary.record(&outcome);
            }
        }

        info!(
            channels = summary.channels,
            failed_channels = summary.failed_channels,
            messages = summary.messages,
            committed = summary.committed,
            awaiting = summary.awaiting,
            "Backlog reconciled"
        );
        summary
    }
}

fn store_failure(e: StorageError) -> ModerationOutcome {
    error!(error = %e, "Question store unavailable, command abandoned");
    ModerationOutcome::Abandoned(format!("store unavailable: {}", e))
}
