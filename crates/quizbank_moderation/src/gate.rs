//! Vote gate.
//!
//! Approval is recomputed from the reactions currently visible on the
//! message. Nothing is remembered between evaluations.

use quizbank_core::{ACKNOWLEDGEMENT_EMOJI, ChatMessage, UserId};
use quizbank_error::TransportResult;
use quizbank_interface::MessagingTransport;
use tracing::{debug, instrument, warn};

/// Result of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Enough qualifying reactions
    Reached {
        /// Qualifying reactions counted
        votes: u32,
    },
    /// Not enough qualifying reactions yet
    Pending {
        /// Qualifying reactions counted
        votes: u32,
        /// Qualifying reactions required
        threshold: u32,
    },
}

/// Count reactions that are neither the author's nor the engine's.
pub fn count_qualifying(reactors: &[UserId], author: UserId, engine: UserId) -> u32 {
    let count = reactors
        .iter()
        .filter(|user| **user != author && **user != engine)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Evaluate a command message against its channel's vote threshold.
///
/// Below threshold, makes sure the engine's own acknowledgement reaction is
/// on the message, adding it only when the engine is not among the current
/// reactors. Failing to add the marker is logged and does not change the
/// decision.
///
/// # Errors
///
/// Returns the transport error if the reaction state cannot be read. The
/// caller treats that as "not reached".
#[instrument(skip(transport, message), fields(message_id = %message.id))]
pub async fn evaluate(
    transport: &dyn MessagingTransport,
    message: &ChatMessage,
    threshold: u32,
) -> TransportResult<GateDecision> {
    let engine = transport.engine_user();
    let reactors = transport
        .reaction_users(message, ACKNOWLEDGEMENT_EMOJI)
        .await?;
    let votes = count_qualifying(&reactors, message.author_id, engine);

    if votes >= threshold {
        debug!(votes, "Quorum reached");
        return Ok(GateDecision::Reached { votes });
    }

    if !reactors.contains(&engine) {
        if let Err(e) = transport
            .add_reaction(message, ACKNOWLEDGEMENT_EMOJI)
            .await
        {
            warn!(error = %e, "Failed to add acknowledgement reaction");
        }
    }

    debug!(votes, "Waiting for more votes");
    Ok(GateDecision::Pending { votes, threshold })
}
