//! In-memory messaging transport with scripted channel state.

use async_trait::async_trait;
use quizbank_core::{ChannelId, ChatMessage, MessageId, UserId};
use quizbank_error::{TransportError, TransportErrorKind, TransportResult};
use quizbank_interface::MessagingTransport;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Transport backed by maps, recording everything the engine does.
pub struct ScriptedTransport {
    engine: UserId,
    messages: Mutex<BTreeMap<MessageId, ChatMessage>>,
    reactions: Mutex<HashMap<(MessageId, String), Vec<UserId>>>,
    replies: Mutex<Vec<(MessageId, String)>>,
    markers: Mutex<Vec<MessageId>>,
    deleted: Mutex<Vec<MessageId>>,
    fail_reaction_reads: AtomicBool,
    fail_reactions: AtomicBool,
    fail_replies: AtomicBool,
    fail_deletes: AtomicBool,
}

fn scripted_failure(what: &str) -> TransportError {
    TransportError::new(TransportErrorKind::Api(format!("{} failed", what)))
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// Create an empty channel state for the given engine identity.
    pub fn new(engine: UserId) -> Self {
        Self {
            engine,
            messages: Mutex::new(BTreeMap::new()),
            reactions: Mutex::new(HashMap::new()),
            replies: Mutex::new(Vec::new()),
            markers: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            fail_reaction_reads: AtomicBool::new(false),
            fail_reactions: AtomicBool::new(false),
            fail_replies: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make a message visible.
    pub fn post(&self, message: ChatMessage) {
        self.messages.lock().unwrap().insert(message.id, message);
    }

    /// Add a reaction from `user`.
    pub fn react(&self, message: MessageId, emoji: &str, user: UserId) {
        let mut reactions = self.reactions.lock().unwrap();
        let users = reactions.entry((message, emoji.to_string())).or_default();
        if !users.contains(&user) {
            users.push(user);
        }
    }

    /// Remove a reaction from `user`.
    pub fn unreact(&self, message: MessageId, emoji: &str, user: UserId) {
        if let Some(users) = self
            .reactions
            .lock()
            .unwrap()
            .get_mut(&(message, emoji.to_string()))
        {
            users.retain(|u| *u != user);
        }
    }

    /// Make reaction reads fail.
    pub fn fail_reaction_reads(&self, fail: bool) {
        self.fail_reaction_reads.store(fail, Ordering::SeqCst);
    }

    /// Make adding reactions fail.
    pub fn fail_reactions(&self, fail: bool) {
        self.fail_reactions.store(fail, Ordering::SeqCst);
    }

    /// Make replies fail.
    pub fn fail_replies(&self, fail: bool) {
        self.fail_replies.store(fail, Ordering::SeqCst);
    }

    /// Make message deletion fail.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Replies sent so far.
    pub fn replies(&self) -> Vec<(MessageId, String)> {
        self.replies.lock().unwrap().clone()
    }

    /// Messages the engine reacted to, once per reaction call.
    pub fn markers(&self) -> Vec<MessageId> {
        self.markers.lock().unwrap().clone()
    }

    /// Messages the engine deleted.
    pub fn deleted(&self) -> Vec<MessageId> {
        self.deleted.lock().unwrap().clone()
    }

    /// Whether a message is still visible.
    pub fn is_visible(&self, message: MessageId) -> bool {
        self.messages.lock().unwrap().contains_key(&message)
    }
}

#[async_trait]
impl MessagingTransport for ScriptedTransport {
    fn engine_user(&self) -> UserId {
        self.engine
    }

    async fn fetch_message(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
    ) -> TransportResult<Option<ChatMessage>> {
        // Messages fetched over HTTP carry no guild id.
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(&message_id)
            .cloned()
            .map(|mut m| {
                m.guild_id = None;
                m
            }))
    }

    async fn recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> TransportResult<Vec<ChatMessage>> {
        // Newest first, like the platform API.
        Ok(self
            .messages
            .lock()
            .unwrap()
            .values()
            .rev()
            .filter(|m| m.channel_id == channel_id)
            .take(limit as usize)
            .cloned()
            .map(|mut m| {
                m.guild_id = None;
                m
            })
            .collect())
    }

    async fn reaction_users(
        &self,
        message: &ChatMessage,
        emoji: &str,
    ) -> TransportResult<Vec<UserId>> {
        if self.fail_reaction_reads.load(Ordering::SeqCst) {
            return Err(scripted_failure("reaction read"));
        }
        Ok(self
            .reactions
            .lock()
            .unwrap()
            .get(&(message.id, emoji.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn add_reaction(&self, message: &ChatMessage, emoji: &str) -> TransportResult<()> {
        if self.fail_reactions.load(Ordering::SeqCst) {
            return Err(scripted_failure("reaction"));
        }
        self.markers.lock().unwrap().push(message.id);
        self.react(message.id, emoji, self.engine);
        Ok(())
    }

    async fn reply(&self, message: &ChatMessage, text: &str) -> TransportResult<()> {
        if self.fail_replies.load(Ordering::SeqCst) {
            return Err(scripted_failure("reply"));
        }
        self.replies.lock().unwrap().push((message.id, text.to_string()));
        Ok(())
    }

    async fn delete_message(&self, message: &ChatMessage) -> TransportResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(scripted_failure("delete"));
        }
        if self.messages.lock().unwrap().remove(&message.id).is_none() {
            return Err(TransportError::new(TransportErrorKind::MessageNotFound(
                message.id.get(),
            )));
        }
        self.deleted.lock().unwrap().push(message.id);
        Ok(())
    }
}
