//! Message timeline — the ordered conversation log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Agent,
}

/// A single timeline entry.
///
/// Immutable once appended. The one exception is the transient typing
/// placeholder (`is_typing = true`), which is removed outright when the
/// real agent reply is ready — never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_typing: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, false)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Agent, false)
    }

    /// Transient placeholder shown while a reply is being generated.
    pub fn typing() -> Self {
        Self::new(String::new(), Sender::Agent, true)
    }

    fn new(text: impl Into<String>, sender: Sender, is_typing: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            is_typing,
        }
    }
}

/// Append-only sequence of messages; insertion order is display order.
///
/// The only removal ever performed is dropping the typing placeholder.
#[derive(Debug, Default)]
pub struct Timeline {
    messages: Vec<Message>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its id.
    pub fn push(&mut self, message: Message) -> Uuid {
        let id = message.id;
        debug!(id = %id, sender = ?message.sender, typing = message.is_typing, "Message appended");
        self.messages.push(message);
        id
    }

    /// Remove the typing placeholder, if present.
    ///
    /// Returns whether one was removed. There is never more than one,
    /// enforced by the session's in-flight guard.
    pub fn remove_typing(&mut self) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_typing);
        before != self.messages.len()
    }

    /// Replace the typing placeholder with a real agent reply.
    pub fn resolve_typing(&mut self, reply: Message) -> Uuid {
        self.remove_typing();
        self.push(reply)
    }

    /// Whether a typing placeholder is currently displayed.
    pub fn has_typing(&self) -> bool {
        self.messages.iter().any(|m| m.is_typing)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
