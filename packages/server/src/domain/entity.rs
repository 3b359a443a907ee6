//! Domain entities.

use super::{
    error::RegistryError,
    value_object::{ConnectionId, DisplayName, EventId, MessageText},
};

/// Author name used for presence notices.
pub const SYSTEM_AUTHOR: &str = "System";

/// Lifecycle state of a connection's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepted, no display name yet
    Unjoined,
    /// Display name bound
    Joined,
    /// Terminal
    Closed,
}

/// A live connection as tracked by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    display_name: Option<DisplayName>,
    state: SessionState,
}

impl Connection {
    /// A freshly accepted, unjoined connection.
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            display_name: None,
            state: SessionState::Unjoined,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_joined(&self) -> bool {
        self.state == SessionState::Joined
    }

    /// Bind a display name. A name, once set, never changes.
    pub fn join(&mut self, name: DisplayName) -> Result<(), RegistryError> {
        if self.state != SessionState::Unjoined {
            return Err(RegistryError::AlreadyJoined(self.id.to_string()));
        }
        self.display_name = Some(name);
        self.state = SessionState::Joined;
        Ok(())
    }

    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }
}

/// Kind of a chat event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UserMessage,
    SystemNotice,
}

/// An immutable chat event: either a user's message or a presence notice.
///
/// `text` is never blank: user messages carry a validated [`MessageText`],
/// notices are built from a validated [`DisplayName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    id: EventId,
    display_name: String,
    text: String,
    timestamp: String,
    kind: EventKind,
}

impl ChatEvent {
    pub fn user_message(
        id: EventId,
        author: &DisplayName,
        text: MessageText,
        timestamp: String,
    ) -> Self {
        Self {
            id,
            display_name: author.as_str().to_string(),
            text: text.into_string(),
            timestamp,
            kind: EventKind::UserMessage,
        }
    }

    /// "<name> joined the chat"
    pub fn joined_notice(id: EventId, who: &DisplayName, timestamp: String) -> Self {
        Self::system_notice(id, format!("{} joined the chat", who), timestamp)
    }

    /// "<name> left the chat"
    pub fn left_notice(id: EventId, who: &DisplayName, timestamp: String) -> Self {
        Self::system_notice(id, format!("{} left the chat", who), timestamp)
    }

    fn system_notice(id: EventId, text: String, timestamp: String) -> Self {
        Self {
            id,
            display_name: SYSTEM_AUTHOR.to_string(),
            text,
            timestamp,
            kind: EventKind::SystemNotice,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}
