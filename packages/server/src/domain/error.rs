//! Domain errors.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Display name is empty after trimming
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// Message text is empty after trimming
    #[error("message text must not be empty")]
    EmptyMessageText,
}

/// Connection registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A connection with the same ID is already registered
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    /// No connection with this ID is registered
    #[error("connection '{0}' is not registered")]
    NotRegistered(String),

    /// The connection already has a display name
    #[error("connection '{0}' has already joined")]
    AlreadyJoined(String),
}

/// Session protocol errors.
///
/// The `Display` text of the client-visible variants is sent verbatim as the
/// payload of an `error` frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Join attempted with a blank name
    #[error("Username is required")]
    EmptyIdentity,

    /// Message sent before joining
    #[error("Please join with a username first")]
    NotJoined,

    /// Message text is blank
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// Join attempted by a connection that already has a name
    #[error("Already joined as '{0}'")]
    AlreadyJoined(String),

    /// The connection is unknown or already closed
    #[error("Connection is closed")]
    Closed,
}

impl SessionError {
    /// Whether this error is reported back to the originating connection.
    ///
    /// `Closed` is not: there is nobody left to report to.
    pub fn is_client_visible(&self) -> bool {
        !matches!(self, SessionError::Closed)
    }
}

/// Message push errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// Target connection has no registered channel
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// The channel to the connection is closed
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// The outbound frame could not be encoded
    #[error("failed to encode outbound frame: {0}")]
    Encode(String),
}
