//! Connection registry: the set of live connections and their identities.

use std::collections::HashMap;

use super::{
    entity::Connection,
    error::RegistryError,
    value_object::{ConnectionId, DisplayName},
};

/// Live connections keyed by ID.
///
/// Owned by [`ChatRoom`](super::ChatRoom) and only ever mutated while the room
/// lock is held.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new connection. IDs must never collide.
    pub fn register(&mut self, connection: Connection) -> Result<(), RegistryError> {
        let id = *connection.id();
        if self.connections.contains_key(&id) {
            return Err(RegistryError::DuplicateConnection(id.to_string()));
        }
        self.connections.insert(id, connection);
        Ok(())
    }

    /// Move a registered connection from Unjoined to Joined.
    pub fn bind(&mut self, id: &ConnectionId, name: DisplayName) -> Result<(), RegistryError> {
        let connection = self
            .connections
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotRegistered(id.to_string()))?;
        connection.join(name)
    }

    /// Remove a connection. Removing an unknown ID is a no-op.
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Point-in-time copy of all live connections.
    pub fn snapshot(&self) -> Vec<Connection> {
        self.connections.values().cloned().collect()
    }

    /// Whether any live connection has joined under `name`.
    pub fn is_name_claimed(&self, name: &DisplayName) -> bool {
        self.connections
            .values()
            .any(|c| c.display_name() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
