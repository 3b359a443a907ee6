//! The chat room aggregate.

use hiroba_shared::time::format_clock_time;

use super::{
    entity::{ChatEvent, Connection},
    error::RegistryError,
    history::HistoryRing,
    registry::ConnectionRegistry,
    value_object::{ConnectionId, EventId, Timestamp},
};

/// All shared state of the single chat room: who is connected, what was said
/// recently, and the event ID sequence.
///
/// The room is always accessed behind one lock, so every mutation of the
/// registry and the history is mutually exclusive.
#[derive(Debug, Default)]
pub struct ChatRoom {
    registry: ConnectionRegistry,
    history: HistoryRing,
    last_event_id: i64,
}

impl ChatRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room whose history keeps at most `history_capacity` events
    pub fn with_capacity(history_capacity: usize) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            history: HistoryRing::with_capacity(history_capacity),
            last_event_id: 0,
        }
    }

    /// Register a newly accepted connection in the Unjoined state.
    pub fn accept(&mut self, id: ConnectionId) -> Result<(), RegistryError> {
        self.registry.register(Connection::new(id))
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub(super) fn registry_mut(&mut self) -> &mut ConnectionRegistry {
        &mut self.registry
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// Append an accepted event to the history.
    pub fn record(&mut self, event: ChatEvent) {
        self.history.append(event);
    }

    /// Next event ID: the creation time in milliseconds, bumped past the
    /// previous ID when the clock stalls or steps back.
    pub(super) fn next_event_id(&mut self, now: Timestamp) -> EventId {
        let id = now.value().max(self.last_event_id + 1);
        self.last_event_id = id;
        EventId::new(id)
    }

    /// Human-readable wall-clock string for an event created at `now`.
    pub(super) fn clock_string(now: Timestamp) -> String {
        format_clock_time(now.value())
    }
}
