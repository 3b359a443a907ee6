//! Bounded history of recent chat events.

use std::collections::VecDeque;

use super::entity::ChatEvent;

/// Number of events kept for replay to newly joined connections.
pub const MAX_HISTORY: usize = 20;

/// FIFO buffer holding at most `capacity` events, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    events: VecDeque<ChatEvent>,
    capacity: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRing {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push to the tail, evicting from the head past capacity.
    pub fn append(&mut self, event: ChatEvent) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    /// Copy of the contents in insertion order.
    pub fn all(&self) -> Vec<ChatEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
