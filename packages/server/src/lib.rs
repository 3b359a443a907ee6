//! Hiroba chat server.
//!
//! A single shared room: clients connect over WebSocket, join with a display
//! name, exchange short messages and see join/leave notices. The last
//! [`MAX_HISTORY`](domain::MAX_HISTORY) events are replayed to each newcomer.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// composition root
pub mod app;
