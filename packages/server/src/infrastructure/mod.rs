//! Infrastructure layer: wire format and the WebSocket message pusher.

pub mod dto;
pub mod message_pusher;
