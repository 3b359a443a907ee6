//! Data Transfer Objects (DTOs) for the chat application.
//!
//! - `websocket`: WebSocket frame DTOs
//! - `conversion`: DTO <-> domain conversions

pub mod conversion;
pub mod websocket;
