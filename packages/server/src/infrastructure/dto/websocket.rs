//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum InboundFrame {
    /// `{"event":"join","data":"alice"}`
    Join(Option<String>),
    /// `{"event":"sendMessage","data":{"message":"hi"}}`
    SendMessage(Option<SendMessagePayload>),
}

/// Payload of a `sendMessage` frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum OutboundFrame {
    MessageHistory(Vec<ChatEventDto>),
    Message(ChatEventDto),
    Error(String),
}

/// Event type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    User,
    System,
}

/// One chat event as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEventDto {
    pub id: i64,
    pub username: String,
    pub message: String,
    /// Wall-clock time, `HH:MM`
    pub timestamp: String,
    pub r#type: EventType,
}
