//! Domain layer: connections, chat events, the shared room and the session
//! protocol that drives it.
//!
//! Nothing in this layer touches a transport. Outbound traffic is described
//! as [`Emission`]s and handed to the use-case layer, which talks to a
//! [`MessagePusher`].

pub mod entity;
pub mod error;
pub mod history;
pub mod message_pusher;
pub mod registry;
pub mod room;
pub mod session;
pub mod value_object;

pub use entity::{ChatEvent, Connection, EventKind, SYSTEM_AUTHOR, SessionState};
pub use error::{MessagePushError, RegistryError, SessionError, ValueObjectError};
pub use history::{HistoryRing, MAX_HISTORY};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use room::ChatRoom;
pub use session::{DeliveryPolicy, Emission, Outbound, Request};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, DisplayName, EventId, MessageText, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
