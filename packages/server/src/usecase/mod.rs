//! UseCase 層
//!
//! Server Loop の入力（接続・参加・送信・切断）ごとにユースケースを 1 つ用意し、
//! ドメインの遷移結果（`Emission`）を `BroadcastFanout` で実行します。
//!
//! ルーム（レジストリと履歴）は `SharedRoom` の単一ロックで保護され、
//! ロックを保持したまま配信までを行うため、全員が同じ順序でイベントを受け取ります。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod fanout;
pub mod join_chat;
pub mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::ChatRoom;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::ConnectError;
pub use fanout::BroadcastFanout;
pub use join_chat::JoinChatUseCase;
pub use send_message::SendMessageUseCase;

/// The room behind its single exclusion lock
pub type SharedRoom = Arc<Mutex<ChatRoom>>;
