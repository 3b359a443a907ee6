//! Composition root: wires the room, the pusher and the use cases into a
//! ready-to-run [`Server`].

use std::sync::Arc;

use hiroba_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatRoom, MessagePusher},
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::{Server, state::AppState},
    usecase::{
        BroadcastFanout, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        JoinChatUseCase, SendMessageUseCase, SharedRoom,
    },
};

/// Build a server with a fresh, empty room.
///
/// Every call creates independent state, so several servers can run in one
/// process without interfering.
pub fn build_server(clock: Arc<dyn Clock>) -> Server {
    // 1. Room (registry + history behind one lock)
    let room: SharedRoom = Arc::new(Mutex::new(ChatRoom::new()));

    // 2. MessagePusher (WebSocket implementation) and fan-out
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());
    let fanout = Arc::new(BroadcastFanout::new(message_pusher.clone()));

    // 3. UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        room.clone(),
        message_pusher.clone(),
    ));
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(
        room.clone(),
        fanout.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        room.clone(),
        fanout.clone(),
        clock.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        room,
        fanout,
        message_pusher.clone(),
        clock,
    ));

    // 4. Server
    Server::new(AppState {
        connect_participant_usecase,
        join_chat_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
        message_pusher,
    })
}
