//! UseCase テスト用のヘルパー

use std::sync::Arc;

use hiroba_shared::time::{Clock, FixedClock};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ChatRoom, ConnectionId, MessagePusher},
    infrastructure::{dto::websocket::OutboundFrame, message_pusher::WebSocketMessagePusher},
};

use super::{
    BroadcastFanout, ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinChatUseCase,
    SendMessageUseCase, SharedRoom,
};

pub const TEST_NOW: i64 = 1_700_000_000_000;

/// 実際の WebSocketMessagePusher とチャンネルで組み立てたユースケース一式
pub struct Harness {
    pub room: SharedRoom,
    pub connect: ConnectParticipantUseCase,
    pub join: JoinChatUseCase,
    pub send: SendMessageUseCase,
    pub disconnect: DisconnectParticipantUseCase,
}

/// テスト用の接続（ID と受信キュー）
pub struct TestClient {
    pub id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// これまでに届いたフレームをすべて取り出す
    pub fn drain(&mut self) -> Vec<OutboundFrame> {
        let mut frames = Vec::new();
        while let Ok(json) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&json).expect("server sent invalid JSON"));
        }
        frames
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_room(ChatRoom::new())
    }

    pub fn with_room(room: ChatRoom) -> Self {
        let room: SharedRoom = Arc::new(Mutex::new(room));
        let pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());
        let fanout = Arc::new(BroadcastFanout::new(pusher.clone()));
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(TEST_NOW));

        Self {
            connect: ConnectParticipantUseCase::new(room.clone(), pusher.clone()),
            join: JoinChatUseCase::new(room.clone(), fanout.clone(), clock.clone()),
            send: SendMessageUseCase::new(room.clone(), fanout.clone(), clock.clone()),
            disconnect: DisconnectParticipantUseCase::new(room.clone(), fanout, pusher, clock),
            room,
        }
    }

    /// 新しい接続を受け付ける
    pub async fn accept(&self) -> TestClient {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.connect.execute(tx).await.expect("accept failed");
        TestClient { id, rx }
    }

    /// 新しい接続を受け付けて参加させ、参加時に届いたフレームを捨てる
    pub async fn joined(&self, name: &str) -> TestClient {
        let mut client = self.accept().await;
        self.join
            .execute(&client.id, name.to_string())
            .await
            .expect("join failed");
        client.drain();
        client
    }
}
