//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 各接続の `UnboundedSender` を管理
//! - ドメインの `Outbound` を JSON フレームに変換して送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket 自体は UI 層（`ui/handler/websocket.rs`）が保持し、
//! この実装は送信キューにフレームを積むだけです。キューは無制限なので
//! 送信は決してブロックせず、遅い受信者が他の接続を止めることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Outbound, PusherChannel},
    infrastructure::dto::websocket::OutboundFrame,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    /// Outbound を JSON 文字列にエンコード
    fn encode(outbound: &Outbound) -> Result<String, MessagePushError> {
        serde_json::to_string(&OutboundFrame::from(outbound))
            .map_err(|e| MessagePushError::Encode(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(client_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(client_id).is_some() {
            tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
        }
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        outbound: &Outbound,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(outbound)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(client_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed frame to client '{}'", client_id);
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, outbound: &Outbound) -> usize {
        let content = match Self::encode(outbound) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("{}", e);
                return 0;
            }
        };
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容（切断直後の接続は想定内）
                Some(sender) if sender.send(content.clone()).is_ok() => delivered += 1,
                _ => tracing::debug!("Client '{}' is gone, skipping broadcast", target),
            }
        }
        delivered
    }
}
