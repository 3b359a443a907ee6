//! UseCase: 接続受付処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続が未参加状態で登録される
//! - 正常系：接続ごとに異なる ID が採番される

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel};

use super::{SharedRoom, error::ConnectError};

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    /// ルーム（レジストリと履歴）
    room: SharedRoom,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(room: SharedRoom, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            room,
            message_pusher,
        }
    }

    /// 接続受付を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 採番された接続 ID
    /// * `Err(ConnectError)` - 接続 ID の衝突（内部エラー）
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let id = ConnectionIdFactory::generate();

        let mut room = self.room.lock().await;
        room.accept(id)
            .map_err(|_| ConnectError::DuplicateConnectionId(id.to_string()))?;
        self.message_pusher.register_client(id, sender).await;

        Ok(id)
    }
}
