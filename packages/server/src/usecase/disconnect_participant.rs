//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時の退室通知、レジストリと MessagePusher からの削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と残りの参加者への通知
//! - エッジケース：未参加の接続の切断（通知なし）
//! - エッジケース：同じ接続の二重切断（冪等）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, Timestamp};

use super::{SharedRoom, fanout::BroadcastFanout};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// ルーム（レジストリと履歴）
    room: SharedRoom,
    /// 配信
    fanout: Arc<BroadcastFanout>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 時計
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        room: SharedRoom,
        fanout: Arc<BroadcastFanout>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room,
            fanout,
            message_pusher,
            clock,
        }
    }

    /// 参加者切断を実行
    ///
    /// 二度目以降の呼び出しは何もしない。
    ///
    /// # Returns
    ///
    /// 切断後に残っている接続数
    pub async fn execute(&self, connection_id: &ConnectionId) -> usize {
        let now = Timestamp::new(self.clock.now_millis());

        let mut room = self.room.lock().await;
        let emissions = room.disconnect(connection_id, now);
        self.fanout.dispatch(&mut room, emissions).await;
        self.message_pusher.unregister_client(connection_id).await;

        room.registry().len()
    }
}
