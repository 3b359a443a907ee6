//! UseCase: 参加（join）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - 参加者本人への履歴送信と、他の参加者への入室通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者（履歴は空）、二人目以降の参加者
//! - 異常系：空の名前、参加済み接続からの再参加
//! - エッジケース：同じ名前での複数参加（許容する）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ConnectionId, SessionError, Timestamp};

use super::{SharedRoom, fanout::BroadcastFanout};

/// 参加のユースケース
pub struct JoinChatUseCase {
    /// ルーム（レジストリと履歴）
    room: SharedRoom,
    /// 配信
    fanout: Arc<BroadcastFanout>,
    /// 時計
    clock: Arc<dyn Clock>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(room: SharedRoom, fanout: Arc<BroadcastFanout>, clock: Arc<dyn Clock>) -> Self {
        Self {
            room,
            fanout,
            clock,
        }
    }

    /// 参加を実行
    ///
    /// 失敗した場合、エラーは参加しようとした接続にだけ送信される。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `raw_name` - クライアントが送ってきた表示名（トリム前）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_name: String,
    ) -> Result<(), SessionError> {
        let now = Timestamp::new(self.clock.now_millis());

        let mut room = self.room.lock().await;
        let outcome = room.join(connection_id, &raw_name, now);
        self.fanout.settle(&mut room, connection_id, outcome).await
    }
}
