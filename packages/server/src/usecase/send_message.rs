//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者を含む全参加者へのブロードキャストと履歴への追加
//!
//! ### なぜこのテストが必要か
//! - 参加前の送信や空メッセージが他の接続に影響しないことを保証する
//! - 履歴の上限（MAX_HISTORY）が守られることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：K 人の参加者に K 件配信、履歴は 1 件増える
//! - 異常系：参加前の送信、空白のみのメッセージ
//! - エッジケース：未参加の接続には配信されない、履歴の上限超過

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ConnectionId, SessionError, Timestamp};

use super::{SharedRoom, fanout::BroadcastFanout};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// ルーム（レジストリと履歴）
    room: SharedRoom,
    /// 配信
    fanout: Arc<BroadcastFanout>,
    /// 時計
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(room: SharedRoom, fanout: Arc<BroadcastFanout>, clock: Arc<dyn Clock>) -> Self {
        Self {
            room,
            fanout,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続 ID
    /// * `raw_text` - クライアントが送ってきた本文（トリム前）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_text: String,
    ) -> Result<(), SessionError> {
        let now = Timestamp::new(self.clock.now_millis());

        let mut room = self.room.lock().await;
        let outcome = room.send_message(connection_id, &raw_text, now);
        self.fanout.settle(&mut room, connection_id, outcome).await
    }
}
