//! MessagePusher trait 定義
//!
//! ドメイン層が必要とする「接続へのメッセージ送信」のインターフェースです。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, session::Outbound, value_object::ConnectionId};

/// 各接続の送信キュー（WebSocket の送信タスクへ JSON 文字列を渡す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 送信はすべて非ブロッキングで、ある接続への送信失敗が他の接続への送信を
/// 妨げることはありません。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信キューを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信キューを登録解除（存在しなくてもエラーにしない）
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 特定の接続にフレームを送信
    async fn push_to(
        &self,
        client_id: &ConnectionId,
        outbound: &Outbound,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に同じフレームを送信
    ///
    /// 一部の送信失敗は許容し、実際に送信できた接続数を返す。
    async fn broadcast(&self, targets: Vec<ConnectionId>, outbound: &Outbound) -> usize;
}
