//! UseCase 層のエラー定義

use thiserror::Error;

/// 接続受付時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 採番した接続 ID が既に登録されている（内部エラー）
    #[error("connection id '{0}' is already registered")]
    DuplicateConnectionId(String),
}
