//! Server state shared by all connection handlers.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinChatUseCase,
        SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// JoinChatUseCase（参加のユースケース）
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// MessagePusher（不正なフレームへのエラー応答に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
}
