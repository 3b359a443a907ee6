//! Conversion logic between DTOs and domain types.

use crate::domain::{ChatEvent, EventKind, Outbound, Request};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::InboundFrame> for Request {
    fn from(frame: dto::InboundFrame) -> Self {
        match frame {
            dto::InboundFrame::Join(name) => Request::Join(name.unwrap_or_default()),
            dto::InboundFrame::SendMessage(payload) => Request::SendMessage(
                payload
                    .and_then(|payload| payload.message)
                    .unwrap_or_default(),
            ),
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<EventKind> for dto::EventType {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::UserMessage => dto::EventType::User,
            EventKind::SystemNotice => dto::EventType::System,
        }
    }
}

impl From<&ChatEvent> for dto::ChatEventDto {
    fn from(event: &ChatEvent) -> Self {
        Self {
            id: event.id().value(),
            username: event.display_name().to_string(),
            message: event.text().to_string(),
            timestamp: event.timestamp().to_string(),
            r#type: event.kind().into(),
        }
    }
}

impl From<&Outbound> for dto::OutboundFrame {
    fn from(outbound: &Outbound) -> Self {
        match outbound {
            Outbound::MessageHistory(events) => {
                dto::OutboundFrame::MessageHistory(events.iter().map(Into::into).collect())
            }
            Outbound::Message(event) => dto::OutboundFrame::Message(event.into()),
            Outbound::Error(message) => dto::OutboundFrame::Error(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, EventId, MessageText};

    #[test]
    fn test_missing_payloads_become_empty_requests() {
        // テスト項目: ペイロードが欠けたフレームは空文字列のリクエストになる
        assert_eq!(
            Request::from(dto::InboundFrame::Join(None)),
            Request::Join(String::new())
        );
        assert_eq!(
            Request::from(dto::InboundFrame::SendMessage(None)),
            Request::SendMessage(String::new())
        );
        assert_eq!(
            Request::from(dto::InboundFrame::SendMessage(Some(
                dto::SendMessagePayload { message: None }
            ))),
            Request::SendMessage(String::new())
        );
    }

    #[test]
    fn test_inbound_frames_map_to_requests() {
        // テスト項目: join / sendMessage フレームがそのままリクエストに変換される（トリムはドメイン側）
        assert_eq!(
            Request::from(dto::InboundFrame::Join(Some(" carol ".to_string()))),
            Request::Join(" carol ".to_string())
        );
        assert_eq!(
            Request::from(dto::InboundFrame::SendMessage(Some(
                dto::SendMessagePayload {
                    message: Some("hi".to_string())
                }
            ))),
            Request::SendMessage("hi".to_string())
        );
    }

    #[test]
    fn test_domain_event_to_dto() {
        // テスト項目: ドメインのイベントが DTO に変換される
        // given (前提条件):
        let event = ChatEvent::user_message(
            EventId::new(1000),
            &DisplayName::new("carol").unwrap(),
            MessageText::new("hi").unwrap(),
            "08:15".to_string(),
        );

        // when (操作):
        let dto_event: dto::ChatEventDto = (&event).into();

        // then (期待する結果):
        assert_eq!(dto_event.id, 1000);
        assert_eq!(dto_event.username, "carol");
        assert_eq!(dto_event.message, "hi");
        assert_eq!(dto_event.timestamp, "08:15");
        assert_eq!(dto_event.r#type, dto::EventType::User);
    }

    #[test]
    fn test_outbound_to_frame() {
        // テスト項目: Outbound の各種別が対応するフレームに変換される
        // given (前提条件):
        let notice = ChatEvent::joined_notice(
            EventId::new(1),
            &DisplayName::new("dave").unwrap(),
            "10:00".to_string(),
        );

        // when (操作):
        let history = dto::OutboundFrame::from(&Outbound::MessageHistory(vec![notice.clone()]));
        let message = dto::OutboundFrame::from(&Outbound::Message(notice));
        let error = dto::OutboundFrame::from(&Outbound::Error("oops".to_string()));

        // then (期待する結果):
        match history {
            dto::OutboundFrame::MessageHistory(events) => {
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].r#type, dto::EventType::System);
            }
            other => panic!("unexpected frame {:?}", other),
        }
        match message {
            dto::OutboundFrame::Message(event) => {
                assert_eq!(event.message, "dave joined the chat")
            }
            other => panic!("unexpected frame {:?}", other),
        }
        assert_eq!(error, dto::OutboundFrame::Error("oops".to_string()));
    }
}
