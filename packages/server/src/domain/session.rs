//! Session protocol: the per-connection state machine.
//!
//! ```text
//! Unjoined --join(name)--> Joined --disconnect--> Closed
//!     |                       |
//!     +------disconnect-------+--> Closed
//! ```
//!
//! Transitions never talk to a transport. They return [`Emission`]s that say
//! what goes to whom; executing them is the fan-out's job.

use super::{
    entity::ChatEvent,
    error::SessionError,
    room::ChatRoom,
    value_object::{ConnectionId, DisplayName, MessageText, Timestamp},
};

/// Requests a client can make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Claim a display name
    Join(String),
    /// Post a message to the room
    SendMessage(String),
}

/// A frame addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Full history replay, sent once after a successful join
    MessageHistory(Vec<ChatEvent>),
    /// A single event
    Message(ChatEvent),
    /// A human-readable error for the connection that caused it
    Error(String),
}

/// Which live connections receive a broadcast event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Every live connection, the sender included
    All,
    /// Every live connection except the sender
    AllExceptSender,
}

impl DeliveryPolicy {
    pub fn selects(&self, candidate: &ConnectionId, sender: &ConnectionId) -> bool {
        match self {
            DeliveryPolicy::All => true,
            DeliveryPolicy::AllExceptSender => candidate != sender,
        }
    }
}

/// Output of a protocol transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Deliver to one connection only. Not recorded in history.
    Direct { to: ConnectionId, outbound: Outbound },
    /// Deliver per policy and record in history.
    Broadcast {
        event: ChatEvent,
        policy: DeliveryPolicy,
        sender: ConnectionId,
    },
}

impl ChatRoom {
    /// `Unjoined --join(name)--> Joined`.
    ///
    /// On success the joiner gets the history as it was before the join, and
    /// everyone else gets a "joined" notice.
    pub fn join(
        &mut self,
        id: &ConnectionId,
        raw_name: &str,
        now: Timestamp,
    ) -> Result<Vec<Emission>, SessionError> {
        let connection = self.registry().get(id).ok_or(SessionError::Closed)?;
        if let Some(name) = connection.display_name() {
            return Err(SessionError::AlreadyJoined(name.as_str().to_string()));
        }
        let name = DisplayName::new(raw_name).map_err(|_| SessionError::EmptyIdentity)?;

        if self.registry().is_name_claimed(&name) {
            tracing::info!("Display name '{}' is now shared by several connections", name);
        }
        self.registry_mut()
            .bind(id, name.clone())
            .map_err(|_| SessionError::Closed)?;

        let history = self.history().all();
        let event_id = self.next_event_id(now);
        let notice = ChatEvent::joined_notice(event_id, &name, Self::clock_string(now));

        Ok(vec![
            Emission::Direct {
                to: *id,
                outbound: Outbound::MessageHistory(history),
            },
            Emission::Broadcast {
                event: notice,
                policy: DeliveryPolicy::AllExceptSender,
                sender: *id,
            },
        ])
    }

    /// `Joined --sendMessage(text)--> Joined`.
    pub fn send_message(
        &mut self,
        id: &ConnectionId,
        raw_text: &str,
        now: Timestamp,
    ) -> Result<Vec<Emission>, SessionError> {
        let connection = self.registry().get(id).ok_or(SessionError::Closed)?;
        let author = connection
            .display_name()
            .cloned()
            .ok_or(SessionError::NotJoined)?;
        let text = MessageText::new(raw_text).map_err(|_| SessionError::EmptyMessage)?;

        let event_id = self.next_event_id(now);
        let event = ChatEvent::user_message(event_id, &author, text, Self::clock_string(now));

        Ok(vec![Emission::Broadcast {
            event,
            policy: DeliveryPolicy::All,
            sender: *id,
        }])
    }

    /// `* --disconnect--> Closed`.
    ///
    /// Removes the connection. Only a connection that had joined produces a
    /// "left" notice, and only the first disconnect for an ID does anything.
    pub fn disconnect(&mut self, id: &ConnectionId, now: Timestamp) -> Vec<Emission> {
        let Some(mut connection) = self.registry_mut().unregister(id) else {
            tracing::debug!("Connection '{}' already removed, ignoring disconnect", id);
            return Vec::new();
        };
        connection.close();

        match connection.display_name() {
            Some(name) => {
                let event_id = self.next_event_id(now);
                let notice = ChatEvent::left_notice(event_id, name, Self::clock_string(now));
                vec![Emission::Broadcast {
                    event: notice,
                    policy: DeliveryPolicy::All,
                    sender: *id,
                }]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{entity::EventKind, value_object::ConnectionIdFactory};

    const NOW: Timestamp = Timestamp::new(1_700_000_000_000);

    fn room_with(count: usize) -> (ChatRoom, Vec<ConnectionId>) {
        let mut room = ChatRoom::new();
        let ids: Vec<ConnectionId> = (0..count).map(|_| ConnectionIdFactory::generate()).collect();
        for id in &ids {
            room.accept(*id).unwrap();
        }
        (room, ids)
    }

    fn broadcast_event(emission: &Emission) -> (&ChatEvent, DeliveryPolicy) {
        match emission {
            Emission::Broadcast { event, policy, .. } => (event, *policy),
            other => panic!("expected broadcast, got {:?}", other),
        }
    }

    #[test]
    fn test_join_replays_history_then_notifies_others() {
        // テスト項目: 参加すると本人に履歴、他の参加者に入室通知が出力される
        // given (前提条件):
        let (mut room, ids) = room_with(1);

        // when (操作):
        let emissions = room.join(&ids[0], "  carol ", NOW).unwrap();

        // then (期待する結果):
        assert_eq!(emissions.len(), 2);
        assert_eq!(
            emissions[0],
            Emission::Direct {
                to: ids[0],
                outbound: Outbound::MessageHistory(vec![]),
            }
        );
        let (notice, policy) = broadcast_event(&emissions[1]);
        assert_eq!(policy, DeliveryPolicy::AllExceptSender);
        assert_eq!(notice.text(), "carol joined the chat");
        assert_eq!(notice.display_name(), "System");
        assert_eq!(notice.kind(), EventKind::SystemNotice);
        assert_eq!(
            room.registry().get(&ids[0]).unwrap().display_name().unwrap().as_str(),
            "carol"
        );
    }

    #[test]
    fn test_join_with_blank_name_is_rejected() {
        // テスト項目: 空白のみの名前での参加は EmptyIdentity で、状態は変わらない
        // given (前提条件):
        let (mut room, ids) = room_with(1);

        // when (操作):
        let result = room.join(&ids[0], "   ", NOW);

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::EmptyIdentity));
        assert!(!room.registry().get(&ids[0]).unwrap().is_joined());
    }

    #[test]
    fn test_join_twice_is_rejected() {
        // テスト項目: 参加済みの接続からの再参加は AlreadyJoined になり、名前は変わらない
        // given (前提条件):
        let (mut room, ids) = room_with(1);
        room.join(&ids[0], "carol", NOW).unwrap();

        // when (操作):
        let result = room.join(&ids[0], "mallory", NOW);

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::AlreadyJoined("carol".to_string())));
    }

    #[test]
    fn test_send_before_join_is_rejected() {
        // テスト項目: 参加前のメッセージ送信は NotJoined になる
        // given (前提条件):
        let (mut room, ids) = room_with(1);

        // when (操作):
        let result = room.send_message(&ids[0], "hi", NOW);

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::NotJoined));
    }

    #[test]
    fn test_send_message_is_trimmed_and_broadcast_to_all() {
        // テスト項目: 送信メッセージは前後の空白が除かれ、送信者を含む全員宛てになる
        // given (前提条件):
        let (mut room, ids) = room_with(1);
        room.join(&ids[0], "carol", NOW).unwrap();

        // when (操作):
        let emissions = room.send_message(&ids[0], "  hello  ", NOW).unwrap();

        // then (期待する結果):
        assert_eq!(emissions.len(), 1);
        let (event, policy) = broadcast_event(&emissions[0]);
        assert_eq!(policy, DeliveryPolicy::All);
        assert_eq!(event.text(), "hello");
        assert_eq!(event.display_name(), "carol");
        assert_eq!(event.kind(), EventKind::UserMessage);
    }

    #[test]
    fn test_send_blank_message_is_rejected() {
        // テスト項目: 空白のみのメッセージは EmptyMessage になる
        // given (前提条件):
        let (mut room, ids) = room_with(1);
        room.join(&ids[0], "carol", NOW).unwrap();

        // when (操作):
        let result = room.send_message(&ids[0], "   ", NOW);

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::EmptyMessage));
    }

    #[test]
    fn test_requests_from_unknown_connection_are_closed() {
        // テスト項目: 未登録（切断済み）の接続からのリクエストは Closed になる
        // given (前提条件):
        let (mut room, _ids) = room_with(0);
        let ghost = ConnectionIdFactory::generate();

        // when (操作):
        let join = room.join(&ghost, "carol", NOW);
        let send = room.send_message(&ghost, "hi", NOW);

        // then (期待する結果):
        assert_eq!(join, Err(SessionError::Closed));
        assert_eq!(send, Err(SessionError::Closed));
    }

    #[test]
    fn test_disconnect_joined_emits_single_left_notice() {
        // テスト項目: 参加済み接続の切断は退室通知を一度だけ出力する（冪等性）
        // given (前提条件):
        let (mut room, ids) = room_with(2);
        room.join(&ids[0], "carol", NOW).unwrap();
        room.join(&ids[1], "dave", NOW).unwrap();

        // when (操作):
        let first = room.disconnect(&ids[1], NOW);
        let second = room.disconnect(&ids[1], NOW);

        // then (期待する結果):
        assert_eq!(first.len(), 1);
        let (notice, policy) = broadcast_event(&first[0]);
        assert_eq!(notice.text(), "dave left the chat");
        assert_eq!(policy, DeliveryPolicy::All);
        assert!(second.is_empty());
        assert_eq!(room.registry().len(), 1);
    }

    #[test]
    fn test_disconnect_unjoined_emits_nothing() {
        // テスト項目: 未参加の接続の切断では通知を出さず、登録だけ解除される
        // given (前提条件):
        let (mut room, ids) = room_with(1);

        // when (操作):
        let emissions = room.disconnect(&ids[0], NOW);

        // then (期待する結果):
        assert!(emissions.is_empty());
        assert!(room.registry().is_empty());
    }

    #[test]
    fn test_join_history_excludes_own_notice() {
        // テスト項目: 参加時に受け取る履歴には自分の入室通知が含まれない
        // given (前提条件):
        let (mut room, ids) = room_with(2);
        let first = room.join(&ids[0], "alice", NOW).unwrap();
        if let Emission::Broadcast { event, .. } = &first[1] {
            room.record(event.clone());
        }

        // when (操作):
        let emissions = room.join(&ids[1], "bob", NOW).unwrap();

        // then (期待する結果):
        match &emissions[0] {
            Emission::Direct {
                outbound: Outbound::MessageHistory(history),
                ..
            } => {
                assert_eq!(history.len(), 1);
                assert_eq!(history[0].text(), "alice joined the chat");
            }
            other => panic!("expected history, got {:?}", other),
        }
    }

    #[test]
    fn test_delivery_policy_selection() {
        // テスト項目: 配信ポリシーごとに送信者が対象に含まれるかが決まる
        let sender = ConnectionIdFactory::generate();
        let other = ConnectionIdFactory::generate();
        assert!(DeliveryPolicy::All.selects(&sender, &sender));
        assert!(DeliveryPolicy::All.selects(&other, &sender));
        assert!(!DeliveryPolicy::AllExceptSender.selects(&sender, &sender));
        assert!(DeliveryPolicy::AllExceptSender.selects(&other, &sender));
    }
}
