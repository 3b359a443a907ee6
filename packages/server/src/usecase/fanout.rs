//! Broadcast fan-out: executes the emissions produced by the session protocol.
//!
//! Every delivery is independent and best effort. A target that closed a
//! moment ago is skipped without surfacing an error, and an accepted event is
//! recorded in history exactly once however many targets actually got it.

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRoom, ConnectionId, DeliveryPolicy, Emission, MessagePusher, Outbound,
    SessionError,
};

pub struct BroadcastFanout {
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastFanout {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Deliver `event` to the live connections selected by `policy`, then
    /// append it to history. Returns the number of successful deliveries.
    ///
    /// Must be called with the room lock held.
    pub async fn deliver(
        &self,
        room: &mut ChatRoom,
        event: ChatEvent,
        policy: DeliveryPolicy,
        sender: &ConnectionId,
    ) -> usize {
        let targets: Vec<ConnectionId> = room
            .registry()
            .snapshot()
            .into_iter()
            .filter(|c| policy.selects(c.id(), sender))
            .map(|c| *c.id())
            .collect();
        let target_count = targets.len();

        let delivered = self
            .message_pusher
            .broadcast(targets, &Outbound::Message(event.clone()))
            .await;
        tracing::debug!(
            "Delivered event {} to {}/{} connections",
            event.id().value(),
            delivered,
            target_count
        );

        room.record(event);
        delivered
    }

    /// Push a frame to a single connection. Failures are dropped.
    pub async fn send_direct(&self, to: &ConnectionId, outbound: Outbound) {
        if let Err(e) = self.message_pusher.push_to(to, &outbound).await {
            tracing::debug!("Dropped direct frame for '{}': {}", to, e);
        }
    }

    /// Execute emissions in order.
    pub async fn dispatch(&self, room: &mut ChatRoom, emissions: Vec<Emission>) {
        for emission in emissions {
            match emission {
                Emission::Direct { to, outbound } => self.send_direct(&to, outbound).await,
                Emission::Broadcast {
                    event,
                    policy,
                    sender,
                } => {
                    self.deliver(room, event, policy, &sender).await;
                }
            }
        }
    }

    /// Report a protocol error to the connection that caused it.
    pub async fn report_error(&self, origin: &ConnectionId, error: &SessionError) {
        if error.is_client_visible() {
            self.send_direct(origin, Outbound::Error(error.to_string()))
                .await;
        } else {
            tracing::debug!("Ignoring request from closed connection '{}'", origin);
        }
    }

    /// Execute a transition's outcome: emissions on success, an error frame
    /// to `origin` on failure.
    pub async fn settle(
        &self,
        room: &mut ChatRoom,
        origin: &ConnectionId,
        outcome: Result<Vec<Emission>, SessionError>,
    ) -> Result<(), SessionError> {
        match outcome {
            Ok(emissions) => {
                self.dispatch(room, emissions).await;
                Ok(())
            }
            Err(e) => {
                self.report_error(origin, &e).await;
                Err(e)
            }
        }
    }
}
