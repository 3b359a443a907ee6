//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: a read loop that feeds requests to the use
//! cases one at a time (so a connection's requests are never reordered), and a
//! pusher loop that drains the connection's outbound queue into the socket.
//!
//! Each request runs on its own task. Aborting the read loop during teardown
//! detaches that task instead of dropping it, so a transition that already
//! took the room lock always finishes.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Outbound, Request},
    infrastructure::dto::websocket::InboundFrame,
    ui::state::AppState,
};

const INVALID_REQUEST: &str = "Invalid request";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames addressed to this connection
/// * `sender` - WebSocket sink to send frames to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Parse a text frame and route it to the matching use case.
async fn handle_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let request = match serde_json::from_str::<InboundFrame>(text) {
        Ok(frame) => Request::from(frame),
        Err(e) => {
            tracing::warn!("Malformed frame from '{}': {}", connection_id, e);
            if let Err(e) = state
                .message_pusher
                .push_to(connection_id, &Outbound::Error(INVALID_REQUEST.to_string()))
                .await
            {
                tracing::debug!("Could not report malformed frame: {}", e);
            }
            return;
        }
    };

    let result = match request {
        Request::Join(name) => state.join_chat_usecase.execute(connection_id, name).await,
        Request::SendMessage(text) => {
            state
                .send_message_usecase
                .execute(connection_id, text)
                .await
        }
    };

    if let Err(e) = result {
        tracing::warn!("Rejected request from '{}': {}", connection_id, e);
    }
}

/// Handle one text frame on a detached task and wait for it to finish.
async fn process_text(state: Arc<AppState>, connection_id: ConnectionId, text: String) {
    let task = tokio::spawn(async move { handle_text(&state, &connection_id, &text).await });
    if let Err(e) = task.await {
        tracing::error!("Request task for '{}' failed: {}", connection_id, e);
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = match state.connect_participant_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };
    tracing::info!("New client connected: {}", connection_id);

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text);
                    process_text(state_clone.clone(), connection_id, text.as_str().to_owned())
                        .await;
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} bytes of binary data from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    });

    // Spawn a task to deliver queued frames to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let remaining = state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await;
    tracing::info!(
        "Client '{}' disconnected ({} connections remaining)",
        connection_id,
        remaining
    );
}
