//! WebSocket upgrade handler for the showtime realtime channel.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use cineseat_realtime::{ConnectionHandle, InboundMessage};

use crate::state::AppState;

/// GET /ws — WebSocket upgrade.
///
/// Viewing a seat map requires no identity; the connection only joins
/// and leaves showtime rooms.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut outbound_rx) = mpsc::channel(state.config.realtime.channel_buffer_size);
    let handle = Arc::new(ConnectionHandle::new(tx));
    let conn_id = state.gateway.register(handle);

    info!(connection_id = %conn_id, "WebSocket connection established");

    // Forward gateway messages to the socket as JSON text frames.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let Ok(json) = serde_json::to_string(&msg) else {
                continue;
            };
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<InboundMessage>(text.as_str())
            {
                Ok(InboundMessage::JoinShowtime { showtime_id }) => {
                    if let Err(e) = state.gateway.join(conn_id, showtime_id).await {
                        warn!(connection_id = %conn_id, error = %e, "Join failed");
                        state
                            .gateway
                            .send_error(conn_id, "failed to join showtime")
                            .await;
                    }
                }
                Ok(InboundMessage::LeaveShowtime { showtime_id }) => {
                    state.gateway.leave(conn_id, showtime_id).await;
                }
                Err(_) => {
                    state.gateway.send_error(conn_id, "unrecognized message").await;
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(connection_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Disconnection never releases holds; the lock TTL reclaims them.
    outbound_task.abort();
    state.gateway.unregister(conn_id);

    info!(connection_id = %conn_id, "WebSocket connection closed");
}
