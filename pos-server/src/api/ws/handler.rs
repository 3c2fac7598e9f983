//! WebSocket Handlers

use std::net::SocketAddr;

use axum::Extension;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use shared::message::DisplayTopic;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

type PeerAddr = Option<Extension<ConnectInfo<SocketAddr>>>;

/// GET /ws/orders
pub async fn orders_ws(
    State(state): State<ServerState>,
    peer: PeerAddr,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let addr = peer.map(|Extension(ConnectInfo(addr))| addr);
    ws.on_upgrade(move |socket| handle_display(socket, state, DisplayTopic::Orders, addr))
}

/// GET /ws/kitchen
pub async fn kitchen_ws(
    State(state): State<ServerState>,
    peer: PeerAddr,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let addr = peer.map(|Extension(ConnectInfo(addr))| addr);
    ws.on_upgrade(move |socket| handle_display(socket, state, DisplayTopic::Kitchen, addr))
}

async fn handle_display(
    socket: WebSocket,
    state: ServerState,
    topic: DisplayTopic,
    addr: Option<SocketAddr>,
) {
    // 先订阅再登记，登记之后的变化不会漏掉
    let mut rx = state.bus.subscribe(topic);
    let display_id = state.bus.register(topic, addr);
    let shutdown = state.bus.shutdown_token().clone();
    let (mut ws_sink, mut ws_stream) = socket.split();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                let _ = ws_sink.send(Message::Close(None)).await;
                break;
            }
            // Outgoing notification
            msg = rx.recv() => {
                match msg {
                    Ok(text) => {
                        if ws_sink.send(Message::Text(text.to_string().into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(display_id, %topic, skipped, "Display lagging, oldest messages dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            // Incoming frame from display
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::warn!(display_id, %topic, "WebSocket error: {e}");
                        break;
                    }
                    _ => {} // Text, Binary, Pong: ignored
                }
            }
        }
    }

    state.bus.unregister(display_id);
}
