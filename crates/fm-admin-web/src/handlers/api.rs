//! Live unseen-booking updates and health check

use crate::state::AppState;
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use fm_admin_client::UnseenBookingsPoller;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::{debug, info};

/// Keep-alive period for idle sockets
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// WebSocket feeding the sidebar's unseen-booking badge
pub async fn unseen_socket(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| unseen_connection(socket, state))
}

/// Push the unseen count while the page stays open
///
/// The poller belongs to the connection and is stopped when the page goes
/// away.
async fn unseen_connection(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let poller = UnseenBookingsPoller::new(
        state.api_client.clone(),
        state.config.polling.unseen_interval(),
    );
    let handle = poller.start();
    let mut counts = handle.subscribe();
    let mut ping_interval = interval(PING_INTERVAL);

    info!("Unseen-booking socket opened");

    loop {
        tokio::select! {
            changed = counts.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = *counts.borrow_and_update();
                if let Some(count) = latest {
                    let update = serde_json::json!({
                        "type": "unseen",
                        "count": count
                    });

                    if sender.send(Message::Text(update.to_string())).await.is_err() {
                        break;
                    }
                }
            }
            _ = ping_interval.tick() => {
                if sender.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    handle.stop().await;
    info!("Unseen-booking socket closed");
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
