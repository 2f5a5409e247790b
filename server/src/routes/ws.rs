//! WebSocket handler — drawing event relay.
//!
//! DESIGN
//! ======
//! On upgrade, generates a connection id and enters a `select!` loop:
//! - Inbound client text, routed by envelope channel, fans out to peers
//! - Broadcast text from peers is forwarded to this client
//!
//! The relay never parses event payloads: it probes the envelope for the
//! channel name and forwards the original text untouched, so peers receive
//! exactly the sender's bytes.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade: attach the connection's outbound queue to the hub
//! 2. Client sends drawing frames: broadcast to every other connection
//! 3. Close or transport error: detach, then the loop ends

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use events::{DRAWING_CHANNEL, peek_channel};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::hub;
use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();

    // Per-connection queue for wire text broadcast by peers.
    let (client_tx, mut client_rx) = mpsc::channel::<String>(256);
    hub::attach(&state, client_id, client_tx).await;

    info!(%client_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        process_inbound_text(&state, client_id, &text).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(text) = client_rx.recv() => {
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    // Unregister before returning so no later broadcast can see this
    // connection.
    hub::detach(&state, client_id).await;
    info!(%client_id, "ws: client disconnected");
}

// =============================================================================
// INBOUND
// =============================================================================

/// Route one inbound text frame. Drawing traffic fans out to every other
/// connection; anything else is dropped with a warning and the connection
/// stays open.
///
/// Split from the socket loop so tests can drive routing against registered
/// queues without a live websocket.
async fn process_inbound_text(state: &AppState, client_id: Uuid, text: &str) {
    match peek_channel(text) {
        Some(channel) if channel == DRAWING_CHANNEL => {
            hub::broadcast(state, text, Some(client_id)).await;
        }
        Some(channel) => {
            warn!(%client_id, %channel, "ws: frame on unknown channel dropped");
        }
        None => {
            warn!(%client_id, "ws: unparseable frame dropped");
        }
    }
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
