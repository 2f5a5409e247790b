//! Connection registry and fan-out.
//!
//! DESIGN
//! ======
//! Pure routing: the hub tracks which connections are attached and pushes
//! wire text into their outbound queues. It never parses event payloads and
//! never buffers; a message a peer cannot take right now is gone.

use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

// =============================================================================
// ATTACH / DETACH
// =============================================================================

/// Register a connection's outbound sender under its id.
pub async fn attach(state: &AppState, client_id: Uuid, tx: mpsc::Sender<String>) {
    let mut clients = state.clients.write().await;
    clients.insert(client_id, tx);
    info!(%client_id, connected = clients.len(), "client attached");
}

/// Remove a connection. Subsequent broadcasts no longer see it.
pub async fn detach(state: &AppState, client_id: Uuid) {
    let mut clients = state.clients.write().await;
    clients.remove(&client_id);
    info!(%client_id, connected = clients.len(), "client detached");
}

// =============================================================================
// BROADCAST
// =============================================================================

/// Forward wire text to every connection except `exclude`.
///
/// The text is pushed as-is, so receivers get exactly the sender's bytes.
pub async fn broadcast(state: &AppState, text: &str, exclude: Option<Uuid>) {
    let clients = state.clients.read().await;
    for (client_id, tx) in &*clients {
        if exclude == Some(*client_id) {
            continue;
        }
        // Best-effort: if a client's queue is full, skip it.
        let _ = tx.try_send(text.to_owned());
    }
}

#[cfg(test)]
#[path = "hub_test.rs"]
mod tests;
