//! Shared relay state.
//!
//! DESIGN
//! ======
//! The relay is stateless with respect to canvas content: it never stores
//! drawing data and never inspects event payloads. The only shared state is
//! the connection map, one outbound text queue per attached client. Fan-out
//! reads the map; connect and disconnect write it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the inner map is Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    /// Connected clients keyed by connection id, each holding the sender
    /// side of that client's outbound queue. The socket task drains the
    /// receiver side.
    pub clients: Arc<RwLock<HashMap<Uuid, mpsc::Sender<String>>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { clients: Arc::new(RwLock::new(HashMap::new())) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
