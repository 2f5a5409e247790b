//! WebSocket session layer for drawing clients.
//!
//! `DrawingSocket` owns one socket task driving a duplex connection:
//! outbound events are queued fire-and-forget, inbound text is decoded and
//! surfaced through `recv`. There is no reconnect. When the transport drops,
//! the task ends and `recv` drains whatever already arrived, then returns
//! `None`; callers decide whether to dial again.

use events::{DrawingEvent, decode_event, encode_event};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::warn;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Error type for session establishment. Once a session is up, transport
/// failures surface as an ended stream rather than errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The base URL could not be converted to a WebSocket URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// The WebSocket connection or handshake failed.
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
}

/// Convert an HTTP base URL into the relay's WebSocket endpoint.
///
/// # Errors
///
/// Returns [`SessionError::InvalidBaseUrl`] when the URL carries neither an
/// `http://` nor an `https://` scheme.
pub fn ws_url(base_url: &str) -> Result<String, SessionError> {
    let trimmed = base_url.trim_end_matches('/');

    if let Some(rest) = trimmed.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws"));
    }
    if let Some(rest) = trimmed.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws"));
    }

    Err(SessionError::InvalidBaseUrl(base_url.to_owned()))
}

/// One duplex drawing session over a WebSocket.
pub struct DrawingSocket {
    outbound: mpsc::Sender<String>,
    inbound: mpsc::Receiver<DrawingEvent>,
    task: JoinHandle<()>,
}

impl DrawingSocket {
    /// Connect to a relay WebSocket endpoint (`ws://...` or `wss://...`).
    ///
    /// # Errors
    ///
    /// Returns an error if the handshake fails. After establishment the
    /// session never errors; it only ends.
    pub async fn connect(url: &str) -> Result<Self, SessionError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| SessionError::Connect(Box::new(e)))?;

        let (outbound_tx, outbound_rx) = mpsc::channel(256);
        let (inbound_tx, inbound_rx) = mpsc::channel(256);
        let task = tokio::spawn(run_socket(stream, outbound_rx, inbound_tx));

        Ok(Self { outbound: outbound_tx, inbound: inbound_rx, task })
    }

    /// Queue an event for sending. Fire-and-forget: returns whether the
    /// session still accepts traffic.
    #[must_use]
    pub fn send(&self, event: &DrawingEvent) -> bool {
        self.outbound.try_send(encode_event(event)).is_ok()
    }

    /// Next decoded inbound event, or `None` once the session has ended and
    /// everything already received was drained.
    pub async fn recv(&mut self) -> Option<DrawingEvent> {
        self.inbound.recv().await
    }

    /// Flush queued events and shut the session down.
    pub async fn close(self) {
        drop(self.outbound);
        let _ = self.task.await;
    }
}

/// Socket task: one loop interleaving outbound writes and inbound reads.
/// Ends on transport close or error, or when the owning `DrawingSocket` is
/// gone and the outbound queue has drained.
async fn run_socket(
    mut stream: WsStream,
    mut outbound_rx: mpsc::Receiver<String>,
    inbound_tx: mpsc::Sender<DrawingEvent>,
) {
    loop {
        tokio::select! {
            msg = stream.next() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => match decode_event(text.as_str()) {
                        Ok(event) => {
                            if inbound_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(error) => {
                            warn!(%error, "dropping undecodable frame");
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            outbound = outbound_rx.recv() => {
                let Some(text) = outbound else { break };
                if stream.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = stream.close(None).await;
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
