//! WebSocket link to the control server
//!
//! Keeps one connection open, turning `TICK` messages into drip starts and
//! sending `DRIP_END` notifications back. A lost connection is retried with a
//! capped exponential delay; the animation keeps running meanwhile.

use std::time::Duration;

use displaydoc::Display;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::event::{DripEvent, EventSender};
use crate::message::ControlMessage;

/// Control link failures
#[derive(Debug, Display)]
pub enum ControlError {
    /// unable to connect to {0}: {1}
    Connect(String, tungstenite::Error),
    /// connection failed: {0}
    Transport(tungstenite::Error),
    /// unable to encode message: {0}
    Encode(serde_json::Error),
}

impl std::error::Error for ControlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connect(_, err) | Self::Transport(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Reconnect delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Delay after a connection that was up, and the first retry
    pub min: Duration,
    /// Upper bound for the doubling delay
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(250),
            max: Duration::from_secs(10),
        }
    }
}

impl Backoff {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Delay to use after `current` failed as well.
    pub fn next(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max).max(self.min)
    }
}

enum SessionEnd {
    /// The server closed the connection
    Closed,
    /// The notification queue was closed; the service is stopping
    Shutdown,
}

/// Client side of the control channel
#[derive(Debug, Clone)]
pub struct ControlLink {
    url: String,
    backoff: Backoff,
}

impl ControlLink {
    pub fn new(url: impl Into<String>, backoff: Backoff) -> Self {
        Self {
            url: url.into(),
            backoff,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stay connected until `outbound` is closed.
    ///
    /// Starts go to `events`; notifications from `outbound` go to the server.
    /// Notifications that pile up while disconnected are dropped.
    pub async fn run<const SIZE: usize>(
        &self,
        events: EventSender<'_, SIZE>,
        outbound: &mut UnboundedReceiver<ControlMessage>,
    ) {
        let mut delay = self.backoff.min;
        loop {
            if !discard_stale(outbound) {
                return;
            }

            let was_connected = match self.session(events, outbound).await {
                Ok(SessionEnd::Shutdown) => return,
                Ok(SessionEnd::Closed) => {
                    log::warn!("connection to {} closed", self.url);
                    true
                }
                Err(err @ ControlError::Connect(..)) => {
                    log::warn!("{err}");
                    false
                }
                Err(err) => {
                    log::warn!("{err}");
                    true
                }
            };
            if was_connected {
                delay = self.backoff.min;
            }

            log::info!("reconnecting in {delay:?}");
            tokio::time::sleep(delay).await;
            delay = self.backoff.next(delay);
        }
    }

    async fn session<const SIZE: usize>(
        &self,
        events: EventSender<'_, SIZE>,
        outbound: &mut UnboundedReceiver<ControlMessage>,
    ) -> Result<SessionEnd, ControlError> {
        let (mut socket, _) = tokio_tungstenite::connect_async(self.url.as_str())
            .await
            .map_err(|err| ControlError::Connect(self.url.clone(), err))?;
        log::info!("connected to {}", self.url);

        loop {
            tokio::select! {
                incoming = socket.next() => match incoming {
                    Some(Ok(Message::Text(text))) => forward(&text, events),
                    Some(Ok(Message::Close(_))) | None => return Ok(SessionEnd::Closed),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(ControlError::Transport(err)),
                },
                notification = outbound.recv() => {
                    let Some(message) = notification else {
                        let _ = socket.close(None).await;
                        return Ok(SessionEnd::Shutdown);
                    };
                    let json = message.to_json().map_err(ControlError::Encode)?;
                    log::debug!("sending {json}");
                    socket
                        .send(Message::Text(json))
                        .await
                        .map_err(ControlError::Transport)?;
                }
            }
        }
    }
}

/// Drop notifications queued while there was no connection.
///
/// Returns `false` once the queue is closed.
fn discard_stale(outbound: &mut UnboundedReceiver<ControlMessage>) -> bool {
    loop {
        match outbound.try_recv() {
            Ok(message) => log::warn!("dropping {message:?} queued while disconnected"),
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}

fn forward<const SIZE: usize>(text: &str, events: EventSender<'_, SIZE>) {
    match ControlMessage::parse(text) {
        Some(ControlMessage::Tick) => {
            if events.try_send(DripEvent::Start).is_err() {
                log::debug!("start already pending");
            }
        }
        Some(other) => log::trace!("ignoring {other:?}"),
        None => log::debug!("discarding malformed message: {text}"),
    }
}
