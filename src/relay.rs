//! Control server: a broadcast relay with a periodic `TICK` pulse.
//!
//! Every text message a client sends is forwarded to all connected clients,
//! the sender included. Once per pulse period every client receives
//! `{"type":"TICK"}`.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message;

use crate::message::ControlMessage;

/// Default pulse period.
pub const DEFAULT_PULSE: Duration = Duration::from_secs(1);

/// Messages a slow client may fall behind before it starts skipping.
const BROADCAST_CAPACITY: usize = 64;

/// Bound relay server
pub struct Relay {
    listener: TcpListener,
    pulse: Duration,
}

impl Relay {
    pub async fn bind(addr: impl ToSocketAddrs, pulse: Duration) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, pulse })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept clients until the listener fails.
    ///
    /// Dropping the future disconnects every client.
    pub async fn run(self) -> io::Result<()> {
        let (messages, _) = broadcast::channel(BROADCAST_CAPACITY);
        log::info!(
            "relay listening on {}, pulse every {:?}",
            self.local_addr()?,
            self.pulse
        );

        let mut tasks = JoinSet::new();
        tasks.spawn(pulse_loop(messages.clone(), self.pulse));
        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (stream, peer) = accepted?;
                    log::info!("client {peer} connected");
                    tasks.spawn(serve_client(stream, peer, messages.clone()));
                }
                Some(_) = tasks.join_next() => {}
            }
        }
    }
}

async fn pulse_loop(messages: broadcast::Sender<String>, period: Duration) {
    let tick = match ControlMessage::Tick.to_json() {
        Ok(tick) => tick,
        Err(err) => {
            log::error!("unable to encode pulse: {err}");
            return;
        }
    };

    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        // Fails only when nobody is connected.
        let _ = messages.send(tick.clone());
    }
}

async fn serve_client(stream: TcpStream, peer: SocketAddr, messages: broadcast::Sender<String>) {
    let mut socket = match tokio_tungstenite::accept_async(stream).await {
        Ok(socket) => socket,
        Err(err) => {
            log::warn!("handshake with {peer} failed: {err}");
            return;
        }
    };
    let mut inbox = messages.subscribe();

    loop {
        tokio::select! {
            incoming = socket.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    log::debug!("{peer}: {text}");
                    let _ = messages.send(text);
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    log::warn!("client {peer} failed: {err}");
                    break;
                }
            },
            outgoing = inbox.recv() => match outgoing {
                Ok(text) => {
                    if let Err(err) = socket.send(Message::Text(text)).await {
                        log::warn!("unable to send to {peer}: {err}");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("client {peer} lagged, skipped {skipped} messages");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    log::info!("client {peer} disconnected");
}
