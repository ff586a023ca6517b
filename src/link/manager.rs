use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use crate::feedback::presenter::FeedbackPresenter;
use crate::link::protocol::{FrameEnvelope, GestureMessage, LinkState};

/// Callback invoked with the label of each successfully parsed inbound
/// message (`None` when the recognizer saw no gesture).
pub type GestureCallback = Arc<dyn Fn(Option<&str>) + Send + Sync>;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How one connected stretch ended.
enum SessionEnd {
    Closed,
    Errored,
    Shutdown,
}

/// Sampler-facing handle to the link.
///
/// Sending is valid only while the connection is Open; at any other time
/// the envelope is dropped. Send-and-forget: the channel holds at most one
/// envelope and a full channel also drops, so a stalled socket never backs
/// frames up.
#[derive(Clone)]
pub struct LinkHandle {
    state: Arc<Mutex<LinkState>>,
    outbound: mpsc::Sender<FrameEnvelope>,
}

impl LinkHandle {
    pub fn state(&self) -> LinkState {
        *self.state.lock()
    }

    pub fn is_open(&self) -> bool {
        self.state() == LinkState::Open
    }

    /// Hand an envelope to the link. Returns whether it was queued.
    pub fn send(&self, envelope: FrameEnvelope) -> bool {
        if !self.is_open() {
            trace!("link not open, dropping frame");
            return false;
        }
        match self.outbound.try_send(envelope) {
            Ok(()) => true,
            Err(_) => {
                trace!("outbound queue full, dropping frame");
                false
            }
        }
    }
}

/// Owns the single logical connection to the recognizer.
///
/// Drives the {Disconnected, Connecting, Open, Closing} state machine and
/// the retry policy: every close — clean, error-induced, or a handshake
/// that never opened — schedules the next attempt after one fixed delay.
/// Retries are infinite and constant-interval; no backoff growth, no cap,
/// no jitter.
pub struct ConnectionManager {
    url: String,
    reconnect_delay: Duration,
    state: Arc<Mutex<LinkState>>,
    presenter: FeedbackPresenter,
    on_gesture: GestureCallback,
    outbound: mpsc::Receiver<FrameEnvelope>,
}

impl ConnectionManager {
    pub fn new(
        url: String,
        reconnect_delay: Duration,
        presenter: FeedbackPresenter,
        on_gesture: GestureCallback,
    ) -> (Self, LinkHandle) {
        let state = Arc::new(Mutex::new(LinkState::Disconnected));
        // Capacity 1: at most one frame conceptually in flight.
        let (tx, rx) = mpsc::channel(1);
        let handle = LinkHandle {
            state: Arc::clone(&state),
            outbound: tx,
        };
        let manager = Self {
            url,
            reconnect_delay,
            state,
            presenter,
            on_gesture,
            outbound: rx,
        };
        (manager, handle)
    }

    /// Run the connect/serve/retry cycle until shutdown is signalled.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }

            self.set_state(LinkState::Connecting);
            debug!("connecting to {}", self.url);

            let attempt = tokio::select! {
                result = connect_async(self.url.as_str()) => result,
                _ = shutdown.changed() => break,
            };

            match attempt {
                Ok((ws, _response)) => {
                    self.set_state(LinkState::Open);
                    self.presenter.set_connection("Connected", true);
                    info!("connected to {}", self.url);

                    if let SessionEnd::Shutdown = self.drive(ws, &mut shutdown).await {
                        break;
                    }
                }
                Err(e) => {
                    warn!("connection failed: {e}");
                    self.presenter.set_connection("Connection Error", false);
                }
            }

            // Every close path lands here, including a handshake that never
            // opened: report, then retry after the fixed delay.
            self.set_state(LinkState::Disconnected);
            self.presenter.set_connection("Disconnected", false);

            tokio::select! {
                _ = tokio::time::sleep(self.reconnect_delay) => {}
                _ = shutdown.changed() => break,
            }
        }
        self.set_state(LinkState::Closing);
    }

    /// Serve one open connection until it ends.
    async fn drive(&mut self, ws: WsStream, shutdown: &mut watch::Receiver<bool>) -> SessionEnd {
        let ConnectionManager {
            presenter,
            on_gesture,
            outbound,
            ..
        } = self;

        let (mut sink, mut stream) = ws.split();
        loop {
            tokio::select! {
                envelope = outbound.recv() => {
                    // Senders live in the session handle; recv yields None
                    // only at teardown.
                    let Some(envelope) = envelope else { return SessionEnd::Shutdown };
                    match serde_json::to_string(&envelope) {
                        Ok(text) => {
                            if let Err(e) = sink.send(Message::Text(text)).await {
                                warn!("frame send failed: {e}");
                                presenter.set_connection("Connection Error", false);
                                return SessionEnd::Errored;
                            }
                        }
                        Err(e) => warn!("failed to serialise envelope: {e}"),
                    }
                }
                message = stream.next() => match message {
                    Some(Ok(Message::Text(text))) => handle_inbound(on_gesture, &text),
                    Some(Ok(Message::Close(_))) | None => {
                        info!("recognizer closed the connection");
                        return SessionEnd::Closed;
                    }
                    Some(Ok(_)) => {} // binary/ping/pong — not part of the protocol
                    Some(Err(e)) => {
                        warn!("transport error: {e}");
                        presenter.set_connection("Connection Error", false);
                        return SessionEnd::Errored;
                    }
                },
                _ = shutdown.changed() => {
                    let _ = sink.send(Message::Close(None)).await;
                    return SessionEnd::Shutdown;
                }
            }
        }
    }

    fn set_state(&self, next: LinkState) {
        *self.state.lock() = next;
    }
}

/// Parse one inbound message and forward its label.
///
/// Malformed data is logged and dropped: no dispatch, no presenter update,
/// no state change — the connection stays open.
fn handle_inbound(on_gesture: &GestureCallback, text: &str) {
    match serde_json::from_str::<GestureMessage>(text) {
        Ok(message) => (on_gesture)(message.gesture.as_deref()),
        Err(e) => warn!("failed to parse inbound message: {e}"),
    }
}
