use serde::{Deserialize, Serialize};

/// Lifecycle of the single logical recognizer connection. Owned exclusively
/// by the connection manager; its transitions are the only mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Disconnected,
    Connecting,
    Open,
    Closing,
}

/// Outbound message wrapping a single sampled frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEnvelope {
    /// Base64 JPEG data URI of the sampled frame.
    pub frame: String,
}

/// Inbound classification result from the recognizer.
///
/// `gesture` is absent or null when no gesture was detected. Label strings
/// outside the known set are tolerated and ignored downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureMessage {
    #[serde(default)]
    pub gesture: Option<String>,
}
