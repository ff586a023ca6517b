use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

/// Human form of a wire label: "thumbs_up" → "THUMBS UP".
pub fn human_label(label: &str) -> String {
    label.replace('_', " ").to_uppercase()
}

/// Neutral text shown when no gesture is detected.
const NEUTRAL_LABEL: &str = "None";

#[derive(Debug)]
struct PresenterState {
    gesture_text: String,
    gesture_active: bool,
    status_text: String,
    status_active: bool,
    transients: Vec<(u64, String)>,
    next_transient: u64,
}

/// Snapshot of the feedback surface for inspection and serialisation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenterSnapshot {
    pub gesture_text: String,
    pub gesture_active: bool,
    pub status_text: String,
    pub status_active: bool,
    pub transients: Vec<String>,
}

/// Renders the session's visual feedback as structured log lines while
/// keeping an inspectable state mirror.
///
/// Two persistent indicators (last gesture, connection status) plus
/// transient overlays that self-remove after a fixed lifetime. Expiry is
/// fire-and-forget: rapid gestures may overlap several transients, and an
/// indicator outlives any later state change for its full lifetime.
#[derive(Clone)]
pub struct FeedbackPresenter {
    state: Arc<Mutex<PresenterState>>,
    transient_ttl: Duration,
}

impl FeedbackPresenter {
    pub fn new(transient_ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PresenterState {
                gesture_text: NEUTRAL_LABEL.to_string(),
                gesture_active: false,
                status_text: "Disconnected".to_string(),
                status_active: false,
                transients: Vec::new(),
                next_transient: 0,
            })),
            transient_ttl,
        }
    }

    /// Update the persistent gesture indicator. Runs for every received
    /// label, including ones the dispatcher later discards as too rapid.
    pub fn show_gesture(&self, label: Option<&str>) {
        let mut state = self.state.lock();
        match label {
            Some(label) => {
                state.gesture_text = human_label(label);
                state.gesture_active = true;
                info!("gesture: {}", state.gesture_text);
            }
            None => {
                state.gesture_text = NEUTRAL_LABEL.to_string();
                state.gesture_active = false;
                debug!("gesture: none");
            }
        }
    }

    /// Transient overlay showing the resulting volume percentage.
    pub fn volume_indicator(&self, volume: f64) {
        self.push_transient(format!("Volume: {}%", (volume * 100.0).round() as i64));
    }

    /// Transient overlay for a seek step.
    pub fn seek_indicator(&self, forward: bool) {
        let text = if forward {
            "Forwarding 10s"
        } else {
            "Rewinding 10s"
        };
        self.push_transient(text.to_string());
    }

    /// Update the persistent connection-status indicator. Driven only by
    /// link lifecycle events, never by gestures.
    pub fn set_connection(&self, message: &str, active: bool) {
        let mut state = self.state.lock();
        state.status_text = message.to_string();
        state.status_active = active;
        info!(active, "status: {message}");
    }

    pub fn snapshot(&self) -> PresenterSnapshot {
        let state = self.state.lock();
        PresenterSnapshot {
            gesture_text: state.gesture_text.clone(),
            gesture_active: state.gesture_active,
            status_text: state.status_text.clone(),
            status_active: state.status_active,
            transients: state
                .transients
                .iter()
                .map(|(_, text)| text.clone())
                .collect(),
        }
    }

    fn push_transient(&self, text: String) {
        let id = {
            let mut state = self.state.lock();
            let id = state.next_transient;
            state.next_transient += 1;
            state.transients.push((id, text.clone()));
            id
        };
        info!("indicator: {text}");

        // Fire-and-forget expiry; never cancelled or coalesced.
        let state = Arc::clone(&self.state);
        let ttl = self.transient_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            state.lock().transients.retain(|(tid, _)| *tid != id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter() -> FeedbackPresenter {
        FeedbackPresenter::new(Duration::from_millis(1000))
    }

    #[test]
    fn human_label_formats_wire_labels() {
        assert_eq!(human_label("thumbs_up"), "THUMBS UP");
        assert_eq!(human_label("left_swipe"), "LEFT SWIPE");
        assert_eq!(human_label("stop"), "STOP");
    }

    #[test]
    fn starts_neutral_and_disconnected() {
        let snap = presenter().snapshot();
        assert_eq!(snap.gesture_text, "None");
        assert!(!snap.gesture_active);
        assert_eq!(snap.status_text, "Disconnected");
        assert!(!snap.status_active);
        assert!(snap.transients.is_empty());
    }

    #[test]
    fn show_gesture_updates_persistent_indicator() {
        let p = presenter();
        p.show_gesture(Some("thumbs_up"));
        let snap = p.snapshot();
        assert_eq!(snap.gesture_text, "THUMBS UP");
        assert!(snap.gesture_active);
    }

    #[test]
    fn show_gesture_none_resets_to_neutral() {
        let p = presenter();
        p.show_gesture(Some("stop"));
        p.show_gesture(None);
        let snap = p.snapshot();
        assert_eq!(snap.gesture_text, "None");
        assert!(!snap.gesture_active);
    }

    #[test]
    fn show_gesture_formats_unrecognised_labels_too() {
        // The indicator mirrors whatever the recognizer sent.
        let p = presenter();
        p.show_gesture(Some("wave_hello"));
        assert_eq!(p.snapshot().gesture_text, "WAVE HELLO");
    }

    #[test]
    fn set_connection_updates_status() {
        let p = presenter();
        p.set_connection("Connected", true);
        let snap = p.snapshot();
        assert_eq!(snap.status_text, "Connected");
        assert!(snap.status_active);
    }

    #[test]
    fn snapshot_serialises_to_camelcase() {
        let p = presenter();
        p.show_gesture(Some("thumbs_down"));
        let json = serde_json::to_value(p.snapshot()).unwrap();
        assert_eq!(json["gestureText"], "THUMBS DOWN");
        assert_eq!(json["gestureActive"], true);
        assert_eq!(json["statusText"], "Disconnected");
    }

    #[tokio::test(start_paused = true)]
    async fn volume_indicator_shows_rounded_percentage() {
        let p = presenter();
        p.volume_indicator(0.6);
        assert_eq!(p.snapshot().transients, vec!["Volume: 60%".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn seek_indicators_name_the_direction() {
        let p = presenter();
        p.seek_indicator(false);
        p.seek_indicator(true);
        assert_eq!(
            p.snapshot().transients,
            vec!["Rewinding 10s".to_string(), "Forwarding 10s".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transient_expires_after_ttl() {
        let p = presenter();
        p.volume_indicator(0.5);
        assert_eq!(p.snapshot().transients.len(), 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        assert!(p.snapshot().transients.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_transients_overlap_and_expire_independently() {
        let p = presenter();
        p.volume_indicator(0.5);
        tokio::time::sleep(Duration::from_millis(500)).await;
        p.volume_indicator(0.6);

        // Both visible inside the first indicator's lifetime.
        assert_eq!(p.snapshot().transients.len(), 2);

        // First expires at t=1000ms, second at t=1500ms.
        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(p.snapshot().transients, vec!["Volume: 60%".to_string()]);

        tokio::time::sleep(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        assert!(p.snapshot().transients.is_empty());
    }
}
