use serde::Serialize;
use std::time::Instant;

/// Collects statistics for one control-loop session.
pub struct SessionStats {
    frames_sent: u64,
    ticks_skipped: u64,
    sample_errors: u64,
    bytes_sent: u64,
    gestures_received: u64,
    gestures_accepted: u64,
    start_time: Instant,
}

/// Snapshot of session stats for serialisation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub send_rate: f64,
    pub frames_sent: u64,
    pub ticks_skipped: u64,
    pub sample_errors: u64,
    pub bytes_sent: u64,
    pub gestures_received: u64,
    pub gestures_accepted: u64,
}

impl SessionStats {
    /// Create new stats with zeroed counters.
    pub fn new() -> Self {
        Self {
            frames_sent: 0,
            ticks_skipped: 0,
            sample_errors: 0,
            bytes_sent: 0,
            gestures_received: 0,
            gestures_accepted: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a frame handed to the link for transmission.
    pub fn record_frame_sent(&mut self, bytes: usize) {
        self.frames_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    /// Record a sampling tick skipped because the link was not open or no
    /// frame was available yet.
    pub fn record_skipped_tick(&mut self) {
        self.ticks_skipped += 1;
    }

    /// Record a per-tick render/encode failure.
    pub fn record_sample_error(&mut self) {
        self.sample_errors += 1;
    }

    /// Record an inbound gesture message that parsed successfully.
    pub fn record_gesture_received(&mut self) {
        self.gestures_received += 1;
    }

    /// Record a gesture the dispatcher accepted past the debounce window.
    pub fn record_gesture_accepted(&mut self) {
        self.gestures_accepted += 1;
    }

    /// Frames handed to the link per second of session time.
    pub fn send_rate(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed < 0.001 {
            return 0.0;
        }
        self.frames_sent as f64 / elapsed
    }

    /// Take a serialisable snapshot.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            send_rate: self.send_rate(),
            frames_sent: self.frames_sent,
            ticks_skipped: self.ticks_skipped,
            sample_errors: self.sample_errors,
            bytes_sent: self.bytes_sent,
            gestures_received: self.gestures_received,
            gestures_accepted: self.gestures_accepted,
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn initialises_with_zero_values() {
        let stats = SessionStats::new();
        let snap = stats.snapshot();
        assert_eq!(snap.frames_sent, 0);
        assert_eq!(snap.ticks_skipped, 0);
        assert_eq!(snap.sample_errors, 0);
        assert_eq!(snap.bytes_sent, 0);
        assert_eq!(snap.gestures_received, 0);
        assert_eq!(snap.gestures_accepted, 0);
    }

    #[test]
    fn record_frame_sent_tracks_count_and_bytes() {
        let mut stats = SessionStats::new();
        stats.record_frame_sent(10_000);
        stats.record_frame_sent(12_000);
        let snap = stats.snapshot();
        assert_eq!(snap.frames_sent, 2);
        assert_eq!(snap.bytes_sent, 22_000);
    }

    #[test]
    fn record_skipped_tick_increments() {
        let mut stats = SessionStats::new();
        stats.record_skipped_tick();
        stats.record_skipped_tick();
        assert_eq!(stats.snapshot().ticks_skipped, 2);
    }

    #[test]
    fn gesture_counters_are_independent() {
        let mut stats = SessionStats::new();
        stats.record_gesture_received();
        stats.record_gesture_received();
        stats.record_gesture_received();
        stats.record_gesture_accepted();
        let snap = stats.snapshot();
        assert_eq!(snap.gestures_received, 3);
        assert_eq!(snap.gestures_accepted, 1);
    }

    #[test]
    fn send_rate_is_positive_after_sends() {
        let mut stats = SessionStats::new();
        stats.record_frame_sent(1000);
        thread::sleep(Duration::from_millis(50));
        let rate = stats.send_rate();
        assert!(rate > 0.0, "send rate should be positive, got {rate}");
    }

    #[test]
    fn snapshot_serialises_to_camelcase() {
        let mut stats = SessionStats::new();
        stats.record_sample_error();
        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["sampleErrors"], 1);
        assert!(json["framesSent"].is_number());
        assert!(json["gesturesReceived"].is_number());
    }
}
