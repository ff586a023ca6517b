use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::camera::feed::FrameBuffer;
use crate::diagnostics::stats::SessionStats;
use crate::link::manager::LinkHandle;
use crate::link::protocol::FrameEnvelope;
use crate::sampler::encode::encode_frame;

/// Periodically samples the live feed and hands encoded frames to the link.
///
/// Each tick reads the *current* frame, so a slow tick never queues stale
/// frames — transmission is send-and-forget with latest-wins semantics.
pub struct FrameSampler {
    buffer: Arc<FrameBuffer>,
    link: LinkHandle,
    stats: Arc<Mutex<SessionStats>>,
    interval: Duration,
    width: u32,
    height: u32,
    quality: u8,
}

impl FrameSampler {
    pub fn new(
        buffer: Arc<FrameBuffer>,
        link: LinkHandle,
        stats: Arc<Mutex<SessionStats>>,
        interval: Duration,
        width: u32,
        height: u32,
        quality: u8,
    ) -> Self {
        Self {
            buffer,
            link,
            stats,
            interval,
            width,
            height,
            quality,
        }
    }

    /// Run the fixed-period sampling loop until shutdown is signalled.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick(),
                _ = shutdown.changed() => break,
            }
        }
    }

    /// One sampling tick. Every failure is absorbed here: a missed tick is
    /// not an error and a bad tick never stops the timer.
    fn tick(&self) {
        if !self.link.is_open() {
            self.stats.lock().record_skipped_tick();
            return;
        }
        let Some(frame) = self.buffer.latest() else {
            self.stats.lock().record_skipped_tick();
            return;
        };

        match encode_frame(&frame, self.width, self.height, self.quality) {
            Ok(data_uri) => {
                let bytes = data_uri.len();
                if self.link.send(FrameEnvelope { frame: data_uri }) {
                    self.stats.lock().record_frame_sent(bytes);
                }
            }
            Err(e) => {
                warn!("frame sample failed: {e}");
                self.stats.lock().record_sample_error();
            }
        }
    }
}
