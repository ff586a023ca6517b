use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::camera::backend::CameraBackend;
use crate::camera::error::Result;
use crate::camera::feed::{Frame, FrameBuffer, FeedHandle};
use crate::camera::types::FeedConfig;

/// Frames the producer thread targets per second.
const FRAME_RATE: u32 = 30;

/// Ring capacity; the sampler only reads the newest entry.
const BUFFER_CAPACITY: usize = 3;

/// A simulated camera producing a moving gradient test pattern.
///
/// Stands in for real hardware so the whole control loop runs without a
/// device. Selected via `camera = "synthetic"` in the settings or the
/// `GESTURECAST_SYNTHETIC=1` environment variable.
pub struct SyntheticBackend;

impl SyntheticBackend {
    pub fn new() -> Self {
        Self
    }

    /// Whether the synthetic camera is forced via environment variable.
    pub fn is_enabled() -> bool {
        std::env::var("GESTURECAST_SYNTHETIC").is_ok_and(|v| v == "1" || v == "true")
    }
}

impl Default for SyntheticBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate one RGB gradient frame. The `tick` offset scrolls the pattern
/// so consecutive frames differ, like a live feed.
fn test_pattern(width: u32, height: u32, tick: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(((u64::from(x) + tick) % 256) as u8); // R
            data.push(((u64::from(y) + tick / 2) % 256) as u8); // G
            data.push(128); // B
        }
    }
    data
}

impl CameraBackend for SyntheticBackend {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn open(&self, config: &FeedConfig) -> Result<FeedHandle> {
        let buffer = Arc::new(FrameBuffer::new(BUFFER_CAPACITY));
        let running = Arc::new(AtomicBool::new(true));
        let width = config.width;
        let height = config.height;

        let thread = {
            let buffer = Arc::clone(&buffer);
            let running = Arc::clone(&running);
            std::thread::Builder::new()
                .name("synthetic-feed".to_string())
                .spawn(move || {
                    let started = Instant::now();
                    let frame_interval = Duration::from_secs(1) / FRAME_RATE;
                    let mut tick: u64 = 0;
                    while running.load(Ordering::Relaxed) {
                        buffer.push(Frame {
                            data: test_pattern(width, height, tick),
                            width,
                            height,
                            timestamp_us: started.elapsed().as_micros() as u64,
                        });
                        tick += 1;
                        std::thread::sleep(frame_interval);
                    }
                })
                .map_err(|e| {
                    crate::camera::error::CameraError::Acquisition(format!(
                        "failed to start feed thread: {e}"
                    ))
                })?
        };

        info!("acquired synthetic {width}x{height} feed");
        Ok(FeedHandle::new("synthetic", buffer, running, thread))
    }
}
