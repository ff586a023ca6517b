use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tracing::info;

/// A single captured frame.
pub struct Frame {
    /// Raw pixel data (RGB, 3 bytes per pixel).
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture timestamp in microseconds since the feed started.
    pub timestamp_us: u64,
}

/// Thread-safe latest-wins ring buffer for camera frames.
///
/// Stores up to `capacity` frames, overwriting the oldest when full. Frames
/// are wrapped in `Arc` so consumers get a cheap reference-counted pointer
/// instead of cloning pixel buffers. The sampler only ever reads the newest
/// entry, so a stale frame is never transmitted.
pub struct FrameBuffer {
    frames: Mutex<Vec<Option<Arc<Frame>>>>,
    capacity: usize,
    write_idx: Mutex<usize>,
    /// Monotonic counter incremented on each push.
    sequence: AtomicU64,
}

impl FrameBuffer {
    /// Create a new ring buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let frames = (0..capacity).map(|_| None).collect();
        Self {
            frames: Mutex::new(frames),
            capacity,
            write_idx: Mutex::new(0),
            sequence: AtomicU64::new(0),
        }
    }

    /// Push a new frame into the buffer, overwriting the oldest if full.
    pub fn push(&self, frame: Frame) {
        let mut frames = self.frames.lock();
        let mut idx = self.write_idx.lock();
        frames[*idx] = Some(Arc::new(frame));
        *idx = (*idx + 1) % self.capacity;
        self.sequence.fetch_add(1, Ordering::Relaxed);
    }

    /// Return the monotonic sequence number, increased by 1 per pushed frame.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Get the most recently pushed frame, if any.
    pub fn latest(&self) -> Option<Arc<Frame>> {
        let frames = self.frames.lock();
        let idx = self.write_idx.lock();
        if self.capacity == 0 {
            return None;
        }
        let latest_idx = if *idx == 0 {
            self.capacity - 1
        } else {
            *idx - 1
        };
        frames[latest_idx].clone()
    }
}

/// Live feed handle returned by a successful acquisition.
///
/// Holds the exclusive device session: a producer thread keeps pushing
/// frames into the shared buffer until [`FeedHandle::stop`] releases it.
pub struct FeedHandle {
    backend_name: &'static str,
    buffer: Arc<FrameBuffer>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for FeedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedHandle")
            .field("backend_name", &self.backend_name)
            .field("running", &self.running.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl FeedHandle {
    /// Assemble a handle from the parts a backend's producer thread shares.
    pub fn new(
        backend_name: &'static str,
        buffer: Arc<FrameBuffer>,
        running: Arc<AtomicBool>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            backend_name,
            buffer,
            running,
            thread: Some(thread),
        }
    }

    /// Shared access to the frame buffer for the sampler.
    pub fn buffer(&self) -> Arc<FrameBuffer> {
        Arc::clone(&self.buffer)
    }

    /// Most recent frame, if the feed has produced one yet.
    pub fn latest(&self) -> Option<Arc<Frame>> {
        self.buffer.latest()
    }

    /// Whether the producer is still live.
    pub fn is_live(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Release the device and join the producer thread. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
            info!("released {} camera feed", self.backend_name);
        }
    }
}
