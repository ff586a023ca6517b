use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::control::gesture::Gesture;
use crate::control::player::PlaybackState;

/// Volume change per accepted thumbs gesture.
pub const VOLUME_STEP: f64 = 0.1;

/// Seconds skipped per accepted swipe gesture.
pub const SEEK_STEP_SECS: f64 = 10.0;

/// Minimum interval enforced between accepted gesture events.
///
/// The window is shared across all labels: accepting one gesture suppresses
/// any gesture, including a different one, until the interval elapses.
pub struct DebounceWindow {
    last_accepted_at: Option<Instant>,
    min_interval: Duration,
}

impl DebounceWindow {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_accepted_at: None,
            min_interval,
        }
    }

    /// Claim the window if it is free; on success the window restarts now.
    fn try_accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted_at {
            if now.saturating_duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_accepted_at = Some(now);
        true
    }
}

/// Playback command mapped from a recognised gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    VolumeUp,
    VolumeDown,
    SeekBack,
    SeekForward,
    TogglePlayback,
}

impl Command {
    pub fn for_gesture(gesture: Gesture) -> Self {
        match gesture {
            Gesture::ThumbsUp => Self::VolumeUp,
            Gesture::ThumbsDown => Self::VolumeDown,
            Gesture::LeftSwipe => Self::SeekBack,
            Gesture::RightSwipe => Self::SeekForward,
            Gesture::Stop => Self::TogglePlayback,
        }
    }
}

/// What the dispatcher did with one inbound label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Window claimed and a playback command applied.
    Applied(Command),
    /// Discarded: another event was accepted less than the window ago.
    Debounced,
    /// Window claimed, but the label maps to no command.
    Unrecognized,
    /// The message carried no gesture.
    NoGesture,
    /// No playback target attached yet.
    Detached,
}

/// Maps debounced gesture events onto bounded player mutations.
///
/// The debounce window is an owned field, constructed with the session and
/// torn down with it.
pub struct GestureDispatcher {
    debounce: DebounceWindow,
    player: Option<Arc<Mutex<PlaybackState>>>,
}

impl GestureDispatcher {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            debounce: DebounceWindow::new(min_interval),
            player: None,
        }
    }

    /// Attach the playback target the dispatcher mutates.
    pub fn attach(&mut self, player: Arc<Mutex<PlaybackState>>) {
        self.player = Some(player);
    }

    /// Handle one inbound label. Applies at most one mutation.
    pub fn dispatch(&mut self, label: Option<&str>, now: Instant) -> Outcome {
        let Some(label) = label else {
            return Outcome::NoGesture;
        };
        let Some(player) = &self.player else {
            return Outcome::Detached;
        };

        if !self.debounce.try_accept(now) {
            debug!("gesture ignored, too soon after last");
            return Outcome::Debounced;
        }

        // An accepted event claims the window even when its label maps to
        // nothing; the window is label-agnostic.
        let Some(gesture) = Gesture::from_label(label) else {
            debug!("unrecognised gesture label: {label}");
            return Outcome::Unrecognized;
        };

        let command = Command::for_gesture(gesture);
        {
            let mut player = player.lock();
            match command {
                Command::VolumeUp => player.step_volume_up(VOLUME_STEP),
                Command::VolumeDown => player.step_volume_down(VOLUME_STEP),
                Command::SeekBack => player.seek_back(SEEK_STEP_SECS),
                Command::SeekForward => player.seek_forward(SEEK_STEP_SECS),
                Command::TogglePlayback => player.toggle_paused(),
            }
        }
        debug!(?command, "applied gesture: {label}");
        Outcome::Applied(command)
    }
}
