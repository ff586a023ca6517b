use serde::Serialize;

/// Media player model the dispatcher issues bounded mutations to.
///
/// Every mutation clamps to its valid range, so the state can never leave
/// `volume ∈ [0, 1]`, `current_time ∈ [0, duration]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    volume: f64,
    current_time: f64,
    duration: f64,
    paused: bool,
    muted: bool,
}

impl PlaybackState {
    /// A paused player at full volume, positioned at the start.
    pub fn new(duration: f64) -> Self {
        Self {
            volume: 1.0,
            current_time: 0.0,
            duration: duration.max(0.0),
            paused: true,
            muted: false,
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Jump to an absolute position, clamped to the media bounds.
    pub fn seek_to(&mut self, position: f64) {
        self.current_time = position.clamp(0.0, self.duration);
    }

    /// Raise the volume by `step`, capped at full.
    pub fn step_volume_up(&mut self, step: f64) {
        self.volume = (self.volume + step).min(1.0);
    }

    /// Lower the volume by `step`, floored at silent. Also clears mute so
    /// the change is audible regardless of a prior mute.
    pub fn step_volume_down(&mut self, step: f64) {
        self.volume = (self.volume - step).max(0.0);
        self.muted = false;
    }

    /// Step backwards, stopping at the start.
    pub fn seek_back(&mut self, seconds: f64) {
        self.current_time = (self.current_time - seconds).max(0.0);
    }

    /// Step forwards, stopping at the end.
    pub fn seek_forward(&mut self, seconds: f64) {
        self.current_time = (self.current_time + seconds).min(self.duration);
    }

    /// Flip between playing and paused.
    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_is_paused_at_full_volume() {
        let player = PlaybackState::new(600.0);
        assert_eq!(player.volume(), 1.0);
        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.duration(), 600.0);
        assert!(player.is_paused());
        assert!(!player.is_muted());
    }

    #[test]
    fn volume_up_clamps_at_full() {
        let mut player = PlaybackState::new(600.0);
        player.set_volume(0.95);
        player.step_volume_up(0.1);
        assert_eq!(player.volume(), 1.0);
    }

    #[test]
    fn volume_down_clamps_at_silent() {
        let mut player = PlaybackState::new(600.0);
        player.set_volume(0.05);
        player.step_volume_down(0.1);
        assert_eq!(player.volume(), 0.0);
    }

    #[test]
    fn volume_down_always_unmutes() {
        let mut player = PlaybackState::new(600.0);
        player.set_muted(true);
        player.step_volume_down(0.1);
        assert!(!player.is_muted());

        // And stays unmuted when already unmuted.
        player.step_volume_down(0.1);
        assert!(!player.is_muted());
    }

    #[test]
    fn volume_up_does_not_touch_mute() {
        let mut player = PlaybackState::new(600.0);
        player.set_muted(true);
        player.step_volume_up(0.1);
        assert!(player.is_muted());
    }

    #[test]
    fn seek_back_clamps_at_start() {
        let mut player = PlaybackState::new(600.0);
        player.seek_to(5.0);
        player.seek_back(10.0);
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn seek_forward_clamps_at_end() {
        let mut player = PlaybackState::new(600.0);
        player.seek_to(597.0);
        player.seek_forward(10.0);
        assert_eq!(player.current_time(), 600.0);
    }

    #[test]
    fn toggle_paused_flips_each_time() {
        let mut player = PlaybackState::new(600.0);
        assert!(player.is_paused());
        player.toggle_paused();
        assert!(!player.is_paused());
        player.toggle_paused();
        assert!(player.is_paused());
    }

    #[test]
    fn set_volume_clamps_out_of_range_input() {
        let mut player = PlaybackState::new(600.0);
        player.set_volume(1.7);
        assert_eq!(player.volume(), 1.0);
        player.set_volume(-0.3);
        assert_eq!(player.volume(), 0.0);
    }

    #[test]
    fn seek_to_clamps_to_media_bounds() {
        let mut player = PlaybackState::new(120.0);
        player.seek_to(500.0);
        assert_eq!(player.current_time(), 120.0);
        player.seek_to(-5.0);
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn negative_duration_is_floored_to_zero() {
        let player = PlaybackState::new(-10.0);
        assert_eq!(player.duration(), 0.0);
    }

    #[test]
    fn serialises_to_camelcase() {
        let player = PlaybackState::new(600.0);
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["volume"], 1.0);
        assert_eq!(json["currentTime"], 0.0);
        assert_eq!(json["paused"], true);
        assert_eq!(json["muted"], false);
    }
}
