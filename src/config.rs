use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client settings, loaded from an optional JSON file.
///
/// Every field has a default, so a partial file (or none at all) yields a
/// working configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Recognizer host (and port) the endpoint is derived from.
    pub host: String,
    /// Use the secure transport variant (wss).
    pub secure: bool,
    /// Camera backend name.
    pub camera: String,
    pub sample_interval_ms: u64,
    pub jpeg_quality: u8,
    pub frame_width: u32,
    pub frame_height: u32,
    pub debounce_ms: u64,
    pub reconnect_delay_ms: u64,
    pub indicator_ttl_ms: u64,
    /// Length of the media the player model reports as `duration`.
    pub media_duration_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:8000".to_string(),
            secure: false,
            camera: "synthetic".to_string(),
            sample_interval_ms: 100,
            jpeg_quality: 80,
            frame_width: 640,
            frame_height: 480,
            debounce_ms: 500,
            reconnect_delay_ms: 5000,
            indicator_ttl_ms: 1000,
            media_duration_secs: 600.0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, returning defaults on missing file.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    }

    /// Apply environment overrides (`GESTURECAST_HOST`).
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("GESTURECAST_HOST") {
            if !host.is_empty() {
                self.host = host;
            }
        }
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn indicator_ttl(&self) -> Duration {
        Duration::from_millis(self.indicator_ttl_ms)
    }
}
