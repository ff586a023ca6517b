use serde::{Deserialize, Serialize};

/// Which way the requested camera should face. A preference, not a
/// requirement — backends without a matching device may serve any feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Front,
    Rear,
}

/// Requested capture parameters for the single acquisition call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    pub width: u32,
    pub height: u32,
    pub facing: Facing,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            facing: Facing::Front,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_feed_config_is_vga_front() {
        let config = FeedConfig::default();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.facing, Facing::Front);
    }

    #[test]
    fn feed_config_serialises_to_camelcase() {
        let config = FeedConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["width"], 640);
        assert_eq!(json["height"], 480);
        assert_eq!(json["facing"], "front");
    }

    #[test]
    fn feed_config_round_trips_through_json() {
        let config = FeedConfig {
            width: 320,
            height: 240,
            facing: Facing::Rear,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: FeedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
