/// Classified gesture from the recognizer's fixed label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    ThumbsUp,
    ThumbsDown,
    LeftSwipe,
    RightSwipe,
    Stop,
}

impl Gesture {
    /// Parse a wire label.
    ///
    /// Returns `None` for any string outside the known set — unrecognised
    /// labels are tolerated, not errors.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "thumbs_up" => Some(Self::ThumbsUp),
            "thumbs_down" => Some(Self::ThumbsDown),
            "left_swipe" => Some(Self::LeftSwipe),
            "right_swipe" => Some(Self::RightSwipe),
            "stop" => Some(Self::Stop),
            _ => None,
        }
    }

    /// Wire label string.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbs_up",
            Self::ThumbsDown => "thumbs_down",
            Self::LeftSwipe => "left_swipe",
            Self::RightSwipe => "right_swipe",
            Self::Stop => "stop",
        }
    }

    /// Whether this gesture changes the volume.
    pub fn affects_volume(self) -> bool {
        matches!(self, Self::ThumbsUp | Self::ThumbsDown)
    }

    /// Whether this gesture seeks within the media.
    pub fn affects_position(self) -> bool {
        matches!(self, Self::LeftSwipe | Self::RightSwipe)
    }
}
