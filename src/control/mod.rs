// Playback control — gesture labels, the player model, and the dispatcher.

pub mod dispatch;
pub mod gesture;
pub mod player;
