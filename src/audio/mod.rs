pub mod audio;
pub mod oscillator;
pub mod playback_engine;
pub mod voices;

pub use audio::{AudioPlayerHandle, SilentOutput, open_output};
pub use playback_engine::{PlaybackCommand, PlaybackEngine};
