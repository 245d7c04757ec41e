// fretwise-core/src/types/mod.rs

pub mod audio_config;
pub mod fretboard;
pub mod instrument;
pub mod note;
pub mod pattern;
pub mod time;

pub use audio_config::{ClickParams, StopFade, ToneEnvelope, Waveform};
pub use fretboard::{FretCell, Fretboard};
pub use instrument::InstrumentConfig;
pub use note::{Note, PitchClass};
pub use pattern::{Pattern, PatternCategory, PatternFamily};
