//! # Fretwise
//!
//! Fretwise is a terminal fretboard trainer for practicing scales, pentatonics
//! and arpeggios on guitar and ukulele. It draws the pattern on a colored
//! fretboard, plays it back through the default audio device, and keeps a
//! practice log with daily streaks.
//!
//! The music theory, fretboard matching, sequencing and progress logic live
//! in `fretwise-core`; this crate is the native host around it.
//!
//! ## Modules
//!
//! - `audio`: cpal output stream, tone bank and the playback engine thread.
//! - `commands`: the REPL command registry and the shared command context.
//! - `display`: terminal rendering of the fretboard.
//! - `repl`: the interactive Read-Eval-Print Loop.
//! - `storage`: JSON persistence of progress and settings.

pub mod audio;
pub mod commands;
pub mod display;
pub mod repl;
pub mod storage;

// Re-export commonly used types for convenience
pub use crate::repl::{Repl, start};
pub use fretwise_core::{Fretboard, Pattern, PitchClass};
