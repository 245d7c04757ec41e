//! # Fretwise Core
//!
//! WASM-compatible core library for the Fretwise fretboard trainer.
//! Provides note arithmetic, instrument and pattern catalogs, fretboard
//! matching, playback sequencing and practice progress without any audio
//! or filesystem dependencies.
//!
//! ## Features
//!
//! - **serde**: Enable JSON serialization for storage and web interop
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```ignore
//! use fretwise_core::types::{Fretboard, PitchClass};
//! use fretwise_core::matcher::match_positions;
//! use fretwise_core::playback::{unique_notes_for_playback, PlaybackPlan};
//!
//! let board = Fretboard::generate("guitar");
//! let major = fretwise_core::types::pattern::default_pattern();
//! let positions = match_positions(PitchClass::C, major.intervals, &board);
//! let plan = PlaybackPlan::from_positions(&unique_notes_for_playback(&positions, true), 120.0)?;
//! ```

pub mod error;
pub mod matcher;
pub mod playback;
pub mod progress;
pub mod route;
pub mod types;
pub mod wasm;

// Re-export commonly used types
pub use error::TheoryError;
pub use matcher::PatternPosition;
pub use types::{
    ClickParams, FretCell, Fretboard, InstrumentConfig, Note, Pattern, PatternCategory,
    PatternFamily, PitchClass, ToneEnvelope, Waveform,
};
