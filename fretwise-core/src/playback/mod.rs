//! Playback sequencing: note order, tempo layout, gain envelopes and the transport

pub mod envelope;
pub mod output;
pub mod schedule;
pub mod sequence;
pub mod transport;

pub use envelope::{GainAutomation, GainEvent};
pub use output::{AudioOutput, ToneRequest};
pub use schedule::{seconds_per_beat, PlaybackPlan, ScheduledNote};
pub use sequence::{sort_for_playback, unique_notes_for_playback, MAX_ONE_OCTAVE_NOTES};
pub use transport::{PlaybackState, Transport};
