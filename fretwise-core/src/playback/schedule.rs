//! Tempo-based scheduling of a note sequence
//!
//! Note `i` starts on beat `i` and sustains for nine tenths of a beat, leaving
//! a short gap before the next note. The layout is exact in beats; seconds are
//! derived from the tempo.

use super::output::{AudioOutput, ToneRequest};
use crate::error::TheoryError;
use crate::matcher::PatternPosition;
use crate::types::time::{beats, time, to_seconds, Arc, Time};
use anyhow::Result;

/// Fraction of a beat each note sounds for
pub fn sustain_fraction() -> Time {
    time(9, 10)
}

/// Seconds per beat, rejecting tempos that are not finite and positive
pub fn seconds_per_beat(bpm: f64) -> Result<f64, TheoryError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(TheoryError::InvalidTempo(bpm));
    }
    Ok(60.0 / bpm)
}

/// One timed note-on event
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledNote {
    pub frequency: f64,
    /// Exact span of the note in beats
    pub beats: Arc,
    /// Start offset in seconds from the beginning of the sequence
    pub start: f64,
    /// Sounding duration in seconds
    pub duration: f64,
}

/// A sequence laid out at a fixed tempo
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackPlan {
    pub notes: Vec<ScheduledNote>,
    pub seconds_per_beat: f64,
    /// Length of one pass through the sequence, in seconds
    pub cycle: f64,
}

impl PlaybackPlan {
    /// Lay out frequencies one per beat at `bpm`
    pub fn new(frequencies: &[f64], bpm: f64) -> Result<Self, TheoryError> {
        let per_beat = seconds_per_beat(bpm)?;

        let notes = frequencies
            .iter()
            .enumerate()
            .map(|(i, &frequency)| {
                let start = beats(i as i64);
                let span = Arc::new(start, start + sustain_fraction());
                ScheduledNote {
                    frequency,
                    beats: span,
                    start: to_seconds(span.start, per_beat),
                    duration: to_seconds(span.duration(), per_beat),
                }
            })
            .collect::<Vec<_>>();

        let cycle = to_seconds(beats(notes.len() as i64), per_beat);

        Ok(PlaybackPlan {
            notes,
            seconds_per_beat: per_beat,
            cycle,
        })
    }

    /// Lay out matched positions in the given order
    pub fn from_positions(positions: &[PatternPosition], bpm: f64) -> Result<Self, TheoryError> {
        let frequencies: Vec<f64> = positions.iter().map(|p| p.frequency).collect();
        Self::new(&frequencies, bpm)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Hand every note to `output`, shifted by `offset` seconds
    pub fn dispatch(&self, output: &dyn AudioOutput, offset: f64) -> Result<()> {
        let tones: Vec<ToneRequest> = self
            .notes
            .iter()
            .map(|note| ToneRequest {
                frequency: note.frequency,
                duration: note.duration,
                start_offset: offset + note.start,
            })
            .collect();
        output.schedule_tones(&tones)
    }
}
