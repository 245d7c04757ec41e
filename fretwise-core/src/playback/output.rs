//! The seam between playback logic and an audio backend

use anyhow::Result;

/// One tone in a batch, offset from a shared start instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    pub frequency: f64,
    pub duration: f64,
    pub start_offset: f64,
}

/// An audio backend with its own clock.
///
/// Offsets are relative to [`AudioOutput::now`] at the time of the call; the
/// backend owns the tones it starts and is responsible for releasing them.
pub trait AudioOutput: Send + Sync {
    /// Current time on the backend's clock, in seconds
    fn now(&self) -> f64;

    /// Start a practice tone `start_offset` seconds from now, lasting `duration` seconds
    fn schedule_tone(&self, frequency: f64, duration: f64, start_offset: f64) -> Result<()>;

    /// Start every tone in `tones` against a single reading of the clock.
    ///
    /// The default schedules them one by one. Backends whose clock moves
    /// between calls override this so a sequence keeps its exact spacing.
    fn schedule_tones(&self, tones: &[ToneRequest]) -> Result<()> {
        for tone in tones {
            self.schedule_tone(tone.frequency, tone.duration, tone.start_offset)?;
        }
        Ok(())
    }

    /// Play a metronome click immediately
    fn click(&self, accent: bool) -> Result<()>;

    /// Fade out and release every scheduled or sounding tone
    fn stop_all(&self) -> Result<()>;
}
