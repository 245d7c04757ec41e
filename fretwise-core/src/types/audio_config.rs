//! Audio configuration types for WASM compatibility
//!
//! Pure data describing how practice tones and metronome clicks should sound.
//! The native tone engine turns these into gain automation; nothing here
//! generates samples.

/// Available waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
}

impl Waveform {
    /// Parse waveform from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Waveform> {
        match s.to_lowercase().as_str() {
            "sine" | "sin" => Some(Waveform::Sine),
            "triangle" | "tri" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
        }
    }
}

/// Envelope of a practice tone, in seconds and linear gain
///
/// - `attack`: linear rise from 0 to `peak`
/// - `decay`: linear fall from `peak` to `sustain`
/// - `sustain`: level held until the release begins (a level, not a time)
/// - `release`: linear fall to 0 ending exactly at the note's duration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToneEnvelope {
    pub attack: f64,
    pub decay: f64,
    pub peak: f64,
    pub sustain: f64,
    pub release: f64,
    pub waveform: Waveform,
}

impl ToneEnvelope {
    /// Time (relative to note start) at which the release ramp begins.
    ///
    /// Short notes never release before the decay stage has finished; the
    /// release then starts at the end of decay, capped at the duration.
    pub fn release_start(&self, duration: f64) -> f64 {
        (duration - self.release)
            .max(self.attack + self.decay)
            .min(duration)
    }

    /// Extra time the oscillator keeps running past the note's duration
    pub const TAIL: f64 = 0.1;
}

impl Default for ToneEnvelope {
    fn default() -> Self {
        Self {
            attack: 0.02,
            decay: 0.1,
            peak: 0.5,
            sustain: 0.3,
            release: 0.3,
            waveform: Waveform::Triangle,
        }
    }
}

/// Metronome click: a short sine blip with exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickParams {
    pub accent_frequency: f64,
    pub frequency: f64,
    pub gain: f64,
    /// Level reached at the end of the decay (exponential ramps cannot reach 0)
    pub floor: f64,
    pub decay: f64,
    pub waveform: Waveform,
}

impl ClickParams {
    pub fn frequency_for(&self, accent: bool) -> f64 {
        if accent {
            self.accent_frequency
        } else {
            self.frequency
        }
    }
}

impl Default for ClickParams {
    fn default() -> Self {
        Self {
            accent_frequency: 1000.0,
            frequency: 800.0,
            gain: 0.3,
            floor: 0.01,
            decay: 0.05,
            waveform: Waveform::Sine,
        }
    }
}

/// Fade applied by stop-all: hold the current gain, ramp to 0, then stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopFade {
    pub fade: f64,
    pub stop_after: f64,
}

impl Default for StopFade {
    fn default() -> Self {
        Self {
            fade: 0.05,
            stop_after: 0.1,
        }
    }
}
