//! Oscillator module for practice tones and clicks
//!
//! Provides `Voice`, a phase-accumulating oscillator whose amplitude follows
//! a `GainAutomation` timeline evaluated at absolute stream time.

use fretwise_core::playback::GainAutomation;
use fretwise_core::Waveform;
use std::f32::consts::PI;

/// One sounding oscillator with its gain timeline
pub struct Voice {
    frequency: f32,
    phase: f32,
    waveform: Waveform,
    /// Stream time at which the oscillator starts
    pub start: f64,
    /// Stream time at which the oscillator is torn down
    pub stop: f64,
    pub gain: GainAutomation,
}

impl Voice {
    pub fn new(frequency: f32, waveform: Waveform, start: f64, stop: f64, gain: GainAutomation) -> Self {
        Self {
            frequency,
            phase: 0.0,
            waveform,
            start,
            stop,
            gain,
        }
    }

    /// Whether the oscillator produces sound at stream time `t`
    pub fn is_sounding(&self, t: f64) -> bool {
        t >= self.start && t < self.stop
    }

    /// Whether the oscillator has been torn down by stream time `t`
    pub fn is_finished(&self, t: f64) -> bool {
        t >= self.stop
    }

    /// Generate the sample for stream time `t`; the phase only advances while sounding
    pub fn sample_at(&mut self, t: f64, sample_rate: f32) -> f32 {
        if !self.is_sounding(t) {
            return 0.0;
        }

        let value = self.generate_waveform();

        self.phase += self.frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        value * self.gain.value_at(t) as f32
    }

    /// Raw waveform value at the current phase (0.0 to 1.0)
    fn generate_waveform(&self) -> f32 {
        match self.waveform {
            Waveform::Sine => (2.0 * PI * self.phase).sin(),
            Waveform::Triangle => {
                if self.phase < 0.5 {
                    4.0 * self.phase - 1.0
                } else {
                    3.0 - 4.0 * self.phase
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44100.0;

    fn flat_gain(value: f64) -> GainAutomation {
        let mut gain = GainAutomation::new();
        gain.set_value_at(value, 0.0);
        gain
    }

    #[test]
    fn test_sine_range() {
        let mut voice = Voice::new(440.0, Waveform::Sine, 0.0, 1.0, flat_gain(1.0));
        for i in 0..1000 {
            let t = i as f64 / SAMPLE_RATE as f64;
            let sample = voice.sample_at(t, SAMPLE_RATE);
            assert!((-1.0..=1.0).contains(&sample), "Sine out of range: {}", sample);
        }
    }

    #[test]
    fn test_triangle_range() {
        let mut voice = Voice::new(440.0, Waveform::Triangle, 0.0, 1.0, flat_gain(0.5));
        for i in 0..1000 {
            let t = i as f64 / SAMPLE_RATE as f64;
            let sample = voice.sample_at(t, SAMPLE_RATE);
            assert!((-0.5..=0.5).contains(&sample), "Triangle out of range: {}", sample);
        }
    }

    #[test]
    fn test_silent_outside_window() {
        let mut voice = Voice::new(440.0, Waveform::Sine, 0.5, 1.0, flat_gain(1.0));
        assert_eq!(voice.sample_at(0.25, SAMPLE_RATE), 0.0);
        assert_eq!(voice.sample_at(1.0, SAMPLE_RATE), 0.0);
        assert!(voice.is_sounding(0.5));
        assert!(voice.is_finished(1.0));
    }

    #[test]
    fn test_triangle_starts_at_trough() {
        let mut voice = Voice::new(100.0, Waveform::Triangle, 0.0, 1.0, flat_gain(1.0));
        assert!((voice.sample_at(0.0, SAMPLE_RATE) + 1.0).abs() < 1e-6);
    }
}
