//! Gain automation timelines
//!
//! A [`GainAutomation`] is an ordered list of gain events on an absolute
//! clock. Ramps run from the previous event's time and value to their own,
//! so a timeline reads the same way an audio-parameter schedule does:
//! `set 0 @ t`, `linear 0.5 @ t+0.02`, and so on.

use crate::types::audio_config::{ClickParams, StopFade, ToneEnvelope};

/// A single scheduled change of gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GainEvent {
    /// Jump to `value` at `time`
    Set { time: f64, value: f64 },
    /// Ramp linearly from the previous event, reaching `value` at `time`
    Linear { time: f64, value: f64 },
    /// Ramp exponentially from the previous event, reaching `value` at `time`
    Exponential { time: f64, value: f64 },
}

impl GainEvent {
    pub fn time(&self) -> f64 {
        match *self {
            GainEvent::Set { time, .. }
            | GainEvent::Linear { time, .. }
            | GainEvent::Exponential { time, .. } => time,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            GainEvent::Set { value, .. }
            | GainEvent::Linear { value, .. }
            | GainEvent::Exponential { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GainAutomation {
    events: Vec<GainEvent>,
}

impl GainAutomation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Practice tone starting at `start` and lasting `duration` seconds
    pub fn tone(envelope: &ToneEnvelope, start: f64, duration: f64) -> Self {
        let duration = duration.max(0.0);
        let attack_end = envelope.attack.min(duration);
        let decay_end = (envelope.attack + envelope.decay).min(duration);
        let release_start = envelope.release_start(duration);

        let mut gain = Self::new();
        gain.set_value_at(0.0, start);
        gain.linear_ramp_to(envelope.peak, start + attack_end);
        gain.linear_ramp_to(envelope.sustain, start + decay_end);
        gain.set_value_at(envelope.sustain, start + release_start);
        gain.linear_ramp_to(0.0, start + duration);
        gain
    }

    /// Metronome click starting at `start`
    pub fn click(params: &ClickParams, start: f64) -> Self {
        let mut gain = Self::new();
        gain.set_value_at(params.gain, start);
        gain.exponential_ramp_to(params.floor, start + params.decay);
        gain
    }

    fn insert(&mut self, event: GainEvent) {
        // Events at the same time keep their insertion order
        let index = self.events.partition_point(|e| e.time() <= event.time());
        self.events.insert(index, event);
    }

    pub fn set_value_at(&mut self, value: f64, time: f64) {
        self.insert(GainEvent::Set { time, value });
    }

    pub fn linear_ramp_to(&mut self, value: f64, time: f64) {
        self.insert(GainEvent::Linear { time, value });
    }

    pub fn exponential_ramp_to(&mut self, value: f64, time: f64) {
        self.insert(GainEvent::Exponential { time, value });
    }

    /// Drop every event at or after `time`
    pub fn cancel_from(&mut self, time: f64) {
        self.events.retain(|e| e.time() < time);
    }

    /// Hold the gain sounding at `now` and ramp it to silence
    pub fn fade_out(&mut self, now: f64, fade: &StopFade) {
        let current = self.value_at(now);
        self.cancel_from(now);
        self.set_value_at(current, now);
        self.linear_ramp_to(0.0, now + fade.fade);
    }

    pub fn events(&self) -> &[GainEvent] {
        &self.events
    }

    /// Time of the last scheduled event
    pub fn end_time(&self) -> Option<f64> {
        self.events.last().map(GainEvent::time)
    }

    /// Gain at time `t`
    pub fn value_at(&self, t: f64) -> f64 {
        let index = self.events.partition_point(|e| e.time() <= t);
        let Some(prev) = index.checked_sub(1).map(|i| self.events[i]) else {
            return 0.0;
        };
        let (t0, v0) = (prev.time(), prev.value());

        match self.events.get(index) {
            Some(&GainEvent::Linear { time: t1, value: v1 }) => {
                let progress = (t - t0) / (t1 - t0);
                v0 + (v1 - v0) * progress
            }
            // Exponential ramps are undefined through zero; hold instead
            Some(&GainEvent::Exponential { time: t1, value: v1 }) if v0 > 0.0 && v1 > 0.0 => {
                let progress = (t - t0) / (t1 - t0);
                v0 * (v1 / v0).powf(progress)
            }
            _ => v0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_tone_shape() {
        let env = ToneEnvelope::default();
        let gain = GainAutomation::tone(&env, 1.0, 0.45);

        assert!(close(gain.value_at(0.5), 0.0));
        assert!(close(gain.value_at(1.0), 0.0));
        assert!(close(gain.value_at(1.01), 0.25));
        assert!(close(gain.value_at(1.02), 0.5));
        assert!(close(gain.value_at(1.07), 0.4));
        assert!(close(gain.value_at(1.12), 0.3));
        // Held through to the release at duration - 0.3
        assert!(close(gain.value_at(1.14), 0.3));
        assert!(close(gain.value_at(1.15), 0.3));
        assert!(close(gain.value_at(1.30), 0.15));
        assert!(close(gain.value_at(1.45), 0.0));
        assert!(close(gain.value_at(5.0), 0.0));
        assert!(close(gain.end_time().unwrap(), 1.45));
    }

    #[test]
    fn test_short_tone_releases_after_decay() {
        let env = ToneEnvelope::default();
        let gain = GainAutomation::tone(&env, 0.0, 0.2);

        assert!(close(gain.value_at(0.12), 0.3));
        assert!(close(gain.value_at(0.16), 0.15));
        assert!(close(gain.value_at(0.2), 0.0));
    }

    #[test]
    fn test_click_decay() {
        let click = ClickParams::default();
        let gain = GainAutomation::click(&click, 0.0);

        assert!(close(gain.value_at(0.0), 0.3));
        assert!(close(gain.value_at(0.05), 0.01));
        let mid = gain.value_at(0.025);
        assert!(close(mid, (0.3f64 * 0.01).sqrt()));
    }

    #[test]
    fn test_fade_out_holds_current_value() {
        let env = ToneEnvelope::default();
        let mut gain = GainAutomation::tone(&env, 0.0, 2.0);
        let fade = StopFade::default();

        gain.fade_out(0.5, &fade);

        assert!(close(gain.value_at(0.5), 0.3));
        assert!(close(gain.value_at(0.525), 0.15));
        assert!(close(gain.value_at(0.55), 0.0));
        assert!(close(gain.value_at(1.8), 0.0));
        assert!(close(gain.end_time().unwrap(), 0.55));
    }

    #[test]
    fn test_fade_out_mid_ramp() {
        let env = ToneEnvelope::default();
        let mut gain = GainAutomation::tone(&env, 0.0, 2.0);
        gain.fade_out(0.01, &StopFade::default());
        assert!(close(gain.value_at(0.01), 0.25));
        assert!(close(gain.value_at(0.06), 0.0));
    }

    #[test]
    fn test_cancel_from() {
        let mut gain = GainAutomation::new();
        gain.set_value_at(1.0, 0.0);
        gain.linear_ramp_to(0.0, 1.0);
        gain.cancel_from(1.0);
        assert_eq!(gain.events().len(), 1);
        assert!(close(gain.value_at(0.5), 1.0));
    }
}
