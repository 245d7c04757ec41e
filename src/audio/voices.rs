//! Voice bank shared between the control side and the audio callback
//!
//! Every scheduled tone or click becomes a `Voice` with its own gain timeline.
//! Voices are torn down lazily once their stop time has passed.

use super::oscillator::Voice;
use fretwise_core::playback::{GainAutomation, ToneRequest};
use fretwise_core::types::StopFade;
use fretwise_core::{ClickParams, ToneEnvelope};

pub struct ToneBank {
    voices: Vec<Voice>,
    sample_rate: f32,
    envelope: ToneEnvelope,
    click: ClickParams,
    fade: StopFade,
}

impl ToneBank {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: Vec::new(),
            sample_rate,
            envelope: ToneEnvelope::default(),
            click: ClickParams::default(),
            fade: StopFade::default(),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of voices not yet torn down
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Practice tone at absolute stream time `start`
    pub fn schedule_tone(&mut self, frequency: f64, start: f64, duration: f64) {
        let duration = duration.max(0.0);
        let gain = GainAutomation::tone(&self.envelope, start, duration);
        let stop = start + duration + ToneEnvelope::TAIL;
        self.voices.push(Voice::new(
            frequency as f32,
            self.envelope.waveform,
            start,
            stop,
            gain,
        ));
    }

    /// Schedule a batch of tones, each offset from the same `now`
    pub fn schedule_tones(&mut self, now: f64, tones: &[ToneRequest]) {
        for tone in tones {
            self.schedule_tone(tone.frequency, now + tone.start_offset.max(0.0), tone.duration);
        }
    }

    /// Metronome click at absolute stream time `start`
    pub fn click(&mut self, start: f64, accent: bool) {
        let gain = GainAutomation::click(&self.click, start);
        self.voices.push(Voice::new(
            self.click.frequency_for(accent) as f32,
            self.click.waveform,
            start,
            start + self.click.decay,
            gain,
        ));
    }

    /// Fade every voice out from `now` and tear it down shortly after.
    ///
    /// Voices that have not started yet are dropped outright.
    pub fn stop_all(&mut self, now: f64) {
        self.voices.retain(|v| v.start <= now);
        let stop_at = now + self.fade.stop_after;
        for voice in &mut self.voices {
            voice.gain.fade_out(now, &self.fade);
            voice.stop = voice.stop.min(stop_at);
        }
    }

    /// Drop voices whose stop time has passed
    pub fn prune(&mut self, now: f64) {
        self.voices.retain(|v| !v.is_finished(now));
    }

    /// Summed gain of all voices sounding at `t`
    pub fn level_at(&self, t: f64) -> f64 {
        self.voices
            .iter()
            .filter(|v| v.is_sounding(t))
            .map(|v| v.gain.value_at(t))
            .sum()
    }

    /// Render mono frames starting at stream time `start`
    pub fn render(&mut self, start: f64, out: &mut [f32]) {
        let step = 1.0 / self.sample_rate as f64;
        for (i, frame) in out.iter_mut().enumerate() {
            let t = start + i as f64 * step;
            let mut sum = 0.0;
            for voice in &mut self.voices {
                sum += voice.sample_at(t, self.sample_rate);
            }
            *frame = sum.clamp(-1.0, 1.0);
        }
        self.prune(start + out.len() as f64 * step);
    }
}
