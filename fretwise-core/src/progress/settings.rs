//! User preferences persisted next to the progress log

use crate::types::instrument::{self, DEFAULT_INSTRUMENT};

/// Storage key of the settings blob
pub const SETTINGS_KEY: &str = "guitar-trainer-settings";

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 200;
pub const DEFAULT_BPM: u32 = 120;

/// Clamp a requested tempo to the supported range; non-finite input yields the default
pub fn clamp_bpm(bpm: f64) -> u32 {
    if !bpm.is_finite() {
        return DEFAULT_BPM;
    }
    bpm.round().clamp(MIN_BPM as f64, MAX_BPM as f64) as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Settings {
    /// Start a practice session automatically shortly after launch
    pub auto_start: bool,
    pub bpm: u32,
    pub instrument: String,
}

impl Settings {
    /// Repair out-of-range values loaded from storage
    pub fn sanitized(mut self) -> Self {
        self.bpm = self.bpm.clamp(MIN_BPM, MAX_BPM);
        if instrument::lookup(&self.instrument).is_none() {
            self.instrument = DEFAULT_INSTRUMENT.to_string();
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_start: false,
            bpm: DEFAULT_BPM,
            instrument: DEFAULT_INSTRUMENT.to_string(),
        }
    }
}
