//! Practice progress: the session log, its reducer, statistics and preferences

pub mod record;
pub mod settings;
pub mod stats;
pub mod tracker;

pub use record::{apply_session, next_streak, PracticeSession, ProgressState, PROGRESS_KEY};
pub use settings::{clamp_bpm, Settings, DEFAULT_BPM, MAX_BPM, MIN_BPM, SETTINGS_KEY};
pub use stats::{format_duration, ProgressStats};
pub use tracker::{AutoStart, SessionTracker, AUTO_START_DELAY_SECS};

impl ProgressState {
    /// Summary as of `today`
    pub fn stats(&self, today: chrono::NaiveDate) -> ProgressStats {
        ProgressStats::compute(self, today)
    }
}
