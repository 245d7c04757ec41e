//! Summary statistics over the practice log

use super::record::{PracticeSession, ProgressState};
use chrono::{Days, NaiveDate};

/// Number of calendar days, today included, counted as "this week"
pub const WEEK_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProgressStats {
    pub total_sessions: usize,
    pub total_time: u64,
    pub total_patterns: usize,
    /// Seconds practiced in the last [`WEEK_DAYS`] days
    pub weekly_time: u64,
    pub streak: u32,
    /// Sessions from the last [`WEEK_DAYS`] days, oldest first
    pub recent_sessions: Vec<PracticeSession>,
}

impl ProgressStats {
    pub fn compute(state: &ProgressState, today: NaiveDate) -> Self {
        let window_start = today
            .checked_sub_days(Days::new(WEEK_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);

        let recent_sessions: Vec<PracticeSession> = state
            .sessions
            .iter()
            .filter(|s| s.date >= window_start)
            .cloned()
            .collect();
        let weekly_time = recent_sessions.iter().map(|s| s.duration).sum();

        ProgressStats {
            total_sessions: state.sessions.len(),
            total_time: state.total_practice_time,
            total_patterns: state.patterns_learned.len(),
            weekly_time,
            streak: state.streak_days,
            recent_sessions,
        }
    }
}

/// Render seconds compactly: "1h 5m", "3m 20s" or "45s"
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::record::apply_session;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(200), "3m 20s");
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(3900 + 59), "1h 5m");
    }

    #[test]
    fn test_stats_weekly_window() {
        let mut state = ProgressState::default();
        for (date, duration) in [(day(2, 25), 100), (day(2, 26), 200), (day(3, 2), 300)] {
            state = apply_session(
                state,
                PracticeSession {
                    date,
                    duration,
                    patterns: vec![format!("C {}", duration)],
                },
            );
        }

        // Window for Mar 3 is Feb 26 ..= Mar 3
        let stats = ProgressStats::compute(&state, day(3, 3));
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_time, 600);
        assert_eq!(stats.total_patterns, 3);
        assert_eq!(stats.weekly_time, 500);
        assert_eq!(stats.recent_sessions.len(), 2);
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn test_stats_empty() {
        let stats = ProgressStats::compute(&ProgressState::default(), day(1, 1));
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.weekly_time, 0);
        assert!(stats.recent_sessions.is_empty());
    }
}
