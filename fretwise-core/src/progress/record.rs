//! Practice log and the session reducer

use chrono::NaiveDate;
use std::collections::HashSet;

/// Storage key of the progress blob
pub const PROGRESS_KEY: &str = "guitar-trainer-progress";

/// One finished practice session
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PracticeSession {
    /// Calendar day the session ended on
    pub date: NaiveDate,
    /// Whole seconds practiced
    pub duration: u64,
    /// Keys like "A Minor Pentatonic", in the order first practiced
    pub patterns: Vec<String>,
}

/// Everything remembered between runs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ProgressState {
    pub sessions: Vec<PracticeSession>,
    /// Sum of all session durations, in seconds
    pub total_practice_time: u64,
    /// Distinct pattern keys ever practiced, in the order first seen
    pub patterns_learned: Vec<String>,
    pub last_practice_date: Option<NaiveDate>,
    pub streak_days: u32,
}

/// Streak after practicing on `today`.
///
/// Practicing the day after the last session extends the streak; a longer gap
/// restarts it at 1. Same-day practice (or a clock that moved backwards)
/// leaves it unchanged.
pub fn next_streak(last: Option<NaiveDate>, streak: u32, today: NaiveDate) -> u32 {
    let Some(last) = last else {
        return 1;
    };

    match (today - last).num_days() {
        1 => streak + 1,
        gap if gap > 1 => 1,
        _ => streak,
    }
}

/// Fold a finished session into the progress state
pub fn apply_session(state: ProgressState, session: PracticeSession) -> ProgressState {
    let streak_days = next_streak(state.last_practice_date, state.streak_days, session.date);

    let mut seen: HashSet<String> = state.patterns_learned.iter().cloned().collect();
    let mut patterns_learned = state.patterns_learned;
    for key in &session.patterns {
        if seen.insert(key.clone()) {
            patterns_learned.push(key.clone());
        }
    }

    let total_practice_time = state.total_practice_time + session.duration;
    let last_practice_date = Some(session.date);

    let mut sessions = state.sessions;
    sessions.push(session);

    ProgressState {
        sessions,
        total_practice_time,
        patterns_learned,
        last_practice_date,
        streak_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn session(d: u32, duration: u64, patterns: &[&str]) -> PracticeSession {
        PracticeSession {
            date: day(d),
            duration,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_streak_rules() {
        assert_eq!(next_streak(None, 0, day(5)), 1);
        assert_eq!(next_streak(Some(day(4)), 3, day(5)), 4);
        assert_eq!(next_streak(Some(day(3)), 3, day(5)), 1);
        assert_eq!(next_streak(Some(day(5)), 3, day(5)), 3);
        assert_eq!(next_streak(Some(day(6)), 3, day(5)), 3);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(next_streak(Some(feb_29), 2, day(1)), 3);
    }

    #[test]
    fn test_apply_first_session() {
        let state = apply_session(ProgressState::default(), session(1, 300, &["C Major Scale"]));

        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.total_practice_time, 300);
        assert_eq!(state.patterns_learned, ["C Major Scale"]);
        assert_eq!(state.last_practice_date, Some(day(1)));
        assert_eq!(state.streak_days, 1);
    }

    #[test]
    fn test_apply_accumulates_and_dedupes() {
        let state = apply_session(ProgressState::default(), session(1, 300, &["C Major Scale"]));
        let state = apply_session(
            state,
            session(2, 120, &["A Minor Pentatonic", "C Major Scale"]),
        );
        let state = apply_session(state, session(2, 60, &[]));

        assert_eq!(state.sessions.len(), 3);
        assert_eq!(state.total_practice_time, 480);
        assert_eq!(state.patterns_learned, ["C Major Scale", "A Minor Pentatonic"]);
        assert_eq!(state.streak_days, 2);

        let state = apply_session(state, session(9, 10, &[]));
        assert_eq!(state.streak_days, 1);
        assert_eq!(state.last_practice_date, Some(day(9)));
    }
}
