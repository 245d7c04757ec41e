//! Live session tracking and the auto-start timer

use super::record::PracticeSession;
use chrono::NaiveDateTime;

/// Seconds between becoming visible and an automatic session start
pub const AUTO_START_DELAY_SECS: f64 = 5.0;

/// The session currently in progress, if any
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTracker {
    started_at: Option<NaiveDateTime>,
    patterns: Vec<String>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.started_at
    }

    /// Begin a session, discarding any unfinished one
    pub fn start(&mut self, now: NaiveDateTime) {
        self.started_at = Some(now);
        self.patterns.clear();
    }

    /// Record that a pattern key was practiced. Ignored outside a session;
    /// returns whether the key was new for this session.
    pub fn track(&mut self, key: impl Into<String>) -> bool {
        if !self.is_active() {
            return false;
        }
        let key = key.into();
        if self.patterns.contains(&key) {
            return false;
        }
        self.patterns.push(key);
        true
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whole seconds since the session started
    pub fn elapsed(&self, now: NaiveDateTime) -> u64 {
        self.started_at
            .map_or(0, |start| (now - start).num_seconds().max(0) as u64)
    }

    /// Finish the session, producing the record to fold into progress
    pub fn end(&mut self, now: NaiveDateTime) -> Option<PracticeSession> {
        let duration = self.elapsed(now);
        self.started_at.take()?;

        Some(PracticeSession {
            date: now.date(),
            duration,
            patterns: std::mem::take(&mut self.patterns),
        })
    }

    /// Drop the session without recording it
    pub fn cancel(&mut self) {
        self.started_at = None;
        self.patterns.clear();
    }
}

/// One pending automatic session start.
///
/// Times are seconds on any monotonic clock the host chooses. The timer is
/// armed when the practice surface becomes visible and fires the first time
/// the host polls it after the delay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoStart {
    enabled: bool,
    due: Option<f64>,
}

impl AutoStart {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, due: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn due(&self) -> Option<f64> {
        self.due
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.due = None;
        }
    }

    /// Arm the timer if enabled and no session is running
    pub fn on_visible(&mut self, now: f64, session_active: bool) {
        if self.enabled && !session_active {
            self.due = Some(now + AUTO_START_DELAY_SECS);
        }
    }

    pub fn on_hidden(&mut self) {
        self.due = None;
    }

    pub fn on_session_started(&mut self) {
        self.due = None;
    }

    /// Returns true exactly once when the deadline has passed
    pub fn poll(&mut self, now: f64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
