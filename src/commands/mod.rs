//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod audio;
pub mod general;
pub mod practice;

use crate::audio::playback_engine::PlaybackEngine;
use crate::display::{DisplayOptions, LabelMode, render_fretboard};
use crate::storage::Storage;
use chrono::NaiveDateTime;
use fretwise_core::matcher::{PatternPosition, match_positions};
use fretwise_core::playback::AudioOutput;
use fretwise_core::progress::{
    AutoStart, PROGRESS_KEY, PracticeSession, ProgressState, SETTINGS_KEY, SessionTracker,
    Settings, apply_session,
};
use fretwise_core::route::{self, RouteState};
use fretwise_core::types::{instrument, pattern};
use fretwise_core::{Fretboard, InstrumentConfig, Pattern, PatternFamily, PitchClass};
use std::sync::Arc;
use std::time::Instant;

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Input did not match any command
    NotACommand,
    /// Error occurred
    Error(String),
}

/// What is currently on the fretboard
pub struct Selection {
    pub pattern: &'static Pattern,
    pub root: PitchClass,
    pub range: Option<(usize, usize)>,
    pub labels: LabelMode,
    board: Fretboard,
}

impl Selection {
    pub fn new(instrument_id: &str) -> Self {
        Self {
            pattern: pattern::default_pattern(),
            root: PitchClass::C,
            range: None,
            labels: LabelMode::default(),
            board: Fretboard::generate(instrument_id),
        }
    }

    pub fn instrument(&self) -> &'static InstrumentConfig {
        self.board.instrument()
    }

    pub fn family(&self) -> PatternFamily {
        self.pattern.family()
    }

    pub fn board(&self) -> &Fretboard {
        &self.board
    }

    /// Switch instrument; the grid is rebuilt and a range past the last fret is dropped
    pub fn set_instrument(&mut self, config: &'static InstrumentConfig) {
        self.board = Fretboard::from_config(config);
        if let Some((_, end)) = self.range {
            if end > config.frets {
                self.range = None;
            }
        }
    }

    pub fn positions(&self) -> Vec<PatternPosition> {
        match_positions(self.root, self.pattern.intervals, &self.board)
    }

    /// Key recorded in practice sessions, e.g. "A Minor Pentatonic"
    pub fn practice_key(&self) -> String {
        self.pattern.practice_key(self.root)
    }

    pub fn path(&self) -> String {
        route::build_path(self.instrument().id, self.family(), Some(self.pattern), self.root)
    }

    /// Apply each decoded route segment independently
    pub fn apply_route(&mut self, state: &RouteState) {
        if let Some(config) = state.instrument {
            self.set_instrument(config);
        }
        if let Some(family) = state.family {
            self.pattern = match state.pattern {
                Some(p) => p,
                None if self.family() == family => self.pattern,
                None => &family.patterns()[0],
            };
        }
        if let Some(root) = state.root {
            self.root = root;
        }
    }

    pub fn render(&self) -> String {
        let options = DisplayOptions {
            labels: self.labels,
            range: self.range,
        };
        render_fretboard(&self.board, &self.positions(), self.root, &options)
    }
}

/// Context passed to command handlers
pub struct CommandContext {
    pub selection: Selection,
    pub settings: Settings,
    pub progress: ProgressState,
    pub tracker: SessionTracker,
    pub auto_start: AutoStart,
    pub output: Arc<dyn AudioOutput>,
    pub engine: Arc<PlaybackEngine>,
    pub storage: Storage,
    started: Instant,
}

impl CommandContext {
    /// Build a context from stored settings and progress
    pub fn new(output: Arc<dyn AudioOutput>, engine: Arc<PlaybackEngine>, storage: Storage) -> Self {
        let settings = storage.load::<Settings>(SETTINGS_KEY).sanitized();
        let progress = storage.load::<ProgressState>(PROGRESS_KEY);

        Self {
            selection: Selection::new(&settings.instrument),
            auto_start: AutoStart::new(settings.auto_start),
            settings,
            progress,
            tracker: SessionTracker::new(),
            output,
            engine,
            storage,
            started: Instant::now(),
        }
    }

    /// Seconds since the context was created, the clock used for auto-start
    pub fn uptime(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Local wall-clock time; session dates are local calendar days
    pub fn local_now() -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    pub fn save_settings(&self) {
        if let Err(e) = self.storage.save(SETTINGS_KEY, &self.settings) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn save_progress(&self) {
        if let Err(e) = self.storage.save(PROGRESS_KEY, &self.progress) {
            log::warn!("Failed to save progress: {}", e);
        }
    }

    /// Begin a practice session; returns false if one is already running
    pub fn start_session(&mut self) -> bool {
        if self.tracker.is_active() {
            return false;
        }
        self.tracker.start(Self::local_now());
        self.auto_start.on_session_started();
        log::info!("Practice session started");
        true
    }

    /// Finish the running session and fold it into the stored progress
    pub fn end_session(&mut self) -> Option<PracticeSession> {
        let session = self.tracker.end(Self::local_now())?;
        let progress = std::mem::take(&mut self.progress);
        self.progress = apply_session(progress, session.clone());
        self.save_progress();
        log::info!(
            "Practice session ended after {}s with {} patterns",
            session.duration,
            session.patterns.len()
        );
        Some(session)
    }

    /// Record the current pattern against the running session, if any
    pub fn track_current(&mut self) {
        let key = self.selection.practice_key();
        if self.tracker.track(key.as_str()) {
            log::debug!("Tracked {}", key);
        }
    }

    /// Forget all progress and any running session
    pub fn reset_progress(&mut self) {
        self.progress = ProgressState::default();
        self.tracker.cancel();
        if let Err(e) = self.storage.remove(PROGRESS_KEY) {
            log::warn!("Failed to erase progress: {}", e);
        }
    }

    /// Persisted instrument follows the fretboard
    pub fn set_instrument(&mut self, config: &'static InstrumentConfig) {
        self.selection.set_instrument(config);
        self.settings.instrument = config.id.to_string();
        self.save_settings();
    }

    /// Decode a route path and apply it to the selection
    pub fn open_route(&mut self, path: &str) -> RouteState {
        let state = route::parse_path(path);
        if let Some(config) = state.instrument {
            self.settings.instrument = config.id.to_string();
            self.save_settings();
        }
        self.selection.apply_route(&state);
        state
    }
}

/// Look up an instrument by id or display name
pub fn find_instrument(name: &str) -> Option<&'static InstrumentConfig> {
    instrument::lookup(&name.to_lowercase()).or_else(|| {
        instrument::list()
            .iter()
            .copied()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    })
}

/// Look up a pattern by id, slug or display name
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    let wanted = name.trim();
    pattern::find_any(wanted).or_else(|| {
        let slug = route::slugify(wanted);
        pattern::all().find(|p| p.slug() == slug || p.name.eq_ignore_ascii_case(wanted))
    })
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "session start")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Fretboard and selection
    registry.register("show", practice::cmd_show);
    registry.register("instrument", practice::cmd_instrument);
    registry.register("root", practice::cmd_root);
    registry.register("pattern", practice::cmd_pattern);
    registry.register("patterns", practice::cmd_patterns);
    registry.register("range", practice::cmd_range);
    registry.register("notes", practice::cmd_notes);
    registry.register("intervals", practice::cmd_intervals);
    registry.register("random", practice::cmd_random);
    registry.register("url", practice::cmd_url);
    registry.register("open", practice::cmd_open);

    // Sessions and progress
    registry.register("session start", practice::cmd_session_start);
    registry.register("session end", practice::cmd_session_end);
    registry.register("session status", practice::cmd_session_status);
    registry.register("session", practice::cmd_session_status);
    registry.register("stats", practice::cmd_stats);
    registry.register("autostart", practice::cmd_autostart);
    registry.register("reset", practice::cmd_reset);

    // Audio
    registry.register("play", audio::cmd_play);
    registry.register("stop", audio::cmd_stop);
    registry.register("note", audio::cmd_note);
    registry.register("click", audio::cmd_click);
    registry.register("count", audio::cmd_count);

    // General commands
    registry.register("tempo", general::cmd_tempo);
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::audio::audio::SilentOutput;

    /// Context backed by silent audio and a scratch data directory
    pub fn context(name: &str) -> CommandContext {
        let dir = std::env::temp_dir().join(format!("fretwise-cmd-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let output: Arc<dyn AudioOutput> = Arc::new(SilentOutput::new());
        let engine = Arc::new(PlaybackEngine::new(output.clone()));
        CommandContext::new(output, engine, Storage::at(dir))
    }
}
