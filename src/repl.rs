//! REPL (Read-Eval-Print Loop) for the fretboard trainer

use crate::audio::audio::open_output;
use crate::audio::playback_engine::PlaybackEngine;
use crate::commands::{CommandContext, CommandRegistry, CommandResult, create_registry};
use crate::storage::Storage;
use anyhow::{Result, anyhow};
use colored::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use fretwise_core::progress::format_duration;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive fretboard REPL
pub struct Repl {
    editor: Option<DefaultEditor>,
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    /// Create a REPL, optionally opening a shared route path
    pub fn new(route: Option<String>) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| anyhow!("Failed to initialize line editor: {}", e))?;

        let output = open_output();
        let engine = Arc::new(PlaybackEngine::new(output.clone()));
        let storage = Storage::from_env();
        log::debug!("Data directory: {}", storage.dir().display());

        let mut repl = Self::with_context(CommandContext::new(output, engine, storage));
        repl.editor = Some(editor);

        if let Some(path) = route {
            if repl.ctx.open_route(&path).is_empty() {
                log::warn!("Ignoring unrecognised route '{}'", path);
            }
        }
        Ok(repl)
    }

    fn with_context(ctx: CommandContext) -> Self {
        let (tx_input, rx_input) = unbounded();
        Self {
            editor: None,
            tx_input,
            rx_input,
            registry: create_registry(),
            ctx,
        }
    }

    /// Run one input line; returns false when the REPL should exit
    fn execute(&mut self, line: &str) -> bool {
        let keep_going = match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Success => true,
            CommandResult::Message(msg) => {
                println!("{}", msg);
                true
            }
            CommandResult::Exit => false,
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
                true
            }
            CommandResult::NotACommand => {
                println!(
                    "{} Unknown command '{}'. Type '{}' for a list",
                    "Error:".bright_red().bold(),
                    line,
                    "help".bright_green()
                );
                true
            }
        };
        self.poll_auto_start();
        keep_going
    }

    /// Start a session if the auto-start deadline has passed
    fn poll_auto_start(&mut self) {
        if self.ctx.auto_start.poll(self.ctx.uptime()) && self.ctx.start_session() {
            println!("\n{}", "⏱  Practice session started automatically".bright_green());
        }
    }

    /// Wait for the next input, waking early for a pending auto-start
    fn next_event(&self) -> Option<Result<ReplEvent, crossbeam_channel::RecvError>> {
        match self.ctx.auto_start.due() {
            Some(due) => {
                let wait = Duration::from_secs_f64((due - self.ctx.uptime()).max(0.0));
                crossbeam_channel::select! {
                    recv(self.rx_input) -> msg => Some(msg),
                    default(wait) => None,
                }
            }
            None => Some(self.rx_input.recv()),
        }
    }

    /// Leave cleanly: stop audio and keep any running session
    fn shutdown(&mut self) {
        println!("{} 🎸", "Goodbye!".bright_cyan());
        if let Err(e) = self.ctx.engine.stop() {
            log::warn!("Failed to stop playback: {}", e);
        }
        self.ctx.auto_start.on_hidden();
        if let Some(session) = self.ctx.end_session() {
            println!(
                "Saved {} of practice ({} patterns)",
                format_duration(session.duration),
                session.patterns.len()
            );
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎸".bright_yellow(),
            "Fretwise Fretboard Trainer".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "root A".cyan(),
            "pattern minor pentatonic".cyan(),
            "play loop".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );
        self.execute("show");

        let now = self.ctx.uptime();
        let session_active = self.ctx.tracker.is_active();
        self.ctx.auto_start.on_visible(now, session_active);
        if self.ctx.auto_start.is_armed() {
            println!("{}", "A practice session will start in a few seconds".dimmed());
        }

        // Move editor to thread
        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow!("Repl editor missing"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "fretwise>".bright_magenta().bold());
            let readline = editor.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        loop {
            match self.next_event() {
                // Auto-start deadline reached while idle
                None => self.poll_auto_start(),
                Some(Ok(ReplEvent::Input(res))) => match res {
                    Ok(line) => {
                        if line.is_empty() {
                            self.poll_auto_start();
                            continue;
                        }
                        if !self.execute(&line) {
                            break;
                        }
                    }
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                    Err(err) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                    }
                },
                Some(Err(_)) => break, // Channel closed
            }
        }

        self.shutdown();
        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(route: Option<String>) -> Result<()> {
    let mut repl = Repl::new(route)?;
    repl.run()
}
