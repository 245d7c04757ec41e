//! Pattern playback engine
//!
//! A dedicated thread owns the [`Transport`] and wakes up at the next loop
//! deadline or count-in tick, whichever comes first. Commands arrive over a
//! channel, so a stop or a new pattern interrupts the wait immediately.

use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use fretwise_core::playback::{AudioOutput, PlaybackPlan, Transport};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shortest wait between wake-ups, so a stalled clock cannot spin the thread
const MIN_WAIT_SECS: f64 = 0.005;

/// Commands that can be sent to the playback engine
#[derive(Debug)]
pub enum PlaybackCommand {
    /// Start a plan immediately, interrupting whatever is playing
    Play { plan: PlaybackPlan, looping: bool },
    /// Fade out and stop playback
    Stop,
    /// Play one metronome click now
    Click { accent: bool },
    /// Count `beats` clicks at the given spacing, accenting the first
    CountIn { beats: u32, seconds_per_beat: f64 },
    /// Shutdown the playback engine
    Shutdown,
}

/// Engine for pattern playback on a persistent thread
pub struct PlaybackEngine {
    command_tx: Sender<PlaybackCommand>,
    is_playing: Arc<AtomicBool>,
    _thread: JoinHandle<()>,
}

impl PlaybackEngine {
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        let (tx, rx) = unbounded();
        let is_playing = Arc::new(AtomicBool::new(false));
        let is_playing_clone = is_playing.clone();

        let thread = thread::spawn(move || {
            PlaybackLoop::new(output, rx, is_playing_clone).run();
        });

        PlaybackEngine {
            command_tx: tx,
            is_playing,
            _thread: thread,
        }
    }

    fn send(&self, command: PlaybackCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| anyhow::anyhow!("Failed to send command: {}", e))
    }

    /// Play a plan once, or repeatedly when `looping`
    pub fn play(&self, plan: PlaybackPlan, looping: bool) -> Result<()> {
        self.send(PlaybackCommand::Play { plan, looping })
    }

    pub fn stop(&self) -> Result<()> {
        self.send(PlaybackCommand::Stop)
    }

    pub fn click(&self, accent: bool) -> Result<()> {
        self.send(PlaybackCommand::Click { accent })
    }

    pub fn count_in(&self, beats: u32, seconds_per_beat: f64) -> Result<()> {
        self.send(PlaybackCommand::CountIn {
            beats,
            seconds_per_beat,
        })
    }

    /// Whether a plan is currently playing
    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::Relaxed)
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        let _ = self.command_tx.send(PlaybackCommand::Shutdown);
    }
}

/// Remaining clicks of a count-in
struct CountIn {
    next: f64,
    remaining: u32,
    interval: f64,
    accent: bool,
}

/// Internal playback loop that runs in a dedicated thread
struct PlaybackLoop {
    output: Arc<dyn AudioOutput>,
    command_rx: Receiver<PlaybackCommand>,
    is_playing: Arc<AtomicBool>,
    transport: Transport,
    count_in: Option<CountIn>,
}

impl PlaybackLoop {
    fn new(output: Arc<dyn AudioOutput>, command_rx: Receiver<PlaybackCommand>, is_playing: Arc<AtomicBool>) -> Self {
        Self {
            output,
            command_rx,
            is_playing,
            transport: Transport::new(),
            count_in: None,
        }
    }

    fn next_wake(&self) -> Option<f64> {
        let tick = self.count_in.as_ref().map(|c| c.next);
        match (self.transport.next_deadline(), tick) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn run(&mut self) {
        loop {
            let message = match self.next_wake() {
                Some(at) => {
                    let wait = (at - self.output.now()).max(MIN_WAIT_SECS);
                    self.command_rx.recv_timeout(Duration::from_secs_f64(wait))
                }
                None => self
                    .command_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            let action = match message {
                Ok(cmd) => self.handle_command(cmd),
                Err(RecvTimeoutError::Timeout) => {
                    self.on_wake();
                    LoopAction::Continue
                }
                Err(RecvTimeoutError::Disconnected) => LoopAction::Shutdown,
            };

            self.is_playing
                .store(self.transport.is_playing(), Ordering::Relaxed);
            if let LoopAction::Shutdown = action {
                break;
            }
        }

        // Clean up
        if let Err(e) = self.transport.stop(self.output.as_ref()) {
            log::warn!("Failed to stop playback on shutdown: {}", e);
        }
        self.is_playing.store(false, Ordering::Relaxed);
    }

    fn handle_command(&mut self, cmd: PlaybackCommand) -> LoopAction {
        match cmd {
            PlaybackCommand::Play { plan, looping } => {
                let notes = plan.len();
                match self.transport.play(plan, looping, self.output.as_ref()) {
                    Ok(true) => log::debug!("Playing {} notes (looping: {})", notes, looping),
                    Ok(false) => log::debug!("Ignoring empty plan"),
                    Err(e) => log::error!("Failed to start playback: {}", e),
                }
            }
            PlaybackCommand::Stop => {
                self.count_in = None;
                if let Err(e) = self.transport.stop(self.output.as_ref()) {
                    log::error!("Failed to stop playback: {}", e);
                }
            }
            PlaybackCommand::Click { accent } => {
                if let Err(e) = self.output.click(accent) {
                    log::error!("Failed to play click: {}", e);
                }
            }
            PlaybackCommand::CountIn {
                beats,
                seconds_per_beat,
            } => {
                self.count_in = (beats > 0).then(|| CountIn {
                    next: self.output.now(),
                    remaining: beats,
                    interval: seconds_per_beat,
                    accent: true,
                });
                self.on_wake();
            }
            PlaybackCommand::Shutdown => {
                return LoopAction::Shutdown;
            }
        }
        LoopAction::Continue
    }

    fn on_wake(&mut self) {
        if let Err(e) = self.transport.advance(self.output.as_ref()) {
            log::error!("Failed to re-trigger loop: {}", e);
        }
        self.tick_count_in();
    }

    fn tick_count_in(&mut self) {
        let now = self.output.now();
        let Some(count) = self.count_in.as_mut() else {
            return;
        };
        if now < count.next {
            return;
        }

        if let Err(e) = self.output.click(count.accent) {
            log::error!("Failed to play click: {}", e);
        }
        count.accent = false;
        count.remaining -= 1;
        count.next += count.interval;
        if count.remaining == 0 {
            self.count_in = None;
        }
    }
}

enum LoopAction {
    Continue,
    Shutdown,
}
