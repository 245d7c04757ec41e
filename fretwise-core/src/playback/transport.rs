//! Playback state machine
//!
//! `Idle -> Playing` when a non-empty plan is started, `Playing -> Idle` when
//! its cycle elapses or on stop. A looping plan re-dispatches itself at each
//! cycle boundary instead of going idle. The transport never sleeps: the host
//! asks for [`Transport::next_deadline`] and calls [`Transport::advance`] once
//! that time is reached on the output's clock.

use super::output::AudioOutput;
use super::schedule::PlaybackPlan;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

#[derive(Debug, Default)]
pub struct Transport {
    state: PlaybackState,
    plan: Option<PlaybackPlan>,
    looping: bool,
    deadline: Option<f64>,
    cycles: u64,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_playing() && self.looping
    }

    /// Completed passes through the current plan
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Output-clock time at which [`Transport::advance`] has work to do
    pub fn next_deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Start `plan`, replacing whatever was playing.
    ///
    /// An empty plan is ignored and leaves the current state untouched.
    /// Returns whether playback started.
    pub fn play(&mut self, plan: PlaybackPlan, looping: bool, output: &dyn AudioOutput) -> Result<bool> {
        if plan.is_empty() {
            return Ok(false);
        }

        output.stop_all()?;
        plan.dispatch(output, 0.0)?;

        self.deadline = Some(output.now() + plan.cycle);
        self.plan = Some(plan);
        self.looping = looping;
        self.cycles = 0;
        self.state = PlaybackState::Playing;
        Ok(true)
    }

    /// Silence everything and go idle. Safe to call when already idle.
    pub fn stop(&mut self, output: &dyn AudioOutput) -> Result<()> {
        self.reset();
        output.stop_all()
    }

    fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.plan = None;
        self.looping = false;
        self.deadline = None;
    }

    /// Handle an elapsed deadline: re-trigger a loop or finish playback
    pub fn advance(&mut self, output: &dyn AudioOutput) -> Result<()> {
        let now = output.now();
        let Some(deadline) = self.deadline else {
            return Ok(());
        };
        if now < deadline {
            return Ok(());
        }

        self.cycles += 1;

        let plan = match (&self.plan, self.looping) {
            (Some(plan), true) => plan,
            _ => {
                self.reset();
                return Ok(());
            }
        };

        // Schedule the next pass to begin exactly on the cycle boundary
        let offset = (deadline - now).max(0.0);
        plan.dispatch(output, offset)?;

        let next = deadline + plan.cycle;
        // If the host fell a whole cycle behind, restart the grid from now
        self.deadline = Some(if next <= now { now + plan.cycle } else { next });
        Ok(())
    }
}
