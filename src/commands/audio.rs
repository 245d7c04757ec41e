//! Audio-related commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use fretwise_core::playback::{PlaybackPlan, seconds_per_beat, unique_notes_for_playback};

/// Length of a single tapped note, in seconds
pub const NOTE_SECONDS: f64 = 0.5;

/// Beats in a count-in when none are given
pub const DEFAULT_COUNT_IN: u32 = 4;

/// Handle `play [all] [loop]`
pub fn cmd_play(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut one_octave = true;
    let mut looping = false;
    for word in args.split_whitespace() {
        match word {
            "all" => one_octave = false,
            "loop" => looping = true,
            other => {
                return CommandResult::Error(format!(
                    "Unknown play option '{}'. Usage: play [all] [loop]",
                    other
                ));
            }
        }
    }

    let notes = unique_notes_for_playback(&ctx.selection.positions(), one_octave);
    if notes.is_empty() {
        return CommandResult::Message("Nothing to play".yellow().to_string());
    }

    let bpm = ctx.settings.bpm;
    let plan = match PlaybackPlan::from_positions(&notes, bpm as f64) {
        Ok(plan) => plan,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let count = plan.len();

    if let Err(e) = ctx.engine.play(plan, looping) {
        return CommandResult::Error(e.to_string());
    }
    ctx.track_current();

    let msg = if looping {
        format!("🔁 Looping {} notes at {} BPM (use 'stop' to stop)", count, bpm)
    } else {
        format!("▶  Playing {} notes at {} BPM", count, bpm)
    };
    CommandResult::Message(msg.bright_green().to_string())
}

/// Handle `stop`
pub fn cmd_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.engine.stop() {
        Ok(_) => CommandResult::Message("⏹  Stopped".bright_yellow().to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `note <string> <fret>`: sound one cell of the fretboard
pub fn cmd_note(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let strings = ctx.selection.board().string_count();
    let parts: Vec<&str> = args.split_whitespace().collect();

    // Strings are numbered from 1 for the lowest-indexed string
    let (string, fret) = match parts.as_slice() {
        [s, f] => match (s.parse::<usize>(), f.parse::<usize>()) {
            (Ok(s), Ok(f)) if s >= 1 => (s - 1, f),
            _ => return CommandResult::Error("Usage: note <string> <fret>".to_string()),
        },
        _ => return CommandResult::Error("Usage: note <string> <fret>".to_string()),
    };

    let Some(cell) = ctx.selection.board().cell(string, fret).copied() else {
        return CommandResult::Error(format!(
            "No such position; strings 1-{}, frets 0-{}",
            strings,
            ctx.selection.board().max_fret()
        ));
    };

    if let Err(e) = ctx.output.schedule_tone(cell.frequency, NOTE_SECONDS, 0.0) {
        return CommandResult::Error(e.to_string());
    }
    ctx.track_current();

    let in_pattern = ctx.selection.pattern.contains(cell.note, ctx.selection.root);
    let label = format!("♪ {} ({:.2} Hz)", cell.pitch(), cell.frequency);
    CommandResult::Message(if in_pattern {
        label.bright_green().to_string()
    } else {
        label.dimmed().to_string()
    })
}

/// Handle `click [accent]`
pub fn cmd_click(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let accent = match args {
        "" => false,
        "accent" => true,
        _ => return CommandResult::Error("Usage: click [accent]".to_string()),
    };
    match ctx.engine.click(accent) {
        Ok(_) => CommandResult::Success,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `count [beats]`: metronome count-in at the current tempo
pub fn cmd_count(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let beats = if args.is_empty() {
        DEFAULT_COUNT_IN
    } else {
        match args.parse::<u32>() {
            Ok(n) if (1..=32).contains(&n) => n,
            _ => return CommandResult::Error("Beats must be between 1 and 32".to_string()),
        }
    };

    let per_beat = match seconds_per_beat(ctx.settings.bpm as f64) {
        Ok(s) => s,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    match ctx.engine.count_in(beats, per_beat) {
        Ok(_) => CommandResult::Success,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
