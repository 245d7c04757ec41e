//! General REPL commands (help, quit, tempo)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use fretwise_core::progress::{MAX_BPM, MIN_BPM, clamp_bpm};

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `tempo [bpm]` command
pub fn cmd_tempo(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current tempo: {} BPM", ctx.settings.bpm));
    }

    match args.parse::<f64>() {
        Ok(bpm) if bpm.is_finite() => {
            let clamped = clamp_bpm(bpm);
            ctx.settings.bpm = clamped;
            ctx.save_settings();
            let mut msg = format!("🎵 Tempo set to {} BPM", clamped);
            if clamped as f64 != bpm.round() {
                msg.push_str(&format!(" (allowed range {}-{})", MIN_BPM, MAX_BPM));
            }
            CommandResult::Message(msg.bright_green().to_string())
        }
        _ => CommandResult::Error(format!(
            "Invalid tempo. Use a value between {}-{} BPM",
            MIN_BPM, MAX_BPM
        )),
    }
}

/// Print help information
fn print_help() {
    println!("{}", "🎸 Fretwise Help".bold());
    println!("{}", "================".bold());
    println!();
    println!("{}", "Fretboard:".green());
    println!("  {}                 - Draw the fretboard", "show".cyan());
    println!("  {}    - List or switch instruments", "instrument [id]".cyan());
    println!("  {}          - Set the root (C, F#, Bb...)", "root <note>".cyan());
    println!("  {}       - Select a pattern by id or name", "pattern <name>".cyan());
    println!("  {}    - List scales, pentatonics, arpeggios", "patterns [family]".cyan());
    println!(
        "  {} - Highlight a fret window",
        "range [<a> <b> | auto | off]".cyan()
    );
    println!("  {}           - Label cells with notes (off: dots)", "notes [off]".cyan());
    println!("  {}  - Toggle interval labels", "intervals [on|off]".cyan());
    println!("  {}               - Random pattern and key", "random".cyan());
    println!();
    println!("{}", "Playback:".green());
    println!(
        "  {}   - Play one octave, every position, or loop",
        "play [all] [loop]".cyan()
    );
    println!("  {}                 - Stop playback", "stop".cyan());
    println!("  {}  - Sound one position (strings from 1)", "note <string> <fret>".cyan());
    println!("  {}         - Show or set tempo ({}-{})", "tempo [bpm]".cyan(), MIN_BPM, MAX_BPM);
    println!("  {}       - Metronome click", "click [accent]".cyan());
    println!("  {}        - Count-in at the current tempo", "count [beats]".cyan());
    println!();
    println!("{}", "Sharing:".green());
    println!("  {}         - Shareable link for this view", "url [origin]".cyan());
    println!("  {}          - Open a shared link or path", "open <path>".cyan());
    println!();
    println!("{}", "Progress:".green());
    println!(
        "  {} - Track a practice session",
        "session [start|end|status]".cyan()
    );
    println!("  {}                - Practice statistics", "stats".cyan());
    println!("  {}    - Start sessions automatically", "autostart [on|off]".cyan());
    println!("  {}        - Erase practice history", "reset confirm".cyan());
    println!();
    println!("  {}            - Exit", "quit, exit".cyan());
}
