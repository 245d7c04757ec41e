//! Fretboard selection, route and practice-progress commands

use crate::commands::{CommandContext, CommandResult, find_instrument, find_pattern};
use crate::display::{LabelMode, describe_pattern};
use colored::*;
use fretwise_core::matcher::suggested_range;
use fretwise_core::progress::format_duration;
use fretwise_core::route;
use fretwise_core::types::{instrument, pattern};
use fretwise_core::{PatternFamily, PitchClass};
use rand::Rng;
use rand::seq::IteratorRandom;

/// Origin used by `url` when none is given
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

fn show(ctx: &CommandContext) -> String {
    let selection = &ctx.selection;
    let mut out = format!(
        "{} · {}\n",
        selection.instrument().name.bright_yellow().bold(),
        describe_pattern(selection.pattern, selection.root, selection.labels)
    );
    if let Some((start, end)) = selection.range {
        out.push_str(&format!("Practice range: frets {}-{}\n", start, end).dimmed().to_string());
    }
    out.push_str(&selection.render());
    out
}

/// Handle `show`
pub fn cmd_show(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(show(ctx))
}

/// Handle `instrument [id]`
pub fn cmd_instrument(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let current = ctx.selection.instrument().id;
        let list: Vec<String> = instrument::list()
            .iter()
            .map(|c| {
                let line = format!("  {:<8} {} strings, {} frets", c.id, c.strings, c.frets);
                if c.id == current {
                    line.bright_green().to_string()
                } else {
                    line
                }
            })
            .collect();
        return CommandResult::Message(format!("Instruments:\n{}", list.join("\n")));
    }

    match find_instrument(args) {
        Some(config) => {
            ctx.set_instrument(config);
            CommandResult::Message(show(ctx))
        }
        None => CommandResult::Error(format!("Unknown instrument '{}'", args)),
    }
}

/// Handle `root <note>`
pub fn cmd_root(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Root: {}", ctx.selection.root));
    }

    match args.parse::<PitchClass>() {
        Ok(root) => {
            ctx.selection.root = root;
            CommandResult::Message(show(ctx))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `pattern <id | slug | name>`
pub fn cmd_pattern(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let p = ctx.selection.pattern;
        return CommandResult::Message(format!(
            "{} ({}, {})\n{}",
            p.name.bright_cyan().bold(),
            p.family(),
            p.category,
            p.description.dimmed()
        ));
    }

    match find_pattern(args) {
        Some(p) => {
            ctx.selection.pattern = p;
            CommandResult::Message(show(ctx))
        }
        None => CommandResult::Error(format!(
            "Unknown pattern '{}'. Type 'patterns' to list them",
            args
        )),
    }
}

/// Handle `patterns [family]`
pub fn cmd_patterns(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let families: Vec<PatternFamily> = if args.is_empty() {
        PatternFamily::ALL.to_vec()
    } else {
        match PatternFamily::from_slug(&args.to_lowercase()) {
            Some(family) => vec![family],
            None => return CommandResult::Error(format!("Unknown pattern family '{}'", args)),
        }
    };

    let current = ctx.selection.pattern;
    let mut out = Vec::new();
    for family in families {
        out.push(family.label().bold().to_string());
        for category in family.categories() {
            out.push(format!("  {}", category.label().green()));
            for p in pattern::by_category(*category) {
                let line = format!("    {:<18} {}", p.id, p.name);
                out.push(if p == current {
                    line.bright_cyan().bold().to_string()
                } else {
                    line
                });
            }
        }
    }
    CommandResult::Message(out.join("\n"))
}

/// Handle `range [start end | auto | off]`
pub fn cmd_range(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let max_fret = ctx.selection.board().max_fret();
    let parts: Vec<&str> = args.split_whitespace().collect();

    match parts.as_slice() {
        [] => match ctx.selection.range {
            Some((start, end)) => CommandResult::Message(format!("Practice range: frets {}-{}", start, end)),
            None => CommandResult::Message("Practice range: whole neck".to_string()),
        },
        ["off"] => {
            ctx.selection.range = None;
            CommandResult::Message(show(ctx))
        }
        ["auto"] => {
            ctx.selection.range = Some(suggested_range(ctx.selection.root, ctx.selection.board()));
            CommandResult::Message(show(ctx))
        }
        [start, end] => match (start.parse::<usize>(), end.parse::<usize>()) {
            (Ok(start), Ok(end)) if start <= end && end <= max_fret => {
                ctx.selection.range = Some((start, end));
                CommandResult::Message(show(ctx))
            }
            _ => CommandResult::Error(format!(
                "Range must be two frets between 0 and {}, lowest first",
                max_fret
            )),
        },
        _ => CommandResult::Error("Usage: range [<start> <end> | auto | off]".to_string()),
    }
}

/// Handle `notes`: label cells with note names, or `notes off` for plain dots
pub fn cmd_notes(args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.selection.labels = match args {
        "off" => LabelMode::Dots,
        _ => LabelMode::Notes,
    };
    CommandResult::Message(show(ctx))
}

/// Handle `intervals`: toggle interval labels
pub fn cmd_intervals(args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.selection.labels = match (args, ctx.selection.labels) {
        ("on", _) => LabelMode::Intervals,
        ("off", _) => LabelMode::Notes,
        (_, LabelMode::Intervals) => LabelMode::Notes,
        _ => LabelMode::Intervals,
    };
    CommandResult::Message(show(ctx))
}

/// Handle `random`: pick any pattern in any key
pub fn cmd_random(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut rng = rand::thread_rng();
    let Some(p) = pattern::all().choose(&mut rng) else {
        return CommandResult::Error("Pattern catalog is empty".to_string());
    };
    ctx.selection.pattern = p;
    ctx.selection.root = PitchClass::wrapping(rng.gen_range(0..12));
    CommandResult::Message(show(ctx))
}

/// Handle `url [origin]`
pub fn cmd_url(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let origin = if args.is_empty() { DEFAULT_ORIGIN } else { args };
    let selection = &ctx.selection;
    let url = route::shareable_url(
        origin,
        selection.instrument().id,
        selection.family(),
        Some(selection.pattern),
        selection.root,
    );
    CommandResult::Message(url.bright_blue().underline().to_string())
}

/// Handle `open <path>`
pub fn cmd_open(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: open <path or url>".to_string());
    }
    let state = ctx.open_route(args);
    if state.is_empty() {
        return CommandResult::Error(format!("Nothing recognised in '{}'", args));
    }
    CommandResult::Message(show(ctx))
}

/// Handle `session start`
pub fn cmd_session_start(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if ctx.start_session() {
        CommandResult::Message("⏱  Practice session started".bright_green().to_string())
    } else {
        CommandResult::Error("A session is already running".to_string())
    }
}

/// Handle `session end`
pub fn cmd_session_end(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.end_session() {
        Some(session) => CommandResult::Message(format!(
            "{} {} practiced, {} patterns. Streak: {} days",
            "✓ Session saved:".bright_green(),
            format_duration(session.duration),
            session.patterns.len(),
            ctx.progress.streak_days
        )),
        None => CommandResult::Error("No session is running".to_string()),
    }
}

/// Handle `session` / `session status`
pub fn cmd_session_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !ctx.tracker.is_active() {
        let hint = if ctx.auto_start.is_armed() {
            " (auto-start pending)"
        } else {
            ""
        };
        return CommandResult::Message(format!("No session running{}", hint));
    }

    let elapsed = ctx.tracker.elapsed(CommandContext::local_now());
    let mut out = format!("Session running: {}", format_duration(elapsed).bright_green());
    if let Some(started) = ctx.tracker.started_at() {
        out.push_str(&format!(" (since {})", started.format("%H:%M")));
    }
    for key in ctx.tracker.patterns() {
        out.push_str(&format!("\n  • {}", key));
    }
    CommandResult::Message(out)
}

/// Handle `stats`
pub fn cmd_stats(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let today = CommandContext::local_now().date();
    let stats = ctx.progress.stats(today);

    let mut out = vec![
        "Practice statistics".bold().to_string(),
        format!("  Sessions:        {}", stats.total_sessions),
        format!("  Total time:      {}", format_duration(stats.total_time)),
        format!("  This week:       {}", format_duration(stats.weekly_time)),
        format!("  Patterns learned: {}", stats.total_patterns),
        format!("  Streak:          {} days", stats.streak.to_string().bright_yellow()),
    ];
    if !stats.recent_sessions.is_empty() {
        out.push("Recent sessions".bold().to_string());
        for session in stats.recent_sessions.iter().rev() {
            out.push(format!(
                "  {}  {:>8}  {}",
                session.date,
                format_duration(session.duration),
                session.patterns.join(", ").dimmed()
            ));
        }
    }
    CommandResult::Message(out.join("\n"))
}

/// Handle `autostart [on|off]`
pub fn cmd_autostart(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let enabled = match args {
        "" => {
            let state = if ctx.settings.auto_start { "on" } else { "off" };
            return CommandResult::Message(format!("Auto-start is {}", state));
        }
        "on" => true,
        "off" => false,
        _ => return CommandResult::Error("Usage: autostart [on|off]".to_string()),
    };

    ctx.settings.auto_start = enabled;
    ctx.auto_start.set_enabled(enabled);
    ctx.save_settings();
    CommandResult::Message(format!(
        "Auto-start {}",
        if enabled { "enabled" } else { "disabled" }
    ))
}

/// Handle `reset`
pub fn cmd_reset(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args != "confirm" {
        return CommandResult::Message(
            "This erases all practice history. Type 'reset confirm' to proceed".yellow().to_string(),
        );
    }
    ctx.reset_progress();
    CommandResult::Message("Progress reset".bright_green().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use fretwise_core::progress::PROGRESS_KEY;

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(msg) => msg,
            other => panic!("expected a message, got {:?}", other),
        }
    }

    #[test]
    fn test_root_and_pattern_selection() {
        colored::control::set_override(false);
        let mut ctx = context("select");

        let out = message(cmd_root("Bb", &mut ctx));
        assert!(out.contains("A# Major Scale"));
        assert_eq!(ctx.selection.root, PitchClass::wrapping(10));

        message(cmd_pattern("minor pentatonic", &mut ctx));
        assert_eq!(ctx.selection.pattern.id, "minor-pentatonic");

        assert!(matches!(cmd_root("H", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_pattern("gypsy", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_instrument_switch_persists() {
        let mut ctx = context("instrument");
        message(cmd_instrument("ukulele", &mut ctx));
        assert_eq!(ctx.selection.board().string_count(), 4);
        assert_eq!(ctx.settings.instrument, "ukulele");
        assert!(matches!(cmd_instrument("banjo", &mut ctx), CommandResult::Error(_)));
        let _ = std::fs::remove_dir_all(ctx.storage.dir());
    }

    #[test]
    fn test_range_commands() {
        let mut ctx = context("range");
        message(cmd_range("auto", &mut ctx));
        // Root search starts from the top string, finding C at fret 8
        assert_eq!(ctx.selection.range, Some((6, 12)));

        message(cmd_range("3 7", &mut ctx));
        assert_eq!(ctx.selection.range, Some((3, 7)));

        assert!(matches!(cmd_range("7 3", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_range("0 99", &mut ctx), CommandResult::Error(_)));

        message(cmd_range("off", &mut ctx));
        assert_eq!(ctx.selection.range, None);
    }

    #[test]
    fn test_label_toggles() {
        let mut ctx = context("labels");
        message(cmd_intervals("", &mut ctx));
        assert_eq!(ctx.selection.labels, LabelMode::Intervals);
        message(cmd_intervals("", &mut ctx));
        assert_eq!(ctx.selection.labels, LabelMode::Notes);
        message(cmd_notes("off", &mut ctx));
        assert_eq!(ctx.selection.labels, LabelMode::Dots);
    }

    #[test]
    fn test_url_and_open() {
        colored::control::set_override(false);
        let mut ctx = context("url");
        message(cmd_open("https://example.com/guitar-trainer/ukulele/pentatonics/blues-scale/d-sharp", &mut ctx));
        assert_eq!(ctx.selection.pattern.id, "blues-scale");

        let url = message(cmd_url("https://example.com/", &mut ctx));
        assert_eq!(url, "https://example.com/guitar-trainer/ukulele/pentatonics/blues-scale/d-sharp");

        assert!(matches!(cmd_open("/nowhere", &mut ctx), CommandResult::Error(_)));
        let _ = std::fs::remove_dir_all(ctx.storage.dir());
    }

    #[test]
    fn test_random_selects_catalog_pattern() {
        let mut ctx = context("random");
        message(cmd_random("", &mut ctx));
        assert!(pattern::find_any(ctx.selection.pattern.id).is_some());
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut ctx = context("reset");
        ctx.start_session();
        ctx.end_session();
        assert_eq!(ctx.progress.sessions.len(), 1);

        message(cmd_reset("", &mut ctx));
        assert_eq!(ctx.progress.sessions.len(), 1);
        assert!(ctx.storage.path_for(PROGRESS_KEY).exists());
        message(cmd_reset("confirm", &mut ctx));
        assert!(ctx.progress.sessions.is_empty());
        assert!(!ctx.storage.path_for(PROGRESS_KEY).exists());
        let _ = std::fs::remove_dir_all(ctx.storage.dir());
    }

    #[test]
    fn test_session_status_reports_start() {
        colored::control::set_override(false);
        let mut ctx = context("status");
        assert!(message(cmd_session_status("", &mut ctx)).starts_with("No session running"));

        ctx.start_session();
        let status = message(cmd_session_status("", &mut ctx));
        assert!(status.starts_with("Session running"));
        assert!(status.contains("(since "));
        let _ = std::fs::remove_dir_all(ctx.storage.dir());
    }

    #[test]
    fn test_autostart_toggle() {
        let mut ctx = context("autostart");
        message(cmd_autostart("on", &mut ctx));
        assert!(ctx.settings.auto_start);
        assert!(ctx.auto_start.is_enabled());
        assert!(matches!(cmd_autostart("maybe", &mut ctx), CommandResult::Error(_)));
        let _ = std::fs::remove_dir_all(ctx.storage.dir());
    }
}
