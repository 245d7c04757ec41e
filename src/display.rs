//! Terminal rendering of the fretboard
//!
//! The highest string is drawn on top, as in tablature. Pattern members are
//! labelled with their note or interval; roots are highlighted and members
//! outside the practice range are dimmed.

use colored::*;
use fretwise_core::matcher::PatternPosition;
use fretwise_core::types::note::interval_name;
use fretwise_core::{Fretboard, Pattern, PitchClass};
use std::collections::HashMap;

const CELL_WIDTH: usize = 5;

/// What to print inside a highlighted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    #[default]
    Notes,
    Intervals,
    Dots,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    pub labels: LabelMode,
    /// Inclusive fret window to emphasise; everything is in range when `None`
    pub range: Option<(usize, usize)>,
}

impl DisplayOptions {
    fn in_range(&self, fret: usize) -> bool {
        self.range
            .map_or(true, |(start, end)| fret >= start && fret <= end)
    }
}

fn label_for(position: &PatternPosition, root: PitchClass, mode: LabelMode) -> String {
    match mode {
        LabelMode::Notes => position.note.to_string(),
        LabelMode::Intervals => interval_name(position.note.interval_from(root) as i32).to_string(),
        LabelMode::Dots => "●".to_string(),
    }
}

fn centered(text: &str, fill: char) -> String {
    let len = text.chars().count();
    if len >= CELL_WIDTH {
        return text.to_string();
    }
    let left = (CELL_WIDTH - len) / 2;
    let right = CELL_WIDTH - len - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        text,
        fill.to_string().repeat(right)
    )
}

pub fn render_fretboard(
    board: &Fretboard,
    positions: &[PatternPosition],
    root: PitchClass,
    options: &DisplayOptions,
) -> String {
    let config = board.instrument();
    let by_cell: HashMap<(usize, usize), &PatternPosition> = positions
        .iter()
        .map(|p| ((p.string, p.fret), p))
        .collect();

    let mut lines = Vec::with_capacity(board.string_count() + 2);

    // Fret numbers
    let mut header = " ".repeat(4);
    for fret in 0..=board.max_fret() {
        let number = centered(&fret.to_string(), ' ');
        if options.range.is_some() && options.in_range(fret) {
            header.push_str(&number.bright_white().bold().to_string());
        } else {
            header.push_str(&number.dimmed().to_string());
        }
        header.push(' ');
    }
    lines.push(header);

    for row in board.rows().iter().rev() {
        let open = row.first().map(|c| c.pitch().to_string()).unwrap_or_default();
        let mut line = format!("{:>3} ", open).bold().to_string();

        for cell in row {
            let text = match by_cell.get(&(cell.string, cell.fret)) {
                Some(position) => {
                    let padded = centered(&label_for(position, root, options.labels), '-');
                    if !options.in_range(cell.fret) {
                        padded.dimmed().to_string()
                    } else if position.is_root {
                        padded.bright_red().bold().to_string()
                    } else {
                        padded.bright_green().to_string()
                    }
                }
                None => centered("", '-').dimmed().to_string(),
            };
            line.push_str(&text);
            // Nut after the open string, fret wires elsewhere
            line.push(if cell.fret == 0 { '‖' } else { '|' });
        }
        lines.push(line);
    }

    // Inlay markers
    let mut markers = " ".repeat(4);
    for fret in 0..=board.max_fret() {
        let mark = if config.is_double_marker(fret) {
            "••"
        } else if config.is_marker(fret) {
            "•"
        } else {
            ""
        };
        markers.push_str(&centered(mark, ' '));
        markers.push(' ');
    }
    lines.push(markers.trim_end().to_string());

    lines.join("\n")
}

/// One-line summary of a pattern in a key, e.g. "C Major Scale: C D E F G A B"
pub fn describe_pattern(pattern: &Pattern, root: PitchClass, labels: LabelMode) -> String {
    let notes: Vec<String> = pattern
        .pitch_classes(root)
        .into_iter()
        .map(|pc| match labels {
            LabelMode::Intervals => interval_name(pc.interval_from(root) as i32).to_string(),
            _ => pc.to_string(),
        })
        .collect();

    format!(
        "{} {}: {}",
        root.to_string().bright_cyan().bold(),
        pattern.name.bright_cyan().bold(),
        notes.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretwise_core::matcher::match_positions;
    use fretwise_core::types::pattern;

    fn plain() {
        colored::control::set_override(false);
    }

    fn c_major(board: &Fretboard) -> Vec<PatternPosition> {
        match_positions(PitchClass::C, pattern::default_pattern().intervals, board)
    }

    #[test]
    fn test_render_layout() {
        plain();
        let board = Fretboard::generate("guitar");
        let out = render_fretboard(&board, &c_major(&board), PitchClass::C, &DisplayOptions::default());
        let lines: Vec<&str> = out.lines().collect();

        // Header, six strings, markers
        assert_eq!(lines.len(), 8);
        assert!(lines[1].trim_start().starts_with("E4"));
        assert!(lines[6].trim_start().starts_with("E2"));
        // Low E string: open E is in C major, fret 1 is F
        assert!(lines[6].contains("--E--‖--F--|"));
        assert!(lines[7].contains("••"));
    }

    #[test]
    fn test_interval_labels() {
        plain();
        let board = Fretboard::generate("ukulele");
        let options = DisplayOptions {
            labels: LabelMode::Intervals,
            range: Some((0, 5)),
        };
        let out = render_fretboard(&board, &c_major(&board), PitchClass::C, &options);

        // Open C string on the ukulele is the root
        let c_string = out.lines().nth(3).unwrap();
        assert!(c_string.trim_start().starts_with("C4"));
        assert!(c_string.contains("--R--‖"));
        assert_eq!(out.lines().count(), 6);
    }

    #[test]
    fn test_describe_pattern() {
        plain();
        let major = pattern::default_pattern();
        assert_eq!(
            describe_pattern(major, PitchClass::C, LabelMode::Notes),
            "C Major Scale: C D E F G A B"
        );
        assert_eq!(
            describe_pattern(major, PitchClass::C, LabelMode::Intervals),
            "C Major Scale: R 2 3 4 5 6 7"
        );
    }
}
