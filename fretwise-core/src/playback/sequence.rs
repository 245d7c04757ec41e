//! Reduce matched positions to a playable note order

use crate::matcher::PatternPosition;
use std::collections::HashSet;

/// Upper bound on notes in a one-octave run
pub const MAX_ONE_OCTAVE_NOTES: usize = 8;

/// Order positions low to high by frequency.
///
/// The sort is stable, so positions sounding the same pitch keep their grid order.
pub fn sort_for_playback(positions: &[PatternPosition]) -> Vec<PatternPosition> {
    let mut sorted = positions.to_vec();
    sorted.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    sorted
}

/// Notes to play for a pattern.
///
/// With `one_octave`, keeps the first (lowest) occurrence of each pitch class
/// and stops after [`MAX_ONE_OCTAVE_NOTES`] notes. Otherwise every position is
/// returned in ascending pitch.
pub fn unique_notes_for_playback(positions: &[PatternPosition], one_octave: bool) -> Vec<PatternPosition> {
    let sorted = sort_for_playback(positions);
    if !one_octave {
        return sorted;
    }

    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .filter(|pos| seen.insert(pos.note))
        .take(MAX_ONE_OCTAVE_NOTES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_positions;
    use crate::types::fretboard::Fretboard;
    use crate::types::note::PitchClass;
    use crate::types::pattern::{self, PatternFamily};

    #[test]
    fn test_one_octave_major_scale() {
        let board = Fretboard::generate("guitar");
        let positions = match_positions(PitchClass::C, pattern::default_pattern().intervals, &board);
        let notes = unique_notes_for_playback(&positions, true);

        assert_eq!(notes.len(), 7);
        let classes: HashSet<_> = notes.iter().map(|p| p.note).collect();
        assert_eq!(classes.len(), 7);
        for pair in notes.windows(2) {
            assert!(pair[0].frequency < pair[1].frequency);
        }
        // Lowest note on a standard guitar in C major is the open low E
        assert_eq!(notes[0].pitch().to_string(), "E2");
    }

    #[test]
    fn test_one_octave_caps_chromatic_run() {
        let board = Fretboard::generate("guitar");
        let chromatic: Vec<u8> = (0..12).collect();
        let positions = match_positions(PitchClass::C, &chromatic, &board);
        let notes = unique_notes_for_playback(&positions, true);

        assert_eq!(notes.len(), MAX_ONE_OCTAVE_NOTES);
        let classes: HashSet<_> = notes.iter().map(|p| p.note).collect();
        assert_eq!(classes.len(), MAX_ONE_OCTAVE_NOTES);
        for pair in notes.windows(2) {
            assert!(pair[0].frequency < pair[1].frequency);
        }

        // The eight lowest distinct pitches on the neck
        let names: Vec<String> = notes.iter().map(|p| p.pitch().to_string()).collect();
        assert_eq!(names, ["E2", "F2", "F#2", "G2", "G#2", "A2", "A#2", "B2"]);
    }

    #[test]
    fn test_unbounded_keeps_every_position() {
        let board = Fretboard::generate("ukulele");
        let triad = pattern::find(PatternFamily::Arpeggios, "major-triad").unwrap();
        let positions = match_positions(PitchClass::G, triad.intervals, &board);
        let notes = unique_notes_for_playback(&positions, false);

        assert_eq!(notes.len(), positions.len());
        for pair in notes.windows(2) {
            assert!(pair[0].frequency <= pair[1].frequency);
        }
    }

    #[test]
    fn test_equal_pitches_keep_grid_order() {
        let board = Fretboard::generate("guitar");
        let positions = match_positions(PitchClass::E, &[0], &board);
        let sorted = sort_for_playback(&positions);

        // E3 appears at (0,12), (1,7) and (2,2); grid order must survive the sort
        let e3: Vec<(usize, usize)> = sorted
            .iter()
            .filter(|p| p.octave == 3)
            .map(|p| (p.string, p.fret))
            .collect();
        assert_eq!(e3, [(0, 12), (1, 7), (2, 2)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(unique_notes_for_playback(&[], true).is_empty());
        assert!(unique_notes_for_playback(&[], false).is_empty());
    }
}
