use fretwise_core::matcher::{lowest_root_position, match_positions, suggested_range};
use fretwise_core::playback::{unique_notes_for_playback, PlaybackPlan};
use fretwise_core::route::{build_path, parse_path};
use fretwise_core::types::instrument;
use fretwise_core::types::note::{frequency, is_in_pattern, pitch_class_index, transpose, NOTES};
use fretwise_core::types::pattern::{self, PatternFamily};
use fretwise_core::{Fretboard, PitchClass};
use std::collections::HashSet;

#[test]
fn test_transpose_matches_index_arithmetic() {
    for name in NOTES {
        let base = pitch_class_index(name).unwrap() as i32;
        for k in 0..12 {
            let moved = transpose(name, k).unwrap();
            assert_eq!(pitch_class_index(moved).unwrap() as i32, (base + k) % 12);
        }
    }
}

#[test]
fn test_reference_pitches() {
    assert!((frequency("A", 4).unwrap() - 440.0).abs() < 1e-9);
    assert!((frequency("A", 5).unwrap() - 880.0).abs() < 1e-9);
    assert!((frequency("A", 3).unwrap() - 220.0).abs() < 1e-9);
}

#[test]
fn test_c_major_membership() {
    let major = pattern::default_pattern().intervals;
    assert!(!is_in_pattern("C#", "C", major).unwrap());
    assert!(is_in_pattern("E", "C", major).unwrap());
    assert!(is_in_pattern("B", "C", major).unwrap());
}

#[test]
fn test_standard_guitar_low_e() {
    let board = Fretboard::generate("guitar");
    assert_eq!(board.cell(0, 0).unwrap().pitch().to_string(), "E2");
    assert_eq!(board.cell(0, 12).unwrap().pitch().to_string(), "E3");
}

#[test]
fn test_one_octave_playback_every_pattern() {
    for config in instrument::list() {
        let board = Fretboard::from_config(config);
        for p in pattern::all() {
            for root in PitchClass::all() {
                let positions = match_positions(root, p.intervals, &board);
                let notes = unique_notes_for_playback(&positions, true);

                let distinct: HashSet<_> = p.intervals.iter().collect();
                assert_eq!(notes.len(), distinct.len().min(8), "{} {} on {}", root, p.name, config.id);
                assert!(notes.windows(2).all(|w| w[0].frequency <= w[1].frequency));
                assert!(notes.iter().all(|n| p.contains(n.note, root)));
            }
        }
    }
}

#[test]
fn test_c_major_seven_notes_at_120_bpm() {
    let board = Fretboard::generate("guitar");
    let positions = match_positions(PitchClass::C, pattern::default_pattern().intervals, &board);
    let notes = unique_notes_for_playback(&positions, true);
    let plan = PlaybackPlan::from_positions(&notes, 120.0).unwrap();

    assert_eq!(plan.len(), 7);
    for (i, note) in plan.notes.iter().enumerate() {
        assert!((note.start - 0.5 * i as f64).abs() < 1e-9);
        assert!((note.duration - 0.45).abs() < 1e-9);
    }
    assert!((plan.cycle - 3.5).abs() < 1e-9);
}

#[test]
fn test_suggested_range_within_board() {
    for config in instrument::list() {
        let board = Fretboard::from_config(config);
        for root in PitchClass::all() {
            let (string, fret) = lowest_root_position(root, &board);
            assert_eq!(board.cell(string, fret).unwrap().note, root);

            let (start, end) = suggested_range(root, &board);
            assert!(start <= fret && fret <= end);
            assert!(end <= config.frets);
        }
    }
}

#[test]
fn test_route_round_trip() {
    for config in instrument::list() {
        for family in PatternFamily::ALL {
            for p in family.patterns() {
                for root in PitchClass::all() {
                    let state = parse_path(&build_path(config.id, family, Some(p), root));
                    assert_eq!(state.instrument.map(|c| c.id), Some(config.id));
                    assert_eq!(state.family, Some(family));
                    assert_eq!(state.pattern, Some(p));
                    assert_eq!(state.root, Some(root));
                }
            }
        }
    }
}
