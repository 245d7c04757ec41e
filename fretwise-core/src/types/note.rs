use crate::error::TheoryError;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// All 12 pitch classes in chromatic order, sharp spelling
pub const NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Enharmonic flat spelling of the same 12 pitch classes
pub const FLAT_NOTES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Interval abbreviations indexed by semitones above the root
const INTERVAL_NAMES: [&str; 12] = [
    "R",  // Root
    "m2", // Minor 2nd
    "2",  // Major 2nd
    "m3", // Minor 3rd
    "3",  // Major 3rd
    "4",  // Perfect 4th
    "b5", // Tritone
    "5",  // Perfect 5th
    "#5", // Augmented 5th
    "6",  // Major 6th
    "b7", // Minor 7th
    "7",  // Major 7th
];

/// Reference pitch for equal temperament: A4 = 440Hz
const A4_FREQUENCY: f64 = 440.0;
const A4_MIDI: i32 = 69;

/// A chromatic pitch class (0-11), independent of octave
/// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// Create a pitch class from a raw index, rejecting anything outside 0-11
    pub fn new(index: u8) -> Result<Self, TheoryError> {
        if index > 11 {
            return Err(TheoryError::PitchClassOutOfRange(index as i32));
        }
        Ok(PitchClass(index))
    }

    /// Create a pitch class from any integer, wrapping it into 0-11
    pub fn wrapping(index: i32) -> Self {
        PitchClass(index.rem_euclid(12) as u8)
    }

    /// Iterate all 12 pitch classes from C upwards
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0u8..12).map(PitchClass)
    }

    /// Get the chromatic index (0-11)
    pub fn index(self) -> u8 {
        self.0
    }

    /// Sharp spelling, e.g. "C#"
    pub fn name(self) -> &'static str {
        NOTES[self.0 as usize]
    }

    /// Flat spelling, e.g. "Db"
    pub fn flat_name(self) -> &'static str {
        FLAT_NOTES[self.0 as usize]
    }

    pub fn spelled(self, use_flats: bool) -> &'static str {
        if use_flats {
            self.flat_name()
        } else {
            self.name()
        }
    }

    /// Transpose by a number of semitones, wrapping within the octave
    pub fn transpose(self, semitones: i32) -> PitchClass {
        PitchClass::wrapping(self.0 as i32 + semitones)
    }

    /// Semitones above `root`, always in 0-11
    pub fn interval_from(self, root: PitchClass) -> u8 {
        (self.0 as i32 - root.0 as i32).rem_euclid(12) as u8
    }

    /// Check whether this pitch class belongs to the interval set built on `root`
    pub fn is_in(self, root: PitchClass, intervals: &[u8]) -> bool {
        intervals.contains(&self.interval_from(root))
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = TheoryError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        PitchClass::new(index)
    }
}

/// Split a leading note name off `input`, returning the pitch class and the remainder.
///
/// The letter is case-insensitive. A `#` accidental is only accepted where the
/// result is part of the sharp vocabulary; a `b` accidental lowers the natural
/// letter by one semitone, so `Cb` is B and `Fb` is E.
fn split_note_name(input: &str) -> Result<(PitchClass, &str), TheoryError> {
    let invalid = || TheoryError::InvalidNoteName(input.to_string());

    let natural = match input.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(invalid()),
    };
    let rest = &input[1..];

    match rest.chars().next() {
        Some('#') => {
            if natural == 4 || natural == 11 {
                return Err(invalid());
            }
            Ok((PitchClass(natural + 1), &rest[1..]))
        }
        Some('b') => Ok((PitchClass::wrapping(natural as i32 - 1), &rest[1..])),
        _ => Ok((PitchClass(natural), rest)),
    }
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (pitch_class, rest) = split_note_name(trimmed)?;
        if !rest.is_empty() {
            return Err(TheoryError::InvalidNoteName(s.to_string()));
        }
        Ok(pitch_class)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Add<i32> for PitchClass {
    type Output = PitchClass;

    fn add(self, semitones: i32) -> Self::Output {
        self.transpose(semitones)
    }
}

impl Sub<i32> for PitchClass {
    type Output = PitchClass;

    fn sub(self, semitones: i32) -> Self::Output {
        self.transpose(-semitones)
    }
}

// Ascending interval from `other` up to `self`
impl Sub<PitchClass> for PitchClass {
    type Output = u8;

    fn sub(self, other: PitchClass) -> Self::Output {
        self.interval_from(other)
    }
}

/// A pitch class at a specific octave (scientific pitch notation, 4 = middle C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl Note {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Note {
            pitch_class,
            octave,
        }
    }

    /// MIDI note number, C-1 = 0 and A4 = 69
    pub fn midi_number(&self) -> i32 {
        midi_number(self.pitch_class, self.octave)
    }

    /// Equal-tempered frequency in Hz
    pub fn frequency(&self) -> f64 {
        frequency_of(self.pitch_class, self.octave)
    }

    /// Transpose by semitones, carrying into the octave
    pub fn transpose(self, semitones: i32) -> Note {
        let absolute = self.pitch_class.index() as i32 + semitones;
        Note {
            pitch_class: PitchClass::wrapping(absolute),
            octave: self.octave + absolute.div_euclid(12),
        }
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (pitch_class, octave_part) = split_note_name(trimmed)?;

        let octave = if octave_part.is_empty() {
            4
        } else {
            octave_part
                .parse::<i32>()
                .map_err(|_| TheoryError::InvalidOctave(octave_part.to_string()))?
        };

        Ok(Note {
            pitch_class,
            octave,
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

impl Add<i32> for Note {
    type Output = Note;

    fn add(self, semitones: i32) -> Self::Output {
        self.transpose(semitones)
    }
}

/// Get the index (0-11) of a note name in sharp or flat form
pub fn pitch_class_index(name: &str) -> Result<u8, TheoryError> {
    name.parse::<PitchClass>().map(PitchClass::index)
}

/// Get the note name for any index, normalized into 0-11 first
pub fn pitch_class_name(index: i32, use_flats: bool) -> &'static str {
    PitchClass::wrapping(index).spelled(use_flats)
}

/// Transpose a note name by semitones, rendered in sharp spelling
pub fn transpose(name: &str, semitones: i32) -> Result<&'static str, TheoryError> {
    let index = pitch_class_index(name)?;
    Ok(pitch_class_name(index as i32 + semitones, false))
}

pub fn midi_number(pitch_class: PitchClass, octave: i32) -> i32 {
    (octave + 1) * 12 + pitch_class.index() as i32
}

/// Frequency of a pitch class at an octave: 440 * 2^((midi - 69) / 12)
pub fn frequency_of(pitch_class: PitchClass, octave: i32) -> f64 {
    let midi = midi_number(pitch_class, octave);
    A4_FREQUENCY * 2f64.powf((midi - A4_MIDI) as f64 / 12.0)
}

/// Frequency of a named note at an octave
pub fn frequency(name: &str, octave: i32) -> Result<f64, TheoryError> {
    let pitch_class = name.parse::<PitchClass>()?;
    Ok(frequency_of(pitch_class, octave))
}

/// Interval abbreviation for a number of semitones (taken mod 12)
pub fn interval_name(semitones: i32) -> &'static str {
    INTERVAL_NAMES[semitones.rem_euclid(12) as usize]
}

/// Interval abbreviation of `note` relative to `root`
pub fn interval_label(note: &str, root: &str) -> Result<&'static str, TheoryError> {
    let note = note.parse::<PitchClass>()?;
    let root = root.parse::<PitchClass>()?;
    Ok(interval_name(note.interval_from(root) as i32))
}

/// Check if a note belongs to the interval set built on `root`
pub fn is_in_pattern(note: &str, root: &str, intervals: &[u8]) -> Result<bool, TheoryError> {
    let note = note.parse::<PitchClass>()?;
    let root = root.parse::<PitchClass>()?;
    Ok(note.is_in(root, intervals))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

    #[test]
    fn test_pitch_class_creation() {
        let c = PitchClass::new(0).unwrap();
        assert_eq!(c.index(), 0);

        let invalid = PitchClass::new(12);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_note_parsing() {
        assert_eq!(pitch_class_index("C").unwrap(), 0);
        assert_eq!(pitch_class_index("C#").unwrap(), 1);
        assert_eq!(pitch_class_index("Db").unwrap(), 1);
        assert_eq!(pitch_class_index("Bb").unwrap(), 10);
        assert_eq!(pitch_class_index(" a ").unwrap(), 9);

        // Flats are the natural letter lowered by one semitone
        assert_eq!(pitch_class_index("Cb").unwrap(), 11);
        assert_eq!(pitch_class_index("Fb").unwrap(), 4);
    }

    #[test]
    fn test_invalid_note_names() {
        for name in ["H", "", "C##", "E#", "B#", "Cx", "Do", "#"] {
            assert!(
                matches!(pitch_class_index(name), Err(TheoryError::InvalidNoteName(_))),
                "'{}' should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_note_name_lookup() {
        assert_eq!(pitch_class_name(1, false), "C#");
        assert_eq!(pitch_class_name(1, true), "Db");
        assert_eq!(pitch_class_name(13, false), "C#");
        assert_eq!(pitch_class_name(-1, false), "B");
        assert_eq!(pitch_class_name(-14, true), "Bb");
    }

    #[test]
    fn test_transposition() {
        assert_eq!(transpose("C", 2).unwrap(), "D");
        assert_eq!(transpose("C", -2).unwrap(), "A#");
        assert_eq!(transpose("B", 1).unwrap(), "C");
        assert_eq!(transpose("Eb", 3).unwrap(), "F#");

        let c: PitchClass = "C".parse().unwrap();
        assert_eq!((c + 7).name(), "G");
        assert_eq!((c - 1).name(), "B");
    }

    #[test]
    fn test_transpose_preserves_index_arithmetic() {
        for name in NOTES.iter().chain(FLAT_NOTES.iter()) {
            let base = pitch_class_index(name).unwrap();
            for k in 0..12 {
                let moved = transpose(name, k).unwrap();
                assert_eq!(
                    pitch_class_index(moved).unwrap(),
                    (base + k as u8) % 12,
                    "{} + {}",
                    name,
                    k
                );
            }
        }
    }

    #[test]
    fn test_interval_calculation() {
        let c: PitchClass = "C".parse().unwrap();
        let e: PitchClass = "E".parse().unwrap();
        assert_eq!(e - c, 4); // Major third

        let g: PitchClass = "G".parse().unwrap();
        assert_eq!(g - c, 7); // Perfect fifth

        // Descending wraps to the ascending interval
        assert_eq!(c - g, 5);
    }

    #[test]
    fn test_interval_names() {
        assert_eq!(interval_name(0), "R");
        assert_eq!(interval_name(6), "b5");
        assert_eq!(interval_name(11), "7");
        assert_eq!(interval_name(12), "R");
        assert_eq!(interval_name(-2), "b7");

        assert_eq!(interval_label("E", "C").unwrap(), "3");
        assert_eq!(interval_label("C", "A").unwrap(), "m3");
    }

    #[test]
    fn test_reference_frequencies() {
        assert!((frequency("A", 4).unwrap() - 440.0).abs() < 1e-9);
        assert!((frequency("A", 5).unwrap() - 880.0).abs() < 1e-9);
        assert!((frequency("A", 3).unwrap() - 220.0).abs() < 1e-9);
        assert!((frequency("C", 4).unwrap() - 261.625_565_300_598_6).abs() < 1e-9);
        assert!(frequency("X", 4).is_err());
    }

    #[test]
    fn test_pattern_membership() {
        assert!(!is_in_pattern("C#", "C", &MAJOR).unwrap());
        assert!(is_in_pattern("E", "C", &MAJOR).unwrap());
        assert!(is_in_pattern("B", "C", &MAJOR).unwrap());

        // Root below the note wraps around the octave
        assert!(is_in_pattern("D", "A", &MAJOR).unwrap());
        assert!(is_in_pattern("Q", "C", &MAJOR).is_err());
    }

    #[test]
    fn test_octave_parsing() {
        let c4: Note = "C4".parse().unwrap();
        assert_eq!(c4.pitch_class, PitchClass::C);
        assert_eq!(c4.octave, 4);

        let bb3: Note = "Bb3".parse().unwrap();
        assert_eq!(bb3.pitch_class.index(), 10);
        assert_eq!(bb3.octave, 3);

        let g_neg1: Note = "G-1".parse().unwrap();
        assert_eq!(g_neg1.octave, -1);
        assert_eq!(g_neg1.midi_number(), 7);

        let bare: Note = "E".parse().unwrap();
        assert_eq!(bare.octave, 4);

        assert!(matches!(
            "Cx".parse::<Note>(),
            Err(TheoryError::InvalidOctave(_))
        ));
    }

    #[test]
    fn test_octave_transposition() {
        let c4: Note = "C4".parse().unwrap();

        let c5 = c4 + 12;
        assert_eq!(c5.pitch_class, PitchClass::C);
        assert_eq!(c5.octave, 5);

        let b3 = c4.transpose(-1);
        assert_eq!(b3.pitch_class.index(), 11);
        assert_eq!(b3.octave, 3);
        assert_eq!(b3.to_string(), "B3");
    }

    #[test]
    fn test_note_frequency_matches_name_frequency() {
        let a4: Note = "A4".parse().unwrap();
        assert_eq!(a4.midi_number(), 69);
        assert_eq!(a4.frequency(), frequency("A", 4).unwrap());
    }
}
