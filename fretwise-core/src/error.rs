use std::fmt;

/// Domain errors raised at the music-theory boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TheoryError {
    /// Input outside the 12-tone sharp/flat vocabulary
    InvalidNoteName(String),
    /// Octave suffix that does not parse as an integer
    InvalidOctave(String),
    /// Pitch class index outside 0-11 where a raw index is required
    PitchClassOutOfRange(i32),
    /// Tempo that is zero, negative or not finite
    InvalidTempo(f64),
}

impl fmt::Display for TheoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TheoryError::InvalidNoteName(name) => write!(f, "Invalid note name: '{}'", name),
            TheoryError::InvalidOctave(octave) => write!(f, "Invalid octave: '{}'", octave),
            TheoryError::PitchClassOutOfRange(index) => {
                write!(f, "Pitch class must be 0-11, got {}", index)
            }
            TheoryError::InvalidTempo(bpm) => {
                write!(f, "Tempo must be a positive number of BPM, got {}", bpm)
            }
        }
    }
}

impl std::error::Error for TheoryError {}
