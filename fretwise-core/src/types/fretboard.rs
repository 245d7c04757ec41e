//! Fretboard grid generation
//!
//! A [`Fretboard`] is an immutable snapshot of every playable position on an
//! instrument. Switching instruments builds a new grid; cells are never
//! updated in place.

use crate::types::instrument::{self, InstrumentConfig};
use crate::types::note::{frequency_of, Note, PitchClass};

/// A single playable position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FretCell {
    pub string: usize,
    pub fret: usize,
    pub note: PitchClass,
    pub octave: i32,
    /// Equal-tempered frequency in Hz
    pub frequency: f64,
}

impl FretCell {
    /// Compute the cell for `fret` on a string with the given open note
    pub fn at(string: usize, fret: usize, open_note: PitchClass, open_octave: i32) -> Self {
        let absolute = open_note.index() as i32 + fret as i32;
        let note = PitchClass::wrapping(absolute);
        // Octave rolls over exactly at the 12-semitone wrap
        let octave = open_octave + absolute.div_euclid(12);

        FretCell {
            string,
            fret,
            note,
            octave,
            frequency: frequency_of(note, octave),
        }
    }

    pub fn pitch(&self) -> Note {
        Note::new(self.note, self.octave)
    }
}

/// Full grid of positions, `strings` rows by `frets + 1` columns (fret 0 is the open string)
#[derive(Debug, Clone, PartialEq)]
pub struct Fretboard {
    instrument: &'static InstrumentConfig,
    rows: Vec<Vec<FretCell>>,
}

impl Fretboard {
    /// Build the grid for an instrument id, falling back to the default instrument
    pub fn generate(instrument_id: &str) -> Self {
        Self::from_config(instrument::resolve(instrument_id))
    }

    /// Build the grid for a specific instrument configuration
    pub fn from_config(config: &'static InstrumentConfig) -> Self {
        let rows = (0..config.strings)
            .filter_map(|string| config.open_string(string).map(|open| (string, open)))
            .map(|(string, (open_note, open_octave))| {
                (0..=config.frets)
                    .map(|fret| FretCell::at(string, fret, open_note, open_octave))
                    .collect()
            })
            .collect();

        Fretboard {
            instrument: config,
            rows,
        }
    }

    pub fn instrument(&self) -> &'static InstrumentConfig {
        self.instrument
    }

    pub fn string_count(&self) -> usize {
        self.rows.len()
    }

    /// Highest fret number (columns are 0..=max_fret)
    pub fn max_fret(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len().saturating_sub(1))
    }

    pub fn cell(&self, string: usize, fret: usize) -> Option<&FretCell> {
        self.rows.get(string)?.get(fret)
    }

    /// Rows in ascending string order
    pub fn rows(&self) -> &[Vec<FretCell>] {
        &self.rows
    }

    /// All cells, strings ascending then frets ascending
    pub fn cells(&self) -> impl Iterator<Item = &FretCell> {
        self.rows.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let board = Fretboard::generate("guitar");
        assert_eq!(board.string_count(), 6);
        assert_eq!(board.max_fret(), 15);
        assert!(board.rows().iter().all(|row| row.len() == 16));

        let uke = Fretboard::generate("ukulele");
        assert_eq!(uke.string_count(), 4);
        assert_eq!(uke.cells().count(), 4 * 13);
    }

    #[test]
    fn test_open_and_twelfth_fret() {
        let board = Fretboard::generate("guitar");

        let open = board.cell(0, 0).unwrap();
        assert_eq!(open.note.name(), "E");
        assert_eq!(open.octave, 2);

        let twelfth = board.cell(0, 12).unwrap();
        assert_eq!(twelfth.note.name(), "E");
        assert_eq!(twelfth.octave, 3);
        assert!((twelfth.frequency - 2.0 * open.frequency).abs() < 1e-9);
    }

    #[test]
    fn test_octave_rolls_over_at_c() {
        let board = Fretboard::generate("guitar");

        // A string: fret 2 is B2, fret 3 is C3
        assert_eq!(board.cell(1, 2).unwrap().pitch().to_string(), "B2");
        assert_eq!(board.cell(1, 3).unwrap().pitch().to_string(), "C3");

        // B string: fret 1 is C4
        assert_eq!(board.cell(4, 1).unwrap().pitch().to_string(), "C4");
    }

    #[test]
    fn test_reentrant_ukulele() {
        let board = Fretboard::generate("ukulele");
        let g4 = board.cell(0, 0).unwrap();
        let c4 = board.cell(1, 0).unwrap();
        assert!(g4.frequency > c4.frequency);
        assert_eq!(board.cell(3, 0).unwrap().frequency, 440.0);
    }

    #[test]
    fn test_unknown_instrument_builds_default_grid() {
        let board = Fretboard::generate("theremin");
        assert_eq!(board.instrument().id, "guitar");
        assert_eq!(board, Fretboard::generate("guitar"));
    }

    #[test]
    fn test_cell_out_of_range() {
        let board = Fretboard::generate("ukulele");
        assert!(board.cell(4, 0).is_none());
        assert!(board.cell(0, 13).is_none());
    }
}
