//! Static instrument registry
//!
//! Instruments are defined once and never mutated. Lookups by identifier are
//! lenient: an unknown id resolves to the default instrument so that a
//! malformed shared link can never break rendering.

use crate::types::note::PitchClass;

/// Identifier of the instrument used when a lookup fails
pub const DEFAULT_INSTRUMENT: &str = "guitar";

/// Tuning and layout of a fretted instrument
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstrumentConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub strings: usize,
    pub frets: usize,
    /// Open-string pitch classes, index 0 first
    pub tuning: &'static [PitchClass],
    /// Open-string octaves, parallel to `tuning`
    pub tuning_octaves: &'static [i32],
    pub fret_markers: &'static [usize],
    pub double_fret_markers: &'static [usize],
}

impl InstrumentConfig {
    /// Check whether a fret carries an inlay marker
    pub fn is_marker(&self, fret: usize) -> bool {
        self.fret_markers.contains(&fret)
    }

    /// Check whether a fret carries a double inlay marker
    pub fn is_double_marker(&self, fret: usize) -> bool {
        self.double_fret_markers.contains(&fret)
    }

    /// Open-string pitch class and octave for a string
    pub fn open_string(&self, string: usize) -> Option<(PitchClass, i32)> {
        Some((*self.tuning.get(string)?, *self.tuning_octaves.get(string)?))
    }
}

/// Standard guitar tuning (low to high): E2, A2, D3, G3, B3, E4
static GUITAR: InstrumentConfig = InstrumentConfig {
    id: "guitar",
    name: "Guitar",
    strings: 6,
    frets: 15,
    tuning: &[
        PitchClass::E,
        PitchClass::A,
        PitchClass::D,
        PitchClass::G,
        PitchClass::B,
        PitchClass::E,
    ],
    tuning_octaves: &[2, 2, 3, 3, 3, 4],
    fret_markers: &[3, 5, 7, 9, 12, 15],
    double_fret_markers: &[12],
};

/// Re-entrant ukulele tuning: G4, C4, E4, A4 (the G string is high)
static UKULELE: InstrumentConfig = InstrumentConfig {
    id: "ukulele",
    name: "Ukulele",
    strings: 4,
    frets: 12,
    tuning: &[PitchClass::G, PitchClass::C, PitchClass::E, PitchClass::A],
    tuning_octaves: &[4, 4, 4, 4],
    fret_markers: &[3, 5, 7, 10, 12],
    double_fret_markers: &[12],
};

static INSTRUMENTS: [&InstrumentConfig; 2] = [&GUITAR, &UKULELE];

/// Strict lookup, `None` for unknown identifiers
pub fn lookup(id: &str) -> Option<&'static InstrumentConfig> {
    INSTRUMENTS.iter().copied().find(|config| config.id == id)
}

/// Resolve an identifier, falling back to the default instrument
pub fn resolve(id: &str) -> &'static InstrumentConfig {
    lookup(id).unwrap_or(&GUITAR)
}

/// All instruments in presentation order
pub fn list() -> &'static [&'static InstrumentConfig] {
    &INSTRUMENTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_instruments() {
        assert_eq!(resolve("guitar").strings, 6);
        assert_eq!(resolve("ukulele").frets, 12);
    }

    #[test]
    fn test_unknown_instrument_falls_back_to_default() {
        let config = resolve("banjo");
        assert_eq!(config.id, DEFAULT_INSTRUMENT);
        assert!(lookup("banjo").is_none());
    }

    #[test]
    fn test_tuning_tables_are_consistent() {
        for config in list() {
            assert_eq!(config.tuning.len(), config.strings, "{}", config.id);
            assert_eq!(config.tuning_octaves.len(), config.strings, "{}", config.id);
            for fret in config.double_fret_markers {
                assert!(config.is_marker(*fret));
            }
        }
    }

    #[test]
    fn test_standard_guitar_tuning() {
        let names: Vec<&str> = GUITAR.tuning.iter().map(|pc| pc.name()).collect();
        assert_eq!(names, ["E", "A", "D", "G", "B", "E"]);
        assert_eq!(GUITAR.open_string(5), Some((PitchClass::E, 4)));
        assert_eq!(GUITAR.open_string(6), None);
    }

    #[test]
    fn test_list_order() {
        let ids: Vec<&str> = list().iter().map(|c| c.id).collect();
        assert_eq!(ids, ["guitar", "ukulele"]);
    }
}
