//! Static catalog of scales, pentatonics and arpeggios
//!
//! Every pattern belongs to one [`PatternFamily`] and one [`PatternCategory`].
//! Categories are a closed enumeration per family instead of free-form strings;
//! [`validate`] checks the catalog against that structure at startup.

use crate::route::slugify;
use crate::types::note::PitchClass;
use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::fmt;

/// Top-level grouping used for navigation and URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternFamily {
    #[default]
    Scales,
    Pentatonics,
    Arpeggios,
}

impl PatternFamily {
    pub const ALL: [PatternFamily; 3] = [
        PatternFamily::Scales,
        PatternFamily::Pentatonics,
        PatternFamily::Arpeggios,
    ];

    /// URL segment for this family
    pub fn slug(&self) -> &'static str {
        match self {
            PatternFamily::Scales => "scales",
            PatternFamily::Pentatonics => "pentatonics",
            PatternFamily::Arpeggios => "arpeggios",
        }
    }

    /// Parse a URL segment (exact match)
    pub fn from_slug(slug: &str) -> Option<PatternFamily> {
        Self::ALL.into_iter().find(|family| family.slug() == slug)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PatternFamily::Scales => "Scales",
            PatternFamily::Pentatonics => "Pentatonics",
            PatternFamily::Arpeggios => "Arpeggios",
        }
    }

    /// Categories of this family in display order
    pub fn categories(&self) -> &'static [PatternCategory] {
        match self {
            PatternFamily::Scales => &[
                PatternCategory::Major,
                PatternCategory::Minor,
                PatternCategory::Modes,
            ],
            PatternFamily::Pentatonics => &[PatternCategory::Pentatonic, PatternCategory::Blues],
            PatternFamily::Arpeggios => &[
                PatternCategory::Triads,
                PatternCategory::SeventhChords,
                PatternCategory::Extended,
            ],
        }
    }

    pub fn patterns(&self) -> &'static [Pattern] {
        match self {
            PatternFamily::Scales => &SCALES,
            PatternFamily::Pentatonics => &PENTATONICS,
            PatternFamily::Arpeggios => &ARPEGGIOS,
        }
    }
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternCategory {
    Major,
    Minor,
    Modes,
    Pentatonic,
    Blues,
    Triads,
    SeventhChords,
    Extended,
}

impl PatternCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PatternCategory::Major => "Major",
            PatternCategory::Minor => "Minor",
            PatternCategory::Modes => "Modes",
            PatternCategory::Pentatonic => "Pentatonic",
            PatternCategory::Blues => "Blues",
            PatternCategory::Triads => "Triads",
            PatternCategory::SeventhChords => "7th Chords",
            PatternCategory::Extended => "Extended",
        }
    }

    /// The family this category belongs to
    pub fn family(&self) -> PatternFamily {
        match self {
            PatternCategory::Major | PatternCategory::Minor | PatternCategory::Modes => {
                PatternFamily::Scales
            }
            PatternCategory::Pentatonic | PatternCategory::Blues => PatternFamily::Pentatonics,
            PatternCategory::Triads | PatternCategory::SeventhChords | PatternCategory::Extended => {
                PatternFamily::Arpeggios
            }
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A named interval set
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pattern {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PatternCategory,
    /// Semitone offsets from the root, in display order
    pub intervals: &'static [u8],
    pub description: &'static str,
}

impl Pattern {
    pub fn family(&self) -> PatternFamily {
        self.category.family()
    }

    /// URL slug derived from the display name, e.g. "minor-pentatonic"
    pub fn slug(&self) -> String {
        slugify(self.name)
    }

    /// Key used to record practice of this pattern in a given key, e.g. "A Minor Pentatonic"
    pub fn practice_key(&self, root: PitchClass) -> String {
        format!("{} {}", root, self.name)
    }

    /// Check whether `note` belongs to this pattern built on `root`
    pub fn contains(&self, note: PitchClass, root: PitchClass) -> bool {
        note.is_in(root, self.intervals)
    }

    /// Distinct pitch classes of this pattern rooted at `root`, in interval order
    pub fn pitch_classes(&self, root: PitchClass) -> Vec<PitchClass> {
        let mut seen = HashSet::new();
        self.intervals
            .iter()
            .map(|&interval| root.transpose(interval as i32))
            .filter(|pc| seen.insert(*pc))
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const fn pattern(
    id: &'static str,
    name: &'static str,
    category: PatternCategory,
    intervals: &'static [u8],
    description: &'static str,
) -> Pattern {
    Pattern {
        id,
        name,
        category,
        intervals,
        description,
    }
}

static SCALES: [Pattern; 9] = [
    pattern(
        "major",
        "Major Scale",
        PatternCategory::Major,
        &[0, 2, 4, 5, 7, 9, 11],
        "The foundation of Western music, bright and happy sound",
    ),
    pattern(
        "natural-minor",
        "Natural Minor",
        PatternCategory::Minor,
        &[0, 2, 3, 5, 7, 8, 10],
        "Sad, melancholic sound - relative minor of major scale",
    ),
    pattern(
        "harmonic-minor",
        "Harmonic Minor",
        PatternCategory::Minor,
        &[0, 2, 3, 5, 7, 8, 11],
        "Minor scale with raised 7th - exotic, Middle Eastern flavor",
    ),
    pattern(
        "melodic-minor",
        "Melodic Minor",
        PatternCategory::Minor,
        &[0, 2, 3, 5, 7, 9, 11],
        "Minor scale with raised 6th and 7th - jazz staple",
    ),
    pattern(
        "dorian",
        "Dorian Mode",
        PatternCategory::Modes,
        &[0, 2, 3, 5, 7, 9, 10],
        "Minor with bright 6th - great for jazz and funk",
    ),
    pattern(
        "phrygian",
        "Phrygian Mode",
        PatternCategory::Modes,
        &[0, 1, 3, 5, 7, 8, 10],
        "Dark, Spanish/Flamenco flavor with flat 2nd",
    ),
    pattern(
        "lydian",
        "Lydian Mode",
        PatternCategory::Modes,
        &[0, 2, 4, 6, 7, 9, 11],
        "Dreamy, floating sound with raised 4th",
    ),
    pattern(
        "mixolydian",
        "Mixolydian Mode",
        PatternCategory::Modes,
        &[0, 2, 4, 5, 7, 9, 10],
        "Major with flat 7th - blues and rock essential",
    ),
    pattern(
        "locrian",
        "Locrian Mode",
        PatternCategory::Modes,
        &[0, 1, 3, 5, 6, 8, 10],
        "Diminished sound - unstable and tense",
    ),
];

static PENTATONICS: [Pattern; 4] = [
    pattern(
        "major-pentatonic",
        "Major Pentatonic",
        PatternCategory::Pentatonic,
        &[0, 2, 4, 7, 9],
        "Bright, country/rock sound - no avoid notes",
    ),
    pattern(
        "minor-pentatonic",
        "Minor Pentatonic",
        PatternCategory::Pentatonic,
        &[0, 3, 5, 7, 10],
        "The rock/blues essential - works over almost anything",
    ),
    pattern(
        "blues-scale",
        "Blues Scale",
        PatternCategory::Blues,
        &[0, 3, 5, 6, 7, 10],
        "Minor pentatonic + blue note (b5) - soulful and gritty",
    ),
    pattern(
        "major-blues",
        "Major Blues Scale",
        PatternCategory::Blues,
        &[0, 2, 3, 4, 7, 9],
        "Major pentatonic + blue note (b3) - country blues flavor",
    ),
];

static ARPEGGIOS: [Pattern; 13] = [
    pattern(
        "major-triad",
        "Major Triad",
        PatternCategory::Triads,
        &[0, 4, 7],
        "Root, major 3rd, perfect 5th - bright and stable",
    ),
    pattern(
        "minor-triad",
        "Minor Triad",
        PatternCategory::Triads,
        &[0, 3, 7],
        "Root, minor 3rd, perfect 5th - sad and stable",
    ),
    pattern(
        "diminished-triad",
        "Diminished Triad",
        PatternCategory::Triads,
        &[0, 3, 6],
        "Root, minor 3rd, diminished 5th - tense and unstable",
    ),
    pattern(
        "augmented-triad",
        "Augmented Triad",
        PatternCategory::Triads,
        &[0, 4, 8],
        "Root, major 3rd, augmented 5th - dreamy and unresolved",
    ),
    pattern(
        "major-7",
        "Major 7th",
        PatternCategory::SeventhChords,
        &[0, 4, 7, 11],
        "Major triad + major 7th - jazzy and sophisticated",
    ),
    pattern(
        "minor-7",
        "Minor 7th",
        PatternCategory::SeventhChords,
        &[0, 3, 7, 10],
        "Minor triad + minor 7th - smooth jazz staple",
    ),
    pattern(
        "dominant-7",
        "Dominant 7th",
        PatternCategory::SeventhChords,
        &[0, 4, 7, 10],
        "Major triad + minor 7th - bluesy tension",
    ),
    pattern(
        "half-diminished",
        "Half-Diminished (m7b5)",
        PatternCategory::SeventhChords,
        &[0, 3, 6, 10],
        "Diminished triad + minor 7th - minor ii chord in jazz",
    ),
    pattern(
        "diminished-7",
        "Diminished 7th",
        PatternCategory::SeventhChords,
        &[0, 3, 6, 9],
        "Stacked minor 3rds - symmetrical and mysterious",
    ),
    pattern(
        "minor-major-7",
        "Minor Major 7th",
        PatternCategory::SeventhChords,
        &[0, 3, 7, 11],
        "Minor triad + major 7th - dark and sophisticated",
    ),
    pattern(
        "major-9",
        "Major 9th",
        PatternCategory::Extended,
        &[0, 4, 7, 11, 2],
        "Major 7th + 9th - lush and open",
    ),
    pattern(
        "minor-9",
        "Minor 9th",
        PatternCategory::Extended,
        &[0, 3, 7, 10, 2],
        "Minor 7th + 9th - neo-soul favorite",
    ),
    pattern(
        "dominant-9",
        "Dominant 9th",
        PatternCategory::Extended,
        &[0, 4, 7, 10, 2],
        "Dominant 7th + 9th - funky and bluesy",
    ),
];

/// The pattern selected when nothing else is specified (Major Scale)
pub fn default_pattern() -> &'static Pattern {
    &SCALES[0]
}

/// Every pattern with its family, scales first
pub fn all() -> impl Iterator<Item = &'static Pattern> {
    PatternFamily::ALL
        .into_iter()
        .flat_map(|family| family.patterns().iter())
}

/// Patterns of one category in catalog order
pub fn by_category(category: PatternCategory) -> impl Iterator<Item = &'static Pattern> {
    category
        .family()
        .patterns()
        .iter()
        .filter(move |p| p.category == category)
}

/// Find a pattern by id within a family
pub fn find(family: PatternFamily, id: &str) -> Option<&'static Pattern> {
    family.patterns().iter().find(|p| p.id == id)
}

/// Find a pattern by URL slug within a family
pub fn find_by_slug(family: PatternFamily, slug: &str) -> Option<&'static Pattern> {
    family.patterns().iter().find(|p| p.slug() == slug)
}

/// Find a pattern by id in any family
pub fn find_any(id: &str) -> Option<&'static Pattern> {
    all().find(|p| p.id == id)
}

/// Resolve a pattern id within a family, falling back to the family's first pattern
pub fn resolve(family: PatternFamily, id: &str) -> &'static Pattern {
    find(family, id).unwrap_or(&family.patterns()[0])
}

/// Check the static catalog against the family/category structure.
pub fn validate() -> Result<()> {
    for family in PatternFamily::ALL {
        let patterns = family.patterns();
        if patterns.is_empty() {
            return Err(anyhow!("Pattern family '{}' is empty", family.slug()));
        }

        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();

        for p in patterns {
            if p.family() != family {
                return Err(anyhow!(
                    "Pattern '{}' has category '{}' which does not belong to '{}'",
                    p.id,
                    p.category,
                    family.slug()
                ));
            }
            if p.intervals.first() != Some(&0) {
                return Err(anyhow!("Pattern '{}' must start on the root", p.id));
            }
            if let Some(bad) = p.intervals.iter().find(|&&i| i > 11) {
                return Err(anyhow!(
                    "Pattern '{}' has interval {} outside the octave",
                    p.id,
                    bad
                ));
            }
            if !ids.insert(p.id) {
                return Err(anyhow!("Duplicate pattern id '{}'", p.id));
            }
            if !slugs.insert(p.slug()) {
                return Err(anyhow!("Duplicate pattern slug '{}'", p.slug()));
            }
        }

        for category in family.categories() {
            if by_category(*category).next().is_none() {
                return Err(anyhow!("Category '{}' has no patterns", category));
            }
        }
    }
    Ok(())
}
