//! Shareable URL paths
//!
//! Paths have the shape `/guitar-trainer/{instrument}/{family}/{pattern}/{note}`,
//! e.g. `/guitar-trainer/ukulele/scales/major-scale/c-sharp`. Decoding is
//! lenient per segment: an unknown segment is ignored without discarding the
//! segments that did parse.

use crate::types::instrument::{self, InstrumentConfig};
use crate::types::note::{PitchClass, NOTES};
use crate::types::pattern::{self, Pattern, PatternFamily};

/// Path prefix the application is served under
pub const BASE_PATH: &str = "/guitar-trainer";

/// Pattern slug used when no pattern is selected
const FALLBACK_PATTERN_SLUG: &str = "major";

/// Convert a display name to a URL slug: "Minor Pentatonic" -> "minor-pentatonic"
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let hyphenated = lowered.split_whitespace().collect::<Vec<_>>().join("-");
    hyphenated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Convert a note to its URL form: "C#" -> "c-sharp"
pub fn note_to_slug(note: PitchClass) -> String {
    note.name().to_lowercase().replace('#', "-sharp")
}

/// Convert a URL note segment back to a pitch class: "c-sharp" -> C#
pub fn slug_to_note(slug: &str) -> Option<PitchClass> {
    let name = slug.replacen("-sharp", "#", 1).to_uppercase();
    NOTES
        .iter()
        .position(|n| *n == name)
        .map(|index| PitchClass::wrapping(index as i32))
}

/// Selection decoded from a path; fields are `None` where a segment was absent or invalid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteState {
    pub instrument: Option<&'static InstrumentConfig>,
    pub family: Option<PatternFamily>,
    pub pattern: Option<&'static Pattern>,
    pub root: Option<PitchClass>,
}

impl RouteState {
    pub fn is_empty(&self) -> bool {
        self.instrument.is_none()
            && self.family.is_none()
            && self.pattern.is_none()
            && self.root.is_none()
    }
}

/// Reduce a full URL or path to the segments after the base path
fn relative_segments(input: &str) -> Vec<&str> {
    let mut path = input.trim();

    // Drop scheme and host from absolute URLs
    if let Some(scheme_end) = path.find("://") {
        let after_scheme = &path[scheme_end + 3..];
        path = after_scheme
            .find('/')
            .map_or("", |slash| &after_scheme[slash..]);
    }

    // Query strings and fragments never carry selection state
    if let Some(cut) = path.find(['?', '#']) {
        path = &path[..cut];
    }

    let relative = path.strip_prefix(BASE_PATH).unwrap_or(path);
    relative.split('/').filter(|s| !s.is_empty()).collect()
}

/// Decode a path, applying every segment that is individually valid.
pub fn parse_path(path: &str) -> RouteState {
    let segments = relative_segments(path);
    let mut state = RouteState::default();

    let mut parts = segments.into_iter();
    let (instrument_seg, family_seg, pattern_seg, note_seg) =
        (parts.next(), parts.next(), parts.next(), parts.next());

    if let Some(seg) = instrument_seg {
        state.instrument = instrument::lookup(seg);
    }

    if let Some(family) = family_seg.and_then(PatternFamily::from_slug) {
        state.family = Some(family);
        state.pattern = pattern_seg.and_then(|seg| pattern::find_by_slug(family, seg));
    }

    if let Some(seg) = note_seg {
        state.root = slug_to_note(seg);
    }

    state
}

/// Build the canonical path for a selection
pub fn build_path(
    instrument_id: &str,
    family: PatternFamily,
    selected: Option<&Pattern>,
    root: PitchClass,
) -> String {
    let pattern_slug = selected.map_or_else(|| FALLBACK_PATTERN_SLUG.to_string(), Pattern::slug);
    format!(
        "{}/{}/{}/{}/{}",
        BASE_PATH,
        instrument_id,
        family.slug(),
        pattern_slug,
        note_to_slug(root)
    )
}

/// Absolute URL for sharing, `origin` like "https://example.com"
pub fn shareable_url(
    origin: &str,
    instrument_id: &str,
    family: PatternFamily,
    selected: Option<&Pattern>,
    root: PitchClass,
) -> String {
    format!(
        "{}{}",
        origin.trim_end_matches('/'),
        build_path(instrument_id, family, selected, root)
    )
}
