//! WASM bindings for fretwise-core
//!
//! The view builders below are plain Rust and always compiled; the
//! `#[wasm_bindgen]` wrappers serialize them for JavaScript when the `wasm`
//! feature is enabled.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::error::TheoryError;
use crate::matcher::{match_positions, suggested_range, PatternPosition};
use crate::playback::{unique_notes_for_playback, PlaybackPlan};
use crate::route;
use crate::types::fretboard::Fretboard;
use crate::types::note::{interval_name, PitchClass};
use crate::types::pattern::{self, PatternFamily};

/// One fretboard cell as the editor draws it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub string: usize,
    pub fret: usize,
    pub note: String,
    pub octave: i32,
    pub frequency: f64,
    pub in_pattern: bool,
    pub is_root: bool,
    /// Interval label relative to the root, only for pattern members
    pub interval: Option<String>,
}

/// Everything needed to render a fretboard for one selection
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FretboardView {
    pub instrument: String,
    pub instrument_name: String,
    pub strings: usize,
    pub frets: usize,
    pub fret_markers: Vec<usize>,
    pub double_fret_markers: Vec<usize>,
    pub pattern: String,
    pub root: String,
    /// Suggested practice window around the lowest root
    pub range: (usize, usize),
    /// Rows in ascending string order
    pub cells: Vec<Vec<CellView>>,
}

/// A catalog entry for pattern pickers
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    pub family: String,
    pub category: String,
    pub id: String,
    pub name: String,
    pub slug: String,
    pub intervals: Vec<u8>,
    pub description: String,
}

/// Decoded route with plain string fields
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteView {
    pub instrument: Option<String>,
    pub family: Option<String>,
    pub pattern: Option<String>,
    pub root: Option<String>,
}

fn family_or_default(slug: &str) -> PatternFamily {
    PatternFamily::from_slug(slug).unwrap_or_default()
}

/// Pattern positions for a selection, unknown ids falling back to defaults
fn selection_positions(
    board: &Fretboard,
    root: PitchClass,
    family_slug: &str,
    pattern_id: &str,
) -> Vec<PatternPosition> {
    let selected = pattern::resolve(family_or_default(family_slug), pattern_id);
    match_positions(root, selected.intervals, board)
}

pub fn build_fretboard_view(
    instrument_id: &str,
    root_name: &str,
    family_slug: &str,
    pattern_id: &str,
) -> Result<FretboardView, TheoryError> {
    let root: PitchClass = root_name.parse()?;
    let board = Fretboard::generate(instrument_id);
    let config = board.instrument();
    let selected = pattern::resolve(family_or_default(family_slug), pattern_id);

    let cells = board
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let in_pattern = selected.contains(cell.note, root);
                    CellView {
                        string: cell.string,
                        fret: cell.fret,
                        note: cell.note.name().to_string(),
                        octave: cell.octave,
                        frequency: cell.frequency,
                        in_pattern,
                        is_root: cell.note == root,
                        interval: in_pattern
                            .then(|| interval_name(cell.note.interval_from(root) as i32).to_string()),
                    }
                })
                .collect()
        })
        .collect();

    Ok(FretboardView {
        instrument: config.id.to_string(),
        instrument_name: config.name.to_string(),
        strings: config.strings,
        frets: config.frets,
        fret_markers: config.fret_markers.to_vec(),
        double_fret_markers: config.double_fret_markers.to_vec(),
        pattern: selected.id.to_string(),
        root: root.name().to_string(),
        range: suggested_range(root, &board),
        cells,
    })
}

/// Playback plan for a selection
pub fn build_playback_plan(
    instrument_id: &str,
    root_name: &str,
    family_slug: &str,
    pattern_id: &str,
    bpm: f64,
    one_octave: bool,
) -> Result<PlaybackPlan, TheoryError> {
    let root: PitchClass = root_name.parse()?;
    let board = Fretboard::generate(instrument_id);
    let positions = selection_positions(&board, root, family_slug, pattern_id);
    let notes = unique_notes_for_playback(&positions, one_octave);
    PlaybackPlan::from_positions(&notes, bpm)
}

pub fn catalog_entries() -> Vec<CatalogEntry> {
    pattern::all()
        .map(|p| CatalogEntry {
            family: p.family().slug().to_string(),
            category: p.category.label().to_string(),
            id: p.id.to_string(),
            name: p.name.to_string(),
            slug: p.slug(),
            intervals: p.intervals.to_vec(),
            description: p.description.to_string(),
        })
        .collect()
}

pub fn route_view(path: &str) -> RouteView {
    let state = route::parse_path(path);
    RouteView {
        instrument: state.instrument.map(|i| i.id.to_string()),
        family: state.family.map(|f| f.slug().to_string()),
        pattern: state.pattern.map(|p| p.id.to_string()),
        root: state.root.map(|r| r.name().to_string()),
    }
}

pub fn route_path(
    instrument_id: &str,
    family_slug: &str,
    pattern_id: &str,
    root_name: &str,
) -> Result<String, TheoryError> {
    let root: PitchClass = root_name.parse()?;
    let family = family_or_default(family_slug);
    Ok(route::build_path(
        instrument_id,
        family,
        pattern::find(family, pattern_id),
        root,
    ))
}

// ============================================================================
// WASM Bindings
// ============================================================================

#[cfg(feature = "wasm")]
fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[cfg(feature = "wasm")]
fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Today's calendar date from the browser clock
#[cfg(feature = "wasm")]
fn js_today() -> Result<chrono::NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .ok_or_else(|| js_error("Invalid system date"))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn fretboard(instrument: &str, root: &str, family: &str, pattern_id: &str) -> Result<JsValue, JsValue> {
    build_fretboard_view(instrument, root, family, pattern_id)
        .map(|view| to_js(&view))
        .map_err(js_error)
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn playback_plan(
    instrument: &str,
    root: &str,
    family: &str,
    pattern_id: &str,
    bpm: f64,
    one_octave: bool,
) -> Result<JsValue, JsValue> {
    build_playback_plan(instrument, root, family, pattern_id, bpm, one_octave)
        .map(|plan| to_js(&plan))
        .map_err(js_error)
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn catalog() -> JsValue {
    to_js(&catalog_entries())
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn parse_route(path: &str) -> JsValue {
    to_js(&route_view(path))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn build_route(instrument: &str, family: &str, pattern_id: &str, root: &str) -> Result<String, JsValue> {
    route_path(instrument, family, pattern_id, root).map_err(js_error)
}

/// Fold a finished session into a stored progress blob, returning the new blob
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn record_session(state: JsValue, duration: u32, patterns: JsValue) -> Result<JsValue, JsValue> {
    use crate::progress::{apply_session, PracticeSession, ProgressState};

    let state: ProgressState = if state.is_null() || state.is_undefined() {
        ProgressState::default()
    } else {
        serde_wasm_bindgen::from_value(state).unwrap_or_default()
    };
    let patterns: Vec<String> = serde_wasm_bindgen::from_value(patterns).map_err(js_error)?;

    let session = PracticeSession {
        date: js_today()?,
        duration: duration as u64,
        patterns,
    };
    Ok(to_js(&apply_session(state, session)))
}

/// Parse a stored progress blob; missing or corrupt text yields a fresh state
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn load_progress(text: Option<String>) -> JsValue {
    use crate::progress::ProgressState;

    let state: ProgressState = text
        .and_then(|t| serde_json::from_str(&t).ok())
        .unwrap_or_default();
    to_js(&state)
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn progress_stats(state: JsValue) -> Result<JsValue, JsValue> {
    use crate::progress::ProgressState;

    let state: ProgressState = serde_wasm_bindgen::from_value(state).unwrap_or_default();
    Ok(to_js(&state.stats(js_today()?)))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn format_duration(seconds: u32) -> String {
    crate::progress::format_duration(seconds as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fretboard_view() {
        let view = build_fretboard_view("guitar", "A", "pentatonics", "minor-pentatonic").unwrap();
        assert_eq!(view.strings, 6);
        assert_eq!(view.cells.len(), 6);
        assert_eq!(view.cells[0].len(), 16);
        assert_eq!(view.pattern, "minor-pentatonic");
        assert_eq!(view.range, (3, 9));

        let a2 = &view.cells[1][0];
        assert!(a2.in_pattern && a2.is_root);
        assert_eq!(a2.interval.as_deref(), Some("R"));

        let b2 = &view.cells[1][2];
        assert!(!b2.in_pattern);
        assert!(b2.interval.is_none());
    }

    #[test]
    fn test_fretboard_view_fallbacks() {
        let view = build_fretboard_view("banjo", "c", "chords", "nope").unwrap();
        assert_eq!(view.instrument, "guitar");
        assert_eq!(view.pattern, "major");
        assert!(build_fretboard_view("guitar", "H", "scales", "major").is_err());
    }

    #[test]
    fn test_playback_plan_view() {
        let plan = build_playback_plan("guitar", "C", "scales", "major", 120.0, true).unwrap();
        assert_eq!(plan.len(), 7);
        assert!((plan.cycle - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_catalog_entries() {
        let entries = catalog_entries();
        assert_eq!(entries.len(), 26);
        assert_eq!(entries[0].slug, "major-scale");
        assert_eq!(entries[0].family, "scales");
    }

    #[test]
    fn test_route_helpers() {
        let path = route_path("ukulele", "scales", "dorian", "F#").unwrap();
        assert_eq!(path, "/guitar-trainer/ukulele/scales/dorian-mode/f-sharp");

        let view = route_view(&path);
        assert_eq!(view.pattern.as_deref(), Some("dorian"));
        assert_eq!(view.root.as_deref(), Some("F#"));
    }
}
