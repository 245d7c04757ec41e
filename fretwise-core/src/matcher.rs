//! Pattern matching over a fretboard grid

use crate::types::fretboard::{FretCell, Fretboard};
use crate::types::note::PitchClass;
use std::ops::Deref;

/// Frets shown below the lowest root in the suggested practice range
const RANGE_BELOW_ROOT: usize = 2;
/// Frets shown above the lowest root in the suggested practice range
const RANGE_ABOVE_ROOT: usize = 4;

/// A grid cell that belongs to the active pattern
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternPosition {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub cell: FretCell,
    pub is_root: bool,
}

impl Deref for PatternPosition {
    type Target = FretCell;

    fn deref(&self) -> &FretCell {
        &self.cell
    }
}

/// Every cell whose pitch class is in `intervals` above `root`.
///
/// Ordered by string ascending, then fret ascending.
pub fn match_positions(root: PitchClass, intervals: &[u8], board: &Fretboard) -> Vec<PatternPosition> {
    board
        .cells()
        .filter(|cell| cell.note.is_in(root, intervals))
        .map(|&cell| PatternPosition {
            cell,
            is_root: cell.note == root,
        })
        .collect()
}

/// Matched positions restricted to frets `start..=end`
pub fn positions_in_range(
    root: PitchClass,
    intervals: &[u8],
    board: &Fretboard,
    start: usize,
    end: usize,
) -> Vec<PatternPosition> {
    match_positions(root, intervals, board)
        .into_iter()
        .filter(|pos| (start..=end).contains(&pos.fret))
        .collect()
}

/// First occurrence of `root`, scanning strings from the highest index down
/// and frets upwards. Returns `(0, 0)` when the root never appears.
pub fn lowest_root_position(root: PitchClass, board: &Fretboard) -> (usize, usize) {
    board
        .rows()
        .iter()
        .rev()
        .flat_map(|row| row.iter())
        .find(|cell| cell.note == root)
        .map_or((0, 0), |cell| (cell.string, cell.fret))
}

/// Practice window around the lowest root: two frets below to four above,
/// clamped to the fretboard.
pub fn suggested_range(root: PitchClass, board: &Fretboard) -> (usize, usize) {
    let (_, fret) = lowest_root_position(root, board);
    let start = fret.saturating_sub(RANGE_BELOW_ROOT);
    let end = (fret + RANGE_ABOVE_ROOT).min(board.max_fret());
    (start, end)
}
