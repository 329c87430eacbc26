use super::consts::{LineId, Orientation, N};
use super::line_mask::LineMask;
use crate::utils::prelude::*;

/// The three-valued state of a single cell, derived from the (known, filled)
/// mask pair: `known & !filled` is empty, `known & filled` is filled, and
/// anything not yet known is unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Unknown,
    Filled,
    Empty,
}

/// Raised when a line update would force a cell to a value that contradicts
/// what's already known there. Carries the offending line so callers can
/// report which constraint failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction(pub LineId);

impl std::fmt::Display for Contradiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "contradiction on line {}", self.0 .0)
    }
}

impl std::error::Error for Contradiction {}

/// The mutable partial-assignment state of the board: the 2N pairs of
/// (known, filled) masks, stored twice -- once row-indexed, once
/// column-indexed. The two views are mirrors of one another; every mutator on
/// this type keeps them in sync so a reader can consult either view and see
/// the same cell.
#[derive(Clone, Debug)]
pub struct Board {
    rows: [(LineMask, LineMask); N],
    cols: [(LineMask, LineMask); N],
}

/// A compact snapshot of a board's mask state, cheap to take and restore --
/// just the 2N mask pairs, not a structural deep-copy of anything else
/// (Design Notes: "Deep-copy at branch").
#[derive(Clone, Debug)]
pub struct BoardSnapshot {
    rows: [(LineMask, LineMask); N],
    cols: [(LineMask, LineMask); N],
}

impl Default for Board {
    fn default() -> Self {
        Board {
            rows: [(LineMask::EMPTY, LineMask::EMPTY); N],
            cols: [(LineMask::EMPTY, LineMask::EMPTY); N],
        }
    }
}

impl Board {
    pub fn new() -> Board {
        Board::default()
    }

    /// The cross-line a bit at `pos` on `line` belongs to in the other view:
    /// a bit at column `pos` of row `r` is the same cell as row `pos` of
    /// column `r`, and vice versa.
    pub fn cross_line(line: LineId, pos: usize) -> LineId {
        match line.orientation() {
            Orientation::Row => LineId::col(pos),
            Orientation::Col => LineId::row(pos),
        }
    }

    fn view(&self, line: LineId) -> &[(LineMask, LineMask); N] {
        match line.orientation() {
            Orientation::Row => &self.rows,
            Orientation::Col => &self.cols,
        }
    }

    fn view_mut(&mut self, line: LineId) -> &mut [(LineMask, LineMask); N] {
        match line.orientation() {
            Orientation::Row => &mut self.rows,
            Orientation::Col => &mut self.cols,
        }
    }

    pub fn known(&self, line: LineId) -> LineMask {
        self.view(line)[line.index()].0
    }

    pub fn filled(&self, line: LineId) -> LineMask {
        self.view(line)[line.index()].1
    }

    pub fn empty_mask(&self, line: LineId) -> LineMask {
        self.known(line).difference(self.filled(line))
    }

    pub fn is_line_solved(&self, line: LineId) -> bool {
        self.known(line) == LineMask::FULL
    }

    pub fn is_solved(&self) -> bool {
        LineId::all().all(|line| self.is_line_solved(line))
    }

    pub fn cell_state(&self, row: usize, col: usize) -> CellState {
        let line = LineId::row(row);
        if !self.known(line).test(col) {
            CellState::Unknown
        } else if self.filled(line).test(col) {
            CellState::Filled
        } else {
            CellState::Empty
        }
    }

    /// Applies a line-DP result to one line: given the cells that must be
    /// filled and must be empty, updates the line's own masks and mirrors
    /// every newly-decided bit into the cross view. Returns the positions
    /// (within `line`) that became newly known, or `Contradiction` if the
    /// forced values disagree with what was already known.
    pub fn apply_line_force(
        &mut self,
        line: LineId,
        force_fill: LineMask,
        force_empty: LineMask,
    ) -> std::result::Result<LineMask, Contradiction> {
        let (known, filled) = self.view(line)[line.index()];
        let existing_empty = known.difference(filled);

        if force_fill.contains_any(existing_empty) || force_empty.contains_any(filled) {
            return Err(Contradiction(line));
        }

        let new_bits = force_fill.union(force_empty).difference(known);
        if new_bits.is_empty() {
            return Ok(LineMask::EMPTY);
        }

        let new_known = known.union(new_bits);
        let new_filled = filled.union(force_fill.intersect(new_bits));
        self.view_mut(line)[line.index()] = (new_known, new_filled);

        for pos in new_bits.iter() {
            let value = force_fill.test(pos);
            self.mirror_cell(line, pos, value);
        }

        Ok(new_bits)
    }

    /// Sets a single cell directly (used by probing/DFS trial assignment,
    /// rather than by line-DP forcing a whole mask at once). Returns an error
    /// if the cell is already known to the opposite value.
    pub fn assign_cell(&mut self, line: LineId, pos: usize, value: bool) -> std::result::Result<(), Contradiction> {
        let (known, filled) = self.view(line)[line.index()];
        if known.test(pos) {
            return if filled.test(pos) == value {
                Ok(())
            } else {
                Err(Contradiction(line))
            };
        }
        let new_known = known.with_bit(pos);
        let new_filled = if value { filled.with_bit(pos) } else { filled };
        self.view_mut(line)[line.index()] = (new_known, new_filled);
        self.mirror_cell(line, pos, value);
        Ok(())
    }

    /// Writes the mirrored bit into the cross view unchecked; the origin
    /// view was already validated by the caller, and invariant 2 (row/column
    /// agreement) guarantees the cross view has no conflicting information.
    fn mirror_cell(&mut self, line: LineId, pos: usize, value: bool) {
        let cross = Board::cross_line(line, pos);
        let cross_pos = line.index();
        let (known, filled) = self.view(cross)[cross.index()];
        debug_assert!(
            !known.test(cross_pos) || filled.test(cross_pos) == value,
            "mirror update disagrees with existing cross-view state"
        );
        let new_known = known.with_bit(cross_pos);
        let new_filled = if value { filled.with_bit(cross_pos) } else { filled };
        self.view_mut(cross)[cross.index()] = (new_known, new_filled);
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        self.rows = snapshot.rows;
        self.cols = snapshot.cols;
    }

    /// Renders the board as N lines of N characters from `{0,1}`
    /// (row-major, 0 = empty, 1 = filled); unknown cells render as `?` and
    /// only appear if this is called on a partially-solved board (callers
    /// solving to completion never see them in output).
    pub fn notate(&self) -> String {
        (0..N)
            .map(|r| {
                (0..N)
                    .map(|c| match self.cell_state(r, c) {
                        CellState::Filled => '1',
                        CellState::Empty => '0',
                        CellState::Unknown => '?',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board_is_all_unknown() {
        let board = Board::new();
        assert_eq!(board.cell_state(0, 0), CellState::Unknown);
        assert!(!board.is_solved());
    }

    #[test]
    fn apply_line_force_mirrors_into_column_view() {
        let mut board = Board::new();
        let row0 = LineId::row(0);
        let force_fill = LineMask::range(0, 3);
        let new_bits = board
            .apply_line_force(row0, force_fill, LineMask::EMPTY)
            .unwrap();
        assert_eq!(new_bits.popcount(), 3);

        for c in 0..3 {
            assert_eq!(board.cell_state(0, c), CellState::Filled);
            assert!(board.known(LineId::col(c)).test(0));
            assert!(board.filled(LineId::col(c)).test(0));
        }
    }

    #[test]
    fn apply_line_force_detects_contradiction() {
        let mut board = Board::new();
        let row0 = LineId::row(0);
        board
            .apply_line_force(row0, LineMask::EMPTY, LineMask::range(0, 1))
            .unwrap(); // cell (0,0) forced empty

        let result = board.apply_line_force(row0, LineMask::range(0, 1), LineMask::EMPTY);
        assert_eq!(result, Err(Contradiction(row0)));
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut board = Board::new();
        let snap = board.snapshot();
        board
            .apply_line_force(LineId::row(0), LineMask::range(0, 5), LineMask::EMPTY)
            .unwrap();
        assert!(board.known(LineId::row(0)).popcount() > 0);
        board.restore(&snap);
        assert_eq!(board.known(LineId::row(0)).popcount(), 0);
    }

    #[test]
    fn assign_cell_is_idempotent_for_matching_value() {
        let mut board = Board::new();
        let row0 = LineId::row(0);
        board.assign_cell(row0, 4, true).unwrap();
        assert!(board.assign_cell(row0, 4, true).is_ok());
        assert!(board.assign_cell(row0, 4, false).is_err());
    }
}
