/*
 *  The static nonogram model: line clues, the bit-packed line mask, the
 *  mirrored board state, and the Zobrist tags used to hash it.
 */

pub mod board;
pub mod clue;
pub mod consts;
pub mod line_mask;
pub mod puzzle;
pub mod zobrist;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, BoardSnapshot, CellState},
        clue::Clue,
        consts::*,
        line_mask::LineMask,
        puzzle::Puzzle,
    };
}
