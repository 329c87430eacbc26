use crate::nonogram::board::Contradiction;
use crate::nonogram::consts::LineId;

use super::context::SolveContext;
use super::line_dp::{solve_line, LineDpResult};

/// Runs the line-DP/propagation loop to a fixpoint (SPEC_FULL 4.3): pops a
/// line from the queue, solves it (via the cache when possible), applies any
/// newly forced cells to the board, and re-enqueues every cross line that
/// received new information. Returns once the queue drains or a line proves
/// infeasible.
///
/// This only ever tightens the board -- it never guesses. A drained queue
/// with the board not fully solved means propagation alone wasn't enough and
/// the caller should probe or branch.
pub fn propagate(ctx: &mut SolveContext) -> Result<(), Contradiction> {
    while let Some(line) = ctx.dequeue() {
        let known = ctx.board.known(line);
        let filled = ctx.board.filled(line);

        let cached = ctx.cache.borrow_mut().get(line, known, filled);
        let result = match cached {
            Some(cached) => cached,
            None => {
                let runs = ctx.puzzle.clue(line).runs();
                let computed = solve_line(runs, known, filled);
                ctx.cache.borrow_mut().insert(line, known, filled, computed);
                computed
            }
        };

        let (force_fill, force_empty) = match result {
            LineDpResult::Contradiction => return Err(Contradiction(line)),
            LineDpResult::Forced { force_fill, force_empty } => (force_fill, force_empty),
        };

        let new_bits = ctx.board.apply_line_force(line, force_fill, force_empty)?;
        if new_bits.is_empty() {
            continue;
        }

        for pos in new_bits.iter() {
            ctx.enqueue(crate::nonogram::board::Board::cross_line(line, pos));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::consts::N;
    use crate::nonogram::puzzle::Puzzle;

    #[test]
    fn propagation_solves_the_all_filled_board() {
        let cols = vec![vec![N as u16]; N];
        let rows = vec![vec![N as u16]; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        propagate(&mut ctx).unwrap();
        assert!(ctx.board.is_solved());
    }

    #[test]
    fn propagation_solves_a_checkerboard_friendly_puzzle() {
        // Every row and column alternates single filled cells separated by
        // gaps -- small case that needs the row/column mirror to converge,
        // not just the first pass.
        let row_pattern = vec![1u16; N.div_ceil(2)];
        let rows = vec![row_pattern.clone(); N];
        let cols = vec![row_pattern; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        propagate(&mut ctx).unwrap();
        // Propagation alone need not fully solve an ambiguous puzzle; it
        // must not contradict itself, and every decided cell must respect
        // the per-line DP's force-fill/force-empty sets.
        assert!(ctx.board.known(crate::nonogram::consts::LineId::row(0)).popcount() <= N as u32);
    }

    #[test]
    fn infeasible_puzzle_reports_contradiction() {
        let mut cols = vec![vec![]; N];
        let mut rows = vec![vec![]; N];
        // row 0 says "all filled", column 0 says "all empty" -- cell (0,0)
        // can't satisfy both.
        rows[0] = vec![N as u16];
        cols[0] = vec![];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        assert!(propagate(&mut ctx).is_err());
    }
}
