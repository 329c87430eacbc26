use crate::nonogram::board::{Board, BoardSnapshot};
use crate::nonogram::consts::{LineId, N};

use super::context::SolveContext;
use super::outcome::{SolveError, SolveOutcome};
use super::probe::probe_round;
use super::propagate::propagate;

/// Which kind of search the caller wants (SPEC_FULL 4.5): find any solution,
/// or find a solution and prove no second, distinct one exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Solve,
    Generate,
}

struct Frame {
    parent: BoardSnapshot,
    line: LineId,
    pos: usize,
    remaining: Vec<bool>,
}

fn first_unknown_cell(board: &Board) -> Option<(LineId, usize)> {
    for r in 0..N {
        let line = LineId::row(r);
        let unknown = board.known(line).complement();
        if let Some(pos) = unknown.iter().next() {
            return Some((line, pos));
        }
    }
    None
}

fn probe_to_fixpoint(ctx: &mut SolveContext) -> Result<(), crate::nonogram::board::Contradiction> {
    loop {
        if ctx.board.is_solved() {
            return Ok(());
        }
        if !probe_round(ctx)? {
            return Ok(());
        }
    }
}

/// Runs the explicit-stack DFS described in SPEC_FULL 4.5 and Design Notes
/// (no native recursion, so branch depth is bounded only by heap memory, not
/// the call stack). Collects up to `limit` distinct solutions; `Solve` mode
/// asks for one, `Generate` mode asks for two to prove uniqueness.
///
/// The node counter increments once per DFS entry, not per propagation step
/// (SPEC_FULL 4.5): the root itself counts as node 1, so a puzzle propagation
/// solves outright without ever branching still reports node_count == 1.
fn dfs_collect(
    ctx: &mut SolveContext,
    limit: usize,
    should_cancel: &dyn Fn() -> bool,
) -> Result<(Vec<Board>, u64), SolveError> {
    let mut results = Vec::new();
    let mut nodes: u64 = 1;

    if ctx.board.is_solved() {
        results.push(ctx.board.clone());
        return Ok((results, nodes));
    }

    let mut stack: Vec<Frame> = Vec::new();
    if let Some((line, pos)) = first_unknown_cell(&ctx.board) {
        stack.push(Frame {
            parent: ctx.board.snapshot(),
            line,
            pos,
            remaining: vec![true, false],
        });
    }

    loop {
        if should_cancel() {
            return Err(SolveError::Cancelled { puzzle_index: ctx.puzzle.source_index });
        }

        let Some(top) = stack.last_mut() else { break };
        let value = match top.remaining.pop() {
            Some(v) => v,
            None => {
                stack.pop();
                continue;
            }
        };
        let parent = top.parent.clone();
        let line = top.line;
        let pos = top.pos;
        nodes += 1;

        ctx.board.restore(&parent);
        if ctx.board.assign_cell(line, pos, value).is_err() {
            continue;
        }
        ctx.enqueue(line);
        ctx.enqueue(Board::cross_line(line, pos));

        if propagate(ctx).is_err() {
            continue;
        }
        if probe_to_fixpoint(ctx).is_err() {
            continue;
        }

        if ctx.board.is_solved() {
            results.push(ctx.board.clone());
            if results.len() >= limit {
                return Ok((results, nodes));
            }
            continue;
        }

        if let Some((next_line, next_pos)) = first_unknown_cell(&ctx.board) {
            stack.push(Frame {
                parent: ctx.board.snapshot(),
                line: next_line,
                pos: next_pos,
                remaining: vec![true, false],
            });
        }
    }

    Ok((results, nodes))
}

/// Solves one puzzle end to end: propagate, probe, then fall back to DFS
/// search if a fixpoint wasn't enough. `should_cancel` is polled once per DFS
/// node (SPEC_FULL section 5, "Cancellation"); pass `&|| false` for no limit.
/// Propagation and probing run to their own fixpoint before the first check,
/// since neither has a node-granularity loop to poll from.
pub fn solve(ctx: &mut SolveContext, mode: SearchMode, should_cancel: &dyn Fn() -> bool) -> Result<SolveOutcome, SolveError> {
    let puzzle_index = ctx.puzzle.source_index;

    if let Err(contradiction) = propagate(ctx) {
        return Err(SolveError::Infeasible { puzzle_index, line: contradiction.0 });
    }
    if let Err(contradiction) = probe_to_fixpoint(ctx) {
        return Err(SolveError::Infeasible { puzzle_index, line: contradiction.0 });
    }

    let limit = match mode {
        SearchMode::Solve => 1,
        SearchMode::Generate => 2,
    };
    let (results, nodes) = dfs_collect(ctx, limit, should_cancel)?;

    match (mode, results.len()) {
        (_, 0) => Err(SolveError::NoSolution { puzzle_index }),
        (SearchMode::Solve, _) => Ok(SolveOutcome { board: results.into_iter().next().unwrap(), nodes }),
        (SearchMode::Generate, 1) => Ok(SolveOutcome { board: results.into_iter().next().unwrap(), nodes }),
        (SearchMode::Generate, _) => Err(SolveError::NotUnique { puzzle_index }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::puzzle::Puzzle;

    #[test]
    fn solves_a_fully_forced_puzzle_without_branching() {
        let cols = vec![vec![N as u16]; N];
        let rows = vec![vec![N as u16]; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        let outcome = solve(&mut ctx, SearchMode::Solve, &|| false).unwrap();
        assert!(outcome.board.is_solved());
        assert_eq!(outcome.nodes, 1);
    }

    #[test]
    fn generate_mode_confirms_uniqueness_of_a_forced_puzzle() {
        let cols = vec![vec![N as u16]; N];
        let rows = vec![vec![N as u16]; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        let outcome = solve(&mut ctx, SearchMode::Generate, &|| false).unwrap();
        assert!(outcome.board.is_solved());
        assert_eq!(outcome.nodes, 1);
    }

    #[test]
    fn solve_finds_a_solution_for_an_ambiguous_small_puzzle() {
        // A 2-cell-wide single run of length 1 in each line is ambiguous on
        // its own, but still solvable by search; confirms DFS branches
        // rather than stalling when propagation alone can't finish.
        let rows = vec![vec![1u16]; N];
        let cols = vec![vec![1u16]; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        let outcome = solve(&mut ctx, SearchMode::Solve, &|| false).unwrap();
        assert!(outcome.board.is_solved());
        assert!(outcome.nodes > 1);
    }

    #[test]
    fn generate_mode_detects_ambiguity() {
        // Every row/column wants exactly one filled cell: any permutation
        // matrix satisfies the clues, so uniqueness verification must fail.
        let rows = vec![vec![1u16]; N];
        let cols = vec![vec![1u16]; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        let err = solve(&mut ctx, SearchMode::Generate, &|| false).unwrap_err();
        assert!(matches!(err, SolveError::NotUnique { .. }));
    }

    #[test]
    fn cancellation_hook_aborts_the_search() {
        let rows = vec![vec![1u16]; N];
        let cols = vec![vec![1u16]; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        let err = solve(&mut ctx, SearchMode::Solve, &|| true).unwrap_err();
        assert!(matches!(err, SolveError::Cancelled { .. }));
    }
}
