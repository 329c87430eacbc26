use crate::nonogram::board::Board;
use crate::nonogram::consts::LineId;

/// A completed solve: the fully-decided board plus the DFS node count
/// (SPEC_FULL 4.5, a reported metric even when DFS never actually branched --
/// a puzzle solved by propagation alone still reports node 1, the root).
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    pub board: Board,
    pub nodes: u64,
}

/// The error taxonomy surfaced by the solver (SPEC_FULL section 7). Each
/// variant names a specific failure the batch layer needs to report
/// differently; callers that just want a message can rely on `Display`
/// (via `anyhow`) instead of matching on this.
#[derive(Debug)]
pub enum SolveError {
    /// A line's clues can never be satisfied in isolation -- the puzzle as
    /// given has no solution, independent of any search decision.
    Infeasible { puzzle_index: usize, line: LineId },
    /// Propagation and probing both reached a fixpoint short of a full
    /// solution and DFS exhausted its search without finding one. This is
    /// distinct from `Infeasible`: the individual lines are each
    /// satisfiable, but no consistent combination exists.
    NoSolution { puzzle_index: usize },
    /// `generate` mode found a second, distinct solution -- the puzzle's
    /// clues don't pin a unique grid.
    NotUnique { puzzle_index: usize },
    /// The configured time budget (`--timeout-ms`) elapsed before the
    /// search concluded.
    Cancelled { puzzle_index: usize },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Infeasible { puzzle_index, line } => {
                write!(f, "puzzle #{puzzle_index}: line {} has no feasible arrangement", line.0)
            }
            SolveError::NoSolution { puzzle_index } => {
                write!(f, "puzzle #{puzzle_index}: no solution exists")
            }
            SolveError::NotUnique { puzzle_index } => {
                write!(f, "puzzle #{puzzle_index}: solution is not unique")
            }
            SolveError::Cancelled { puzzle_index } => {
                write!(f, "puzzle #{puzzle_index}: solve cancelled (timeout)")
            }
        }
    }
}

impl std::error::Error for SolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_puzzle_index() {
        let err = SolveError::NotUnique { puzzle_index: 7 };
        assert!(err.to_string().contains('7'));
    }
}
