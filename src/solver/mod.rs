/*
 *  The dynamic solving machinery built on top of the static nonogram model:
 *  per-line DP, a Zobrist-keyed cache of its results, constraint
 *  propagation to a fixpoint, 2-SAT-style probing, and the explicit-stack
 *  DFS that search falls back to when propagation and probing stall.
 */

pub mod cache;
pub mod context;
pub mod dfs;
pub mod line_dp;
pub mod outcome;
pub mod probe;
pub mod propagate;

pub mod prelude {
    pub use super::{
        context::SolveContext,
        dfs::{solve, SearchMode},
        line_dp::{solve_line, LineDpResult},
        outcome::{SolveError, SolveOutcome},
        probe::probe_round,
        propagate::propagate,
    };
}
