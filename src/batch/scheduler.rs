use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use itertools::Itertools;

use crate::nonogram::board::Board;
use crate::nonogram::consts::N;
use crate::nonogram::puzzle::Puzzle;
use crate::parsing::{parse_single, parse_stream};
use crate::solver::context::SolveContext;
use crate::solver::dfs::{solve, SearchMode};
use crate::solver::outcome::{SolveError, SolveOutcome};
use crate::utils::prelude::*;

use super::outcome::BatchError;

/// Builds a cancellation hook from an optional millisecond budget -- the one
/// caller in this crate that turns `--timeout-ms` into an actual wall-clock
/// check (SPEC_FULL section 5, "Cancellation").
fn cancel_hook(timeout_ms: Option<u64>) -> Box<dyn Fn() -> bool> {
    match timeout_ms {
        Some(ms) => {
            let deadline = Instant::now() + Duration::from_millis(ms);
            Box::new(move || Instant::now() >= deadline)
        }
        None => Box::new(|| false),
    }
}

/// Solves one puzzle to a single, first-found solution (SPEC_FULL 4.7's
/// `solve_one`). The only entry point the scheduler needs for the `solve` CLI
/// surface and for batch mode's per-puzzle dispatch.
pub fn solve_one(puzzle: &Puzzle, should_cancel: &dyn Fn() -> bool) -> Result<SolveOutcome, SolveError> {
    let mut ctx = SolveContext::new(puzzle);
    solve(&mut ctx, SearchMode::Solve, should_cancel)
}

/// Solves a puzzle looking for a second, distinct solution (SPEC_FULL 4.7's
/// `verify_unique`), for the `generate` CLI surface.
pub fn verify_unique(puzzle: &Puzzle, should_cancel: &dyn Fn() -> bool) -> Result<SolveOutcome, SolveError> {
    let mut ctx = SolveContext::new(puzzle);
    solve(&mut ctx, SearchMode::Generate, should_cancel)
}

/// `<node_count>\t<seconds>` followed by the N x N grid (section 6, "Output
/// format (solve)").
pub fn format_solve_output(outcome: &SolveOutcome, elapsed: Duration) -> String {
    format!("{}\t{:.6}\n{}\n", outcome.nodes, elapsed.as_secs_f64(), outcome.board.notate())
}

/// The documented solve-mode failure shape (section 7: "Contradiction ...
/// reported as the puzzle's result -- empty grid with marker in solve
/// mode"): a `-1` marker in the node-count field, followed by an all-`?`
/// placeholder grid, same line shape as a successful solve.
pub fn format_solve_failure(elapsed: Duration) -> String {
    format!("-1\t{:.6}\n{}\n", elapsed.as_secs_f64(), Board::new().notate())
}

/// A single integer: positive node count for a unique solution, `-1` for no
/// solution, `-2` for multiple solutions (section 6, `generate` surface).
pub fn format_generate_result(result: &Result<SolveOutcome, SolveError>) -> String {
    match result {
        Ok(outcome) => outcome.nodes.to_string(),
        Err(SolveError::NotUnique { .. }) => "-2".to_string(),
        Err(_) => "-1".to_string(),
    }
}

fn read_to_string(path: &Path) -> Result<String, BatchError> {
    fs::read_to_string(path).map_err(|source| BatchError::Io { path: path.display().to_string(), source })
}

/// Runs the `solve <puzzle-file>` CLI surface end to end: parse, solve,
/// print to stdout in the mandated format.
pub fn run_solve(path: &Path, timeout_ms: Option<u64>) -> Result<()> {
    let input = read_to_string(path)?;
    let puzzle = parse_single(&input)?;
    let cancel = cancel_hook(timeout_ms);

    let started = Instant::now();
    let outcome = solve_one(&puzzle, cancel.as_ref());
    let elapsed = started.elapsed();

    match outcome {
        Ok(outcome) => print!("{}", format_solve_output(&outcome, elapsed)),
        Err(err) => {
            log::warn!("{err}");
            print!("{}", format_solve_failure(elapsed));
        }
    }
    Ok(())
}

/// Runs the `generate <puzzle-file>` CLI surface end to end.
pub fn run_generate(path: &Path, timeout_ms: Option<u64>) -> Result<()> {
    let input = read_to_string(path)?;
    let puzzle = parse_single(&input)?;
    let cancel = cancel_hook(timeout_ms);

    let result = verify_unique(&puzzle, cancel.as_ref());
    println!("{}", format_generate_result(&result));
    Ok(())
}

/// Per-puzzle batch diagnostics: one free-form line per puzzle (open question
/// in SPEC_FULL section 9 resolves this as unspecified-but-structured).
fn log_line(puzzle_index: usize, elapsed: Duration, result: &Result<SolveOutcome, SolveError>) -> String {
    match result {
        Ok(outcome) => format!(
            "puzzle #{puzzle_index}: solved in {:.6}s, nodes={}",
            elapsed.as_secs_f64(),
            outcome.nodes
        ),
        Err(err) => format!("puzzle #{puzzle_index}: {err} ({:.6}s)", elapsed.as_secs_f64()),
    }
}

/// Runs batch mode (no CLI args): reads `input.txt`, solves every puzzle in
/// it (optionally fanned across a thread pool, section 5's "Cross-puzzle
/// parallelism"), writes `solution.txt` and appends to `log.txt`. Puzzles
/// that fail to parse are skipped with a log entry rather than aborting the
/// whole batch (section 7, "Malformed input aborts the single puzzle but not
/// the batch"); I/O failures on the shared output files are fatal.
pub fn run_batch(threads: Option<usize>, timeout_ms: Option<u64>) -> Result<()> {
    let input = read_to_string(Path::new("input.txt"))?;
    let puzzles = match parse_stream(&input) {
        Ok(puzzles) if !puzzles.is_empty() => puzzles,
        Ok(_) => return Err(anyhow::Error::new(BatchError::EmptyInput)),
        Err(err) => {
            log::warn!("input.txt failed to parse entirely: {err:#}");
            return Err(err);
        }
    };
    log::info!("loaded {} puzzle(s) from input.txt ({}x{} board)", puzzles.len(), N, N);

    let worker_count = threads
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |v| v.into()))
        .max(1);

    let queue = Mutex::new(puzzles.into_iter().enumerate().collect::<Vec<_>>());
    let (tx, rx) = mpsc::channel();

    let mut results: Vec<(usize, usize, Duration, Result<SolveOutcome, SolveError>)> = std::thread::scope(|scope| {
        for _ in 0..worker_count {
            let queue = &queue;
            let tx = tx.clone();
            scope.spawn(move || loop {
                let next = queue.lock().unwrap().pop();
                let Some((position, puzzle)) = next else { break };
                let cancel = cancel_hook(timeout_ms);
                let started = Instant::now();
                let result = solve_one(&puzzle, cancel.as_ref());
                let elapsed = started.elapsed();
                tx.send((position, puzzle.source_index, elapsed, result)).expect("scheduler channel closed early");
            });
        }
        drop(tx);
        rx.into_iter().collect()
    });
    results.sort_by_key(|(position, ..)| *position);

    let solution_body = results
        .iter()
        .map(|(_, _, elapsed, result)| match result {
            Ok(outcome) => format_solve_output(outcome, *elapsed),
            Err(_) => format_solve_failure(*elapsed),
        })
        .join("\n");
    fs::write("solution.txt", solution_body).map_err(|source| BatchError::Io { path: "solution.txt".into(), source })?;

    let log_body = results
        .iter()
        .map(|(_, source_index, elapsed, result)| log_line(*source_index, *elapsed, result))
        .join("\n");
    let existing = fs::read_to_string("log.txt").unwrap_or_default();
    fs::write("log.txt", format!("{existing}{log_body}\n")).map_err(|source| BatchError::Io { path: "log.txt".into(), source })?;

    let failures = results.iter().filter(|(_, _, _, result)| result.is_err()).count();
    log::info!("batch complete: {}/{} puzzles solved", results.len() - failures, results.len());

    Ok(())
}
