use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI options (SPEC_FULL section 6), mirroring the shape of the
/// reference crate's `LTPServerOptions`: a flat options struct carrying both
/// the ambient flags (log level, thread count, timeout) and, via `command`,
/// which of the three CLI surfaces to run.
#[derive(Clone, Debug, Parser)]
#[command(name = "nonosolve", version, about = "Solves nonogram puzzles via line DP, Zobrist-cached propagation, probing, and DFS search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity passed straight to `flexi_logger`'s env-or-str filter
    /// (e.g. "info", "debug", "nonosolve=trace").
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Shorthand for `--log-level debug` (mirrors the reference crate's own
    /// separate `--log-level` / `--verbose` flags); ignored if `--log-level`
    /// is also given.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Batch-mode worker count; defaults to `std::thread::available_parallelism()`.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Batch-mode wall-clock deadline per puzzle, wired into the DFS
    /// cancellation hook; absent by default (no timeout).
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Reads one puzzle and prints `<node_count>\t<seconds>` then its solved grid.
    Solve { puzzle_file: PathBuf },
    /// Reads one puzzle and prints node_count (unique), -1 (no solution), or -2 (ambiguous).
    Generate { puzzle_file: PathBuf },
}
