/*
 *  TAAI input parsing: turns the `$<index>`-delimited clue stream (SPEC_FULL
 *  4.6) into `Puzzle` values. A leaf module, so unlike `nonogram`/`solver` it
 *  re-exports its public surface directly rather than through its own
 *  `prelude` submodule.
 */

pub mod taai;

pub use taai::{parse_single, parse_stream};
