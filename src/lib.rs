/*
 *  The static nonogram model, the Zobrist-cached line-DP/propagation/probing/
 *  DFS search pipeline, TAAI parsing, and the batch scheduler/CLI that drives
 *  them -- see SPEC_FULL.md for the full component breakdown.
 */
#![allow(dead_code)]

pub mod batch;
pub mod nonogram;
pub mod parsing;
pub mod solver;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::collections::{BTreeSet, HashMap, HashSet};
    }
}

pub mod prelude {
    pub use super::batch::*;
    pub use super::nonogram::prelude::*;
    pub use super::parsing::*;
    pub use super::solver::prelude::*;
    pub use super::utils::prelude::*;
}
