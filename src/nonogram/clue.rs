use crate::nonogram::consts::{LineId, N};
use crate::utils::prelude::*;

use super::line_mask::LineMask;

/// An ordered list of positive run-lengths for one line, plus the line's
/// stable identity (used for cache-keying and Zobrist hashing).
///
/// Invariant, checked at construction: `sum(runs) + (runs.len() - 1) <= N`.
/// A clue with zero runs is legal and denotes an all-empty line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clue {
    pub line: LineId,
    runs: Vec<u16>,
}

impl Clue {
    /// Builds a clue, validating the feasibility invariant up front so
    /// infeasible input is rejected at parse time rather than discovered mid-solve.
    pub fn new(line: LineId, runs: Vec<u16>) -> Result<Clue> {
        let clue = Clue { line, runs };
        clue.validate()?;
        Ok(clue)
    }

    fn validate(&self) -> Result<()> {
        if self.runs.iter().any(|&r| r == 0) {
            return Err(anyhow!(
                "line {}: clue run-lengths must be positive, got {:?}",
                self.line.0,
                self.runs
            ));
        }
        let sum: usize = self.runs.iter().map(|&r| r as usize).sum();
        let gaps = self.runs.len().saturating_sub(1);
        if sum + gaps > N {
            return Err(anyhow!(
                "line {}: clue {:?} infeasible for width {} (sum {} + gaps {} > {})",
                self.line.0,
                self.runs,
                N,
                sum,
                gaps,
                N
            ));
        }
        Ok(())
    }

    pub fn runs(&self) -> &[u16] {
        &self.runs
    }

    pub fn is_empty_clue(&self) -> bool {
        self.runs.is_empty()
    }

    /// Sum of run-lengths, not counting mandatory single-cell gaps between them.
    pub fn filled_count(&self) -> usize {
        self.runs.iter().map(|&r| r as usize).sum()
    }

    /// `sum(runs) + (k - 1)`, the minimum width this clue could possibly need.
    pub fn minimum_width(&self) -> usize {
        self.filled_count() + self.runs.len().saturating_sub(1)
    }

    /// True when the clue's minimum width exactly equals the line width --
    /// the placement is then unique and can be emitted directly without
    /// running the full DP (SPEC_FULL 4.1 edge case).
    pub fn is_exactly_fit(&self) -> bool {
        self.minimum_width() == N
    }

    /// Packs the runs left to right with a single mandatory gap between each.
    /// When `is_exactly_fit()` is true this is the line's only feasible
    /// placement and can be emitted directly without running the DP.
    pub fn exact_fit_mask(&self) -> LineMask {
        let mut mask = LineMask::EMPTY;
        let mut pos = 0usize;
        for (i, &run) in self.runs.iter().enumerate() {
            if i > 0 {
                pos += 1; // mandatory gap
            }
            mask = mask.union(LineMask::range(pos, pos + run as usize));
            pos += run as usize;
        }
        mask
    }

    /// Re-derives a clue's run-lengths from a fully-decided filled mask, for
    /// the solvability/uniqueness round-trip property (SPEC_FULL section 8).
    pub fn runs_from_filled(filled: LineMask) -> Vec<u16> {
        let mut runs = vec![];
        let mut run = 0u16;
        for i in 0..N {
            if filled.test(i) {
                run += 1;
            } else if run > 0 {
                runs.push(run);
                run = 0;
            }
        }
        if run > 0 {
            runs.push(run);
        }
        runs
    }
}
