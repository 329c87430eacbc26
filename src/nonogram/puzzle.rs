use super::clue::Clue;
use super::consts::{LineId, N};
use crate::utils::prelude::*;

/// The static, read-only description of one puzzle: its 2N clues plus the
/// index it carried in the TAAI input stream (so batch diagnostics can refer
/// back to input position without the solver depending on file I/O).
///
/// Shared read-only across an entire solve (Ownership, SPEC_FULL section 3).
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub source_index: usize,
    clues: [Clue; 2 * N],
}

impl Puzzle {
    /// Builds a puzzle from exactly N column clues followed by N row clues,
    /// the TAAI ordering (SPEC_FULL section 6). Each clue's feasibility was
    /// already checked at `Clue` construction time; this only checks the
    /// provided slices are actually 2N long.
    pub fn new(source_index: usize, col_runs: Vec<Vec<u16>>, row_runs: Vec<Vec<u16>>) -> Result<Puzzle> {
        if col_runs.len() != N || row_runs.len() != N {
            return Err(anyhow!(
                "puzzle #{}: expected {} column clues and {} row clues, got {} and {}",
                source_index,
                N,
                N,
                col_runs.len(),
                row_runs.len()
            ));
        }

        let mut clues: Vec<Clue> = Vec::with_capacity(2 * N);
        for r in 0..N {
            clues.push(
                Clue::new(LineId::row(r), row_runs[r].clone())
                    .with_context(|| format!("puzzle #{}: row {}", source_index, r))?,
            );
        }
        for c in 0..N {
            clues.push(
                Clue::new(LineId::col(c), col_runs[c].clone())
                    .with_context(|| format!("puzzle #{}: column {}", source_index, c))?,
            );
        }

        let clues: [Clue; 2 * N] = clues
            .try_into()
            .map_err(|_| anyhow!("puzzle #{}: internal clue count mismatch", source_index))?;

        Ok(Puzzle { source_index, clues })
    }

    pub fn clue(&self, line: LineId) -> &Clue {
        &self.clues[line.0]
    }

    pub fn clues(&self) -> impl Iterator<Item = &Clue> {
        self.clues.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_filled_puzzle() -> Puzzle {
        let cols = vec![vec![N as u16]; N];
        let rows = vec![vec![N as u16]; N];
        Puzzle::new(0, cols, rows).unwrap()
    }

    #[test]
    fn builds_with_correct_clue_counts() {
        let puzzle = all_filled_puzzle();
        assert_eq!(puzzle.clues().count(), 2 * N);
        assert_eq!(puzzle.clue(LineId::row(0)).runs(), &[N as u16]);
        assert_eq!(puzzle.clue(LineId::col(N - 1)).runs(), &[N as u16]);
    }

    #[test]
    fn rejects_wrong_clue_count() {
        let cols = vec![vec![]; N - 1];
        let rows = vec![vec![]; N];
        assert!(Puzzle::new(0, cols, rows).is_err());
    }

    #[test]
    fn propagates_infeasible_clue_error_with_context() {
        let mut cols = vec![vec![]; N];
        cols[0] = vec![(N as u16) / 2 + 1, (N as u16) / 2 + 1];
        let rows = vec![vec![]; N];
        let err = Puzzle::new(3, cols, rows).unwrap_err();
        assert!(format!("{err:#}").contains("puzzle #3"));
    }
}
