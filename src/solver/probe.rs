use crate::nonogram::consts::LineId;
use crate::nonogram::line_mask::LineMask;

use super::context::SolveContext;
use super::propagate::propagate;

/// The result of probing one cell: either propagation contradicted one side
/// (so the other value is forced) or both sides survived, in which case we
/// learn nothing about *that* cell but may still learn about others (the
/// intersection of what both branches agreed on).
enum ProbeOutcome {
    Forced(bool),
    Undecided,
}

fn try_value(ctx: &SolveContext, line: LineId, pos: usize, value: bool) -> Option<crate::nonogram::board::Board> {
    let mut trial = ctx.fork(false);
    if trial.board.assign_cell(line, pos, value).is_err() {
        return None;
    }
    trial.enqueue(line);
    trial.enqueue(crate::nonogram::board::Board::cross_line(line, pos));
    match propagate(&mut trial) {
        Ok(()) => Some(trial.board),
        Err(_) => None,
    }
}

fn probe_cell(ctx: &SolveContext, line: LineId, pos: usize) -> (ProbeOutcome, Option<crate::nonogram::board::Board>) {
    let filled_branch = try_value(ctx, line, pos, true);
    let empty_branch = try_value(ctx, line, pos, false);

    match (filled_branch, empty_branch) {
        (None, None) => (ProbeOutcome::Undecided, None), // caller's board is already contradictory; propagate() will catch it
        (Some(_), None) => (ProbeOutcome::Forced(true), None),
        (None, Some(_)) => (ProbeOutcome::Forced(false), None),
        (Some(a), Some(b)) => (ProbeOutcome::Undecided, Some(intersect_agreement(&a, &b))),
    }
}

/// Cells both branches agree on become forced in the parent; cells they
/// disagree on (or that remain unknown in either) stay unknown. Modeled on
/// the snapshot/trial/restore/intersect shape of a 2-SAT-style line prober,
/// generalized here to whole-board agreement rather than a single clause.
fn intersect_agreement(a: &crate::nonogram::board::Board, b: &crate::nonogram::board::Board) -> crate::nonogram::board::Board {
    let mut merged = crate::nonogram::board::Board::new();
    for line in LineId::all() {
        let a_known = a.known(line);
        let a_filled = a.filled(line);
        let b_known = b.known(line);
        let b_filled = b.filled(line);

        let agree_filled = a_known.intersect(b_known).intersect(a_filled).intersect(b_filled);
        let a_empty = a_known.difference(a_filled);
        let b_empty = b_known.difference(b_filled);
        let agree_empty = a_empty.intersect(b_empty);

        if !agree_filled.is_empty() || !agree_empty.is_empty() {
            let _ = merged.apply_line_force(line, agree_filled, agree_empty);
        }
    }
    merged
}

/// Runs one round of probing over every still-unknown cell (SPEC_FULL 4.4):
/// for each, tries both values and either records a forced bit (both
/// branches agreed, or one branch contradicted) or leaves it open. Returns
/// `true` if anything new was learned, so the caller can decide whether
/// another round is worth the cost.
pub fn probe_round(ctx: &mut SolveContext) -> Result<bool, crate::nonogram::board::Contradiction> {
    let mut progressed = false;

    'lines: for line in LineId::all() {
        let known = ctx.board.known(line);
        let unknown = known.complement();
        for pos in unknown.iter() {
            if ctx.board.known(line).test(pos) {
                continue; // a prior iteration in this same round already decided it
            }
            let (outcome, agreement) = probe_cell(ctx, line, pos);
            match outcome {
                ProbeOutcome::Forced(value) => {
                    let fill = if value { LineMask::EMPTY.with_bit(pos) } else { LineMask::EMPTY };
                    let empty = if value { LineMask::EMPTY } else { LineMask::EMPTY.with_bit(pos) };
                    let new_bits = ctx.board.apply_line_force(line, fill, empty)?;
                    if !new_bits.is_empty() {
                        progressed = true;
                        ctx.enqueue(line);
                        propagate(ctx)?;
                    }
                }
                ProbeOutcome::Undecided => {
                    if let Some(merged) = agreement {
                        for merged_line in LineId::all() {
                            let force_fill = merged.filled(merged_line);
                            let force_empty = merged.known(merged_line).difference(merged.filled(merged_line));
                            let new_bits = ctx.board.apply_line_force(merged_line, force_fill, force_empty)?;
                            if !new_bits.is_empty() {
                                progressed = true;
                                ctx.enqueue(merged_line);
                            }
                        }
                        if progressed {
                            propagate(ctx)?;
                            continue 'lines;
                        }
                    }
                }
            }
        }
    }

    Ok(progressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::consts::N;
    use crate::nonogram::puzzle::Puzzle;

    #[test]
    fn probing_does_not_regress_a_fully_propagated_board() {
        let cols = vec![vec![N as u16]; N];
        let rows = vec![vec![N as u16]; N];
        let puzzle = Puzzle::new(0, cols, rows).unwrap();
        let mut ctx = SolveContext::new(&puzzle);
        propagate(&mut ctx).unwrap();
        assert!(ctx.board.is_solved());
        let progressed = probe_round(&mut ctx).unwrap();
        assert!(!progressed);
        assert!(ctx.board.is_solved());
    }
}
