use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::nonogram::board::Board;
use crate::nonogram::consts::LineId;
use crate::nonogram::puzzle::Puzzle;

use super::cache::LineCache;

/// Default per-line cache capacity. Sized generously relative to `NUM_LINES`
/// (50 for the canonical 25x25 board) since a single solve can revisit a line
/// many times across propagation and probing.
const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Everything one solve (or one probing/DFS branch within it) needs: the
/// board, the shared line-DP cache, and the queue of lines still due for a
/// propagation pass. This replaces a global cache/queue singleton with a
/// value every caller owns explicitly (REDESIGN FLAGS: "no process-wide
/// mutable state"). The cache is `Rc<RefCell<_>>` rather than owned outright
/// because `fork` hands every trial branch a share of the *same* table (the
/// Zobrist table is shared read/write across all lines within one solve,
/// SPEC_FULL section 3) -- only `board` and the queue are actually per-branch.
pub struct SolveContext<'p> {
    pub puzzle: &'p Puzzle,
    pub board: Board,
    pub cache: Rc<RefCell<LineCache>>,
    queue: VecDeque<LineId>,
    queued: [bool; crate::nonogram::consts::NUM_LINES],
}

impl<'p> SolveContext<'p> {
    pub fn new(puzzle: &'p Puzzle) -> SolveContext<'p> {
        let mut ctx = SolveContext {
            puzzle,
            board: Board::new(),
            cache: Rc::new(RefCell::new(LineCache::with_capacity(DEFAULT_CACHE_CAPACITY))),
            queue: VecDeque::with_capacity(crate::nonogram::consts::NUM_LINES),
            queued: [false; crate::nonogram::consts::NUM_LINES],
        };
        for line in LineId::all() {
            ctx.enqueue(line);
        }
        ctx
    }

    /// A context sharing the parent's cache (line-DP results don't depend on
    /// which branch is being explored) but starting from a fresh queue and a
    /// clone of the parent's board -- used when probing/DFS forks a branch.
    pub fn fork(&self, queue_all: bool) -> SolveContext<'p> {
        let mut ctx = SolveContext {
            puzzle: self.puzzle,
            board: self.board.clone(),
            cache: Rc::clone(&self.cache),
            queue: VecDeque::new(),
            queued: [false; crate::nonogram::consts::NUM_LINES],
        };
        if queue_all {
            for line in LineId::all() {
                ctx.enqueue(line);
            }
        }
        ctx
    }

    pub fn enqueue(&mut self, line: LineId) {
        if !self.queued[line.0] {
            self.queued[line.0] = true;
            self.queue.push_back(line);
        }
    }

    pub fn dequeue(&mut self) -> Option<LineId> {
        let line = self.queue.pop_front()?;
        self.queued[line.0] = false;
        Some(line)
    }

    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::consts::N;

    fn trivial_puzzle() -> Puzzle {
        Puzzle::new(0, vec![vec![]; N], vec![vec![]; N]).unwrap()
    }

    #[test]
    fn new_context_enqueues_every_line() {
        let puzzle = trivial_puzzle();
        let mut ctx = SolveContext::new(&puzzle);
        let mut count = 0;
        while ctx.dequeue().is_some() {
            count += 1;
        }
        assert_eq!(count, 2 * N);
    }

    #[test]
    fn enqueue_is_idempotent() {
        let puzzle = trivial_puzzle();
        let mut ctx = SolveContext::new(&puzzle);
        while ctx.dequeue().is_some() {}
        ctx.enqueue(LineId::row(0));
        ctx.enqueue(LineId::row(0));
        assert_eq!(ctx.dequeue(), Some(LineId::row(0)));
        assert_eq!(ctx.dequeue(), None);
    }
}
