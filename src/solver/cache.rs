use crate::nonogram::consts::LineId;
use crate::nonogram::line_mask::LineMask;
use crate::nonogram::zobrist::line_key;

use super::line_dp::LineDpResult;

/// Maximum linear-probe distance before an entry is evicted to make room
/// (SPEC_FULL 4.2, "bounded, open-addressed"). Keeps lookups O(1) in the
/// common case without an LRU list to maintain.
const MAX_PROBE: usize = 8;

#[derive(Clone, Copy)]
struct Entry {
    hash: u64,
    line: LineId,
    known: LineMask,
    filled: LineMask,
    result: LineDpResult,
}

/// An open-addressed memoization table from `(line, known, filled)` to the
/// line-DP result computed for it. Entries carry their full key so a hash
/// collision never returns a stale or wrong result -- a mismatching key on
/// lookup is treated as a miss, not an error (SPEC_FULL 4.2).
pub struct LineCache {
    slots: Vec<Option<Entry>>,
    mask: u64,
    hits: u64,
    misses: u64,
}

impl LineCache {
    /// `capacity` is rounded up to the next power of two.
    pub fn with_capacity(capacity: usize) -> LineCache {
        let capacity = capacity.max(16).next_power_of_two();
        LineCache {
            slots: vec![None; capacity],
            mask: (capacity - 1) as u64,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, line: LineId, known: LineMask, filled: LineMask) -> Option<LineDpResult> {
        let hash = line_key(line, known, filled);
        let start = (hash & self.mask) as usize;
        for probe in 0..MAX_PROBE {
            let idx = (start + probe) % self.slots.len();
            match &self.slots[idx] {
                Some(entry) if entry.hash == hash && entry.line == line && entry.known == known && entry.filled == filled => {
                    self.hits += 1;
                    return Some(entry.result);
                }
                Some(_) => continue,
                None => break,
            }
        }
        self.misses += 1;
        None
    }

    pub fn insert(&mut self, line: LineId, known: LineMask, filled: LineMask, result: LineDpResult) {
        let hash = line_key(line, known, filled);
        let start = (hash & self.mask) as usize;
        let len = self.slots.len();
        for probe in 0..MAX_PROBE {
            let idx = (start + probe) % len;
            if self.slots[idx].is_none() {
                self.slots[idx] = Some(Entry { hash, line, known, filled, result });
                return;
            }
        }
        // Every probe slot was occupied: evict the first one, same as a
        // direct-mapped cache would. This keeps memory bounded at the cost
        // of occasionally recomputing a line we've already seen.
        self.slots[start] = Some(Entry { hash, line, known, filled, result });
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let mut cache = LineCache::with_capacity(16);
        let line = LineId::row(0);
        let known = LineMask::range(0, 3);
        let filled = LineMask::range(0, 1);
        let result = LineDpResult::Forced {
            force_fill: LineMask::EMPTY,
            force_empty: LineMask::EMPTY,
        };
        cache.insert(line, known, filled, result);
        assert_eq!(cache.get(line, known, filled), Some(result));
    }

    #[test]
    fn distinct_keys_miss() {
        let mut cache = LineCache::with_capacity(16);
        assert_eq!(cache.get(LineId::row(1), LineMask::EMPTY, LineMask::EMPTY), None);
    }

    #[test]
    fn cache_hit_matches_live_recomputation() {
        // SPEC_FULL 4.2 / testable property 4: a cache hit must return
        // exactly what recomputing the line DP would have returned.
        use super::super::line_dp::solve_line;

        let line = LineId::row(3);
        let runs = [2u16, 1u16];
        let known = LineMask::range(0, 4);
        let filled = LineMask::range(0, 2);

        let recomputed = solve_line(&runs, known, filled);
        let mut cache = LineCache::with_capacity(16);
        cache.insert(line, known, filled, recomputed);

        let hit = cache.get(line, known, filled).expect("entry was just inserted");
        assert_eq!(hit, recomputed);
        assert_eq!(hit, solve_line(&runs, known, filled));
    }
}
