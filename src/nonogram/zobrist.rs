use std::sync::OnceLock;

use super::consts::{LineId, NUM_LINES, N};
use super::line_mask::LineMask;

/// Default seed for the per-(line, position, kind) tag table; overridable via
/// `NONOGRAM_ZOBRIST_SEED` so a deployment can still get determinism without
/// recompiling (SPEC_FULL section 6, "Environment and persisted state").
const DEFAULT_SEED: u64 = 0x5A0B_5157;

/// Which mask a tag belongs to, mirroring the spec's "(known, filled)" pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    Known,
    Filled,
}

struct TagTable {
    /// `[line][position][kind]`, kind 0 = known, 1 = filled.
    cell: Box<[[[u64; 2]; N]; NUM_LINES]>,
    /// One tag per line-id, XORed in regardless of position, so two lines
    /// with identical masks still produce distinct keys.
    line: [u64; NUM_LINES],
}

static TAGS: OnceLock<TagTable> = OnceLock::new();

/// A small, deterministic splitmix64-style generator. We don't reach for
/// `DefaultHasher` the way the teacher's board Zobrist table does, because
/// its output isn't specified to be stable across Rust versions and this
/// table's reproducibility guarantee (SPEC_FULL 4.2, "deterministic seed for
/// reproducibility") has to hold for real.
struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> SplitMix64 {
        SplitMix64(seed)
    }

    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

fn seed() -> u64 {
    std::env::var("NONOGRAM_ZOBRIST_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEED)
}

fn tags() -> &'static TagTable {
    TAGS.get_or_init(|| {
        let mut rng = SplitMix64::new(seed());
        let mut cell = Box::new([[[0u64; 2]; N]; NUM_LINES]);
        for line in cell.iter_mut() {
            for pos in line.iter_mut() {
                pos[0] = rng.next();
                pos[1] = rng.next();
            }
        }
        let mut line = [0u64; NUM_LINES];
        for tag in line.iter_mut() {
            *tag = rng.next();
        }
        TagTable { cell, line }
    })
}

/// The 64-bit fingerprint for a line-solve cache query: XORs the per-line
/// tag with the known-tag of every known bit and the filled-tag of every
/// filled bit. Incrementally updatable (XOR out an old bit's tag, XOR in the
/// new one) though nothing here relies on that property for correctness.
pub fn line_key(line: LineId, known: LineMask, filled: LineMask) -> u64 {
    let table = tags();
    let mut h = table.line[line.0];
    for pos in known.iter() {
        h ^= table.cell[line.0][pos][TagKind::Known as usize];
    }
    for pos in filled.iter() {
        h ^= table.cell[line.0][pos][TagKind::Filled as usize];
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_hash_identically() {
        let known = LineMask::range(0, 5);
        let filled = LineMask::range(0, 3);
        let a = line_key(LineId::row(0), known, filled);
        let b = line_key(LineId::row(0), known, filled);
        assert_eq!(a, b);
    }

    #[test]
    fn different_lines_hash_differently_for_same_masks() {
        let known = LineMask::range(0, 5);
        let filled = LineMask::range(0, 3);
        let a = line_key(LineId::row(0), known, filled);
        let b = line_key(LineId::row(1), known, filled);
        assert_ne!(a, b);
    }

    #[test]
    fn different_masks_hash_differently() {
        let a = line_key(LineId::row(0), LineMask::range(0, 5), LineMask::EMPTY);
        let b = line_key(LineId::row(0), LineMask::range(0, 6), LineMask::EMPTY);
        assert_ne!(a, b);
    }
}
