/// The side length of the square board this crate is built for.
///
/// The canonical configuration is 25, chosen so a single line fits in one
/// `u32` with headroom to spare; smaller boards (used heavily in tests) work
/// unchanged since every bitline operation is parametrized by `N`, not by the
/// word width.
pub const N: usize = 25;

/// Number of distinct lines on the board (N rows + N columns).
pub const NUM_LINES: usize = 2 * N;

/// A line orientation.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Row = 0,
    Col = 1,
}

impl Orientation {
    pub fn notate(&self) -> &'static str {
        match self {
            Orientation::Row => "row",
            Orientation::Col => "col",
        }
    }
}

/// A stable numeric identity for one line on the board: rows are `0..N`,
/// columns are `N..2N`. Used directly as an index into per-line arrays and as
/// the line component of a Zobrist key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub usize);

impl LineId {
    pub fn row(index: usize) -> LineId {
        debug_assert!(index < N);
        LineId(index)
    }

    pub fn col(index: usize) -> LineId {
        debug_assert!(index < N);
        LineId(N + index)
    }

    pub fn orientation(&self) -> Orientation {
        if self.0 < N {
            Orientation::Row
        } else {
            Orientation::Col
        }
    }

    /// The row or column index this line corresponds to, stripped of orientation.
    pub fn index(&self) -> usize {
        if self.0 < N {
            self.0
        } else {
            self.0 - N
        }
    }

    pub fn all() -> impl Iterator<Item = LineId> {
        (0..NUM_LINES).map(LineId)
    }
}
