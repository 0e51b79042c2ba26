use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
///
/// Signed so raw front-end input (including negatives) can be passed straight through and rejected with
/// [`BoardError::OutOfBounds`](crate::BoardError::OutOfBounds).
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Board extent, `x` runs along the width and `y` along the height.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: Coord,
    pub height: Coord,
}

impl Bounds {
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    pub const fn contains(self, (x, y): Coord2) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Row-major `[y, x]` index into the backing array, `None` when out of bounds.
    pub fn index(self, coords: Coord2) -> Option<[usize; 2]> {
        if self.contains(coords) {
            Some([coords.1 as usize, coords.0 as usize])
        } else {
            None
        }
    }

    /// Shape of the backing array, `(rows, cols)`.
    pub fn shape(self) -> (usize, usize) {
        (self.height.max(0) as usize, self.width.max(0) as usize)
    }

    pub const fn area(self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Every coordinate on the board, row by row.
    pub fn iter_coords(self) -> impl Iterator<Item = Coord2> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    pub fn iter_neighbors(self, center: Coord2) -> NeighborIter {
        NeighborIter::new(center, self, &DISPLACEMENTS)
    }

    pub fn iter_orthogonal(self, center: Coord2) -> NeighborIter {
        NeighborIter::new(center, self, &ORTHOGONAL)
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    if a <= 0 || b <= 0 {
        return 0;
    }
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [Coord2; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const ORTHOGONAL: [Coord2; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: Coord2, bounds: Bounds) -> Option<Coord2> {
    let next = (
        coords.0.checked_add(delta.0)?,
        coords.1.checked_add(delta.1)?,
    );
    bounds.contains(next).then_some(next)
}

/// Iterates the in-bounds cells at a fixed set of offsets around a center cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Bounds,
    deltas: &'static [Coord2],
    index: usize,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Bounds, deltas: &'static [Coord2]) -> Self {
        Self {
            center,
            bounds,
            deltas,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &delta = self.deltas.get(self.index)?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
