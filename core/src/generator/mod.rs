use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    /// Produces a layout for `config` that never has a mine on `safe`.
    fn generate(self, config: &GameConfig, safe: Coord2) -> MineLayout;
}

/// Where the mines are, independent of what the player has seen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    bounds: Bounds,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Unchecked wire form of [`MineLayout`], the mine count is recomputed on load.
#[derive(Deserialize)]
struct RawMineLayout {
    bounds: Bounds,
    mine_mask: Array2<bool>,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = BoardError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        if raw.mine_mask.dim() != raw.bounds.shape() {
            return Err(BoardError::InvalidBoardShape);
        }

        let mut layout = Self {
            bounds: raw.bounds,
            mine_mask: raw.mine_mask,
            mine_count: 0,
        };
        layout.recount();
        Ok(layout)
    }
}

impl MineLayout {
    pub fn empty(bounds: Bounds) -> Self {
        Self {
            bounds,
            mine_mask: Array2::default(bounds.shape()),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(bounds: Bounds, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(bounds);
        for &(x, y) in mine_coords {
            let index = bounds.index((x, y)).ok_or(BoardError::OutOfBounds { x, y })?;
            layout.mine_mask[index] = true;
        }
        layout.recount();
        Ok(layout)
    }

    pub(crate) fn place(&mut self, index: [usize; 2]) {
        self.mine_mask[index] = true;
    }

    pub(crate) fn recount(&mut self) {
        self.mine_count = self.mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Distinct mined cells.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.bounds
            .index(coords)
            .is_some_and(|index| self.mine_mask[index])
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.bounds
            .iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.bounds
            .iter_coords()
            .filter(|&coords| self.contains_mine(coords))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    /// # Panics
    ///
    /// Panics if `coords` is out of bounds.
    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[[y as usize, x as usize]]
    }
}
