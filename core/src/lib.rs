//! Minesweeper board engine.
//!
//! A [`Board`] defers mine placement until the first reveal so the first move can never hit a mine. Front-ends
//! either drive a [`Board`] directly or keep a [`Session`] that also tracks win/loss and the game clock.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// How mines are scattered when a board initializes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Draw `mines` random cells, re-drawing only when the safe cell comes up. Draws landing on an existing mine are
    /// wasted, so the board can end up with fewer distinct mines than requested.
    #[default]
    Rejection,
    /// Always place `min(mines, area - 1)` distinct mines.
    Exact,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub placement: Placement,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            placement: Placement::Rejection,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    /// Uses one mine per ten cells, rounded down.
    pub fn with_default_mines(width: Coord, height: Coord) -> Result<Self> {
        Self::new(width, height, default_mines(width, height))
    }

    pub fn square(size: Coord) -> Result<Self> {
        Self::with_default_mines(size, size)
    }

    pub const fn with_placement(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    /// The 10x10 board both front-ends start with.
    pub const fn classic() -> Self {
        Self::new_unchecked(10, 10, default_mines(10, 10))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.bounds().area()
    }

    /// Rejects non-positive dimensions. Mine counts that leave no room besides the safe cell are allowed but logged.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(BoardError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.mines.saturating_add(1) >= self.total_cells() {
            log::warn!(
                "Requested {} mines on a {}x{} board, at most {} fit around the safe cell",
                self.mines,
                self.width,
                self.height,
                self.total_cells() - 1
            );
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

pub const fn default_mines(width: Coord, height: Coord) -> CellCount {
    mult(width, height) / 10
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}
