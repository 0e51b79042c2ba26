use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board lifecycle. Mines only exist once the board is [`Phase::Ready`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Uninitialized,
    Ready,
}

/// The minefield a single game is played on.
///
/// Mines are placed on the first [`Board::reveal`], never on the revealed cell. Until then every query answers
/// `false` and flagging does nothing. A board is not reused across games, start a new one instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    phase: Phase,
    seed: u64,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    config: GameConfig,
    cells: Array2<Cell>,
    phase: Phase,
    seed: u64,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        raw.config.validate()?;
        if raw.cells.dim() != raw.config.bounds().shape() {
            return Err(BoardError::InvalidBoardShape);
        }

        Ok(Self {
            config: raw.config,
            cells: raw.cells,
            phase: raw.phase,
            seed: raw.seed,
        })
    }
}

impl Board {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::with_config(&GameConfig::new(width, height, mines)?)
    }

    /// Rectangular board with one mine per ten cells.
    pub fn with_default_mines(width: Coord, height: Coord) -> Result<Self> {
        Self::with_config(&GameConfig::with_default_mines(width, height)?)
    }

    /// Square board with one mine per ten cells.
    pub fn square(size: Coord) -> Result<Self> {
        Self::with_config(&GameConfig::square(size)?)
    }

    pub fn with_config(config: &GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// Board whose mine layout is fully determined by `seed` and the first revealed cell.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: *config,
            cells: Array2::default(config.bounds().shape()),
            phase: Phase::Uninitialized,
            seed,
        })
    }

    /// Already initialized board with a known layout, no cell is uncovered yet.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let bounds = layout.bounds();
        let config = GameConfig::new_unchecked(bounds.width, bounds.height, layout.mine_count());
        let mut board = Self {
            config,
            cells: Array2::default(bounds.shape()),
            phase: Phase::Uninitialized,
            seed: 0,
        };
        board.apply_layout(layout);
        board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Requested number of mines.
    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    /// Distinct mines actually on the board, `0` before initialization.
    pub fn placed_mines(&self) -> CellCount {
        self.count_cells(|cell| cell.mine)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(|cell| cell.flagged)
    }

    pub fn uncovered_count(&self) -> CellCount {
        self.count_cells(|cell| cell.uncovered)
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count()) - i64::from(self.flag_count())
    }

    /// Uncovers a cell, cascading through orthogonal neighbors while the uncovered cells have no adjacent mines.
    ///
    /// The first call places the mines, keeping `(x, y)` clear. Revealing a mine is allowed, deciding that the game
    /// is lost is up to the caller.
    pub fn reveal(&mut self, x: Coord, y: Coord) -> Result<()> {
        let index = self.index_of((x, y))?;

        if self.phase == Phase::Uninitialized {
            self.initialize((x, y))?;
        }

        if self.cells[index].uncovered {
            return Ok(());
        }

        let flooded = self.flood_reveal((x, y));
        log::debug!("Revealed ({}, {}), {} cells uncovered", x, y, flooded);
        Ok(())
    }

    /// Toggles the flag on a cell, ignored before the first reveal.
    pub fn toggle_flag(&mut self, x: Coord, y: Coord) -> Result<()> {
        if self.phase == Phase::Uninitialized {
            return Ok(());
        }

        let index = self.index_of((x, y))?;
        let cell = &mut self.cells[index];
        cell.flagged = !cell.flagged;
        Ok(())
    }

    pub fn is_mine(&self, x: Coord, y: Coord) -> Result<bool> {
        self.query((x, y), |cell| cell.mine)
    }

    pub fn is_uncovered(&self, x: Coord, y: Coord) -> Result<bool> {
        self.query((x, y), |cell| cell.uncovered)
    }

    pub fn is_flagged(&self, x: Coord, y: Coord) -> Result<bool> {
        self.query((x, y), |cell| cell.flagged)
    }

    /// Raw facets of a cell. Before initialization every cell is blank.
    pub fn cell_state(&self, x: Coord, y: Coord) -> Result<Cell> {
        let index = self.index_of((x, y))?;
        Ok(self.cells[index])
    }

    pub fn cell_view(&self, x: Coord, y: Coord) -> Result<CellView> {
        self.cell_state(x, y).map(Cell::view)
    }

    /// Every cell with its coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.bounds()
            .iter_coords()
            .zip(self.cells.iter().copied())
    }

    /// Uncovers every mine, leaving the rest of the board untouched.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.mine) {
            cell.uncovered = true;
            cell.flagged = false;
        }
    }

    /// Win condition, every non-mine cell is uncovered. Mines may stay covered.
    pub fn all_safe_cells_uncovered(&self) -> bool {
        self.cells.iter().all(|cell| cell.mine || cell.uncovered)
    }

    /// One-time transition to [`Phase::Ready`], placing mines around the `safe` cell.
    fn initialize(&mut self, safe: Coord2) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(BoardError::AlreadyInitialized);
        }

        let layout = RandomMineGenerator::new(self.seed).generate(&self.config, safe);
        self.apply_layout(&layout);
        log::debug!(
            "Initialized {}x{} board with {} mines, safe cell {:?}",
            self.width(),
            self.height(),
            layout.mine_count(),
            safe
        );
        Ok(())
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        let bounds = self.bounds();
        for (coords, cell) in bounds.iter_coords().zip(self.cells.iter_mut()) {
            cell.mine = layout.contains_mine(coords);
            cell.adjacent = if cell.mine {
                0
            } else {
                layout.adjacent_mine_count(coords)
            };
        }
        self.phase = Phase::Ready;
    }

    /// Work-stack flood fill starting at a covered cell, returns how many cells got uncovered.
    fn flood_reveal(&mut self, start: Coord2) -> usize {
        let bounds = self.bounds();
        let mut to_visit = vec![start];
        let mut uncovered = 0;

        while let Some(coords) = to_visit.pop() {
            let Some(index) = bounds.index(coords) else {
                continue;
            };

            let cell = &mut self.cells[index];
            if cell.uncovered {
                continue;
            }
            cell.uncovered = true;
            cell.flagged = false;
            uncovered += 1;
            log::trace!("Uncovered {:?}, adjacent mines: {}", coords, cell.adjacent);

            if cell.is_empty() {
                let cells = &self.cells;
                to_visit.extend(bounds.iter_orthogonal(coords).filter(|&pos| {
                    bounds
                        .index(pos)
                        .is_some_and(|index| !cells[index].uncovered)
                }));
            }
        }

        uncovered
    }

    fn query(&self, coords: Coord2, facet: impl FnOnce(&Cell) -> bool) -> Result<bool> {
        if self.phase == Phase::Uninitialized {
            return Ok(false);
        }
        let index = self.index_of(coords)?;
        Ok(facet(&self.cells[index]))
    }

    fn index_of(&self, (x, y): Coord2) -> Result<[usize; 2]> {
        self.bounds()
            .index((x, y))
            .ok_or(BoardError::OutOfBounds { x, y })
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&cell| predicate(cell)).count() as CellCount
    }
}
