use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Purely random placement that only guarantees the start cell is mine-free.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: &GameConfig, safe: Coord2) -> MineLayout {
        let bounds = config.bounds();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut layout = MineLayout::empty(bounds);

        match config.placement {
            Placement::Rejection => place_rejection(&mut layout, config.mines, safe, &mut rng),
            Placement::Exact => place_exact(&mut layout, config.mines, safe, &mut rng),
        }
        layout.recount();

        log::debug!(
            "Generated {}x{} minefield around {:?}, requested {} mines, placed {}",
            bounds.width,
            bounds.height,
            safe,
            config.mines,
            layout.mine_count()
        );
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}

/// One uniform draw per requested mine, re-drawing only when the safe cell comes up. Draws that land on an existing
/// mine are not retried.
fn place_rejection(layout: &mut MineLayout, mines: CellCount, safe: Coord2, rng: &mut SmallRng) {
    let bounds = layout.bounds();

    if mines > 0 && bounds.area() == 0 {
        log::warn!("Cannot place mines on an empty {}x{} board", bounds.width, bounds.height);
        return;
    }

    // the only cell is the safe one, re-drawing would never end
    if mines > 0 && bounds.area() == 1 && bounds.contains(safe) {
        log::warn!("No room for mines besides the safe cell, board left empty");
        return;
    }

    for _ in 0..mines {
        let coords = loop {
            let coords = (
                rng.random_range(0..bounds.width),
                rng.random_range(0..bounds.height),
            );
            if coords != safe {
                break coords;
            }
        };
        if let Some(index) = bounds.index(coords) {
            layout.place(index);
        }
    }
}

/// Picks distinct free cells one at a time, so every draw lands.
fn place_exact(layout: &mut MineLayout, mines: CellCount, safe: Coord2, rng: &mut SmallRng) {
    let reserved = layout.bounds().index(safe);

    // reserve the safe cell so it is skipped like any other occupied cell
    if let Some(index) = reserved {
        layout.mine_mask[index] = true;
    }
    let mut free_cells = layout.bounds().area() - CellCount::from(reserved.is_some());
    if mines > free_cells {
        log::warn!(
            "Requested {} mines but only {} cells are free, placing {}",
            mines,
            free_cells,
            free_cells
        );
    }

    let cells = layout
        .mine_mask
        .as_slice_mut()
        .expect("layout should be standard");
    for _ in 0..mines.min(free_cells) {
        let place = rng.random_range(0..free_cells) as usize;
        if let Some(cell) = cells.iter_mut().filter(|cell| !**cell).nth(place) {
            *cell = true;
            free_cells -= 1;
        }
    }

    if let Some(index) = reserved {
        layout.mine_mask[index] = false;
    }
}
