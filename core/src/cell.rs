use serde::{Deserialize, Serialize};

/// Raw per-cell state stored by the board.
///
/// `adjacent` is only meaningful for non-mine cells and stays `0` on mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub uncovered: bool,
    pub flagged: bool,
    pub mine: bool,
    pub adjacent: u8,
}

impl Cell {
    /// Whether revealing this cell should cascade into its orthogonal neighbors.
    pub const fn is_empty(self) -> bool {
        !self.mine && self.adjacent == 0
    }

    pub const fn view(self) -> CellView {
        if self.flagged {
            CellView::Flagged
        } else if !self.uncovered {
            CellView::Covered
        } else if self.mine {
            CellView::Mine
        } else {
            CellView::Number(self.adjacent)
        }
    }
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Flagged,
    /// Only visible after a loss, when every mine gets uncovered.
    Mine,
    Number(u8),
}

impl Default for CellView {
    fn default() -> Self {
        Self::Covered
    }
}
