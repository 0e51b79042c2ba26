use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// The first reveal is always safe, so a game can never be lost before it started.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No cell revealed yet
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from first click to win or loss.
///
/// Holds everything a front-end needs between input events, so the board, the game-over state, and the clock live
/// together instead of in globals. Start a new game with [`Session::restart`].
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    state: SessionState,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self> {
        Ok(Self::with_board(Board::with_config(config)?))
    }

    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::with_board(Board::with_seed(config, seed)?))
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            state: Default::default(),
            started_at: None,
            ended_at: None,
        }
    }

    /// Throws the current board away and starts over with the same configuration.
    pub fn restart(&mut self) -> Result<()> {
        *self = Self::new(self.board.config())?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    /// Time since the first reveal, frozen once the game ends.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or_else(Instant::now)
                .saturating_duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    /// Reveals a cell and settles the game if it hit a mine or cleared the board.
    ///
    /// Flagged cells are protected and report [`RevealOutcome::NoChange`].
    pub fn reveal(&mut self, x: Coord, y: Coord) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        self.check_not_finished()?;

        if self.board.is_flagged(x, y)? || self.board.is_uncovered(x, y)? {
            return Ok(NoChange);
        }

        self.board.reveal(x, y)?;
        self.mark_started();

        Ok(if self.board.is_mine(x, y)? {
            self.board.reveal_all_mines();
            self.mark_ended(SessionState::Lost);
            HitMine
        } else if self.board.all_safe_cells_uncovered() {
            self.mark_ended(SessionState::Won);
            Won
        } else {
            Revealed
        })
    }

    /// Flags or unflags a covered cell. Does nothing before the first reveal.
    pub fn toggle_flag(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        self.check_not_finished()?;

        if !self.board.is_initialized() || self.board.is_uncovered(x, y)? {
            return Ok(MarkOutcome::NoChange);
        }

        self.board.toggle_flag(x, y)?;
        Ok(MarkOutcome::Changed)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_final() {
            Err(BoardError::GameOver)
        } else {
            Ok(())
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_initial() {
            self.state = SessionState::InProgress;
            self.started_at = Some(Instant::now());
        }
    }

    fn mark_ended(&mut self, state: SessionState) {
        debug_assert!(state.is_final());
        if self.state.is_final() {
            return;
        }

        self.state = state;
        self.ended_at = Some(Instant::now());
        log::debug!("Game ended as {:?} after {:?}", state, self.elapsed());
    }
}
