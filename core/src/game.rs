// SPDX-License-Identifier: MIT OR Apache-2.0

//! The contract search and training code consume

use crate::heuristic::heuristic_moves;
use crate::moves::{filtered_moves, valid_moves};
use crate::symmetry::{expand, TrainingPair};
use crate::win::{win_state, WinState, Winner};
use crate::{board::Board, GameConfig, GameError, Player, Result};

/// Toroidal five-in-a-row with a configurable draw shaping.
///
/// Stateless apart from its configuration; every method takes the board
/// snapshot it works on and never writes through it.
#[derive(Debug, Clone, Default)]
pub struct TorusGame {
    config: GameConfig,
}

impl TorusGame {
    /// Create a game after validating the configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Empty starting board
    pub fn initial_state(&self) -> Board {
        Board::new(self.config.height, self.config.width)
    }

    /// (rows, columns)
    pub fn board_size(&self) -> (usize, usize) {
        (self.config.height, self.config.width)
    }

    /// Width squared; boards are square (enforced by [`GameConfig::validate`])
    pub fn action_count(&self) -> usize {
        self.config.width * self.config.width
    }

    /// Place `player`'s stone and hand the turn over
    pub fn step(&self, board: &Board, player: Player, action: usize) -> Result<(Board, Player)> {
        self.check_shape(board)?;
        let next = board.place(action, player)?;
        Ok((next, player.opposite()))
    }

    pub fn valid_moves(&self, board: &Board) -> Vec<bool> {
        valid_moves(board)
    }

    pub fn filtered_moves(&self, board: &Board) -> Vec<bool> {
        filtered_moves(board)
    }

    pub fn heuristic_moves(&self, board: &Board, player: Player) -> Result<Vec<bool>> {
        heuristic_moves(board, player, &self.config)
    }

    pub fn win_state(&self, board: &Board) -> WinState {
        win_state(board)
    }

    /// 0 while in play, ±1 for a decided game from `player`'s side.
    ///
    /// A draw is worth `draw_reward` to the second mover and 0 to the first.
    pub fn terminal_value(&self, board: &Board, player: Player) -> f32 {
        match win_state(board) {
            WinState::NotEnded => 0.0,
            WinState::Ended(Winner::Player(winner)) if winner == player => 1.0,
            WinState::Ended(Winner::Player(_)) => -1.0,
            WinState::Ended(Winner::Draw) => match player {
                Player::B => self.config.draw_reward,
                Player::A => 0.0,
            },
        }
    }

    /// Board as seen by the side to move: own stones positive
    pub fn canonical_form(&self, board: &Board, player: Player) -> Board {
        board.relative_to(player)
    }

    /// Symmetry orbit of a training pair
    pub fn symmetries(&self, board: &Board, policy: &[f32]) -> Result<Vec<TrainingPair>> {
        self.check_shape(board)?;
        expand(board, policy)
    }

    /// Opaque equality key for visited-state caches
    pub fn string_representation(&self, board: &Board) -> Vec<u8> {
        board.transposition_key()
    }

    /// Text dump with a column header
    pub fn display(board: &Board) -> String {
        board.to_string()
    }

    fn check_shape(&self, board: &Board) -> Result<()> {
        if board.height() != self.config.height || board.width() != self.config.width {
            return Err(GameError::ShapeMismatch {
                expected_rows: self.config.height,
                expected_cols: self.config.width,
                rows: board.height(),
                cols: board.width(),
            });
        }
        Ok(())
    }
}
