// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move selection interfaces and seeded playout selectors

use crate::moves::mask_actions;
use crate::win::WinState;
use crate::{board::Board, GameError, Player, Result, TorusGame};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Anything that can pick the next action for a side
pub trait MoveSelector {
    /// Choose an action for `player` on `board`
    fn select(&mut self, game: &TorusGame, board: &Board, player: Player) -> Result<usize>;
}

/// Uniform choice among the filtered candidates
pub struct RandomSelector<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for RandomSelector<R> {
    fn select(&mut self, game: &TorusGame, board: &Board, _player: Player) -> Result<usize> {
        let mut mask = game.filtered_moves(board);
        if !mask.iter().any(|&m| m) {
            mask = game.valid_moves(board);
        }
        pick(&mut self.rng, &mask)
    }
}

/// Uniform choice among the heuristic candidates
pub struct HeuristicSelector<R: Rng> {
    rng: R,
}

impl<R: Rng> HeuristicSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for HeuristicSelector<R> {
    fn select(&mut self, game: &TorusGame, board: &Board, player: Player) -> Result<usize> {
        let mask = game.heuristic_moves(board, player)?;
        pick(&mut self.rng, &mask)
    }
}

fn pick<R: Rng>(rng: &mut R, mask: &[bool]) -> Result<usize> {
    mask_actions(mask)
        .choose(rng)
        .copied()
        .ok_or_else(|| GameError::InvalidMove {
            action: mask.len(),
            reason: "no legal move left",
        })
}

/// One finished playout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Actions in play order, player A first
    pub actions: Vec<usize>,
    /// Board after the last move
    pub final_board: Board,
    /// Terminal status of the final board
    pub result: WinState,
}

impl GameRecord {
    /// Board before each move, paired with the side that played it
    pub fn positions(&self, game: &TorusGame) -> Result<Vec<(Board, Player, usize)>> {
        let mut board = game.initial_state();
        let mut player = Player::A;
        let mut out = Vec::with_capacity(self.actions.len());
        for &action in &self.actions {
            let (next, to_move) = game.step(&board, player, action)?;
            out.push((board, player, action));
            board = next;
            player = to_move;
        }
        Ok(out)
    }
}

/// Play a full game from the empty board, A first, until it ends
pub fn play_game(
    game: &TorusGame,
    selector_a: &mut dyn MoveSelector,
    selector_b: &mut dyn MoveSelector,
) -> Result<GameRecord> {
    let mut board = game.initial_state();
    let mut player = Player::A;
    let mut actions = Vec::new();

    loop {
        let state = game.win_state(&board);
        if state.is_ended() {
            tracing::debug!(moves = actions.len(), ?state, "game finished");
            return Ok(GameRecord {
                actions,
                final_board: board,
                result: state,
            });
        }

        let action = match player {
            Player::A => selector_a.select(game, &board, player)?,
            Player::B => selector_b.select(game, &board, player)?,
        };
        let (next, to_move) = game.step(&board, player, action)?;
        actions.push(action);
        board = next;
        player = to_move;
    }
}
