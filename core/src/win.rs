// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal-state detection on the torus

use crate::topology::{Axis, Torus};
use crate::{board::Board, Cell, GameError, Player, Result, WIN_LENGTH};
use serde::{Deserialize, Serialize};

/// Who a finished game went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player(Player),
    Draw,
}

impl Winner {
    /// Wire code: +1 / -1 for a player, 2 for a draw
    pub fn code(&self) -> i8 {
        match self {
            Winner::Player(p) => p.sign(),
            Winner::Draw => 2,
        }
    }
}

impl TryFrom<i8> for Winner {
    type Error = GameError;

    fn try_from(code: i8) -> Result<Self> {
        match code {
            2 => Ok(Winner::Draw),
            other => Player::from_sign(other).map(Winner::Player).ok_or_else(|| {
                GameError::InvariantViolation(format!(
                    "winner code {} is not one of 1, -1, 2",
                    other
                ))
            }),
        }
    }
}

/// Status of a board: exactly one variant holds for any grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinState {
    NotEnded,
    Ended(Winner),
}

impl WinState {
    /// Rebuild a state from its (ended, winner) parts, rejecting impossible pairs
    pub fn from_parts(ended: bool, winner: Option<i8>) -> Result<Self> {
        match (ended, winner) {
            (false, None) => Ok(WinState::NotEnded),
            (true, Some(code)) => Winner::try_from(code).map(WinState::Ended),
            (true, None) => Err(GameError::InvariantViolation(
                "ended game without a winner".to_string(),
            )),
            (false, Some(code)) => Err(GameError::InvariantViolation(format!(
                "unfinished game carries winner code {}",
                code
            ))),
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, WinState::Ended(_))
    }

    pub fn winner(&self) -> Option<Winner> {
        match self {
            WinState::NotEnded => None,
            WinState::Ended(w) => Some(*w),
        }
    }
}

/// Decide whether `board` is won, drawn or still in play.
///
/// Lines wrap modulo the board height and width. Each (cell, axis) pair is
/// traced at most once, so the scan is O(H·W) regardless of run lengths.
pub fn win_state(board: &Board) -> WinState {
    let torus = Torus::of(board);
    // bit per axis: set once that axis has been traced through the cell
    let mut traced = vec![0u8; board.len()];

    for player in [Player::B, Player::A] {
        let color = Cell::from(player);
        for index in 0..board.len() {
            if board.cell(index) != color {
                continue;
            }
            for axis in Axis::ALL {
                if traced[index] & axis.bit() != 0 {
                    continue;
                }
                if trace_line(board, &torus, &mut traced, index, axis, color) >= WIN_LENGTH {
                    tracing::debug!(?player, index, ?axis, "five in a row");
                    return WinState::Ended(Winner::Player(player));
                }
            }
        }
    }

    if board.has_empty_cell() {
        WinState::NotEnded
    } else {
        tracing::debug!("board full without a five, draw");
        WinState::Ended(Winner::Draw)
    }
}

/// Length of the run through `start` along `axis`, capped at WIN_LENGTH.
///
/// Walks forward from the start, then backward from the cell before it, so
/// the start is counted once.
fn trace_line(
    board: &Board,
    torus: &Torus,
    traced: &mut [u8],
    start: usize,
    axis: Axis,
    color: Cell,
) -> usize {
    let mut count = 0;

    for direction in [1isize, -1] {
        let mut index = if direction == 1 {
            start
        } else {
            torus.step(start, axis, -1)
        };
        while board.cell(index) == color {
            traced[index] |= axis.bit();
            count += 1;
            if count >= WIN_LENGTH {
                return count;
            }
            index = torus.step(index, axis, direction);
        }
    }

    count
}
