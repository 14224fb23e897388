// SPDX-License-Identifier: MIT OR Apache-2.0

//! Torus5 Core - Rules for five-in-a-row on a toroidal board
//!
//! This crate provides the rule engine a self-play learner queries:
//! - Board snapshots and stone placement
//! - Win/draw detection with wrap-around lines
//! - Threat scoring and candidate-move reduction for heuristics
//! - Symmetry expansion of training pairs
//! - CBOR helpers for boards and training examples
//!
//! Every operation is a pure function over an immutable [`Board`]; nothing
//! here holds shared mutable state, so callers may fan calls out across
//! threads freely.

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod cbor;
pub mod config;
pub mod engine;
pub mod game;
pub mod heuristic;
pub mod moves;
pub mod pattern;
pub mod symmetry;
pub mod threat;
pub mod topology;
pub mod win;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// Number of aligned stones that wins the game
pub const WIN_LENGTH: usize = 5;

/// Default board height and width
pub const DEFAULT_SIZE: usize = 11;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First mover, encoded as +1
    A,
    /// Second mover, encoded as -1
    B,
}

impl Player {
    /// Returns the opposing player
    pub fn opposite(&self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Sign used in the dense board encoding
    pub fn sign(&self) -> i8 {
        match self {
            Player::A => 1,
            Player::B => -1,
        }
    }

    /// Decode a player from its board sign
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Player::A),
            -1 => Some(Player::B),
            _ => None,
        }
    }
}

/// Contents of one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Cell {
    #[default]
    Empty = 0,
    A = 1,
    B = -1,
}

impl Cell {
    /// Integer code of this cell (0, +1 or -1)
    pub fn code(&self) -> i8 {
        *self as i8
    }

    /// Owner of the stone in this cell, if any
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::A => Some(Player::A),
            Cell::B => Some(Player::B),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Same cell seen from the other side of the table
    pub fn flipped(&self) -> Self {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::A => Cell::B,
            Cell::B => Cell::A,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::A => Cell::A,
            Player::B => Cell::B,
        }
    }
}

impl TryFrom<i8> for Cell {
    type Error = GameError;

    fn try_from(code: i8) -> Result<Self> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::A),
            -1 => Ok(Cell::B),
            other => Err(GameError::InvariantViolation(format!(
                "cell code {} is not one of 0, 1, -1",
                other
            ))),
        }
    }
}

/// Board coordinate, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Decode an action index; placement never wraps
    pub fn from_action(action: usize, width: usize) -> Self {
        Self {
            row: action / width,
            col: action % width,
        }
    }

    pub fn to_action(&self, width: usize) -> usize {
        self.row * width + self.col
    }
}

/// Errors raised by the rule engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    /// Occupied cell or out-of-range action
    #[error("invalid move {action}: {reason}")]
    InvalidMove { action: usize, reason: &'static str },

    /// Grid or policy dimensions disagree with the declared shape
    #[error("shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// A value outside its closed set of legal encodings
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Rejected configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// CBOR encode/decode failure
    #[error("codec error: {0}")]
    Codec(String),
}

/// Result alias for rule-engine operations
pub type Result<T> = std::result::Result<T, GameError>;

pub use board::Board;
pub use config::GameConfig;
pub use engine::{play_game, GameRecord, HeuristicSelector, MoveSelector, RandomSelector};
pub use game::TorusGame;
pub use symmetry::{Symmetry, TrainingPair};
pub use threat::Threat;
pub use topology::{Axis, Torus};
pub use win::{WinState, Winner};
